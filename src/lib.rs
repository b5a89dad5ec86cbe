//! xc6-bitcodec — bidirectional codec between an in-memory floorplan model
//! and the flat configuration bitstream of a Xilinx Spartan-6 XC6SLX9-class
//! FPGA.
//!
//! The crate performs the mapping in both directions ([`write_model`],
//! [`extract_model`]) against a caller-supplied [`FabricQuery`] — the tile
//! grid, device catalog, and wire-name database are an external collaborator
//! this crate never owns. A minimal in-memory fabric (`fabric::stub`) and a
//! line-based floorplan text format (`floorplan`) are included so the crate
//! and its two binaries, `fp2bit` and `bit2fp`, are runnable end to end
//! without a real device database.
//!
//! # Quick start
//!
//! ```rust
//! use bitcodec::{BitPlane, Floorplan};
//! use bitcodec::fabric::stub::StubFabric;
//!
//! let fabric = StubFabric::new();
//! let floorplan = Floorplan::new();
//! let mut plane = BitPlane::zeroed(64);
//! bitcodec::write_model(&mut plane, &fabric, &floorplan).unwrap();
//!
//! let mut fabric = StubFabric::new();
//! let decoded = bitcodec::extract_model(&mut plane, &mut fabric).unwrap();
//! assert!(decoded.nets.is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitplane;
pub mod codec;
pub mod consts;
pub mod error;
pub mod fabric;
pub mod floorplan;
pub mod model;

pub use bitplane::{BitAddr, BitPlane};
pub use codec::driver::{extract_model, write_model};
pub use error::{CodecError, Result};
pub use fabric::FabricQuery;
pub use model::Floorplan;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::stub::StubFabric;
    use crate::model::{IMux, IobConfig, IobMode, InputStandard};

    #[test]
    fn end_to_end_roundtrip_with_one_iob() {
        let mut fabric = StubFabric::new();
        fabric.iobs.push((0, 0, "P1".to_string()));

        let mut floorplan = Floorplan::new();
        floorplan.iobs.insert(
            "P1".to_string(),
            IobConfig {
                site: "P1".to_string(),
                mode: IobMode::Input {
                    standard: InputStandard::Lvcmos33,
                    imux: IMux::I,
                },
            },
        );

        let mut plane = BitPlane::zeroed(64);
        write_model(&mut plane, &fabric, &floorplan).unwrap();

        let decoded = extract_model(&mut plane, &mut fabric).unwrap();
        assert_eq!(decoded.iobs.get("P1"), floorplan.iobs.get("P1"));
    }
}
