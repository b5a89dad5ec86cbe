//! Orchestrates the per-subsystem passes for both directions: [`write_model`]
//! and [`extract_model`]. Owns the default-bit table and the extraction
//! scratch switch list; the ordering guarantees documented here (switches
//! before logic during decode, defaults first during both directions) are
//! load-bearing — see the module-level ordering notes below each function.

use crate::bitplane::{BitAddr, BitPlane};
use crate::consts::DEFAULT_BITS;
use crate::error::{CodecError, Result};
use crate::fabric::{FabricQuery, IoSide};
use crate::model::{Floorplan, Net};

use super::iob::{extract_iobs, write_iobs};
use super::logic::{extract_logic, write_logic};
use super::switch::{
    extract_iologic_switches, extract_logic_switches, extract_routing_switches, write_iologic_sw,
    write_routing_sw, SwitchScratch,
};

fn default_bit_addr<F: FabricQuery>(fabric: &F, pos: &crate::consts::BitPos) -> Result<BitAddr> {
    let offset = fabric
        .first_frame_offset(pos.row as i32, pos.major as i32)
        .ok_or_else(|| CodecError::Invariant {
            message: format!("no frame offset for default bit row {} major {}", pos.row, pos.major),
        })?;
    Ok(BitAddr {
        frame_offset: offset + pos.minor as usize * crate::consts::FRAME_SIZE_BYTES,
        bit: pos.bit,
    })
}

/// Encodes `floorplan` into `plane`.
///
/// Order: defaults, then switches, then IOBs, then logic. The order among
/// these four has no observable effect on the final image since their bit
/// domains never overlap; defaults are written first purely by convention.
pub fn write_model<F: FabricQuery>(plane: &mut BitPlane, fabric: &F, floorplan: &Floorplan) -> Result<()> {
    for pos in &DEFAULT_BITS {
        plane.set_bit(default_bit_addr(fabric, pos)?)?;
    }

    write_switches(plane, fabric, floorplan)?;
    write_iobs(plane, fabric, floorplan)?;
    write_logic(plane, fabric, &floorplan.logic)?;
    Ok(())
}

/// Dispatches each tile's activated switches to the routing or iologic
/// sub-codec; a tile with `USED` switches matching neither class is logged
/// and otherwise ignored, mirroring the source's noop-log behavior for
/// logic/IOB tile classes it does not yet handle on the encode side.
fn write_switches<F: FabricQuery>(plane: &mut BitPlane, fabric: &F, floorplan: &Floorplan) -> Result<()> {
    let routing: std::collections::HashSet<(i32, i32)> = fabric.routing_tiles().into_iter().collect();
    let iologic: std::collections::HashMap<(i32, i32), IoSide> =
        fabric.iologic_tiles().into_iter().map(|(y, x, s)| ((y, x), s)).collect();

    for (&(y, x), switches) in &floorplan.switches {
        if switches.is_empty() {
            continue;
        }
        if routing.contains(&(y, x)) {
            write_routing_sw(plane, fabric, y, x, switches)?;
        } else if let Some(&side) = iologic.get(&(y, x)) {
            write_iologic_sw(plane, fabric, y, x, side, switches)?;
        } else {
            tracing::warn!(y, x, "USED switches in an unsupported tile class, skipping");
        }
    }
    Ok(())
}

/// Decodes `plane` into a fresh [`Floorplan`].
///
/// Order: verify and clear default bits; extract switches (routing, then
/// logic, then iologic — so each pass's bits are cleared before later
/// residual checks run); extract IOBs; extract logic (whose own residual
/// check would otherwise see switch bits as false residue if switches ran
/// after it); finally turn the scratch switch list into nets.
pub fn extract_model<F: FabricQuery>(plane: &mut BitPlane, fabric: &mut F) -> Result<Floorplan> {
    for pos in &DEFAULT_BITS {
        let addr = default_bit_addr(fabric, pos)?;
        if !plane.get_bit(addr)? {
            return Err(CodecError::MissingDefaultBit {
                row: pos.row,
                major: pos.major,
                minor: pos.minor,
                bit: pos.bit,
            });
        }
    }
    for pos in &DEFAULT_BITS {
        plane.clear_bit(default_bit_addr(fabric, pos)?)?;
    }

    let mut scratch = SwitchScratch::new();
    extract_routing_switches(plane, fabric, &mut scratch)?;
    extract_logic_switches(plane, fabric, &mut scratch)?;
    extract_iologic_switches(plane, fabric, &mut scratch)?;

    let mut floorplan = Floorplan::new();
    extract_iobs(plane, fabric, &mut floorplan)?;
    extract_logic(plane, fabric)?;

    if !floorplan.nets.is_empty() {
        return Err(CodecError::Invariant {
            message: "model net list must be empty on entry to extract_model".to_string(),
        });
    }
    for entry in scratch.entries() {
        floorplan.nets.push(Net {
            y: entry.y,
            x: entry.x,
            switch_index: entry.switch_index,
        });
    }

    Ok(floorplan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::stub::StubFabric;

    #[test]
    fn empty_floorplan_sets_only_default_bits() {
        let fabric = StubFabric::new();
        let floorplan = Floorplan::new();
        let mut plane = BitPlane::zeroed(64);
        write_model(&mut plane, &fabric, &floorplan).unwrap();

        for pos in &DEFAULT_BITS {
            let addr = default_bit_addr(&fabric, pos).unwrap();
            assert!(plane.get_bit(addr).unwrap());
        }
    }

    #[test]
    fn all_zero_image_fails_missing_default_bit() {
        let mut fabric = StubFabric::new();
        let mut plane = BitPlane::zeroed(64);
        let err = extract_model(&mut plane, &mut fabric).unwrap_err();
        assert!(matches!(err, CodecError::MissingDefaultBit { .. }));
    }

    #[test]
    fn defaults_only_image_decodes_to_empty_floorplan() {
        let mut fabric = StubFabric::new();
        let mut plane = BitPlane::zeroed(64);
        for pos in &DEFAULT_BITS {
            plane.set_bit(default_bit_addr(&fabric, pos).unwrap()).unwrap();
        }
        let floorplan = extract_model(&mut plane, &mut fabric).unwrap();
        assert!(floorplan.iobs.is_empty());
        assert!(floorplan.nets.is_empty());
    }

    #[test]
    fn full_roundtrip_empty_floorplan() {
        let fabric_enc = StubFabric::new();
        let floorplan = Floorplan::new();
        let mut plane = BitPlane::zeroed(64);
        write_model(&mut plane, &fabric_enc, &floorplan).unwrap();

        let mut fabric_dec = StubFabric::new();
        let decoded = extract_model(&mut plane, &mut fabric_dec).unwrap();
        assert!(decoded.iobs.is_empty());
        assert!(decoded.nets.is_empty());
    }
}
