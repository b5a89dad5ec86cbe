//! Per-pad I/O buffer encode/decode: [`write_iobs`] and [`extract_iobs`].
//!
//! Mirrors `write_iobs`/`extract_iobs` in the original codec: iterate the
//! fabric's pad enumeration, build or tear down a 64-bit attribute word per
//! occupied [`IOB_ENTRY_LEN`]-byte slot, and manage the single global
//! ring-enable bit that must be set once before any IOB entry is valid.

use crate::bitplane::{BitAddr, BitPlane};
use crate::consts::HCLK_BITS;
use crate::error::{CodecError, Result};
use crate::fabric::FabricQuery;
use crate::model::{Floorplan, IMux, IobConfig, IobMode, InputStandard, OutputStandard, Slew, Suspend};

/// Byte offset of the first IOB entry within row 0's right-side major.
pub const IOB_DATA_START: usize = 64 * 8;
/// Bytes per IOB entry.
pub const IOB_ENTRY_LEN: usize = 8;

bitflags::bitflags! {
    /// The 64-bit attribute word stored in one IOB entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IobWord: u64 {
        const INSTANTIATED = 1 << 0;
        const INPUT        = 1 << 1;
        const O_PINW       = 1 << 2;
        const IMUX_I_B     = 1 << 3;

        const ISTD_LVCMOS33 = 1 << 4;
        const ISTD_LVCMOS25 = 1 << 5;
        const ISTD_LVCMOS18 = 1 << 6;
        const ISTD_LVCMOS15 = 1 << 7;
        const ISTD_LVTTL    = 1 << 8;

        const OSTD_LVCMOS33_DRIVE_2  = 1 << 9;
        const OSTD_LVCMOS33_DRIVE_4  = 1 << 10;
        const OSTD_LVCMOS33_DRIVE_6  = 1 << 11;
        const OSTD_LVCMOS33_DRIVE_8  = 1 << 12;
        const OSTD_LVCMOS33_DRIVE_12 = 1 << 13;
        const OSTD_LVCMOS33_DRIVE_16 = 1 << 14;
        const OSTD_LVCMOS25_DRIVE_2  = 1 << 15;
        const OSTD_LVCMOS25_DRIVE_4  = 1 << 16;
        const OSTD_LVCMOS25_DRIVE_6  = 1 << 17;
        const OSTD_LVCMOS25_DRIVE_8  = 1 << 18;
        const OSTD_LVCMOS25_DRIVE_12 = 1 << 19;
        const OSTD_LVCMOS18_DRIVE_2  = 1 << 20;
        const OSTD_LVCMOS18_DRIVE_4  = 1 << 21;
        const OSTD_LVCMOS18_DRIVE_6  = 1 << 22;
        const OSTD_LVCMOS18_DRIVE_8  = 1 << 23;
        const OSTD_LVCMOS15_DRIVE_2  = 1 << 24;
        const OSTD_LVCMOS15_DRIVE_4  = 1 << 25;
        const OSTD_LVCMOS15_DRIVE_6  = 1 << 26;
        const OSTD_LVCMOS15_DRIVE_8  = 1 << 27;
        const OSTD_LVTTL_DRIVE_2     = 1 << 28;
        const OSTD_LVTTL_DRIVE_4     = 1 << 29;
        const OSTD_LVTTL_DRIVE_6     = 1 << 30;
        const OSTD_LVTTL_DRIVE_8     = 1 << 31;

        const SLEW_SLOW     = 1 << 32;
        const SLEW_FAST     = 1 << 33;
        const SLEW_QUIETIO  = 1 << 34;

        const SUSP_3STATE          = 1 << 35;
        const SUSP_3STATE_OUTCURRENT = 1 << 36;
        const SUSP_3STATE_KEEPER   = 1 << 37;
        const SUSP_3STATE_PULLUP   = 1 << 38;
        const SUSP_3STATE_PULLDOWN = 1 << 39;
        const SUSP_DRIVE_LAST_VALUE = 1 << 40;
    }
}

/// `(ostandard, drive strength)` → attribute bit, the fixed table referenced
/// by the encode and decode paths alike.
const OSTD_DRIVE_TABLE: &[(OutputStandard, u8, IobWord)] = &[
    (OutputStandard::Lvcmos33, 2, IobWord::OSTD_LVCMOS33_DRIVE_2),
    (OutputStandard::Lvcmos33, 4, IobWord::OSTD_LVCMOS33_DRIVE_4),
    (OutputStandard::Lvcmos33, 6, IobWord::OSTD_LVCMOS33_DRIVE_6),
    (OutputStandard::Lvcmos33, 8, IobWord::OSTD_LVCMOS33_DRIVE_8),
    (OutputStandard::Lvcmos33, 12, IobWord::OSTD_LVCMOS33_DRIVE_12),
    (OutputStandard::Lvcmos33, 16, IobWord::OSTD_LVCMOS33_DRIVE_16),
    (OutputStandard::Lvcmos25, 2, IobWord::OSTD_LVCMOS25_DRIVE_2),
    (OutputStandard::Lvcmos25, 4, IobWord::OSTD_LVCMOS25_DRIVE_4),
    (OutputStandard::Lvcmos25, 6, IobWord::OSTD_LVCMOS25_DRIVE_6),
    (OutputStandard::Lvcmos25, 8, IobWord::OSTD_LVCMOS25_DRIVE_8),
    (OutputStandard::Lvcmos25, 12, IobWord::OSTD_LVCMOS25_DRIVE_12),
    (OutputStandard::Lvcmos18, 2, IobWord::OSTD_LVCMOS18_DRIVE_2),
    (OutputStandard::Lvcmos18, 4, IobWord::OSTD_LVCMOS18_DRIVE_4),
    (OutputStandard::Lvcmos18, 6, IobWord::OSTD_LVCMOS18_DRIVE_6),
    (OutputStandard::Lvcmos18, 8, IobWord::OSTD_LVCMOS18_DRIVE_8),
    (OutputStandard::Lvcmos15, 2, IobWord::OSTD_LVCMOS15_DRIVE_2),
    (OutputStandard::Lvcmos15, 4, IobWord::OSTD_LVCMOS15_DRIVE_4),
    (OutputStandard::Lvcmos15, 6, IobWord::OSTD_LVCMOS15_DRIVE_6),
    (OutputStandard::Lvcmos15, 8, IobWord::OSTD_LVCMOS15_DRIVE_8),
    (OutputStandard::Lvttl, 2, IobWord::OSTD_LVTTL_DRIVE_2),
    (OutputStandard::Lvttl, 4, IobWord::OSTD_LVTTL_DRIVE_4),
    (OutputStandard::Lvttl, 6, IobWord::OSTD_LVTTL_DRIVE_6),
    (OutputStandard::Lvttl, 8, IobWord::OSTD_LVTTL_DRIVE_8),
];

fn istandard_bit(std: InputStandard) -> IobWord {
    match std {
        InputStandard::Lvcmos33 => IobWord::ISTD_LVCMOS33,
        InputStandard::Lvcmos25 => IobWord::ISTD_LVCMOS25,
        InputStandard::Lvcmos18 => IobWord::ISTD_LVCMOS18,
        InputStandard::Lvcmos15 => IobWord::ISTD_LVCMOS15,
        InputStandard::Lvttl => IobWord::ISTD_LVTTL,
    }
}

fn istandard_from_bit(word: IobWord) -> Option<InputStandard> {
    for (bit, std) in [
        (IobWord::ISTD_LVCMOS33, InputStandard::Lvcmos33),
        (IobWord::ISTD_LVCMOS25, InputStandard::Lvcmos25),
        (IobWord::ISTD_LVCMOS18, InputStandard::Lvcmos18),
        (IobWord::ISTD_LVCMOS15, InputStandard::Lvcmos15),
        (IobWord::ISTD_LVTTL, InputStandard::Lvttl),
    ] {
        if word.contains(bit) {
            return Some(std);
        }
    }
    None
}

fn suspend_bit(s: Suspend) -> IobWord {
    match s {
        Suspend::ThreeState => IobWord::SUSP_3STATE,
        Suspend::ThreeStateOutcurrent => IobWord::SUSP_3STATE_OUTCURRENT,
        Suspend::ThreeStateKeeper => IobWord::SUSP_3STATE_KEEPER,
        Suspend::ThreeStatePullup => IobWord::SUSP_3STATE_PULLUP,
        Suspend::ThreeStatePulldown => IobWord::SUSP_3STATE_PULLDOWN,
        Suspend::DriveLastValue => IobWord::SUSP_DRIVE_LAST_VALUE,
    }
}

fn suspend_from_bit(word: IobWord) -> Option<Suspend> {
    for (bit, s) in [
        (IobWord::SUSP_3STATE, Suspend::ThreeState),
        (IobWord::SUSP_3STATE_OUTCURRENT, Suspend::ThreeStateOutcurrent),
        (IobWord::SUSP_3STATE_KEEPER, Suspend::ThreeStateKeeper),
        (IobWord::SUSP_3STATE_PULLUP, Suspend::ThreeStatePullup),
        (IobWord::SUSP_3STATE_PULLDOWN, Suspend::ThreeStatePulldown),
        (IobWord::SUSP_DRIVE_LAST_VALUE, Suspend::DriveLastValue),
    ] {
        if word.contains(bit) {
            return Some(s);
        }
    }
    None
}

fn slew_bit(s: Slew) -> IobWord {
    match s {
        Slew::Slow => IobWord::SLEW_SLOW,
        Slew::Fast => IobWord::SLEW_FAST,
        Slew::QuietIo => IobWord::SLEW_QUIETIO,
    }
}

fn slew_from_bit(word: IobWord) -> Option<Slew> {
    for (bit, s) in [
        (IobWord::SLEW_SLOW, Slew::Slow),
        (IobWord::SLEW_FAST, Slew::Fast),
        (IobWord::SLEW_QUIETIO, Slew::QuietIo),
    ] {
        if word.contains(bit) {
            return Some(s);
        }
    }
    None
}

fn ring_enable_addr<F: FabricQuery>(fabric: &F) -> BitAddr {
    let major = fabric.get_rightside_major();
    let frame_offset = fabric.first_frame_offset(0, major).unwrap_or(0);
    BitAddr {
        frame_offset: frame_offset + 22 * crate::consts::FRAME_SIZE_BYTES,
        bit: (64 * 15 + HCLK_BITS as u16 + 4),
    }
}

fn entry_addr(part_index: usize) -> BitAddr {
    BitAddr {
        frame_offset: IOB_DATA_START + part_index * IOB_ENTRY_LEN,
        bit: 0,
    }
}

/// Encodes every instantiated IOB in `floorplan` into `plane`.
pub fn write_iobs<F: FabricQuery>(plane: &mut BitPlane, fabric: &F, floorplan: &Floorplan) -> Result<()> {
    let mut ring_enabled = false;
    for (y, x, site) in fabric.enum_iobs() {
        let Some(cfg) = floorplan.iobs.get(&site) else {
            continue;
        };
        let Some(part_index) = fabric.iob_part_index(&site) else {
            tracing::warn!(site, y, x, "IOB site has no part index, skipping");
            continue;
        };

        if !ring_enabled {
            plane.set_bit(ring_enable_addr(fabric))?;
            ring_enabled = true;
        }

        let mut word = IobWord::INSTANTIATED;
        match &cfg.mode {
            IobMode::Input { standard, imux } => {
                word |= IobWord::INPUT;
                if *imux == IMux::IB {
                    word |= IobWord::IMUX_I_B;
                }
                word |= istandard_bit(*standard);
            }
            IobMode::Output {
                standard,
                drive_strength,
                slew,
                suspend,
            } => {
                word |= IobWord::O_PINW;
                let drive_bit = OSTD_DRIVE_TABLE
                    .iter()
                    .find(|(s, d, _)| s == standard && d == drive_strength)
                    .map(|(_, _, bit)| *bit)
                    .ok_or_else(|| CodecError::UnknownTableEntry {
                        table: "ostandard_drive",
                        y,
                        x,
                        value: *drive_strength as u64,
                    })?;
                word |= drive_bit;
                word |= slew_bit(*slew);
                word |= suspend_bit(*suspend);
            }
        }

        plane.write_word_le(IOB_DATA_START + part_index * IOB_ENTRY_LEN, word.bits())?;
    }
    Ok(())
}

/// Decodes every non-zero IOB entry in `plane` into `floorplan`.
pub fn extract_iobs<F: FabricQuery>(plane: &mut BitPlane, fabric: &F, floorplan: &mut Floorplan) -> Result<()> {
    let mut ring_checked = false;
    let sites_by_index: Vec<(i32, i32, String)> = fabric.enum_iobs();

    for part_index in 0..fabric.num_iobs() {
        let raw = plane.read_word_le(IOB_DATA_START + part_index * IOB_ENTRY_LEN)?;
        if raw == 0 {
            continue;
        }
        let mut word = IobWord::from_bits_truncate(raw);

        let Some((y, x, site)) = sites_by_index
            .iter()
            .find(|(_, _, name)| fabric.iob_part_index(name) == Some(part_index))
            .cloned()
        else {
            // 6 clock-only IOB slots per side have no site mapping; skip silently.
            continue;
        };

        if !ring_checked {
            let addr = ring_enable_addr(fabric);
            if !plane.get_bit(addr)? {
                return Err(CodecError::Invariant {
                    message: format!("IOB ring-enable bit not set before entry at {site}"),
                });
            }
            plane.clear_bit(addr)?;
            ring_checked = true;
        }

        if !word.contains(IobWord::INSTANTIATED) {
            return Err(CodecError::Invariant {
                message: format!("IOB entry for {site} missing INSTANTIATED bit"),
            });
        }
        word.remove(IobWord::INSTANTIATED);

        let mode = if word.contains(IobWord::INPUT) {
            word.remove(IobWord::INPUT);
            let imux = if word.contains(IobWord::IMUX_I_B) {
                word.remove(IobWord::IMUX_I_B);
                IMux::IB
            } else {
                IMux::I
            };
            let Some(standard) = istandard_from_bit(word) else {
                tracing::warn!(site, y, x, bits = format!("{:X}", word.bits()), "residual bits in IOB input entry");
                continue;
            };
            word.remove(istandard_bit(standard));
            IobMode::Input { standard, imux }
        } else if word.contains(IobWord::O_PINW) {
            word.remove(IobWord::O_PINW);
            let Some((standard, drive_strength, drive_bit)) = OSTD_DRIVE_TABLE
                .iter()
                .find(|(_, _, bit)| word.contains(*bit))
                .copied()
            else {
                tracing::warn!(site, y, x, "unknown output drive code");
                continue;
            };
            word.remove(drive_bit);
            let slew = slew_from_bit(word).unwrap_or(Slew::Slow);
            if let Some(b) = [IobWord::SLEW_SLOW, IobWord::SLEW_FAST, IobWord::SLEW_QUIETIO]
                .into_iter()
                .find(|b| word.contains(*b))
            {
                word.remove(b);
            }
            let suspend = suspend_from_bit(word).unwrap_or(Suspend::ThreeState);
            if let Some(b) = [
                IobWord::SUSP_3STATE,
                IobWord::SUSP_3STATE_OUTCURRENT,
                IobWord::SUSP_3STATE_KEEPER,
                IobWord::SUSP_3STATE_PULLUP,
                IobWord::SUSP_3STATE_PULLDOWN,
                IobWord::SUSP_DRIVE_LAST_VALUE,
            ]
            .into_iter()
            .find(|b| word.contains(*b))
            {
                word.remove(b);
            }
            IobMode::Output {
                standard,
                drive_strength,
                slew,
                suspend,
            }
        } else {
            tracing::warn!(site, y, x, "IOB entry has neither INPUT nor O_PINW set");
            continue;
        };

        if !word.is_empty() {
            tracing::warn!(
                site,
                y,
                x,
                residual = format!("{:X}", word.bits()),
                "residual bits after IOB decode"
            );
            continue;
        }

        plane.set_bits(entry_addr(part_index), 64, 0)?;
        floorplan.iobs.insert(site.clone(), IobConfig { site, mode });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::stub::StubFabric;

    fn fabric_with_one_pad(site: &str) -> StubFabric {
        let mut f = StubFabric::new();
        f.iobs.push((0, 0, site.to_string()));
        f
    }

    #[test]
    fn output_pad_roundtrips() {
        let fabric = fabric_with_one_pad("P58");
        let mut model = Floorplan::new();
        model.iobs.insert(
            "P58".to_string(),
            IobConfig {
                site: "P58".to_string(),
                mode: IobMode::Output {
                    standard: OutputStandard::Lvcmos33,
                    drive_strength: 12,
                    slew: Slew::Slow,
                    suspend: Suspend::ThreeState,
                },
            },
        );

        let mut plane = BitPlane::zeroed(64);
        write_iobs(&mut plane, &fabric, &model).unwrap();

        let mut decoded = Floorplan::new();
        extract_iobs(&mut plane, &fabric, &mut decoded).unwrap();

        assert_eq!(decoded.iobs.get("P58"), model.iobs.get("P58"));
        assert!(plane.get_bits(entry_addr(0), 64).unwrap() == 0);
    }

    #[test]
    fn input_pad_roundtrips() {
        let fabric = fabric_with_one_pad("P12");
        let mut model = Floorplan::new();
        model.iobs.insert(
            "P12".to_string(),
            IobConfig {
                site: "P12".to_string(),
                mode: IobMode::Input {
                    standard: InputStandard::Lvttl,
                    imux: IMux::IB,
                },
            },
        );

        let mut plane = BitPlane::zeroed(64);
        write_iobs(&mut plane, &fabric, &model).unwrap();
        let mut decoded = Floorplan::new();
        extract_iobs(&mut plane, &fabric, &mut decoded).unwrap();
        assert_eq!(decoded.iobs.get("P12"), model.iobs.get("P12"));
    }
}
