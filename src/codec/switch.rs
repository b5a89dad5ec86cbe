//! Encode/decode of activated programmable-interconnect switches.
//!
//! Three sub-codecs share one scratch list: general routing switches
//! (`extract_routing_switches`/`write_routing_sw`), the logic-tile
//! carry-chain bit (`extract_logic_switches`), and the iologic fixed-block
//! tables (`extract_iologic_switches`/`write_iologic_sw`).

use crate::bitplane::{BitAddr, BitPlane};
use crate::consts::{FRAME_SIZE_BYTES, HCLK_POS, MAX_YX_SWITCHES, MI_CIN_USED_L, MI_CIN_USED_M};
use crate::error::{CodecError, Result};
use crate::fabric::{FabricQuery, IoSide, SwBitpos, SwitchDir, SwitchStatus};
use crate::model::SwitchRecord;

/// One `(y, x, switch_index)` triple awaiting net synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchEntry {
    pub y: i32,
    pub x: i32,
    pub switch_index: usize,
}

/// Bounded scratch list of switches accumulated during extraction.
#[derive(Debug, Clone, Default)]
pub struct SwitchScratch {
    entries: Vec<ScratchEntry>,
}

impl SwitchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, y: i32, x: i32, switch_index: usize) -> Result<()> {
        if self.entries.len() >= MAX_YX_SWITCHES {
            return Err(CodecError::Capacity {
                y,
                x,
                limit: MAX_YX_SWITCHES,
            });
        }
        self.entries.push(ScratchEntry { y, x, switch_index });
        Ok(())
    }

    pub fn entries(&self) -> &[ScratchEntry] {
        &self.entries
    }
}

fn start_in_frame(row_pos: u8) -> i32 {
    if row_pos > HCLK_POS {
        (row_pos as i32 - 1) * 64 + 16
    } else {
        row_pos as i32 * 64
    }
}

fn tile_frame_offset<F: FabricQuery>(fabric: &F, y: i32, x: i32) -> Result<(usize, u8)> {
    let (row, row_pos) = fabric.is_in_row(y).ok_or_else(|| CodecError::Invariant {
        message: format!("y={y} does not lie on a configuration row"),
    })?;
    let major = fabric.x_major(x);
    let offset = fabric
        .first_frame_offset(row, major)
        .ok_or_else(|| CodecError::Invariant {
            message: format!("no frame offset for row={row} major={major}"),
        })?;
    Ok((offset, row_pos))
}

fn minor_addr(tile_offset: usize, minor: u16, bit: i32) -> BitAddr {
    BitAddr {
        frame_offset: tile_offset + minor as usize * FRAME_SIZE_BYTES,
        bit: bit as u16,
    }
}

/// Tests and, if active, returns the three bit addresses for one routing
/// switch entry at a tile.
fn routing_bits(tile_offset: usize, start: i32, sw: &SwBitpos) -> ([BitAddr; 2], BitAddr) {
    if sw.minor == 20 {
        let data0 = minor_addr(tile_offset, 20, start + sw.two_bits_o as i32);
        let data1 = minor_addr(tile_offset, 20, start + sw.two_bits_o as i32 + 1);
        let enable = minor_addr(tile_offset, 20, start + sw.one_bit_o as i32);
        ([data0, data1], enable)
    } else {
        let data0 = minor_addr(tile_offset, sw.minor, start + sw.two_bits_o as i32 / 2);
        let data1 = minor_addr(tile_offset, sw.minor + 1, start + sw.two_bits_o as i32 / 2);
        let enable_minor = sw.minor + (sw.one_bit_o & 1);
        let enable = minor_addr(tile_offset, enable_minor, start + sw.one_bit_o as i32 / 2);
        ([data0, data1], enable)
    }
}

/// Decodes every activated general-routing switch into `scratch`.
pub fn extract_routing_switches<F: FabricQuery>(
    plane: &mut BitPlane,
    fabric: &F,
    scratch: &mut SwitchScratch,
) -> Result<()> {
    for (y, x) in fabric.routing_tiles() {
        let (tile_offset, row_pos) = tile_frame_offset(fabric, y, x)?;
        let start = start_in_frame(row_pos);
        let table = fabric.sw_bitpos(y, x).to_vec();

        for (idx, sw) in table.iter().enumerate() {
            let ([d0, d1], en) = routing_bits(tile_offset, start, sw);
            let b0 = plane.get_bit(d0)?;
            let b1 = plane.get_bit(d1)?;
            let value = (b0 as u8) | ((b1 as u8) << 1);
            let enabled = plane.get_bit(en)?;
            if value != sw.two_bits_val || !enabled {
                continue;
            }

            let (status, reversed) = match fabric.switch_lookup(y, x, &sw.from_wire, &sw.to_wire) {
                Some(s) => (Some(s), false),
                None if sw.bidir => (
                    fabric.switch_lookup(y, x, &sw.to_wire, &sw.from_wire),
                    true,
                ),
                None => (None, false),
            };
            match status {
                Some(SwitchStatus::Used) => {
                    tracing::warn!(y, x, from = %sw.from_wire, to = %sw.to_wire, "switch already used");
                    continue;
                }
                None => {
                    tracing::warn!(y, x, from = %sw.from_wire, to = %sw.to_wire, "unknown switch, skipping");
                    tracing::debug!("{}", debug_bitpos_table(&table));
                    continue;
                }
                Some(SwitchStatus::Unused) => {}
            }
            if reversed {
                tracing::debug!(y, x, idx, "bidirectional switch matched via reversed lookup");
            }

            scratch.push(y, x, idx)?;
            plane.clear_bit(d0)?;
            plane.clear_bit(d1)?;
            plane.clear_bit(en)?;
        }
    }
    Ok(())
}

/// Renders `table` as aligned diagnostic text, one row per switch: minor,
/// the two-bit field's expected value in hex, the one-bit enable offset,
/// and the wire pair. Intended for `--verbose` trace output when a switch
/// lookup misbehaves, not for parsing.
pub fn debug_bitpos_table(table: &[SwBitpos]) -> String {
    let mut out = String::new();
    for (idx, sw) in table.iter().enumerate() {
        out.push_str(&format!(
            "{idx:4} mi{:<3} val=0x{} bit={:<4} bidir={:<5} {} -> {}\n",
            sw.minor,
            hex::encode([sw.two_bits_val]),
            sw.one_bit_o,
            sw.bidir,
            sw.from_wire,
            sw.to_wire,
        ));
    }
    out
}

fn find_bitpos(table: &[SwBitpos], from: &str, to: &str) -> Option<(usize, bool)> {
    if let Some(i) = table.iter().position(|s| s.from_wire == from && s.to_wire == to) {
        return Some((i, false));
    }
    table
        .iter()
        .position(|s| s.bidir && s.from_wire == to && s.to_wire == from)
        .map(|i| (i, true))
}

/// Encodes a tile's activated routing switches, the inverse of
/// [`extract_routing_switches`].
pub fn write_routing_sw<F: FabricQuery>(
    plane: &mut BitPlane,
    fabric: &F,
    y: i32,
    x: i32,
    switches: &[SwitchRecord],
) -> Result<()> {
    let (tile_offset, row_pos) = tile_frame_offset(fabric, y, x)?;
    let start = start_in_frame(row_pos);
    let table = fabric.sw_bitpos(y, x).to_vec();

    for rec in switches {
        let Some((idx, reversed)) = find_bitpos(&table, &rec.from_wire, &rec.to_wire) else {
            return Err(CodecError::UnknownSwitch {
                y,
                x,
                from: rec.from_wire.clone(),
                to: rec.to_wire.clone(),
            });
        };
        if reversed {
            tracing::debug!(y, x, from = %rec.from_wire, to = %rec.to_wire, "writing via bidirectional reversal");
        }
        let sw = &table[idx];
        let ([d0, d1], en) = routing_bits(tile_offset, start, sw);
        if sw.two_bits_val & 1 != 0 {
            plane.set_bit(d0)?;
        } else {
            plane.clear_bit(d0)?;
        }
        if sw.two_bits_val & 2 != 0 {
            plane.set_bit(d1)?;
        } else {
            plane.clear_bit(d1)?;
        }
        plane.set_bit(en)?;
    }
    Ok(())
}

/// Decodes the logic-tile carry-chain bit: if set, walks one step up the
/// carry chain and records the upstream switch.
pub fn extract_logic_switches<F: FabricQuery>(
    plane: &mut BitPlane,
    fabric: &F,
    scratch: &mut SwitchScratch,
) -> Result<()> {
    for (y, x) in fabric.logic_tiles() {
        let (tile_offset, _) = tile_frame_offset(fabric, y, x)?;
        let minor = if fabric.is_m_column(x) {
            MI_CIN_USED_M
        } else {
            MI_CIN_USED_L
        };
        let addr = minor_addr(tile_offset, minor as u16, 0);
        if !plane.get_bit(addr)? {
            continue;
        }
        if let Some((uy, ux, _dest)) = fabric.switch_first(y, x, "LI_CIN", SwitchDir::To) {
            let table = fabric.sw_bitpos(uy, ux);
            if let Some(idx) = table.iter().position(|s| s.to_wire == "LI_CIN" || s.from_wire == "LI_CIN") {
                scratch.push(uy, ux, idx)?;
            }
        }
        plane.clear_bit(addr)?;
    }
    Ok(())
}

/// One group of wire pairs gated by up to 4 `(minor, bit64)` positions in an
/// iologic tile.
#[derive(Debug, Clone)]
pub struct IoLogicSwGroup {
    pub pairs: Vec<(&'static str, &'static str)>,
    pub gates: Vec<(u16, u16)>,
}

fn io_swpos_table(side: IoSide) -> &'static [IoLogicSwGroup] {
    // The left, right, top-outer, and top-inner tables are intentionally
    // empty: the source device database carries no fixed-block switches on
    // those sides.
    static EMPTY: [IoLogicSwGroup; 0] = [];
    match side {
        IoSide::Left | IoSide::Right | IoSide::TopOuter | IoSide::TopInner => &EMPTY,
        IoSide::BottomInner | IoSide::BottomOuter => bottom_table(),
    }
}

fn bottom_table() -> &'static [IoLogicSwGroup] {
    use std::sync::OnceLock;
    static TABLE: OnceLock<Vec<IoLogicSwGroup>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            IoLogicSwGroup {
                pairs: vec![("IOCLK0", "ILOGIC_CLK"), ("IOCLK0", "OLOGIC_CLK")],
                gates: vec![(24, 0), (24, 1)],
            },
            IoLogicSwGroup {
                pairs: vec![("IOCLK1", "ILOGIC_CLK")],
                gates: vec![(24, 2)],
            },
        ]
    })
}

/// Decodes the iologic fixed-block switch table for every iologic tile.
pub fn extract_iologic_switches<F: FabricQuery>(
    plane: &mut BitPlane,
    fabric: &F,
    scratch: &mut SwitchScratch,
) -> Result<()> {
    for (y, x, side) in fabric.iologic_tiles() {
        let (tile_offset, _) = tile_frame_offset(fabric, y, x)?;
        for group in io_swpos_table(side) {
            let mut all_set = true;
            for (minor, bit) in &group.gates {
                if !plane.get_bit(minor_addr(tile_offset, *minor, *bit as i32))? {
                    all_set = false;
                    break;
                }
            }
            if !all_set {
                continue;
            }
            for (from, to) in &group.pairs {
                match fabric.switch_lookup(y, x, from, to) {
                    Some(_) => {
                        let table = fabric.sw_bitpos(y, x);
                        if let Some(idx) = table.iter().position(|s| s.from_wire == *from && s.to_wire == *to) {
                            scratch.push(y, x, idx)?;
                        }
                    }
                    None => tracing::debug!(y, x, from, to, "iologic pair has no switch entry"),
                }
            }
            for (minor, bit) in &group.gates {
                plane.clear_bit(minor_addr(tile_offset, *minor, *bit as i32))?;
            }
        }
    }
    Ok(())
}

/// Encodes the iologic fixed-block switch table, the dual of
/// [`extract_iologic_switches`].
pub fn write_iologic_sw<F: FabricQuery>(
    plane: &mut BitPlane,
    fabric: &F,
    y: i32,
    x: i32,
    side: IoSide,
    switches: &[SwitchRecord],
) -> Result<()> {
    let (tile_offset, _) = tile_frame_offset(fabric, y, x)?;
    for group in io_swpos_table(side) {
        let all_present = group
            .pairs
            .iter()
            .all(|(from, to)| switches.iter().any(|s| s.from_wire == *from && s.to_wire == *to));
        if !all_present {
            continue;
        }
        for (minor, bit) in &group.gates {
            plane.set_bit(minor_addr(tile_offset, *minor, *bit as i32))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::stub::StubFabric;
    use crate::fabric::SwBitpos;

    fn fabric_with_routing_switch() -> StubFabric {
        let mut f = StubFabric::new();
        f.routing_tiles.push((5, 0));
        f.sw_bitpos.insert(
            (5, 0),
            vec![SwBitpos {
                minor: 20,
                two_bits_o: 4,
                two_bits_val: 0b01,
                one_bit_o: 8,
                bidir: false,
                from_wire: "A".to_string(),
                to_wire: "B".to_string(),
            }],
        );
        f.switch_status.insert(
            (5, 0, "A".to_string(), "B".to_string()),
            SwitchStatus::Unused,
        );
        f
    }

    #[test]
    fn routing_switch_roundtrips() {
        let fabric = fabric_with_routing_switch();
        let mut plane = BitPlane::zeroed(64);
        let switches = vec![SwitchRecord {
            from_wire: "A".to_string(),
            to_wire: "B".to_string(),
        }];
        write_routing_sw(&mut plane, &fabric, 5, 0, &switches).unwrap();

        let mut scratch = SwitchScratch::new();
        extract_routing_switches(&mut plane, &fabric, &mut scratch).unwrap();
        assert_eq!(scratch.entries().len(), 1);
        assert_eq!(scratch.entries()[0], ScratchEntry { y: 5, x: 0, switch_index: 0 });
    }

    #[test]
    fn debug_bitpos_table_renders_one_row_per_switch() {
        let fabric = fabric_with_routing_switch();
        let rendered = debug_bitpos_table(fabric.sw_bitpos(5, 0));
        assert!(rendered.contains("mi20"));
        assert!(rendered.contains("A -> B"));
    }

    #[test]
    fn scratch_rejects_beyond_capacity() {
        let mut scratch = SwitchScratch::new();
        for i in 0..MAX_YX_SWITCHES {
            scratch.push(0, 0, i).unwrap();
        }
        assert!(matches!(scratch.push(0, 0, 0), Err(CodecError::Capacity { .. })));
    }
}
