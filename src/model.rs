//! The floorplan data model: instantiated devices, I/O buffers, and
//! activated routing switches, independent of bitstream encoding.
//!
//! Every enum here is a closed tagged variant with an exhaustive `match` on
//! both the encode and decode side, per the crate's "enum-dense state"
//! design note: a mux selector or I/O standard either encodes to a known bit
//! pattern or the operation fails with [`CodecError::UnknownTableEntry`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the four truth-table positions within a logic device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LutSlot {
    A,
    B,
    C,
    D,
}

impl LutSlot {
    pub const ALL: [LutSlot; 4] = [LutSlot::A, LutSlot::B, LutSlot::C, LutSlot::D];
}

/// Which logical device within a logic tile a piece of configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// The M-slice (M columns) or L-slice (L columns) device.
    Ml,
    /// The X-slice device, present in every logic tile.
    X,
}

/// Output-mux selector for one LUT slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutMux {
    O6,
    O5,
    Xor,
    Cy,
    F7,
    F8,
    FiveQ,
}

/// FF-mux selector for one LUT slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FfMux {
    X,
    O5,
    F7,
    F8,
    Xor,
    Cy,
}

/// Carry-in-0 source for one LUT slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cy0Source {
    O5,
    X,
    One,
    Zero,
}

/// FF/latch initial output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FfInit {
    SrInit0,
    SrInit1,
}

/// Synchronous vs. asynchronous set/reset behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAttr {
    Sync,
    Async,
}

/// Source feeding the device's pre-carry-init input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecyinitSource {
    Zero,
    One,
    Ax,
}

/// Configuration for a single A/B/C/D sub-position of a logic device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LutConfig {
    /// Boolean expression for the 6-input LUT, e.g. `"A1*A2"`. `None` if unused.
    pub lut6: Option<String>,
    /// Boolean expression for the companion 5-input LUT, when `lut5_used`.
    pub lut5: Option<String>,
    pub out_mux: Option<OutMux>,
    pub ff_mux: Option<FfMux>,
    pub cy0: Option<Cy0Source>,
    pub ff_init: Option<FfInit>,
}

/// Per-device (ML or X) configuration for one logic tile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicDeviceConfig {
    pub slots: HashMap<LutSlot, LutConfig>,
    pub clk_inv: bool,
    pub sync_attr: SyncAttrOpt,
    pub ce_used: bool,
    pub sr_used: bool,
    pub all_latch: bool,
    pub precyinit: Option<PrecyinitSource>,
    pub cout_used: bool,
}

/// `SyncAttr` with an explicit "unset, default to async" state, matching the
/// decoder's defaulting rule in step 7 of logic extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyncAttrOpt {
    #[default]
    Unset,
    Set(SyncAttr),
}

/// Full logic-tile configuration: the ML device and the X device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileLogicConfig {
    pub ml: Option<LogicDeviceConfig>,
    pub x: Option<LogicDeviceConfig>,
}

/// Recognized input-pad electrical standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStandard {
    Lvcmos33,
    Lvcmos25,
    Lvcmos18,
    Lvcmos15,
    Lvttl,
}

/// Recognized output-pad electrical standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStandard {
    Lvcmos33,
    Lvcmos25,
    Lvcmos18,
    Lvcmos15,
    Lvttl,
}

/// I-mux selector: whether the input path reads `I` or its complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IMux {
    I,
    IB,
}

/// Output slew rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slew {
    Slow,
    Fast,
    QuietIo,
}

/// Suspend-mode selector (six recognized modes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suspend {
    ThreeState,
    ThreeStateOutcurrent,
    ThreeStateKeeper,
    ThreeStatePullup,
    ThreeStatePulldown,
    DriveLastValue,
}

/// Mode of an instantiated I/O pad: at most one of input or output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IobMode {
    Input {
        standard: InputStandard,
        imux: IMux,
    },
    Output {
        standard: OutputStandard,
        drive_strength: u8,
        slew: Slew,
        suspend: Suspend,
    },
}

/// Configuration for one instantiated I/O pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IobConfig {
    pub site: String,
    pub mode: IobMode,
}

/// A single activated programmable-interconnect switch, identified by the
/// wire pair it connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwitchRecord {
    pub from_wire: String,
    pub to_wire: String,
}

/// A net in the extracted model: one switch, attached during `extract_model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub y: i32,
    pub x: i32,
    pub switch_index: usize,
}

/// The complete floorplan: instantiated IOBs, logic-tile configurations, and
/// activated switches, keyed by tile coordinate.
///
/// `logic` and `switches` are keyed by `(y, x)` tuples internally, but
/// `serde_json` can only serialize string-keyed maps as JSON objects — a
/// tuple key has no `Display`-based coercion it recognizes. `tuple_key_map`
/// renders them as a JSON array of `[[y, x], value]` entries instead, which
/// round-trips through any `serde` format without constraining the in-memory
/// representation other call sites rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    pub iobs: HashMap<String, IobConfig>,
    #[serde(with = "tuple_key_map")]
    pub logic: HashMap<(i32, i32), TileLogicConfig>,
    #[serde(with = "tuple_key_map")]
    pub switches: HashMap<(i32, i32), Vec<SwitchRecord>>,
    pub nets: Vec<Net>,
}

impl Floorplan {
    pub fn new() -> Self {
        Self::default()
    }
}

/// (De)serializes a `HashMap<(i32, i32), V>` as a JSON-friendly list of
/// entries rather than an object, since tuple keys can't be JSON object keys.
mod tuple_key_map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S, V>(map: &HashMap<(i32, i32), V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let entries: Vec<(&(i32, i32), &V)> = map.iter().collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<HashMap<(i32, i32), V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let entries: Vec<((i32, i32), V)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_floorplan_is_empty() {
        let fp = Floorplan::new();
        assert!(fp.iobs.is_empty());
        assert!(fp.logic.is_empty());
        assert!(fp.switches.is_empty());
        assert!(fp.nets.is_empty());
    }

    #[test]
    fn lut_slot_all_has_four_entries() {
        assert_eq!(LutSlot::ALL.len(), 4);
    }

    #[test]
    fn populated_floorplan_roundtrips_through_json() {
        let mut fp = Floorplan::new();
        fp.logic.insert((3, 7), TileLogicConfig::default());
        fp.switches.insert(
            (3, 7),
            vec![SwitchRecord {
                from_wire: "A1".to_string(),
                to_wire: "B2".to_string(),
            }],
        );

        let json = serde_json::to_string_pretty(&fp).unwrap();
        let decoded: Floorplan = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, fp);
    }
}
