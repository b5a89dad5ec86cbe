//! A minimal line-based floorplan text format for the `fp2bit`/`bit2fp`
//! binaries.
//!
//! Neither a real floorplan format nor a fabric database ships with this
//! crate (both are external collaborators per the core's scope); this is a
//! small textual stand-in sufficient to drive IOB and routing-switch
//! scenarios through the two binaries without a real front-end. Logic-tile
//! configuration is not expressible in this format — author it directly
//! against [`crate::model::Floorplan`] (or via `--format json`) instead.
//!
//! Grammar, one directive per line, blank lines and `#`-comments ignored:
//!
//! ```text
//! iob <site> input <standard> <i|ib>
//! iob <site> output <standard> <drive> <slow|fast|quiet> <suspend>
//! switch <y> <x> <from_wire> -> <to_wire>
//! ```

use crate::error::{CodecError, Result};
use crate::model::{
    Floorplan, IMux, IobConfig, IobMode, InputStandard, OutputStandard, Slew, Suspend,
    SwitchRecord,
};

fn parse_input_standard(s: &str, line: usize) -> Result<InputStandard> {
    Ok(match s {
        "lvcmos33" => InputStandard::Lvcmos33,
        "lvcmos25" => InputStandard::Lvcmos25,
        "lvcmos18" => InputStandard::Lvcmos18,
        "lvcmos15" => InputStandard::Lvcmos15,
        "lvttl" => InputStandard::Lvttl,
        other => {
            return Err(CodecError::FloorplanParseError {
                line,
                message: format!("unknown input standard '{other}'"),
            })
        }
    })
}

fn parse_output_standard(s: &str, line: usize) -> Result<OutputStandard> {
    Ok(match s {
        "lvcmos33" => OutputStandard::Lvcmos33,
        "lvcmos25" => OutputStandard::Lvcmos25,
        "lvcmos18" => OutputStandard::Lvcmos18,
        "lvcmos15" => OutputStandard::Lvcmos15,
        "lvttl" => OutputStandard::Lvttl,
        other => {
            return Err(CodecError::FloorplanParseError {
                line,
                message: format!("unknown output standard '{other}'"),
            })
        }
    })
}

fn parse_slew(s: &str, line: usize) -> Result<Slew> {
    Ok(match s {
        "slow" => Slew::Slow,
        "fast" => Slew::Fast,
        "quiet" => Slew::QuietIo,
        other => {
            return Err(CodecError::FloorplanParseError {
                line,
                message: format!("unknown slew '{other}'"),
            })
        }
    })
}

fn parse_suspend(s: &str, line: usize) -> Result<Suspend> {
    Ok(match s {
        "3state" => Suspend::ThreeState,
        "3state_outcurrent" => Suspend::ThreeStateOutcurrent,
        "3state_keeper" => Suspend::ThreeStateKeeper,
        "3state_pullup" => Suspend::ThreeStatePullup,
        "3state_pulldown" => Suspend::ThreeStatePulldown,
        "drive_last" => Suspend::DriveLastValue,
        other => {
            return Err(CodecError::FloorplanParseError {
                line,
                message: format!("unknown suspend mode '{other}'"),
            })
        }
    })
}

fn parse_int(s: &str, line: usize) -> Result<i32> {
    s.parse().map_err(|_| CodecError::FloorplanParseError {
        line,
        message: format!("expected integer, got '{s}'"),
    })
}

/// Parses `text` into a [`Floorplan`], one directive per line.
pub fn parse_floorplan(text: &str) -> Result<Floorplan> {
    let mut floorplan = Floorplan::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields.first().copied() {
            Some("iob") => {
                let [_, site, mode, rest @ ..] = fields.as_slice() else {
                    return Err(CodecError::FloorplanParseError {
                        line: line_no,
                        message: "malformed iob directive".to_string(),
                    });
                };
                let mode = match *mode {
                    "input" => {
                        let [standard, imux] = rest else {
                            return Err(CodecError::FloorplanParseError {
                                line: line_no,
                                message: "iob input needs <standard> <i|ib>".to_string(),
                            });
                        };
                        let standard = parse_input_standard(standard, line_no)?;
                        let imux = match *imux {
                            "i" => IMux::I,
                            "ib" => IMux::IB,
                            other => {
                                return Err(CodecError::FloorplanParseError {
                                    line: line_no,
                                    message: format!("unknown imux '{other}'"),
                                })
                            }
                        };
                        IobMode::Input { standard, imux }
                    }
                    "output" => {
                        let [standard, drive, slew, suspend] = rest else {
                            return Err(CodecError::FloorplanParseError {
                                line: line_no,
                                message: "iob output needs <standard> <drive> <slew> <suspend>".to_string(),
                            });
                        };
                        let standard = parse_output_standard(standard, line_no)?;
                        let drive_strength: u8 =
                            drive.parse().map_err(|_| CodecError::FloorplanParseError {
                                line: line_no,
                                message: format!("bad drive strength '{drive}'"),
                            })?;
                        let slew = parse_slew(slew, line_no)?;
                        let suspend = parse_suspend(suspend, line_no)?;
                        IobMode::Output {
                            standard,
                            drive_strength,
                            slew,
                            suspend,
                        }
                    }
                    other => {
                        return Err(CodecError::FloorplanParseError {
                            line: line_no,
                            message: format!("unknown iob mode '{other}'"),
                        })
                    }
                };
                floorplan.iobs.insert(
                    (*site).to_string(),
                    IobConfig {
                        site: (*site).to_string(),
                        mode,
                    },
                );
            }
            Some("switch") => {
                let [_, y, x, from, arrow, to] = fields.as_slice() else {
                    return Err(CodecError::FloorplanParseError {
                        line: line_no,
                        message: "malformed switch directive, expected: switch <y> <x> <from> -> <to>".to_string(),
                    });
                };
                if *arrow != "->" {
                    return Err(CodecError::FloorplanParseError {
                        line: line_no,
                        message: "expected '->' between from and to wires".to_string(),
                    });
                }
                let y = parse_int(y, line_no)?;
                let x = parse_int(x, line_no)?;
                floorplan.switches.entry((y, x)).or_default().push(SwitchRecord {
                    from_wire: (*from).to_string(),
                    to_wire: (*to).to_string(),
                });
            }
            Some(other) => {
                return Err(CodecError::FloorplanParseError {
                    line: line_no,
                    message: format!("unknown directive '{other}'"),
                })
            }
            None => unreachable!("blank lines are filtered above"),
        }
    }

    Ok(floorplan)
}

/// Renders `floorplan`'s IOBs and switches back to the same textual form
/// [`parse_floorplan`] accepts. Logic-tile configuration and nets are not
/// representable and are silently omitted.
pub fn format_floorplan(floorplan: &Floorplan) -> String {
    let mut out = String::new();
    let mut sites: Vec<&String> = floorplan.iobs.keys().collect();
    sites.sort();
    for site in sites {
        let cfg = &floorplan.iobs[site];
        match &cfg.mode {
            IobMode::Input { standard, imux } => {
                let std_name = input_standard_name(*standard);
                let imux_name = match imux {
                    IMux::I => "i",
                    IMux::IB => "ib",
                };
                out.push_str(&format!("iob {site} input {std_name} {imux_name}\n"));
            }
            IobMode::Output {
                standard,
                drive_strength,
                slew,
                suspend,
            } => {
                out.push_str(&format!(
                    "iob {site} output {} {drive_strength} {} {}\n",
                    output_standard_name(*standard),
                    slew_name(*slew),
                    suspend_name(*suspend),
                ));
            }
        }
    }
    let mut keys: Vec<&(i32, i32)> = floorplan.switches.keys().collect();
    keys.sort();
    for key in keys {
        for sw in &floorplan.switches[key] {
            out.push_str(&format!(
                "switch {} {} {} -> {}\n",
                key.0, key.1, sw.from_wire, sw.to_wire
            ));
        }
    }
    out
}

fn input_standard_name(s: InputStandard) -> &'static str {
    match s {
        InputStandard::Lvcmos33 => "lvcmos33",
        InputStandard::Lvcmos25 => "lvcmos25",
        InputStandard::Lvcmos18 => "lvcmos18",
        InputStandard::Lvcmos15 => "lvcmos15",
        InputStandard::Lvttl => "lvttl",
    }
}

fn output_standard_name(s: OutputStandard) -> &'static str {
    match s {
        OutputStandard::Lvcmos33 => "lvcmos33",
        OutputStandard::Lvcmos25 => "lvcmos25",
        OutputStandard::Lvcmos18 => "lvcmos18",
        OutputStandard::Lvcmos15 => "lvcmos15",
        OutputStandard::Lvttl => "lvttl",
    }
}

fn slew_name(s: Slew) -> &'static str {
    match s {
        Slew::Slow => "slow",
        Slew::Fast => "fast",
        Slew::QuietIo => "quiet",
    }
}

fn suspend_name(s: Suspend) -> &'static str {
    match s {
        Suspend::ThreeState => "3state",
        Suspend::ThreeStateOutcurrent => "3state_outcurrent",
        Suspend::ThreeStateKeeper => "3state_keeper",
        Suspend::ThreeStatePullup => "3state_pullup",
        Suspend::ThreeStatePulldown => "3state_pulldown",
        Suspend::DriveLastValue => "drive_last",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_and_output_iob_lines() {
        let text = "\
            # a comment\n\
            iob P1 input lvcmos33 i\n\
            iob P2 output lvttl 8 fast 3state\n";
        let fp = parse_floorplan(text).unwrap();
        assert_eq!(fp.iobs.len(), 2);
        assert!(matches!(
            fp.iobs["P1"].mode,
            IobMode::Input { standard: InputStandard::Lvcmos33, imux: IMux::I }
        ));
    }

    #[test]
    fn parses_switch_line() {
        let fp = parse_floorplan("switch 5 0 A -> B\n").unwrap();
        assert_eq!(fp.switches[&(5, 0)][0].from_wire, "A");
        assert_eq!(fp.switches[&(5, 0)][0].to_wire, "B");
    }

    #[test]
    fn roundtrips_through_format_and_parse() {
        let text = "iob P1 input lvcmos33 ib\nswitch 1 2 X -> Y\n";
        let fp = parse_floorplan(text).unwrap();
        let rendered = format_floorplan(&fp);
        let fp2 = parse_floorplan(&rendered).unwrap();
        assert_eq!(fp, fp2);
    }

    #[test]
    fn rejects_unknown_directive() {
        let err = parse_floorplan("bogus line here\n").unwrap_err();
        assert!(matches!(err, CodecError::FloorplanParseError { line: 1, .. }));
    }
}
