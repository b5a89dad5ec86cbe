//! Error types for the bitstream codec.
//!
//! This module defines all error types used throughout the codec, mapped
//! directly onto the taxonomy the driver enforces: malformed input, leftover
//! bits the decoders don't know how to interpret, lookup table misses,
//! scratch-space exhaustion, and broken codec invariants.

use thiserror::Error;

/// Primary error type for bitstream codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bitstream image is too small to hold the device's frame layout.
    #[error("bitstream too small: expected at least {expected} bytes, got {actual}")]
    ImageTooSmall { expected: usize, actual: usize },

    /// A required default configuration bit was not set in the image.
    #[error("missing default bit at row {row} major {major} minor {minor} bit {bit}")]
    MissingDefaultBit {
        row: u8,
        major: u8,
        minor: u16,
        bit: u16,
    },

    /// Bits remained set in a tile's minors after every known attribute,
    /// mux selector, and switch was extracted from them.
    #[error("residual bits at y={y} x={x} minor={minor}: mask=0x{mask:016X}")]
    ResidualBits {
        y: i32,
        x: i32,
        minor: u16,
        mask: u64,
    },

    /// A bit pattern did not match any entry in a lookup table (LUT mux
    /// code, IOB standard, out-mux selector, ...).
    #[error("unknown table entry for {table} at y={y} x={x}: 0x{value:X}")]
    UnknownTableEntry {
        table: &'static str,
        y: i32,
        x: i32,
        value: u64,
    },

    /// The per-tile switch scratch buffer overflowed.
    #[error("switch capacity exceeded at y={y} x={x}: limit is {limit}")]
    Capacity { y: i32, x: i32, limit: usize },

    /// A wire pair requested during encoding has no corresponding bit
    /// position in the switch table.
    #[error("no bit position for switch {from} -> {to} at y={y} x={x}")]
    UnknownSwitch {
        y: i32,
        x: i32,
        from: String,
        to: String,
    },

    /// Model state violated a codec invariant (e.g. nets already present
    /// before extraction, or a tile requested twice).
    #[error("invariant violation: {message}")]
    Invariant { message: String },

    /// Floorplan text parsing error (CLI front-ends only).
    #[error("floorplan parse error at line {line}: {message}")]
    FloorplanParseError { line: usize, message: String },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error, wrapping it as an [`CodecError::Invariant`].
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| CodecError::Invariant {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residual_bits_display() {
        let err = CodecError::ResidualBits {
            y: 10,
            x: 20,
            minor: 20,
            mask: 0xFF,
        };
        let msg = err.to_string();
        assert!(msg.contains("y=10"));
        assert!(msg.contains("FF"));
    }

    #[test]
    fn test_missing_default_bit() {
        let err = CodecError::MissingDefaultBit {
            row: 0,
            major: 0,
            minor: 3,
            bit: 66,
        };
        assert!(err.to_string().contains("66"));
    }
}
