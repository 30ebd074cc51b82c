//! Error types for the bit-position discovery engine.
//!
//! Every error here means the run cannot continue: the description
//! tables are static, so a failed probe indicates a structural problem
//! in the supplied ISA description, never a transient condition.

use thiserror::Error;

/// Primary error type for discovery runs.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A single-bit probe surfaced more than one set bit, so the
    /// encoder is not a pure bit permutation.
    #[error(
        "encoder for operand `{operand}` of `{opcode}` (slot {slot}) is not bitwise: \
         probing value bit {probe_bit} set {} word bits {positions:?}",
        .positions.len()
    )]
    NotBitwise {
        opcode: String,
        slot: usize,
        operand: String,
        probe_bit: usize,
        positions: Vec<u8>,
    },

    /// A slot names a format that is absent from the format table.
    #[error("slot {slot} references unknown format `{format}`")]
    FormatNotFound { format: String, slot: usize },

    /// Probing reached the instruction-word capacity without the field
    /// terminating.
    #[error(
        "field of operand `{operand}` of `{opcode}` (slot {slot}) never terminated \
         within the instruction word"
    )]
    FieldUnbounded {
        opcode: String,
        slot: usize,
        operand: String,
    },

    /// An operand references a field the slot has no setter for.
    #[error("slot {slot} has no setter for field `{field}` (opcode `{opcode}`)")]
    UnknownField {
        opcode: String,
        slot: usize,
        field: String,
    },

    /// An opcode defines an encoder for a slot index outside the slot table.
    #[error("opcode `{opcode}` encodes into unknown slot {slot}")]
    UnknownSlot { opcode: String, slot: usize },

    /// An opcode references an instruction class absent from the table.
    #[error("opcode `{opcode}` references unknown instruction class {iclass}")]
    UnknownIclass { opcode: String, iclass: usize },

    /// An instruction class entry references an operand absent from the table.
    #[error("instruction class {iclass} references unknown operand {operand}")]
    UnknownOperand { iclass: usize, operand: usize },

    /// JSON serialization error while emitting the report.
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing the report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_bitwise_display() {
        let err = ProbeError::NotBitwise {
            opcode: "add".into(),
            slot: 0,
            operand: "arr".into(),
            probe_bit: 0,
            positions: vec![3, 4],
        };
        let msg = err.to_string();
        assert!(msg.contains("add"));
        assert!(msg.contains("arr"));
        assert!(msg.contains("not bitwise"));
    }

    #[test]
    fn test_format_not_found_display() {
        let err = ProbeError::FormatNotFound {
            format: "x24".into(),
            slot: 7,
        };
        assert!(err.to_string().contains("x24"));
        assert!(err.to_string().contains("7"));
    }
}
