//! Discovered bit-layout records.
//!
//! These types are the output side of discovery: one [`Catalog`] per
//! run, one [`OpcodeLayout`] per opcode, one [`Variant`] per
//! (opcode, slot) pair. Field names follow the report schema, so the
//! catalog serializes directly into the external JSON document.

use crate::insnbuf::bits_to_mask;
use serde::Serialize;

/// Discovered layout facts for one operand of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgLayout {
    /// Operand name.
    pub arg: String,
    /// I/O direction character: `i`, `o` or `m`.
    pub dir: char,
    /// Register-file name, or empty string for non-register operands.
    pub reg: String,
    /// Number of consecutive registers covered.
    pub num_regs: u32,
    /// Four-character flag string (`r`/`p`/`i`/`u`, space when absent).
    pub flags: String,
    /// Full-word bit position of each abstract value bit, value bit 0
    /// first.
    pub field_bits: Vec<u8>,
}

impl ArgLayout {
    /// Field bits as a single word mask.
    pub fn field_mask(&self) -> u64 {
        bits_to_mask(&self.field_bits)
    }
}

/// Discovered layout facts for one (opcode, slot) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// Name of the format the slot belongs to.
    pub format: String,
    /// Slot index within the global slot table.
    pub slot: usize,
    /// Instruction-word length of the format, in bits.
    pub length: u32,
    /// Bit positions always set by the format, ascending.
    pub format_bits: Vec<u8>,
    /// Bit positions identifying the opcode within the slot, ascending.
    pub opcode_bits: Vec<u8>,
    /// Operand layouts in instruction-class order.
    pub args: Vec<ArgLayout>,
}

impl Variant {
    /// Format bits as a single word mask.
    pub fn format_mask(&self) -> u64 {
        bits_to_mask(&self.format_bits)
    }

    /// Opcode bits as a single word mask.
    pub fn opcode_mask(&self) -> u64 {
        bits_to_mask(&self.opcode_bits)
    }
}

/// All variants discovered for one opcode, in increasing slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpcodeLayout {
    /// Opcode mnemonic.
    pub opcode: String,
    /// One entry per slot the opcode occupies.
    pub variants: Vec<Variant>,
}

/// The full discovery result: every opcode in description order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Catalog {
    /// Per-opcode layouts, in description declaration order.
    pub opcodes: Vec<OpcodeLayout>,
}
