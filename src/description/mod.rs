//! The ISA description consumed by the discovery engine.
//!
//! A description mirrors the module tables shipped with binutils ISA
//! overlays: flat tables of formats, slots, opcodes, instruction
//! classes, operands and register files, where every encode/placement
//! operation is an opaque callback. The engine never looks inside a
//! callback; it only relies on the purity contract that each one moves
//! individual bits without mixing or computing them.
//!
//! Descriptions are read-only for the whole of a discovery run and are
//! passed by shared reference, so nothing here is mutated after
//! construction.

pub mod sample;

use crate::insnbuf::InsnBuf;
use std::collections::BTreeMap;
use std::fmt;

/// Encodes a format's fixed bits, or an opcode's identity, into a buffer.
pub type EncodeFn = Box<dyn Fn(&mut InsnBuf)>;

/// Encodes an abstract field value into a slot-local buffer.
pub type SetFieldFn = Box<dyn Fn(&mut InsnBuf, u64)>;

/// Places a slot-local encoding into its position in the full word.
pub type SetSlotFn = Box<dyn Fn(&mut InsnBuf, &InsnBuf)>;

/// Operand I/O direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Read by the instruction.
    In,
    /// Written by the instruction.
    Out,
    /// Both read and written.
    InOut,
}

impl Direction {
    /// Single-character form used in the report (`i`, `o`, `m`).
    pub fn as_char(self) -> char {
        match self {
            Direction::In => 'i',
            Direction::Out => 'o',
            Direction::InOut => 'm',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

bitflags::bitflags! {
    /// Descriptive operand flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OperandFlags: u32 {
        /// Operand names a register.
        const REGISTER = 1 << 0;
        /// Operand is a PC-relative value.
        const PC_RELATIVE = 1 << 1;
        /// Operand does not appear in assembly syntax.
        const INVISIBLE = 1 << 2;
        /// Operand semantics are unknown to the description.
        const UNKNOWN = 1 << 3;
    }
}

impl OperandFlags {
    /// Fixed-order four-character rendition: `r`, `p`, `i`, `u`, with a
    /// space for each absent flag.
    pub fn as_chars(self) -> String {
        let mut s = String::with_capacity(4);
        s.push(if self.contains(Self::REGISTER) { 'r' } else { ' ' });
        s.push(if self.contains(Self::PC_RELATIVE) { 'p' } else { ' ' });
        s.push(if self.contains(Self::INVISIBLE) { 'i' } else { ' ' });
        s.push(if self.contains(Self::UNKNOWN) { 'u' } else { ' ' });
        s
    }
}

/// An instruction-word format: the fixed structural bits and the slots
/// it contains.
pub struct Format {
    /// Format name, unique within the description.
    pub name: String,
    /// Instruction-word length of this format, in bits.
    pub length: u32,
    /// Global indices of the slots this format contains.
    pub slots: Vec<usize>,
    /// Sets the format-selector bits on a cleared buffer. These bits
    /// are value-independent.
    pub encode: EncodeFn,
}

impl Format {
    /// Build a format from a plain closure.
    pub fn new(
        name: impl Into<String>,
        length: u32,
        slots: Vec<usize>,
        encode: impl Fn(&mut InsnBuf) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            length,
            slots,
            encode: Box::new(encode),
        }
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("name", &self.name)
            .field("length", &self.length)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

/// One issue slot within a format.
pub struct Slot {
    /// Name of the owning format.
    pub format: String,
    /// This slot's index within the global slot table.
    pub index: usize,
    /// Moves a slot-local encoding into the full instruction word.
    pub set_slot: SetSlotFn,
    /// Field-value setters keyed by field identifier. Each encodes an
    /// abstract value into the slot's local bit space.
    pub field_setters: BTreeMap<String, SetFieldFn>,
}

impl Slot {
    /// Build a slot with no field setters; add them with
    /// [`with_field`](Slot::with_field).
    pub fn new(
        format: impl Into<String>,
        index: usize,
        set_slot: impl Fn(&mut InsnBuf, &InsnBuf) + 'static,
    ) -> Self {
        Self {
            format: format.into(),
            index,
            set_slot: Box::new(set_slot),
            field_setters: BTreeMap::new(),
        }
    }

    /// Register a field setter for `field`.
    pub fn with_field(
        mut self,
        field: impl Into<String>,
        setter: impl Fn(&mut InsnBuf, u64) + 'static,
    ) -> Self {
        self.field_setters.insert(field.into(), Box::new(setter));
        self
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("format", &self.format)
            .field("index", &self.index)
            .field(
                "fields",
                &self.field_setters.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// One opcode and its per-slot identity encoders.
pub struct Opcode {
    /// Opcode mnemonic.
    pub name: String,
    /// Index into the instruction-class table.
    pub iclass: usize,
    /// Identity encoders keyed by slot index. An absent key means the
    /// opcode cannot be issued in that slot. Each encoder writes the
    /// opcode's identifying bits, with all operand values zero, into
    /// the slot's local bit space.
    pub encoders: BTreeMap<usize, EncodeFn>,
}

impl Opcode {
    /// Build an opcode with no encoders; add them with
    /// [`with_encoder`](Opcode::with_encoder).
    pub fn new(name: impl Into<String>, iclass: usize) -> Self {
        Self {
            name: name.into(),
            iclass,
            encoders: BTreeMap::new(),
        }
    }

    /// Register the identity encoder for `slot`.
    pub fn with_encoder(mut self, slot: usize, encode: impl Fn(&mut InsnBuf) + 'static) -> Self {
        self.encoders.insert(slot, Box::new(encode));
        self
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opcode")
            .field("name", &self.name)
            .field("iclass", &self.iclass)
            .field("slots", &self.encoders.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// One operand position of an instruction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IclassOperand {
    /// Index into the operand table.
    pub operand: usize,
    /// I/O direction of this position.
    pub dir: Direction,
}

/// An instruction class: the ordered operand shape shared by all
/// opcodes of the class.
#[derive(Debug, Clone, Default)]
pub struct Iclass {
    /// Operand descriptors in declaration order.
    pub operands: Vec<IclassOperand>,
}

impl Iclass {
    /// Build a class from `(operand index, direction)` pairs.
    pub fn new(operands: &[(usize, Direction)]) -> Self {
        Self {
            operands: operands
                .iter()
                .map(|&(operand, dir)| IclassOperand { operand, dir })
                .collect(),
        }
    }
}

/// A named operand and its field binding.
#[derive(Debug, Clone)]
pub struct Operand {
    /// Operand name as it appears in the report.
    pub name: String,
    /// Field identifier used to select the setter on a slot.
    pub field: String,
    /// Index into the register-file table, if the operand names one.
    pub regfile: Option<usize>,
    /// Number of consecutive registers the operand covers.
    pub num_regs: u32,
    /// Descriptive flags.
    pub flags: OperandFlags,
}

/// A register file, referenced by operands for display only.
#[derive(Debug, Clone)]
pub struct RegFile {
    /// Register file name.
    pub name: String,
}

/// The complete, read-only ISA description for one discovery run.
#[derive(Debug, Default)]
pub struct IsaDescription {
    /// Formats, in declaration order.
    pub formats: Vec<Format>,
    /// Slots, indexed by global slot index.
    pub slots: Vec<Slot>,
    /// Opcodes, in declaration order; report ordering follows this.
    pub opcodes: Vec<Opcode>,
    /// Instruction classes, indexed by class id.
    pub iclasses: Vec<Iclass>,
    /// Operands, indexed by operand id.
    pub operands: Vec<Operand>,
    /// Register files, indexed by register-file id.
    pub regfiles: Vec<RegFile>,
}

impl IsaDescription {
    /// Look up a format by name.
    pub fn format(&self, name: &str) -> Option<&Format> {
        self.formats.iter().find(|f| f.name == name)
    }
}
