//! Per-(opcode, slot) layout discovery.
//!
//! One call resolves everything the report needs for a single variant:
//! the format's fixed bits, the opcode's identifying bits, and every
//! operand's field bits.

use crate::description::{EncodeFn, Iclass, IsaDescription, Opcode, Slot};
use crate::discovery::field::{discover_field_bits, FieldProbeError};
use crate::error::{ProbeError, Result};
use crate::insnbuf::InsnBuf;
use crate::layout::{ArgLayout, Variant};

/// Discover one variant: `opcode` as issued in `slot`.
///
/// `encoder` is the opcode's identity encoder for this slot and
/// `iclass` its instruction class; both come from the walker's
/// iteration over the opcode table.
pub fn discover_variant(
    desc: &IsaDescription,
    opcode: &Opcode,
    encoder: &EncodeFn,
    slot: &Slot,
    iclass: &Iclass,
) -> Result<Variant> {
    let format = desc
        .format(&slot.format)
        .ok_or_else(|| ProbeError::FormatNotFound {
            format: slot.format.clone(),
            slot: slot.index,
        })?;

    tracing::debug!(opcode = %opcode.name, slot = slot.index, format = %format.name,
        "discovering variant");

    // Bits the format sets unconditionally, independent of any value.
    let mut buf = InsnBuf::new();
    (format.encode)(&mut buf);
    let format_bits = buf.set_bits();

    // Opcode identity bits. The description contract keeps this a
    // two-step operation: the per-slot encoder writes into slot-local
    // space, then the slot placement moves that into the full word.
    // Collapsing the two steps is not equivalent for every overlay, so
    // the split is preserved as-is.
    let mut local = InsnBuf::new();
    encoder(&mut local);
    let mut placed = InsnBuf::new();
    (slot.set_slot)(&mut placed, &local);
    let opcode_bits = placed.set_bits();

    let mut args = Vec::with_capacity(iclass.operands.len());
    for entry in &iclass.operands {
        let operand =
            desc.operands
                .get(entry.operand)
                .ok_or_else(|| ProbeError::UnknownOperand {
                    iclass: opcode.iclass,
                    operand: entry.operand,
                })?;

        let setter = slot
            .field_setters
            .get(&operand.field)
            .ok_or_else(|| ProbeError::UnknownField {
                opcode: opcode.name.clone(),
                slot: slot.index,
                field: operand.field.clone(),
            })?;

        let field_bits =
            discover_field_bits(setter, &slot.set_slot).map_err(|e| match e {
                FieldProbeError::NotBitwise {
                    probe_bit,
                    positions,
                } => ProbeError::NotBitwise {
                    opcode: opcode.name.clone(),
                    slot: slot.index,
                    operand: operand.name.clone(),
                    probe_bit,
                    positions,
                },
                FieldProbeError::Unbounded => ProbeError::FieldUnbounded {
                    opcode: opcode.name.clone(),
                    slot: slot.index,
                    operand: operand.name.clone(),
                },
            })?;

        let reg = operand
            .regfile
            .and_then(|id| desc.regfiles.get(id))
            .map(|rf| rf.name.clone())
            .unwrap_or_default();

        args.push(ArgLayout {
            arg: operand.name.clone(),
            dir: entry.dir.as_char(),
            reg,
            num_regs: operand.num_regs,
            flags: operand.flags.as_chars(),
            field_bits,
        });
    }

    Ok(Variant {
        format: format.name.clone(),
        slot: slot.index,
        length: format.length,
        format_bits,
        opcode_bits,
        args,
    })
}
