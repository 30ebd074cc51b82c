//! A small built-in demo core.
//!
//! Two formats in the style of a wide/narrow encoding pair: `d24` is a
//! 24-bit format with one wide slot, `d16` a 16-bit format with one
//! narrow slot. A handful of opcodes cover the interesting shapes:
//! three-register arithmetic, a register+immediate form, a PC-relative
//! branch, a narrow move, and a `nop` that is issueable in both slots.
//!
//! The binary probes this core when no other description is wired in,
//! and the integration-style tests use it as a known-good fixture.

use super::{
    Direction, Format, Iclass, IsaDescription, Opcode, Operand, OperandFlags, RegFile, Slot,
};
use crate::insnbuf::InsnBuf;

// Wide slot: local bits 0..20 land at word bits 4..24, opcode identity
// in local 16..20. Narrow slot: local bits 0..12 land at word bits
// 4..16, opcode identity in local 8..12.
const WIDE_SHIFT: usize = 4;
const NARROW_SHIFT: usize = 4;

fn local_field(base: usize, width: usize) -> impl Fn(&mut InsnBuf, u64) + 'static {
    move |buf, v| {
        for b in 0..width {
            if v & (1 << b) != 0 {
                buf.set(base + b);
            }
        }
    }
}

/// Build the demo core description.
pub fn demo_core() -> IsaDescription {
    let formats = vec![
        Format::new("d24", 24, vec![0], |buf| {
            buf.set(0);
            buf.set(2);
        }),
        Format::new("d16", 16, vec![1], |buf| {
            buf.set(0);
            buf.set(1);
        }),
    ];

    let slots = vec![
        Slot::new("d24", 0, |dst, src| dst.or_shifted(src, WIDE_SHIFT))
            .with_field("rt", local_field(0, 4))
            .with_field("rs", local_field(4, 4))
            .with_field("rr", local_field(8, 4))
            .with_field("imm8", local_field(8, 8)),
        Slot::new("d16", 1, |dst, src| dst.or_shifted(src, NARROW_SHIFT))
            .with_field("rt", local_field(0, 4))
            .with_field("rs", local_field(4, 4)),
    ];

    let opcodes = vec![
        Opcode::new("add", 0).with_encoder(0, |buf| buf.set(16)),
        Opcode::new("addi", 1).with_encoder(0, |buf| buf.set(17)),
        Opcode::new("beqz", 3).with_encoder(0, |buf| buf.set(18)),
        Opcode::new("mov.n", 4).with_encoder(1, |buf| buf.set(10)),
        Opcode::new("nop", 2)
            .with_encoder(0, |buf| {
                buf.set(16);
                buf.set(17);
            })
            .with_encoder(1, |buf| {
                buf.set(8);
                buf.set(9);
            }),
    ];

    let iclasses = vec![
        // 0: rrr — arr <- ars, art
        Iclass::new(&[
            (0, Direction::Out),
            (1, Direction::In),
            (2, Direction::In),
        ]),
        // 1: rri8 — art <- ars, imm8
        Iclass::new(&[
            (2, Direction::Out),
            (1, Direction::In),
            (3, Direction::In),
        ]),
        // 2: no operands
        Iclass::new(&[]),
        // 3: rb — branch on ars to label8
        Iclass::new(&[(1, Direction::In), (4, Direction::In)]),
        // 4: rr16 — art <- ars
        Iclass::new(&[(2, Direction::Out), (1, Direction::In)]),
    ];

    let operands = vec![
        Operand {
            name: "arr".into(),
            field: "rr".into(),
            regfile: Some(0),
            num_regs: 1,
            flags: OperandFlags::REGISTER,
        },
        Operand {
            name: "ars".into(),
            field: "rs".into(),
            regfile: Some(0),
            num_regs: 1,
            flags: OperandFlags::REGISTER,
        },
        Operand {
            name: "art".into(),
            field: "rt".into(),
            regfile: Some(0),
            num_regs: 1,
            flags: OperandFlags::REGISTER,
        },
        Operand {
            name: "imm8".into(),
            field: "imm8".into(),
            regfile: None,
            num_regs: 0,
            flags: OperandFlags::empty(),
        },
        Operand {
            name: "label8".into(),
            field: "imm8".into(),
            regfile: None,
            num_regs: 0,
            flags: OperandFlags::PC_RELATIVE,
        },
    ];

    let regfiles = vec![RegFile { name: "a".into() }];

    IsaDescription {
        formats,
        slots,
        opcodes,
        iclasses,
        operands,
        regfiles,
    }
}
