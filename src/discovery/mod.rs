//! The discovery walk over an ISA description.
//!
//! Drives [`variant`] (which in turn drives [`field`]) across every
//! (opcode, slot) pair the description defines, producing one
//! [`Catalog`](crate::layout::Catalog). The walk is purely
//! computational and bounded: at most `MAX_INSN_BITS` probes per field,
//! fresh scratch buffers per variant, no state carried between
//! iterations. Output ordering is deterministic — opcodes in
//! declaration order, variants in increasing slot order, operands in
//! class order.

pub mod field;
pub mod variant;

use crate::description::IsaDescription;
use crate::error::{ProbeError, Result};
use crate::layout::{Catalog, OpcodeLayout};

/// Discover the full bit-layout catalog for `desc`.
///
/// Visits every opcode in declaration order and, for each, every slot
/// the opcode defines an encoder for, in increasing slot-index order.
/// Slots an opcode does not occupy are skipped, not reported.
pub fn discover(desc: &IsaDescription) -> Result<Catalog> {
    let mut catalog = Catalog::default();

    for opcode in &desc.opcodes {
        let iclass =
            desc.iclasses
                .get(opcode.iclass)
                .ok_or_else(|| ProbeError::UnknownIclass {
                    opcode: opcode.name.clone(),
                    iclass: opcode.iclass,
                })?;

        tracing::debug!(opcode = %opcode.name, slots = opcode.encoders.len(),
            "walking opcode");

        let mut variants = Vec::with_capacity(opcode.encoders.len());
        // BTreeMap iteration gives increasing slot order.
        for (&slot_index, encoder) in &opcode.encoders {
            let slot =
                desc.slots
                    .get(slot_index)
                    .ok_or_else(|| ProbeError::UnknownSlot {
                        opcode: opcode.name.clone(),
                        slot: slot_index,
                    })?;
            variants.push(variant::discover_variant(
                desc, opcode, encoder, slot, iclass,
            )?);
        }

        catalog.opcodes.push(OpcodeLayout {
            opcode: opcode.name.clone(),
            variants,
        });
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::sample;
    use crate::insnbuf::MAX_INSN_BITS;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_opcodes_in_declaration_order() {
        let desc = sample::demo_core();
        let catalog = discover(&desc).unwrap();
        let names: Vec<_> = catalog.opcodes.iter().map(|o| o.opcode.as_str()).collect();
        let declared: Vec<_> = desc.opcodes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, declared);
    }

    #[test]
    fn test_variants_in_slot_order() {
        let desc = sample::demo_core();
        let catalog = discover(&desc).unwrap();
        for op in &catalog.opcodes {
            let slots: Vec<_> = op.variants.iter().map(|v| v.slot).collect();
            let mut sorted = slots.clone();
            sorted.sort_unstable();
            assert_eq!(slots, sorted, "variants of {} out of slot order", op.opcode);
        }
    }

    #[test]
    fn test_sparse_slot_occupancy() {
        use crate::description::{Format, Iclass, IsaDescription, Opcode, Slot};

        // Three slots, encoder defined for slots 0 and 2 only.
        let desc = IsaDescription {
            formats: vec![Format::new("f", 24, vec![0, 1, 2], |buf| buf.set(0))],
            slots: (0..3)
                .map(|i| Slot::new("f", i, move |dst, src| dst.or_shifted(src, 8 * i)))
                .collect(),
            opcodes: vec![Opcode::new("nop", 0)
                .with_encoder(0, |buf| buf.set(1))
                .with_encoder(2, |buf| buf.set(1))],
            iclasses: vec![Iclass::new(&[])],
            operands: vec![],
            regfiles: vec![],
        };

        let catalog = discover(&desc).unwrap();
        assert_eq!(catalog.opcodes.len(), 1);
        let slots: Vec<_> = catalog.opcodes[0].variants.iter().map(|v| v.slot).collect();
        assert_eq!(slots, vec![0, 2]);
    }

    #[test]
    fn test_bit_classes_disjoint_and_in_range() {
        let desc = sample::demo_core();
        let catalog = discover(&desc).unwrap();
        for op in &catalog.opcodes {
            for v in &op.variants {
                let mut seen = std::collections::BTreeSet::new();
                let mut classes: Vec<&[u8]> = vec![&v.format_bits, &v.opcode_bits];
                for arg in &v.args {
                    classes.push(&arg.field_bits);
                }
                for bits in classes {
                    for &b in bits {
                        assert!((b as usize) < MAX_INSN_BITS);
                        assert!(
                            seen.insert(b),
                            "bit {b} claimed twice in {} slot {}",
                            op.opcode,
                            v.slot
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_discovery_is_idempotent() {
        let desc = sample::demo_core();
        let a = discover(&desc).unwrap();
        let b = discover(&desc).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_unknown_iclass_is_fatal() {
        use crate::description::{IsaDescription, Opcode};
        let desc = IsaDescription {
            opcodes: vec![Opcode::new("bad", 9)],
            ..Default::default()
        };
        let err = discover(&desc).unwrap_err();
        assert!(matches!(err, ProbeError::UnknownIclass { iclass: 9, .. }));
    }
}
