//! Single-bit probing of one field encoder.
//!
//! This is the heart of the engine. A field setter and a slot placement
//! function are both assumed to be pure bit permutations, so setting
//! exactly one bit of the abstract value must surface as exactly one
//! bit of the full instruction word, or as no bit at all once past the
//! field's true width. Probing value bits 0, 1, 2, ... in order
//! therefore recovers the whole permutation without ever inspecting
//! the encoders.

use crate::description::{SetFieldFn, SetSlotFn};
use crate::insnbuf::{InsnBuf, MAX_INSN_BITS};

/// Failure of one field probe, before opcode/slot/operand identity is
/// attached by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProbeError {
    /// A probe set more than one word bit: the encoder mixes bits.
    NotBitwise {
        /// Which abstract value bit was being probed.
        probe_bit: usize,
        /// All word bits the probe set.
        positions: Vec<u8>,
    },
    /// Every probe up to `MAX_INSN_BITS` produced a set bit, so the
    /// field never terminated.
    Unbounded,
}

/// Discover the full-word bit position of each abstract value bit of
/// one field.
///
/// Returns the positions for value bits `0, 1, 2, ...` in order; the
/// length of the result is the field's width. A field the slot encodes
/// in zero bits yields an empty vector.
pub fn discover_field_bits(
    setter: &SetFieldFn,
    placer: &SetSlotFn,
) -> Result<Vec<u8>, FieldProbeError> {
    let mut positions = Vec::new();

    for n in 0..MAX_INSN_BITS {
        let mut local = InsnBuf::new();
        let mut placed = InsnBuf::new();

        setter(&mut local, 1u64 << n);
        placer(&mut placed, &local);

        let bits = placed.set_bits();
        match bits.len() {
            // Past the field's width: done.
            0 => return Ok(positions),
            1 => positions.push(bits[0]),
            _ => {
                return Err(FieldProbeError::NotBitwise {
                    probe_bit: n,
                    positions: bits,
                })
            }
        }
    }

    Err(FieldProbeError::Unbounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{SetFieldFn, SetSlotFn};
    use pretty_assertions::assert_eq;

    fn setter(f: impl Fn(&mut InsnBuf, u64) + 'static) -> SetFieldFn {
        Box::new(f)
    }

    fn identity_placer() -> SetSlotFn {
        Box::new(|dst, src| dst.or_shifted(src, 0))
    }

    #[test]
    fn test_contiguous_field() {
        // Abstract bits 0..3 land at local bits 3..6.
        let s = setter(|buf, v| {
            for b in 0..3 {
                if v & (1 << b) != 0 {
                    buf.set(b + 3);
                }
            }
        });
        let bits = discover_field_bits(&s, &identity_placer()).unwrap();
        assert_eq!(bits, vec![3, 4, 5]);
    }

    #[test]
    fn test_permuted_field() {
        // Value bits are scattered out of order across the word.
        let map = [9usize, 2, 14];
        let s = setter(move |buf, v| {
            for (n, &pos) in map.iter().enumerate() {
                if v & (1 << n) != 0 {
                    buf.set(pos);
                }
            }
        });
        let bits = discover_field_bits(&s, &identity_placer()).unwrap();
        assert_eq!(bits, vec![9, 2, 14]);
    }

    #[test]
    fn test_placer_shift_applies() {
        let s = setter(|buf, v| buf.set_low_bits(v, 4));
        let placer: SetSlotFn = Box::new(|dst, src| dst.or_shifted(src, 16));
        let bits = discover_field_bits(&s, &placer).unwrap();
        assert_eq!(bits, vec![16, 17, 18, 19]);
    }

    #[test]
    fn test_zero_width_field() {
        let s = setter(|_, _| {});
        let bits = discover_field_bits(&s, &identity_placer()).unwrap();
        assert!(bits.is_empty());
    }

    #[test]
    fn test_width_is_exact() {
        let s = setter(|buf, v| buf.set_low_bits(v, 5));
        let bits = discover_field_bits(&s, &identity_placer()).unwrap();
        assert_eq!(bits.len(), 5);
    }

    #[test]
    fn test_not_bitwise_detected() {
        // Probe bit 0 fans out to two word bits.
        let s = setter(|buf, v| {
            if v & 1 != 0 {
                buf.set(3);
                buf.set(4);
            }
        });
        let err = discover_field_bits(&s, &identity_placer()).unwrap_err();
        assert_eq!(
            err,
            FieldProbeError::NotBitwise {
                probe_bit: 0,
                positions: vec![3, 4],
            }
        );
    }

    #[test]
    fn test_unbounded_field() {
        // Always sets a bit no matter which value bit is probed.
        let s = setter(|buf, _| buf.set(0));
        let err = discover_field_bits(&s, &identity_placer()).unwrap_err();
        assert_eq!(err, FieldProbeError::Unbounded);
    }
}
