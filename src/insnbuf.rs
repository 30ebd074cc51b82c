//! Fixed-capacity instruction-word bit buffers.
//!
//! An [`InsnBuf`] holds one instruction word as an array of 32-bit words,
//! mirroring the insnbuf layout used by binutils ISA overlays: bit `b`
//! lives in word `b / 32` at position `b % 32`. All probing in the
//! discovery engine works through this type, so the raw word/bit
//! arithmetic stays in one place.

/// Maximum instruction-word width, in bits, across the target ISA family.
pub const MAX_INSN_BITS: usize = 64;

/// Number of 32-bit words backing one instruction buffer.
pub const MAX_INSN_WORDS: usize = MAX_INSN_BITS / 32;

/// A fixed-capacity bit buffer representing one instruction word.
///
/// Encoders supplied by an ISA description mutate buffers through
/// [`set`](InsnBuf::set); the discovery engine reads results back with
/// [`set_bits`](InsnBuf::set_bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsnBuf {
    words: [u32; MAX_INSN_WORDS],
}

impl InsnBuf {
    /// Create a new, all-zero buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every word to zero.
    pub fn clear(&mut self) {
        self.words = [0; MAX_INSN_WORDS];
    }

    /// Set bit `bit` to one.
    ///
    /// # Panics
    ///
    /// Panics if `bit >= MAX_INSN_BITS`; encoders are expected to stay
    /// inside the instruction word.
    pub fn set(&mut self, bit: usize) {
        assert!(bit < MAX_INSN_BITS, "bit {bit} out of range");
        self.words[bit / 32] |= 1 << (bit % 32);
    }

    /// Read bit `bit`.
    pub fn get(&self, bit: usize) -> bool {
        assert!(bit < MAX_INSN_BITS, "bit {bit} out of range");
        self.words[bit / 32] & (1 << (bit % 32)) != 0
    }

    /// Return the positions of all set bits, in ascending order.
    ///
    /// Empty if no bit is set. This is both how final results are read
    /// and how single-bit probes are interpreted.
    pub fn set_bits(&self) -> Vec<u8> {
        let mut bits = Vec::new();
        for b in 0..MAX_INSN_BITS {
            if self.get(b) {
                bits.push(b as u8);
            }
        }
        bits
    }

    /// True if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Copy the low `width` bits of `value` into bits `0..width`.
    ///
    /// Convenience for writing encoders; the discovery engine itself
    /// never assumes encoders use it.
    pub fn set_low_bits(&mut self, value: u64, width: usize) {
        for b in 0..width.min(MAX_INSN_BITS) {
            if value & (1 << b) != 0 {
                self.set(b);
            }
        }
    }

    /// OR every set bit of `other` into `self`, shifted left by `shift`.
    ///
    /// Convenience for writing slot placement functions.
    pub fn or_shifted(&mut self, other: &InsnBuf, shift: usize) {
        for b in other.set_bits() {
            self.set(b as usize + shift);
        }
    }
}

/// OR together `1 << b` for every position in `bits`.
///
/// This is the mask form downstream consumers (assembler tables,
/// spreadsheet exports) work with.
pub fn bits_to_mask(bits: &[u8]) -> u64 {
    bits.iter().fold(0, |acc, &b| acc | (1 << b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_is_empty() {
        let buf = InsnBuf::new();
        assert!(buf.is_empty());
        assert_eq!(buf.set_bits(), Vec::<u8>::new());
    }

    #[test]
    fn test_set_and_get() {
        let mut buf = InsnBuf::new();
        buf.set(0);
        buf.set(31);
        buf.set(32);
        buf.set(63);
        assert!(buf.get(0));
        assert!(buf.get(31));
        assert!(buf.get(32));
        assert!(buf.get(63));
        assert!(!buf.get(1));
        assert!(!buf.get(33));
    }

    #[test]
    fn test_set_bits_ascending() {
        let mut buf = InsnBuf::new();
        buf.set(40);
        buf.set(3);
        buf.set(17);
        assert_eq!(buf.set_bits(), vec![3, 17, 40]);
    }

    #[test]
    fn test_clear() {
        let mut buf = InsnBuf::new();
        buf.set(5);
        buf.set(50);
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_set_low_bits() {
        let mut buf = InsnBuf::new();
        buf.set_low_bits(0b1011, 4);
        assert_eq!(buf.set_bits(), vec![0, 1, 3]);
    }

    #[test]
    fn test_set_low_bits_truncates_to_width() {
        let mut buf = InsnBuf::new();
        buf.set_low_bits(0xFF, 3);
        assert_eq!(buf.set_bits(), vec![0, 1, 2]);
    }

    #[test]
    fn test_or_shifted() {
        let mut local = InsnBuf::new();
        local.set(0);
        local.set(2);
        let mut word = InsnBuf::new();
        word.set(1);
        word.or_shifted(&local, 8);
        assert_eq!(word.set_bits(), vec![1, 8, 10]);
    }

    #[test]
    fn test_bits_to_mask() {
        assert_eq!(bits_to_mask(&[]), 0);
        assert_eq!(bits_to_mask(&[0, 1]), 0b11);
        assert_eq!(bits_to_mask(&[4, 63]), (1 << 4) | (1 << 63));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range() {
        let mut buf = InsnBuf::new();
        buf.set(MAX_INSN_BITS);
    }
}
