//! Bit field extraction over 32-bit PowerPC instruction words.
//!
//! PowerPC documentation numbers bits from the most significant end, so bit 0 is the MSB of the
//! word and bit 31 is the LSB:
//! ```text
//!  0     5 6                                                                          31
//! | PRIMARY |                         form specific fields                             |
//! ```
//! Every range in this crate uses that numbering and is inclusive on both ends.

use std::fmt::{self, Display};

use crate::Error;

/// Highest valid MSB-first bit index of a 32-bit word
pub const MAX_BIT_INDEX: u8 = 31;

/// Bits 0..=5, shared by all encoding forms
pub const PRIMARY_OPCODE_RANGE: BitRange = BitRange { msb: 0, lsb: 5 };

/// Extracts bits `[a, b]` (MSB-first, inclusive) from `v`, right-justified.
///
/// No range checks are performed. Callers must guarantee `a <= b <= 31`. This is the exact
/// expression emitted into generated decoders, so both stages compute identical values.
#[inline(always)]
pub const fn extract_bits_unchecked(v: u32, a: u32, b: u32) -> u32 {
    (v >> (31 - b)) & (u32::MAX >> (31 - (b - a)))
}

/// Body of [`extract_bits_unchecked`] as Rust source, over parameters `v`, `a` and `b`
pub const EXTRACT_BITS_EXPR: &str = "(v >> (31 - b)) & (u32::MAX >> (31 - (b - a)))";

/// Extracts bits `[msb, lsb]` (MSB-first, inclusive) from `word`, right-justified.
///
/// Returns an error instead of truncating when `msb > lsb` or either index exceeds 31.
pub fn extract_bits(word: u32, msb: u8, lsb: u8) -> Result<u32, Error> {
    Ok(BitRange::new(msb, lsb)?.extract(word))
}

/// Inclusive MSB-first bit range of a 32-bit word
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitRange {
    msb: u8,
    lsb: u8,
}

impl BitRange {
    /// Creates a validated bit range
    pub fn new(msb: u8, lsb: u8) -> Result<BitRange, Error> {
        if msb > lsb || lsb > MAX_BIT_INDEX {
            return Err(Error::InvalidBitRange { msb, lsb });
        }
        Ok(BitRange { msb, lsb })
    }

    pub const fn msb(&self) -> u8 {
        self.msb
    }

    pub const fn lsb(&self) -> u8 {
        self.lsb
    }

    /// Number of bits covered by the range
    pub const fn width(&self) -> u32 {
        (self.lsb - self.msb) as u32 + 1
    }

    /// Largest value the range can hold
    pub const fn mask(&self) -> u32 {
        u32::MAX >> (32 - self.width())
    }

    #[inline(always)]
    pub const fn extract(&self, word: u32) -> u32 {
        extract_bits_unchecked(word, self.msb as u32, self.lsb as u32)
    }

    pub const fn overlaps(&self, other: &BitRange) -> bool {
        self.msb <= other.lsb && other.msb <= self.lsb
    }
}

impl Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.msb, self.lsb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_primary_opcode() {
        // addx r3, r4, r5
        let word = 0x7c642a14;
        assert_eq!(PRIMARY_OPCODE_RANGE.extract(word), 31);
        assert_eq!(extract_bits(word, 0, 5).unwrap(), 31);
        assert_eq!(extract_bits(word, 22, 30).unwrap(), 266);
        assert_eq!(extract_bits(word, 6, 10).unwrap(), 3);
        assert_eq!(extract_bits(word, 11, 15).unwrap(), 4);
        assert_eq!(extract_bits(word, 16, 20).unwrap(), 5);
    }

    #[test]
    fn single_bit_and_full_word() {
        assert_eq!(extract_bits(0x8000_0000, 0, 0).unwrap(), 1);
        assert_eq!(extract_bits(0x0000_0001, 31, 31).unwrap(), 1);
        assert_eq!(extract_bits(0x0000_0001, 0, 30).unwrap(), 0);
        assert_eq!(extract_bits(0xdead_beef, 0, 31).unwrap(), 0xdead_beef);
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert_eq!(extract_bits(0, 6, 5), Err(Error::InvalidBitRange { msb: 6, lsb: 5 }));
        assert_eq!(extract_bits(0, 0, 32), Err(Error::InvalidBitRange { msb: 0, lsb: 32 }));
        assert_eq!(extract_bits(0, 40, 45), Err(Error::InvalidBitRange { msb: 40, lsb: 45 }));
    }

    #[test]
    fn result_fits_in_range_width() {
        let words = [0u32, u32::MAX, 0xdead_beef, 0x1234_5678, 0x8000_0001, 0x5555_aaaa];
        for word in words {
            for msb in 0..=MAX_BIT_INDEX {
                for lsb in msb..=MAX_BIT_INDEX {
                    let range = BitRange::new(msb, lsb).unwrap();
                    let value = extract_bits(word, msb, lsb).unwrap();
                    assert!(value <= range.mask(), "{word:#x} [{msb},{lsb}] = {value:#x}");
                    assert_eq!(value, extract_bits(word, msb, lsb).unwrap());
                    let reference = ((word as u64) >> (31 - lsb)) & ((1u64 << range.width()) - 1);
                    assert_eq!(value as u64, reference);
                }
            }
        }
    }

    #[test]
    fn overlap_detection() {
        let a = BitRange::new(21, 27).unwrap();
        let b = BitRange::new(27, 27).unwrap();
        let c = BitRange::new(30, 31).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}
