//! Field expressions compose one or more disjoint bit ranges into a single extended opcode value.
//!
//! All ranges are right-aligned to the rightmost bit of the range that ends last: the value of
//! each range is shifted left by `max_lsb - lsb` and the shifted values are ORed together. The
//! same composition is used to compute the declared extended opcode of an instruction and, inside
//! the generated decoder, the runtime comparison key.

use std::fmt::{self, Display};

use crate::{BitRange, Error};

/// One term of a [`FieldExpression`]: a bit range and the left shift applied to its value
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPart {
    pub range: BitRange,
    pub shift: u32,
}

/// Canonical extraction expression of an encoding form's extended opcode.
///
/// Two forms with the same ranges have equal expressions, which is what the decision tree
/// groups by. The derived ordering is the structural bucket ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldExpression {
    parts: Vec<FieldPart>,
}

impl FieldExpression {
    /// Builds the expression for the given ranges, in declaration order.
    ///
    /// Fails if any two ranges share a bit.
    pub fn new(ranges: &[BitRange]) -> Result<FieldExpression, Error> {
        for (i, a) in ranges.iter().enumerate() {
            if let Some(b) = ranges[i + 1..].iter().find(|b| a.overlaps(b)) {
                return Err(Error::OverlappingRanges(a.to_string(), b.to_string()));
            }
        }

        let max_lsb = ranges.iter().map(|r| r.lsb()).max().unwrap_or(0);
        let parts = ranges
            .iter()
            .map(|&range| FieldPart { range, shift: (max_lsb - range.lsb()) as u32 })
            .collect();

        Ok(FieldExpression { parts })
    }

    pub fn parts(&self) -> &[FieldPart] {
        &self.parts
    }

    /// True for primary-only forms
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Computes the composed value of this expression over `word`
    #[inline(always)]
    pub fn compose(&self, word: u32) -> u32 {
        self.parts.iter().fold(0, |acc, part| acc | (part.range.extract(word) << part.shift))
    }

    /// Lowest and highest bit index touched by the expression
    pub fn span(&self) -> Option<(u8, u8)> {
        let low = self.parts.iter().map(|p| p.range.msb()).min()?;
        let high = self.parts.iter().map(|p| p.range.lsb()).max()?;
        Some((low, high))
    }

    /// Width of the binary literals compared against this expression.
    ///
    /// Equals `highest - lowest + 1` over the span, which always holds the composed value.
    pub fn bit_count(&self) -> u32 {
        self.span().map_or(0, |(low, high)| (high - low) as u32 + 1)
    }
}

impl Display for FieldExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            return write!(f, "none");
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "[{}]", part.range)?;
            if part.shift > 0 {
                write!(f, " << {}", part.shift)?;
            }
        }
        Ok(())
    }
}
