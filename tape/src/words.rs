use std::fmt;

use crate::byte::DATA_MASK;

use derive_more::IsVariant;

/// A 12-bit word reconstructed from the tape stream.
///
/// Origin and Data words are built from two consecutive 6-bit fragments,
/// first byte high; Field words come from a single control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Word {
    /// Load address for the words that follow.
    Origin(u16),

    /// Memory extension field select (0-7).
    Field(u8),

    /// Program data word.
    Data(u16),
}

/// Combine two 6-bit fragments into a 12-bit word, first fragment high.
pub fn pack(high: u8, low: u8) -> u16 {
    u16::from(high & DATA_MASK) << 6 | u16::from(low & DATA_MASK)
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Word::Origin(addr) => write!(f, "A {addr:04o}"),
            Word::Field(field) => write!(f, "E-----{field}"),
            Word::Data(val) => write!(f, "D {val:04o}"),
        }
    }
}
