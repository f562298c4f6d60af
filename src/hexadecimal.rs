//! Fixed-width hexadecimal integer decoding.
//!
//! Accepts 1-16 hex digits, case-insensitive, with an optional `0x`/`0X`
//! prefix. The vector path classifies every byte with two range comparisons
//! (digit vs. letter), folds case by setting bit 0x20, applies a
//! class-selected offset to obtain nibble values, and reassembles the 64-bit
//! result with a byte-reorder shuffle plus a horizontal add over 32-bit
//! halves.

use crate::error::ParseError;

/// Most hex digits a `u64` can hold.
const MAX_DIGITS: usize = 16;

/// An unsigned integer parsed from a hexadecimal digit string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexValue {
    pub value: u64,
}

impl HexValue {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parses a hexadecimal digit string, stripping an optional `0x`/`0X`.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        let digits = strip_prefix(input);
        if digits.is_empty() {
            return Err(ParseError::Length);
        }
        if digits.len() > MAX_DIGITS {
            return Err(ParseError::Overflow);
        }

        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        if crate::simd::has_avx2() {
            // SAFETY: dispatch verified AVX2 support at runtime.
            return unsafe { crate::simd::x86_64::parse_hex16(digits) }.map(Self::new);
        }

        Self::parse_scalar_digits(digits)
    }

    #[cfg(test)]
    pub(crate) fn parse_scalar(input: &[u8]) -> Result<Self, ParseError> {
        let digits = strip_prefix(input);
        if digits.is_empty() {
            return Err(ParseError::Length);
        }
        if digits.len() > MAX_DIGITS {
            return Err(ParseError::Overflow);
        }
        Self::parse_scalar_digits(digits)
    }

    fn parse_scalar_digits(digits: &[u8]) -> Result<Self, ParseError> {
        let mut value: u64 = 0;
        for &byte in digits {
            value = value << 4 | u64::from(nibble(byte)?);
        }
        Ok(Self::new(value))
    }
}

/// A `0x`/`0X` prefix only counts when digits follow it; a bare `0x` is two
/// ordinary bytes and fails on the `x`.
fn strip_prefix(input: &[u8]) -> &[u8] {
    match input {
        [b'0', b'x' | b'X', rest @ ..] if !rest.is_empty() => rest,
        _ => input,
    }
}

/// Classifies one byte as {digit, uppercase A-F, lowercase a-f} and returns
/// its nibble value.
pub(crate) fn nibble(byte: u8) -> Result<u8, ParseError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(ParseError::Grammar),
    }
}

impl std::fmt::Display for HexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}", self.value)
    }
}
