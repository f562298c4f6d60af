//! Fixed-width decimal integer decoding.
//!
//! Accepts 1-20 ASCII digits with no sign and no separators; the value must
//! fit in a `u64`. The vector path right-aligns up to 16 digits into a
//! zero-padded lane, validates the whole lane in one range check, and
//! collapses the digits with a tree of widening multiply-add passes. Longer
//! inputs split into a scalar-parsed head and a vector-parsed 16-digit tail.

use crate::error::ParseError;

/// Number of trailing digits handled by one vector pass.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
const VECTOR_DIGITS: usize = 16;

/// Most digits a `u64` can ever need.
const MAX_DIGITS: usize = 20;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
const POW10_16: u64 = 10_000_000_000_000_000;

/// An unsigned integer parsed from a decimal digit string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecimalValue {
    pub value: u64,
}

impl DecimalValue {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parses a decimal digit string.
    ///
    /// Fails with [`ParseError::Grammar`] on any non-digit byte,
    /// [`ParseError::Length`] on empty input, and [`ParseError::Overflow`]
    /// when the digits denote a value above `u64::MAX`.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Length);
        }
        if input.len() > MAX_DIGITS {
            return Err(ParseError::Overflow);
        }

        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        if crate::simd::has_avx2() {
            return Self::parse_vector(input);
        }

        Self::parse_scalar(input)
    }

    /// Scalar path: one checked fold over the digits.
    pub(crate) fn parse_scalar(input: &[u8]) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Length);
        }
        if input.len() > MAX_DIGITS {
            return Err(ParseError::Overflow);
        }
        fold_digits(input).map(Self::new)
    }

    /// Vector path: scalar head, 16-digit vector tail, checked recombination.
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    fn parse_vector(input: &[u8]) -> Result<Self, ParseError> {
        let (head, tail) = input.split_at(input.len().saturating_sub(VECTOR_DIGITS));
        let high = fold_digits(head)?;
        // SAFETY: dispatch verified AVX2 support at runtime.
        let low = unsafe { crate::simd::x86_64::parse_decimal16(tail) }?;
        high.checked_mul(POW10_16)
            .and_then(|scaled| scaled.checked_add(low))
            .map(Self::new)
            .ok_or(ParseError::Overflow)
    }
}

/// Left-to-right checked accumulation of ASCII digits.
///
/// The head of a >16-digit input runs through here even on the vector path;
/// the multiplication is checked so adversarial inputs near the 20-digit
/// boundary report overflow instead of wrapping.
pub(crate) fn fold_digits(digits: &[u8]) -> Result<u64, ParseError> {
    let mut value: u64 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(ParseError::Grammar);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(byte - b'0')))
            .ok_or(ParseError::Overflow)?;
    }
    Ok(value)
}

impl std::fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
