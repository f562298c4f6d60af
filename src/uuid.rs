//! RFC4122 UUID decoding.
//!
//! Three text forms are accepted, dispatched by length: 32 hex digits,
//! the canonical 36-byte dashed form, and the dashed form wrapped in curly
//! braces (38 bytes). Hex digits may be upper or lower case in every form.

use crate::error::ParseError;
use crate::hexadecimal::nibble;

/// A 128-bit UUID, stored as the 16 octets of its big-endian text form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uuid(pub [u8; 16]);

/// Offsets of the four dashes in the canonical 36-byte form.
const DASHES: [usize; 4] = [8, 13, 18, 23];

impl Uuid {
    pub const NIL: Self = Self([0; 16]);

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Parses any of the three accepted text forms.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        match input.len() {
            38 => {
                if input[0] != b'{' || input[37] != b'}' {
                    return Err(ParseError::Grammar);
                }
                Self::parse_dashed(&input[1..37])
            }
            36 => Self::parse_dashed(input),
            32 => Self::parse_compact(input),
            _ => Err(ParseError::Length),
        }
    }

    #[cfg(test)]
    pub(crate) fn parse_scalar(input: &[u8]) -> Result<Self, ParseError> {
        match input.len() {
            38 => {
                if input[0] != b'{' || input[37] != b'}' {
                    return Err(ParseError::Grammar);
                }
                check_dashes(input[1..37].try_into().unwrap())?;
                Self::scalar_dashed(input[1..37].try_into().unwrap())
            }
            36 => {
                check_dashes(input.try_into().unwrap())?;
                Self::scalar_dashed(input.try_into().unwrap())
            }
            32 => Self::scalar_compact(input.try_into().unwrap()),
            _ => Err(ParseError::Length),
        }
    }

    fn parse_dashed(inner: &[u8]) -> Result<Self, ParseError> {
        let inner: &[u8; 36] = inner.try_into().map_err(|_| ParseError::Length)?;
        check_dashes(inner)?;

        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        if crate::simd::has_avx2() {
            // SAFETY: dispatch verified AVX2 support at runtime.
            return unsafe { crate::simd::x86_64::parse_uuid_dashed(inner) };
        }

        Self::scalar_dashed(inner)
    }

    fn parse_compact(input: &[u8]) -> Result<Self, ParseError> {
        let digits: &[u8; 32] = input.try_into().map_err(|_| ParseError::Length)?;

        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        if crate::simd::has_avx2() {
            // SAFETY: dispatch verified AVX2 support at runtime.
            return unsafe { crate::simd::x86_64::parse_uuid_compact(digits) };
        }

        Self::scalar_compact(digits)
    }

    fn scalar_compact(digits: &[u8; 32]) -> Result<Self, ParseError> {
        let mut bytes = [0u8; 16];
        for (octet, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            *octet = nibble(pair[0])? << 4 | nibble(pair[1])?;
        }
        Ok(Self(bytes))
    }

    fn scalar_dashed(inner: &[u8; 36]) -> Result<Self, ParseError> {
        let mut digits = [0u8; 32];
        let mut n = 0;
        for (i, &byte) in inner.iter().enumerate() {
            if !DASHES.contains(&i) {
                digits[n] = byte;
                n += 1;
            }
        }
        Self::scalar_compact(&digits)
    }
}

/// The four group separators must be literal dashes; both the scalar path
/// and the vector kernel's shuffle assume they are checked up front.
pub(crate) fn check_dashes(inner: &[u8; 36]) -> Result<(), ParseError> {
    if DASHES.iter().all(|&i| inner[i] == b'-') {
        Ok(())
    } else {
        Err(ParseError::Grammar)
    }
}

impl std::fmt::Display for Uuid {
    /// Canonical lowercase dashed form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11], b[12],
            b[13], b[14], b[15]
        )
    }
}
