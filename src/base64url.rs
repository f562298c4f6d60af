//! Base64URL codec, unpadded.
//!
//! The alphabet is `A-Z a-z 0-9 - _` per RFC4648 §5, with no `=` padding on
//! either side: encoded length is `4*(n/3)` plus 2 or 3 tail characters, and
//! the decoder rejects any input whose length is 1 mod 4. The standard
//! alphabet's `+` and `/` are not valid input.
//!
//! Decoding is table-driven four characters at a time; on AVX2 hosts whole
//! 32-character blocks go through a vector kernel that classifies characters
//! by high nibble and composes 24 output bytes per block.

use crate::error::ParseError;

pub(crate) const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Sentinel in the decode table for bytes outside the alphabet. Bit 6 is
/// clear in every valid 6-bit value, so a whole quad can be validated with a
/// single OR-and-mask.
pub(crate) const INVALID: u8 = 64;

pub(crate) const DECODE: [u8; 256] = decode_table();

const fn decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Encodes bytes to unpadded Base64URL text.
pub fn encode(input: &[u8]) -> String {
    let mut out = Vec::with_capacity(input.len().div_ceil(3) * 4);
    let mut chunks = input.chunks_exact(3);
    for chunk in &mut chunks {
        let group = u32::from(chunk[0]) << 16 | u32::from(chunk[1]) << 8 | u32::from(chunk[2]);
        out.push(ALPHABET[(group >> 18) as usize & 63]);
        out.push(ALPHABET[(group >> 12) as usize & 63]);
        out.push(ALPHABET[(group >> 6) as usize & 63]);
        out.push(ALPHABET[group as usize & 63]);
    }
    match chunks.remainder() {
        [] => {}
        &[a] => {
            out.push(ALPHABET[(a >> 2) as usize]);
            out.push(ALPHABET[((a << 4) & 63) as usize]);
        }
        &[a, b] => {
            out.push(ALPHABET[(a >> 2) as usize]);
            out.push(ALPHABET[((a << 4 | b >> 4) & 63) as usize]);
            out.push(ALPHABET[((b << 2) & 63) as usize]);
        }
        _ => unreachable!(),
    }
    // the alphabet is pure ASCII
    String::from_utf8(out).unwrap_or_default()
}

/// Decodes unpadded Base64URL text.
///
/// A length of 1 mod 4 can never be produced by the encoder and is a length
/// error. Tail characters with nonzero dropped bits (e.g. `QR` where the
/// canonical encoding of the same byte is `QQ`) are accepted; the surplus
/// bits are discarded.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    if input.len() % 4 == 1 {
        return Err(ParseError::Length);
    }

    let mut out = Vec::with_capacity(input.len() / 4 * 3 + 2);

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    let input = if crate::simd::has_avx2() {
        decode_blocks(input, &mut out)?
    } else {
        input
    };

    decode_tail(input, &mut out)?;
    Ok(out)
}

/// Runs whole 32-character blocks through the vector kernel, leaving at
/// least one quad for the scalar tail.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn decode_blocks<'a>(mut rest: &'a [u8], out: &mut Vec<u8>) -> Result<&'a [u8], ParseError> {
    while rest.len() >= 36 {
        // SAFETY: dispatch verified AVX2 support at runtime.
        let block =
            unsafe { crate::simd::x86_64::decode_base64url32(rest[..32].try_into().unwrap())? };
        out.extend_from_slice(&block);
        rest = &rest[32..];
    }
    Ok(rest)
}

#[cfg(test)]
pub(crate) fn decode_scalar(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    if input.len() % 4 == 1 {
        return Err(ParseError::Length);
    }
    let mut out = Vec::with_capacity(input.len() / 4 * 3 + 2);
    decode_tail(input, &mut out)?;
    Ok(out)
}

fn decode_tail(input: &[u8], out: &mut Vec<u8>) -> Result<(), ParseError> {
    let mut quads = input.chunks_exact(4);
    for quad in &mut quads {
        let a = DECODE[quad[0] as usize];
        let b = DECODE[quad[1] as usize];
        let c = DECODE[quad[2] as usize];
        let d = DECODE[quad[3] as usize];
        if (a | b | c | d) & INVALID != 0 {
            return Err(ParseError::Grammar);
        }
        let group =
            u32::from(a) << 18 | u32::from(b) << 12 | u32::from(c) << 6 | u32::from(d);
        out.push((group >> 16) as u8);
        out.push((group >> 8) as u8);
        out.push(group as u8);
    }
    match quads.remainder() {
        [] => Ok(()),
        &[a, b] => {
            let a = DECODE[a as usize];
            let b = DECODE[b as usize];
            if (a | b) & INVALID != 0 {
                return Err(ParseError::Grammar);
            }
            out.push(a << 2 | b >> 4);
            Ok(())
        }
        &[a, b, c] => {
            let a = DECODE[a as usize];
            let b = DECODE[b as usize];
            let c = DECODE[c as usize];
            if (a | b | c) & INVALID != 0 {
                return Err(ParseError::Grammar);
            }
            out.push(a << 2 | b >> 4);
            out.push(b << 4 | c >> 2);
            Ok(())
        }
        // length 1 mod 4 was rejected up front
        _ => unreachable!(),
    }
}
