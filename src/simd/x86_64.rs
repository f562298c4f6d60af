//! x86_64 AVX2 kernels for the fixed-width decoders.
//!
//! Based on techniques from:
//! - Wojciech Muła's SIMD base64 work and https://github.com/aklomp/base64
//! - https://github.com/movermeyer/SIMDRfc3339 (date-time field extraction)
//! - https://github.com/crashoz/uuid_v4 (hex digit unweaving)
//!
//! Every kernel validates with the same per-position tables as its scalar
//! counterpart before extracting fields, so the two paths agree byte for
//! byte on what they accept.

use crate::datetime::{DATE_LOWER, DATE_UPPER, DT_LOWER, DT_UPPER, CalendarDate, RawDateTime};
use crate::error::ParseError;
use crate::uuid::Uuid;

/// Folds up to 16 decimal digits into a `u64`.
///
/// The input is right-aligned into a zero-digit-padded 16-byte block, range
/// checked in one shot, then reduced with the multiply-add ladder: pairs to
/// two-digit values, to four-digit, to eight-digit, and a final scalar
/// combine of the two 32-bit halves.
///
/// # Safety
///
/// The caller must have verified AVX2 support. `input` must be at most 16
/// bytes.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn parse_decimal16(input: &[u8]) -> Result<u64, ParseError> {
    use std::arch::x86_64::*;

    debug_assert!(input.len() <= 16);
    let mut buf = [b'0'; 16];
    buf[16 - input.len()..].copy_from_slice(input);

    unsafe {
        let chars = _mm_loadu_si128(buf.as_ptr() as *const __m128i);

        let too_low = _mm_cmpgt_epi8(_mm_set1_epi8(b'0' as i8), chars);
        let too_high = _mm_cmpgt_epi8(chars, _mm_set1_epi8(b'9' as i8));
        if _mm_movemask_epi8(_mm_or_si128(too_low, too_high)) != 0 {
            return Err(ParseError::Grammar);
        }

        let digits = _mm_sub_epi8(chars, _mm_set1_epi8(b'0' as i8));
        // [d0..d15] -> [10*d0+d1, ..] -> [100*p0+p1, ..] -> [10000*q0+q1, ..]
        let pairs = _mm_maddubs_epi16(digits, _mm_set1_epi16(0x010A));
        let quads = _mm_madd_epi16(pairs, _mm_set1_epi32(0x0001_0064));
        let packed = _mm_packs_epi32(quads, _mm_setzero_si128());
        let halves = _mm_madd_epi16(packed, _mm_set1_epi32(0x0001_2710));

        let mut out = [0i32; 4];
        _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, halves);
        Ok(out[0] as u64 * 100_000_000 + out[1] as u64)
    }
}

/// Folds up to 16 hex digits (either case) into a `u64`.
///
/// After validation the case-folded digits are unweaved into even and odd
/// nibble streams, the even stream is shifted up four bits, and a horizontal
/// add reassembles the value's bytes.
///
/// # Safety
///
/// The caller must have verified AVX2 support. `input` must be at most 16
/// bytes.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn parse_hex16(input: &[u8]) -> Result<u64, ParseError> {
    use std::arch::x86_64::*;

    debug_assert!(input.len() <= 16);
    let mut buf = [b'0'; 16];
    buf[16 - input.len()..].copy_from_slice(input);

    unsafe {
        let chars = _mm_loadu_si128(buf.as_ptr() as *const __m128i);
        // bit 5 is already set in '0'-'9', so this only folds letters
        let lower = _mm_or_si128(chars, _mm_set1_epi8(0x20));

        let not_digit = _mm_or_si128(
            _mm_cmpgt_epi8(_mm_set1_epi8(b'0' as i8), chars),
            _mm_cmpgt_epi8(chars, _mm_set1_epi8(b'9' as i8)),
        );
        let not_alpha = _mm_or_si128(
            _mm_cmpgt_epi8(_mm_set1_epi8(b'a' as i8), lower),
            _mm_cmpgt_epi8(lower, _mm_set1_epi8(b'f' as i8)),
        );
        if _mm_movemask_epi8(_mm_and_si128(not_digit, not_alpha)) != 0 {
            return Err(ParseError::Grammar);
        }

        // '0' maps via -0x30, 'a'-'f' via -0x57
        let offset = _mm_blendv_epi8(_mm_set1_epi8(0x30), _mm_set1_epi8(0x57), not_digit);
        let values = _mm_sub_epi8(lower, offset);

        // split even-index (high) and odd-index (low) nibbles per 32-bit lane
        let unweave = _mm_set_epi32(0x0002_0406, 0x0103_0507, 0x080A_0C0E, 0x090B_0D0F);
        let split = _mm_shuffle_epi8(values, unweave);
        let shifted = _mm_sllv_epi32(split, _mm_set_epi32(4, 0, 4, 0));
        let value = _mm_hadd_epi32(shifted, _mm_setzero_si128());
        Ok(_mm_cvtsi128_si64(value) as u64)
    }
}

/// Validates and extracts a `YYYY-MM-DD` date from its padded 16-byte
/// buffer.
///
/// # Safety
///
/// The caller must have verified AVX2 support.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn parse_date16(buf: &[u8; 16]) -> Result<CalendarDate, ParseError> {
    use std::arch::x86_64::*;

    unsafe {
        let chars = _mm_loadu_si128(buf.as_ptr() as *const __m128i);
        let lower = _mm_loadu_si128(DATE_LOWER.as_ptr() as *const __m128i);
        let upper = _mm_loadu_si128(DATE_UPPER.as_ptr() as *const __m128i);

        let too_low = _mm_cmpgt_epi8(lower, chars);
        let too_high = _mm_cmpgt_epi8(chars, upper);
        if _mm_movemask_epi8(_mm_or_si128(too_low, too_high)) != 0 {
            return Err(ParseError::Grammar);
        }
    }
    Ok(crate::datetime::extract_date(buf))
}

/// Validates and extracts a naive date-time from its padded 32-byte buffer
/// `YYYY-MM-DD hh:mm:ss.fffffffff---`.
///
/// One 256-bit compare pair checks every position against the shared bound
/// tables; a shuffle then gathers the digit bytes into weighted pairs and
/// `maddubs` folds each pair into a field (or half a field, for the year and
/// the nanosecond fraction).
///
/// # Safety
///
/// The caller must have verified AVX2 support. The separator byte at offset
/// 10 must already be checked.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn parse_datetime32(buf: &[u8; 32]) -> Result<RawDateTime, ParseError> {
    use std::arch::x86_64::*;

    unsafe {
        let chars = _mm256_loadu_si256(buf.as_ptr() as *const __m256i);
        let lower = _mm256_loadu_si256(DT_LOWER.as_ptr() as *const __m256i);
        let upper = _mm256_loadu_si256(DT_UPPER.as_ptr() as *const __m256i);

        let too_low = _mm256_cmpgt_epi8(lower, chars);
        let too_high = _mm256_cmpgt_epi8(chars, upper);
        if _mm256_movemask_epi8(_mm256_or_si256(too_low, too_high)) != 0 {
            return Err(ParseError::Grammar);
        }

        let digits = _mm256_and_si256(chars, _mm256_set1_epi8(0x0F));

        // gather digit pairs per 128-bit lane, skipping separators:
        // low lane  year year month day hour minute, high lane second + fraction
        #[rustfmt::skip]
        let gather = _mm256_setr_epi8(
            0, 1, 2, 3, 5, 6, 8, 9, 11, 12, 14, 15, -1, -1, -1, -1,
            1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12, -1, -1, -1, -1, -1,
        );
        #[rustfmt::skip]
        let weights = _mm256_setr_epi8(
            10, 1, 10, 1, 10, 1, 10, 1, 10, 1, 10, 1, 0, 0, 0, 0,
            10, 1, 10, 1, 10, 1, 10, 1, 10, 1, 1, 0, 0, 0, 0, 0,
        );
        let folded = _mm256_maddubs_epi16(_mm256_shuffle_epi8(digits, gather), weights);

        let mut f = [0i16; 16];
        _mm256_storeu_si256(f.as_mut_ptr() as *mut __m256i, folded);

        Ok(RawDateTime {
            year: (f[0] * 100 + f[1]) as u16,
            month: f[2] as u8,
            day: f[3] as u8,
            hour: f[4] as u8,
            minute: f[5] as u8,
            second: f[8] as u8,
            nanosecond: f[9] as u32 * 10_000_000
                + f[10] as u32 * 100_000
                + f[11] as u32 * 1_000
                + f[12] as u32 * 10
                + f[13] as u32,
        })
    }
}

/// Decodes 32 contiguous hex digits into 16 octets.
///
/// # Safety
///
/// The caller must have verified AVX2 support.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn parse_uuid_compact(digits: &[u8; 32]) -> Result<Uuid, ParseError> {
    use std::arch::x86_64::*;

    unsafe {
        let chars = _mm256_loadu_si256(digits.as_ptr() as *const __m256i);
        uuid_from_hex32(chars)
    }
}

/// Decodes the 36-byte dashed form; the dash positions must already be
/// verified, they are shuffled away here without another look.
///
/// The compaction follows crashoz/uuid_v4: one unaligned 32-byte load covers
/// everything up to the last dash, a shuffle closes the gaps, and the eight
/// digits the load missed are patched in with two element inserts.
///
/// # Safety
///
/// The caller must have verified AVX2 support and the four dash bytes.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn parse_uuid_dashed(inner: &[u8; 36]) -> Result<Uuid, ParseError> {
    use std::arch::x86_64::*;

    unsafe {
        let raw = _mm256_loadu_si256(inner.as_ptr() as *const __m256i);
        let dash_shuffle = _mm256_set_epi32(
            0x8080_8080_u32 as i32,
            0x0F0E_0D0C,
            0x0B0A_0908,
            0x0605_0403,
            0x8080_0F0E_u32 as i32,
            0x0C0B_0A09,
            0x0706_0504,
            0x0302_0100,
        );
        let compact = _mm256_shuffle_epi8(raw, dash_shuffle);
        let compact = _mm256_insert_epi16::<7>(compact, i16::from_le_bytes([inner[16], inner[17]]));
        let compact = _mm256_insert_epi32::<7>(
            compact,
            i32::from_le_bytes([inner[32], inner[33], inner[34], inner[35]]),
        );
        uuid_from_hex32(compact)
    }
}

/// Shared guts of the two UUID kernels: validates 32 hex characters and
/// pairs their nibbles into 16 output bytes.
#[target_feature(enable = "avx2")]
unsafe fn uuid_from_hex32(chars: std::arch::x86_64::__m256i) -> Result<Uuid, ParseError> {
    use std::arch::x86_64::*;

    unsafe {
        let lower = _mm256_or_si256(chars, _mm256_set1_epi8(0x20));

        let not_digit = _mm256_or_si256(
            _mm256_cmpgt_epi8(_mm256_set1_epi8(b'0' as i8), chars),
            _mm256_cmpgt_epi8(chars, _mm256_set1_epi8(b'9' as i8)),
        );
        let not_alpha = _mm256_or_si256(
            _mm256_cmpgt_epi8(_mm256_set1_epi8(b'a' as i8), lower),
            _mm256_cmpgt_epi8(lower, _mm256_set1_epi8(b'f' as i8)),
        );
        if _mm256_movemask_epi8(_mm256_and_si256(not_digit, not_alpha)) != 0 {
            return Err(ParseError::Grammar);
        }

        let offset =
            _mm256_blendv_epi8(_mm256_set1_epi8(0x30), _mm256_set1_epi8(0x57), not_digit);
        let values = _mm256_sub_epi8(lower, offset);

        // even-index nibbles are the high halves of the output bytes
        let unweave = _mm256_set_epi32(
            0x0F0D_0B09, 0x0E0C_0A08, 0x0705_0301, 0x0604_0200, //
            0x0F0D_0B09, 0x0E0C_0A08, 0x0705_0301, 0x0604_0200,
        );
        let split = _mm256_shuffle_epi8(values, unweave);
        let shifted = _mm256_sllv_epi32(split, _mm256_set_epi32(0, 4, 0, 4, 0, 4, 0, 4));
        let joined = _mm256_hadd_epi32(shifted, _mm256_setzero_si256());
        // each lane holds 8 octets in its low quadword
        let packed = _mm256_castsi256_si128(_mm256_permute4x64_epi64::<0b0000_1000>(joined));

        let mut bytes = [0u8; 16];
        _mm_storeu_si128(bytes.as_mut_ptr() as *mut __m128i, packed);
        Ok(Uuid::from_bytes(bytes))
    }
}

/// Decodes a full 32-character Base64URL block into 24 bytes.
///
/// Classification runs on nibbles: a low-nibble table yields the set of
/// alphabet rows each character could belong to, a high-nibble table yields
/// the one row it claims, and `vptest` confirms the claim for all 32 lanes
/// at once. Rows 8-15 can never match, which also rejects non-ASCII bytes.
///
/// # Safety
///
/// The caller must have verified AVX2 support.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn decode_base64url32(chars: &[u8; 32]) -> Result<[u8; 24], ParseError> {
    use std::arch::x86_64::*;

    unsafe {
        let x = _mm256_loadu_si256(chars.as_ptr() as *const __m256i);
        let high_nibbles = _mm256_and_si256(_mm256_srli_epi32::<4>(x), _mm256_set1_epi8(0x0F));

        // rows allowed for each low nibble ('-' row 2, digits row 3,
        // upper rows 4-5, '_' row 5, lower rows 6-7)
        #[rustfmt::skip]
        let row_sets = _mm256_setr_epi8(
            0x15, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F,
            0x1F, 0x1F, 0x0F, 0x0A, 0x0A, 0x2A, 0x0A, 0x0E,
            0x15, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F,
            0x1F, 0x1F, 0x0F, 0x0A, 0x0A, 0x2A, 0x0A, 0x0E,
        );
        #[rustfmt::skip]
        let row_claim = _mm256_setr_epi8(
            -128, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01,
            -1, -1, -1, -1, -1, -1, -1, -1,
            -128, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01,
            -1, -1, -1, -1, -1, -1, -1, -1,
        );
        // bytes >= 0x80 shuffle to an empty row set and fail the claim
        let allowed = _mm256_shuffle_epi8(row_sets, x);
        let claimed = _mm256_shuffle_epi8(row_claim, high_nibbles);
        if _mm256_testc_si256(allowed, claimed) != 1 {
            return Err(ParseError::Grammar);
        }

        // per-row ASCII-to-value offsets; '_' is the one exception in row 5
        #[rustfmt::skip]
        let row_offset = _mm256_setr_epi8(
            0, 0, 17, 4, -65, -65, -71, -71, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 17, 4, -65, -65, -71, -71, 0, 0, 0, 0, 0, 0, 0, 0,
        );
        let is_underscore = _mm256_cmpeq_epi8(x, _mm256_set1_epi8(b'_' as i8));
        let values = _mm256_add_epi8(x, _mm256_shuffle_epi8(row_offset, high_nibbles));
        let values = _mm256_blendv_epi8(values, _mm256_set1_epi8(63), is_underscore);

        // 4 x 6 bits -> 24 bits, then drop the spare byte of each word
        let merged = _mm256_maddubs_epi16(values, _mm256_set1_epi32(0x0140_0140));
        let packed = _mm256_madd_epi16(merged, _mm256_set1_epi32(0x0001_1000));
        #[rustfmt::skip]
        let gather = _mm256_setr_epi8(
            2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, -1, -1, -1, -1,
            2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, -1, -1, -1, -1,
        );
        let bytes = _mm256_shuffle_epi8(packed, gather);

        let mut buf = [0u8; 32];
        _mm256_storeu_si256(buf.as_mut_ptr() as *mut __m256i, bytes);
        let mut out = [0u8; 24];
        out[..12].copy_from_slice(&buf[..12]);
        out[12..].copy_from_slice(&buf[16..28]);
        Ok(out)
    }
}
