//! RFC3339 date and date-time decoding.
//!
//! Three sub-grammars, dispatched by total length and a few discriminator
//! bytes:
//!
//! - [`CalendarDate`]: exactly 10 bytes, `YYYY-MM-DD`.
//! - [`TimeZoneOffset`]: exactly 6 bytes, `[+-]hh:mm`.
//! - [`CivilDateTime`]: 19-35 bytes, `YYYY-MM-DDThh:mm:ss[.f{1..9}]`
//!   followed by nothing, `Z`, ` UTC`, or `±hh:mm`; the date/time separator
//!   may be `T` or a space.
//!
//! Validation is a single pass over a fixed 32-byte buffer: two per-position
//! bound tables encode the allowed ASCII range at every offset, narrowed
//! where the grammar bounds the value (month tens digit is '0'-'1', day tens
//! '0'-'3', hour tens '0'-'2', minute/second tens '0'-'5') and pinned to an
//! exact byte at separator positions. The same tables drive both the scalar
//! validator below and the vector kernel, so the two paths accept exactly
//! the same byte strings by construction.

use crate::error::ParseError;

/// Per-position lower bounds for the zero-padded 32-byte date-time buffer
/// `YYYY-MM-DD hh:mm:ss.fffffffff---`.
pub(crate) const DT_LOWER: [u8; 32] = [
    b'0', b'0', b'0', b'0', // year
    b'-', //
    b'0', b'0', // month
    b'-', //
    b'0', b'0', // day
    b' ', // separator, widened to cover both ' ' and 'T'
    b'0', b'0', // hour
    b':', //
    b'0', b'0', // minute
    b':', //
    b'0', b'0', // second
    b'.', //
    b'0', b'0', b'0', b'0', b'0', b'0', b'0', b'0', b'0', // fraction
    b'0', b'0', b'0', // zero padding
];

/// Per-position upper bounds for the same buffer.
pub(crate) const DT_UPPER: [u8; 32] = [
    b'9', b'9', b'9', b'9', // year
    b'-', //
    b'1', b'9', // month
    b'-', //
    b'3', b'9', // day
    b'T', // separator
    b'2', b'9', // hour
    b':', //
    b'5', b'9', // minute
    b':', //
    b'5', b'9', // second
    b'.', //
    b'9', b'9', b'9', b'9', b'9', b'9', b'9', b'9', b'9', // fraction
    b'9', b'9', b'9', // zero padding
];

/// Bounds for the 16-byte date buffer `YYYY-MM-DD------` (tail zero-padded).
pub(crate) const DATE_LOWER: [u8; 16] = [
    b'0', b'0', b'0', b'0', b'-', b'0', b'0', b'-', b'0', b'0', //
    b'0', b'0', b'0', b'0', b'0', b'0',
];
pub(crate) const DATE_UPPER: [u8; 16] = [
    b'9', b'9', b'9', b'9', b'-', b'1', b'9', b'-', b'3', b'9', //
    b'9', b'9', b'9', b'9', b'9', b'9',
];

/// Offset of the `T`/space separator inside the date-time buffer.
const SEPARATOR: usize = 10;

/// Folds the low five bits of each character into a 15-bit key. Case does
/// not survive the fold, so `Jan`, `JAN`, and `jan` share a key.
const fn month_key(abbr: &[u8; 3]) -> u16 {
    (abbr[0] as u16 & 0x1F) << 10 | (abbr[1] as u16 & 0x1F) << 5 | (abbr[2] as u16 & 0x1F)
}

/// Slot-to-month mapping for the hash in [`month_from_abbreviation`];
/// 15 marks an empty slot.
const MONTH_OFFSETS: [u8; 16] = [7, 6, 4, 8, 9, 11, 2, 3, 0, 5, 10, 1, 15, 15, 15, 15];

/// Folded keys of `Jan` through `Dec`, indexed by month ordinal minus one,
/// with zero sentinels backing the empty slots.
const MONTH_KEYS: [u16; 16] = [
    month_key(b"Jan"),
    month_key(b"Feb"),
    month_key(b"Mar"),
    month_key(b"Apr"),
    month_key(b"May"),
    month_key(b"Jun"),
    month_key(b"Jul"),
    month_key(b"Aug"),
    month_key(b"Sep"),
    month_key(b"Oct"),
    month_key(b"Nov"),
    month_key(b"Dec"),
    0,
    0,
    0,
    0,
];

/// Converts an abbreviated English month name to its ordinal, `Jan` as 1
/// through `Dec` as 12, ignoring case. Any other input yields `None`.
///
/// `68 * key % 929`, masked to the low four bits, is a perfect hash over the
/// twelve folded keys: each month lands in a distinct slot of the 16-entry
/// table. The fold discards the high bits of each byte, so bytes outside
/// `0x40..=0x7F` can alias a letter (`'!'` folds like `'a'`); the letter
/// check rules those out before the key comparison.
pub const fn month_from_abbreviation(abbr: &[u8; 3]) -> Option<u8> {
    let key = month_key(abbr);
    let slot = (68 * key as u32 % 929) as usize & 0x0F;
    let offset = MONTH_OFFSETS[slot];

    let letters =
        abbr[0] & 0xC0 == 0x40 && abbr[1] & 0xC0 == 0x40 && abbr[2] & 0xC0 == 0x40;
    if letters && key == MONTH_KEYS[offset as usize] {
        Some(offset + 1)
    } else {
        None
    }
}

/// Raw integer fields lifted out of a validated date-time buffer, before any
/// semantic range check.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

/// A Gregorian calendar date.
///
/// Month and day are constrained by the per-position digit grammar only
/// (month tens digit '0'-'1', day tens digit '0'-'3'); the decoder does not
/// cross-validate day against month or leap years, so `2023-02-30` parses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        if input.len() != 10 {
            return Err(ParseError::Length);
        }
        let mut buf = [b'0'; 16];
        buf[..10].copy_from_slice(input);

        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        if crate::simd::has_avx2() {
            // SAFETY: dispatch verified AVX2 support at runtime.
            return unsafe { crate::simd::x86_64::parse_date16(&buf) };
        }

        Self::parse_scalar_buf(&buf)
    }

    #[cfg(test)]
    pub(crate) fn parse_scalar(input: &[u8]) -> Result<Self, ParseError> {
        if input.len() != 10 {
            return Err(ParseError::Length);
        }
        let mut buf = [b'0'; 16];
        buf[..10].copy_from_slice(input);
        Self::parse_scalar_buf(&buf)
    }

    fn parse_scalar_buf(buf: &[u8; 16]) -> Result<Self, ParseError> {
        check_bounds(buf, &DATE_LOWER, &DATE_UPPER)?;
        Ok(extract_date(buf))
    }
}

/// Field extraction shared with the vector kernel's tail: digit bytes are
/// already validated, so `& 0x0F` yields their values directly.
pub(crate) fn extract_date(buf: &[u8; 16]) -> CalendarDate {
    let d = |i: usize| i32::from(buf[i] & 0x0F);
    CalendarDate {
        year: d(0) * 1000 + d(1) * 100 + d(2) * 10 + d(3),
        month: (d(5) * 10 + d(6)) as u8,
        day: (d(8) * 10 + d(9)) as u8,
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time zone offset in signed minutes east of UTC, at most ±23:59.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeZoneOffset {
    minutes: i32,
}

impl TimeZoneOffset {
    pub const UTC: Self = Self { minutes: 0 };

    /// An offset east of UTC, e.g. `east(1, 30)` for `+01:30`.
    pub const fn east(hour: u32, minute: u32) -> Self {
        Self {
            minutes: (60 * hour + minute) as i32,
        }
    }

    /// An offset west of UTC, e.g. `west(11, 30)` for `-11:30`.
    pub const fn west(hour: u32, minute: u32) -> Self {
        Self {
            minutes: -((60 * hour + minute) as i32),
        }
    }

    /// Signed minutes east of UTC.
    pub const fn minutes(&self) -> i32 {
        self.minutes
    }

    /// Parses a `[+-]hh:mm` string. The sign is mandatory; the minute
    /// component must be below 60 and the hour component below 24.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        if input.len() != 6 {
            return Err(ParseError::Length);
        }
        let sign: i32 = match input[0] {
            b'+' => 1,
            b'-' => -1,
            _ => return Err(ParseError::Grammar),
        };
        if input[3] != b':' {
            return Err(ParseError::Grammar);
        }
        let digit = |b: u8| -> Result<i32, ParseError> {
            if b.is_ascii_digit() {
                Ok(i32::from(b - b'0'))
            } else {
                Err(ParseError::Grammar)
            }
        };
        let hour = digit(input[1])? * 10 + digit(input[2])?;
        let minute = digit(input[4])? * 10 + digit(input[5])?;
        if hour >= 24 || minute >= 60 {
            return Err(ParseError::Range);
        }
        Ok(Self {
            minutes: sign * (60 * hour + minute),
        })
    }
}

impl std::fmt::Display for TimeZoneOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let magnitude = self.minutes.unsigned_abs();
        write!(f, "{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
    }
}

/// A calendar date with a wall-clock time, fractional seconds, and an
/// optional time zone offset.
///
/// `offset` is `None` for a naive string that carried no recognized suffix;
/// `Z` and ` UTC` both map to `Some(TimeZoneOffset::UTC)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilDateTime {
    pub date: CalendarDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    pub offset: Option<TimeZoneOffset>,
}

impl CivilDateTime {
    /// The latest representable date-time, `9999-12-31 23:59:59.999999999`.
    pub const MAX: Self = Self {
        date: CalendarDate::new(9999, 12, 31),
        hour: 23,
        minute: 59,
        second: 59,
        nanosecond: 999_999_999,
        offset: None,
    };

    pub const fn new(date: CalendarDate, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            nanosecond: 0,
            offset: None,
        }
    }

    pub const fn with_nanosecond(mut self, nanosecond: u32) -> Self {
        self.nanosecond = nanosecond;
        self
    }

    pub const fn with_offset(mut self, offset: TimeZoneOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Parses a date-time string with an optional time zone designator.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        Self::parse_inner(input, parse_naive)
    }

    #[cfg(test)]
    pub(crate) fn parse_scalar(input: &[u8]) -> Result<Self, ParseError> {
        Self::parse_inner(input, parse_naive_scalar)
    }

    fn parse_inner(
        input: &[u8],
        naive: fn(&[u8]) -> Result<RawDateTime, ParseError>,
    ) -> Result<Self, ParseError> {
        if input.len() < 19 || input.len() > 35 {
            return Err(ParseError::Length);
        }

        let (fields, offset) = if input[input.len() - 1] == b'Z' {
            (naive(&input[..input.len() - 1])?, Some(TimeZoneOffset::UTC))
        } else if matches!(input[input.len() - 6], b'+' | b'-') {
            let fields = naive(&input[..input.len() - 6])?;
            let offset = TimeZoneOffset::parse(&input[input.len() - 6..])?;
            (fields, Some(offset))
        } else if input.ends_with(b" UTC") {
            (naive(&input[..input.len() - 4])?, Some(TimeZoneOffset::UTC))
        } else {
            (naive(input)?, None)
        };

        // the tens-digit bound alone admits hours 24-29
        if fields.hour >= 24 {
            return Err(ParseError::Range);
        }

        Ok(Self {
            date: CalendarDate::new(i32::from(fields.year), fields.month, fields.day),
            hour: fields.hour,
            minute: fields.minute,
            second: fields.second,
            nanosecond: fields.nanosecond,
            offset,
        })
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}.{:09}",
            self.date, self.hour, self.minute, self.second, self.nanosecond
        )?;
        match self.offset {
            None => Ok(()),
            Some(offset) if offset.minutes() == 0 => write!(f, "Z"),
            Some(offset) => write!(f, "{}", offset),
        }
    }
}

/// Right-aligns a naive date-time string into the fixed 32-byte buffer,
/// zero-filling the tail. A 19-byte form gains a synthetic `.` so one set of
/// bound tables covers every accepted length; a fraction must carry 1-9
/// digits, so a bare trailing dot (total length 20) is a length error.
fn build_buffer(input: &[u8]) -> Result<[u8; 32], ParseError> {
    let mut buf = [b'0'; 32];
    match input.len() {
        19 => {
            buf[..19].copy_from_slice(input);
            buf[19] = b'.';
        }
        21..=29 => buf[..input.len()].copy_from_slice(input),
        _ => return Err(ParseError::Length),
    }
    Ok(buf)
}

fn parse_naive(input: &[u8]) -> Result<RawDateTime, ParseError> {
    let buf = build_buffer(input)?;
    check_separator(buf[SEPARATOR])?;

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    if crate::simd::has_avx2() {
        // SAFETY: dispatch verified AVX2 support at runtime.
        return unsafe { crate::simd::x86_64::parse_datetime32(&buf) };
    }

    parse_naive_buf(&buf)
}

#[cfg(test)]
fn parse_naive_scalar(input: &[u8]) -> Result<RawDateTime, ParseError> {
    let buf = build_buffer(input)?;
    check_separator(buf[SEPARATOR])?;
    parse_naive_buf(&buf)
}

fn parse_naive_buf(buf: &[u8; 32]) -> Result<RawDateTime, ParseError> {
    check_bounds(buf, &DT_LOWER, &DT_UPPER)?;
    Ok(extract_datetime(buf))
}

/// The widened bound at the separator position admits every byte in
/// `[' ', 'T']`; only the two real alternatives are grammatical.
pub(crate) fn check_separator(byte: u8) -> Result<(), ParseError> {
    if byte == b'T' || byte == b' ' {
        Ok(())
    } else {
        Err(ParseError::Grammar)
    }
}

/// Scalar equivalent of the vector range check: every byte must lie within
/// its position's bounds.
pub(crate) fn check_bounds(buf: &[u8], lower: &[u8], upper: &[u8]) -> Result<(), ParseError> {
    debug_assert_eq!(buf.len(), lower.len());
    for (byte, (lo, hi)) in buf.iter().zip(lower.iter().zip(upper)) {
        if byte < lo || byte > hi {
            return Err(ParseError::Grammar);
        }
    }
    Ok(())
}

/// Lifts the integer fields out of a bounds-validated 32-byte buffer. The
/// fraction, zero-padded to 9 digits, splits into milli/micro/nano triplets
/// composed as `1_000_000 * milli + 1_000 * micro + nano`.
pub(crate) fn extract_datetime(buf: &[u8; 32]) -> RawDateTime {
    let d = |i: usize| u32::from(buf[i] & 0x0F);
    let pair = |i: usize| d(i) * 10 + d(i + 1);
    let triplet = |i: usize| d(i) * 100 + d(i + 1) * 10 + d(i + 2);

    let milli = triplet(20);
    let micro = triplet(23);
    let nano = triplet(26);

    RawDateTime {
        year: (pair(0) * 100 + pair(2)) as u16,
        month: pair(5) as u8,
        day: pair(8) as u8,
        hour: pair(11) as u8,
        minute: pair(14) as u8,
        second: pair(17) as u8,
        nanosecond: 1_000_000 * milli + 1_000 * micro + nano,
    }
}
