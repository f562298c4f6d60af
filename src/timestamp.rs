//! Epoch timestamps with microsecond precision.
//!
//! An [`EpochTimestamp`] is a count of microseconds since the Unix epoch in
//! the proleptic Gregorian calendar, converted to and from civil fields with
//! Howard Hinnant's `days_from_civil` / `civil_from_days` algorithms. The
//! conversion is branch-light integer arithmetic and needs no time zone
//! database; an explicit offset in the input is subtracted during
//! normalization so the stored value is always UTC.

use crate::datetime::{CalendarDate, CivilDateTime, TimeZoneOffset};
use crate::error::ParseError;

/// Microseconds since `1970-01-01 00:00:00 UTC`, proleptic Gregorian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpochTimestamp {
    micros: i64,
}

impl EpochTimestamp {
    /// Sentinel for a value that cannot be represented, e.g. a year-9999
    /// date-time whose microsecond count would overflow.
    pub const UNDEFINED: Self = Self { micros: i64::MIN };

    pub const EPOCH: Self = Self { micros: 0 };

    pub const fn from_micros(micros: i64) -> Self {
        Self { micros }
    }

    /// Microseconds since the epoch, or `i64::MIN` if undefined.
    pub const fn as_micros(&self) -> i64 {
        self.micros
    }

    pub const fn is_defined(&self) -> bool {
        self.micros != i64::MIN
    }

    /// Parses the same grammar as [`CivilDateTime::parse`] and normalizes the
    /// civil fields to a UTC microsecond count. Sub-microsecond fraction
    /// digits are truncated. A string without an offset designator is taken
    /// as UTC.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        CivilDateTime::parse(input).map(Self::from_civil)
    }

    /// Converts civil fields to a timestamp. Out-of-calendar fields such as
    /// month 19 or day 39 are carried into the neighboring month or year
    /// rather than rejected, mirroring `timegm`-style normalization.
    pub fn from_civil(value: CivilDateTime) -> Self {
        let year = i64::from(value.date.year);
        let month = i64::from(value.date.month);
        let day = i64::from(value.date.day);

        // fold a month outside 1..=12 into the year
        let year = year + (month - 1).div_euclid(12);
        let month = (month - 1).rem_euclid(12) + 1;

        let days = days_from_civil(year, month, 1) + (day - 1);
        let offset_minutes = i64::from(value.offset.unwrap_or(TimeZoneOffset::UTC).minutes());
        let seconds = days * 86_400
            + i64::from(value.hour) * 3_600
            + i64::from(value.minute) * 60
            + i64::from(value.second)
            - offset_minutes * 60;

        match seconds
            .checked_mul(1_000_000)
            .and_then(|micros| micros.checked_add(i64::from(value.nanosecond / 1_000)))
        {
            Some(micros) => Self { micros },
            None => Self::UNDEFINED,
        }
    }

    /// The civil date-time in UTC, with `Some(TimeZoneOffset::UTC)` as the
    /// offset. An undefined timestamp yields an all-zero value.
    pub fn as_civil(&self) -> CivilDateTime {
        if !self.is_defined() {
            return CivilDateTime {
                date: CalendarDate::default(),
                hour: 0,
                minute: 0,
                second: 0,
                nanosecond: 0,
                offset: Some(TimeZoneOffset::UTC),
            };
        }

        let seconds = self.micros.div_euclid(1_000_000);
        let micro = self.micros.rem_euclid(1_000_000);
        let days = seconds.div_euclid(86_400);
        let of_day = seconds.rem_euclid(86_400);

        let (year, month, day) = civil_from_days(days);
        CivilDateTime {
            date: CalendarDate::new(year as i32, month as u8, day as u8),
            hour: (of_day / 3_600) as u8,
            minute: (of_day % 3_600 / 60) as u8,
            second: (of_day % 60) as u8,
            nanosecond: (micro * 1_000) as u32,
            offset: Some(TimeZoneOffset::UTC),
        }
    }

    /// The UTC calendar date this timestamp falls on.
    pub fn as_date(&self) -> CalendarDate {
        self.as_civil().date
    }
}

impl std::fmt::Display for EpochTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_defined() {
            return write!(f, "undefined");
        }
        let civil = self.as_civil();
        write!(
            f,
            "{} {:02}:{:02}:{:02}.{:06}Z",
            civil.date,
            civil.hour,
            civil.minute,
            civil.second,
            civil.nanosecond / 1_000
        )
    }
}

/// Days since the epoch for a civil date, negative before 1970-01-01.
/// Hinnant's algorithm over era/year-of-era/day-of-year; exact for the full
/// proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { year + 1 } else { year }, month, day)
}
