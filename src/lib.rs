//! Vectorized decoders for fixed-width text formats.
//!
//! Each decoder takes a byte slice holding exactly one value and either
//! returns the decoded value or an error naming what went wrong. On x86-64
//! hosts with AVX2 the hot path runs wide compares and multiply-add ladders
//! over the whole input at once; everywhere else a scalar path built on the
//! same validation tables accepts exactly the same strings.
//!
//! Supported formats:
//!
//! - decimal and hexadecimal `u64` ([`DecimalValue`], [`HexValue`])
//! - RFC3339 dates, date-times, and offsets ([`CalendarDate`],
//!   [`CivilDateTime`], [`TimeZoneOffset`])
//! - microsecond epoch timestamps ([`EpochTimestamp`])
//! - RFC4122 UUIDs in three text forms ([`Uuid`])
//! - unpadded Base64URL ([`base64url`])
//! - IPv4 and IPv6 addresses ([`Ipv4Address`], [`Ipv6Address`])
//!
//! ```
//! use microparse::{parse, CivilDateTime, Uuid};
//!
//! let when: CivilDateTime = parse(b"1984-10-24 23:59:59.123Z").unwrap();
//! assert_eq!(when.nanosecond, 123_000_000);
//!
//! let id: Uuid = parse(b"{f81d4fae-7dec-11d0-a765-00a0c91e6bf6}").unwrap();
//! assert_eq!(id.as_bytes()[0], 0xF8);
//! ```

#![forbid(unsafe_op_in_unsafe_fn)]

pub mod base64url;
mod datetime;
mod decimal;
mod error;
mod hexadecimal;
mod ipaddr;
mod parse;
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod simd;
mod timestamp;
mod uuid;

pub use datetime::{CalendarDate, CivilDateTime, TimeZoneOffset, month_from_abbreviation};
pub use decimal::DecimalValue;
pub use error::{ParseError, ParseFailure};
pub use hexadecimal::HexValue;
pub use ipaddr::{Ipv4Address, Ipv6Address};
pub use parse::{Base64Blob, Parse, parse};
pub use timestamp::EpochTimestamp;
pub use uuid::Uuid;
