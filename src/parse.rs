//! The generic parsing front door.
//!
//! Every decoder type implements [`Parse`]; the free function [`parse`]
//! dispatches on the requested type and upgrades a bare [`ParseError`] into a
//! [`ParseFailure`] that names the expected type and quotes the offending
//! input. `FromStr` impls ride on top so decoder types work with `str::parse`.

use crate::base64url;
use crate::datetime::{CalendarDate, CivilDateTime, TimeZoneOffset};
use crate::decimal::DecimalValue;
use crate::error::{ParseError, ParseFailure};
use crate::hexadecimal::HexValue;
use crate::ipaddr::{Ipv4Address, Ipv6Address};
use crate::timestamp::EpochTimestamp;
use crate::uuid::Uuid;

/// A value decodable from a byte slice.
pub trait Parse: Sized {
    /// Human-readable type name used in diagnostics.
    const NAME: &'static str;

    fn parse(input: &[u8]) -> Result<Self, ParseError>;
}

/// Decodes a value of type `T`, attaching the expected type name and an
/// input snippet to any failure.
pub fn parse<T: Parse>(input: &[u8]) -> Result<T, ParseFailure> {
    T::parse(input).map_err(|kind| ParseFailure::new(T::NAME, kind, input))
}

macro_rules! impl_parse {
    ($type:ty, $name:literal) => {
        impl Parse for $type {
            const NAME: &'static str = $name;

            fn parse(input: &[u8]) -> Result<Self, ParseError> {
                <$type>::parse(input)
            }
        }

        impl std::str::FromStr for $type {
            type Err = ParseFailure;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse(s.as_bytes())
            }
        }
    };
}

impl_parse!(DecimalValue, "decimal integer");
impl_parse!(HexValue, "hexadecimal integer");
impl_parse!(CalendarDate, "date");
impl_parse!(TimeZoneOffset, "time zone offset");
impl_parse!(CivilDateTime, "date-time");
impl_parse!(EpochTimestamp, "timestamp with microsecond precision");
impl_parse!(Uuid, "UUID");
impl_parse!(Ipv4Address, "IPv4 address");
impl_parse!(Ipv6Address, "IPv6 address");

/// Decoded Base64URL bytes, as returned by the generic front door.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base64Blob(pub Vec<u8>);

impl Parse for Base64Blob {
    const NAME: &'static str = "base64url-encoded string";

    fn parse(input: &[u8]) -> Result<Self, ParseError> {
        base64url::decode(input).map(Self)
    }
}

impl std::str::FromStr for Base64Blob {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}

impl std::fmt::Display for Base64Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&base64url::encode(&self.0))
    }
}
