//! IPv4 and IPv6 address decoding.
//!
//! Address grammar (dotted quads, hex groups, `::` elision, IPv4-mapped
//! tails) is delegated to the standard library's parsers; this module adds
//! the byte-slice front end, length guards sized to the textual maxima, and
//! the fixed-size octet representations the rest of the crate uses.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::ParseError;

/// Longest IPv4 text form plus terminator, `255.255.255.255`.
const IPV4_ADDRSTRLEN: usize = 16;

/// Longest IPv6 text form plus terminator, an IPv4-mapped address with every
/// group spelled out.
const IPV6_ADDRSTRLEN: usize = 46;

/// An IPv4 address as four network-order octets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4Address(pub [u8; 4]);

impl Ipv4Address {
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        if input.len() >= IPV4_ADDRSTRLEN {
            return Err(ParseError::Length);
        }
        let text = std::str::from_utf8(input).map_err(|_| ParseError::Grammar)?;
        let addr = Ipv4Addr::from_str(text).map_err(|_| ParseError::Grammar)?;
        Ok(Self(addr.octets()))
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl std::fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ipv4Addr::from(self.0).fmt(f)
    }
}

/// An IPv6 address as sixteen network-order octets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv6Address(pub [u8; 16]);

impl Ipv6Address {
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        if input.len() >= IPV6_ADDRSTRLEN {
            return Err(ParseError::Length);
        }
        let text = std::str::from_utf8(input).map_err(|_| ParseError::Grammar)?;
        let addr = Ipv6Addr::from_str(text).map_err(|_| ParseError::Grammar)?;
        Ok(Self(addr.octets()))
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Self {
        Ipv6Addr::from(addr.0)
    }
}

impl std::fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ipv6Addr::from(self.0).fmt(f)
    }
}
