//! IPv4 address and mask value types used by the native DHCP API.
//!
//! The native API carries addresses as a `DHCP_IP_ADDRESS`, a 32-bit integer
//! whose most significant byte is the first octet (`192.168.1.1` is
//! `0xC0A80101`). In memory that integer sits in the platform's native byte
//! order, so the octets are reversed on little-endian hosts. These types keep
//! the integer verbatim and convert only at the edges.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::helpers::parse_byte_from_substring;

/// Parses a dotted-quad string into its four octets.
fn parse_octets(s: &str) -> Result<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut count = 0;
    let mut start = 0;

    for segment in s.split('.') {
        if count == octets.len() {
            return Err(Error::InvalidAddress(s.to_string()));
        }
        octets[count] = parse_byte_from_substring(s, start, segment.len())
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;
        count += 1;
        start += segment.len() + 1;
    }

    if count != octets.len() {
        return Err(Error::InvalidAddress(s.to_string()));
    }

    Ok(octets)
}

/// An IPv4 address as exchanged with the native DHCP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DhcpIpAddress(u32);

impl DhcpIpAddress {
    /// Wraps a native `DHCP_IP_ADDRESS` integer.
    pub const fn from_native(native: u32) -> Self {
        Self(native)
    }

    /// The native `DHCP_IP_ADDRESS` integer.
    pub const fn native(self) -> u32 {
        self.0
    }

    /// Reads the address from its in-memory native representation.
    pub const fn from_native_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_ne_bytes(bytes))
    }

    /// The in-memory native representation of the address.
    pub const fn to_native_bytes(self) -> [u8; 4] {
        self.0.to_ne_bytes()
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub const fn to_ipv4(self) -> Ipv4Addr {
        let [a, b, c, d] = self.octets();
        Ipv4Addr::new(a, b, c, d)
    }
}

impl From<Ipv4Addr> for DhcpIpAddress {
    fn from(address: Ipv4Addr) -> Self {
        Self(u32::from(address))
    }
}

impl From<DhcpIpAddress> for Ipv4Addr {
    fn from(address: DhcpIpAddress) -> Self {
        address.to_ipv4()
    }
}

impl fmt::Display for DhcpIpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_ipv4(), f)
    }
}

impl FromStr for DhcpIpAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_octets(s).map(|octets| Self(u32::from_be_bytes(octets)))
    }
}

/// An IPv4 subnet mask as exchanged with the native DHCP API.
///
/// Same native representation as [`DhcpIpAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DhcpIpMask(u32);

impl DhcpIpMask {
    /// Wraps a native `DHCP_IP_MASK` integer.
    pub const fn from_native(native: u32) -> Self {
        Self(native)
    }

    /// The native `DHCP_IP_MASK` integer.
    pub const fn native(self) -> u32 {
        self.0
    }

    pub const fn from_native_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_ne_bytes(bytes))
    }

    pub const fn to_native_bytes(self) -> [u8; 4] {
        self.0.to_ne_bytes()
    }

    /// Builds a contiguous mask with `bits` leading ones. Values above 32
    /// saturate to `255.255.255.255`.
    pub const fn from_significant_bits(bits: u8) -> Self {
        if bits == 0 {
            Self(0)
        } else if bits >= 32 {
            Self(u32::MAX)
        } else {
            Self(u32::MAX << (32 - bits as u32))
        }
    }

    /// Number of leading one bits (the prefix length for contiguous masks).
    pub const fn significant_bits(self) -> u8 {
        self.0.leading_ones() as u8
    }

    /// True when every one bit precedes every zero bit.
    pub const fn is_contiguous(self) -> bool {
        self.0.leading_ones() + self.0.trailing_zeros() == 32
    }

    pub const fn to_ipv4(self) -> Ipv4Addr {
        let [a, b, c, d] = self.0.to_be_bytes();
        Ipv4Addr::new(a, b, c, d)
    }
}

impl From<Ipv4Addr> for DhcpIpMask {
    fn from(mask: Ipv4Addr) -> Self {
        Self(u32::from(mask))
    }
}

impl From<DhcpIpMask> for Ipv4Addr {
    fn from(mask: DhcpIpMask) -> Self {
        mask.to_ipv4()
    }
}

impl fmt::Display for DhcpIpMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_ipv4(), f)
    }
}

impl FromStr for DhcpIpMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_octets(s).map(|octets| Self(u32::from_be_bytes(octets)))
    }
}
