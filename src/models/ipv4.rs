//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 addresses with a prefix
//! length, and the network address calculation every record goes through.

use crate::error::{AnalysisError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Prefix length of a point-to-point link (RFC 3021).
pub const P2P_LENGTH: u8 = 31;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cluster_subnet_check::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        return Err(AnalysisError::InvalidCidr(format!(
            "prefix length /{len} is out of range 0..=32"
        )));
    }
    // Shifting a u32 by 32 overflows, /0 has to be handled on its own.
    if len == 0 {
        Ok(0)
    } else {
        Ok(u32::MAX << (MAX_LENGTH - len))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn network_address(addr: Ipv4Addr, len: u8) -> Result<Ipv4> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4 {
        addr: Ipv4Addr::from(u32::from(addr) & mask),
        mask: len,
    })
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.7/31").
    pub fn new(addr_cidr: &str) -> Result<Ipv4> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| AnalysisError::InvalidCidr(format!("missing prefix in '{addr_cidr}'")))?;
        let addr = Ipv4Addr::from_str(addr)
            .map_err(|_| AnalysisError::InvalidCidr(format!("invalid address '{addr}'")))?;
        let mask = u8::from_str(mask)
            .map_err(|_| AnalysisError::InvalidCidr(format!("invalid prefix length '{mask}'")))?;
        if mask > MAX_LENGTH {
            return Err(AnalysisError::InvalidCidr(format!(
                "prefix length /{mask} is out of range 0..=32"
            )));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// The network this address belongs to.
    pub fn network(&self) -> Result<Ipv4> {
        network_address(self.addr, self.mask)
    }

    /// Get the broadcast address for this subnet.
    pub fn broadcast(&self) -> Result<Ipv4Addr> {
        broadcast_addr(self.addr, self.mask)
    }

    /// True for a /31 point-to-point prefix.
    pub fn is_point_to_point(&self) -> bool {
        self.mask == P2P_LENGTH
    }
}

impl FromStr for Ipv4 {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
