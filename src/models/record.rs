//! Interface record data model.

use super::Ipv4;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Operational state of an interface as reported by the host.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkStatus {
    Up,
    Down,
}

impl LinkStatus {
    /// Map an `ip link` operstate to a status. Anything but `UP` counts as down.
    pub fn from_operstate(state: &str) -> LinkStatus {
        if state.eq_ignore_ascii_case("up") {
            LinkStatus::Up
        } else {
            LinkStatus::Down
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Up => write!(f, "UP"),
            LinkStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// One observation of one interface address on one node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Short host name (no domain).
    pub node: String,
    /// Interface name, e.g. `100g1` or `backplane`.
    pub interface: String,
    /// Link state at collection time.
    pub status: LinkStatus,
    /// Host address assigned to the interface.
    pub address: Ipv4Addr,
    /// Prefix length of the assignment. Not range checked until analysis.
    pub prefix_len: u8,
}

impl InterfaceRecord {
    /// Build a record from a CIDR string such as `10.100.0.7/31`.
    pub fn from_cidr(
        node: impl Into<String>,
        interface: impl Into<String>,
        status: LinkStatus,
        cidr: &str,
    ) -> Result<InterfaceRecord> {
        let ip = Ipv4::new(cidr)?;
        Ok(InterfaceRecord {
            node: node.into(),
            interface: interface.into(),
            status,
            address: ip.addr,
            prefix_len: ip.mask,
        })
    }

    /// True when the interface was UP.
    pub fn is_up(&self) -> bool {
        self.status == LinkStatus::Up
    }

    /// Address and prefix as an [`Ipv4`] value.
    pub fn cidr(&self) -> Ipv4 {
        Ipv4 {
            addr: self.address,
            mask: self.prefix_len,
        }
    }
}

impl fmt::Display for InterfaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {}/{}",
            self.node, self.interface, self.status, self.address, self.prefix_len
        )
    }
}

/// A record whose network address has been computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub node: String,
    pub interface: String,
    pub status: LinkStatus,
    /// Host address with prefix.
    pub address: Ipv4,
    /// `address & mask(prefix)`.
    pub network: Ipv4,
}

impl ResolvedRecord {
    /// Compute the network address, failing with `InvalidCidr` on a bad prefix.
    pub fn resolve(record: &InterfaceRecord) -> Result<ResolvedRecord> {
        let address = record.cidr();
        let network = address.network()?;
        Ok(ResolvedRecord {
            node: record.node.clone(),
            interface: record.interface.clone(),
            status: record.status,
            address,
            network,
        })
    }

    pub fn is_up(&self) -> bool {
        self.status == LinkStatus::Up
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            node: self.node.clone(),
            interface: self.interface.clone(),
            address: self.address,
        }
    }
}

/// One end of a point-to-point link.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub node: String,
    pub interface: String,
    pub address: Ipv4,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} ({})", self.node, self.interface, self.address.addr)
    }
}
