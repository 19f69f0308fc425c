//! Domain models for cluster subnet checking.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`InterfaceRecord`] - one interface address observed on one node
//! - [`AnalysisReport`] and friends - the analyzer output

mod ipv4;
mod record;
mod report;

// Re-export public types
pub use ipv4::{broadcast_addr, get_cidr_mask, network_address, Ipv4, MAX_LENGTH, P2P_LENGTH};
pub use record::{Endpoint, InterfaceRecord, LinkStatus, ResolvedRecord};
pub use report::{
    AnalysisReport, Classification, GroupAnomaly, GroupResult, PairingDetail, SkippedRecord,
    SubnetMembers, Summary,
};
