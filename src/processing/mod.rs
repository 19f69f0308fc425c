//! Subnet compatibility analysis.
//!
//! This module contains the analyzer pipeline:
//! - [`grouping`] - Grouping by interface name and global /31 buckets
//! - [`classify`] - Per-group classification
//! - [`pairing`] - Point-to-point link pairing
//! - [`report`] - Summary and verdict

mod analyze;
pub mod classify;
pub mod grouping;
pub mod pairing;
mod report;

// Re-export public functions
pub use analyze::{analyze, analyze_with};
pub use classify::classify_group;
pub use grouping::{build_p2p_buckets, group_by_interface, InterfaceGroup, InterfaceGroups, P2pBuckets};
pub use pairing::{evaluate_links, PairingOutcome};
pub use report::{build_report, summarize};
