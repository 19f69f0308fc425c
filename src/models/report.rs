//! Analysis report data model.

use super::{Endpoint, InterfaceRecord, Ipv4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict for one interface group.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All nodes share a single subnet.
    Compatible,
    /// Every /31 link has exactly two endpoints on distinct nodes.
    PointToPoint,
    Incompatible,
}

impl Classification {
    pub fn is_failure(&self) -> bool {
        *self == Classification::Incompatible
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Compatible => "compatible",
            Classification::PointToPoint => "point-to-point",
            Classification::Incompatible => "incompatible",
        };
        write!(f, "{s}")
    }
}

/// A network address and the nodes of a group assigned to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetMembers {
    pub subnet: Ipv4,
    /// Node names in input order. A node listed twice had two addresses here.
    pub nodes: Vec<String>,
}

/// Outcome of evaluating one /31 link.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairingDetail {
    /// Two endpoints on two nodes. `a` is the endpoint from the evaluated group.
    Linked {
        subnet: Ipv4,
        a: Endpoint,
        b: Endpoint,
        cross_interface: bool,
    },
    /// Far end missing from the collected data.
    Unpaired { subnet: Ipv4, endpoint: Endpoint },
    /// Both addresses of the /31 are on the same node.
    SameNode {
        subnet: Ipv4,
        node: String,
        endpoints: Vec<Endpoint>,
    },
    /// More than two endpoints claim the /31.
    Overpopulated {
        subnet: Ipv4,
        endpoint_count: usize,
        endpoints: Vec<Endpoint>,
    },
}

impl PairingDetail {
    pub fn subnet(&self) -> Ipv4 {
        match self {
            PairingDetail::Linked { subnet, .. }
            | PairingDetail::Unpaired { subnet, .. }
            | PairingDetail::SameNode { subnet, .. }
            | PairingDetail::Overpopulated { subnet, .. } => *subnet,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, PairingDetail::Linked { .. })
    }
}

/// Data-quality findings that do not fit the pairing model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupAnomaly {
    /// /31 and non-/31 prefixes share one interface name.
    MixedPrefixGroup { prefix_lengths: Vec<u8> },
}

/// Classification result for one interface name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupResult {
    pub interface_name: String,
    pub classification: Classification,
    /// Distinct subnets in first-seen order.
    pub subnets: Vec<SubnetMembers>,
    /// Number of UP records in the group.
    pub node_count: usize,
    /// Only filled for point-to-point evaluation.
    pub pairing_details: Vec<PairingDetail>,
    pub valid_pairs: usize,
    pub invalid_pairs: usize,
    pub anomalies: Vec<GroupAnomaly>,
}

/// Counters across all groups.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_groups: usize,
    /// Shared-subnet groups that passed.
    pub compatible_groups: usize,
    pub p2p_groups: usize,
    pub failed_groups: usize,
}

/// A record the analyzer could not use.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub record: InterfaceRecord,
    pub reason: String,
}

/// Full result of one analysis run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub groups: Vec<GroupResult>,
    pub summary: Summary,
    pub passed: bool,
    /// Records excluded because the link was not UP.
    pub down_records: Vec<InterfaceRecord>,
    /// Records excluded because their address or prefix was invalid.
    pub skipped_records: Vec<SkippedRecord>,
}

impl AnalysisReport {
    /// Look up the result for an interface name.
    pub fn group(&self, interface_name: &str) -> Option<&GroupResult> {
        self.groups
            .iter()
            .find(|g| g.interface_name == interface_name)
    }

    /// Groups that did not pass.
    pub fn failed(&self) -> impl Iterator<Item = &GroupResult> {
        self.groups.iter().filter(|g| g.classification.is_failure())
    }
}
