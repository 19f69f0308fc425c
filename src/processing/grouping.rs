//! Partitioning of records by interface name and by /31 network.

use crate::models::{Endpoint, Ipv4, ResolvedRecord};
use std::collections::HashMap;

/// All UP records sharing one interface name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceGroup {
    pub name: String,
    /// Records in input order.
    pub records: Vec<ResolvedRecord>,
}

/// Interface groups in order of first appearance.
#[derive(Debug, Default)]
pub struct InterfaceGroups {
    groups: Vec<InterfaceGroup>,
    index: HashMap<String, usize>,
}

impl InterfaceGroups {
    pub fn new() -> InterfaceGroups {
        Default::default()
    }

    /// Append a record to its group, creating the group on first sight.
    pub fn add_record(&mut self, record: &ResolvedRecord) {
        match self.index.get(&record.interface) {
            Some(&i) => self.groups[i].records.push(record.clone()),
            None => {
                self.index
                    .insert(record.interface.clone(), self.groups.len());
                self.groups.push(InterfaceGroup {
                    name: record.interface.clone(),
                    records: vec![record.clone()],
                });
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&InterfaceGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    pub fn as_slice(&self) -> &[InterfaceGroup] {
        &self.groups
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }
}

/// Group UP records by interface name, keeping input order.
pub fn group_by_interface(records: &[ResolvedRecord]) -> InterfaceGroups {
    let mut groups = InterfaceGroups::new();
    for record in records.iter().filter(|r| r.is_up()) {
        groups.add_record(record);
    }
    log::debug!(
        "Grouped {} records into {} interface groups",
        records.len(),
        groups.len()
    );
    groups
}

/// Endpoints of every /31 network in the cluster, regardless of interface name.
#[derive(Debug, Default)]
pub struct P2pBuckets {
    buckets: HashMap<Ipv4, Vec<Endpoint>>,
}

impl P2pBuckets {
    /// Endpoints sharing `subnet`; empty when nothing landed there.
    pub fn get(&self, subnet: &Ipv4) -> &[Endpoint] {
        self.buckets
            .get(subnet)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }
}

/// Build the global /31 bucket map.
///
/// Must be complete before any group is paired, lookups cross interface names.
pub fn build_p2p_buckets(records: &[ResolvedRecord]) -> P2pBuckets {
    let mut buckets: HashMap<Ipv4, Vec<Endpoint>> = HashMap::new();
    for record in records
        .iter()
        .filter(|r| r.is_up() && r.network.is_point_to_point())
    {
        buckets
            .entry(record.network)
            .or_default()
            .push(record.endpoint());
    }
    let buckets = P2pBuckets { buckets };
    log::debug!("Built {} point-to-point buckets", buckets.len());
    buckets
}
