//! Interface group classification.
//!
//! Decision order for one group:
//! 1. /31 mixed with other prefixes: incompatible, flagged as an anomaly.
//! 2. all /31: point-to-point pairing against the global buckets.
//! 3. one distinct subnet: compatible shared network.
//! 4. anything else: incompatible.

use super::grouping::{InterfaceGroup, P2pBuckets};
use super::pairing::evaluate_links;
use crate::models::{
    Classification, GroupAnomaly, GroupResult, ResolvedRecord, SubnetMembers, P2P_LENGTH,
};
use colored::Colorize;
use itertools::Itertools;

/// Classify one interface group.
pub fn classify_group(group: &InterfaceGroup, buckets: &P2pBuckets) -> GroupResult {
    let name = group.name.as_str();
    let records = group.records.as_slice();
    let subnets = subnet_members(records);
    let prefix_lengths: Vec<u8> = records
        .iter()
        .map(|r| r.address.mask)
        .unique()
        .sorted()
        .collect();

    let mut result = GroupResult {
        interface_name: name.to_string(),
        classification: Classification::Incompatible,
        subnets,
        node_count: records.len(),
        pairing_details: Vec::new(),
        valid_pairs: 0,
        invalid_pairs: 0,
        anomalies: Vec::new(),
    };

    let has_p2p = prefix_lengths.contains(&P2P_LENGTH);
    if has_p2p && prefix_lengths.len() > 1 {
        log::error!(
            "{name}: {mixed} prefix lengths {prefix_lengths:?}, /31 and shared addressing on one interface name",
            mixed = "mixed".on_red()
        );
        result.anomalies.push(GroupAnomaly::MixedPrefixGroup { prefix_lengths });
        return result;
    }

    if has_p2p {
        let outcome = evaluate_links(name, records, buckets);
        result.classification = if outcome.invalid_pairs == 0 {
            Classification::PointToPoint
        } else {
            Classification::Incompatible
        };
        log::info!(
            "{name}: {verdict} {valid} valid, {invalid} invalid /31 links",
            verdict = verdict_label(result.classification),
            valid = outcome.valid_pairs,
            invalid = outcome.invalid_pairs
        );
        result.pairing_details = outcome.details;
        result.valid_pairs = outcome.valid_pairs;
        result.invalid_pairs = outcome.invalid_pairs;
        return result;
    }

    if let [shared] = result.subnets.as_slice() {
        log::info!(
            "{name}: {verdict} {} nodes on {}",
            records.len(),
            shared.subnet,
            verdict = verdict_label(Classification::Compatible)
        );
        result.classification = Classification::Compatible;
    } else {
        log::error!(
            "{name}: {verdict} {} distinct subnets: {}",
            result.subnets.len(),
            result
                .subnets
                .iter()
                .map(|s| format!("{} [{}]", s.subnet, s.nodes.join(", ")))
                .join("; "),
            verdict = verdict_label(Classification::Incompatible)
        );
    }
    result
}

/// Distinct networks of `records` in first-seen order, each with its nodes.
pub fn subnet_members(records: &[ResolvedRecord]) -> Vec<SubnetMembers> {
    let mut members: Vec<SubnetMembers> = Vec::new();
    for record in records {
        match members.iter_mut().find(|m| m.subnet == record.network) {
            Some(m) => m.nodes.push(record.node.clone()),
            None => members.push(SubnetMembers {
                subnet: record.network,
                nodes: vec![record.node.clone()],
            }),
        }
    }
    members
}

fn verdict_label(classification: Classification) -> colored::ColoredString {
    match classification {
        Classification::Compatible | Classification::PointToPoint => {
            classification.to_string().green()
        }
        Classification::Incompatible => classification.to_string().on_red(),
    }
}
