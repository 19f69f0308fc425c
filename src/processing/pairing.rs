//! Point-to-point /31 link pairing.
//!
//! Each distinct /31 of a group is looked up in the global [`P2pBuckets`], so a
//! link between `node1.100g4` and `node2.100g1` is found from either side.

use super::grouping::P2pBuckets;
use crate::models::{Endpoint, PairingDetail, ResolvedRecord};
use colored::Colorize;
use itertools::Itertools;

/// Pairing results for one interface group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PairingOutcome {
    pub details: Vec<PairingDetail>,
    pub valid_pairs: usize,
    pub invalid_pairs: usize,
}

/// Evaluate every distinct /31 among `records` once.
pub fn evaluate_links(
    interface_name: &str,
    records: &[ResolvedRecord],
    buckets: &P2pBuckets,
) -> PairingOutcome {
    let mut outcome = PairingOutcome::default();

    for local in records.iter().unique_by(|r| r.network) {
        let detail = evaluate_link(local, buckets.get(&local.network));
        log_detail(interface_name, &detail);
        if detail.is_valid() {
            outcome.valid_pairs += 1;
        } else {
            outcome.invalid_pairs += 1;
        }
        outcome.details.push(detail);
    }

    outcome
}

/// Classify one /31 bucket as seen from `local`.
pub fn evaluate_link(local: &ResolvedRecord, bucket: &[Endpoint]) -> PairingDetail {
    let subnet = local.network;
    match bucket {
        [single] => PairingDetail::Unpaired {
            subnet,
            endpoint: single.clone(),
        },
        [first, second] => {
            // Report the evaluated group's own endpoint as `a`.
            let (a, b) = if is_local(local, second) && !is_local(local, first) {
                (second, first)
            } else {
                (first, second)
            };
            if a.node == b.node {
                PairingDetail::SameNode {
                    subnet,
                    node: a.node.clone(),
                    endpoints: bucket.to_vec(),
                }
            } else {
                PairingDetail::Linked {
                    subnet,
                    a: a.clone(),
                    b: b.clone(),
                    cross_interface: a.interface != b.interface,
                }
            }
        }
        _ => PairingDetail::Overpopulated {
            subnet,
            endpoint_count: bucket.len(),
            endpoints: bucket.to_vec(),
        },
    }
}

fn is_local(local: &ResolvedRecord, endpoint: &Endpoint) -> bool {
    endpoint.node == local.node
        && endpoint.interface == local.interface
        && endpoint.address == local.address
}

fn log_detail(interface_name: &str, detail: &PairingDetail) {
    match detail {
        PairingDetail::Linked {
            subnet,
            a,
            b,
            cross_interface: false,
        } => log::debug!("{interface_name}: {subnet} {a} <-> {b}"),
        PairingDetail::Linked {
            subnet,
            a,
            b,
            cross_interface: true,
        } => log::warn!(
            "{interface_name}: {subnet} cross-interface link {a} <-> {b}",
            subnet = subnet.to_string().yellow()
        ),
        PairingDetail::Unpaired { subnet, endpoint } => log::warn!(
            "{interface_name}: {subnet} {unpaired} {endpoint}, far end not found",
            unpaired = "unpaired".on_red()
        ),
        PairingDetail::SameNode { subnet, node, .. } => log::warn!(
            "{interface_name}: {subnet} both ends on node {node}",
            subnet = subnet.to_string().red()
        ),
        PairingDetail::Overpopulated {
            subnet,
            endpoint_count,
            endpoints,
        } => log::warn!(
            "{interface_name}: {subnet} has {endpoint_count} endpoints, expected 2: {}",
            endpoints.iter().join(", "),
            subnet = subnet.to_string().red()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InterfaceRecord, LinkStatus};
    use crate::processing::grouping::build_p2p_buckets;

    fn rec(node: &str, iface: &str, cidr: &str) -> ResolvedRecord {
        let r = InterfaceRecord::from_cidr(node, iface, LinkStatus::Up, cidr).unwrap();
        ResolvedRecord::resolve(&r).unwrap()
    }

    fn only(records: &[ResolvedRecord], iface: &str) -> Vec<ResolvedRecord> {
        records
            .iter()
            .filter(|r| r.interface == iface)
            .cloned()
            .collect()
    }

    #[test]
    fn test_same_name_pair_evaluated_once() {
        let all = vec![
            rec("nvme1", "100g1", "10.100.0.7/31"),
            rec("gw1", "100g1", "10.100.0.6/31"),
        ];
        let buckets = build_p2p_buckets(&all);
        let outcome = evaluate_links("100g1", &all, &buckets);
        assert_eq!(outcome.valid_pairs, 1);
        assert_eq!(outcome.invalid_pairs, 0);
        match &outcome.details[0] {
            PairingDetail::Linked {
                a,
                b,
                cross_interface,
                ..
            } => {
                assert_eq!(a.node, "nvme1");
                assert_eq!(b.node, "gw1");
                assert!(!*cross_interface);
            }
            other => panic!("expected a link, got {other:?}"),
        }
    }

    #[test]
    fn test_cross_interface_pair_local_endpoint_first() {
        let all = vec![
            rec("nvme1", "100g1", "10.100.0.7/31"),
            rec("gw1", "100g4", "10.100.0.6/31"),
        ];
        let buckets = build_p2p_buckets(&all);
        let outcome = evaluate_links("100g4", &only(&all, "100g4"), &buckets);
        assert_eq!(outcome.valid_pairs, 1);
        match &outcome.details[0] {
            PairingDetail::Linked {
                subnet,
                a,
                b,
                cross_interface,
            } => {
                assert_eq!(subnet.to_string(), "10.100.0.6/31");
                assert_eq!(a.node, "gw1");
                assert_eq!(b.interface, "100g1");
                assert!(*cross_interface);
            }
            other => panic!("expected a link, got {other:?}"),
        }
    }

    #[test]
    fn test_unpaired() {
        let all = vec![rec("nvme1", "100g1", "10.100.0.7/31")];
        let buckets = build_p2p_buckets(&all);
        let outcome = evaluate_links("100g1", &all, &buckets);
        assert_eq!(outcome.valid_pairs, 0);
        assert_eq!(outcome.invalid_pairs, 1);
        assert!(matches!(
            &outcome.details[0],
            PairingDetail::Unpaired { endpoint, .. } if endpoint.node == "nvme1"
        ));
    }

    #[test]
    fn test_overpopulated() {
        let all = vec![
            rec("a", "100g1", "10.100.0.6/31"),
            rec("b", "100g1", "10.100.0.7/31"),
            rec("c", "100g2", "10.100.0.7/31"),
        ];
        let buckets = build_p2p_buckets(&all);
        let outcome = evaluate_links("100g1", &only(&all, "100g1"), &buckets);
        assert_eq!(outcome.invalid_pairs, 1);
        assert_eq!(outcome.details.len(), 1);
        assert!(matches!(
            outcome.details[0],
            PairingDetail::Overpopulated {
                endpoint_count: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_same_node_is_invalid() {
        let all = vec![
            rec("gw1", "100g1", "10.100.0.6/31"),
            rec("gw1", "100g2", "10.100.0.7/31"),
        ];
        let buckets = build_p2p_buckets(&all);
        let outcome = evaluate_links("100g1", &only(&all, "100g1"), &buckets);
        assert_eq!(outcome.invalid_pairs, 1);
        assert!(matches!(
            &outcome.details[0],
            PairingDetail::SameNode { node, .. } if node == "gw1"
        ));
    }
}
