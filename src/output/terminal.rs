//! Terminal output.
//!
//! Renders the report as human-readable text, one block per interface group.

use crate::models::{
    AnalysisReport, Classification, GroupAnomaly, GroupResult, PairingDetail,
};
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render the full report as text.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    for group in &report.groups {
        lines.extend(render_group(group));
    }

    if !report.down_records.is_empty() {
        lines.push(format!(
            "{} {} records not UP, excluded: {}",
            "NOTE".yellow(),
            report.down_records.len(),
            report
                .down_records
                .iter()
                .map(|r| format!("{}:{}", r.node, r.interface))
                .join(", ")
        ));
    }
    for skipped in &report.skipped_records {
        lines.push(format!(
            "{} skipped {}: {}",
            "NOTE".yellow(),
            skipped.record,
            skipped.reason
        ));
    }

    let s = &report.summary;
    lines.push(String::new());
    lines.push(format!(
        "Summary: {} interface groups, {} shared, {} point-to-point, {} failed",
        s.total_groups, s.compatible_groups, s.p2p_groups, s.failed_groups
    ));
    lines.push(if report.passed {
        format!("RESULT: {}", "PASS".green())
    } else {
        format!(
            "RESULT: {} ({} incompatible groups)",
            "FAIL".on_red(),
            s.failed_groups
        )
    });

    lines.join("\n")
}

fn render_group(group: &GroupResult) -> Vec<String> {
    let mut lines = Vec::new();
    let name = &group.interface_name;

    match group.classification {
        Classification::Compatible => {
            let subnet = group.subnets[0].subnet;
            let broadcast = subnet
                .broadcast()
                .map(|b| format!(", broadcast {b}"))
                .unwrap_or_default();
            lines.push(format!(
                "{ok} {name}: compatible, {} nodes on {subnet}{broadcast}",
                group.node_count,
                ok = "[OK]".green()
            ));
        }
        Classification::PointToPoint => lines.push(format!(
            "{ok} {name}: point-to-point, {} valid /31 links",
            group.valid_pairs,
            ok = "[OK]".green()
        )),
        Classification::Incompatible => {
            let header = if group.pairing_details.is_empty() {
                format!("{} distinct subnets", group.subnets.len())
            } else {
                format!(
                    "{} valid, {} invalid /31 links",
                    group.valid_pairs, group.invalid_pairs
                )
            };
            lines.push(format!(
                "{fail} {name}: incompatible, {header}",
                fail = "[FAIL]".on_red()
            ));
        }
    }

    for anomaly in &group.anomalies {
        match anomaly {
            GroupAnomaly::MixedPrefixGroup { prefix_lengths } => lines.push(format!(
                "    mixed prefix lengths {} on one interface name",
                prefix_lengths.iter().map(|p| format!("/{p}")).join(" ")
            )),
        }
    }

    if group.pairing_details.is_empty() {
        if group.classification == Classification::Incompatible {
            for members in &group.subnets {
                lines.push(format!(
                    "    {:<18} {}",
                    members.subnet.to_string(),
                    members.nodes.join(", ")
                ));
            }
        }
    } else {
        for detail in &group.pairing_details {
            lines.push(format!("    {}", render_pairing(detail)));
        }
    }

    lines
}

/// One line describing a /31 link.
pub fn render_pairing(detail: &PairingDetail) -> String {
    match detail {
        PairingDetail::Linked {
            subnet,
            a,
            b,
            cross_interface,
        } => {
            let cross = if *cross_interface {
                format!(" {}", "[cross-interface]".yellow())
            } else {
                String::new()
            };
            format!("{:<18} {a} <-> {b}{cross}", subnet.to_string())
        }
        PairingDetail::Unpaired { subnet, endpoint } => {
            format!("{:<18} {endpoint} unpaired, far end missing", subnet.to_string())
        }
        PairingDetail::SameNode {
            subnet,
            node,
            endpoints,
        } => format!(
            "{:<18} both ends on {node}: {}",
            subnet.to_string(),
            endpoints.iter().join(", ")
        ),
        PairingDetail::Overpopulated {
            subnet,
            endpoint_count,
            endpoints,
        } => format!(
            "{:<18} {endpoint_count} endpoints on a /31: {}",
            subnet.to_string(),
            endpoints.iter().join(", ")
        ),
    }
}
