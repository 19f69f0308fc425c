//! CSV output formatting for analysis results.

use crate::models::{AnalysisReport, GroupResult, PairingDetail};
use itertools::Itertools;

use super::terminal::format_field;

/// Render the report as CSV, one row per subnet or /31 link.
pub fn render_csv(report: &AnalysisReport) -> String {
    let mut rows = vec![format!(
        r#"{interface},{classification},{subnet},{nodes},{detail}"#,
        interface = format_field("interface", 12),
        classification = format_field("classification", 16),
        subnet = format_field("subnet", 18),
        nodes = format_field("nodes", 24),
        detail = format_field("detail", 16),
    )];

    for group in &report.groups {
        rows.extend(group_rows(group));
    }
    rows.join("\n")
}

fn group_rows(group: &GroupResult) -> Vec<String> {
    if group.pairing_details.is_empty() {
        group
            .subnets
            .iter()
            .map(|members| {
                let detail = if group.anomalies.is_empty() { "" } else { "mixed_prefix" };
                csv_row(
                    group,
                    &members.subnet.to_string(),
                    &members.nodes.join(","),
                    detail,
                )
            })
            .collect()
    } else {
        group
            .pairing_details
            .iter()
            .map(|detail| {
                let subnet = detail.subnet().to_string();
                match detail {
                    PairingDetail::Linked {
                        a,
                        b,
                        cross_interface,
                        ..
                    } => {
                        let kind = if *cross_interface { "cross_interface" } else { "linked" };
                        let nodes = format!("{}.{},{}.{}", a.node, a.interface, b.node, b.interface);
                        csv_row(group, &subnet, &nodes, kind)
                    }
                    PairingDetail::Unpaired { endpoint, .. } => csv_row(
                        group,
                        &subnet,
                        &format!("{}.{}", endpoint.node, endpoint.interface),
                        "unpaired",
                    ),
                    PairingDetail::SameNode { endpoints, .. } => {
                        csv_row(group, &subnet, &endpoint_list(endpoints), "same_node")
                    }
                    PairingDetail::Overpopulated { endpoints, .. } => {
                        csv_row(group, &subnet, &endpoint_list(endpoints), "overpopulated")
                    }
                }
            })
            .collect()
    }
}

fn endpoint_list(endpoints: &[crate::models::Endpoint]) -> String {
    endpoints
        .iter()
        .map(|e| format!("{}.{}", e.node, e.interface))
        .join(",")
}

fn csv_row(group: &GroupResult, subnet: &str, nodes: &str, detail: &str) -> String {
    format!(
        r#"{interface},{classification},{subnet},{nodes},{detail}"#,
        interface = format_field(escape_csv_field(&group.interface_name), 12),
        classification = format_field(group.classification, 16),
        subnet = format_field(subnet, 18),
        nodes = format_field(escape_csv_field(nodes), 24),
        detail = format_field(detail, 16),
    )
}

/// Double embedded quotes, the field itself is always quoted by `format_field`.
fn escape_csv_field(input: &str) -> String {
    input.replace('"', "\"\"")
}
