//! Aggregation of group results into the final report.

use crate::models::{
    AnalysisReport, Classification, GroupResult, InterfaceRecord, SkippedRecord, Summary,
};

/// Count groups per classification.
pub fn summarize(groups: &[GroupResult]) -> Summary {
    groups.iter().fold(
        Summary {
            total_groups: groups.len(),
            ..Default::default()
        },
        |mut summary, group| {
            match group.classification {
                Classification::Compatible => summary.compatible_groups += 1,
                Classification::PointToPoint => summary.p2p_groups += 1,
                Classification::Incompatible => summary.failed_groups += 1,
            }
            summary
        },
    )
}

/// Assemble the report, `passed` is set when no group failed.
pub fn build_report(
    groups: Vec<GroupResult>,
    down_records: Vec<InterfaceRecord>,
    skipped_records: Vec<SkippedRecord>,
) -> AnalysisReport {
    let summary = summarize(&groups);
    let passed = summary.failed_groups == 0;
    if passed {
        log::info!(
            "PASS: {} interface groups ({} shared, {} point-to-point)",
            summary.total_groups,
            summary.compatible_groups,
            summary.p2p_groups
        );
    } else {
        log::warn!(
            "FAIL: {} of {} interface groups incompatible",
            summary.failed_groups,
            summary.total_groups
        );
    }
    AnalysisReport {
        groups,
        summary,
        passed,
        down_records,
        skipped_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, classification: Classification) -> GroupResult {
        GroupResult {
            interface_name: name.to_string(),
            classification,
            subnets: vec![],
            node_count: 2,
            pairing_details: vec![],
            valid_pairs: 0,
            invalid_pairs: 0,
            anomalies: vec![],
        }
    }

    #[test]
    fn test_summarize() {
        let groups = vec![
            group("mgmt", Classification::Compatible),
            group("100g1", Classification::PointToPoint),
            group("100g2", Classification::PointToPoint),
            group("ib0", Classification::Incompatible),
        ];
        let summary = summarize(&groups);
        assert_eq!(
            summary,
            Summary {
                total_groups: 4,
                compatible_groups: 1,
                p2p_groups: 2,
                failed_groups: 1,
            }
        );
    }

    #[test]
    fn test_build_report_verdict() {
        let report = build_report(
            vec![group("mgmt", Classification::Compatible)],
            vec![],
            vec![],
        );
        assert!(report.passed);

        let report = build_report(
            vec![
                group("mgmt", Classification::Compatible),
                group("ib0", Classification::Incompatible),
            ],
            vec![],
            vec![],
        );
        assert!(!report.passed);
        assert_eq!(report.summary.failed_groups, 1);
        assert_eq!(report.failed().count(), 1);
        assert!(report.group("ib0").is_some());
    }
}
