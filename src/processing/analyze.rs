//! Analyzer entry point.
//!
//! Filters and resolves the records, builds the interface groups and the global
//! /31 buckets, then classifies the groups in parallel.

use super::classify::classify_group;
use super::grouping::{build_p2p_buckets, group_by_interface};
use super::report::build_report;
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::models::{AnalysisReport, GroupResult, InterfaceRecord, ResolvedRecord, SkippedRecord};
use colored::Colorize;
use rayon::prelude::*;

/// Analyze `records` with the default configuration.
pub fn analyze(records: &[InterfaceRecord]) -> Result<AnalysisReport> {
    analyze_with(records, &Config::default())
}

/// Analyze `records`.
///
/// Records with an invalid prefix are skipped and listed in the report. Fails
/// with [`AnalysisError::EmptyInput`] when nothing usable is left.
pub fn analyze_with(records: &[InterfaceRecord], config: &Config) -> Result<AnalysisReport> {
    log::info!("#Start analyze() with {} records", records.len());

    let mut down_records = Vec::new();
    let mut skipped_records = Vec::new();
    let mut resolved = Vec::with_capacity(records.len());

    for record in records {
        if config.is_ignored(&record.interface) {
            log::debug!("Skipping {record}, interface is ignored");
            continue;
        }
        if !record.is_up() {
            log::info!("Skipping {record}, link is not up");
            down_records.push(record.clone());
            continue;
        }
        match ResolvedRecord::resolve(record) {
            Ok(r) => resolved.push(r),
            Err(e) => {
                log::warn!("{skipped} {record}: {e}", skipped = "skipped".on_red());
                skipped_records.push(SkippedRecord {
                    record: record.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if resolved.is_empty() {
        log::error!(
            "No data: {} records in, {} down, {} invalid",
            records.len(),
            down_records.len(),
            skipped_records.len()
        );
        return Err(AnalysisError::EmptyInput);
    }

    let groups = group_by_interface(&resolved);
    // Buckets span every interface name, build them before pairing any group.
    let buckets = build_p2p_buckets(&resolved);

    let results: Vec<GroupResult> = groups
        .as_slice()
        .par_iter()
        .map(|group| classify_group(group, &buckets))
        .collect();

    Ok(build_report(results, down_records, skipped_records))
}
