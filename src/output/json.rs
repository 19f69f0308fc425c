//! JSON output of the analysis report.

use crate::models::AnalysisReport;
use std::error::Error;

/// Serialize the report as pretty JSON.
pub fn render_json(report: &AnalysisReport) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report to JSON: {e}").into())
}
