//! Output formatting for analysis reports.
//!
//! This module handles formatting and outputting the report:
//! - [`terminal`] - Text output with colors
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON output

mod csv;
mod json;
mod terminal;

pub use csv::render_csv;
pub use json::render_json;
pub use terminal::{format_field, render_pairing, render_text};

use crate::models::AnalysisReport;
use std::error::Error;

/// Report rendering selected on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Render the report in `format`.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Csv => Ok(render_csv(report)),
        OutputFormat::Json => render_json(report),
    }
}
