//! Error types for subnet analysis.

use thiserror::Error;

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by the address calculator and the analyzer.
///
/// Point-to-point pairing problems are not errors, they end up as
/// [`crate::models::PairingDetail`] entries in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("No usable UP interface records to analyze")]
    EmptyInput,
}
