//! Cluster-wide subnet compatibility checks.
//!
//! Interface records collected from every node are grouped by interface name.
//! Each group must either share one subnet (management and storage VLANs) or be
//! made of /31 point-to-point links with exactly two endpoints each, possibly
//! on differently named interfaces at the two ends.

pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AnalysisError, Result};
pub use processing::{analyze, analyze_with};
