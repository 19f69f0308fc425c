//! Record ingestion.
//!
//! Turns collected per-host interface state into [`crate::models::InterfaceRecord`]s:
//! - [`cli`] - Running the collection command
//! - [`loader`] - Reading JSON or text input files
//! - [`text`] - Parsing `node: iface STATE addr/len` lines

mod cli;
mod loader;
mod text;

// Re-export public types and functions
pub use cli::run;
pub use loader::{collect_records, default_input_file, parse_json, read_records};
pub use text::{parse_line, parse_text, short_hostname, ParsedInput, ParsedLine, RejectedLine};
