//! Loading interface records from files or a collection command.

use super::cli;
use super::text::{parse_text, ParsedInput, RejectedLine};
use crate::models::InterfaceRecord;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::path::Path;

/// JSON input wrapped in an object, as written by collection scripts.
#[derive(Deserialize, Debug)]
struct RecordFile {
    records: Vec<Value>,
}

/// Default input file name for today's collection run.
pub fn default_input_file() -> String {
    let now = chrono::Local::now();
    format!("interfaces_{}.txt", now.format("%Y-%m-%d"))
}

/// Read records from `input`, or from today's default file when None.
///
/// Files ending in `.json` hold an array of records or `{"records": [...]}`,
/// anything else is parsed as `node: iface STATE addr/len` text.
pub fn read_records(input: Option<&str>) -> Result<ParsedInput, Box<dyn Error>> {
    let file = match input {
        Some(file) => file.to_string(),
        None => default_input_file(),
    };
    if !Path::new(&file).exists() {
        return Err(format!("Input file does not exist: {file}").into());
    }
    log::info!("Reading interface records from: {file}");

    let content = std::fs::read_to_string(&file)
        .map_err(|e| format!("Error reading input file {file}: {e}"))?;

    if file.ends_with(".json") {
        Ok(parse_json(&content).map_err(|e| format!("{file}: {e}"))?)
    } else {
        Ok(parse_text(&content))
    }
}

/// Decode JSON records.
///
/// Fails only when the document itself is not an array of objects (or a
/// `records` wrapper). A bad record is rejected with the path of the bad field
/// and the remaining records are kept.
pub fn parse_json(content: &str) -> Result<ParsedInput, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let values = if content.trim_start().starts_with('[') {
        serde_path_to_error::deserialize::<_, Vec<Value>>(&mut deserializer)
    } else {
        serde_path_to_error::deserialize::<_, RecordFile>(&mut deserializer).map(|f| f.records)
    }
    .map_err(|e| format!("Error parsing JSON: path={} error={}", e.path(), e))?;
    deserializer
        .end()
        .map_err(|e| format!("Error parsing JSON: {e}"))?;

    let mut parsed = ParsedInput::default();
    for (i, value) in values.into_iter().enumerate() {
        let line = value.to_string();
        match serde_path_to_error::deserialize::<_, InterfaceRecord>(value) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                let reason = format!("path=[{i}].{} error={}", e.path(), e.inner());
                log::warn!("record {}: {reason}", i + 1);
                parsed.rejected.push(RejectedLine {
                    line_no: i + 1,
                    line,
                    reason,
                });
            }
        }
    }

    log::info!(
        "Parsed {} interface records from JSON, rejected {}",
        parsed.records.len(),
        parsed.rejected.len()
    );
    Ok(parsed)
}

/// Run the collection command once and parse its output.
pub fn collect_records(cmd: &str) -> Result<ParsedInput, Box<dyn Error>> {
    log::info!("Collecting interface records with: {cmd}");
    let output = cli::run(cmd)?;
    Ok(parse_text(&output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkStatus;
    use std::io::Write;

    #[test]
    fn test_parse_json_array_and_wrapped() {
        let array = r#"[
            {"node":"nvme1","interface":"100g1","status":"UP","address":"10.100.0.7","prefix_len":31},
            {"node":"gw1","interface":"100g1","status":"DOWN","address":"10.100.0.6","prefix_len":31}
        ]"#;
        let parsed = parse_json(array).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].status, LinkStatus::Down);
        assert!(parsed.rejected.is_empty());

        let wrapped = format!(r#"{{"records": {array}}}"#);
        assert_eq!(parse_json(&wrapped).unwrap(), parsed);
    }

    #[test]
    fn test_parse_json_bad_record_kept_apart() {
        let input = r#"[
            {"node":"nodeA","interface":"mgmt","status":"UP","address":"10.11.1.5","prefix_len":24},
            {"node":"nodeB","interface":"mgmt","status":"UP","address":"10.12.1.5","prefix_len":24},
            {"node":"nodeC","interface":"mgmt","status":"UP","address":"10.11.1.300","prefix_len":24}
        ]"#;
        let parsed = parse_json(input).unwrap();
        let nodes: Vec<&str> = parsed.records.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(nodes, vec!["nodeA", "nodeB"]);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line_no, 3);
        assert!(
            parsed.rejected[0].reason.contains("[2].address"),
            "{}",
            parsed.rejected[0].reason
        );
        assert!(parsed.rejected[0].line.contains("nodeC"));

        let report = crate::analyze(&parsed.records).unwrap();
        assert!(!report.passed, "the mgmt mismatch must still be reported");
    }

    #[test]
    fn test_parse_json_document_errors() {
        assert!(parse_json(r#"{"nodes": []}"#).is_err());
        let trailing = r#"[{"node":"a","interface":"mgmt","status":"UP","address":"10.0.0.1","prefix_len":24}] trailing"#;
        let err = parse_json(trailing).unwrap_err().to_string();
        assert!(err.starts_with("Error parsing JSON"), "{err}");
    }

    #[test]
    fn test_read_records_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "nvme1: 100g1 UP 10.100.0.7/31").unwrap();
        writeln!(file, "gw1: 100g1 UP 10.100.0.6/31").unwrap();
        let parsed = read_records(file.path().to_str()).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_read_records_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"records":[{{"node":"a","interface":"mgmt","status":"UP","address":"10.0.0.1","prefix_len":24}}]}}"#
        )
        .unwrap();
        let parsed = read_records(file.path().to_str()).unwrap();
        assert_eq!(parsed.records[0].node, "a");
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Some("does/not/exist.txt")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_collect_records() {
        let parsed = collect_records("printf 'nvme1: 100g1 UP 10.100.0.7/31\\n'").unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_default_input_file() {
        let name = default_input_file();
        assert!(name.starts_with("interfaces_"));
        assert!(name.ends_with(".txt"));
    }
}
