//! Record sources: JSON files validated against a schema, and built-in
//! sample datasets

pub mod sample;

pub use sample::Dataset;

use crate::data::{Record, RecordSchema};
use crate::{CostLensError, Result};
use std::fs;
use std::path::Path;

/// Parse a JSON array of row objects, validating each against `schema`
pub fn parse_json_records(text: &str, schema: &RecordSchema) -> Result<Vec<Record>> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    let rows = match json {
        serde_json::Value::Array(rows) => rows,
        _ => {
            return Err(CostLensError::InvalidRecord {
                row: 0,
                reason: "input must be a JSON array of objects".to_string(),
            })
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(row, value)| schema.record_from_json(value, row))
        .collect()
}

/// Read and validate a JSON file of rows
pub fn load_json_records(path: &Path, schema: &RecordSchema) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)?;
    let records = parse_json_records(&text, schema)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("warehouses.json");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"[
                {{"name": "ETL_WH", "size": "LARGE", "cost": 812.4, "credits": 270.8, "queries": 1204, "idle_pct": 8.5}},
                {{"name": "BI_WH", "size": "SMALL", "cost": 96, "credits": 32, "queries": 5120, "idle_pct": 41.0}}
            ]"#
        )
        .unwrap();

        let records = load_json_records(&path, &RecordSchema::warehouses()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("cost"), Some(&Value::Int64(96)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_json_records(&dir.path().join("nope.json"), &RecordSchema::queries()).unwrap_err();
        assert!(matches!(err, CostLensError::Io(_)));
    }

    #[test]
    fn test_bad_rows_report_position() {
        let err = parse_json_records(r#"{"name": "x"}"#, &RecordSchema::tables()).unwrap_err();
        assert!(matches!(err, CostLensError::InvalidRecord { row: 0, .. }));

        let text = r#"[
            {"id": "a1", "name": "Prod", "region": "us-east-1", "cost": 1.0, "credits": 0.3, "storage_bytes": 10},
            {"id": "a2", "name": "Dev", "region": "eu-west-1", "cost": 1.0, "storage_bytes": 10}
        ]"#;
        let err = parse_json_records(text, &RecordSchema::accounts()).unwrap_err();
        assert!(matches!(err, CostLensError::MissingField { row: 1, .. }));

        let err = parse_json_records("[{", &RecordSchema::accounts()).unwrap_err();
        assert!(matches!(err, CostLensError::Json(_)));
    }
}
