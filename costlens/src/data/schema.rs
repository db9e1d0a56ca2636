//! Field definitions and record validation at the data-source boundary

use super::{DataType, Record, Value};
use crate::{CostLensError, Result};
use serde::{Deserialize, Serialize};

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Data type
    pub data_type: DataType,
    /// Whether the field may hold null
    pub nullable: bool,
    /// Whether the field may be absent altogether
    pub optional: bool,
}

impl FieldDef {
    /// Create a required, non-null field definition
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
            optional: false,
        }
    }

    /// Set nullable flag
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set optional flag
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

/// The strongly-typed contract a dataset's rows must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Field holding the identifier forwarded to navigation on row click
    pub id_field: String,
    pub fields: Vec<FieldDef>,
    /// Reject fields not declared in `fields`
    pub strict: bool,
}

impl RecordSchema {
    pub fn new(id_field: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            id_field: id_field.into(),
            fields,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Query history rows
    pub fn queries() -> Self {
        Self::new(
            "id",
            vec![
                FieldDef::new("id", DataType::String),
                FieldDef::new("user", DataType::String),
                FieldDef::new("warehouse", DataType::String),
                FieldDef::new("pattern", DataType::String),
                FieldDef::new("cost", DataType::Float64),
                FieldDef::new("credits", DataType::Float64),
                FieldDef::new("duration_ms", DataType::Int64),
                FieldDef::new("bytes_scanned", DataType::Int64).optional(true),
            ],
        )
    }

    /// Table storage rows
    pub fn tables() -> Self {
        Self::new(
            "name",
            vec![
                FieldDef::new("name", DataType::String),
                FieldDef::new("database", DataType::String),
                FieldDef::new("size_bytes", DataType::Int64),
                FieldDef::new("growth_pct", DataType::Float64),
                FieldDef::new("cost", DataType::Float64),
                FieldDef::new("credits", DataType::Float64),
                FieldDef::new("last_accessed", DataType::String).nullable(true),
            ],
        )
    }

    /// Warehouse rows
    pub fn warehouses() -> Self {
        Self::new(
            "name",
            vec![
                FieldDef::new("name", DataType::String),
                FieldDef::new("size", DataType::String),
                FieldDef::new("cost", DataType::Float64),
                FieldDef::new("credits", DataType::Float64),
                FieldDef::new("queries", DataType::Int64),
                FieldDef::new("idle_pct", DataType::Float64),
            ],
        )
    }

    /// Account rows
    pub fn accounts() -> Self {
        Self::new(
            "id",
            vec![
                FieldDef::new("id", DataType::String),
                FieldDef::new("name", DataType::String),
                FieldDef::new("region", DataType::String),
                FieldDef::new("cost", DataType::Float64),
                FieldDef::new("credits", DataType::Float64),
                FieldDef::new("storage_bytes", DataType::Int64),
            ],
        )
    }

    /// Check a record against the schema. `row` is used in error messages.
    pub fn validate(&self, record: &Record, row: usize) -> Result<()> {
        for def in &self.fields {
            let value = match record.get(&def.name) {
                Some(v) => v,
                None if def.optional => continue,
                None => return Err(CostLensError::missing_field(&def.name, row)),
            };
            match value.data_type() {
                None if def.nullable => {}
                None => {
                    return Err(CostLensError::InvalidRecord {
                        row,
                        reason: format!("field '{}' is not nullable", def.name),
                    })
                }
                Some(actual) if def.data_type.accepts(actual) => {}
                Some(_) => {
                    return Err(CostLensError::TypeMismatch {
                        field: def.name.clone(),
                        row,
                        expected: def.data_type.name(),
                        found: value.type_name(),
                    })
                }
            }
        }

        if self.strict {
            if let Some(extra) = record.field_names().find(|n| self.field(n).is_none()) {
                return Err(CostLensError::InvalidRecord {
                    row,
                    reason: format!("undeclared field '{}'", extra),
                });
            }
        }
        Ok(())
    }

    /// Convert one loosely shaped JSON object into a validated record
    pub fn record_from_json(&self, json: serde_json::Value, row: usize) -> Result<Record> {
        let object = match json {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(CostLensError::InvalidRecord {
                    row,
                    reason: format!("expected a JSON object, got {}", json_kind(&other)),
                })
            }
        };

        let mut record = Record::new();
        for (name, value) in object {
            let value = match value {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(b) => Value::Bool(b),
                serde_json::Value::String(s) => Value::String(s),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => Value::Int64(i),
                    None => Value::Float64(n.as_f64().ok_or_else(|| CostLensError::InvalidRecord {
                        row,
                        reason: format!("field '{}' holds an unrepresentable number", name),
                    })?),
                },
                nested => {
                    return Err(CostLensError::InvalidRecord {
                        row,
                        reason: format!("field '{}' holds a nested {}", name, json_kind(&nested)),
                    })
                }
            };
            record.set(name, value);
        }

        self.validate(&record, row)?;
        Ok(record)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_int_in_float_field() {
        let schema = RecordSchema::warehouses();
        let record = schema
            .record_from_json(
                json!({"name": "ETL_WH", "size": "LARGE", "cost": 120, "credits": 40.0, "queries": 310, "idle_pct": 12.5}),
                0,
            )
            .unwrap();
        assert_eq!(record.get("cost"), Some(&Value::Int64(120)));
    }

    #[test]
    fn test_validate_reports_missing_and_mistyped() {
        let schema = RecordSchema::warehouses();
        let err = schema
            .record_from_json(json!({"name": "ETL_WH", "size": "LARGE", "cost": 1.0}), 3)
            .unwrap_err();
        assert!(matches!(err, CostLensError::MissingField { ref field, row: 3 } if field == "credits"));

        let err = schema
            .record_from_json(
                json!({"name": "ETL_WH", "size": "LARGE", "cost": "1", "credits": 1.0, "queries": 1, "idle_pct": 0.0}),
                0,
            )
            .unwrap_err();
        assert!(matches!(err, CostLensError::TypeMismatch { expected: "float64", found: "string", .. }));
    }

    #[test]
    fn test_nullable_optional_and_strict() {
        let schema = RecordSchema::tables();
        let ok = json!({"name": "T", "database": "D", "size_bytes": 1, "growth_pct": 0.1,
                        "cost": 1.0, "credits": 0.5, "last_accessed": null});
        assert!(schema.record_from_json(ok.clone(), 0).is_ok());

        let mut with_extra = ok;
        with_extra["comment"] = json!("x");
        assert!(schema.record_from_json(with_extra.clone(), 0).is_ok());
        let err = schema.clone().strict(true).record_from_json(with_extra, 0).unwrap_err();
        assert!(matches!(err, CostLensError::InvalidRecord { .. }));

        let queries = RecordSchema::queries();
        let no_bytes = json!({"id": "q1", "user": "u", "warehouse": "W", "pattern": "p",
                              "cost": 1.0, "credits": 1.0, "duration_ms": 5});
        assert!(queries.record_from_json(no_bytes, 0).is_ok());
    }

    #[test]
    fn test_rejects_non_objects_and_nesting() {
        let schema = RecordSchema::accounts();
        assert!(matches!(
            schema.record_from_json(json!([1, 2]), 0).unwrap_err(),
            CostLensError::InvalidRecord { row: 0, .. }
        ));
        assert!(matches!(
            schema.record_from_json(json!({"id": {"a": 1}}), 1).unwrap_err(),
            CostLensError::InvalidRecord { row: 1, .. }
        ));
    }
}
