//! Record and value types shared by every view

mod schema;

pub use schema::{FieldDef, RecordSchema};

use crate::{CostLensError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Bool,
    Int64,
    Float64,
    String,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::String => "string",
        }
    }

    /// Whether a value of type `actual` may be stored in a field of this type.
    /// Integers are accepted by float fields.
    pub fn accepts(&self, actual: DataType) -> bool {
        *self == actual || (*self == DataType::Float64 && actual == DataType::Int64)
    }
}

/// A primitive field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
}

/// Ordering class of a value. Values of different classes never compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Null,
    Bool,
    Numeric,
    Text,
}

impl Value {
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(DataType::Bool),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::String(_) => Some(DataType::String),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.data_type().map(|t| t.name()).unwrap_or("null")
    }

    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int64(_) | Value::Float64(_) => ValueKind::Numeric,
            Value::String(_) => ValueKind::Text,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int64(_) | Value::Float64(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Render the value the way a table cell shows it
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_value())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One row of display data: field name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field or fail with `MissingField` naming the record position
    pub fn require(&self, name: &str, row: usize) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| CostLensError::missing_field(name, row))
    }

    /// Get a string field or fail with `TypeMismatch`
    pub fn require_str(&self, name: &str, row: usize) -> Result<&str> {
        let value = self.require(name, row)?;
        value.as_str().ok_or_else(|| CostLensError::TypeMismatch {
            field: name.to_string(),
            row,
            expected: "string",
            found: value.type_name(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder_and_require() {
        let record = Record::new()
            .with("id", 7)
            .with("warehouse", "COMPUTE_WH")
            .with("cost", 12.5);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("id"), Some(&Value::Int64(7)));
        assert_eq!(record.require_str("warehouse", 0).unwrap(), "COMPUTE_WH");

        let err = record.require("credits", 4).unwrap_err();
        assert!(matches!(err, CostLensError::MissingField { ref field, row: 4 } if field == "credits"));

        let err = record.require_str("cost", 1).unwrap_err();
        assert!(matches!(err, CostLensError::TypeMismatch { expected: "string", found: "float64", .. }));
    }

    #[test]
    fn test_value_json_shape() {
        let record = Record::new()
            .with("name", "ORDERS")
            .with("rows", 42)
            .with("growth", 1.5)
            .with("owner", Value::Null);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"growth":1.5,"name":"ORDERS","owner":null,"rows":42}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("rows"), Some(&Value::Int64(42)));
        assert_eq!(back.get("owner"), Some(&Value::Null));
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::Int64(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float64(2.5).as_i64(), None);
        assert!(Value::Float64(0.0).is_numeric());
        assert!(!Value::String("1".into()).is_numeric());
        assert!(DataType::Float64.accepts(DataType::Int64));
        assert!(!DataType::Int64.accepts(DataType::Float64));
    }
}
