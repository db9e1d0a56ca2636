//! costlens record views
//!
//! Sort, filter and group views over warehouse cost and usage records.
//! Every view is recomputed from immutable input rows on each interaction
//! and parameterized by the active display mode (cost or credits).

pub mod config;
pub mod data;
pub mod display;
pub mod processor;
pub mod query;
pub mod render;
pub mod source;

// Re-export main types
pub use config::{MissingFieldPolicy, ViewConfig};
pub use data::{DataType, FieldDef, Record, RecordSchema, Value};
pub use display::{ChartPoint, DisplayMode};
pub use processor::{DerivedView, RecordListProcessor, ViewRequest};
pub use query::{FilterSpec, GroupSpec, GroupSummary, SortDirection, SortKey, SortSpec};

/// Record view error type
#[derive(Debug, thiserror::Error)]
pub enum CostLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Field '{field}' missing from record {row}")]
    MissingField { field: String, row: usize },

    #[error("Field '{field}' in record {row}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field '{0}' mixes values that cannot be ordered against each other")]
    MixedKeyTypes(String),

    #[error("Invalid view spec: {0}")]
    InvalidSpec(String),

    #[error("Invalid record {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

impl CostLensError {
    pub(crate) fn missing_field(field: &str, row: usize) -> Self {
        CostLensError::MissingField {
            field: field.to_string(),
            row,
        }
    }
}

pub type Result<T> = std::result::Result<T, CostLensError>;
