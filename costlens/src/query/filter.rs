//! Free-text record filter

use crate::config::MissingFieldPolicy;
use crate::data::{Record, Value};
use crate::{CostLensError, Result};
use serde::{Deserialize, Serialize};

/// Case-insensitive substring predicate over one text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub needle: String,
}

impl FilterSpec {
    pub fn new(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Parse `field=needle` as typed into a filter box bound to a column
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once('=') {
            Some((field, needle)) if !field.trim().is_empty() => Ok(Self::new(field.trim(), needle)),
            _ => Err(CostLensError::InvalidSpec(format!(
                "filter must look like field=text, got '{}'",
                raw
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether one record matches. Null values never match.
    pub fn matches(&self, record: &Record, row: usize) -> Result<bool> {
        self.matches_lowered(record, row, &self.needle.to_lowercase())
    }

    #[inline]
    fn matches_lowered(&self, record: &Record, row: usize, needle: &str) -> Result<bool> {
        match record.require(&self.field, row)? {
            Value::String(s) => Ok(contains_ignore_case(s, needle)),
            Value::Null => Ok(false),
            other => Err(CostLensError::TypeMismatch {
                field: self.field.clone(),
                row,
                expected: "string",
                found: other.type_name(),
            }),
        }
    }
}

#[inline]
fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    if lowered_needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && lowered_needle.is_ascii() {
        haystack
            .as_bytes()
            .windows(lowered_needle.len())
            .any(|w| w.eq_ignore_ascii_case(lowered_needle.as_bytes()))
    } else {
        haystack.to_lowercase().contains(lowered_needle)
    }
}

/// Keep records whose field contains `needle`, ignoring case, in input order.
/// An empty needle returns the input unchanged.
pub fn filter_records(records: &[Record], field: &str, needle: &str) -> Result<Vec<Record>> {
    let indices: Vec<usize> = (0..records.len()).collect();
    let spec = FilterSpec::new(field, needle);
    let kept = filter_indices(records, &indices, &spec, MissingFieldPolicy::Fail)?;
    Ok(kept.into_iter().map(|i| records[i].clone()).collect())
}

/// Positions from `indices` whose record matches. Under
/// `MissingFieldPolicy::SortLast` records lacking the field are dropped.
pub(crate) fn filter_indices(
    records: &[Record],
    indices: &[usize],
    spec: &FilterSpec,
    policy: MissingFieldPolicy,
) -> Result<Vec<usize>> {
    if spec.is_empty() {
        return Ok(indices.to_vec());
    }

    let needle = spec.needle.to_lowercase();
    let mut result = Vec::with_capacity(indices.len());
    for &i in indices {
        let record = &records[i];
        if policy == MissingFieldPolicy::SortLast && !record.contains(&spec.field) {
            continue;
        }
        if spec.matches_lowered(record, i, &needle)? {
            result.push(i);
        }
    }
    Ok(result)
}
