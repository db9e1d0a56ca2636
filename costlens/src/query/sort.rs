use super::compare::{common_kind, compare_non_null, compare_values};
use crate::config::MissingFieldPolicy;
use crate::data::{Record, Value};
use crate::display::DisplayMode;
use crate::{CostLensError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// What a sort or group ordering is keyed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// A named record field
    Field(String),
    /// Whichever field the active display mode selects
    Display,
}

impl SortKey {
    pub fn field(name: impl Into<String>) -> Self {
        SortKey::Field(name.into())
    }

    pub fn resolve(&self, mode: DisplayMode) -> &str {
        match self {
            SortKey::Field(name) => name,
            SortKey::Display => mode.field_name(),
        }
    }
}

/// A single-key sort request, as issued by a column-header click
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(SortKey::field(field), SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(SortKey::field(field), SortDirection::Descending)
    }

    pub fn by_display(direction: SortDirection) -> Self {
        Self::new(SortKey::Display, direction)
    }

    /// Clicking the same header again flips direction
    pub fn toggled(&self) -> Self {
        Self::new(self.key.clone(), self.direction.reversed())
    }
}

/// Stable sort of `records` on one field. Fails fast if any record lacks it.
pub fn sort_records(records: &[Record], field: &str, direction: SortDirection) -> Result<Vec<Record>> {
    let indices: Vec<usize> = (0..records.len()).collect();
    let sorted = sort_indices(records, &indices, field, direction, MissingFieldPolicy::Fail)?;
    Ok(sorted.into_iter().map(|i| records[i].clone()).collect())
}

/// Stable sort of record positions. Nulls, and absent keys under
/// `MissingFieldPolicy::SortLast`, are placed last in both directions.
pub(crate) fn sort_indices(
    records: &[Record],
    indices: &[usize],
    field: &str,
    direction: SortDirection,
    policy: MissingFieldPolicy,
) -> Result<Vec<usize>> {
    if indices.len() < 2 {
        // Still report a missing key on a single record
        if let Some(&i) = indices.first() {
            key_of(records, i, field, policy)?;
        }
        return Ok(indices.to_vec());
    }

    let mut keyed: Vec<(usize, Option<&Value>)> = Vec::with_capacity(indices.len());
    for &i in indices {
        keyed.push((i, key_of(records, i, field, policy)?));
    }

    if common_kind(keyed.iter().filter_map(|(_, v)| *v)).is_none() {
        return Err(CostLensError::MixedKeyTypes(field.to_string()));
    }

    let descending = direction == SortDirection::Descending;
    keyed.sort_by(|(_, a), (_, b)| {
        let a = a.filter(|v| !v.is_null());
        let b = b.filter(|v| !v.is_null());
        match (a, b) {
            (Some(x), Some(y)) => {
                let cmp = compare_non_null(x, y);
                if descending {
                    cmp.reverse()
                } else {
                    cmp
                }
            }
            _ => compare_values(a, b, false),
        }
    });

    Ok(keyed.into_iter().map(|(i, _)| i).collect())
}

fn key_of<'a>(
    records: &'a [Record],
    row: usize,
    field: &str,
    policy: MissingFieldPolicy,
) -> Result<Option<&'a Value>> {
    match records[row].get(field) {
        Some(v) => Ok(Some(v)),
        None if policy == MissingFieldPolicy::SortLast => Ok(None),
        None => Err(CostLensError::missing_field(field, row)),
    }
}

/// Ordering of two values by direction, used for aggregate ordering
pub(crate) fn directed(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    let cmp = compare_non_null(a, b);
    match direction {
        SortDirection::Ascending => cmp,
        SortDirection::Descending => cmp.reverse(),
    }
}
