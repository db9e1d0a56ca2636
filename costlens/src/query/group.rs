//! Group-and-sum summaries, e.g. credits per query pattern

use super::compare::common_kind;
use super::sort::{directed, SortDirection, SortKey};
use crate::data::{Record, Value};
use crate::display::DisplayMode;
use crate::{CostLensError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// How group summaries are ordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Descending by one of the summed fields
    Aggregate(SortKey),
    /// Descending by member count
    Count,
    /// Order in which distinct keys were first seen
    FirstSeen,
}

/// Partition records by one field and sum numeric fields per partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub key: String,
    #[serde(default)]
    pub sums: Vec<SortKey>,
    /// Defaults to the first summed field, or first-seen order without sums
    #[serde(default)]
    pub order: Option<GroupOrder>,
}

impl GroupSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sums: Vec::new(),
            order: None,
        }
    }

    pub fn sum(mut self, field: impl Into<String>) -> Self {
        self.sums.push(SortKey::field(field));
        self
    }

    /// Sum the field selected by the display mode
    pub fn sum_display(mut self) -> Self {
        self.sums.push(SortKey::Display);
        self
    }

    pub fn order(mut self, order: GroupOrder) -> Self {
        self.order = Some(order);
        self
    }
}

/// Total of one summed field within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSum {
    pub field: String,
    pub total: Value,
}

/// One group: key value, member count and per-field sums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: Value,
    pub count: usize,
    pub sums: Vec<FieldSum>,
}

impl GroupSummary {
    pub fn sum(&self, field: &str) -> Option<&Value> {
        self.sums.iter().find(|s| s.field == field).map(|s| &s.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
}

impl<'a> GroupKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => GroupKey::Null,
            Value::Bool(b) => GroupKey::Bool(*b),
            Value::Int64(v) => GroupKey::Int(*v),
            // 2.0 and 2 land in the same group
            Value::Float64(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => GroupKey::Int(*v as i64),
            Value::Float64(v) => GroupKey::Float(v.to_bits()),
            Value::String(s) => GroupKey::Text(s),
        }
    }
}

/// Running sum that stays integral until a float or an overflow shows up
#[derive(Debug, Clone, Copy)]
enum Accumulator {
    Int(i64),
    Float(f64),
}

impl Accumulator {
    fn add(self, value: &Value) -> Option<Self> {
        Some(match (self, value) {
            (Accumulator::Int(acc), Value::Int64(v)) => match acc.checked_add(*v) {
                Some(sum) => Accumulator::Int(sum),
                None => Accumulator::Float(acc as f64 + *v as f64),
            },
            (Accumulator::Int(acc), Value::Float64(v)) => Accumulator::Float(acc as f64 + v),
            (Accumulator::Float(acc), other) => Accumulator::Float(acc + other.as_f64()?),
            _ => return None,
        })
    }

    fn into_value(self) -> Value {
        match self {
            Accumulator::Int(v) => Value::Int64(v),
            Accumulator::Float(v) => Value::Float64(v),
        }
    }
}

struct GroupState<'a> {
    key: &'a Value,
    count: usize,
    sums: Vec<Accumulator>,
}

/// Group `records` by `key`, summing `aggregate_fields`. Groups are ordered
/// descending by the first aggregate field; ties keep first-seen order.
pub fn group_records(records: &[Record], key: &str, aggregate_fields: &[&str]) -> Result<Vec<GroupSummary>> {
    let spec = aggregate_fields
        .iter()
        .fold(GroupSpec::new(key), |spec, field| spec.sum(*field));
    let indices: Vec<usize> = (0..records.len()).collect();
    group_indices(records, &indices, &spec, DisplayMode::default())
}

/// Missing keys and missing or non-numeric summands always fail:
/// skipping them would misstate totals.
pub(crate) fn group_indices(
    records: &[Record],
    indices: &[usize],
    spec: &GroupSpec,
    mode: DisplayMode,
) -> Result<Vec<GroupSummary>> {
    let sum_fields: Vec<&str> = spec.sums.iter().map(|k| k.resolve(mode)).collect();
    for (i, field) in sum_fields.iter().enumerate() {
        if sum_fields[..i].contains(field) {
            return Err(CostLensError::InvalidSpec(format!("field '{}' is summed twice", field)));
        }
    }
    let order = resolve_order(spec, &sum_fields, mode)?;

    let mut keys = Vec::with_capacity(indices.len());
    for &i in indices {
        keys.push((i, records[i].require(&spec.key, i)?));
    }
    if common_kind(keys.iter().map(|(_, v)| *v)).is_none() {
        return Err(CostLensError::MixedKeyTypes(spec.key.clone()));
    }

    let mut slots: AHashMap<GroupKey<'_>, usize> = AHashMap::with_capacity(16);
    let mut groups: Vec<GroupState<'_>> = Vec::new();

    for (i, key) in keys {
        let slot = *slots.entry(GroupKey::of(key)).or_insert_with(|| {
            groups.push(GroupState {
                key,
                count: 0,
                sums: vec![Accumulator::Int(0); sum_fields.len()],
            });
            groups.len() - 1
        });

        let state = &mut groups[slot];
        state.count += 1;
        for (acc, field) in state.sums.iter_mut().zip(&sum_fields) {
            let value = records[i].require(field, i)?;
            *acc = acc.add(value).ok_or_else(|| CostLensError::TypeMismatch {
                field: field.to_string(),
                row: i,
                expected: "number",
                found: value.type_name(),
            })?;
        }
    }

    let mut summaries: Vec<GroupSummary> = groups
        .into_iter()
        .map(|g| GroupSummary {
            key: g.key.clone(),
            count: g.count,
            sums: sum_fields
                .iter()
                .zip(g.sums)
                .map(|(field, acc)| FieldSum {
                    field: field.to_string(),
                    total: acc.into_value(),
                })
                .collect(),
        })
        .collect();

    // sort_by is stable, so equal aggregates keep first-seen order
    match order {
        ResolvedOrder::Aggregate(slot) => summaries.sort_by(|a, b| {
            directed(&a.sums[slot].total, &b.sums[slot].total, SortDirection::Descending)
        }),
        ResolvedOrder::Count => summaries.sort_by(|a, b| b.count.cmp(&a.count)),
        ResolvedOrder::FirstSeen => {}
    }

    Ok(summaries)
}

enum ResolvedOrder {
    Aggregate(usize),
    Count,
    FirstSeen,
}

fn resolve_order(spec: &GroupSpec, sum_fields: &[&str], mode: DisplayMode) -> Result<ResolvedOrder> {
    match &spec.order {
        None if sum_fields.is_empty() => Ok(ResolvedOrder::FirstSeen),
        None => Ok(ResolvedOrder::Aggregate(0)),
        Some(GroupOrder::Count) => Ok(ResolvedOrder::Count),
        Some(GroupOrder::FirstSeen) => Ok(ResolvedOrder::FirstSeen),
        Some(GroupOrder::Aggregate(key)) => {
            let field = key.resolve(mode);
            sum_fields
                .iter()
                .position(|f| *f == field)
                .map(ResolvedOrder::Aggregate)
                .ok_or_else(|| {
                    CostLensError::InvalidSpec(format!(
                        "groups cannot be ordered by '{}' because it is not summed",
                        field
                    ))
                })
        }
    }
}
