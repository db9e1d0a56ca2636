//! Cost/credits display mode and chart projection

use crate::data::Record;
use crate::{CostLensError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two parallel numeric fields drives charts and tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Cost,
    Credits,
}

impl DisplayMode {
    pub fn field_name(&self) -> &'static str {
        match self {
            DisplayMode::Cost => "cost",
            DisplayMode::Credits => "credits",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Cost => DisplayMode::Credits,
            DisplayMode::Credits => DisplayMode::Cost,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for DisplayMode {
    type Err = CostLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cost" => Ok(DisplayMode::Cost),
            "credits" => Ok(DisplayMode::Credits),
            other => Err(CostLensError::InvalidSpec(format!("unknown display mode '{}'", other))),
        }
    }
}

/// One bar or slice: the id is what a click forwards to navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub id: String,
    pub label: String,
    pub value: f64,
}

/// Project records onto the field selected by `mode`
pub fn project(records: &[Record], mode: DisplayMode, id_field: &str, label_field: &str) -> Result<Vec<ChartPoint>> {
    let field = mode.field_name();
    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let value = record.require(field, row)?;
            let value = value.as_f64().ok_or_else(|| CostLensError::TypeMismatch {
                field: field.to_string(),
                row,
                expected: "number",
                found: value.type_name(),
            })?;
            Ok(ChartPoint {
                id: record.require(id_field, row)?.to_string_value(),
                label: record.require(label_field, row)?.to_string_value(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_warehouse(name: &str, cost: f64, credits: i64) -> Record {
        Record::new()
            .with("name", name)
            .with("cost", cost)
            .with("credits", credits)
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(DisplayMode::Cost.toggle(), DisplayMode::Credits);
        assert_eq!(DisplayMode::Cost.toggle().toggle(), DisplayMode::Cost);
        assert_eq!("Credits".parse::<DisplayMode>().unwrap(), DisplayMode::Credits);
        assert!("dollars".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_project_follows_mode() {
        let records = vec![make_warehouse("ETL_WH", 300.0, 100), make_warehouse("BI_WH", 90.0, 30)];

        let cost = project(&records, DisplayMode::Cost, "name", "name").unwrap();
        assert_eq!(cost[0].value, 300.0);
        assert_eq!(cost[1].id, "BI_WH");

        let credits = project(&records, DisplayMode::Credits, "name", "name").unwrap();
        assert_eq!(credits.iter().map(|p| p.value).collect::<Vec<_>>(), vec![100.0, 30.0]);
    }

    #[test]
    fn test_project_missing_field() {
        let records = vec![Record::new().with("name", "X").with("cost", 1.0)];
        let err = project(&records, DisplayMode::Credits, "name", "name").unwrap_err();
        assert!(matches!(err, CostLensError::MissingField { .. }));
    }
}
