//! Built-in sample datasets, created once at startup and never mutated

use crate::data::{Record, RecordSchema, Value};
use crate::CostLensError;
use std::fmt;
use std::str::FromStr;

/// Price of one credit in the sample account
const CREDIT_PRICE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Queries,
    Tables,
    Warehouses,
    Accounts,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [Dataset::Queries, Dataset::Tables, Dataset::Warehouses, Dataset::Accounts];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Queries => "queries",
            Dataset::Tables => "tables",
            Dataset::Warehouses => "warehouses",
            Dataset::Accounts => "accounts",
        }
    }

    pub fn schema(&self) -> RecordSchema {
        match self {
            Dataset::Queries => RecordSchema::queries(),
            Dataset::Tables => RecordSchema::tables(),
            Dataset::Warehouses => RecordSchema::warehouses(),
            Dataset::Accounts => RecordSchema::accounts(),
        }
    }

    /// Field a chart uses as the bar label
    pub fn label_field(&self) -> &'static str {
        match self {
            Dataset::Queries => "pattern",
            Dataset::Tables | Dataset::Warehouses | Dataset::Accounts => "name",
        }
    }

    pub fn records(&self) -> Vec<Record> {
        match self {
            Dataset::Queries => queries(),
            Dataset::Tables => tables(),
            Dataset::Warehouses => warehouses(),
            Dataset::Accounts => accounts(),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = CostLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CostLensError::UnknownDataset(s.to_string()))
    }
}

fn credits_for(cost: f64) -> f64 {
    (cost / CREDIT_PRICE * 100.0).round() / 100.0
}

fn queries() -> Vec<Record> {
    let rows: [(&str, &str, &str, &str, f64, i64, Option<i64>); 10] = [
        ("01b3-0001", "etl_svc", "ETL_WH", "MERGE INTO orders", 48.60, 912_000, Some(88_000_000_000)),
        ("01b3-0002", "analyst_kim", "BI_WH", "SELECT * FROM events", 12.30, 64_500, Some(9_400_000_000)),
        ("01b3-0003", "etl_svc", "ETL_WH", "COPY INTO raw_clicks", 31.20, 402_100, None),
        ("01b3-0004", "dbt_runner", "TRANSFORM_WH", "CREATE TABLE AS SELECT", 22.05, 188_300, Some(21_000_000_000)),
        ("01b3-0005", "analyst_raj", "BI_WH", "SELECT * FROM events", 6.15, 33_900, Some(4_100_000_000)),
        ("01b3-0006", "etl_svc", "ETL_WH", "MERGE INTO orders", 51.90, 958_400, Some(91_500_000_000)),
        ("01b3-0007", "notebook_ana", "ADHOC_WH", "SELECT DISTINCT user_id", 3.45, 12_800, None),
        ("01b3-0008", "dbt_runner", "TRANSFORM_WH", "INSERT OVERWRITE daily_rollup", 17.70, 150_200, Some(16_800_000_000)),
        ("01b3-0009", "analyst_kim", "BI_WH", "SELECT DISTINCT user_id", 2.10, 9_700, Some(800_000_000)),
        ("01b3-0010", "etl_svc", "ETL_WH", "COPY INTO raw_clicks", 29.85, 377_600, None),
    ];

    rows.into_iter()
        .map(|(id, user, warehouse, pattern, cost, duration_ms, bytes)| {
            let mut record = Record::new()
                .with("id", id)
                .with("user", user)
                .with("warehouse", warehouse)
                .with("pattern", pattern)
                .with("cost", cost)
                .with("credits", credits_for(cost))
                .with("duration_ms", duration_ms);
            if let Some(bytes) = bytes {
                record.set("bytes_scanned", bytes);
            }
            record
        })
        .collect()
}

fn tables() -> Vec<Record> {
    let rows: [(&str, &str, i64, f64, f64, Option<&str>); 6] = [
        ("ORDERS", "SALES", 1_840_000_000_000, 4.2, 42.30, Some("2026-10-16")),
        ("RAW_CLICKS", "EVENTS", 6_220_000_000_000, 11.8, 143.06, Some("2026-10-17")),
        ("DAILY_ROLLUP", "MARTS", 96_000_000_000, 0.9, 2.21, Some("2026-10-17")),
        ("CUSTOMERS", "SALES", 310_000_000_000, 1.1, 7.13, Some("2026-10-12")),
        ("LEGACY_EXPORT", "ARCHIVE", 2_450_000_000_000, 0.0, 56.35, None),
        ("SESSIONS", "EVENTS", 3_100_000_000_000, 7.5, 71.30, Some("2026-10-17")),
    ];

    rows.into_iter()
        .map(|(name, database, size, growth, cost, accessed)| {
            Record::new()
                .with("name", name)
                .with("database", database)
                .with("size_bytes", size)
                .with("growth_pct", growth)
                .with("cost", cost)
                .with("credits", credits_for(cost))
                .with("last_accessed", Value::from(accessed))
        })
        .collect()
}

fn warehouses() -> Vec<Record> {
    let rows: [(&str, &str, f64, i64, f64); 4] = [
        ("ETL_WH", "LARGE", 1_284.60, 2_310, 6.5),
        ("BI_WH", "MEDIUM", 402.90, 18_420, 37.2),
        ("TRANSFORM_WH", "MEDIUM", 655.35, 1_125, 14.0),
        ("ADHOC_WH", "XSMALL", 58.20, 940, 61.8),
    ];

    rows.into_iter()
        .map(|(name, size, cost, queries, idle)| {
            Record::new()
                .with("name", name)
                .with("size", size)
                .with("cost", cost)
                .with("credits", credits_for(cost))
                .with("queries", queries)
                .with("idle_pct", idle)
        })
        .collect()
}

fn accounts() -> Vec<Record> {
    let rows: [(&str, &str, &str, f64, i64); 3] = [
        ("acc-prod", "Production", "us-east-1", 2_210.75, 13_400_000_000_000),
        ("acc-stage", "Staging", "us-east-1", 318.40, 1_950_000_000_000),
        ("acc-eu", "EU Analytics", "eu-central-1", 764.05, 4_020_000_000_000),
    ];

    rows.into_iter()
        .map(|(id, name, region, cost, storage)| {
            Record::new()
                .with("id", id)
                .with("name", name)
                .with("region", region)
                .with("cost", cost)
                .with("credits", credits_for(cost))
                .with("storage_bytes", storage)
        })
        .collect()
}
