//! RecordListProcessor: one derived view per user interaction
//!
//! Pipeline: filter -> sort -> (group | limit). A sort given together with a
//! group runs before grouping and so only decides which group is "first
//! seen" when aggregates tie. The processor holds no state besides its
//! configuration; each call recomputes from the immutable input rows.

use crate::config::ViewConfig;
use crate::data::{Record, Value};
use crate::display::{self, ChartPoint, DisplayMode};
use crate::query::{
    filter_indices, group_indices, sort_indices, FilterSpec, GroupSpec, GroupSummary, SortSpec,
};
use crate::{CostLensError, Result};
use serde::{Deserialize, Serialize};

/// A requested derived view: header click, filter keystroke, mode toggle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub mode: Option<DisplayMode>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub filter: Option<FilterSpec>,
    #[serde(default)]
    pub group: Option<GroupSpec>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ViewRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filter = Some(spec);
        self
    }

    pub fn group(mut self, spec: GroupSpec) -> Self {
        self.group = Some(spec);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The rows or group summaries handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum DerivedView {
    Rows(Vec<Record>),
    Groups(Vec<GroupSummary>),
}

impl DerivedView {
    pub fn len(&self) -> usize {
        match self {
            DerivedView::Rows(rows) => rows.len(),
            DerivedView::Groups(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Option<&[Record]> {
        match self {
            DerivedView::Rows(rows) => Some(rows),
            DerivedView::Groups(_) => None,
        }
    }

    pub fn groups(&self) -> Option<&[GroupSummary]> {
        match self {
            DerivedView::Rows(_) => None,
            DerivedView::Groups(groups) => Some(groups),
        }
    }

    /// Identifier a click on display row `row` forwards to navigation:
    /// the id field for record rows, the key value for group rows.
    pub fn clicked(&self, row: usize, id_field: &str) -> Option<&Value> {
        match self {
            DerivedView::Rows(rows) => rows.get(row).and_then(|r| r.get(id_field)),
            DerivedView::Groups(groups) => groups.get(row).map(|g| &g.key),
        }
    }
}

pub struct RecordListProcessor {
    config: ViewConfig,
}

impl Default for RecordListProcessor {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl RecordListProcessor {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Compute the derived view for one interaction
    pub fn process(&self, records: &[Record], request: &ViewRequest) -> Result<DerivedView> {
        let mode = request.mode.unwrap_or(self.config.mode);
        let policy = self.config.missing_field;
        let limit = request.limit.or(self.config.limit);

        let mut indices: Vec<usize> = (0..records.len()).collect();

        if let Some(filter) = &request.filter {
            indices = filter_indices(records, &indices, filter, policy)?;
            log::debug!(
                "filter {}~'{}' kept {}/{} records",
                filter.field,
                filter.needle,
                indices.len(),
                records.len()
            );
        }

        if let Some(sort) = &request.sort {
            let field = sort.key.resolve(mode);
            indices = sort_indices(records, &indices, field, sort.direction, policy)?;
            log::debug!("sorted {} records by {} {:?}", indices.len(), field, sort.direction);
        }

        if let Some(group) = &request.group {
            let mut groups = group_indices(records, &indices, group, mode)?;
            log::debug!("grouped {} records by {} into {} groups", indices.len(), group.key, groups.len());
            if let Some(n) = limit {
                groups.truncate(n);
            }
            return Ok(DerivedView::Groups(groups));
        }

        if let Some(n) = limit {
            indices.truncate(n);
        }
        Ok(DerivedView::Rows(indices.into_iter().map(|i| records[i].clone()).collect()))
    }

    /// Stable single-key sort, resolving a display key through `mode`
    pub fn sort_by(&self, records: &[Record], spec: &SortSpec, mode: DisplayMode) -> Result<Vec<Record>> {
        let view = self.process(records, &ViewRequest::new().mode(mode).sort(spec.clone()))?;
        Ok(into_rows(view))
    }

    pub fn filter_by_substring(&self, records: &[Record], spec: &FilterSpec) -> Result<Vec<Record>> {
        let view = self.process(records, &ViewRequest::new().filter(spec.clone()))?;
        Ok(into_rows(view))
    }

    pub fn group_by_key(&self, records: &[Record], spec: &GroupSpec, mode: DisplayMode) -> Result<Vec<GroupSummary>> {
        let indices: Vec<usize> = (0..records.len()).collect();
        group_indices(records, &indices, spec, mode)
    }

    /// Run `request` and project the resulting rows for a chart, using the
    /// request's display mode or else the configured one. Group views carry
    /// no record ids for a click to forward, so they are rejected.
    pub fn chart(
        &self,
        records: &[Record],
        request: &ViewRequest,
        id_field: &str,
        label_field: &str,
    ) -> Result<Vec<ChartPoint>> {
        if request.group.is_some() {
            return Err(CostLensError::InvalidSpec(
                "charts plot record rows and cannot be grouped".to_string(),
            ));
        }
        let mode = request.mode.unwrap_or(self.config.mode);
        let rows = into_rows(self.process(records, request)?);
        display::project(&rows, mode, id_field, label_field)
    }
}

fn into_rows(view: DerivedView) -> Vec<Record> {
    match view {
        DerivedView::Rows(rows) => rows,
        DerivedView::Groups(_) => Vec::new(),
    }
}
