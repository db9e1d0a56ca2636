//! View configuration

use crate::display::DisplayMode;
use serde::{Deserialize, Serialize};

/// What to do when a record lacks the field a view is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Stop with `MissingField`
    #[default]
    Fail,
    /// Sorts place such records last, filters drop them.
    /// Grouping still fails.
    SortLast,
}

/// View configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Display mode used when a request does not carry one
    pub mode: DisplayMode,
    pub missing_field: MissingFieldPolicy,
    /// Cap on rows or groups returned; `None` keeps everything
    pub limit: Option<usize>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Cost,
            missing_field: MissingFieldPolicy::Fail,
            limit: None,
        }
    }
}
