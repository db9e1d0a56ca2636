//! Derived-view operations: sort, filter and group
//!
//! Each operation works on record positions internally so a pipeline can
//! chain them without cloning rows, and materializes records only at the
//! end.

mod compare;
mod filter;
mod group;
mod sort;


pub use filter::{filter_records, FilterSpec};
pub use group::{group_records, FieldSum, GroupOrder, GroupSpec, GroupSummary};
pub use sort::{sort_records, SortDirection, SortKey, SortSpec};

pub(crate) use filter::filter_indices;
pub(crate) use group::group_indices;
pub(crate) use sort::sort_indices;
