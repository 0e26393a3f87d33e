//! Per-cell annotation: loading, subset selection and category labels.

mod filter;
mod labels;
mod select;
mod table;

pub use filter::{
    name_heuristic, FilterRule, FilterValue, SubsetConfig, SubsetFilter, CELL_TYPE_COLUMN,
};
pub use labels::{grouping_column, grouping_values, is_int, LabelCounts, LabelSet, NA_LABEL};
pub use select::{is_truthy, select_subset, subset_column, SelectionSource, SubsetSelection};
pub use table::{is_missing_token, AnnotationTable, MISSING_TOKENS};
