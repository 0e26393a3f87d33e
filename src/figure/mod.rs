//! Figure discovery: filename grammar, canonical ordering and records.

mod filename;
mod order;
mod record;

pub use filename::{parse_filename, FilenameFields, PageIndex, FILENAME_PATTERN};
pub use order::{
    alphabetical_sort, compare_case_insensitive, order_records, CategoryOrder, OrderedField,
    GROUPBY_ORDER, PLOT_ORDER, SUBSET_ORDER,
};
pub use record::{FigureRecord, FigureSidecars, GeneRange, PlotType};
