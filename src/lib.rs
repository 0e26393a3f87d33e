//! Tissue Supplement Generator
//!
//! This library turns a folder of rendered single-cell figures into the
//! per-tissue chapters of a LaTeX supplement.
//!
//! # Overview
//!
//! The library is organized into modules along the data flow:
//!
//! - **figure**: Filename grammar, canonical ordering, figure records
//! - **annotation**: Per-cell annotation tables, subset selection, labels
//! - **tex**: Titles, captions, figure blocks and count tables
//! - **supplement**: Chapter assembly, master document, the runner
//!
//! # Example
//!
//! ```no_run
//! use tissue_supplement::prelude::*;
//!
//! let report = Supplement::new(SupplementLayout::default())
//!     .tissue("Pancreas")
//!     .method("facs")
//!     .run()
//!     .unwrap();
//! println!("{} figures", report.n_figures());
//! ```

pub mod annotation;
pub mod error;
pub mod figure;
pub mod supplement;
pub mod tex;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::annotation::{
        grouping_values, select_subset, AnnotationTable, FilterRule, LabelCounts, LabelSet,
        SelectionSource, SubsetConfig, SubsetSelection,
    };
    pub use crate::error::{Result, SupplementError};
    pub use crate::figure::{
        order_records, parse_filename, CategoryOrder, FigureRecord, FigureSidecars,
        FilenameFields, PageIndex, PlotType,
    };
    pub use crate::supplement::{
        render_tissue, AssemblyState, Supplement, SupplementLayout, SupplementReport,
        TissueChapter, TissueReport,
    };
    pub use crate::tex::{count_table_tex, FigureTex};
}
