//! Building the supplement: per-tissue chapters and the master document.

mod layout;
mod master;
mod runner;
mod tissue;

pub use layout::{SupplementLayout, INCLUDE_MARKER};
pub use master::{include_block, include_name, splice_includes, write_master};
pub use runner::{Supplement, SupplementReport, TissueReport};
pub use tissue::{
    discover_tissue_methods, render_tissue, scan_figures, section_tex, AssemblyState,
    ScannedFigures, TissueChapter, TissueMethod, Transition, CLEARPAGE,
};
