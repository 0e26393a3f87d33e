//! Supplement runner: every selected tissue/method chapter plus the master
//! document.

use super::layout::SupplementLayout;
use super::master::write_master;
use super::tissue::{discover_tissue_methods, render_tissue, scan_figures};
use crate::annotation::{AnnotationTable, SubsetConfig};
use crate::error::Result;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Outcome of one tissue/method chapter.
#[derive(Debug, Clone)]
pub struct TissueReport {
    pub tissue: String,
    pub method: String,
    /// Chapter file written.
    pub output: PathBuf,
    pub figures: usize,
    pub subsections: usize,
    pub tables: usize,
    /// PDF names outside the filename grammar.
    pub skipped: Vec<String>,
}

/// Outcome of a supplement build.
#[derive(Debug, Clone)]
pub struct SupplementReport {
    /// Chapters in processing order.
    pub tissues: Vec<TissueReport>,
    /// Master document written.
    pub master: PathBuf,
}

impl SupplementReport {
    /// Total number of figures rendered.
    pub fn n_figures(&self) -> usize {
        self.tissues.iter().map(|t| t.figures).sum()
    }

    /// Chapter files in processing order.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.tissues.iter().map(|t| t.output.clone()).collect()
    }
}

/// Builder for a supplement build.
#[derive(Debug, Clone)]
pub struct Supplement {
    layout: SupplementLayout,
    tissue: Option<String>,
    method: Option<String>,
}

impl Default for Supplement {
    fn default() -> Self {
        Self::new(SupplementLayout::default())
    }
}

impl Supplement {
    /// Create a build over every tissue and method.
    pub fn new(layout: SupplementLayout) -> Self {
        Self {
            layout,
            tissue: None,
            method: None,
        }
    }

    /// Restrict to tissues matching a glob pattern. `all` selects every tissue.
    pub fn tissue(mut self, tissue: &str) -> Self {
        self.tissue = (tissue != "all").then(|| tissue.to_string());
        self
    }

    /// Restrict to methods matching a glob pattern, ignoring case. `all`
    /// selects every method.
    pub fn method(mut self, method: &str) -> Self {
        self.method = (!method.eq_ignore_ascii_case("all")).then(|| method.to_lowercase());
        self
    }

    pub fn layout(&self) -> &SupplementLayout {
        &self.layout
    }

    /// Render every selected chapter, then the master document.
    pub fn run(&self) -> Result<SupplementReport> {
        let root = self.layout.figure_root();
        info!("Looking for figures in {:?}", root);
        let tissue_methods =
            discover_tissue_methods(&root, self.tissue.as_deref(), self.method.as_deref())?;

        let mut tissues = Vec::new();
        for tm in &tissue_methods {
            let scanned = scan_figures(tm)?;
            if scanned.n_pdfs() == 0 {
                debug!("No figures in {:?}", tm.dir);
                continue;
            }
            info!(
                "--- tissue: \"{}\", method: \"{}\" ({} figures) ---",
                tm.tissue,
                tm.method,
                scanned.records.len()
            );

            let config = SubsetConfig::from_path(self.layout.yaml_path(&tm.tissue, &tm.method))?;
            let annotation = if self.layout.has_annotation(&tm.tissue) {
                Some(AnnotationTable::from_csv(
                    self.layout.annotation_path(&tm.tissue, &tm.method),
                )?)
            } else {
                None
            };

            let chapter = render_tissue(
                &tm.tissue,
                &tm.method,
                &scanned.records,
                annotation.as_ref(),
                config.as_ref(),
            )?;

            let output = self.layout.tissue_output(&tm.tissue, &tm.method);
            fs::write(&output, &chapter.tex)?;
            info!("Wrote {:?}", output);

            tissues.push(TissueReport {
                tissue: tm.tissue.clone(),
                method: tm.method.clone(),
                output,
                figures: chapter.figures,
                subsections: chapter.subsections,
                tables: chapter.tables,
                skipped: scanned.skipped,
            });
        }

        let report = SupplementReport {
            master: self.layout.master_output.clone(),
            tissues,
        };
        write_master(
            &self.layout.template,
            &self.layout.include_marker,
            &report.master,
            &report.outputs(),
        )?;
        info!("Wrote {:?} with {} chapters", report.master, report.tissues.len());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        let supplement = Supplement::default().tissue("all").method("ALL");
        assert_eq!(supplement.tissue, None);
        assert_eq!(supplement.method, None);

        let supplement = Supplement::default().tissue("Pancreas").method("FACS");
        assert_eq!(supplement.tissue.as_deref(), Some("Pancreas"));
        assert_eq!(supplement.method.as_deref(), Some("facs"));
    }

    #[test]
    fn test_missing_figure_root_is_an_error() {
        let layout = SupplementLayout::rooted("/nonexistent/tabula-muris", "/nonexistent/out");
        assert!(Supplement::new(layout).run().is_err());
    }
}
