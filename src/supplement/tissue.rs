//! Assembly of one tissue/method chapter.

use crate::annotation::{grouping_values, select_subset, AnnotationTable, LabelSet, SubsetConfig};
use crate::error::Result;
use crate::figure::{order_records, FigureRecord, FigureSidecars};
use crate::tex::text::{method_tex, tissue_tex};
use crate::tex::FigureTex;
use glob::{glob, GlobError, MatchOptions, Pattern};
use log::debug;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Page break between figure groups.
pub const CLEARPAGE: &str = "\n\\clearpage\n";

/// A `<Tissue>/<method>` folder of figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TissueMethod {
    pub tissue: String,
    pub method: String,
    pub dir: PathBuf,
}

/// Paths matching `pattern` inside `dir`, sorted. `dir` itself is taken
/// literally.
fn glob_in(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let mut paths = Vec::new();
    for entry in glob(&full)? {
        paths.push(entry.map_err(GlobError::into_error)?);
    }
    paths.sort();
    Ok(paths)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// List the tissue/method folders under a figures root, sorted by path.
///
/// Both selectors are glob patterns (`Lung*`); `method` ignores case.
/// `None` selects all.
pub fn discover_tissue_methods(
    figure_root: &Path,
    tissue: Option<&str>,
    method: Option<&str>,
) -> Result<Vec<TissueMethod>> {
    if !figure_root.is_dir() {
        return Err(io::Error::new(
            ErrorKind::NotFound,
            format!("figure folder {:?} not found", figure_root),
        )
        .into());
    }
    let method = method.map(Pattern::new).transpose()?;
    let ignore_case = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut found = Vec::new();
    for tissue_dir in glob_in(figure_root, tissue.unwrap_or("*"))? {
        if !tissue_dir.is_dir() {
            continue;
        }
        let tissue_name = dir_name(&tissue_dir);
        for method_dir in glob_in(&tissue_dir, "*")? {
            let method_name = dir_name(&method_dir);
            let selected = method
                .as_ref()
                .map(|m| m.matches_with(&method_name, ignore_case))
                .unwrap_or(true);
            if !method_dir.is_dir() || !selected {
                continue;
            }
            found.push(TissueMethod {
                tissue: tissue_name.clone(),
                method: method_name,
                dir: method_dir,
            });
        }
    }
    Ok(found)
}

/// Figures found in one tissue/method folder.
#[derive(Debug, Clone, Default)]
pub struct ScannedFigures {
    /// Renderable figures in render order.
    pub records: Vec<FigureRecord>,
    /// PDF names outside the filename grammar.
    pub skipped: Vec<String>,
    /// Legend insets, attached to their tSNE plot at render time.
    pub legends: usize,
}

impl ScannedFigures {
    /// Number of PDFs in the folder.
    pub fn n_pdfs(&self) -> usize {
        self.records.len() + self.skipped.len() + self.legends
    }
}

/// Collect and order the figures of a tissue/method folder.
pub fn scan_figures(tm: &TissueMethod) -> Result<ScannedFigures> {
    let mut scanned = ScannedFigures::default();
    let paths: Vec<PathBuf> = glob_in(&tm.dir, "*.pdf")?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();

    for path in paths {
        match FigureRecord::from_path(&path, &tm.tissue, &tm.method) {
            Some(record) if record.is_legend() => scanned.legends += 1,
            Some(record) => scanned.records.push(record),
            None => {
                debug!("Skipping {:?}: name does not follow the figure grammar", path);
                scanned.skipped.push(dir_name(&path));
            }
        }
    }
    order_records(&mut scanned.records);
    Ok(scanned)
}

/// Whether a figure opens a new subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NewSubsection,
    SameSubsection,
}

/// Loop-local state of the chapter assembler.
///
/// Tracks the (subset, groupby) pair of the previous figure so a subsection
/// header is emitted only when the pair changes.
#[derive(Debug, Clone, Default)]
pub struct AssemblyState {
    previous: Option<(String, String)>,
    figures_in_subsection: usize,
    figures_seen: usize,
}

impl AssemblyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page breaks separate every figure group after the first.
    pub fn needs_page_break(&self) -> bool {
        self.figures_seen > 0
    }

    /// Register the next figure.
    pub fn advance(&mut self, subset: &str, groupby: &str) -> Transition {
        self.figures_seen += 1;
        let same = self
            .previous
            .as_ref()
            .map(|(s, g)| s == subset && g == groupby)
            .unwrap_or(false);
        if same {
            self.figures_in_subsection += 1;
            Transition::SameSubsection
        } else {
            self.previous = Some((subset.to_string(), groupby.to_string()));
            self.figures_in_subsection = 0;
            Transition::NewSubsection
        }
    }

    /// Figures seen in the current subsection before the latest one.
    pub fn figures_in_subsection(&self) -> usize {
        self.figures_in_subsection
    }

    pub fn figures_seen(&self) -> usize {
        self.figures_seen
    }
}

/// Rendered chapter of one tissue/method pair.
#[derive(Debug, Clone, Default)]
pub struct TissueChapter {
    pub tex: String,
    pub figures: usize,
    pub subsections: usize,
    pub tables: usize,
}

/// `\clearpage` and the `\section` heading of a chapter.
pub fn section_tex(tissue: &str, method: &str) -> String {
    format!(
        "\\clearpage\n\\section{{{} {}}}\n",
        tissue_tex(tissue),
        method_tex(method)
    )
}

/// Render a chapter from ordered figure records.
///
/// Without an annotation table, subsections carry no count table.
pub fn render_tissue(
    tissue: &str,
    method: &str,
    records: &[FigureRecord],
    annotation: Option<&AnnotationTable>,
    config: Option<&SubsetConfig>,
) -> Result<TissueChapter> {
    let mut chapter = TissueChapter {
        tex: section_tex(tissue, method),
        ..TissueChapter::default()
    };
    let mut state = AssemblyState::new();

    for record in records {
        if state.needs_page_break() {
            chapter.tex.push_str(CLEARPAGE);
        }

        let selection = select_subset(&record.subset, &record.groupby, annotation, config);
        let values = selection
            .as_ref()
            .and_then(|s| grouping_values(&s.table, &record.groupby).ok());
        let labels = values.as_deref().map(LabelSet::from_values);
        let sidecars = FigureSidecars::discover(record)?;
        let figure = FigureTex::new(record, labels.as_ref(), sidecars);

        let transition = state.advance(&record.subset, &record.groupby);
        debug!(
            "subset: {}, groupby: {}, plottype: {}, figure {} in subsection, page: {:?}, extra: {:?}",
            record.subset,
            record.groupby,
            record.plottype,
            state.figures_in_subsection(),
            record.page,
            record.extra
        );

        if transition == Transition::NewSubsection {
            chapter.tex.push_str(&figure.subsection_tex());
            chapter.subsections += 1;

            if annotation.is_some() {
                if !record.is_expression() {
                    if let (Some(values), Some(labels)) = (&values, &labels) {
                        let counts = labels.counts(values);
                        if let Some(table) = figure.count_table_tex(&counts) {
                            debug!(
                                "Adding table of {} {} cells per {}",
                                counts.total(),
                                record.subset,
                                record.groupby
                            );
                            chapter.tex.push_str(&table);
                            chapter.tables += 1;
                        }
                    }
                }
                if !record.is_highlighted() {
                    chapter.tex.push_str("\n\\clearpage");
                }
            }
        }

        chapter.tex.push_str(&figure.figure_tex());
        chapter.figures += 1;
    }

    Ok(chapter)
}
