//! Figure records and the sidecar files that travel with them.

use super::filename::{parse_filename, FilenameFields, PageIndex};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Kind of plot a figure shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotType {
    /// tSNE embedding, the primary spatial plot.
    Tsne,
    Violin,
    Ridge,
    Dot,
    Bar,
    /// Any other `<kind>plot` token.
    Other(String),
}

impl PlotType {
    /// Map a filename token to a plot type.
    pub fn from_token(token: &str) -> Self {
        match token {
            "tsneplot" => PlotType::Tsne,
            "violinplot" => PlotType::Violin,
            "ridgeplot" => PlotType::Ridge,
            "dotplot" => PlotType::Dot,
            "barplot" => PlotType::Bar,
            other => PlotType::Other(other.to_string()),
        }
    }

    /// The filename token for this plot type.
    pub fn as_str(&self) -> &str {
        match self {
            PlotType::Tsne => "tsneplot",
            PlotType::Violin => "violinplot",
            PlotType::Ridge => "ridgeplot",
            PlotType::Dot => "dotplot",
            PlotType::Bar => "barplot",
            PlotType::Other(token) => token,
        }
    }

    pub fn is_tsne(&self) -> bool {
        matches!(self, PlotType::Tsne)
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered figure file of a tissue/method pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureRecord {
    /// Path to the PDF.
    pub path: PathBuf,
    pub plottype: PlotType,
    pub tissue: String,
    pub method: String,
    /// Lower-cased subset identifier.
    pub subset: String,
    /// Subset display name embedded in the filename.
    pub subset_name: Option<String>,
    /// Grouping variable as written in the filename.
    pub groupby: String,
    pub page: Option<PageIndex>,
    pub extra: Option<String>,
}

impl FigureRecord {
    /// Build a record from a figure path.
    ///
    /// Returns `None` when the file name does not follow the figure grammar.
    pub fn from_path<P: AsRef<Path>>(path: P, tissue: &str, method: &str) -> Option<Self> {
        let path = path.as_ref();
        let name = path.file_name()?.to_str()?;
        let fields = parse_filename(name)?;
        Some(Self::from_fields(path.to_path_buf(), tissue, method, fields))
    }

    /// Build a record from already parsed filename fields.
    pub fn from_fields(path: PathBuf, tissue: &str, method: &str, fields: FilenameFields) -> Self {
        Self {
            path,
            plottype: PlotType::from_token(&fields.plottype),
            tissue: tissue.to_string(),
            method: method.to_string(),
            subset: fields.subset,
            subset_name: fields.subset_name,
            groupby: fields.groupby,
            page: fields.page,
            extra: fields.extra,
        }
    }

    /// Legend insets are attached to their tSNE plot, never rendered alone.
    pub fn is_legend(&self) -> bool {
        self.extra
            .as_deref()
            .map(|e| e.contains("legend"))
            .unwrap_or(false)
    }

    /// The `highlighted` pseudo-grouping overlays a subset on all cells.
    pub fn is_highlighted(&self) -> bool {
        self.groupby == "highlighted"
    }

    /// Expression groupings colour cells by a continuous value.
    pub fn is_expression(&self) -> bool {
        self.groupby.contains("expression")
    }

    /// Whether this is the universal subset.
    pub fn is_all_cells(&self) -> bool {
        self.subset == "allcells"
    }

    /// Path of a sibling file sharing this figure's stem.
    pub fn sibling(&self, suffix: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.path.with_file_name(format!("{}{}", stem, suffix))
    }
}

/// First and last gene of a per-gene series page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneRange {
    pub first: String,
    pub last: String,
}

impl GeneRange {
    /// Parse a gene listing, one gene per line.
    pub fn from_listing(listing: &str) -> Option<Self> {
        let genes: Vec<&str> = listing
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let first = genes.first()?;
        let last = genes.last()?;
        Some(Self {
            first: first.to_string(),
            last: last.to_string(),
        })
    }
}

/// Optional files next to a figure that change how it is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureSidecars {
    /// `<stem>.txt`: caption used verbatim.
    pub caption: Option<String>,
    /// `<stem>_genes.txt`: genes shown on this page.
    pub genes: Option<GeneRange>,
    /// `<stem>_legend.pdf`: legend inset.
    pub legend: Option<PathBuf>,
}

impl FigureSidecars {
    /// Look up the sidecar files of a figure.
    pub fn discover(record: &FigureRecord) -> Result<Self> {
        let caption_path = record.sibling(".txt");
        let caption = if caption_path.is_file() {
            Some(fs::read_to_string(&caption_path)?)
        } else {
            None
        };

        let genes_path = record.sibling("_genes.txt");
        let genes = if genes_path.is_file() {
            GeneRange::from_listing(&fs::read_to_string(&genes_path)?)
        } else {
            None
        };

        let legend_path = record.sibling("_legend.pdf");
        let legend = legend_path.is_file().then_some(legend_path);

        Ok(Self {
            caption,
            genes,
            legend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_from_path() {
        let record = FigureRecord::from_path(
            "figs/Pancreas/facs/Allcells_cell_ontology_class_tsneplot.pdf",
            "Pancreas",
            "facs",
        )
        .unwrap();
        assert_eq!(record.plottype, PlotType::Tsne);
        assert_eq!(record.tissue, "Pancreas");
        assert!(record.is_all_cells());
        assert!(!record.is_legend());
        assert!(!record.is_highlighted());
    }

    #[test]
    fn test_non_matching_path() {
        assert!(FigureRecord::from_path("figs/readme.md", "Pancreas", "facs").is_none());
    }

    #[test]
    fn test_legend_detection() {
        let record = FigureRecord::from_path(
            "Allcells_cell_ontology_class_tsneplot_legend.pdf",
            "Pancreas",
            "facs",
        )
        .unwrap();
        assert!(record.is_legend());
    }

    #[test]
    fn test_plot_type_tokens() {
        for token in ["tsneplot", "violinplot", "ridgeplot", "dotplot", "barplot", "heatplot"] {
            assert_eq!(PlotType::from_token(token).as_str(), token);
        }
        assert_eq!(
            PlotType::from_token("heatplot"),
            PlotType::Other("heatplot".to_string())
        );
    }

    #[test]
    fn test_gene_range_from_listing() {
        let range = GeneRange::from_listing("Ins1\nGcg\n\nSst\n").unwrap();
        assert_eq!(range.first, "Ins1");
        assert_eq!(range.last, "Sst");
        assert!(GeneRange::from_listing("\n\n").is_none());
    }

    #[test]
    fn test_discover_sidecars() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("Allcells_cell_ontology_class_dotplot_1-of-2.pdf");
        fs::write(&pdf, b"").unwrap();
        fs::write(
            dir.path().join("Allcells_cell_ontology_class_dotplot_1-of-2_genes.txt"),
            "Ins1\nIns2\n",
        )
        .unwrap();

        let record = FigureRecord::from_path(&pdf, "Pancreas", "facs").unwrap();
        let sidecars = FigureSidecars::discover(&record).unwrap();
        assert_eq!(sidecars.caption, None);
        assert_eq!(sidecars.legend, None);
        assert_eq!(
            sidecars.genes,
            Some(GeneRange {
                first: "Ins1".to_string(),
                last: "Ins2".to_string()
            })
        );
    }

    #[test]
    fn test_discover_caption_and_legend() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("Allcells_cell_ontology_class_tsneplot.pdf");
        fs::write(&pdf, b"").unwrap();
        fs::write(
            dir.path().join("Allcells_cell_ontology_class_tsneplot.txt"),
            "Custom caption.",
        )
        .unwrap();
        fs::write(
            dir.path().join("Allcells_cell_ontology_class_tsneplot_legend.pdf"),
            b"",
        )
        .unwrap();

        let record = FigureRecord::from_path(&pdf, "Pancreas", "facs").unwrap();
        let sidecars = FigureSidecars::discover(&record).unwrap();
        assert_eq!(sidecars.caption.as_deref(), Some("Custom caption."));
        assert_eq!(
            sidecars.legend,
            Some(dir.path().join("Allcells_cell_ontology_class_tsneplot_legend.pdf"))
        );
    }
}
