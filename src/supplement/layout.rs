//! Where the supplement reads its inputs and writes its outputs.

use crate::error::{Result, SupplementError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder in the template replaced by the `\include` directives.
pub const INCLUDE_MARKER: &str = "%%% --- INCLUDE TISSUES HERE --- %";

/// Filesystem layout of one supplement build.
///
/// Inputs live under `base_dir`, which defaults to the parent of the working
/// directory; outputs are written relative to the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementLayout {
    /// Root of the analysis repository.
    pub base_dir: PathBuf,
    /// Figures folder under `base_dir`, holding `<Tissue>/<method>/*.pdf`.
    pub figure_folder: String,
    /// Subset filter YAMLs under `base_dir`.
    pub yaml_folder: PathBuf,
    /// Annotation CSVs under `base_dir`.
    pub annotation_folder: PathBuf,
    /// Directory for the per-tissue TeX files.
    pub output_dir: PathBuf,
    /// Template holding the include placeholder.
    pub template: PathBuf,
    /// Master document written from the template.
    pub master_output: PathBuf,
    /// Placeholder text in the template.
    pub include_marker: String,
    /// Tissues without per-cell annotation.
    pub unannotated_tissues: Vec<String>,
}

impl Default for SupplementLayout {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(".."),
            figure_folder: "30_tissue_supplement_figures".to_string(),
            yaml_folder: PathBuf::from("28_tissue_yamls_for_supplement"),
            annotation_folder: PathBuf::from("00_data_ingest/03_tissue_annotation_csv"),
            output_dir: PathBuf::from("."),
            template: PathBuf::from("tissue_supplement_template.tex"),
            master_output: PathBuf::from("tissue_supplement.tex"),
            include_marker: INCLUDE_MARKER.to_string(),
            unannotated_tissues: vec!["Microbiome".to_string()],
        }
    }
}

impl SupplementLayout {
    /// Layout rooted at `base_dir`, with outputs under `output_dir`.
    pub fn rooted<P: AsRef<Path>, Q: AsRef<Path>>(base_dir: P, output_dir: Q) -> Self {
        let output_dir = output_dir.as_ref().to_path_buf();
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            template: output_dir.join("tissue_supplement_template.tex"),
            master_output: output_dir.join("tissue_supplement.tex"),
            output_dir,
            ..Self::default()
        }
    }

    /// Load from YAML string. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(SupplementError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(SupplementError::from)
    }

    /// Load from a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Override the figures folder name.
    pub fn with_figure_folder(mut self, folder: &str) -> Self {
        self.figure_folder = folder.to_string();
        self
    }

    /// Directory holding `<Tissue>/<method>` figure folders.
    pub fn figure_root(&self) -> PathBuf {
        self.base_dir.join(&self.figure_folder)
    }

    /// `<tissue lowercase>_<method>.yaml`
    pub fn yaml_path(&self, tissue: &str, method: &str) -> PathBuf {
        self.base_dir
            .join(&self.yaml_folder)
            .join(format!("{}_{}.yaml", tissue.to_lowercase(), method))
    }

    /// `<Tissue>_<method>_annotation.csv`
    pub fn annotation_path(&self, tissue: &str, method: &str) -> PathBuf {
        self.base_dir
            .join(&self.annotation_folder)
            .join(format!("{}_{}_annotation.csv", tissue, method))
    }

    /// `<Tissue>_<method>_auto_generated.tex`
    pub fn tissue_output(&self, tissue: &str, method: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}_auto_generated.tex", tissue, method))
    }

    /// Whether a tissue has per-cell annotation.
    pub fn has_annotation(&self, tissue: &str) -> bool {
        !self.unannotated_tissues.iter().any(|t| t == tissue)
    }
}
