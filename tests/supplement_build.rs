//! Integration tests for a full supplement build.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tissue_supplement::prelude::*;
use tissue_supplement::supplement::INCLUDE_MARKER;

const ANNOTATION: &str = "\
cell,cell_ontology_class,free_annotation,cluster.ids
c1,beta cell,beta_1,0
c2,alpha cell,NA,1
c3,beta cell,beta_2,0
c4,NA,NA,2
";

const SUBSETS: &str = "\
SUBSET:
  CELL_ONTOLOGY_CLASS:
    FILTER_COLUMN: cell_ontology_class
    FILTER_VALUE: beta cell
";

fn touch(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        fs::write(dir.join(name), b"%PDF").unwrap();
    }
}

/// Lay out a small analysis tree: one annotated tissue, one without
/// annotation, the subset YAML and the master template.
fn create_tree() -> (TempDir, SupplementLayout) {
    let root = TempDir::new().unwrap();
    let base = root.path().join("repo");
    let out = root.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let layout = SupplementLayout::rooted(&base, &out);
    let figures = layout.figure_root();
    touch(
        &figures.join("Pancreas").join("facs"),
        &[
            "Endocrine_cell_ontology_class_violinplot.pdf",
            "Allcells_cluster-ids_dotplot.pdf",
            "Allcells_cell_ontology_class_tsneplot.pdf",
            "Allcells_cell_ontology_class_tsneplot_legend.pdf",
            "notes.pdf",
        ],
    );
    touch(
        &figures.join("Microbiome").join("facs"),
        &["Allcells_cell_ontology_class_tsneplot.pdf"],
    );
    fs::create_dir_all(figures.join("Lung").join("droplet")).unwrap();

    let csv = layout.annotation_path("Pancreas", "facs");
    fs::create_dir_all(csv.parent().unwrap()).unwrap();
    fs::write(&csv, ANNOTATION).unwrap();

    let yaml = layout.yaml_path("Pancreas", "facs");
    fs::create_dir_all(yaml.parent().unwrap()).unwrap();
    fs::write(&yaml, SUBSETS).unwrap();

    fs::write(
        &layout.template,
        format!(
            "\\documentclass{{article}}\n\\begin{{document}}\n{}\n\\end{{document}}\n",
            INCLUDE_MARKER
        ),
    )
    .unwrap();

    (root, layout)
}

#[test]
fn test_full_build() {
    let (_root, layout) = create_tree();
    let report = Supplement::new(layout.clone()).run().unwrap();

    // Empty folders produce no chapter.
    let names: Vec<&str> = report.tissues.iter().map(|t| t.tissue.as_str()).collect();
    assert_eq!(names, vec!["Microbiome", "Pancreas"]);
    assert_eq!(report.n_figures(), 4);

    let pancreas = &report.tissues[1];
    assert_eq!(pancreas.figures, 3);
    assert_eq!(pancreas.subsections, 3);
    assert_eq!(pancreas.tables, 3);
    assert_eq!(pancreas.skipped, vec!["notes.pdf".to_string()]);

    let tex = fs::read_to_string(&pancreas.output).unwrap();
    assert!(tex.starts_with("\\clearpage\n\\section{Pancreas FACS}\n"));
    assert_eq!(tex.matches("\\begin{figure}").count(), 3);
    assert_eq!(tex.matches("\\begin{table}").count(), 3);
    assert!(tex.contains("tsneplot_legend\"}.pdf"));

    // All cells first, cell types before cluster IDs.
    let cell_types = tex
        .find("\\subsection{All Cells, labeled by \\emph{Cell Ontology Class}")
        .unwrap();
    let clusters = tex.find("Allcells_cluster-ids_dotplot").unwrap();
    let endocrine = tex.find("Endocrine_cell_ontology_class_violinplot").unwrap();
    assert!(cell_types < clusters);
    assert!(clusters < endocrine);

    // The configured filter keeps only beta cells for the endocrine subset.
    let endocrine_tex = &tex[endocrine..];
    assert!(endocrine_tex.contains("A: beta cell."));
    assert!(!endocrine_tex.contains("alpha cell"));
    assert!(tex.contains("alpha cell & 1 \\\\\n"));
    assert!(tex.contains("NA & 1 \\\\\n"));

    let microbiome = fs::read_to_string(&report.tissues[0].output).unwrap();
    assert!(microbiome.contains("\\section{Microbiome FACS}"));
    assert!(microbiome.contains("\\subsection{"));
    assert!(!microbiome.contains("\\begin{table}"));

    let master = fs::read_to_string(&layout.master_output).unwrap();
    assert!(master.contains(
        "\\include{Microbiome_facs_auto_generated}\n\\include{Pancreas_facs_auto_generated}"
    ));
    assert!(!master.contains(INCLUDE_MARKER));
}

#[test]
fn test_selected_tissue_and_method() {
    let (_root, layout) = create_tree();
    let report = Supplement::new(layout.clone())
        .tissue("Pancreas")
        .method("FACS")
        .run()
        .unwrap();

    assert_eq!(report.tissues.len(), 1);
    assert_eq!(report.tissues[0].method, "facs");
    assert!(!layout.tissue_output("Microbiome", "facs").exists());

    let master = fs::read_to_string(&layout.master_output).unwrap();
    assert!(master.contains("\\include{Pancreas_facs_auto_generated}"));
    assert!(!master.contains("Microbiome"));
}

#[test]
fn test_wildcard_tissue_selector() {
    let (_root, layout) = create_tree();
    let report = Supplement::new(layout).tissue("*o*").method("fa*").run().unwrap();

    let names: Vec<&str> = report.tissues.iter().map(|t| t.tissue.as_str()).collect();
    assert_eq!(names, vec!["Microbiome"]);

    let (_root, layout) = create_tree();
    let report = Supplement::new(layout).tissue("P*").run().unwrap();
    assert_eq!(report.tissues.len(), 1);
    assert_eq!(report.tissues[0].tissue, "Pancreas");
}

#[test]
fn test_missing_yaml_falls_back_to_name() {
    let (_root, layout) = create_tree();
    fs::remove_file(layout.yaml_path("Pancreas", "facs")).unwrap();

    let report = Supplement::new(layout).tissue("Pancreas").run().unwrap();
    // "Endocrine" matches no cell type, so its count table is dropped.
    assert_eq!(report.tissues[0].tables, 2);
    assert_eq!(report.tissues[0].figures, 3);
}

#[test]
fn test_missing_annotation_is_an_error() {
    let (_root, layout) = create_tree();
    fs::remove_file(layout.annotation_path("Pancreas", "facs")).unwrap();

    let result = Supplement::new(layout).run();
    assert!(matches!(result, Err(SupplementError::Csv(_))));
}

#[test]
fn test_template_without_placeholder() {
    let (_root, layout) = create_tree();
    fs::write(&layout.template, "\\begin{document}\n\\end{document}\n").unwrap();

    let result = Supplement::new(layout).run();
    assert!(matches!(result, Err(SupplementError::MissingPlaceholder { .. })));
}
