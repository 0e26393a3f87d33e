//! tissue-tex - per-tissue supplement chapters
//!
//! Command-line interface for generating the tissue supplement.

use clap::Parser;
use tissue_supplement::error::Result;
use tissue_supplement::supplement::{Supplement, SupplementLayout};

/// Environment variable naming an optional layout YAML.
const LAYOUT_ENV: &str = "TISSUE_TEX_LAYOUT";

/// Create per-tissue TeX files and the supplement master document
#[derive(Parser)]
#[command(name = "tissue-tex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Figures folder under the base directory
    /// [default: 30_tissue_supplement_figures]
    #[arg(long)]
    figure_folder: Option<String>,

    /// Tissue to process (glob pattern), or "all"
    #[arg(long, default_value = "all")]
    tissue: String,

    /// Method to process (case-insensitive glob pattern), or "all"
    #[arg(long, default_value = "all")]
    method: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cmd_generate(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_generate(cli: &Cli) -> Result<()> {
    let mut layout = match std::env::var_os(LAYOUT_ENV) {
        Some(path) => {
            log::info!("Loading layout from {:?}...", path);
            SupplementLayout::from_path(path)?
        }
        None => SupplementLayout::default(),
    };
    if let Some(folder) = &cli.figure_folder {
        layout = layout.with_figure_folder(folder);
    }

    let report = Supplement::new(layout)
        .tissue(&cli.tissue)
        .method(&cli.method)
        .run()?;

    for tissue in &report.tissues {
        log::info!(
            "  {} {}: {} figures in {} subsections, {} tables -> {:?}",
            tissue.tissue,
            tissue.method,
            tissue.figures,
            tissue.subsections,
            tissue.tables,
            tissue.output
        );
        if !tissue.skipped.is_empty() {
            log::debug!("  skipped: {}", tissue.skipped.join(", "));
        }
    }
    log::info!(
        "Done! {} figures in {} chapters, master document {:?}",
        report.n_figures(),
        report.tissues.len(),
        report.master
    );
    Ok(())
}
