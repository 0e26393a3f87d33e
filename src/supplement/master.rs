//! The master document: a template with one `\include` per chapter.

use crate::error::{Result, SupplementError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name used to `\include` a chapter file: its path without the `.tex`
/// extension or a leading `./`.
pub fn include_name(path: &Path) -> String {
    let stem = path.with_extension("");
    let stem = stem.strip_prefix(".").unwrap_or(&stem);
    stem.to_string_lossy().replace('\\', "/")
}

/// One `\include{...}` line per chapter, in the given order.
pub fn include_block(chapters: &[PathBuf]) -> String {
    chapters
        .iter()
        .map(|p| format!("\\include{{{}}}", include_name(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the placeholder in a template with the include block.
///
/// Returns `None` when the template has no placeholder.
pub fn splice_includes(template: &str, marker: &str, block: &str) -> Option<String> {
    template
        .contains(marker)
        .then(|| template.replace(marker, block))
}

/// Write the master document from a template file.
///
/// Chapters inside the master document's directory are included by their
/// relative path.
pub fn write_master(
    template: &Path,
    marker: &str,
    output: &Path,
    chapters: &[PathBuf],
) -> Result<()> {
    let content = fs::read_to_string(template)?;
    let relative: Vec<PathBuf> = match output.parent() {
        Some(base) => chapters
            .iter()
            .map(|p| p.strip_prefix(base).map(Path::to_path_buf).unwrap_or_else(|_| p.clone()))
            .collect(),
        None => chapters.to_vec(),
    };
    let master = splice_includes(&content, marker, &include_block(&relative)).ok_or_else(|| {
        SupplementError::MissingPlaceholder {
            path: template.display().to_string(),
            marker: marker.to_string(),
        }
    })?;
    fs::write(output, master)?;
    Ok(())
}
