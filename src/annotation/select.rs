//! Selecting the cells of one figure's subset.

use super::filter::{name_heuristic, FilterRule, SubsetConfig};
use super::table::AnnotationTable;
use log::{debug, warn};

/// How a subset's cells were chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionSource {
    /// The universal subset: every annotated cell.
    AllCells,
    /// A boolean `subset<LETTER>` column.
    SubsetColumn(String),
    /// The boolean column was missing; every cell is used instead.
    MissingSubsetColumn(String),
    /// A filter rule from the subset YAML.
    Configured { column: String, rule: FilterRule },
    /// A filter rule derived from the subset name.
    NameHeuristic { column: String, rule: FilterRule },
}

/// Rows of an annotation table belonging to one subset.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetSelection {
    pub table: AnnotationTable,
    pub source: SelectionSource,
}

/// Name of the boolean column for a `subset<letter>...` subset.
///
/// Returns `None` for subsets without the reserved prefix.
pub fn subset_column(subset: &str) -> Option<String> {
    let lowered = subset.to_lowercase();
    let rest = lowered.strip_prefix("subset")?;
    let letter = rest.chars().next()?;
    Some(format!("subset{}", letter.to_uppercase()))
}

/// Whether a raw value of a boolean subset column marks membership.
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some("True" | "TRUE" | "true" | "T" | "1")
    )
}

/// Select the cells shown by a figure.
///
/// Returns `None` when the tissue has no annotation table.
pub fn select_subset(
    subset: &str,
    groupby: &str,
    annotation: Option<&AnnotationTable>,
    config: Option<&SubsetConfig>,
) -> Option<SubsetSelection> {
    let annotation = annotation?;

    if let Some(column) = subset_column(subset) {
        return Some(match annotation.column(&column) {
            Ok(values) => {
                let mask: Vec<bool> = values.iter().map(|v| is_truthy(v.as_deref())).collect();
                SubsetSelection {
                    table: annotation.filter_rows(&mask),
                    source: SelectionSource::SubsetColumn(column),
                }
            }
            Err(_) => {
                warn!("{} not found in annotation, using all cells for '{}'", column, subset);
                SubsetSelection {
                    table: annotation.clone(),
                    source: SelectionSource::MissingSubsetColumn(column),
                }
            }
        });
    }

    if subset.eq_ignore_ascii_case("allcells") {
        return Some(SubsetSelection {
            table: annotation.clone(),
            source: SelectionSource::AllCells,
        });
    }

    let configured = config
        .and_then(|c| c.filter_for(groupby))
        .and_then(|f| f.rule())
        .map(|(column, rule)| (column.to_string(), rule));
    let is_configured = configured.is_some();
    let (column, rule) = configured.unwrap_or_else(|| name_heuristic(subset));
    debug!("Selecting '{}' cells with {} {:?}", subset, column, rule);

    let mask: Vec<bool> = match annotation.column(&column) {
        Ok(values) => values.iter().map(|v| rule.matches(v.as_deref())).collect(),
        Err(_) => vec![false; annotation.n_cells()],
    };

    let source = if is_configured {
        SelectionSource::Configured { column, rule }
    } else {
        SelectionSource::NameHeuristic { column, rule }
    };
    Some(SubsetSelection {
        table: annotation.filter_rows(&mask),
        source,
    })
}
