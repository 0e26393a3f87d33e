//! Category labels and cell counts for a grouping variable.

use super::table::AnnotationTable;
use crate::error::Result;
use crate::figure::compare_case_insensitive;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

static INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("integer pattern is valid"));
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("number pattern is valid"));

/// Label standing in for missing values; always sorted last.
pub const NA_LABEL: &str = "NA";

/// Whether a string holds an integer.
pub fn is_int(s: &str) -> bool {
    INT_RE.is_match(s)
}

/// Annotation column for a grouping variable.
///
/// Filenames use `-` where annotation columns use `.`, e.g. `cluster-ids`
/// is read from `cluster.ids`.
pub fn grouping_column(groupby: &str) -> String {
    groupby.replace('-', ".")
}

/// Values labelling each cell for a grouping variable.
///
/// `free_annotation` is combined with the cell type
/// (`<cell type>: <free annotation>`, or the cell type alone when there is no
/// free annotation) so every cell carries a label. Cluster IDs are written
/// as integers.
pub fn grouping_values(table: &AnnotationTable, groupby: &str) -> Result<Vec<Option<String>>> {
    let column = grouping_column(groupby);

    if column == "free_annotation" {
        let classes = table.column("cell_ontology_class")?;
        let free = table.column("free_annotation")?;
        let combined = classes
            .iter()
            .zip(free)
            .map(|(class, annotation)| {
                let mut label = class.clone().unwrap_or_else(|| NA_LABEL.to_string());
                if let Some(annotation) = annotation {
                    label.push_str(": ");
                    label.push_str(annotation);
                }
                Some(label)
            })
            .collect();
        return Ok(combined);
    }

    let values = table.column(&column)?;
    if column.contains("cluster.ids") {
        return Ok(values
            .iter()
            .map(|v| v.as_deref().map(integer_text))
            .collect());
    }
    Ok(values.to_vec())
}

fn integer_text(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.is_finite() => format!("{}", v as i64),
        _ => raw.to_string(),
    }
}

/// Sorted, deduplicated category labels of a grouping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelSet {
    labels: Vec<String>,
    has_missing: bool,
}

impl LabelSet {
    /// Derive labels from a column of values.
    ///
    /// Values sort numerically when every one is a number, otherwise
    /// alphabetically ignoring case. Missing values add one trailing
    /// [`NA_LABEL`].
    pub fn from_values(values: &[Option<String>]) -> Self {
        let mut seen = HashSet::new();
        let mut labels: Vec<String> = values
            .iter()
            .flatten()
            .filter(|v| seen.insert(v.as_str()))
            .cloned()
            .collect();
        let has_missing = values.iter().any(Option::is_none);

        if labels.iter().all(|l| NUMBER_RE.is_match(l.trim())) {
            labels.sort_by(|a, b| {
                let a: f64 = a.trim().parse().unwrap_or(f64::NAN);
                let b: f64 = b.trim().parse().unwrap_or(f64::NAN);
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            });
        } else {
            labels.sort_by(|a, b| compare_case_insensitive(a, b));
        }
        if has_missing {
            labels.push(NA_LABEL.to_string());
        }

        Self {
            labels,
            has_missing,
        }
    }

    /// Labels in display order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether any value was missing.
    pub fn has_missing(&self) -> bool {
        self.has_missing
    }

    /// Whether every label is an integer (cluster IDs).
    pub fn are_integers(&self) -> bool {
        self.labels.iter().all(|l| is_int(l))
    }

    /// Number of cells per label, in label order.
    pub fn counts(&self, values: &[Option<String>]) -> LabelCounts {
        let mut tally: HashMap<&str, usize> = HashMap::new();
        for value in values {
            let key = value.as_deref().unwrap_or(NA_LABEL);
            *tally.entry(key).or_insert(0) += 1;
        }
        let rows = self
            .labels
            .iter()
            .filter_map(|label| tally.get(label.as_str()).map(|n| (label.clone(), *n)))
            .collect();
        LabelCounts { rows }
    }
}

/// Cell counts per label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelCounts {
    rows: Vec<(String, usize)>,
}

impl LabelCounts {
    pub fn new(rows: Vec<(String, usize)>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[(String, usize)] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of cells counted.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn create_table() -> AnnotationTable {
        AnnotationTable::from_columns(
            vec!["c1", "c2", "c3", "c4"].into_iter().map(String::from).collect(),
            vec![
                (
                    "cell_ontology_class".to_string(),
                    vec![
                        s("type B pancreatic cell"),
                        s("pancreatic A cell"),
                        None,
                        s("type B pancreatic cell"),
                    ],
                ),
                ("free_annotation".to_string(), vec![s("beta"), None, s("ductal"), None]),
                ("cluster.ids".to_string(), vec![s("10.0"), s("2"), s("2"), s("0")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_grouping_column() {
        assert_eq!(grouping_column("cluster-ids"), "cluster.ids");
        assert_eq!(grouping_column("cell_ontology_class"), "cell_ontology_class");
    }

    #[test]
    fn test_free_annotation_is_combined() {
        let table = create_table();
        let values = grouping_values(&table, "free_annotation").unwrap();
        assert_eq!(
            values,
            vec![
                s("type B pancreatic cell: beta"),
                s("pancreatic A cell"),
                s("NA: ductal"),
                s("type B pancreatic cell"),
            ]
        );
    }

    #[test]
    fn test_cluster_ids_sort_numerically() {
        let table = create_table();
        let values = grouping_values(&table, "cluster-ids").unwrap();
        let labels = LabelSet::from_values(&values);
        assert_eq!(labels.labels(), &["0", "2", "10"]);
        assert!(labels.are_integers());
        assert!(!labels.has_missing());
    }

    #[test]
    fn test_missing_values_become_trailing_na() {
        let table = create_table();
        let values = grouping_values(&table, "cell_ontology_class").unwrap();
        let labels = LabelSet::from_values(&values);
        assert_eq!(
            labels.labels(),
            &["pancreatic A cell", "type B pancreatic cell", "NA"]
        );
        assert!(!labels.are_integers());

        let counts = labels.counts(&values);
        assert_eq!(
            counts.rows(),
            &[
                ("pancreatic A cell".to_string(), 1),
                ("type B pancreatic cell".to_string(), 2),
                ("NA".to_string(), 1),
            ]
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_missing_grouping_column() {
        let table = create_table();
        assert!(grouping_values(&table, "subsetA-cluster-ids").is_err());
    }

    #[test]
    fn test_empty_counts() {
        let labels = LabelSet::from_values(&[]);
        assert!(labels.is_empty());
        assert!(labels.counts(&[]).is_empty());
    }

    proptest! {
        /// Property: sorted, null-free labels derive to themselves.
        #[test]
        fn prop_labels_idempotent(values in prop::collection::vec("[a-zA-Z ]{1,8}", 0..20)) {
            let values: Vec<Option<String>> = values.into_iter().map(Some).collect();
            let first = LabelSet::from_values(&values);
            let again: Vec<Option<String>> = first.labels().iter().cloned().map(Some).collect();
            let second = LabelSet::from_values(&again);
            prop_assert_eq!(first.labels(), second.labels());
        }

        /// Property: missing values surface as exactly one trailing NA.
        #[test]
        fn prop_single_trailing_na(
            values in prop::collection::vec(prop::option::of("[a-z]{1,6}"), 1..20),
        ) {
            let labels = LabelSet::from_values(&values);
            let n_na = labels.labels().iter().filter(|l| l.as_str() == NA_LABEL).count();
            if values.iter().any(Option::is_none) {
                prop_assert_eq!(n_na, 1);
                prop_assert_eq!(labels.labels().last().map(String::as_str), Some(NA_LABEL));
            } else {
                prop_assert_eq!(n_na, 0);
            }
        }
    }
}
