//! Canonical ordering of subsets, grouping variables and plot types.
//!
//! Sections of a tissue chapter follow a fixed priority (all cells first,
//! tSNE before violin/ridge/dot plots, ...) and fall back to case-insensitive
//! alphabetical order for everything else, so the output never depends on
//! the order in which the filesystem lists figures.

use super::record::FigureRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Priority values for the subset field.
pub const SUBSET_ORDER: &[&str] = &["allcells"];

/// Priority values for the plot type field.
pub const PLOT_ORDER: &[&str] = &["tsneplot", "violinplot", "ridgeplot", "dotplot"];

/// Priority values for the grouping variable field.
pub const GROUPBY_ORDER: &[&str] = &[
    "highlighted",
    "cell_ontology_class",
    "cluster-ids",
    "free_annotation",
];

/// A record field with a canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderedField {
    Subset,
    Groupby,
    Plottype,
}

impl OrderedField {
    /// Priority prefix for this field.
    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            OrderedField::Subset => SUBSET_ORDER,
            OrderedField::Groupby => GROUPBY_ORDER,
            OrderedField::Plottype => PLOT_ORDER,
        }
    }

    fn value<'a>(&self, record: &'a FigureRecord) -> &'a str {
        match self {
            OrderedField::Subset => &record.subset,
            OrderedField::Groupby => &record.groupby,
            OrderedField::Plottype => record.plottype.as_str(),
        }
    }
}

/// Case-insensitive comparison with a case-sensitive tie break.
pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort strings alphabetically, ignoring case.
pub fn alphabetical_sort(values: &mut [String]) {
    values.sort_by(|a, b| compare_case_insensitive(a, b));
}

/// Ordered list of categories: priority values, then every other observed
/// value alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrder {
    categories: Vec<String>,
}

impl CategoryOrder {
    /// Build the order from a priority prefix and the observed values.
    pub fn from_observed<'a, I>(defaults: &[&str], observed: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let defaults_set: HashSet<&str> = defaults.iter().copied().collect();
        let mut remaining: Vec<String> = observed
            .into_iter()
            .filter(|v| !defaults_set.contains(v))
            .map(String::from)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        alphabetical_sort(&mut remaining);

        let mut categories: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
        categories.extend(remaining);
        Self { categories }
    }

    /// Categories in canonical order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Position of a value; unknown values sort last.
    pub fn rank(&self, value: &str) -> usize {
        self.categories
            .iter()
            .position(|c| c == value)
            .unwrap_or(self.categories.len())
    }
}

/// Sort figure records into render order.
///
/// Records are ordered by subset, grouping variable and plot type using
/// their canonical category orders, then by qualifier and page number.
pub fn order_records(records: &mut [FigureRecord]) {
    let orders: Vec<(OrderedField, CategoryOrder)> = [
        OrderedField::Subset,
        OrderedField::Groupby,
        OrderedField::Plottype,
    ]
    .into_iter()
    .map(|field| {
        let order =
            CategoryOrder::from_observed(field.defaults(), records.iter().map(|r| field.value(r)));
        (field, order)
    })
    .collect();

    records.sort_by(|a, b| {
        for (field, order) in &orders {
            let ord = order.rank(field.value(a)).cmp(&order.rank(field.value(b)));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.extra
            .as_deref()
            .unwrap_or("")
            .cmp(b.extra.as_deref().unwrap_or(""))
            .then_with(|| a.page.cmp(&b.page))
            .then_with(|| a.path.cmp(&b.path))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::Path;

    fn record(name: &str) -> FigureRecord {
        FigureRecord::from_path(Path::new("figs").join(name), "Pancreas", "facs").unwrap()
    }

    #[test]
    fn test_defaults_come_first() {
        let order = CategoryOrder::from_observed(
            PLOT_ORDER,
            ["dotplot", "barplot", "Areaplot", "tsneplot"].into_iter(),
        );
        assert_eq!(
            order.categories(),
            &["tsneplot", "violinplot", "ridgeplot", "dotplot", "Areaplot", "barplot"]
        );
        assert_eq!(order.rank("tsneplot"), 0);
        assert_eq!(order.rank("barplot"), 5);
        assert_eq!(order.rank("never-seen"), 6);
    }

    #[test]
    fn test_alphabetical_sort_ignores_case() {
        let mut values = vec!["beta".to_string(), "Alpha".to_string(), "gamma".to_string()];
        alphabetical_sort(&mut values);
        assert_eq!(values, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_order_records() {
        let mut records = vec![
            record("Allcells_cell_ontology_class_dotplot.pdf"),
            record("SubsetA_cluster-ids_tsneplot.pdf"),
            record("Allcells_free_annotation_tsneplot.pdf"),
            record("Allcells_cell_ontology_class_ridgeplot_2-of-2.pdf"),
            record("Allcells_cell_ontology_class_tsneplot.pdf"),
            record("Allcells_cell_ontology_class_ridgeplot_1-of-2.pdf"),
            record("Allcells_Neurog3>0_tsneplot.pdf"),
        ];
        order_records(&mut records);

        let names: Vec<String> = records
            .iter()
            .map(|r| r.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "Allcells_cell_ontology_class_tsneplot.pdf",
                "Allcells_cell_ontology_class_ridgeplot_1-of-2.pdf",
                "Allcells_cell_ontology_class_ridgeplot_2-of-2.pdf",
                "Allcells_cell_ontology_class_dotplot.pdf",
                "Allcells_free_annotation_tsneplot.pdf",
                "Allcells_Neurog3>0_tsneplot.pdf",
                "SubsetA_cluster-ids_tsneplot.pdf",
            ]
        );
    }

    proptest! {
        /// Property: priority values precede all others, which are alphabetical.
        #[test]
        fn prop_order_is_total_and_idempotent(
            values in prop::collection::vec("[a-zA-Z]{1,6}", 0..12),
        ) {
            let order =
                CategoryOrder::from_observed(GROUPBY_ORDER, values.iter().map(|s| s.as_str()));
            let categories = order.categories();

            prop_assert_eq!(&categories[..GROUPBY_ORDER.len()], GROUPBY_ORDER);
            for pair in categories[GROUPBY_ORDER.len()..].windows(2) {
                prop_assert_eq!(compare_case_insensitive(&pair[0], &pair[1]), Ordering::Less);
            }

            let mut once = values.clone();
            once.sort_by_key(|v| order.rank(v));
            let mut twice = once.clone();
            twice.sort_by_key(|v| order.rank(v));
            prop_assert_eq!(once, twice);
        }
    }
}
