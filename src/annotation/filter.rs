//! Subset filter configuration.
//!
//! Each tissue/method pair may ship a YAML file describing how the cells of
//! a named subset are picked out of the annotation table:
//!
//! ```yaml
//! SUBSET:
//!   CELL_ONTOLOGY_CLASS:
//!     FILTER_COLUMN: cell_ontology_class
//!     FILTER_VALUE: endocrine cell
//!   CLUSTER-IDS:
//!     FILTER_COLUMN: cluster.ids
//!     FILTER_VALUE: c(11,12)
//! ```
//!
//! Entries are keyed by the upper-cased grouping variable.

use crate::error::{Result, SupplementError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

static VECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^c\((.*)\)$").expect("vector pattern is valid"));

/// The cell-type column used when no filter is configured.
pub const CELL_TYPE_COLUMN: &str = "cell_ontology_class";

/// A `FILTER_VALUE` as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Test applied to one annotation value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterRule {
    /// Exact string match.
    Equals(String),
    /// Numeric equality.
    Number(f64),
    /// Membership in a set of integers, written as an R vector `c(11,12)`.
    OneOf(Vec<i64>),
    /// Membership in a set of strings, written as `c("beta cell", "alpha cell")`.
    AnyOf(Vec<String>),
}

impl FilterRule {
    /// Interpret a configured value.
    pub fn from_value(value: &FilterValue) -> Self {
        match value {
            FilterValue::Integer(n) => FilterRule::Number(*n as f64),
            FilterValue::Float(x) => FilterRule::Number(*x),
            FilterValue::Text(text) => Self::from_text(text),
        }
    }

    fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if let Some(caps) = VECTOR_RE.captures(trimmed) {
            return Self::from_vector(&caps[1]);
        }
        match trimmed.parse::<i64>() {
            Ok(n) => FilterRule::Number(n as f64),
            Err(_) => FilterRule::Equals(trimmed.to_string()),
        }
    }

    /// Elements of an R vector literal, quotes stripped.
    fn from_vector(body: &str) -> Self {
        let elements: Vec<String> = body
            .split(',')
            .map(|e| e.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        let integers: Option<Vec<i64>> = elements.iter().map(|e| e.parse().ok()).collect();
        match integers {
            Some(values) if !values.is_empty() => FilterRule::OneOf(values),
            _ => FilterRule::AnyOf(elements),
        }
    }

    /// Whether an annotation value passes this rule. Missing values never do.
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            FilterRule::Equals(expected) => value == expected,
            FilterRule::Number(expected) => value
                .trim()
                .parse::<f64>()
                .map(|v| v == *expected)
                .unwrap_or(false),
            FilterRule::OneOf(values) => match value.trim().parse::<f64>() {
                Ok(v) if v.fract() == 0.0 => values.contains(&(v as i64)),
                _ => false,
            },
            FilterRule::AnyOf(values) => values.iter().any(|v| v == value),
        }
    }
}

/// One configured subset filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetFilter {
    #[serde(rename = "FILTER_COLUMN", default)]
    pub column: Option<String>,
    #[serde(rename = "FILTER_VALUE", default)]
    pub value: Option<FilterValue>,
}

impl SubsetFilter {
    /// Column and rule, when both are configured.
    pub fn rule(&self) -> Option<(&str, FilterRule)> {
        let column = self.column.as_deref()?;
        let value = self.value.as_ref()?;
        Some((column, FilterRule::from_value(value)))
    }
}

/// Filter derived from the subset name alone.
///
/// `endothelialcells` selects `cell_ontology_class == "endothelial cell"`:
/// underscores become spaces, trailing `s` are dropped and a glued `cell`
/// suffix is split off.
pub fn name_heuristic(subset: &str) -> (String, FilterRule) {
    let lowered = subset.to_lowercase().replace('_', " ");
    let mut value = lowered.trim_end_matches('s').to_string();
    if value.ends_with("cell") {
        let prefix = value.split("cell").next().unwrap_or("").trim_end();
        value = format!("{} cell", prefix);
    }
    (CELL_TYPE_COLUMN.to_string(), FilterRule::Equals(value))
}

/// Subset filter configuration of one tissue/method pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubsetConfig {
    #[serde(rename = "SUBSET", default)]
    pub subsets: BTreeMap<String, SubsetFilter>,
}

impl SubsetConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(SupplementError::from)
    }

    /// Load from a YAML file; a missing file is `None`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Filter configured for a grouping variable.
    pub fn filter_for(&self, groupby: &str) -> Option<&SubsetFilter> {
        self.subsets.get(&groupby.to_uppercase())
    }
}
