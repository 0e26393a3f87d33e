//! Filename grammar for rendered supplement figures.
//!
//! Every figure produced by the plotting pipeline is named
//!
//! ```text
//! <subset>[-<subset name>]_<groupby>_<plottype>[:<i>-of-<n>][_<extra>].pdf
//! ```
//!
//! e.g. `Allcells_cell_ontology_class_tsneplot.pdf`,
//! `SubsetA-Endocrine cells_cluster-ids_dotplot_2-of-4.pdf` or
//! `Subset1_cluster-ids_dotplot:2-of-5_raw-Neurog3-x-Hhex.pdf`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The figure filename grammar.
///
/// Capture groups:
/// - `subset`: subset token, including an optional `-<subset name>` suffix
/// - `subset_name`: human readable subset name (letters and spaces)
/// - `groupby`: grouping variable (word characters, `-` and `>`)
/// - `plottype`: lower-case plot kind ending in `plot`
/// - `i`, `n`: page index and page count of a `:<i>-of-<n>` series
/// - `extra`: trailing free-text qualifier
pub const FILENAME_PATTERN: &str = r"^(?P<subset>[a-zA-Z\d]+(-)?(?P<subset_name>[a-zA-Z ]+)?)_(?P<groupby>[\w\->]+)_(?P<plottype>[a-z]+plot)(_?:(?P<i>\d+)-of-(?P<n>\d+))?_?(?P<extra>[a-zA-Z0-9_\-]+)?\.pdf$";

static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(FILENAME_PATTERN).expect("figure filename pattern is valid"));

static PAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)-of-(\d+)$").expect("page pattern is valid"));

/// Position of a figure within a multi-page series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageIndex {
    /// One-based page number.
    pub i: u32,
    /// Total number of pages.
    pub n: u32,
}

impl PageIndex {
    /// Parse an `<i>-of-<n>` token.
    ///
    /// Returns `None` when the token has another shape or a number does not
    /// fit; callers keep the raw text in that case.
    pub fn parse(token: &str) -> Option<Self> {
        let caps = PAGE_RE.captures(token)?;
        let i = caps[1].parse().ok()?;
        let n = caps[2].parse().ok()?;
        Some(Self { i, n })
    }

    /// Whether this figure belongs to a series of more than one page.
    pub fn is_series(&self) -> bool {
        self.n > 1
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.i, self.n)
    }
}

/// Structural fields extracted from one figure filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameFields {
    /// Subset identifier, lower-cased (`allcells`, `subseta-endocrine cells`).
    pub subset: String,
    /// Display name embedded in the subset token, if any.
    pub subset_name: Option<String>,
    /// Grouping variable as written in the filename.
    pub groupby: String,
    /// Plot type token (`tsneplot`, `dotplot`, ...).
    pub plottype: String,
    /// Page index for multi-page series.
    pub page: Option<PageIndex>,
    /// Free-text qualifier. Always `None` when `page` is set.
    pub extra: Option<String>,
}

impl FilenameFields {
    /// Rebuild a filename that parses back to the same fields.
    ///
    /// The result is not necessarily byte-identical to the original name:
    /// the subset comes back lower-cased and the page suffix always uses
    /// the `:<i>-of-<n>` form.
    pub fn to_filename(&self) -> String {
        let mut name = format!("{}_{}_{}", self.subset, self.groupby, self.plottype);
        if let Some(page) = &self.page {
            name.push_str(&format!(":{}-of-{}", page.i, page.n));
        }
        if let Some(extra) = &self.extra {
            name.push('_');
            name.push_str(extra);
        }
        name.push_str(".pdf");
        name
    }
}

/// Parse a figure's base filename.
///
/// Returns `None` for names outside the grammar; those files are not part of
/// the supplement.
///
/// A page index wins over the trailing qualifier: when the name carries a
/// `:<i>-of-<n>` infix, or the qualifier itself is `<i>-of-<n>`, the
/// qualifier is dropped.
pub fn parse_filename(name: &str) -> Option<FilenameFields> {
    let caps = FILENAME_RE.captures(name)?;

    let subset = caps.name("subset")?.as_str().to_lowercase();
    let subset_name = caps
        .name("subset_name")
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    let groupby = caps.name("groupby")?.as_str().to_string();
    let plottype = caps.name("plottype")?.as_str().to_string();
    let mut extra = caps
        .name("extra")
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty());

    let mut page = match (caps.name("i"), caps.name("n")) {
        (Some(i), Some(n)) => match (i.as_str().parse(), n.as_str().parse()) {
            (Ok(i), Ok(n)) => Some(PageIndex { i, n }),
            _ => None,
        },
        _ => None,
    };
    if page.is_none() {
        page = extra.as_deref().and_then(PageIndex::parse);
    }
    if page.is_some() {
        extra = None;
    }

    Some(FilenameFields {
        subset,
        subset_name,
        groupby,
        plottype,
        page,
        extra,
    })
}
