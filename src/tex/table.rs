//! Table-of-counts rendering.

use super::text::label_tex;
use crate::annotation::LabelCounts;

/// Render a booktabs table of cells per label.
///
/// `subset_tex` and `groupby_tex` are already formatted for TeX. Returns
/// `None` for an empty count series so no empty table is emitted.
pub fn count_table_tex(
    subset_tex: &str,
    groupby_tex: &str,
    counts: &LabelCounts,
) -> Option<String> {
    if counts.is_empty() {
        return None;
    }

    let mut tex = format!(
        "\\subsubsection{{Table of cell counts in {}, per {}}}\n",
        subset_tex, groupby_tex
    );
    tex.push_str("\\begin{table}[h]\n\\centering\n\\begin{tabular}{@{}ll@{}}\n\\toprule\n");
    tex.push_str(&format!("{} & Number of cells \\\\ \\midrule\n", groupby_tex));
    for (label, n) in counts.rows() {
        tex.push_str(&format!("{} & {} \\\\\n", label_tex(label), n));
    }
    tex.push_str("\\bottomrule\n\\end{tabular}\n");
    tex.push_str(&format!(
        "\\caption{{Cell counts for {}, per {}.}}\n\\end{{table}}\n",
        subset_tex, groupby_tex
    ));
    Some(tex)
}
