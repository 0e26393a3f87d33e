//! TeX rendering of one figure record.

use super::table::count_table_tex;
use super::text::{
    capitalize, escape_pdf_path, label_tex, letter_code, method_tex, spaced, tissue_tex,
    title_case,
};
use crate::annotation::{LabelCounts, LabelSet, NA_LABEL};
use crate::figure::{FigureRecord, FigureSidecars, PlotType};

/// Rendered views of a single figure.
///
/// Every accessor is a pure function of the record, its labels and its
/// sidecar files; nothing is cached or mutated.
#[derive(Debug, Clone)]
pub struct FigureTex<'a> {
    record: &'a FigureRecord,
    labels: Option<&'a LabelSet>,
    sidecars: FigureSidecars,
}

impl<'a> FigureTex<'a> {
    pub fn new(
        record: &'a FigureRecord,
        labels: Option<&'a LabelSet>,
        sidecars: FigureSidecars,
    ) -> Self {
        Self {
            record,
            labels,
            sidecars,
        }
    }

    pub fn record(&self) -> &FigureRecord {
        self.record
    }

    /// Whether this figure is one page of a longer series.
    pub fn is_iterative(&self) -> bool {
        self.record.page.map(|p| p.is_series()).unwrap_or(false)
    }

    /// Plot type as written in captions.
    pub fn plottype_tex(&self) -> String {
        match self.record.plottype {
            PlotType::Tsne => "t-Distributed stochastic neighbor embedding (tSNE) plot".to_string(),
            ref other => capitalize(other.as_str()),
        }
    }

    /// Plot type as written in titles.
    pub fn plottype_title(&self) -> String {
        match self.record.plottype {
            PlotType::Tsne => "t-SNE plot".to_string(),
            ref other => capitalize(other.as_str()),
        }
    }

    pub fn tissue_tex(&self) -> String {
        tissue_tex(&self.record.tissue)
    }

    pub fn method_tex(&self) -> String {
        method_tex(&self.record.method)
    }

    /// Subset display name.
    ///
    /// `subseta` -> `Subset A` (plus the embedded display name in
    /// parentheses), `allcells` -> `All Cells`, anything else title-cased.
    pub fn subset_tex(&self) -> String {
        let subset = &self.record.subset;
        if let Some(idx) = subset.rfind("subset") {
            let rest = &subset[idx + "subset".len()..];
            let mut tex = "Subset".to_string();
            if let Some(letter) = rest.chars().next() {
                tex.push(' ');
                tex.extend(letter.to_uppercase());
            }
            if let Some(name) = &self.record.subset_name {
                tex.push_str(&format!(" ({})", name));
            }
            tex
        } else if let Some(prefix) = subset.strip_suffix("cells") {
            format!("{} Cells", title_case(prefix)).trim_start().to_string()
        } else {
            title_case(&spaced(subset))
        }
    }

    /// Grouping variable display name.
    ///
    /// `Neurog3>0` -> italic gene and an inequality, cluster IDs keep their
    /// acronym (prefixed by the subset for per-subset clusterings), every
    /// other grouping is title-cased and italic.
    pub fn groupby_tex(&self) -> String {
        let groupby = &self.record.groupby;
        if let Some((gene, threshold)) = groupby.split_once('>') {
            let threshold = if threshold.is_empty() { "0" } else { threshold };
            return format!("\\emph{{{}}} \\textgreater {}", gene, threshold);
        }

        let spaced = spaced(groupby);
        let lowered = spaced.to_lowercase();
        let display = if lowered == "cluster ids" {
            "Cluster IDs".to_string()
        } else if lowered.contains("cluster ids") {
            format!("{} Cluster IDs", self.subset_tex())
        } else {
            title_case(&spaced)
        };
        format!("\\emph{{{}}}", display)
    }

    pub fn subsection_title(&self) -> String {
        let mut title = self.subset_tex();
        if self.record.is_highlighted() {
            title.push_str(", highlighted from All Cells tSNE");
        } else {
            title.push_str(&format!(", labeled by {}", self.groupby_tex()));
        }
        title
    }

    pub fn subsection_tex(&self) -> String {
        format!("\n\\subsection{{{}}}\n", self.subsection_title())
    }

    /// Labels formatted for TeX.
    pub fn labels_tex(&self) -> Vec<String> {
        self.labels
            .map(|labels| labels.labels().iter().map(|l| label_tex(l)).collect())
            .unwrap_or_default()
    }

    /// First and last gene on this page, e.g. `, \emph{Ins1}--\emph{Sst}`.
    pub fn genes_tex(&self) -> String {
        match &self.sidecars.genes {
            Some(range) if range.first != range.last => {
                format!(", \\emph{{{}}}--\\emph{{{}}}", range.first, range.last)
            }
            Some(range) => format!(", \\emph{{{}}}", range.first),
            None => String::new(),
        }
    }

    /// `A: label, B: label, ...` for plots that mark groups by letter.
    ///
    /// Empty for integer labels (cluster IDs read fine on their own) and
    /// when no labels are known.
    pub fn letter_to_label(&self) -> String {
        let Some(labels) = self.labels else {
            return String::new();
        };
        if labels.is_empty() || labels.are_integers() {
            return String::new();
        }
        let pairs: Vec<String> = labels
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if label == NA_LABEL {
                    format!("{}: Unknown", NA_LABEL)
                } else {
                    format!("{}: {}", letter_code(i), label_tex(label))
                }
            })
            .collect();
        format!("{}.", pairs.join(", "))
    }

    /// Qualifier shown in the figure title.
    ///
    /// An `x` word between two genes reads as a co-expression, with any
    /// words before the first gene as its unit:
    /// `raw-Neurog3-x-Hhex` -> `Raw \emph{Neurog3} \texttimes \emph{Hhex}`.
    pub fn extra_tex(&self) -> String {
        let Some(extra) = self.record.extra.as_deref() else {
            return String::new();
        };
        let words: Vec<&str> = extra
            .split(['-', '_'])
            .filter(|w| !w.is_empty())
            .collect();
        let infix =
            (1..words.len().saturating_sub(1)).find(|&i| words[i].eq_ignore_ascii_case("x"));
        let Some(i) = infix else {
            return title_case(&words.join(" "));
        };

        let coexpression = format!(
            "\\emph{{{}}} \\texttimes \\emph{{{}}}",
            title_case(words[i - 1]),
            title_case(words[i + 1])
        );
        [
            title_case(&words[..i - 1].join(" ")),
            coexpression,
            title_case(&words[i + 2..].join(" ")),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    fn plot_shows(&self) -> &'static str {
        if self.record.plottype.is_tsne() {
            ""
        } else {
            "showing gene expression enrichment in"
        }
    }

    fn caption_start(&self) -> &'static str {
        if self.record.plottype.is_tsne() {
            "Top,"
        } else {
            ""
        }
    }

    fn caption_end(&self) -> String {
        if self.record.plottype.is_tsne() {
            let mut groupby_tex = self.groupby_tex();
            if self.record.groupby != "cluster-ids" {
                groupby_tex.push_str(" (and letter abbreviation)");
            }
            format!("Bottom, legend mapping {} to colors", groupby_tex)
        } else {
            self.letter_to_label()
        }
    }

    /// The caption sentence, without the `\caption` wrapper.
    ///
    /// A `<stem>.txt` sidecar replaces the generated sentence.
    pub fn caption_text(&self) -> String {
        if let Some(caption) = &self.sidecars.caption {
            return caption.trim_end().to_string();
        }

        let page = match self.record.page {
            Some(page) if self.is_iterative() => format!("({}{})", page, self.genes_tex()),
            _ => String::new(),
        };
        let words = [
            self.caption_start().to_string(),
            self.plottype_tex(),
            page,
            self.plot_shows().to_string(),
            self.groupby_tex(),
            "labels in".to_string(),
            self.subset_tex(),
            "of".to_string(),
            self.tissue_tex(),
            format!("{}.", self.method_tex()),
            self.caption_end(),
        ];
        words
            .iter()
            .filter(|w| !w.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn caption(&self) -> String {
        format!("\\caption{{{}}}", self.caption_text())
    }

    /// `\includegraphics` options for this plot type.
    pub fn graphics_options(&self) -> &'static str {
        match self.record.plottype {
            PlotType::Tsne => "height=.35\\textheight",
            PlotType::Ridge => "width=.65\\textwidth",
            PlotType::Dot => "angle=90, height=.6\\textheight",
            PlotType::Bar => "width=\\textwidth",
            PlotType::Violin | PlotType::Other(_) => "width=.6\\textwidth",
        }
    }

    /// Legend inset for tSNE plots, when a legend file exists.
    pub fn legend(&self) -> String {
        if !self.record.plottype.is_tsne() || self.record.is_expression() {
            return String::new();
        }
        match &self.sidecars.legend {
            Some(path) => format!(
                "\\includegraphics[{}]{{{}}}",
                self.graphics_options(),
                escape_pdf_path(path)
            ),
            None => String::new(),
        }
    }

    pub fn subsubsection_title(&self) -> String {
        let mut title = self.plottype_title();
        match self.record.page {
            Some(page) if self.is_iterative() => {
                title.push_str(&format!(" ({}{})", page, self.genes_tex()));
            }
            _ => {
                let extra = self.extra_tex();
                if !extra.is_empty() {
                    title.push_str(&format!(" ({})", extra));
                }
            }
        }
        title
    }

    /// The figure block: subsubsection heading plus `figure` environment.
    pub fn figure_tex(&self) -> String {
        format!(
            "\n\\subsubsection{{{title}}}\n\\begin{{figure}}[h]\n\\centering\n\\includegraphics[{options}]{{{pdf}}}\n{legend}\n{caption}\n\\end{{figure}}\n\n",
            title = self.subsubsection_title(),
            options = self.graphics_options(),
            pdf = escape_pdf_path(&self.record.path),
            legend = self.legend(),
            caption = self.caption(),
        )
    }

    /// Count table for this figure's subset and grouping.
    pub fn count_table_tex(&self, counts: &LabelCounts) -> Option<String> {
        count_table_tex(&self.subset_tex(), &self.groupby_tex(), counts)
    }
}
