//! Text transforms shared by the TeX renderers.

use std::path::Path;

/// Title-case a string: every letter that follows a non-letter is upper-cased,
/// every other letter lower-cased (`cell ontology class` -> `Cell Ontology Class`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Replace word separators (`_`, `-`, `.`) with spaces.
pub fn spaced(s: &str) -> String {
    s.replace(['_', '-', '.'], " ")
}

/// Escape characters with a special meaning in running TeX text.
pub fn escape_tex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' | '%' | '#' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// A category label as shown in tables and legends.
pub fn label_tex(label: &str) -> String {
    escape_tex(&label.replace('_', " "))
}

/// Display name of a tissue (`Limb_Muscle` -> `Limb Muscle`).
pub fn tissue_tex(tissue: &str) -> String {
    tissue.replace('_', " ")
}

/// Display name of a sequencing method (`droplet` -> `Droplet`, `facs` -> `FACS`).
pub fn method_tex(method: &str) -> String {
    if method == "droplet" {
        capitalize(method)
    } else {
        method.replace('_', " ").to_uppercase()
    }
}

/// Quote a PDF path for `\includegraphics` so spaces survive:
/// `dir/my plot.pdf` -> `{"dir/my plot"}.pdf`.
pub fn escape_pdf_path(path: &Path) -> String {
    let path = path.to_string_lossy();
    let prefix = path.strip_suffix(".pdf").unwrap_or(&path);
    format!("{{\"{}\"}}.pdf", prefix)
}

/// Spreadsheet-style letter code for a zero-based position: A..Z, AA, AB, ...
pub fn letter_code(index: usize) -> String {
    let mut n = index + 1;
    let mut code = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        code.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    code.reverse();
    String::from_utf8(code).unwrap_or_default()
}
