//! Table reduction: `table` environments become a `**Table:**` annotation
//! followed by a GFM grid, with a verbatim fallback for what the grid
//! conversion cannot represent.
//!
//! ## Fallback policy
//!
//! Grid conversion is declared unsupported for nested `tabular` environments
//! (one grid cannot hold another), and is impossible when no `tabular` body
//! exists at all. Both cases keep the LaTeX source in a fenced code block
//! under the annotation rather than silently dropping content, and emit a
//! [`ParseWarning`] so the degraded fidelity is visible.

use crate::error::ParseWarning;
use crate::pipeline::floats::{collect_captions, collect_labels};
use crate::pipeline::markup::apply_inline_formats;
use crate::pipeline::scan::{scan_argument, strip_command_arguments};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

static RE_TABLE_ENV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\\begin\{table.*?\}.*?\\end\{table.*?\})").unwrap());
static RE_TABULAR_BEGIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\begin\{tabular\}").unwrap());
static RE_TABULAR_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\end\{tabular\}").unwrap());
static RE_TABULAR_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{tabular\}\{.*?\}(.*?)\\end\{tabular\}").unwrap());
static RE_TABULAR_VERBATIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{tabular\}.*?\\end\{tabular\}").unwrap());
static RE_SCALEBOX_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\scalebox\{[^}]*\}\{").unwrap());
static RE_BOOKTABS_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\toprule|\\midrule|\\bottomrule").unwrap());
static RE_CMIDRULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\cmidrule\{[^}]*\}").unwrap());
static RE_ROW_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\\").unwrap());
static RE_TEXTCOLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\textcolor\{[^}]*\}\{(.*?)\}").unwrap());
static RE_CELL_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\textbf\{(.*?)\}").unwrap());
static RE_CELL_EMPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\emph\{(.*?)\}").unwrap());
static RE_CAPTION_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\caption\{").unwrap());
static RE_LABEL_FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\label\{[^}]+\}").unwrap());

/// What the grid converter made of one `table` environment.
enum TabularConversion {
    /// A Markdown grid per `tabular` body, concatenated.
    Grid(String),
    /// Nested `tabular` environments — unsupported, keep verbatim.
    Nested,
    /// No `tabular` body found.
    Empty,
}

/// Replace every `table`/`table*` environment with an annotation plus either
/// a Markdown grid or a fenced LaTeX fallback.
pub fn replace_tables(text: &str, keep_labels: bool, warnings: &mut Vec<ParseWarning>) -> String {
    RE_TABLE_ENV
        .replace_all(text, |caps: &Captures<'_>| {
            let entire = &caps[1];
            let caption = apply_inline_formats(&collect_captions(entire, "caption", warnings));
            let labels_str = if keep_labels {
                collect_labels(entire)
                    .iter()
                    .map(|l| format!("\\label{{{l}}}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            } else {
                String::new()
            };

            match convert_tabular_grid(entire) {
                TabularConversion::Grid(grid) => {
                    format!("\n\n**Table:** {caption} {labels_str}\n\n{grid}\n")
                }
                TabularConversion::Nested => {
                    warn!("nested tabular environments; keeping LaTeX verbatim");
                    warnings.push(ParseWarning::NestedTabular);
                    let verbatim: Vec<&str> = RE_TABULAR_VERBATIM
                        .find_iter(entire)
                        .map(|m| m.as_str())
                        .collect();
                    format!(
                        "\n\n**Table:** {caption} {labels_str}\n\n```latex\n{}\n```\n\n",
                        verbatim.join("\n")
                    )
                }
                TabularConversion::Empty => {
                    warn!("no tabular body found; keeping LaTeX verbatim");
                    warnings.push(ParseWarning::NoTabularBody);
                    let cleaned = remove_captions_and_labels(entire);
                    format!(
                        "\n\n**Table:** {caption} {labels_str}\n\n```latex\n{cleaned}\n```\n\n"
                    )
                }
            }
        })
        .into_owned()
}

/// Convert the `tabular` bodies inside a `table` environment to GFM grids.
fn convert_tabular_grid(entire: &str) -> TabularConversion {
    // Unwrap \scalebox{..}{ ... } so the tabular inside is visible to the
    // body pattern. The wrapped content contains braces, so the argument is
    // read with the balanced scanner.
    let mut inner = entire.to_string();
    while let Some(m) = RE_SCALEBOX_OPEN.find(&inner) {
        let arg = scan_argument(&inner, m.end());
        let mut next = String::with_capacity(inner.len());
        next.push_str(&inner[..m.start()]);
        next.push_str(&arg.text);
        next.push_str(&inner[arg.end..]);
        inner = next;
    }

    if has_nested_tabulars(&inner) {
        return TabularConversion::Nested;
    }

    let mut grids = Vec::new();
    for caps in RE_TABULAR_BODY.captures_iter(&inner) {
        let body = RE_BOOKTABS_RULE.replace_all(&caps[1], "");
        let body = RE_CMIDRULE.replace_all(&body, "");

        let rows: Vec<Vec<String>> = RE_ROW_SEP
            .split(&body)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(split_row_cells)
            .collect();

        let Some(header) = rows.first() else {
            continue;
        };
        let num_cols = header.len();

        let mut grid = String::from("\n\n");
        grid.push_str(&format_grid_row(header));
        grid.push_str(&format_grid_row(&vec!["---".to_string(); num_cols]));
        for row in &rows[1..] {
            let mut row = row.clone();
            row.resize(num_cols, String::new());
            grid.push_str(&format_grid_row(&row));
        }
        grid.push_str("\n\n");
        grids.push(grid);
    }

    if grids.is_empty() {
        TabularConversion::Empty
    } else {
        TabularConversion::Grid(grids.concat())
    }
}

/// Split a row on `&`, converting cell-level colour/bold/emphasis commands
/// and un-escaping `\&` and `\\` first.
fn split_row_cells(row: &str) -> Vec<String> {
    let row = RE_TEXTCOLOR.replace_all(row, "$1");
    let row = RE_CELL_BOLD.replace_all(&row, "**$1**");
    let row = RE_CELL_EMPH.replace_all(&row, "*$1*");
    let row = row.replace(r"\&", "&").replace(r"\\", r"\");
    row.split('&').map(|c| c.trim().to_string()).collect()
}

fn format_grid_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Nested when a second `\begin{tabular}` opens before the first closes.
fn has_nested_tabulars(tex: &str) -> bool {
    let mut events: Vec<(usize, i32)> = RE_TABULAR_BEGIN
        .find_iter(tex)
        .map(|m| (m.start(), 1))
        .chain(RE_TABULAR_END.find_iter(tex).map(|m| (m.start(), -1)))
        .collect();
    events.sort_unstable_by_key(|&(pos, _)| pos);

    let mut open = 0i32;
    for (_, delta) in events {
        open += delta;
        if open > 1 {
            return true;
        }
    }
    false
}

/// Strip captions (brace-balanced) and labels, for the verbatim fallback.
fn remove_captions_and_labels(tex: &str) -> String {
    let (out, _) = strip_command_arguments(tex, &RE_CAPTION_OPEN);
    RE_LABEL_FULL.replace_all(&out, "").into_owned()
}
