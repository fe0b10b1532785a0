//! Plain-text table of ranked results

use crate::search::{SourceFailure, TorrentResult};

/// Names longer than this are cut so the table stays readable
const MAX_NAME_WIDTH: usize = 60;

const HEADERS: [&str; 7] = [
    "Index",
    "Name",
    "Size",
    "Seeders",
    "Leechers",
    "Date of upload",
    "Source",
];

/// Renders results as an aligned table, one row per result, in the given order
///
/// Indices start at 1 so users can refer to a row by the number shown.
pub fn render_results(results: &[TorrentResult]) -> String {
    let rows: Vec<[String; 7]> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                truncate(&r.name, MAX_NAME_WIDTH),
                r.size.clone(),
                r.seeders.to_string(),
                r.leechers.to_string(),
                r.upload_date.clone(),
                r.source.display_name().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &separator, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

/// Renders one line per failed source
pub fn render_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  - {}\n", f))
        .collect()
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
