//! Plain-text rendering of table pages and records.

use std::fmt::Write;

use avhub_lib::api::DashboardSummary;
use avhub_lib::model::Record;
use avhub_lib::view::Body;
use avhub_lib::view::Cell;
use avhub_lib::view::PLACEHOLDER;
use avhub_lib::view::RenderedTable;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Widest a column may grow before its cells are truncated.
const MAX_COLUMN_WIDTH: usize = 40;

const SEPARATOR: &str = "  ";

/// Text shown for a cell. Links show their target; there is nothing to click.
fn cell_text(cell: &Cell) -> &str {
    match cell {
        Cell::Link { href, .. } => href,
        other => other.label(),
    }
}

/// Cuts `text` to at most `width` display columns, ending in `…` if cut.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(text, &w)| pad(text, w))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Renders a table page with a header rule and the pager summary.
pub fn table(rendered: &RenderedTable) -> String {
    let header: Vec<String> = rendered
        .header
        .iter()
        .map(|h| truncate(&h.title(), MAX_COLUMN_WIDTH))
        .collect();
    let rows: Vec<Vec<String>> = rendered
        .rows()
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| truncate(cell_text(c), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.width());
        }
    }
    let total = widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1);

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let _ = writeln!(out, "{}", "─".repeat(total));

    match &rendered.body {
        Body::Rows(_) => {
            for row in &rows {
                push_line(&mut out, row, &widths);
            }
        }
        Body::Empty { message, .. } => {
            let fill = total.saturating_sub(message.width()) / 2;
            let _ = writeln!(out, "{}{}", " ".repeat(fill), message);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rendered.pager.summary());
    out
}

/// Renders one record as aligned `field  value` lines, sorted by field name.
pub fn record(record: &Record) -> String {
    let mut fields: Vec<(&String, String)> = record
        .fields()
        .iter()
        .map(|(k, v)| {
            let value = if v.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                v.to_string()
            };
            (k, value)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let width = fields.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (field, value) in fields {
        let _ = writeln!(out, "{}{SEPARATOR}{value}", pad(field, width));
    }
    out
}

/// Renders the per-kind record counts of the home page summary.
pub fn totals(summary: &DashboardSummary) -> String {
    let mut lines: Vec<(String, String)> = summary
        .totals()
        .into_iter()
        .map(|(kind, count)| (kind.title().to_string(), count.to_string()))
        .collect();
    lines.push((
        "States with legislation".to_string(),
        summary.states_with_legislation.to_string(),
    ));

    let width = lines.iter().map(|(label, _)| label.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, count) in lines {
        let _ = writeln!(out, "{}{SEPARATOR}{count:>6}", pad(&label, width));
    }
    out
}
