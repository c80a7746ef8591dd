//! Plain-text rendering of the aggregated table.

use invex_core::AggregatedTable;

/// Render headers and display values as an aligned table. Numbers are right-aligned.
pub fn render_table(table: &AggregatedTable, normalize_names: bool) -> String {
    let headers = table.headers(normalize_names);
    let cells = table.cells();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let rows: Vec<Vec<(String, bool)>> = cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| (cell.display(), cell.number().is_some()))
                .collect()
        })
        .collect();
    for row in &rows {
        for (width, (text, _)) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(|h| (h.as_str(), false)), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(|r| (r.as_str(), false)), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(|(t, num)| (t.as_str(), *num)), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = (&'a str, bool)>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|((text, right), width)| {
            if right {
                format!("{:>width$}", text, width = *width)
            } else {
                format!("{:<width$}", text, width = *width)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
