//! CSV export of a loaded dataset.
//!
//! The header line is the bare column list; every value is wrapped in double
//! quotes with embedded quotes doubled. The browser hands the text to the
//! download sink and knows nothing about files.

use super::models::{Dataset, TabularRow};

/// Render every loaded row, not just the visible page.
///
/// Returns `None` when there is nothing to export.
pub fn to_csv(dataset: &Dataset) -> Option<String> {
    match dataset {
        Dataset::Experiment(rows) => write_rows(rows),
        Dataset::Geometry(rows) => write_rows(rows),
    }
}

fn write_rows<R: TabularRow>(rows: &[R]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(R::COLUMNS.join(","));
    for row in rows {
        let line = row
            .cells()
            .iter()
            .map(|value| quote(value.as_deref().unwrap_or("")))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Some(lines.join("\n"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
