use super::{PreviewRow, PreviewSummary, RowStatus};
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

/// Render preview rows as a numbered table of original and new names.
///
/// Rows are numbered from 1 so they can be referred to when editing. With
/// colour enabled, changed names are drawn in the status style hint.
pub fn render_table(rows: &[PreviewRow], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(vec![
            ColumnConstraint::Absolute(Width::Fixed(5)),       // #
            ColumnConstraint::UpperBoundary(Width::Fixed(60)), // Original
            ColumnConstraint::UpperBoundary(Width::Fixed(60)), // New name
            ColumnConstraint::Absolute(Width::Fixed(11)),      // Status
        ]);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Original", "New name", "Status"]);
    }

    for (idx, row) in rows.iter().enumerate() {
        let mut new_cell = Cell::new(&row.proposed_name);
        let mut status_cell = Cell::new(row.status.label());
        if use_color {
            if let Some(hint) = row.status.style_hint() {
                let (r, g, b) = hint.rgb;
                new_cell = new_cell.fg(Color::Rgb { r, g, b });
                status_cell = status_cell.fg(Color::Rgb { r, g, b });
                if hint.bold {
                    new_cell = new_cell.add_attribute(Attribute::Bold);
                }
            } else if row.status == RowStatus::InvalidPattern {
                new_cell = new_cell.fg(Color::DarkGrey);
            }
        }
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&row.original_name),
            new_cell,
            status_cell,
        ]);
    }

    let summary = PreviewSummary::from_rows(rows);
    let totals = format!(
        "{} changed, {} unsafe",
        summary.changed, summary.unsafe_count
    );
    if use_color {
        table.add_row(vec![
            Cell::new(""),
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(totals).fg(Color::White),
            Cell::new(format!("{} files", summary.total)).fg(Color::White),
        ]);
    } else {
        table.add_row(vec![
            String::new(),
            "TOTALS".to_string(),
            totals,
            format!("{} files", summary.total),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{build_names, PreviewOptions};

    #[test]
    fn test_table_lists_every_row() {
        let rows = build_names(
            &["a.txt", "b.txt", "c.md"],
            r"\.txt$",
            ".text",
            &PreviewOptions::default(),
        );
        let output = render_table(&rows, false);
        assert!(output.contains("Original"));
        assert!(output.contains("New name"));
        assert!(output.contains("a.text"));
        assert!(output.contains("b.text"));
        assert!(output.contains("c.md"));
        assert!(output.contains("unchanged"));
        assert!(output.contains("2 changed, 0 unsafe"));
        assert!(output.contains("3 files"));
    }

    #[test]
    fn test_table_without_color_has_no_escape_codes() {
        let rows = build_names(&["a.txt"], "a", "b", &PreviewOptions::default());
        let output = render_table(&rows, false);
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_table_with_color_styles_changed_rows() {
        let rows = build_names(&["a.txt"], "a", "b", &PreviewOptions::default());
        let output = render_table(&rows, true);
        assert!(output.contains('\u{1b}'));
    }
}
