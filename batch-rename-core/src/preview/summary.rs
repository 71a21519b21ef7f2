use super::{PreviewRow, RowStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Row counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub total: usize,
    pub unchanged: usize,
    pub changed: usize,
    pub unsafe_count: usize,
    pub invalid: usize,
}

impl PreviewSummary {
    pub fn from_rows(rows: &[PreviewRow]) -> Self {
        let mut summary = Self {
            total: rows.len(),
            ..Self::default()
        };
        for row in rows {
            match row.status {
                RowStatus::Unchanged => summary.unchanged += 1,
                RowStatus::Changed => summary.changed += 1,
                RowStatus::ChangedUnsafe => summary.unsafe_count += 1,
                RowStatus::InvalidPattern => summary.invalid += 1,
            }
        }
        summary
    }
}

/// Render rows as a plain line-per-rename listing, followed by counts.
pub fn render_summary(rows: &[PreviewRow]) -> String {
    let mut output = String::new();
    let summary = PreviewSummary::from_rows(rows);

    if summary.invalid > 0 {
        writeln!(output, "[INVALID PATTERN]").unwrap();
        writeln!(output, "Files: {}", summary.total).unwrap();
        return output;
    }

    writeln!(output, "[RENAMES]").unwrap();
    for row in rows.iter().filter(|row| row.is_changed()) {
        let marker = if row.status == RowStatus::ChangedUnsafe {
            " [unsafe]"
        } else {
            ""
        };
        writeln!(
            output,
            "{} -> {}{}",
            row.original_name, row.proposed_name, marker
        )
        .unwrap();
    }
    writeln!(output).unwrap();
    writeln!(
        output,
        "Files: {}, changed: {}, unsafe: {}, unchanged: {}",
        summary.total, summary.changed, summary.unsafe_count, summary.unchanged
    )
    .unwrap();

    output
}
