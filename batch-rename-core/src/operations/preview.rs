use crate::output::PreviewResult;
use crate::preview::{PreviewOptions, PreviewSummary};
use crate::Session;
use anyhow::{Context, Result};
use std::path::Path;

/// Preview operation - lists `directory` and returns the proposed renames
pub fn preview_operation(
    directory: &Path,
    pattern: &str,
    replacement: &str,
    options: &PreviewOptions,
) -> Result<PreviewResult> {
    let mut session = Session::new(options.clone());
    session
        .open(directory)
        .context("Failed to list files for preview")?;

    let rows = session.preview(pattern, replacement);
    let summary = PreviewSummary::from_rows(&rows);

    Ok(PreviewResult {
        directory: session
            .directory()
            .unwrap_or(directory)
            .display()
            .to_string(),
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        rows,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::RowStatus;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preview_operation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("IMG_001.jpg"), "").unwrap();
        fs::write(temp_dir.path().join("IMG_002.jpg"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let result = preview_operation(
            temp_dir.path(),
            r"^IMG_(\d+)",
            r"holiday-\1",
            &PreviewOptions::default(),
        )
        .unwrap();

        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[0].proposed_name, "holiday-001.jpg");
        assert_eq!(result.rows[1].proposed_name, "holiday-002.jpg");
        assert_eq!(result.rows[2].status, RowStatus::Unchanged);
        assert_eq!(result.summary.changed, 2);
    }

    #[test]
    fn test_preview_operation_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = preview_operation(
            &temp_dir.path().join("nope"),
            "a",
            "b",
            &PreviewOptions::default(),
        );
        assert!(result.is_err());
    }
}
