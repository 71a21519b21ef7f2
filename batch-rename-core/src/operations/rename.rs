use crate::output::CommitResult;
use crate::pattern;
use crate::preview::{PreviewOptions, PreviewRow, RowStatus};
use crate::Session;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenameOptions {
    /// Commit even when some proposed names are flagged unsafe
    pub force: bool,
    /// Report what would be renamed without touching the disk
    pub dry_run: bool,
}

/// Rename operation - previews and commits a whole directory in one go
///
/// The history of this one-shot session is dropped on return, so undo is only
/// available through a long-lived [`Session`].
pub fn rename_operation(
    directory: &Path,
    pattern: &str,
    replacement: &str,
    preview_options: &PreviewOptions,
    options: RenameOptions,
) -> Result<CommitResult> {
    // An invalid pattern must never reach the disk
    pattern::compile(pattern)?;

    let mut session = Session::new(preview_options.clone());
    session
        .open(directory)
        .context("Failed to list files for rename")?;
    let rows = session.preview(pattern, replacement);

    validate_operation_safety(&rows, options.force)?;

    let directory = session.directory().unwrap_or(directory).to_path_buf();
    if options.dry_run {
        return Ok(CommitResult::planned(&directory, &rows));
    }

    let results = session.commit_rows(&rows)?;
    Ok(CommitResult::from_results(&directory, &results))
}

/// Refuse rows flagged unsafe unless `force` is set
pub fn validate_operation_safety(rows: &[PreviewRow], force: bool) -> Result<()> {
    let unsafe_names: Vec<&str> = rows
        .iter()
        .filter(|row| row.status == RowStatus::ChangedUnsafe)
        .map(|row| row.proposed_name.as_str())
        .collect();

    if !unsafe_names.is_empty() && !force {
        return Err(anyhow!(
            "{} proposed names are unsafe ({}). Use --force to rename anyway.",
            unsafe_names.len(),
            unsafe_names.join(", ")
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatternError;
    use std::fs;
    use tempfile::TempDir;

    fn setup(names: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in names {
            fs::write(temp_dir.path().join(name), *name).unwrap();
        }
        temp_dir
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rename_operation_renames() {
        let temp_dir = setup(&["a.txt", "b.txt"]);
        let result = rename_operation(
            temp_dir.path(),
            r"\.txt$",
            ".md",
            &PreviewOptions::default(),
            RenameOptions::default(),
        )
        .unwrap();

        assert_eq!(result.renamed, 2);
        assert_eq!(result.failed, 0);
        assert_eq!(listing(temp_dir.path()), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_rename_operation_invalid_pattern() {
        let temp_dir = setup(&["a.txt"]);
        let err = rename_operation(
            temp_dir.path(),
            "(",
            "x",
            &PreviewOptions::default(),
            RenameOptions::default(),
        )
        .unwrap_err();
        assert!(err.downcast_ref::<PatternError>().is_some());
        assert_eq!(listing(temp_dir.path()), vec!["a.txt"]);
    }

    #[test]
    fn test_rename_operation_refuses_unsafe_without_force() {
        let temp_dir = setup(&["a.txt"]);
        let err = rename_operation(
            temp_dir.path(),
            "a",
            "a?",
            &PreviewOptions::default(),
            RenameOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsafe"));
        assert_eq!(listing(temp_dir.path()), vec!["a.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_operation_force_allows_unsafe() {
        let temp_dir = setup(&["a.txt"]);
        let result = rename_operation(
            temp_dir.path(),
            "a",
            "a?",
            &PreviewOptions::default(),
            RenameOptions {
                force: true,
                dry_run: false,
            },
        )
        .unwrap();
        assert_eq!(result.renamed, 1);
        assert_eq!(listing(temp_dir.path()), vec!["a?.txt"]);
    }

    #[test]
    fn test_rename_operation_dry_run() {
        let temp_dir = setup(&["a.txt", "b.txt"]);
        let result = rename_operation(
            temp_dir.path(),
            "^a",
            "z",
            &PreviewOptions::default(),
            RenameOptions {
                force: false,
                dry_run: true,
            },
        )
        .unwrap();
        assert!(result.dry_run);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(listing(temp_dir.path()), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_validate_operation_safety() {
        let rows = vec![PreviewRow {
            original_name: "a".to_string(),
            proposed_name: "a|b".to_string(),
            status: RowStatus::ChangedUnsafe,
        }];
        assert!(validate_operation_safety(&rows, false).is_err());
        assert!(validate_operation_safety(&rows, true).is_ok());
        assert!(validate_operation_safety(&[], false).is_ok());
    }
}
