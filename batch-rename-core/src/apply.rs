use crate::error::RenameError;
use crate::history::{RenameBatch, RenameOp};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened to one pair of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Renamed { from: PathBuf, to: PathBuf },
    Skipped { path: PathBuf },
}

pub type ItemResult = Result<Outcome, RenameError>;

/// Rename each `(old, new)` pair in order.
///
/// A failed rename is logged and the rest of the batch still runs. Pairs with
/// identical paths are skipped. The returned batch lists every pair passed in,
/// and `results[i]` belongs to `batch.ops[i]`.
pub fn commit<I>(pairs: I) -> (RenameBatch, Vec<ItemResult>)
where
    I: IntoIterator<Item = (PathBuf, PathBuf)>,
{
    let mut ops = Vec::new();
    let mut results = Vec::new();

    for (from, to) in pairs {
        let result = if from == to {
            Ok(Outcome::Skipped { path: from.clone() })
        } else {
            rename_path(&from, &to).map(|()| Outcome::Renamed {
                from: from.clone(),
                to: to.clone(),
            })
        };

        match &result {
            Ok(Outcome::Renamed { .. }) => {
                info!(from = %from.display(), to = %to.display(), "Renamed");
            },
            Ok(Outcome::Skipped { .. }) => {},
            Err(err) => warn!(error = %err, "Rename failed"),
        }

        ops.push(RenameOp {
            applied: matches!(result, Ok(Outcome::Renamed { .. })),
            from,
            to,
        });
        results.push(result);
    }

    (RenameBatch::new(ops), results)
}

/// Rename `from` to `to` without ever replacing an existing file.
///
/// Both paths must name entries of the same directory. A destination that is
/// the same file under a different case (case-insensitive filesystems) is
/// renamed through a temporary name.
pub(crate) fn rename_path(from: &Path, to: &Path) -> Result<(), RenameError> {
    if to.file_name().is_none() || to.parent() != from.parent() {
        return Err(RenameError::InvalidName {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }

    if fs::symlink_metadata(to).is_ok() {
        if is_case_only_change(from, to) && is_same_file(from, to) {
            return rename_via_temp(from, to);
        }
        return Err(RenameError::DestinationExists {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }

    fs::rename(from, to).map_err(|source| io_error(from, to, source))
}

fn rename_via_temp(from: &Path, to: &Path) -> Result<(), RenameError> {
    let name = from
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = from.with_file_name(format!(".{}.{}.batch-rename.tmp", name, std::process::id()));

    fs::rename(from, &temp).map_err(|source| io_error(from, to, source))?;
    if let Err(source) = fs::rename(&temp, to) {
        restore_from_temp(&temp, from);
        return Err(io_error(from, to, source));
    }
    Ok(())
}

/// Move a file parked under `temp` back to `original`. A failure leaves the
/// file under the temporary name and is logged with both paths.
fn restore_from_temp(temp: &Path, original: &Path) -> bool {
    match fs::rename(temp, original) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                temp = %temp.display(),
                original = %original.display(),
                error = %err,
                "Failed to restore file from temporary name"
            );
            false
        },
    }
}

fn io_error(from: &Path, to: &Path, source: std::io::Error) -> RenameError {
    RenameError::Io {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}

fn is_case_only_change(from: &Path, to: &Path) -> bool {
    from != to && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commit_renames_and_skips() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("keep.txt"), "k").unwrap();

        let (batch, results) = commit(vec![
            (root.join("a.txt"), root.join("b.txt")),
            (root.join("keep.txt"), root.join("keep.txt")),
        ]);

        assert_eq!(batch.len(), 2);
        assert!(batch.ops[0].applied);
        assert!(!batch.ops[1].applied);
        assert!(matches!(results[0], Ok(Outcome::Renamed { .. })));
        assert!(matches!(results[1], Ok(Outcome::Skipped { .. })));
        assert!(!root.join("a.txt").exists());
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "a");
        assert!(root.join("keep.txt").exists());
    }

    #[test]
    fn test_commit_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        let (batch, results) = commit(vec![(root.join("a.txt"), root.join("b.txt"))]);

        assert!(matches!(
            results[0],
            Err(RenameError::DestinationExists { .. })
        ));
        assert!(!batch.ops[0].applied);
        assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "b");
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("present.txt"), "").unwrap();

        let (batch, results) = commit(vec![
            (root.join("missing.txt"), root.join("x.txt")),
            (root.join("present.txt"), root.join("y.txt")),
        ]);

        assert_eq!(batch.len(), 2);
        assert!(matches!(results[0], Err(RenameError::Io { .. })));
        assert!(matches!(results[1], Ok(Outcome::Renamed { .. })));
        assert!(root.join("y.txt").exists());
    }

    #[test]
    fn test_rejects_targets_outside_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();

        let (_, results) = commit(vec![(root.join("a.txt"), root.join("sub").join("a.txt"))]);
        assert!(matches!(results[0], Err(RenameError::InvalidName { .. })));
        assert!(root.join("a.txt").exists());
    }

    #[test]
    fn test_case_only_rename() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("photo.JPG"), "img").unwrap();

        let (_, results) = commit(vec![(root.join("photo.JPG"), root.join("photo.jpg"))]);
        assert!(results[0].is_ok());

        let names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["photo.jpg".to_string()]);
    }

    #[test]
    fn test_error_exposes_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let (_, mut results) = commit(vec![(root.join("nope"), root.join("nada"))]);
        let err = results.remove(0).unwrap_err();
        assert_eq!(err.from_path(), root.join("nope"));
        assert_eq!(err.to_path(), root.join("nada"));
    }

    #[test]
    fn test_restore_from_temp() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let parked = root.join(".a.txt.1.batch-rename.tmp");
        fs::write(&parked, "a").unwrap();

        assert!(restore_from_temp(&parked, &root.join("a.txt")));
        assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a");
        assert!(!parked.exists());

        assert!(!restore_from_temp(&parked, &root.join("b.txt")));
        assert!(!root.join("b.txt").exists());
    }
}
