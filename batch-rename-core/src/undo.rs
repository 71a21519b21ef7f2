use crate::apply::{rename_path, ItemResult, Outcome};
use crate::history::RenameBatch;
use tracing::{info, warn};

/// Reverse a committed batch, renaming each applied `to` back to `from`.
///
/// Operations are reversed last to first so chained renames unwind in the
/// right order. No-op pairs and renames that never happened are skipped.
/// `results[i]` belongs to `batch.ops[i]`.
pub fn undo_batch(batch: &RenameBatch) -> Vec<ItemResult> {
    let mut results: Vec<ItemResult> = batch
        .ops
        .iter()
        .rev()
        .map(|op| {
            if op.is_noop() || !op.applied {
                return Ok(Outcome::Skipped {
                    path: op.to.clone(),
                });
            }

            let result = rename_path(&op.to, &op.from).map(|()| Outcome::Renamed {
                from: op.to.clone(),
                to: op.from.clone(),
            });
            match &result {
                Ok(_) => info!(from = %op.to.display(), to = %op.from.display(), "Restored"),
                Err(err) => warn!(error = %err, "Undo rename failed"),
            }
            result
        })
        .collect();

    results.reverse();
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::commit;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_undo_restores_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        let (batch, _) = commit(vec![
            (root.join("a.txt"), root.join("x.txt")),
            (root.join("b.txt"), root.join("b.txt")),
        ]);
        let results = undo_batch(&batch);

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Ok(Outcome::Renamed { .. })));
        assert!(matches!(results[1], Ok(Outcome::Skipped { .. })));
        assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a");
        assert!(!root.join("x.txt").exists());
    }

    #[test]
    fn test_undo_of_failed_batch_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        // Destination exists, so nothing is renamed
        let (batch, results) = commit(vec![(root.join("a.txt"), root.join("b.txt"))]);
        assert!(results[0].is_err());

        let results = undo_batch(&batch);
        assert!(matches!(results[0], Ok(Outcome::Skipped { .. })));
        assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "b");
    }

    #[test]
    fn test_undo_chain_in_reverse_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("1.txt"), "one").unwrap();
        fs::write(root.join("2.txt"), "two").unwrap();

        // 2 -> 3 frees "2.txt" for 1 -> 2
        let (batch, results) = commit(vec![
            (root.join("2.txt"), root.join("3.txt")),
            (root.join("1.txt"), root.join("2.txt")),
        ]);
        assert!(results.iter().all(Result::is_ok));

        let results = undo_batch(&batch);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(fs::read_to_string(root.join("1.txt")).unwrap(), "one");
        assert_eq!(fs::read_to_string(root.join("2.txt")).unwrap(), "two");
        assert!(!root.join("3.txt").exists());
    }

    #[test]
    fn test_undo_reports_failure_and_continues() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        let (batch, _) = commit(vec![
            (root.join("a.txt"), root.join("a2.txt")),
            (root.join("b.txt"), root.join("b2.txt")),
        ]);
        // Someone recreates the original name in the meantime
        fs::write(root.join("a.txt"), "intruder").unwrap();

        let results = undo_batch(&batch);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "intruder");
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "b");
    }
}
