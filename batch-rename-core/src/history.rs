use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One rename in a committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOp {
    pub from: PathBuf,
    pub to: PathBuf,
    /// Whether the forward rename actually happened
    pub applied: bool,
}

impl RenameOp {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// The renames committed together in one action, in the order they were
/// passed in. No-op pairs and failed renames are kept so the batch mirrors
/// the commit exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameBatch {
    /// Timestamp when the batch was committed
    pub created_at: String,
    pub ops: Vec<RenameOp>,
}

impl RenameBatch {
    pub fn new(ops: Vec<RenameOp>) -> Self {
        Self {
            created_at: chrono::Local::now().to_rfc3339(),
            ops,
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.ops.iter().filter(|op| op.applied).count()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.ops.iter().map(|op| (op.from.as_path(), op.to.as_path()))
    }
}

/// In-memory stack of committed batches, most recent last.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<RenameBatch>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: RenameBatch) {
        self.entries.push(batch);
    }

    /// Remove the most recent batch. Returns `None` on an empty stack.
    pub fn pop(&mut self) -> Option<RenameBatch> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&RenameBatch> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all entries most recent first, optionally limited to the most recent N
    pub fn list_entries(&self, limit: Option<usize>) -> Vec<&RenameBatch> {
        let entries = self.entries.iter().rev();
        match limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        }
    }
}

/// Format history entries for display
pub fn format_history(entries: &[&RenameBatch], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(entries).unwrap_or_default();
    }

    use comfy_table::{Cell, Color, Table};

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Pairs").fg(Color::Cyan),
        Cell::new("Applied").fg(Color::Cyan),
        Cell::new("First rename").fg(Color::Cyan),
    ]);

    for (idx, entry) in entries.iter().enumerate() {
        let date = entry
            .created_at
            .split('T')
            .next()
            .unwrap_or(&entry.created_at);
        let first = entry
            .ops
            .iter()
            .find(|op| op.applied)
            .map(|op| format!("{} → {}", file_name(&op.from), file_name(&op.to)))
            .unwrap_or_default();

        table.add_row(vec![
            (idx + 1).to_string(),
            date.to_string(),
            entry.len().to_string(),
            entry.applied_count().to_string(),
            first,
        ]);
    }

    table.to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
