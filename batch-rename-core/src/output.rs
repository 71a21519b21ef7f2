use crate::apply::{ItemResult, Outcome};
use crate::history::RenameBatch;
use crate::preview::{PreviewRow, PreviewSummary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::Path;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a preview operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResult {
    pub directory: String,
    pub pattern: String,
    pub replacement: String,
    pub rows: Vec<PreviewRow>,
    pub summary: PreviewSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Renamed,
    Skipped,
    Failed,
    Planned,
}

/// One line of a commit or undo report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub from: String,
    pub to: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemReport {
    pub fn from_result(result: &ItemResult) -> Self {
        match result {
            Ok(Outcome::Renamed { from, to }) => Self {
                from: from.display().to_string(),
                to: to.display().to_string(),
                status: ItemStatus::Renamed,
                error: None,
            },
            Ok(Outcome::Skipped { path }) => Self {
                from: path.display().to_string(),
                to: path.display().to_string(),
                status: ItemStatus::Skipped,
                error: None,
            },
            Err(err) => Self {
                from: err.from_path().display().to_string(),
                to: err.to_path().display().to_string(),
                status: ItemStatus::Failed,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Result of committing a batch (or planning one with `dry_run`)
#[derive(Debug, Serialize, Deserialize)]
pub struct CommitResult {
    pub directory: String,
    pub dry_run: bool,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub items: Vec<ItemReport>,
}

impl CommitResult {
    pub fn from_results(directory: &Path, results: &[ItemResult]) -> Self {
        let items: Vec<ItemReport> = results.iter().map(ItemReport::from_result).collect();
        let count = |status: ItemStatus| items.iter().filter(|i| i.status == status).count();
        Self {
            directory: directory.display().to_string(),
            dry_run: false,
            renamed: count(ItemStatus::Renamed),
            skipped: count(ItemStatus::Skipped),
            failed: count(ItemStatus::Failed),
            items,
        }
    }

    /// Describe what a commit of `rows` would do without touching the disk
    pub fn planned(directory: &Path, rows: &[PreviewRow]) -> Self {
        let items: Vec<ItemReport> = rows
            .iter()
            .filter(|row| row.is_changed())
            .map(|row| ItemReport {
                from: directory.join(&row.original_name).display().to_string(),
                to: directory.join(&row.proposed_name).display().to_string(),
                status: ItemStatus::Planned,
                error: None,
            })
            .collect();
        Self {
            directory: directory.display().to_string(),
            dry_run: true,
            renamed: 0,
            skipped: rows.len() - items.len(),
            failed: 0,
            items,
        }
    }
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub nothing_to_undo: bool,
    pub restored: usize,
    pub failed: usize,
    pub items: Vec<ItemReport>,
}

impl UndoResult {
    pub fn nothing_to_undo() -> Self {
        Self {
            nothing_to_undo: true,
            restored: 0,
            failed: 0,
            items: Vec::new(),
        }
    }

    pub fn from_results(results: &[ItemResult]) -> Self {
        let items: Vec<ItemReport> = results
            .iter()
            .map(ItemReport::from_result)
            .filter(|item| item.status != ItemStatus::Skipped)
            .collect();
        Self {
            nothing_to_undo: false,
            restored: items
                .iter()
                .filter(|i| i.status == ItemStatus::Renamed)
                .count(),
            failed: items
                .iter()
                .filter(|i| i.status == ItemStatus::Failed)
                .count(),
            items,
        }
    }
}

/// Result of a history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub entries: Vec<HistoryItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryItem {
    pub position: usize,
    pub timestamp: String,
    pub pairs: usize,
    pub applied: usize,
}

impl HistoryResult {
    /// Entries are expected most recent first
    pub fn from_entries(entries: &[&RenameBatch]) -> Self {
        Self {
            entries: entries
                .iter()
                .enumerate()
                .map(|(idx, batch)| HistoryItem {
                    position: idx + 1,
                    timestamp: batch.created_at.clone(),
                    pairs: batch.len(),
                    applied: batch.applied_count(),
                })
                .collect(),
        }
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn short_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "preview",
            "directory": self.directory,
            "pattern": self.pattern,
            "replacement": self.replacement,
            "summary": self.summary,
            "rows": self.rows,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        crate::preview::render_summary(&self.rows)
    }
}

impl OutputFormatter for CommitResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failed == 0,
            "operation": "rename",
            "directory": self.directory,
            "dry_run": self.dry_run,
            "summary": {
                "renamed": self.renamed,
                "skipped": self.skipped,
                "failed": self.failed,
            },
            "items": self.items,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.dry_run {
            writeln!(output, "Dry run: {} files would be renamed", self.items.len()).unwrap();
            for item in &self.items {
                writeln!(output, "  {} → {}", short_name(&item.from), short_name(&item.to))
                    .unwrap();
            }
            return output;
        }

        for item in &self.items {
            match item.status {
                ItemStatus::Failed => writeln!(
                    output,
                    "✗ {} → {}: {}",
                    short_name(&item.from),
                    short_name(&item.to),
                    item.error.as_deref().unwrap_or("unknown error")
                )
                .unwrap(),
                ItemStatus::Renamed => writeln!(
                    output,
                    "✓ {} → {}",
                    short_name(&item.from),
                    short_name(&item.to)
                )
                .unwrap(),
                ItemStatus::Skipped | ItemStatus::Planned => {},
            }
        }

        writeln!(
            output,
            "Renamed {} files ({} unchanged, {} failed)",
            self.renamed, self.skipped, self.failed
        )
        .unwrap();

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failed == 0,
            "operation": "undo",
            "nothing_to_undo": self.nothing_to_undo,
            "summary": {
                "restored": self.restored,
                "failed": self.failed,
            },
            "items": self.items,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.nothing_to_undo {
            return "Nothing to undo\n".to_string();
        }

        let mut output = String::new();
        for item in &self.items {
            if let Some(error) = &item.error {
                writeln!(
                    output,
                    "✗ {} → {}: {}",
                    short_name(&item.from),
                    short_name(&item.to),
                    error
                )
                .unwrap();
            }
        }
        writeln!(
            output,
            "Restored {} files ({} failed)",
            self.restored, self.failed
        )
        .unwrap();

        output
    }
}

impl OutputFormatter for HistoryResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "entries": self.entries
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.entries.is_empty() {
            return "No history entries found\n".to_string();
        }

        let mut output = String::new();
        for entry in &self.entries {
            writeln!(
                output,
                "{}. {} ({} pairs, {} renamed)",
                entry.position, entry.timestamp, entry.pairs, entry.applied
            )
            .unwrap();
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
