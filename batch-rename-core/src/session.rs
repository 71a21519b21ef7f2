use crate::apply::{commit, ItemResult};
use crate::error::SessionError;
use crate::history::HistoryStack;
use crate::lister::{self, FileEntry};
use crate::preview::{self, PreviewOptions, PreviewRow};
use crate::undo::undo_batch;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// State of one interactive renaming session: the working directory, its
/// current file list and the undo history.
///
/// Every operation runs to completion on the calling thread. Changes made to
/// the directory by other processes between listing and commit are not
/// detected.
#[derive(Debug, Default)]
pub struct Session {
    options: PreviewOptions,
    directory: Option<PathBuf>,
    files: Vec<FileEntry>,
    history: HistoryStack,
}

impl Session {
    pub fn new(options: PreviewOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Switch to `directory` and list its files.
    pub fn open(&mut self, directory: impl AsRef<Path>) -> Result<&[FileEntry]> {
        let directory = directory.as_ref();
        let files = lister::list(directory)?;
        self.directory = Some(directory.canonicalize()?);
        self.files = files;
        Ok(&self.files)
    }

    /// List the working directory again.
    pub fn refresh(&mut self) -> Result<&[FileEntry]> {
        let directory = self.directory.as_deref().ok_or(SessionError::NoDirectory)?;
        self.files = lister::list(directory)?;
        Ok(&self.files)
    }

    pub fn preview(&self, pattern: &str, replacement: &str) -> Vec<PreviewRow> {
        preview::build_with_options(&self.files, pattern, replacement, &self.options)
    }

    /// Rename `(original_name, new_name)` pairs inside the working directory.
    ///
    /// The batch is recorded for undo even when individual renames fail;
    /// check the returned results for what actually happened.
    pub fn commit<I, A, B>(&mut self, pairs: I) -> Result<Vec<ItemResult>>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let directory = self.directory.clone().ok_or(SessionError::NoDirectory)?;
        let paths: Vec<(PathBuf, PathBuf)> = pairs
            .into_iter()
            .map(|(from, to)| (directory.join(from.as_ref()), directory.join(to.as_ref())))
            .collect();

        let (batch, results) = commit(paths);
        debug!(
            pairs = batch.len(),
            applied = batch.applied_count(),
            "Committed batch"
        );
        self.history.push(batch);
        self.relist();
        Ok(results)
    }

    /// Commit preview rows, possibly after hand edits.
    pub fn commit_rows(&mut self, rows: &[PreviewRow]) -> Result<Vec<ItemResult>> {
        self.commit(
            rows.iter()
                .map(|row| (row.original_name.as_str(), row.target_name())),
        )
    }

    /// Reverse the most recent batch.
    ///
    /// Fails with [`SessionError::EmptyHistory`] when there is nothing to undo.
    pub fn try_undo(&mut self) -> Result<Vec<ItemResult>, SessionError> {
        let batch = self.history.pop().ok_or(SessionError::EmptyHistory)?;
        let results = undo_batch(&batch);
        self.relist();
        Ok(results)
    }

    /// Reverse the most recent batch. Does nothing on an empty history.
    pub fn undo(&mut self) -> Vec<ItemResult> {
        self.try_undo().unwrap_or_else(|err| {
            debug!(error = %err, "Undo skipped");
            Vec::new()
        })
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    fn relist(&mut self) {
        if let Err(err) = self.refresh() {
            warn!(error = %err, "Failed to list directory after rename");
            self.files.clear();
        }
    }
}
