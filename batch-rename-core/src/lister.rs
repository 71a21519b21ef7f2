use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{is_separator, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file directly inside the working directory.
///
/// Holds an absolute path whose final component is valid UTF-8. Entries go
/// stale as soon as a rename is committed and must be listed again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileEntry {
    path: PathBuf,
    #[serde(skip)]
    name: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_absolute() {
            bail!("File path is not absolute: {}", path.display());
        }
        let name = path
            .file_name()
            .ok_or_else(|| anyhow!("Path has no file name: {}", path.display()))?
            .to_str()
            .ok_or_else(|| anyhow!("File name is not valid UTF-8: {}", path.display()))?
            .to_string();
        Ok(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Ord for FileEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for FileEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// List the regular files directly inside `directory`, sorted by name.
///
/// Symlinks are followed, so a link to a regular file is listed and a broken
/// link is not. Subdirectories are never descended into.
pub fn list(directory: &Path) -> Result<Vec<FileEntry>> {
    let directory = directory
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory: {}", directory.display()))?;
    if !directory.is_dir() {
        bail!("Not a directory: {}", directory.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "Skipping unreadable directory entry");
                continue;
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match FileEntry::new(entry.path()) {
            Ok(file) => files.push(file),
            Err(err) => warn!(path = %entry.path().display(), error = %err, "Skipping file"),
        }
    }

    // String order on UTF-8 is codepoint order
    files.sort();
    debug!(directory = %directory.display(), count = files.len(), "Listed files");
    Ok(files)
}

/// Whether `name` can be used as a sibling file name: non-empty, not `.` or
/// `..`, and free of path separators and NUL.
pub fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| is_separator(c) || c == '\0')
}
