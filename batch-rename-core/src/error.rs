use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A pattern that the regex engine refused to compile.
#[derive(Debug, Clone, Error)]
#[error("invalid regular expression '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Why a single rename in a batch did not happen.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("cannot rename {} to {}: destination already exists", from.display(), to.display())]
    DestinationExists { from: PathBuf, to: PathBuf },

    #[error("cannot rename {} to {}: not a file name in the same directory", from.display(), to.display())]
    InvalidName { from: PathBuf, to: PathBuf },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenameError {
    pub fn from_path(&self) -> &Path {
        match self {
            Self::DestinationExists { from, .. }
            | Self::InvalidName { from, .. }
            | Self::Io { from, .. } => from,
        }
    }

    pub fn to_path(&self) -> &Path {
        match self {
            Self::DestinationExists { to, .. }
            | Self::InvalidName { to, .. }
            | Self::Io { to, .. } => to,
        }
    }
}

/// Session-level conditions that stop an operation before any rename happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no directory selected")]
    NoDirectory,

    #[error("nothing to undo")]
    EmptyHistory,
}
