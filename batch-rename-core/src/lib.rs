#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Rename a folder's files with a regular expression: preview the result,
//! commit it, and undo it again.

pub mod apply;
pub mod config;
pub mod error;
pub mod history;
pub mod lister;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod preview;
pub mod session;
pub mod undo;

pub use apply::{commit, ItemResult, Outcome};
pub use config::{Config, DefaultsConfig};
pub use error::{PatternError, RenameError, SessionError};
pub use history::{format_history, HistoryStack, RenameBatch, RenameOp};
pub use lister::{list, FileEntry};
pub use operations::{
    history_operation, preview_operation, rename_operation, undo_operation,
    validate_operation_safety, RenameOptions,
};
pub use output::{
    CommitResult, HistoryItem, HistoryResult, ItemReport, ItemStatus, OutputFormat,
    OutputFormatter, PreviewResult, UndoResult, VersionResult,
};
pub use pattern::{compile, substitute, CompiledPattern};
pub use preview::{
    build, build_names, build_with_options, reclassify, render_rows, Preview, PreviewOptions,
    PreviewRow, PreviewSummary, RowStatus, StyleHint,
};
pub use session::Session;
pub use undo::undo_batch;
