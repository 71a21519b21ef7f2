//! High-level operations that correspond to CLI commands
//!
//! These modules contain the business logic for each batch-rename command,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod history;
pub mod preview;
pub mod rename;
pub mod undo;

pub use history::history_operation;
pub use preview::preview_operation;
pub use rename::{rename_operation, validate_operation_safety, RenameOptions};
pub use undo::undo_operation;
