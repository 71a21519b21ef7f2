pub mod args;
pub mod types;

pub use args::{Cli, Commands, PatternArgs};
pub use types::{OutputFormat, PreviewArg};
