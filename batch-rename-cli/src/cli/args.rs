use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename the files of a folder with a regular expression, with preview and undo
#[derive(Parser, Debug)]
#[command(name = "batch-rename")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log every listing, preview and rename to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from <PATH> instead of ./.batch-rename.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "BATCH_RENAME_YES")]
    pub yes: bool,
}

/// Directory, pattern and replacement shared by preview and rename
#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    /// Directory whose files are renamed
    pub directory: PathBuf,

    /// Regular expression matched against each file name (extension included)
    pub pattern: String,

    /// Replacement template (\1 and \g<name> refer to groups, $ is literal)
    #[arg(default_value = "")]
    pub replacement: String,

    /// Replace every match instead of only the first one
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the proposed names without renaming anything
    Preview {
        #[command(flatten)]
        target: PatternArgs,

        /// Preview output format (defaults from config if not specified)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,
    },

    /// Preview, confirm and rename in one step
    Rename {
        #[command(flatten)]
        target: PatternArgs,

        /// Preview output format shown before the confirmation prompt
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Show what would be renamed, don't touch any file
        #[arg(long)]
        dry_run: bool,

        /// Rename even when some proposed names are flagged unsafe
        #[arg(long)]
        force: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress the preview and the per-file report
        #[arg(long)]
        quiet: bool,
    },

    /// Interactive session reading commands from stdin, with multi-level undo
    Session {
        /// Directory to open at start
        directory: Option<PathBuf>,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
