use anyhow::Result;
use batch_rename_core::{Config, OutputFormatter, PatternError, Preview, VersionResult};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

mod cli;
mod history;
mod preview;
mod rename;
mod session;
mod undo;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    };

    // --no-color wins, otherwise the config decides, otherwise auto-detect
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };
    let default_preview =
        Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table);

    let result = match cli.command {
        Commands::Preview { target, preview } => preview::handle_preview(
            &target,
            &config.preview,
            preview.map_or(default_preview, Into::into),
            use_color,
        ),

        Commands::Rename {
            target,
            preview,
            dry_run,
            force,
            output,
            quiet,
        } => rename::handle_rename(
            &target,
            &config.preview,
            preview.map_or(default_preview, Into::into),
            dry_run,
            force,
            cli.yes,
            use_color,
            output,
            quiet,
        ),

        Commands::Session { directory } => {
            handle_session(directory.as_deref(), &config, default_preview, use_color)
        },

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "batch_rename=debug,batch_rename_core=debug"
    } else {
        "batch_rename=warn,batch_rename_core=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load_from_dir(Path::new(".")),
    }
}

/// 1 for refused or partially failed renames, 2 for everything else
fn exit_code(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<PatternError>().is_some() {
        return 2;
    }

    let message = e.to_string();
    if message.contains("are unsafe") || message.contains("renames failed") {
        1
    } else {
        2
    }
}

fn handle_session(
    directory: Option<&Path>,
    config: &Config,
    preview: Preview,
    use_color: Option<bool>,
) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut repl = session::Repl::new(config.preview.clone(), preview, use_color, io::stdout());

    if let Some(directory) = directory {
        repl.run(format!("open {}\n", directory.display()).as_bytes(), false)?;
    }
    if interactive {
        println!("Type 'help' for a list of commands.");
    }
    repl.run(stdin.lock(), interactive)
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "batch-rename".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
