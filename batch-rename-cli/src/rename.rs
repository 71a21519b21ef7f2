use anyhow::{anyhow, Result};
use batch_rename_core::{
    compile, preview_operation, render_rows, rename_operation, validate_operation_safety,
    OutputFormatter, Preview, PreviewOptions, RenameOptions,
};
use std::io::{self, BufRead, Write};

use crate::cli::{OutputFormat, PatternArgs};

#[allow(clippy::too_many_arguments)]
pub fn handle_rename(
    target: &PatternArgs,
    preview_options: &PreviewOptions,
    preview: Preview,
    dry_run: bool,
    force: bool,
    yes: bool,
    use_color: Option<bool>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    // Never prompt or rename with a pattern that does not compile
    compile(&target.pattern)?;

    let options = PreviewOptions {
        replace_all: preview_options.replace_all || target.all,
        ..preview_options.clone()
    };
    let planned = preview_operation(
        &target.directory,
        &target.pattern,
        &target.replacement,
        &options,
    )?;

    let show_text = output == OutputFormat::Summary && !quiet;
    if show_text && preview != Preview::None {
        print!("{}", render_rows(&planned.rows, preview, use_color));
        if preview == Preview::Table {
            println!();
        }
    }

    validate_operation_safety(&planned.rows, force)?;

    if planned.summary.changed + planned.summary.unsafe_count == 0 {
        if show_text {
            println!("No files to rename");
        }
        return Ok(());
    }

    let rename_options = RenameOptions { force, dry_run };
    if !dry_run && !yes {
        if output == OutputFormat::Json {
            return Err(anyhow!("--output json needs --yes or --dry-run"));
        }
        if !get_user_confirmation()? {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = rename_operation(
        &target.directory,
        &target.pattern,
        &target.replacement,
        &options,
        rename_options,
    )?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    if result.failed > 0 {
        return Err(anyhow!(
            "{} of {} renames failed",
            result.failed,
            result.items.len()
        ));
    }

    Ok(())
}

fn get_user_confirmation() -> Result<bool> {
    confirm_with_input(&mut io::stdin().lock())
}

fn confirm_with_input<R: BufRead>(reader: &mut R) -> Result<bool> {
    print!("Apply? [y/N]: ");
    io::stdout().flush()?;

    let mut response = String::new();
    reader.read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    Ok(response == "y" || response == "yes")
}
