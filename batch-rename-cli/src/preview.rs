use anyhow::Result;
use batch_rename_core::{preview_operation, render_rows, OutputFormatter, Preview, PreviewOptions};

use crate::cli::PatternArgs;

pub fn handle_preview(
    target: &PatternArgs,
    preview_options: &PreviewOptions,
    format: Preview,
    use_color: Option<bool>,
) -> Result<()> {
    let options = PreviewOptions {
        replace_all: preview_options.replace_all || target.all,
        ..preview_options.clone()
    };
    let result = preview_operation(
        &target.directory,
        &target.pattern,
        &target.replacement,
        &options,
    )?;

    match format {
        Preview::Json => println!("{}", result.format_json()),
        Preview::None => {},
        Preview::Table | Preview::Summary => {
            print!("{}", render_rows(&result.rows, format, use_color));
            if format == Preview::Table {
                println!();
            }
        },
    }

    Ok(())
}
