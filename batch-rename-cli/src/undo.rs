use anyhow::Result;
use batch_rename_core::{undo_operation, OutputFormatter, Session};
use std::io::Write;

pub fn handle_undo<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    let result = undo_operation(session);
    write!(out, "{}", result.format_summary())?;
    Ok(())
}
