use anyhow::Result;
use batch_rename_core::{format_history, history_operation, OutputFormatter, Session};
use std::io::Write;

pub fn handle_history<W: Write>(session: &Session, limit: Option<usize>, out: &mut W) -> Result<()> {
    if session.history().is_empty() {
        write!(out, "{}", history_operation(session, limit).format_summary())?;
        return Ok(());
    }

    let entries = session.history().list_entries(limit);
    writeln!(out, "{}", format_history(&entries, false))?;
    Ok(())
}
