use anyhow::{anyhow, bail, Context, Result};
use batch_rename_core::{
    reclassify, render_rows, CommitResult, OutputFormatter, Preview, PreviewOptions, PreviewRow,
    RowStatus, Session,
};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::{history, undo};

const HELP: &str = "\
Commands:
  open <dir>          list the files of <dir>
  refresh             list the current directory again
  pattern <regex>     set the pattern (rest of the line, may be empty)
  replace <text>      set the replacement (rest of the line, may be empty)
  edit <n> <name>     use <name> for row <n> instead of the proposed name
  reset               drop all hand edits
  show                show the preview
  apply               rename the files as shown
  undo                reverse the last apply
  history             list the applied batches, most recent first
  help                show this help
  quit                leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Open(PathBuf),
    Refresh,
    Pattern(String),
    Replace(String),
    Edit { row: usize, name: String },
    Reset,
    Show,
    Apply,
    Undo,
    History,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let command = match word {
        "open" => {
            let dir = rest.trim();
            if dir.is_empty() {
                bail!("Usage: open <dir>");
            }
            Command::Open(PathBuf::from(dir))
        },
        "refresh" => Command::Refresh,
        "pattern" => Command::Pattern(rest.to_string()),
        "replace" => Command::Replace(rest.to_string()),
        "edit" => {
            let (row, name) = rest
                .trim_start()
                .split_once(' ')
                .ok_or_else(|| anyhow!("Usage: edit <n> <name>"))?;
            let row: usize = row
                .parse()
                .with_context(|| format!("Row number expected, got '{}'", row))?;
            Command::Edit {
                row,
                name: name.to_string(),
            }
        },
        "reset" => Command::Reset,
        "show" => Command::Show,
        "apply" => Command::Apply,
        "undo" => Command::Undo,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command '{}'. Type 'help' for a list.", other),
    };

    Ok(Some(command))
}

/// Line-oriented front end over a [`Session`].
pub struct Repl<W: Write> {
    session: Session,
    pattern: String,
    replacement: String,
    /// Hand-edited names keyed by original name
    edits: BTreeMap<String, String>,
    preview: Preview,
    use_color: Option<bool>,
    out: W,
}

impl<W: Write> Repl<W> {
    pub fn new(options: PreviewOptions, preview: Preview, use_color: Option<bool>, out: W) -> Self {
        Self {
            session: Session::new(options),
            pattern: String::new(),
            replacement: String::new(),
            edits: BTreeMap::new(),
            preview,
            use_color,
            out,
        }
    }

    /// Read commands until `quit` or end of input.
    ///
    /// A failing command prints its error and the session carries on.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<()> {
        self.prompt(prompt)?;
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let outcome = parse_command(&line).and_then(|command| match command {
                Some(Command::Quit) => Ok(false),
                Some(command) => self.execute(command).map(|()| true),
                None => Ok(true),
            });

            match outcome {
                Ok(false) => return Ok(()),
                Ok(true) => {},
                Err(e) => writeln!(self.out, "Error: {e:#}")?,
            }
            self.prompt(prompt)?;
        }
        Ok(())
    }

    fn prompt(&mut self, prompt: bool) -> Result<()> {
        if prompt {
            write!(self.out, "> ")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        debug!(?command, "Session command");
        match command {
            Command::Open(dir) => {
                let count = self.session.open(&dir)?.len();
                self.edits.clear();
                writeln!(self.out, "Opened {} ({} files)", dir.display(), count)?;
            },
            Command::Refresh => {
                let count = self.session.refresh()?.len();
                writeln!(self.out, "{} files", count)?;
            },
            Command::Pattern(pattern) => {
                self.pattern = pattern;
                self.edits.clear();
                self.show()?;
            },
            Command::Replace(replacement) => {
                self.replacement = replacement;
                self.edits.clear();
                self.show()?;
            },
            Command::Edit { row, name } => self.edit(row, name)?,
            Command::Reset => {
                self.edits.clear();
                self.show()?;
            },
            Command::Show => self.show()?,
            Command::Apply => self.apply()?,
            Command::Undo => {
                undo::handle_undo(&mut self.session, &mut self.out)?;
                self.edits.clear();
            },
            Command::History => history::handle_history(&self.session, None, &mut self.out)?,
            Command::Help => write!(self.out, "{}", HELP)?,
            Command::Quit => {},
        }
        Ok(())
    }

    /// Preview rows with hand edits applied.
    fn rows(&self) -> Vec<PreviewRow> {
        let mut rows = self.session.preview(&self.pattern, &self.replacement);
        if self.edits.is_empty() {
            return rows;
        }

        for row in &mut rows {
            if let Some(name) = self.edits.get(&row.original_name) {
                row.proposed_name.clone_from(name);
            }
        }
        reclassify(&mut rows, self.session.options());
        rows
    }

    fn show(&mut self) -> Result<()> {
        if self.session.directory().is_none() {
            writeln!(self.out, "No directory open. Use 'open <dir>'.")?;
            return Ok(());
        }

        let rows = self.rows();
        let rendered = render_rows(&rows, self.preview, self.use_color);
        writeln!(self.out, "{}", rendered.trim_end())?;
        Ok(())
    }

    fn edit(&mut self, row: usize, name: String) -> Result<()> {
        let rows = self.session.preview(&self.pattern, &self.replacement);
        if rows.iter().any(|r| r.status == RowStatus::InvalidPattern) {
            bail!("Cannot edit rows while the pattern is invalid");
        }
        let original = row
            .checked_sub(1)
            .and_then(|idx| rows.get(idx))
            .map(|r| r.original_name.clone())
            .ok_or_else(|| anyhow!("No row {} (1-{})", row, rows.len()))?;

        self.edits.insert(original, name);
        self.show()
    }

    fn apply(&mut self) -> Result<()> {
        let directory = self
            .session
            .directory()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("No directory open. Use 'open <dir>'."))?;

        let rows = self.rows();
        if !rows.iter().any(PreviewRow::is_changed) {
            writeln!(self.out, "Nothing to rename")?;
            return Ok(());
        }

        let results = self.session.commit_rows(&rows)?;
        self.edits.clear();
        let result = CommitResult::from_results(&directory, &results);
        write!(self.out, "{}", result.format_summary())?;
        Ok(())
    }
}
