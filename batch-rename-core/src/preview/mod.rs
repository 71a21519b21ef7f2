mod summary;
mod table;

pub use summary::{render_summary, PreviewSummary};
pub use table::render_table;

use crate::lister::{is_valid_file_name, FileEntry};
use crate::pattern::{self, CompiledPattern};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, IsTerminal};
use tracing::debug;

/// Text shown in place of a proposed name when the pattern does not compile.
pub const INVALID_PLACEHOLDER: &str = "invalid regular expression";

/// Characters that make a proposed name unsafe by default.
pub const DEFAULT_UNSAFE_CHARS: [char; 2] = ['?', '|'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Unchanged,
    Changed,
    ChangedUnsafe,
    InvalidPattern,
}

/// Colour and weight hint for presenting a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleHint {
    pub rgb: (u8, u8, u8),
    pub bold: bool,
}

impl RowStatus {
    pub fn style_hint(self) -> Option<StyleHint> {
        match self {
            Self::Changed => Some(StyleHint {
                rgb: (131, 203, 172),
                bold: true,
            }),
            Self::ChangedUnsafe => Some(StyleHint {
                rgb: (231, 124, 142),
                bold: true,
            }),
            Self::Unchanged | Self::InvalidPattern => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
            Self::ChangedUnsafe => "unsafe",
            Self::InvalidPattern => "invalid",
        }
    }
}

/// One line of a rename preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub original_name: String,
    pub proposed_name: String,
    pub status: RowStatus,
}

impl PreviewRow {
    pub fn is_changed(&self) -> bool {
        matches!(self.status, RowStatus::Changed | RowStatus::ChangedUnsafe)
    }

    /// The name to commit for this row. Rows without a usable proposal keep
    /// their original name.
    pub fn target_name(&self) -> &str {
        match self.status {
            RowStatus::InvalidPattern => &self.original_name,
            _ => &self.proposed_name,
        }
    }
}

/// Knobs for building a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOptions {
    /// A changed name containing any of these is flagged unsafe
    #[serde(default = "default_unsafe_chars")]
    pub unsafe_chars: Vec<char>,

    /// Shown instead of a proposed name when the pattern does not compile
    #[serde(default = "default_placeholder")]
    pub invalid_placeholder: String,

    /// Substitute every match instead of only the leftmost one
    #[serde(default)]
    pub replace_all: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            unsafe_chars: default_unsafe_chars(),
            invalid_placeholder: default_placeholder(),
            replace_all: false,
        }
    }
}

fn default_unsafe_chars() -> Vec<char> {
    DEFAULT_UNSAFE_CHARS.to_vec()
}

fn default_placeholder() -> String {
    INVALID_PLACEHOLDER.to_string()
}

impl PreviewOptions {
    fn is_unsafe(&self, name: &str) -> bool {
        name.contains(self.unsafe_chars.as_slice()) || !is_valid_file_name(name)
    }
}

/// Build the preview for `files` with default options.
pub fn build(files: &[FileEntry], pattern: &str, replacement: &str) -> Vec<PreviewRow> {
    build_with_options(files, pattern, replacement, &PreviewOptions::default())
}

pub fn build_with_options(
    files: &[FileEntry],
    pattern: &str,
    replacement: &str,
    options: &PreviewOptions,
) -> Vec<PreviewRow> {
    let names: Vec<&str> = files.iter().map(FileEntry::name).collect();
    build_names(&names, pattern, replacement, options)
}

/// Build the preview for bare file names, in the order given.
pub fn build_names<S: AsRef<str>>(
    names: &[S],
    pattern: &str,
    replacement: &str,
    options: &PreviewOptions,
) -> Vec<PreviewRow> {
    match pattern::compile(pattern) {
        Ok(compiled) => build_compiled(names, &compiled, replacement, options),
        Err(err) => {
            debug!(error = %err, "Pattern does not compile");
            names
                .iter()
                .map(|name| PreviewRow {
                    original_name: name.as_ref().to_string(),
                    proposed_name: options.invalid_placeholder.clone(),
                    status: RowStatus::InvalidPattern,
                })
                .collect()
        },
    }
}

/// Build the preview with an already compiled pattern.
///
/// Candidates are suffixed in list order: the k-th repeat of a candidate
/// becomes `stem_(k).ext`. Status is classified on the suffixed name, then any
/// names that still coincide are all flagged unsafe.
pub fn build_compiled<S: AsRef<str>>(
    names: &[S],
    compiled: &CompiledPattern,
    replacement: &str,
    options: &PreviewOptions,
) -> Vec<PreviewRow> {
    let template = pattern::translate_template(replacement);
    let mut seen: HashMap<String, usize> = HashMap::new();

    let mut rows: Vec<PreviewRow> = names
        .iter()
        .map(|name| {
            let original = name.as_ref();
            let candidate = compiled.apply(&template, original, options.replace_all);
            let repeats = seen.entry(candidate.clone()).or_insert(0);
            let proposed = if *repeats == 0 {
                candidate
            } else {
                with_suffix(&candidate, *repeats)
            };
            *repeats += 1;

            let status = classify(original, &proposed, options);
            PreviewRow {
                original_name: original.to_string(),
                proposed_name: proposed,
                status,
            }
        })
        .collect();

    flag_collisions(&mut rows);
    rows
}

fn classify(original: &str, proposed: &str, options: &PreviewOptions) -> RowStatus {
    if original == proposed {
        RowStatus::Unchanged
    } else if options.is_unsafe(proposed) {
        RowStatus::ChangedUnsafe
    } else {
        RowStatus::Changed
    }
}

fn flag_collisions(rows: &mut [PreviewRow]) {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        by_name
            .entry(row.proposed_name.as_str())
            .or_default()
            .push(idx);
    }

    let colliding: Vec<usize> = by_name
        .into_values()
        .filter(|indices| indices.len() > 1)
        .flatten()
        .collect();

    for idx in colliding {
        rows[idx].status = RowStatus::ChangedUnsafe;
    }
}

/// Classify rows again after their proposed names were edited by hand.
///
/// Rows of an invalid pattern have no name to edit and are left alone.
pub fn reclassify(rows: &mut [PreviewRow], options: &PreviewOptions) {
    if rows
        .iter()
        .any(|row| row.status == RowStatus::InvalidPattern)
    {
        return;
    }

    for row in rows.iter_mut() {
        row.status = classify(&row.original_name, &row.proposed_name, options);
    }
    flag_collisions(rows);
}

/// Insert `_(k)` before the extension: `photo.jpg` -> `photo_(2).jpg`.
pub fn with_suffix(name: &str, k: usize) -> String {
    let (stem, extension) = split_extension(name);
    format!("{}_({}){}", stem, k, extension)
}

/// Split at the last dot. A leading dot belongs to the stem.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render preview rows in the given format.
pub fn render_rows(rows: &[PreviewRow], format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(rows, use_color),
        Preview::Summary => render_summary(rows),
        Preview::Json => serde_json::to_string_pretty(rows).unwrap_or_default(),
        Preview::None => String::new(),
    }
}
