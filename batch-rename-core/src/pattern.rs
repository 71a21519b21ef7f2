use crate::error::PatternError;
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

/// A compiled filename pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// Substitute `template` into `name`.
    ///
    /// `template` must already be in native regex replacement syntax (see
    /// [`translate_template`]). Only the leftmost match is replaced unless
    /// `replace_all` is set.
    pub fn apply(&self, template: &str, name: &str, replace_all: bool) -> String {
        if replace_all {
            self.regex.replace_all(name, template).into_owned()
        } else {
            self.regex.replace(name, template).into_owned()
        }
    }
}

/// Compile a user-supplied pattern. The empty pattern is valid and matches at
/// the start of every name.
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    Regex::new(pattern)
        .map(|regex| CompiledPattern { regex })
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
}

/// Replace the leftmost match of `compiled` in `name` with `replacement`.
///
/// Groups are referenced as `\1` or `\g<name>`. A `$` is literal text.
pub fn substitute(compiled: &CompiledPattern, replacement: &str, name: &str) -> String {
    compiled.apply(&translate_template(replacement), name, false)
}

/// Rewrite a backslash-style template into native regex replacement syntax.
///
/// `\N` and `\g<name>` become braced `${..}` references, `\\` yields a
/// literal backslash and every `$` is escaped as `$$`.
pub fn translate_template(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            out.push_str("$$");
            continue;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some(d) if d.is_ascii_digit() => {
                let mut group = String::new();
                while group.len() < 2 {
                    match chars.peek() {
                        Some(d) if d.is_ascii_digit() => {
                            group.push(*d);
                            chars.next();
                        },
                        _ => break,
                    }
                }
                out.push_str("${");
                out.push_str(&group);
                out.push('}');
            },
            Some('g') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if let Some(name) = read_group_name(&mut lookahead) {
                    out.push_str("${");
                    out.push_str(&name);
                    out.push('}');
                    chars = lookahead;
                    continue;
                }
                out.push('\\');
            },
            Some('\\') => {
                chars.next();
                out.push('\\');
            },
            _ => out.push('\\'),
        }
    }

    out
}

/// Read `<name>` following `\g`. Returns `None` unless the name is closed
/// and made of word characters.
fn read_group_name(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    if chars.next() != Some('<') {
        return None;
    }
    let mut name = String::new();
    for c in chars.by_ref() {
        if c == '>' {
            return (!name.is_empty() && is_group_name(&name)).then_some(name);
        }
        name.push(c);
    }
    None
}

fn is_group_name(name: &str) -> bool {
    name.chars().all(|c| c.is_alphanumeric() || c == '_')
}
