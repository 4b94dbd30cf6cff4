//! EnvFile type.
//!
//! A stack's `.env` file kept as its original lines, terminators included,
//! so that unrelated lines, comments, ordering and line endings survive a
//! rewrite.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::KeyState;
use crate::core::constants::PLACEHOLDER_PREFIX;
use crate::error::{EnvError, Result};

/// A `KEY=VALUE` env file bound to a path.
#[derive(Debug, Clone)]
pub struct EnvFile {
    /// Raw lines, each with its own terminator (the last may have none).
    lines: Vec<String>,
    /// Terminator for new lines: `\r\n` if the file already uses it.
    newline: &'static str,
    path: PathBuf,
    dirty: bool,
}

impl EnvFile {
    /// Read an env file from disk.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::NotFound` if the file does not exist; the file is
    /// never created here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EnvError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| EnvError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded env file");
        Ok(Self::parse(&contents, path))
    }

    /// Build from in-memory contents.
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Self {
        let lines: Vec<String> = contents.split_inclusive('\n').map(str::to_string).collect();
        let newline = match lines.first() {
            Some(first) if first.ends_with("\r\n") => "\r\n",
            _ => "\n",
        };

        Self {
            lines,
            newline,
            path: path.into(),
            dirty: false,
        }
    }

    /// Persist the file atomically.
    ///
    /// Contents go to a temporary file next to the target which then
    /// replaces it, so readers see either the old or the new file. The
    /// existing file mode is kept.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Persist` if any step of the write fails.
    pub fn save(&mut self) -> Result<()> {
        let persist = |source: std::io::Error| EnvError::Persist {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(persist)?;
        tmp.write_all(self.to_string().as_bytes()).map_err(persist)?;
        tmp.as_file().sync_all().map_err(persist)?;

        if let Ok(meta) = std::fs::metadata(&self.path) {
            std::fs::set_permissions(tmp.path(), meta.permissions()).map_err(persist)?;
        }

        tmp.persist(&self.path).map_err(|e| persist(e.error))?;
        self.dirty = false;

        debug!(path = %self.path.display(), "saved env file");
        Ok(())
    }

    /// Value for `key` with one layer of quotes removed.
    pub fn get(&self, key: &str) -> Option<String> {
        self.find(key).map(|(_, raw)| parse_env_value(raw.trim()))
    }

    /// Classify `key` against the placeholder policy.
    pub fn state(&self, key: &str) -> KeyState {
        match self.find(key) {
            None => KeyState::Absent,
            Some((_, raw)) => {
                let value = strip_quotes(raw.trim());
                if value.is_empty() || value.starts_with(PLACEHOLDER_PREFIX) {
                    KeyState::Placeholder
                } else {
                    KeyState::Set
                }
            }
        }
    }

    /// Number of raw lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the file has no lines at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Overwrite the value of the first definition of `key`.
    ///
    /// Everything up to the `=` (indentation, `export`) and the line's
    /// terminator are kept. Returns `false` if the key is not defined.
    pub(crate) fn replace(&mut self, key: &str, value: &str) -> bool {
        let Some((index, _)) = self.find(key) else {
            return false;
        };

        let line = &self.lines[index];
        let (content, ending) = split_ending(line);
        let Some((head, _)) = content.split_once('=') else {
            return false;
        };
        let updated = format!("{}={}{}", head, format_value(value), ending);
        self.lines[index] = updated;
        self.dirty = true;
        true
    }

    /// Add a new `KEY=VALUE` line at the end.
    pub(crate) fn append(&mut self, key: &str, value: &str) {
        if let Some(last) = self.lines.last_mut() {
            if !last.ends_with('\n') {
                last.push_str(self.newline);
            }
        }
        self.lines
            .push(format!("{}={}{}", key, format_value(value), self.newline));
        self.dirty = true;
    }

    /// First line defining `key`, with its raw (unparsed) value.
    fn find(&self, key: &str) -> Option<(usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .find_map(|(i, line)| match entry(line) {
                Some((k, v)) if k == key => Some((i, v)),
                _ => None,
            })
    }
}

impl fmt::Display for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Separate a raw line from its `\n` or `\r\n` terminator.
fn split_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Split a line into key and raw value.
///
/// Blank lines, comments and lines without `=` define nothing. A leading
/// `export ` is accepted, as Compose does.
fn entry(line: &str) -> Option<(&str, &str)> {
    let (content, _) = split_ending(line);
    let trimmed = content.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed
        .strip_prefix("export ")
        .map_or(trimmed, str::trim_start);

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    strip_quotes(raw).to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn format_value(value: &str) -> String {
    if needs_quotes(value) {
        format!("\"{}\"", escape_env_value(value))
    } else {
        value.to_string()
    }
}

fn needs_quotes(value: &str) -> bool {
    value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('=')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
