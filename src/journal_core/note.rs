//! Free-form note lines attached to an entry.

use std::fmt;

/// An ordered sequence of note lines.
///
/// Lines keep their original text, including any leading indentation they
/// had in the journal file. Blank lines are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    lines: Vec<String>,
}

impl Note {
    /// Creates an empty note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a note from a block of text, one line per newline.
    pub fn from_text(text: &str) -> Self {
        let mut note = Self::new();
        note.append(text);
        note
    }

    /// Splits `text` on newlines and appends each line. Empty text appends nothing.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.lines.extend(text.lines().map(str::to_string));
    }

    /// Appends a single raw line.
    pub fn add(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Concatenates all lines with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.lines.join(separator)
    }

    /// Returns the lines with trailing blank lines removed.
    pub fn trimmed_lines(&self) -> &[String] {
        let end = self
            .lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |idx| idx + 1);
        &self.lines[..end]
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_lines().is_empty()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined("\n"))
    }
}
