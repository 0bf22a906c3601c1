//! Document model and query engine for journal files.
//!
//! A journal file is line oriented:
//!
//! ```text
//! Currently:
//!     - 2024-01-15 09:30 | Did a thing @tag1 @tag2
//!         Continuation note line, indented.
//!     - 2024-01-15 10:00 | Finished a thing @tag1 @done(2024-01-15 10:15)
//! Later:
//! ```
//!
//! [`Document::parse`] recovers sections, entries and notes from such text
//! while keeping any unrecognized content so the file can be written back.
//! This module performs no I/O; reading and writing files lives in
//! `journal_io`.

pub mod hooks;
pub mod item;
pub mod note;
pub mod query;


use crate::constants::{FUZZY_SECTION_GAP, UNCATEGORIZED_SECTION};
use crate::errors::{AppError, AppResult};
use regex::{Regex, RegexBuilder};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info};

pub use hooks::{Hooks, NoHooks};
pub use item::Item;
pub use note::Note;
pub use query::{BoolMode, SearchMode, SearchQuery, TagQuery};

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S[\S ]+):\s*(@\S+\s*)*$").expect("valid section regex"));

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*- (\d{4}-\d\d-\d\d \d\d:\d\d) \| (.*)").expect("valid entry regex")
});

/// Upper-cases the first character and leaves the rest untouched.
///
/// ```
/// use wwid::journal_core::cap_first;
///
/// assert_eq!(cap_first("later"), "Later");
/// assert_eq!(cap_first("iOS work"), "IOS work");
/// assert_eq!(cap_first(""), "");
/// ```
pub fn cap_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns true when `line` would be read back as an entry.
///
/// ```
/// use wwid::journal_core::is_entry_line;
///
/// assert!(is_entry_line("  - 2024-01-15 10:00 | Call back"));
/// assert!(!is_entry_line("- 2024-01-15 10:00 |"));
/// assert!(!is_entry_line("call back at 10:00"));
/// ```
pub fn is_entry_line(line: &str) -> bool {
    ENTRY_RE
        .captures(line)
        .is_some_and(|caps| !caps[2].trim().is_empty())
}

/// A note line in the form it takes in the file.
///
/// Blank and indented lines are kept as they are; other lines get `\t\t`.
pub fn note_line_as_written(line: &str) -> String {
    if line.is_empty() || line.starts_with(char::is_whitespace) {
        line.to_string()
    } else {
        format!("\t\t{}", line)
    }
}

/// A section header as it appeared in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The header line exactly as written, including trailing tags.
    pub original: String,
    /// The section name.
    pub title: String,
}

impl Section {
    /// Creates a section whose header line is `Title:`.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            original: format!("{}:", title),
            title,
        }
    }
}

/// Outcome of resolving a user-supplied section name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionChoice {
    /// No section filter.
    All,
    /// A single section, with its first letter capitalized.
    Named(String),
}

impl fmt::Display for SectionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionChoice::All => f.write_str(crate::constants::ALL_SECTIONS),
            SectionChoice::Named(title) => f.write_str(title),
        }
    }
}

/// Fuzzy-matches `fragment` against `candidates` in order; first match wins.
///
/// Every character of the fragment may be followed by any number of other
/// characters, compared case-insensitively.
pub fn fuzzy_first<'a, I>(fragment: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = query::fuzzy_pattern(fragment, FUZZY_SECTION_GAP);
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    candidates.into_iter().find(|candidate| re.is_match(candidate))
}

/// In-memory representation of a journal file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    other_content_top: Vec<String>,
    other_content_bottom: Vec<String>,
    sections: Vec<Section>,
    items: Vec<Item>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses journal text and notifies `hooks` once parsing is complete.
    ///
    /// Lines are split on `\n` or `\r` and classified one at a time:
    ///
    /// 1. whitespace-only lines are skipped;
    /// 2. `Title:` (optionally followed by `@tag`s) starts a section;
    /// 3. `- YYYY-MM-DD HH:MM | text` is an entry in the current section;
    /// 4. anything else before the first entry of the current section is kept
    ///    as top content;
    /// 5. after that, indented lines are note lines of the latest entry and
    ///    unindented lines are kept as bottom content.
    ///
    /// Entries seen before any header belong to the `Uncategorized` section.
    pub fn parse(input: &str, hooks: &dyn Hooks) -> Self {
        let mut doc = Document::new();
        let mut section = UNCATEGORIZED_SECTION.to_string();
        let mut header = None;
        let mut items_in_section = 0usize;

        for line in input.split(['\n', '\r']) {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = SECTION_RE.captures(line) {
                section = caps[1].to_string();
                doc.sections.push(Section {
                    original: line.to_string(),
                    title: section.clone(),
                });
                header = Some(doc.sections.len() - 1);
                items_in_section = 0;
                continue;
            }

            if let Some(caps) = ENTRY_RE.captures(line) {
                let title = caps[2].trim();
                if !title.is_empty() {
                    let mut item = Item::new(caps[1].trim(), title, section.as_str());
                    item.set_header(header);
                    doc.items.push(item);
                    items_in_section += 1;
                    continue;
                }
            }

            if items_in_section == 0 {
                doc.other_content_top.push(line.to_string());
            } else if line.starts_with(|c: char| !c.is_whitespace()) {
                doc.other_content_bottom.push(line.to_string());
            } else if let Some(item) = doc.items.last_mut() {
                item.note_mut().add(line);
            }
        }

        debug!(
            "Parsed {} items in {} sections",
            doc.items.len(),
            doc.sections.len()
        );

        hooks.post_read(&mut doc);
        doc
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn other_content_top(&self) -> &[String] {
        &self.other_content_top
    }

    pub fn other_content_top_mut(&mut self) -> &mut Vec<String> {
        &mut self.other_content_top
    }

    pub fn other_content_bottom(&self) -> &[String] {
        &self.other_content_bottom
    }

    pub fn other_content_bottom_mut(&mut self) -> &mut Vec<String> {
        &mut self.other_content_bottom
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Appends an entry at the end of the item list.
    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_item(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }

    /// Adds a section unless one with the same title (ignoring case) exists.
    ///
    /// Returns `true` when the section was added.
    pub fn add_section(&mut self, title: &str) -> bool {
        if self
            .sections
            .iter()
            .any(|s| s.title.to_lowercase() == title.to_lowercase())
        {
            debug!("Skipped adding section {:?}: section already exists", title);
            return false;
        }

        self.sections.push(Section::new(title));
        info!("Added section: {:?}", cap_first(title));
        true
    }

    /// Guesses which section a user-supplied fragment refers to.
    ///
    /// `all` selects every section. Otherwise an exact, case-insensitive title
    /// match wins; failing that, the first section (in file order) whose title
    /// contains the fragment's characters in order is chosen. Returns `None`
    /// when nothing matches. This never mutates the document.
    pub fn guess_section(&self, fragment: &str) -> Option<SectionChoice> {
        if fragment.eq_ignore_ascii_case("all") {
            return Some(SectionChoice::All);
        }

        let wanted = fragment.to_lowercase();
        if let Some(section) = self
            .sections
            .iter()
            .find(|s| s.title.to_lowercase() == wanted)
        {
            return Some(SectionChoice::Named(cap_first(&section.title)));
        }

        let title = fuzzy_first(fragment, self.sections.iter().map(|s| s.title.as_str()))?;
        debug!("Section match: assuming {:?} from {:?}", title, fragment);
        Some(SectionChoice::Named(cap_first(title)))
    }

    /// Resolves a fragment to a section without asking the user anything.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidSection` when no section matches.
    pub fn resolve_section(&self, fragment: &str) -> AppResult<SectionChoice> {
        self.guess_section(fragment)
            .ok_or_else(|| AppError::InvalidSection(format!("Unknown section: {}", fragment)))
    }

    /// Items belonging to an already resolved section, in file order.
    pub fn items_in(&self, choice: &SectionChoice) -> Vec<&Item> {
        match choice {
            SectionChoice::All => self.items.iter().collect(),
            SectionChoice::Named(title) => self
                .items
                .iter()
                .filter(|item| cap_first(item.section()) == *title)
                .collect(),
        }
    }

    /// Items of the section `fragment` resolves to, in file order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidSection` when the fragment matches no section.
    pub fn items_in_section(&self, fragment: &str) -> AppResult<Vec<&Item>> {
        let choice = self.resolve_section(fragment)?;
        Ok(self.items_in(&choice))
    }

    /// Index of the last entry in `choice` accepted by `predicate`.
    pub fn last_index_where<F>(&self, choice: &SectionChoice, predicate: F) -> Option<usize>
    where
        F: Fn(&Item) -> bool,
    {
        self.items.iter().rposition(|item| {
            let in_section = match choice {
                SectionChoice::All => true,
                SectionChoice::Named(title) => cap_first(item.section()) == *title,
            };
            in_section && predicate(item)
        })
    }

    /// Header an entry is written under.
    ///
    /// Entries keep the header line they were read from. Others go under the
    /// first header with their section title; `None` means no such header.
    fn header_of(&self, item: &Item) -> Option<usize> {
        item.header()
            .filter(|&i| {
                self.sections
                    .get(i)
                    .is_some_and(|s| s.title == item.section())
            })
            .or_else(|| self.sections.iter().position(|s| s.title == item.section()))
    }

    fn write_item(f: &mut fmt::Formatter<'_>, item: &Item) -> fmt::Result {
        writeln!(f, "\t- {} | {}", item.date(), item.title())?;
        for line in item.note().lines() {
            writeln!(f, "{}", note_line_as_written(line))?;
        }
        Ok(())
    }
}

/// Serializes the document back into journal text.
///
/// Top content comes first, then entries without a declared section, then
/// each section header followed by its entries, then bottom content. Section
/// headers are written exactly as they were read. A header that appears more
/// than once is followed by exactly the entries read under it, so the entry
/// order survives a reload.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.other_content_top {
            writeln!(f, "{}", line)?;
        }

        let headers: Vec<Option<usize>> = self.items.iter().map(|i| self.header_of(i)).collect();
        for (item, _) in self.items.iter().zip(&headers).filter(|(_, h)| h.is_none()) {
            Self::write_item(f, item)?;
        }

        for (index, section) in self.sections.iter().enumerate() {
            writeln!(f, "{}", section.original)?;
            for (item, _) in self
                .items
                .iter()
                .zip(&headers)
                .filter(|(_, h)| **h == Some(index))
            {
                Self::write_item(f, item)?;
            }
        }

        for line in &self.other_content_bottom {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Document::parse(s, &NoHooks))
    }
}
