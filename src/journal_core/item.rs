//! A single timestamped journal entry.

use super::note::Note;
use super::query::{BoolMode, SearchQuery, TagQuery};
use crate::constants::{ENTRY_DATE_FORMAT, ENTRY_DATE_FORMAT_SECONDS};
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@done\((\d{4}-\d\d-\d\d \d\d:\d\d.*?)\)").expect("valid done regex")
});

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d\d-\d\d \d\d:\d\d)(:\d\d)?").expect("valid timestamp regex")
});

/// Parses the leading `YYYY-MM-DD HH:MM[:SS]` of a timestamp.
///
/// Anything after the minutes (or seconds), such as a zone name or offset,
/// is ignored and the result is local wall-clock time.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_RE.captures(input.trim())?;
    match caps.get(2) {
        Some(seconds) => NaiveDateTime::parse_from_str(
            &format!("{}{}", &caps[1], seconds.as_str()),
            ENTRY_DATE_FORMAT_SECONDS,
        )
        .ok(),
        None => NaiveDateTime::parse_from_str(&caps[1], ENTRY_DATE_FORMAT).ok(),
    }
}

/// One log entry: a start timestamp, a title line and an optional note.
///
/// The title is the single source of truth for tags (`@tag`) and completion
/// (`@done(...)`). The completion time is extracted when the title is set and
/// cached; the title can only be replaced through [`Item::set_title`], which
/// refreshes the cache.
#[derive(Debug, Clone)]
pub struct Item {
    date: String,
    title: String,
    section: String,
    note: Note,
    end_date: Option<NaiveDateTime>,
    header: Option<usize>,
}

impl Item {
    /// Creates an entry with an empty note.
    ///
    /// ```
    /// use wwid::journal_core::Item;
    ///
    /// let item = Item::new("2024-01-15 09:30", "Finished @done(2024-01-15 10:15)", "Work");
    /// assert_eq!(item.interval(), Some(2700));
    /// ```
    pub fn new(date: impl Into<String>, title: impl Into<String>, section: impl Into<String>) -> Self {
        let title = title.into();
        let end_date = Self::extract_end_date(&title);
        Self {
            date: date.into(),
            title,
            section: section.into(),
            note: Note::new(),
            end_date,
            header: None,
        }
    }

    /// Creates an entry whose note is initialized from a block of text.
    pub fn with_note(
        date: impl Into<String>,
        title: impl Into<String>,
        section: impl Into<String>,
        note: &str,
    ) -> Self {
        let mut item = Self::new(date, title, section);
        item.note.append(note);
        item
    }

    fn extract_end_date(title: &str) -> Option<NaiveDateTime> {
        DONE_RE
            .captures(title)
            .and_then(|caps| parse_timestamp(&caps[1]))
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The start timestamp, if the date string is parseable.
    pub fn start(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title and refreshes the cached completion time.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.end_date = Self::extract_end_date(&self.title);
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn set_section(&mut self, section: impl Into<String>) {
        self.section = section.into();
        self.header = None;
    }

    /// Index of the header line this entry was read under.
    pub(crate) fn header(&self) -> Option<usize> {
        self.header
    }

    pub(crate) fn set_header(&mut self, header: Option<usize>) {
        self.header = header;
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn note_mut(&mut self) -> &mut Note {
        &mut self.note
    }

    pub fn set_note(&mut self, note: Note) {
        self.note = note;
    }

    /// Completion time taken from the `@done(...)` marker.
    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.end_date
    }

    pub fn is_done(&self) -> bool {
        self.end_date.is_some()
    }

    /// Seconds between the start and the completion time.
    ///
    /// `None` when the entry has no parseable `@done(...)` marker. A
    /// completion earlier than the start yields a negative value.
    pub fn interval(&self) -> Option<i64> {
        let end = self.end_date?;
        let start = self.start()?;
        Some((end - start).num_seconds())
    }

    /// Seconds from the start until `now`, for entries that are still open.
    pub fn elapsed_since(&self, now: NaiveDateTime) -> Option<i64> {
        if self.is_done() {
            return None;
        }
        let start = self.start()?;
        Some((now - start).num_seconds())
    }

    /// Tests the title against a tag list under a boolean mode.
    pub fn tags_match(&self, tags: &TagQuery, mode: BoolMode) -> bool {
        tags.matches(&self.title, mode)
    }

    /// Text used for searching: the title directly followed by the note
    /// lines joined with spaces.
    pub fn search_text(&self) -> String {
        format!("{}{}", self.title, self.note.joined(" "))
    }

    pub fn matches_search(&self, query: &SearchQuery) -> bool {
        query.is_match(&self.search_text())
    }
}

impl PartialEq for Item {
    /// Entries are equal when trimmed titles, dates and notes (ignoring
    /// trailing blank lines) match. Sections are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.title.trim() == other.title.trim()
            && self.date == other.date
            && self.note.trimmed_lines() == other.note.trimmed_lines()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.date, self.title)
    }
}
