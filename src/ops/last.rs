//! Show, delete or edit the most recent entry matching a filter.

use super::section::resolve_section_interactive;
use super::Collaborators;
use crate::constants::EDIT_FILE_SUFFIX;
use crate::errors::{AppError, AppResult};
use crate::journal_core::{
    is_entry_line, note_line_as_written, BoolMode, Document, Item, Note, SearchQuery, TagQuery,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::io::Write;
use tracing::{debug, info};

/// How a shown entry is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options of the `last` command.
#[derive(Debug, Clone)]
pub struct LastOptions {
    /// Section fragment, or `All`.
    pub section: String,
    /// Comma-separated tags to match.
    pub tags: Option<String>,
    pub bool_mode: BoolMode,
    pub search: Option<String>,
    /// Treat `search` as a literal string.
    pub exact: bool,
    /// Select the last entry that does *not* match.
    pub negate: bool,
    pub delete: bool,
    pub edit: bool,
    /// Append elapsed or completed time.
    pub duration: bool,
    pub output: OutputFormat,
}

impl Default for LastOptions {
    fn default() -> Self {
        Self {
            section: crate::constants::ALL_SECTIONS.to_string(),
            tags: None,
            bool_mode: BoolMode::default(),
            search: None,
            exact: false,
            negate: false,
            delete: false,
            edit: false,
            duration: false,
            output: OutputFormat::default(),
        }
    }
}

/// What `last` did.
#[derive(Debug)]
pub enum LastOutcome {
    /// No entry matched.
    NotFound,
    /// The rendered entry.
    Shown(String),
    Deleted(Item),
    /// The entry after editing.
    Edited(Item),
}

/// A validated tag or text filter.
#[derive(Debug, Clone)]
pub struct ItemFilter {
    criterion: Criterion,
    negate: bool,
}

#[derive(Debug, Clone)]
enum Criterion {
    Any,
    Tags(TagQuery, BoolMode),
    Search(SearchQuery),
}

impl ItemFilter {
    /// Builds a filter from raw command options.
    ///
    /// `exact` forces a literal search by prefixing `'` to the query. `negate`
    /// inverts the tag or search test; without either it has no effect.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidArgument` when both tags and a search are
    /// given, or when a regex search does not compile.
    pub fn new(
        tags: Option<&str>,
        bool_mode: BoolMode,
        search: Option<&str>,
        exact: bool,
        negate: bool,
    ) -> AppResult<Self> {
        let criterion = match (tags, search) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidArgument(
                    "--tag and --search can not be used together".to_string(),
                ))
            }
            (Some(tags), None) => Criterion::Tags(TagQuery::parse(tags), bool_mode),
            (None, Some(search)) => {
                let search = if exact && !search.starts_with('\'') {
                    format!("'{}", search)
                } else {
                    search.to_string()
                };
                Criterion::Search(SearchQuery::parse(&search)?)
            }
            (None, None) => Criterion::Any,
        };

        Ok(Self { criterion, negate })
    }

    pub fn from_options(options: &LastOptions) -> AppResult<Self> {
        Self::new(
            options.tags.as_deref(),
            options.bool_mode,
            options.search.as_deref(),
            options.exact,
            options.negate,
        )
    }

    pub fn matches(&self, item: &Item) -> bool {
        let hit = match &self.criterion {
            Criterion::Any => return true,
            Criterion::Tags(tags, mode) => item.tags_match(tags, *mode),
            Criterion::Search(query) => item.matches_search(query),
        };
        hit != self.negate
    }
}

/// Serialized form of an entry for `--output json`.
#[derive(Debug, Serialize)]
struct ItemView<'a> {
    date: &'a str,
    title: &'a str,
    section: &'a str,
    note: Vec<&'a str>,
    interval: Option<i64>,
}

/// Formats seconds as `HH:MM:SS`, prefixed with `Nd ` from one day up.
pub fn format_interval(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}{}d {:02}:{:02}:{:02}", sign, days, hours, minutes, secs)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, secs)
    }
}

/// Renders an entry as `DATE | TITLE` followed by its note lines.
pub fn render_item(item: &Item, duration: bool, now: NaiveDateTime) -> String {
    let mut out = format!("{} | {}", item.date(), item.title());

    if duration {
        if let Some(interval) = item.interval() {
            out.push_str(&format!(" (interval {})", format_interval(interval)));
        } else if let Some(elapsed) = item.elapsed_since(now) {
            out.push_str(&format!(" (elapsed {})", format_interval(elapsed)));
        }
    }

    for line in item.note().trimmed_lines() {
        out.push('\n');
        if !line.trim().is_empty() {
            out.push_str("    ");
            out.push_str(line.trim());
        }
    }
    out
}

/// Renders an entry as a JSON object.
///
/// # Errors
///
/// Returns `AppError::InvalidArgument` if serialization fails.
pub fn render_item_json(item: &Item) -> AppResult<String> {
    let view = ItemView {
        date: item.date(),
        title: item.title(),
        section: item.section(),
        note: item.note().trimmed_lines().iter().map(|l| l.trim()).collect(),
        interval: item.interval(),
    };
    serde_json::to_string_pretty(&view)
        .map_err(|e| AppError::InvalidArgument(format!("Failed to serialize entry: {}", e)))
}

/// Runs the `last` command against `document`.
///
/// The section is resolved first (possibly asking the user), then the most
/// recent matching entry is shown, deleted, or opened in the editor. Deleting
/// and editing write the document through the storage collaborator.
///
/// # Errors
///
/// Returns an error if the options are invalid, the section cannot be
/// resolved, the editor fails or the edited text is empty, or the document
/// cannot be saved.
pub fn last(
    document: &mut Document,
    options: &LastOptions,
    collaborators: &Collaborators<'_>,
    now: NaiveDateTime,
) -> AppResult<LastOutcome> {
    let filter = ItemFilter::from_options(options)?;
    let choice = resolve_section_interactive(
        document,
        &options.section,
        collaborators.views,
        collaborators.confirm,
        collaborators.storage,
    )?;
    debug!("Looking for last entry in section {}", choice);

    let Some(index) = document.last_index_where(&choice, |item| filter.matches(item)) else {
        info!("No matching entry found in section {}", choice);
        return Ok(LastOutcome::NotFound);
    };

    if options.edit {
        let edited = edit_item(document, index, collaborators)?;
        return Ok(LastOutcome::Edited(edited));
    }

    if options.delete {
        let removed = document.remove_item(index);
        collaborators.storage.persist(document)?;
        info!("Deleted entry: {}", removed);
        return Ok(LastOutcome::Deleted(removed));
    }

    let item = &document.items()[index];
    let rendered = match options.output {
        OutputFormat::Text => render_item(item, options.duration, now),
        OutputFormat::Json => render_item_json(item)?,
    };
    Ok(LastOutcome::Shown(rendered))
}

/// Text placed in the editor: the title, then the note without indentation.
fn edit_text(item: &Item) -> String {
    let mut text = item.title().to_string();
    text.push('\n');
    for line in item.note().trimmed_lines() {
        text.push_str(line.trim_start());
        text.push('\n');
    }
    text
}

fn edit_item(
    document: &mut Document,
    index: usize,
    collaborators: &Collaborators<'_>,
) -> AppResult<Item> {
    let item = document
        .items()
        .get(index)
        .ok_or_else(|| AppError::InvalidArgument(format!("No entry at index {}", index)))?;

    let mut temp = tempfile::Builder::new()
        .prefix("wwid-")
        .suffix(EDIT_FILE_SUFFIX)
        .tempfile()?;
    temp.write_all(edit_text(item).as_bytes())?;
    temp.as_file().sync_all()?;

    collaborators.editor.edit(temp.path())?;

    let content = fs::read_to_string(temp.path())?;
    let mut lines = content.lines().skip_while(|l| l.trim().is_empty());
    let title = lines
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidArgument("No content in edited entry".to_string()))?
        .to_string();
    // Notes are kept in their file form so the entry equals its reloaded copy.
    let mut note = Note::new();
    for line in lines.filter(|l| !l.trim().is_empty()) {
        if is_entry_line(line) {
            return Err(AppError::InvalidArgument(format!(
                "Note line would be read as a new entry: {}",
                line.trim()
            )));
        }
        note.add(note_line_as_written(line));
    }

    let item = document
        .item_mut(index)
        .ok_or_else(|| AppError::InvalidArgument(format!("No entry at index {}", index)))?;
    item.set_title(title);
    item.set_note(note);
    let edited = item.clone();

    collaborators.storage.persist(document)?;
    info!("Updated entry: {}", edited);
    Ok(edited)
}
