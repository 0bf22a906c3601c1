//! Compiled query values used to filter entries.
//!
//! Queries are built once from user input and then tested against many
//! items, so regular expressions are compiled up front and malformed input
//! is rejected at construction time.

use crate::constants::FUZZY_SEARCH_GAP;
use crate::errors::{AppError, AppResult};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::str::FromStr;

/// Builds a regex source that matches the characters of `text` in order,
/// with `gap` between each pair. Characters are escaped.
pub(crate) fn fuzzy_pattern(text: &str, gap: &str) -> String {
    text.chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect::<Vec<_>>()
        .join(gap)
}

/// Boolean combination applied to a list of tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolMode {
    /// Every tag must be present.
    And,
    /// At least one tag must be present.
    #[default]
    Or,
    /// No tag may be present.
    Not,
}

impl BoolMode {
    /// Normalizes a user-supplied mode. Unrecognized input falls back to `Or`.
    ///
    /// ```
    /// use wwid::journal_core::query::BoolMode;
    ///
    /// assert_eq!(BoolMode::parse("AND"), BoolMode::And);
    /// assert_eq!(BoolMode::parse("all"), BoolMode::And);
    /// assert_eq!(BoolMode::parse("none"), BoolMode::Not);
    /// assert_eq!(BoolMode::parse("whatever"), BoolMode::Or);
    /// ```
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "and" | "all" | "&&" | "&" => BoolMode::And,
            "not" | "none" | "!" => BoolMode::Not,
            _ => BoolMode::Or,
        }
    }
}

impl fmt::Display for BoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoolMode::And => "AND",
            BoolMode::Or => "OR",
            BoolMode::Not => "NOT",
        };
        f.write_str(name)
    }
}

/// A normalized list of tag names, without their leading `@`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagQuery {
    tags: Vec<String>,
}

impl TagQuery {
    /// Parses a comma-separated tag list such as `"@work, project1"`.
    pub fn parse(list: &str) -> Self {
        Self::from_tags(list.split(','))
    }

    /// Builds a query from an explicit list of tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|tag| {
                let tag = tag.as_ref().trim();
                tag.strip_prefix('@').unwrap_or(tag).to_string()
            })
            .filter(|tag| !tag.is_empty())
            .collect();
        Self { tags }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tests `title` for the tags under `mode`.
    ///
    /// A tag matches when `@tag` occurs anywhere in the title, case-sensitively,
    /// so `foo` also matches `@foobar`.
    pub fn matches(&self, title: &str, mode: BoolMode) -> bool {
        let mut present = self.tags.iter().map(|tag| title.contains(&format!("@{tag}")));
        match mode {
            BoolMode::And => present.all(|found| found),
            BoolMode::Not => !present.any(|found| found),
            BoolMode::Or => present.any(|found| found),
        }
    }
}

/// How a search string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// `/pattern/`: raw regular expression.
    Regex,
    /// `'text`: literal substring.
    Exact,
    /// Anything else: characters in order with up to three characters between them.
    Fuzzy,
}

/// A compiled, case-insensitive text search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    raw: String,
    mode: SearchMode,
    pattern: Regex,
}

impl SearchQuery {
    /// Compiles a search string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidArgument` when a `/regex/` search does not
    /// compile.
    ///
    /// ```
    /// use wwid::journal_core::query::{SearchMode, SearchQuery};
    ///
    /// let fuzzy = SearchQuery::parse("sdhs").unwrap();
    /// assert_eq!(fuzzy.mode(), SearchMode::Fuzzy);
    /// assert!(fuzzy.is_match("side hustle"));
    ///
    /// let exact = SearchQuery::parse("'side hustle").unwrap();
    /// assert!(!exact.is_match("sdhs"));
    /// ```
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();

        let is_regex = trimmed.len() >= 2 && trimmed.starts_with('/') && trimmed.ends_with('/');

        let (mode, source) = if is_regex {
            (SearchMode::Regex, trimmed[1..trimmed.len() - 1].to_string())
        } else if let Some(rest) = trimmed.strip_prefix('\'') {
            let body = rest.strip_suffix('\'').unwrap_or(rest);
            (SearchMode::Exact, regex::escape(body))
        } else {
            (SearchMode::Fuzzy, fuzzy_pattern(trimmed, FUZZY_SEARCH_GAP))
        };

        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                AppError::InvalidArgument(format!("Invalid search pattern '{}': {}", input, e))
            })?;

        Ok(Self {
            raw: input.to_string(),
            mode,
            pattern,
        })
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl FromStr for SearchQuery {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
