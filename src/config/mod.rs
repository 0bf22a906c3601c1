//! Configuration management for the wwid application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `WWID_FILE`: Path to the journal file (defaults to ~/what_was_i_doing.md)
//! - `WWID_EDITOR`: Editor to use for editing entries
//! - `EDITOR`: Fallback editor if WWID_EDITOR is not set (defaults to "vim")
//! - `WWID_DEFAULT_SECTION`: Section created in a new journal file (defaults to "Currently")
//! - `WWID_VIEWS`: Comma-separated names of saved views
//! - `HOME`: Used for expanding the default journal file path

use crate::constants::{
    DEFAULT_EDITOR_COMMAND, DEFAULT_JOURNAL_FILE, DEFAULT_SECTION, EDITOR_FORBIDDEN_CHARS,
    ENV_VAR_EDITOR, ENV_VAR_HOME, ENV_VAR_WWID_DEFAULT_SECTION, ENV_VAR_WWID_EDITOR,
    ENV_VAR_WWID_FILE, ENV_VAR_WWID_VIEWS, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the wwid application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use wwid::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     doing_file: PathBuf::from("/path/to/doing.md"),
///     editor: "nano".to_string(),
///     default_section: "Currently".to_string(),
///     views: vec!["done".to_string()],
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use wwid::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
/// println!("Using journal file {}", config.doing_file.display());
/// ```
pub struct Config {
    /// The journal file.
    ///
    /// Loaded from `WWID_FILE` with a fallback to `~/what_was_i_doing.md`.
    pub doing_file: PathBuf,

    /// Editor command used by `last --editor`.
    ///
    /// Loaded in the following order of precedence:
    /// 1. WWID_EDITOR
    /// 2. EDITOR
    /// 3. Defaults to "vim" if neither is set
    pub editor: String,

    /// Section header written into a newly created journal file.
    pub default_section: String,

    /// Names of saved views, offered as suggestions when a section name
    /// doesn't match.
    pub views: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("doing_file", &REDACTED_PLACEHOLDER)
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("default_section", &self.default_section)
            .field("views", &self.views)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            doing_file: PathBuf::from(""),
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            default_section: DEFAULT_SECTION.to_string(),
            views: Vec::new(),
        }
    }
}

impl Config {
    /// Validates an editor command string for security.
    ///
    /// The command must be non-empty and contain neither spaces nor shell
    /// metacharacters, since it is executed directly.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = editor_cmd.chars().find(|c| EDITOR_FORBIDDEN_CHARS.contains(c)) {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Splits a comma-separated view list, dropping empty names.
    fn parse_views(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Expands `~` and environment variable references in a path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a referenced variable is undefined.
    pub fn expand_path(raw: &str) -> AppResult<PathBuf> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The journal file path expansion fails or yields an empty path
    /// - The editor command fails validation (empty, contains spaces or shell metacharacters)
    pub fn load() -> AppResult<Self> {
        let editor_raw = env::var(ENV_VAR_WWID_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());
        let editor = Config::validate_editor_command(&editor_raw)?;

        let file_str = env::var(ENV_VAR_WWID_FILE).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_JOURNAL_FILE)
        });
        let doing_file = Config::expand_path(&file_str)?;

        if doing_file.as_os_str().is_empty() {
            return Err(AppError::Config("Journal file path is empty".to_string()));
        }

        let default_section = env::var(ENV_VAR_WWID_DEFAULT_SECTION)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());

        let views = env::var(ENV_VAR_WWID_VIEWS)
            .map(|raw| Config::parse_views(&raw))
            .unwrap_or_default();

        Ok(Config {
            doing_file,
            editor: editor.to_string(),
            default_section,
            views,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Journal file path is empty"
    /// - "Editor command is empty"
    /// - "Journal file must be an absolute path"
    ///
    /// # Examples
    ///
    /// ```
    /// use wwid::Config;
    /// use std::path::PathBuf;
    ///
    /// let config = Config {
    ///     doing_file: PathBuf::from("relative/doing.md"),
    ///     ..Config::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.doing_file.as_os_str().is_empty() {
            return Err(AppError::Config("Journal file path is empty".to_string()));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.doing_file.is_absolute() {
            return Err(AppError::Config(
                "Journal file must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}
