//! Constants used throughout the application.
//!
//! This module contains all constants used in the wwid application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "wwid";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A plain-text log of what you were doing";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the journal file.
pub const ENV_VAR_WWID_FILE: &str = "WWID_FILE";
/// Environment variable for specifying the preferred editor.
pub const ENV_VAR_WWID_EDITOR: &str = "WWID_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Environment variable naming the section new files are created with.
pub const ENV_VAR_WWID_DEFAULT_SECTION: &str = "WWID_DEFAULT_SECTION";
/// Environment variable holding a comma-separated list of view names.
pub const ENV_VAR_WWID_VIEWS: &str = "WWID_VIEWS";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default journal file name within the user's home directory.
pub const DEFAULT_JOURNAL_FILE: &str = "what_was_i_doing.md";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Default POSIX permissions for newly written journal files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;
/// Extension used for editor scratch files.
pub const EDIT_FILE_SUFFIX: &str = ".md";

// Document Model
/// Section assigned to entries that appear before any section header.
pub const UNCATEGORIZED_SECTION: &str = "Uncategorized";
/// Section header written into a newly created journal file.
pub const DEFAULT_SECTION: &str = "Currently";
/// Sentinel section name meaning "no section filter".
pub const ALL_SECTIONS: &str = "All";
/// Timestamp format used by entry lines.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Timestamp format used by entry lines that carry seconds.
pub const ENTRY_DATE_FORMAT_SECONDS: &str = "%Y-%m-%d %H:%M:%S";
/// Wildcard inserted between characters of a fuzzy search.
pub const FUZZY_SEARCH_GAP: &str = ".{0,3}";
/// Wildcard inserted between characters of a section guess.
pub const FUZZY_SECTION_GAP: &str = ".*?";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "wwid";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
