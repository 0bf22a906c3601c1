//! Error handling utilities for the wwid application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! A malformed or missing `@done(...)` marker is not an error: the entry simply
//! reads as not completed.

use std::io;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// # Examples
///
/// ```
/// use wwid::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources, disk space, or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. Your changes to the entry were not saved.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Represents all possible errors that can occur in the wwid application.
///
/// # Examples
///
/// ```
/// use wwid::errors::AppError;
///
/// let error = AppError::InvalidSection("Unknown section: zzz".to_string());
/// assert_eq!(format!("{}", error), "Invalid section: Unknown section: zzz");
/// ```
///
/// Converting from an IO error:
/// ```
/// use wwid::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A section fragment could not be resolved to an existing section.
    #[error("Invalid section: {0}")]
    InvalidSection(String),

    /// Caller input that cannot be turned into a query, such as mutually
    /// exclusive options or a malformed search pattern.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let section_error = AppError::InvalidSection("Unknown section: zzz".to_string());
        assert_eq!(
            format!("{}", section_error),
            "Invalid section: Unknown section: zzz"
        );

        let argument_error =
            AppError::InvalidArgument("--tag and --search can not be used together".to_string());
        assert!(format!("{}", argument_error).contains("can not be used together"));
    }

    #[test]
    fn test_editor_error_variants() {
        let error = EditorError::CommandNotFound {
            command: "vim".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "command not found"),
        };
        assert!(format!("{}", error).contains("not found"));
        assert!(format!("{}", error).contains("PATH"));

        let error = EditorError::PermissionDenied {
            command: "vim".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(format!("{}", error).contains("Permission denied"));

        let error = EditorError::ExecutionFailed {
            command: "vim".to_string(),
            source: io::Error::other("some other error"),
        };
        assert!(format!("{}", error).contains("Failed to execute"));

        let error = EditorError::NonZeroExit {
            command: "vim".to_string(),
            status_code: 1,
        };
        let message = format!("{}", error);
        assert!(message.contains("non-zero status code: 1"));
        assert!(message.contains("not saved"));
    }

    #[test]
    fn test_editor_error_conversion_to_app_error() {
        let editor_error = EditorError::NonZeroExit {
            command: "nano".to_string(),
            status_code: 2,
        };

        let app_error: AppError = editor_error.into();

        match app_error {
            AppError::Editor(EditorError::NonZeroExit {
                command,
                status_code,
            }) => {
                assert_eq!(command, "nano");
                assert_eq!(status_code, 2);
            }
            _ => panic!("Expected AppError::Editor(NonZeroExit) variant"),
        }
    }

    #[test]
    fn test_editor_error_source_chaining() {
        let editor_error = EditorError::CommandNotFound {
            command: "vim".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "command not found"),
        };

        let source = editor_error
            .source()
            .expect("EditorError::CommandNotFound should have a source");
        let source_io_error = source
            .downcast_ref::<io::Error>()
            .expect("Source should be an io::Error");
        assert_eq!(source_io_error.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_string_variants_have_no_source() {
        assert!(AppError::InvalidSection("x".to_string()).source().is_none());
        assert!(AppError::InvalidArgument("x".to_string()).source().is_none());
    }
}
