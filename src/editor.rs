//! Editor abstraction for editing journal entries.
//!
//! This module provides an abstraction for opening a file in an external
//! editor, allowing the application to work with different editors and to be
//! testable by substituting a scripted editor.

use crate::errors::{AppResult, EditorError};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use wwid::editor::Editor;
/// use wwid::errors::AppResult;
/// use std::path::Path;
///
/// struct UppercaseEditor;
///
/// impl Editor for UppercaseEditor {
///     fn edit(&self, path: &Path) -> AppResult<()> {
///         let text = std::fs::read_to_string(path)?;
///         std::fs::write(path, text.to_uppercase())?;
///         Ok(())
///     }
/// }
/// ```
pub trait Editor {
    /// Opens `path` and returns once the user has finished editing it.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the editor cannot be
    /// run or reports failure.
    fn edit(&self, path: &Path) -> AppResult<()>;
}

/// An implementation of the Editor trait that launches an external command.
#[derive(Debug, Clone)]
pub struct SystemEditor {
    /// The command to use for opening files (e.g., "vim", "code", "nano").
    pub command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Editor for SystemEditor {
    /// Launches the editor with `path` as its only argument and waits for it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Editor` with a specific `EditorError` variant:
    /// - `EditorError::CommandNotFound` if the editor command doesn't exist
    /// - `EditorError::PermissionDenied` if permission is denied to execute the editor
    /// - `EditorError::ExecutionFailed` for other I/O errors during execution
    /// - `EditorError::NonZeroExit` if the editor exits with a non-zero status code
    fn edit(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor: {} {:?}", self.command, path);

        match Command::new(&self.command).arg(path).status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(EditorError::NonZeroExit {
                command: self.command.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into()),
            Err(e) => {
                let command = self.command.clone();
                let error = match e.kind() {
                    std::io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
                    std::io::ErrorKind::PermissionDenied => {
                        EditorError::PermissionDenied { command, source: e }
                    }
                    _ => EditorError::ExecutionFailed { command, source: e },
                };
                Err(error.into())
            }
        }
    }
}
