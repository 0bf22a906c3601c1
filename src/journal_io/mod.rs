//! Journal file I/O.
//!
//! This module contains all the filesystem operations related to the journal
//! file: creating it on first use, reading and parsing it, and writing an
//! updated document back.

use crate::constants::UNCATEGORIZED_SECTION;
use crate::errors::{AppError, AppResult};
use crate::journal_core::{Document, Hooks};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Persists a document to its backing store.
///
/// Operations that change the document (creating a section, deleting or
/// editing an entry) call this explicitly once the change is made.
pub trait Storage {
    /// Writes the whole document.
    fn persist(&self, document: &Document) -> AppResult<()>;
}

/// Storage backed by a single journal file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn persist(&self, document: &Document) -> AppResult<()> {
        write_document(document, &self.path)
    }
}

/// Creates the journal file with a single section header if it is missing or empty.
///
/// Parent directories are created as needed. Returns `true` when the file was
/// (re)initialized.
///
/// # Errors
///
/// Returns `AppError::Io` if the directory or file cannot be created.
pub fn ensure_journal_file_exists(path: &Path, default_section: &str) -> AppResult<bool> {
    if fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false) {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create journal directory: {}", e),
            ))
        })?;
    }

    let section = if default_section.trim().is_empty() {
        UNCATEGORIZED_SECTION
    } else {
        default_section
    };
    write_atomically(path, &format!("{}:\n", section))?;
    info!("Created journal file with section {:?}", section);
    Ok(true)
}

/// Reads the journal file as UTF-8 text.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read or is not valid UTF-8.
pub fn read_journal(path: &Path) -> AppResult<String> {
    Ok(fs::read_to_string(path)?)
}

/// Loads and parses the journal file, creating it first if needed.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be created or read.
pub fn load_document(path: &Path, default_section: &str, hooks: &dyn Hooks) -> AppResult<Document> {
    ensure_journal_file_exists(path, default_section)?;
    let content = read_journal(path)?;
    debug!("Read {} bytes from journal file", content.len());
    Ok(Document::parse(&content, hooks))
}

/// Serializes `document` and replaces the file at `path` with the result.
///
/// The text is written to a temporary file in the same directory and then
/// renamed over the target, so readers never observe a partial file.
///
/// # Errors
///
/// Returns `AppError::Io` if the temporary file cannot be written or renamed.
pub fn write_document(document: &Document, path: &Path) -> AppResult<()> {
    write_atomically(path, &document.to_string())?;
    debug!("Wrote journal file with {} items", document.items().len());
    Ok(())
}

fn write_atomically(path: &Path, content: &str) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        let permissions =
            fs::Permissions::from_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
        temp.as_file().set_permissions(permissions).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to set secure permissions on journal file: {}", e),
            ))
        })?;
    }

    temp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::{Item, NoHooks};
    use std::cell::Cell;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_journal_file_creates_default_section() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("nested").join("doing.md");

        let created = ensure_journal_file_exists(&path, "Currently").unwrap();

        assert!(created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Currently:\n");

        #[cfg(unix)]
        {
            let metadata = fs::metadata(&path).expect("Failed to get file metadata");
            assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        }
    }

    #[test]
    fn test_ensure_journal_file_leaves_existing_content() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("doing.md");
        fs::write(&path, "Work:\n").unwrap();

        let created = ensure_journal_file_exists(&path, "Currently").unwrap();

        assert!(!created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Work:\n");
    }

    #[test]
    fn test_ensure_journal_file_initializes_empty_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("doing.md");
        fs::write(&path, "").unwrap();

        assert!(ensure_journal_file_exists(&path, "Currently").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Currently:\n");
    }

    #[test]
    fn test_load_document_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("doing.md");

        let doc = load_document(&path, "Currently", &NoHooks).unwrap();

        assert_eq!(doc.section_titles(), ["Currently"]);
        assert!(doc.items().is_empty());
    }

    #[test]
    fn test_load_document_runs_hooks() {
        struct Count(Cell<usize>);
        impl Hooks for Count {
            fn post_read(&self, _document: &mut Document) {
                self.0.set(self.0.get() + 1);
            }
        }

        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("doing.md");
        let hooks = Count(Cell::new(0));

        load_document(&path, "Currently", &hooks).unwrap();

        assert_eq!(hooks.0.get(), 1);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("doing.md");
        let storage = FileStorage::new(&path);

        let mut doc = load_document(&path, "Currently", &NoHooks).unwrap();
        doc.add_section("Later");
        doc.push_item(Item::new("2024-01-15 09:30", "Saved task @work", "Later"));
        storage.persist(&doc).unwrap();

        let reloaded = load_document(storage.path(), "Currently", &NoHooks).unwrap();
        assert_eq!(reloaded.section_titles(), ["Currently", "Later"]);
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].section(), "Later");
        assert_eq!(reloaded.items()[0].title(), "Saved task @work");
    }

    #[test]
    fn test_read_journal_missing_file_is_io_error() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let result = read_journal(&temp_dir.path().join("missing.md"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
