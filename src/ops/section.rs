//! Section resolution that may ask the user, and section management.

use crate::errors::{AppError, AppResult};
use crate::journal_core::{cap_first, fuzzy_first, Document, SectionChoice};
use crate::journal_io::Storage;
use crate::prompt::Confirm;
use tracing::{debug, info};

/// Guesses which configured view a fragment refers to.
///
/// An exact, case-insensitive name wins; otherwise the first view whose name
/// contains the fragment's characters in order.
pub fn guess_view<'a>(fragment: &str, views: &'a [String]) -> Option<&'a str> {
    views
        .iter()
        .find(|v| v.eq_ignore_ascii_case(fragment))
        .map(String::as_str)
        .or_else(|| fuzzy_first(fragment, views.iter().map(String::as_str)))
}

/// Resolves a section fragment, asking the user when nothing matches.
///
/// When the fragment matches no section, a similarly named view is offered
/// first; accepting it fails with a hint to run the view instead. Otherwise
/// the user may create the section, which is added to `document` and written
/// through `storage` before its title is returned.
///
/// # Errors
///
/// Returns `AppError::InvalidSection` when the user accepts a view redirect or
/// declines to create the section, and propagates prompt or storage failures.
pub fn resolve_section_interactive(
    document: &mut Document,
    fragment: &str,
    views: &[String],
    confirm: &dyn Confirm,
    storage: &dyn Storage,
) -> AppResult<SectionChoice> {
    if let Some(choice) = document.guess_section(fragment) {
        return Ok(choice);
    }

    if let Some(view) = guess_view(fragment, views) {
        debug!("No section matches {:?}, closest view is {:?}", fragment, view);
        if confirm.confirm(&format!("Did you mean `wwid view {}`?", view), false)? {
            return Err(AppError::InvalidSection(format!(
                "Run again with `wwid view {}`",
                view
            )));
        }
    }

    if confirm.confirm(&format!("Section {} not found, create it", fragment), false)? {
        let title = cap_first(fragment);
        document.add_section(&title);
        storage.persist(document)?;
        return Ok(SectionChoice::Named(title));
    }

    Err(AppError::InvalidSection(format!(
        "Unknown section: {}",
        fragment
    )))
}

/// Section titles in declaration order.
pub fn list_sections(document: &Document) -> Vec<String> {
    document
        .section_titles()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Adds a section (first letter capitalized) and persists the document.
///
/// Returns `false` without writing anything if the section already exists.
///
/// # Errors
///
/// Returns `AppError::InvalidArgument` for a blank title and propagates
/// storage failures.
pub fn add_section(document: &mut Document, storage: &dyn Storage, title: &str) -> AppResult<bool> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidArgument(
            "Section name cannot be empty".to_string(),
        ));
    }

    if !document.add_section(&cap_first(title)) {
        return Ok(false);
    }

    storage.persist(document)?;
    info!("Section {:?} saved", cap_first(title));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Answers prompts from a script and records the questions asked.
    struct Scripted {
        answers: RefCell<Vec<bool>>,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().rev().copied().collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Confirm for Scripted {
        fn confirm(&self, prompt: &str, default: bool) -> AppResult<bool> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(self.answers.borrow_mut().pop().unwrap_or(default))
        }
    }

    #[derive(Default)]
    struct MemoryStorage {
        writes: Cell<usize>,
        last: RefCell<String>,
    }

    impl Storage for MemoryStorage {
        fn persist(&self, document: &Document) -> AppResult<()> {
            self.writes.set(self.writes.get() + 1);
            *self.last.borrow_mut() = document.to_string();
            Ok(())
        }
    }

    fn doc() -> Document {
        "Currently:\nLater:\n".parse().unwrap()
    }

    #[test]
    fn test_resolve_existing_section_asks_nothing() {
        let mut document = doc();
        let confirm = Scripted::new(&[]);
        let storage = MemoryStorage::default();

        let choice =
            resolve_section_interactive(&mut document, "ltr", &[], &confirm, &storage).unwrap();

        assert_eq!(choice, SectionChoice::Named("Later".to_string()));
        assert!(confirm.asked.borrow().is_empty());
        assert_eq!(storage.writes.get(), 0);
    }

    #[test]
    fn test_resolve_creates_section_when_confirmed() {
        let mut document = doc();
        let confirm = Scripted::new(&[true]);
        let storage = MemoryStorage::default();

        let choice =
            resolve_section_interactive(&mut document, "ideas", &[], &confirm, &storage).unwrap();

        assert_eq!(choice, SectionChoice::Named("Ideas".to_string()));
        assert_eq!(
            *confirm.asked.borrow(),
            ["Section ideas not found, create it"]
        );
        assert_eq!(document.section_titles(), ["Currently", "Later", "Ideas"]);
        assert_eq!(storage.writes.get(), 1);
        assert!(storage.last.borrow().contains("Ideas:"));
    }

    #[test]
    fn test_resolve_declined_is_unknown_section() {
        let mut document = doc();
        let storage = MemoryStorage::default();

        let result = resolve_section_interactive(
            &mut document,
            "zzz",
            &[],
            &crate::prompt::NonInteractive,
            &storage,
        );

        match result {
            Err(AppError::InvalidSection(message)) => {
                assert_eq!(message, "Unknown section: zzz");
            }
            other => panic!("Expected InvalidSection, got {:?}", other),
        }
        assert_eq!(document.section_titles(), ["Currently", "Later"]);
        assert_eq!(storage.writes.get(), 0);
    }

    #[test]
    fn test_resolve_offers_matching_view() {
        let mut document = doc();
        let views = vec!["color".to_string(), "done".to_string()];
        let confirm = Scripted::new(&[true]);
        let storage = MemoryStorage::default();

        let result = resolve_section_interactive(&mut document, "dn", &views, &confirm, &storage);

        match result {
            Err(AppError::InvalidSection(message)) => {
                assert_eq!(message, "Run again with `wwid view done`");
            }
            other => panic!("Expected InvalidSection, got {:?}", other),
        }
        assert_eq!(*confirm.asked.borrow(), ["Did you mean `wwid view done`?"]);
    }

    #[test]
    fn test_resolve_declined_view_falls_through_to_create() {
        let mut document = doc();
        let views = vec!["done".to_string()];
        let confirm = Scripted::new(&[false, true]);
        let storage = MemoryStorage::default();

        let choice =
            resolve_section_interactive(&mut document, "done", &views, &confirm, &storage)
                .unwrap();

        assert_eq!(choice, SectionChoice::Named("Done".to_string()));
        assert_eq!(confirm.asked.borrow().len(), 2);
        assert_eq!(storage.writes.get(), 1);
    }

    #[test]
    fn test_guess_view() {
        let views = vec!["Color".to_string(), "done".to_string(), "dn".to_string()];
        assert_eq!(guess_view("DN", &views), Some("dn"));
        assert_eq!(guess_view("dne", &views), Some("done"));
        assert_eq!(guess_view("xyz", &views), None);
        assert_eq!(guess_view("x", &[]), None);
    }

    #[test]
    fn test_list_sections() {
        assert_eq!(list_sections(&doc()), ["Currently", "Later"]);
        assert!(list_sections(&Document::new()).is_empty());
    }

    #[test]
    fn test_add_section_persists() {
        let mut document = doc();
        let storage = MemoryStorage::default();

        assert!(add_section(&mut document, &storage, "  archive ").unwrap());
        assert_eq!(document.section_titles(), ["Currently", "Later", "Archive"]);
        assert_eq!(storage.writes.get(), 1);

        assert!(!add_section(&mut document, &storage, "later").unwrap());
        assert_eq!(storage.writes.get(), 1);
    }

    #[test]
    fn test_add_section_rejects_blank_name() {
        let mut document = doc();
        let storage = MemoryStorage::default();
        assert!(matches!(
            add_section(&mut document, &storage, "   "),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
