use std::fs;
use tempfile::tempdir;

use wwid::errors::AppError;
use wwid::journal_core::{BoolMode, Document, NoHooks, SearchQuery, SectionChoice, TagQuery};
use wwid::journal_io::{self, FileStorage};
use wwid::ops::{self, Collaborators};
use wwid::prompt::Confirm;
use wwid::AppResult;

const JOURNAL: &str = "\
# Notes kept at the top
Currently: @pinned
\t- 2024-01-15 09:30 | Did a thing @tag1 @tag2
\t\tContinuation note line, indented.
\t\t
\t- 2024-01-15 10:00 | Finished a thing @tag1 @done(2024-01-15 10:15)
Later:
\t- 2024-01-16 08:00 | Someday @idea
Archive:
";

struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm(&self, _prompt: &str, _default: bool) -> AppResult<bool> {
        Ok(true)
    }
}

struct NoEditor;

impl wwid::editor::Editor for NoEditor {
    fn edit(&self, _path: &std::path::Path) -> AppResult<()> {
        panic!("editor should not be launched");
    }
}

#[test]
fn test_file_round_trip_keeps_sections_and_items() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("doing.md");
    fs::write(&path, JOURNAL).unwrap();

    let doc = journal_io::load_document(&path, "Currently", &NoHooks).unwrap();
    journal_io::write_document(&doc, &path).unwrap();
    let reloaded = journal_io::load_document(&path, "Currently", &NoHooks).unwrap();

    assert_eq!(reloaded.sections(), doc.sections());
    assert_eq!(reloaded.sections()[0].original, "Currently: @pinned");
    assert_eq!(reloaded.items(), doc.items());
    for (a, b) in doc.items().iter().zip(reloaded.items()) {
        assert_eq!(a.section(), b.section());
    }
    assert_eq!(reloaded.other_content_top(), ["# Notes kept at the top"]);
    assert_eq!(reloaded.section_titles(), ["Currently", "Later", "Archive"]);
}

#[test]
fn test_items_in_section_examples() {
    let doc: Document = JOURNAL.parse().unwrap();

    assert_eq!(doc.items_in_section("All").unwrap().len(), 3);
    assert_eq!(doc.items_in_section("ltr").unwrap().len(), 1);
    assert_eq!(doc.items_in_section("currently").unwrap().len(), 2);
    assert!(doc.items_in_section("archive").unwrap().is_empty());
    assert!(matches!(
        doc.items_in_section("zzz"),
        Err(AppError::InvalidSection(_))
    ));
}

#[test]
fn test_adding_tags_to_and_query_never_adds_matches() {
    let doc: Document = JOURNAL.parse().unwrap();
    let queries = ["tag1", "tag1,tag2", "tag1,tag2,idea"];

    let counts: Vec<usize> = queries
        .iter()
        .map(|q| {
            let tags = TagQuery::parse(q);
            doc.items()
                .iter()
                .filter(|i| i.tags_match(&tags, BoolMode::And))
                .count()
        })
        .collect();

    assert_eq!(counts, [2, 1, 0]);
}

#[test]
fn test_fuzzy_search_matches_own_title() {
    let doc: Document = JOURNAL.parse().unwrap();
    for item in doc.items() {
        let query = SearchQuery::parse(item.title()).unwrap();
        assert!(item.matches_search(&query), "{} should match itself", item.title());
    }
}

#[test]
fn test_search_covers_note_text() {
    let doc: Document = JOURNAL.parse().unwrap();
    let query = SearchQuery::parse("'continuation note").unwrap();

    let hits: Vec<_> = doc
        .items()
        .iter()
        .filter(|i| i.matches_search(&query))
        .collect();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].date(), "2024-01-15 09:30");
}

#[test]
fn test_interactive_section_creation_is_persisted() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("doing.md");
    fs::write(&path, JOURNAL).unwrap();

    let mut doc = journal_io::load_document(&path, "Currently", &NoHooks).unwrap();
    let storage = FileStorage::new(&path);

    let choice =
        ops::resolve_section_interactive(&mut doc, "ideas", &[], &AlwaysYes, &storage).unwrap();
    assert_eq!(choice, SectionChoice::Named("Ideas".to_string()));

    let reloaded = journal_io::load_document(&path, "Currently", &NoHooks).unwrap();
    assert_eq!(
        reloaded.section_titles(),
        ["Currently", "Later", "Archive", "Ideas"]
    );
}

#[test]
fn test_last_delete_is_persisted() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("doing.md");
    fs::write(&path, JOURNAL).unwrap();

    let mut doc = journal_io::load_document(&path, "Currently", &NoHooks).unwrap();
    let storage = FileStorage::new(&path);
    let collaborators = Collaborators {
        confirm: &AlwaysYes,
        storage: &storage,
        editor: &NoEditor,
        views: &[],
    };
    let options = ops::LastOptions {
        tags: Some("tag1".to_string()),
        delete: true,
        ..ops::LastOptions::default()
    };
    let now = wwid::journal_core::item::parse_timestamp("2024-01-16 12:00").unwrap();

    let outcome = ops::last(&mut doc, &options, &collaborators, now).unwrap();
    assert!(matches!(outcome, ops::LastOutcome::Deleted(_)));

    let reloaded = journal_io::load_document(&path, "Currently", &NoHooks).unwrap();
    let titles: Vec<_> = reloaded.items().iter().map(|i| i.title()).collect();
    assert_eq!(titles, ["Did a thing @tag1 @tag2", "Someday @idea"]);
    assert_eq!(
        reloaded.items()[0].note().trimmed_lines(),
        ["\t\tContinuation note line, indented."]
    );
}
