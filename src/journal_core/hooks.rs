//! Extension points notified by the document parser.

use super::Document;

/// Receives notifications about document lifecycle events.
///
/// Hooks are passed to [`Document::parse`] explicitly rather than registered
/// globally. Every method has an empty default implementation so an
/// implementor only overrides the events it cares about.
///
/// # Examples
///
/// ```
/// use wwid::journal_core::{Document, Hooks};
///
/// struct DropBottomContent;
///
/// impl Hooks for DropBottomContent {
///     fn post_read(&self, document: &mut Document) {
///         document.other_content_bottom_mut().clear();
///     }
/// }
///
/// let doc = Document::parse("Work:\n\t- 2024-01-15 09:30 | Task\nstray", &DropBottomContent);
/// assert!(doc.other_content_bottom().is_empty());
/// ```
pub trait Hooks {
    /// Called once after a document has been parsed, before it is returned.
    fn post_read(&self, _document: &mut Document) {}
}

/// Hooks implementation that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl Hooks for NoHooks {}
