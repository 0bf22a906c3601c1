//! High-level operations behind the command line.
//!
//! Operations take an already loaded [`Document`](crate::journal_core::Document)
//! and the collaborators they need to ask the user, launch an editor or save
//! changes. They never print; callers decide how results are shown.

pub mod last;
pub mod section;

use crate::editor::Editor;
use crate::journal_io::Storage;
use crate::prompt::Confirm;

pub use last::{last, ItemFilter, LastOptions, LastOutcome, OutputFormat};
pub use section::{add_section, guess_view, list_sections, resolve_section_interactive};

/// Everything an operation may need besides the document itself.
pub struct Collaborators<'a> {
    pub confirm: &'a dyn Confirm,
    pub storage: &'a dyn Storage,
    pub editor: &'a dyn Editor,
    /// Configured view names, offered when a section name matches nothing.
    pub views: &'a [String],
}
