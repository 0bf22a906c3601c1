/*!
# wwid

`wwid` ("what was I doing") keeps a personal activity log in a plain-text,
line-oriented file organized into named sections of timestamped entries.

## Architecture

- `journal_core`: the document model and query engine. Parses journal text
  into sections and entries, matches tags and searches, resolves fuzzy
  section names and writes the document back out. Performs no I/O.
- `journal_io`: creating, reading and atomically writing the journal file
- `ops`: user-facing operations (`last`, section listing and creation)
- `prompt` and `editor`: user interaction behind traits
- `cli`, `config`, `constants`, `errors`: application plumbing

## Usage Example

```rust
use wwid::journal_core::{BoolMode, Document, TagQuery};

let doc: Document = "\
Currently:
\t- 2024-01-15 09:30 | Did a thing @tag1 @tag2
\t- 2024-01-15 10:00 | Finished a thing @tag1 @done(2024-01-15 10:15)
"
.parse()
.unwrap();

let items = doc.items_in_section("cur").unwrap();
assert_eq!(items.len(), 2);

let tagged: Vec<_> = items
    .iter()
    .filter(|i| i.tags_match(&TagQuery::parse("tag2"), BoolMode::And))
    .collect();
assert_eq!(tagged.len(), 1);
assert_eq!(items[1].interval(), Some(900));
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application constants
pub mod constants;
/// Editor abstraction
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Document model and query engine
pub mod journal_core;
/// Journal file I/O
pub mod journal_io;
/// High-level operations
pub mod ops;
/// Yes/no prompts
pub mod prompt;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{Document, Item};
