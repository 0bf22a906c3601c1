/*!
# wwid - What Was I Doing

`wwid` keeps a plain-text log of what you were doing, organized into sections
of timestamped entries.

This file contains the main application flow: it sets up logging, loads the
configuration and journal file, and dispatches to the requested operation.

## Usage

```text
wwid [OPTIONS] <COMMAND>

Commands:
  last         Show the last entry, optionally edit or delete it
  sections     List section names
  add-section  Add a new section to the journal file

Options:
  -f, --file <PATH>          Journal file to use instead of WWID_FILE
  -v, --verbose              Enable debug logging
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `WWID_FILE`: the journal file (defaults to "~/what_was_i_doing.md")
- `WWID_EDITOR` or `EDITOR`: editor for `last --editor` (defaults to "vim")
- `WWID_DEFAULT_SECTION`: section written into a new journal file (defaults to "Currently")
- `WWID_VIEWS`: comma-separated view names offered when a section isn't found
- `RUST_LOG`: log filter (defaults to "info")
*/

use chrono::Local;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;
use wwid::cli::{CliArgs, Commands, LogFormat};
use wwid::config::Config;
use wwid::constants::{DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use wwid::editor::SystemEditor;
use wwid::errors::AppResult;
use wwid::journal_core::NoHooks;
use wwid::journal_io::{self, FileStorage};
use wwid::ops::{self, Collaborators, LastOutcome};
use wwid::prompt::{Confirm, NonInteractive, TerminalConfirm};

/// Installs the global tracing subscriber.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` is honored with a
/// default of info. Logs always go to stderr so command output stays clean.
fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_current_span(true)
                    .with_writer(io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(io::stderr().is_terminal())
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

/// Resolves the journal file from `--file` or the configuration.
fn journal_path(config: &mut Config, file: Option<&Path>) -> AppResult<()> {
    if let Some(file) = file {
        let expanded = Config::expand_path(&file.to_string_lossy())?;
        config.doing_file = if expanded.is_relative() {
            std::env::current_dir()?.join(expanded)
        } else {
            expanded
        };
    }
    Ok(())
}

fn run(args: CliArgs) -> AppResult<()> {
    let mut config = Config::load()?;
    journal_path(&mut config, args.file.as_deref())?;
    config.validate()?;
    debug!("Configuration loaded: {:?}", config);

    let mut document =
        journal_io::load_document(&config.doing_file, &config.default_section, &NoHooks)?;
    let storage = FileStorage::new(&config.doing_file);

    match args.command {
        Commands::Last(last_args) => {
            let editor = SystemEditor::new(config.editor.clone());
            let confirm: &dyn Confirm = if io::stdin().is_terminal() {
                &TerminalConfirm
            } else {
                &NonInteractive
            };
            let collaborators = Collaborators {
                confirm,
                storage: &storage,
                editor: &editor,
                views: &config.views,
            };

            let outcome = ops::last(
                &mut document,
                &last_args.to_options(),
                &collaborators,
                Local::now().naive_local(),
            )?;
            if let LastOutcome::Shown(text) = outcome {
                println!("{}", text);
            }
        }
        Commands::Sections => {
            for title in ops::list_sections(&document) {
                println!("{}", title);
            }
        }
        Commands::AddSection { name } => {
            if !ops::add_section(&mut document, &storage, &name)? {
                info!("Section {:?} already exists", name);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose, args.log_format);

    let span = tracing::info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %Uuid::new_v4()
    );
    let _guard = span.enter();
    debug!("CLI arguments: {:?}", args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
