//! Command-line interface definitions.
//!
//! This module defines the command-line arguments using clap's derive API.

use crate::constants::{ALL_SECTIONS, APP_DESCRIPTION, APP_NAME};
use crate::journal_core::BoolMode;
use crate::ops::{LastOptions, OutputFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Format of the diagnostic log written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Keep a plain-text log of what you were doing
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Journal file to use instead of WWID_FILE
    #[arg(short = 'f', long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the last entry, optionally edit or delete it
    Last(LastArgs),
    /// List section names
    Sections,
    /// Add a new section to the journal file
    AddSection {
        /// Name of the section
        name: String,
    },
}

/// Arguments of the `last` subcommand.
#[derive(Args, Debug, Clone)]
pub struct LastArgs {
    /// Section to look in
    #[arg(short = 's', long, default_value = ALL_SECTIONS, value_name = "NAME")]
    pub section: String,

    /// Only consider entries with these tags (comma separated)
    #[arg(long, value_name = "TAGS")]
    pub tag: Option<String>,

    /// Boolean used to combine tags (and, or, not)
    #[arg(long = "bool", default_value = "or", value_parser = parse_bool_mode, value_name = "MODE")]
    pub bool_mode: BoolMode,

    /// Only consider entries matching this text; fuzzy unless 'quoted or /regex/
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Match the search text literally
    #[arg(short = 'x', long)]
    pub exact: bool,

    /// Select the last entry that does NOT match the filter
    #[arg(long = "not")]
    pub negate: bool,

    /// Delete the entry
    #[arg(short = 'd', long)]
    pub delete: bool,

    /// Open the entry in an editor
    #[arg(short = 'e', long = "editor")]
    pub edit: bool,

    /// Show elapsed time, or the interval of a finished entry
    #[arg(long)]
    pub duration: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

fn parse_bool_mode(input: &str) -> Result<BoolMode, String> {
    Ok(BoolMode::parse(input))
}

impl LastArgs {
    pub fn to_options(&self) -> LastOptions {
        LastOptions {
            section: self.section.clone(),
            tags: self.tag.clone(),
            bool_mode: self.bool_mode,
            search: self.search.clone(),
            exact: self.exact,
            negate: self.negate,
            delete: self.delete,
            edit: self.edit,
            duration: self.duration,
            output: self.output,
        }
    }
}
