//! CLI argument parsing for fieldcopy.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// fieldcopy: curly-brace field templates and fixture file copies.
///
/// Templates use `{name}` fields. `{{` is a literal brace that never opens a
/// field; inside a field `}}` is a literal `}`.
#[derive(Parser, Debug)]
#[command(name = "fieldcopy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for fieldcopy.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the fields of a template.
    ///
    /// Prints one field name per line, in order of appearance.
    Fields(FieldsArgs),

    /// Render a template with the given values.
    ///
    /// Fails if any field of the template has no value.
    Render(RenderArgs),

    /// Resolve a fixture file and copy every `!copyfile` file it declares.
    Copy(CopyArgs),
}

/// Arguments for the `fields` command.
#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// The template string.
    pub template: String,

    /// Print the fields as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// The template string.
    pub template: String,

    /// A field value as `name=value` (repeatable).
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// YAML file with a mapping of field names to values.
    ///
    /// Values given with `--set` take precedence.
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,
}

/// Arguments for the `copy` command.
#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// Fixture YAML file to resolve.
    pub fixture: PathBuf,

    /// Config file (YAML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory for source file names (overrides config).
    #[arg(long, value_name = "DIR")]
    pub source_path: Option<PathBuf>,

    /// Root directory for destination file names (overrides config).
    #[arg(long, value_name = "DIR")]
    pub destination_path: Option<PathBuf>,

    /// Print the copies without performing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse a `name=value` pair. Only the first `=` separates; the value may
/// contain more.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
