//! Implementation of the `fieldcopy copy` command.
//!
//! Resolves a fixture file and copies every file its `!copyfile` fields
//! declare. With `--dry-run` the copies are only reported.

use crate::cli::CopyArgs;
use fieldcopy::config::Config;
use fieldcopy::copyfile::{CopiedFile, CopyFile};
use fieldcopy::error::Result;
use fieldcopy::fixture::Fixture;

/// Execute the `fieldcopy copy` command.
pub fn cmd_copy(args: CopyArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(args.source_path, args.destination_path, args.dry_run)?;

    let fixture = Fixture::load(&args.fixture)?;
    let copied = run_copy(&fixture, &config)?;

    let verb = if config.dry_run { "Would copy" } else { "Copied" };
    for file in &copied {
        println!("{}", describe_copy(file));
    }
    eprintln!("{} {} file(s)", verb, copied.len());
    Ok(())
}

/// Resolve `fixture` with a plugin configured from `config`.
pub(crate) fn run_copy(fixture: &Fixture, config: &Config) -> Result<Vec<CopiedFile>> {
    let mut plugin = CopyFile::new()
        .with_source_path(&config.source_path)
        .with_destination_path(&config.destination_path);

    if config.dry_run {
        plugin = plugin.with_copy_file(|_, source, _, destination| {
            tracing::info!(%source, %destination, "dry run, skipping copy");
            Ok(())
        });
    }

    let resolved = fixture.resolve(&plugin)?;
    Ok(resolved.copied().to_vec())
}

fn describe_copy(file: &CopiedFile) -> String {
    format!(
        "{}: {} -> {}",
        file.field,
        file.source.display(),
        file.destination.display()
    )
}
