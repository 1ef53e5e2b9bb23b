//! Dedupe command: drop entries duplicated by a trailing full stop.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use dialex_core::config::Config;
use dialex_core::hygiene::{DuplicatePlan, plan_fullstop_cleanup};
use dialex_core::source::write_entries;

use super::{hygiene_target, load_entries};

/// Arguments for the `dedupe` subcommand.
#[derive(Args, Debug, Default)]
pub struct DedupeArgs {
    /// Entry dump (JSON or YAML). Defaults to `entries_file` from config.
    pub file: Option<Utf8PathBuf>,

    /// Rewrite the dump in place (otherwise only report).
    #[arg(long)]
    pub write: bool,

    /// Write the cleaned entries here instead of in place.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct DedupeOutcome<'a> {
    #[serde(flatten)]
    plan: &'a DuplicatePlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    written_to: Option<&'a Utf8PathBuf>,
}

/// Plan the cleanup and apply it when a target is given.
#[instrument(name = "cmd_dedupe", skip_all, fields(file = ?args.file))]
pub fn cmd_dedupe(args: DedupeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(write = args.write, output = ?args.output, "executing dedupe command");

    let (path, entries) = load_entries(args.file.as_deref(), config)?;
    let plan = plan_fullstop_cleanup(&entries);
    let target = hygiene_target(&path, args.write, args.output.as_deref());

    if let Some(ref target) = target {
        write_entries(target, &plan.apply(&entries))?;
        info!(path = %target, removed = plan.removals.len(), "duplicates removed");
    }

    if global_json {
        let outcome = DedupeOutcome {
            plan: &plan,
            written_to: target.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for removal in &plan.removals {
        println!(
            "{} {:?} duplicates {:?} ({})",
            "remove".red(),
            removal.removed_headword,
            removal.kept_headword,
            removal.meaning.dimmed()
        );
    }
    for unmatched in &plan.kept_unmatched {
        println!("{} {:?} has no twin", "keep".dimmed(), unmatched.headword);
    }

    match target {
        Some(target) => println!(
            "{} removed {} of {} entries, wrote {}",
            "DONE:".green(),
            plan.removals.len(),
            entries.len(),
            target
        ),
        None if plan.is_empty() => println!("{} nothing to remove", "CLEAN:".green()),
        None => println!(
            "{} {} entries would be removed (pass --write to apply)",
            "DRY RUN:".yellow(),
            plan.removals.len()
        ),
    }
    Ok(())
}
