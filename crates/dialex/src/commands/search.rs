//! Search command: headword prefix lookup.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use dialex_core::config::Config;
use dialex_core::search::search_prefix;

use super::load_entries;

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Headword prefix (case-insensitive, matched literally).
    pub prefix: String,

    /// Entry dump (JSON or YAML). Defaults to `entries_file` from config.
    pub file: Option<Utf8PathBuf>,
}

/// Print the entries whose headword starts with the prefix.
#[instrument(name = "cmd_search", skip_all, fields(prefix = %args.prefix))]
pub fn cmd_search(args: SearchArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = ?args.file, "executing search command");

    let (_path, entries) = load_entries(args.file.as_deref(), config)?;
    let found = search_prefix(&entries, &args.prefix)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("{}", "no match".yellow());
        return Ok(());
    }
    for entry in found {
        let languages = entry.languages.join(", ");
        if entry.meaning.is_empty() {
            println!("{} {}", entry.headword.bold(), languages.dimmed());
        } else {
            println!(
                "{} {} {}",
                entry.headword.bold(),
                languages.dimmed(),
                entry.meaning
            );
        }
    }
    Ok(())
}
