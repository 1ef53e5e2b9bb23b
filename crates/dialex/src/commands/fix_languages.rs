//! Fix-languages command: rewrite language names to dialect codes.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use dialex_core::config::Config;
use dialex_core::hygiene::{LanguageFixPlan, plan_language_fixes};
use dialex_core::source::write_entries;

use super::{hygiene_target, load_entries};

/// Arguments for the `fix-languages` subcommand.
#[derive(Args, Debug, Default)]
pub struct FixLanguagesArgs {
    /// Entry dump (JSON or YAML). Defaults to `entries_file` from config.
    pub file: Option<Utf8PathBuf>,

    /// Rewrite the dump in place (otherwise only report).
    #[arg(long)]
    pub write: bool,

    /// Write the fixed entries here instead of in place.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct FixOutcome<'a> {
    #[serde(flatten)]
    plan: &'a LanguageFixPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    written_to: Option<&'a Utf8PathBuf>,
}

/// Plan the language rewrites and apply them when a target is given.
#[instrument(name = "cmd_fix_languages", skip_all, fields(file = ?args.file))]
pub fn cmd_fix_languages(
    args: FixLanguagesArgs,
    global_json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(write = args.write, output = ?args.output, "executing fix-languages command");

    let (path, entries) = load_entries(args.file.as_deref(), config)?;
    let aliases = config.language_aliases();
    let plan = plan_language_fixes(&entries, &aliases);
    let target = hygiene_target(&path, args.write, args.output.as_deref());

    if let Some(ref target) = target {
        write_entries(target, &plan.apply(&entries))?;
        info!(path = %target, fixed = plan.fixes.len(), "language codes rewritten");
    }

    if global_json {
        let outcome = FixOutcome {
            plan: &plan,
            written_to: target.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for fix in &plan.fixes {
        println!(
            "{} [{}] -> [{}]",
            fix.headword.bold(),
            fix.before.join(", ").dimmed(),
            fix.after.join(", ")
        );
    }
    for rule in plan.hits.iter().filter(|h| h.hits > 0) {
        println!(
            "{} {} -> {}: {}",
            "rule".dimmed(),
            rule.pattern,
            rule.code,
            rule.hits
        );
    }

    match target {
        Some(target) => println!(
            "{} fixed {} entries, wrote {}",
            "DONE:".green(),
            plan.fixes.len(),
            target
        ),
        None if plan.is_empty() => println!("{} all language codes are clean", "CLEAN:".green()),
        None => println!(
            "{} {} entries would change (pass --write to apply)",
            "DRY RUN:".yellow(),
            plan.fixes.len()
        ),
    }
    Ok(())
}
