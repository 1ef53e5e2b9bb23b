//! Extract command: show how an example field is read.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use dialex_core::text::explain_example;

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Example text, as stored in an entry's `example` field.
    pub text: String,
}

/// Print the dialect text and tokens of an example.
#[instrument(name = "cmd_extract", skip_all, fields(text_len = args.text.len()))]
pub fn cmd_extract(args: ExtractArgs, global_json: bool) -> anyhow::Result<()> {
    debug!("executing extract command");

    let breakdown = explain_example(&args.text);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    if breakdown.dialect_lines.is_empty() {
        println!("{}", "no dialect sentence found".yellow());
        return Ok(());
    }
    for line in &breakdown.dialect_lines {
        println!("{}", line);
    }
    println!("{}: {}", "Tokens".dimmed(), breakdown.tokens.join(" "));
    Ok(())
}
