//! Export-missing command: hand a language's missing words to lexicographers.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument};

use dialex_core::config::Config;
use dialex_core::source::DumpFormat;
use dialex_core::stats::{MissingWordsExport, compute_statistics};

use super::load_entries;

/// Arguments for the `export-missing` subcommand.
#[derive(Args, Debug)]
pub struct ExportMissingArgs {
    /// Language code to export (e.g. H131).
    pub code: String,

    /// Entry dump (JSON or YAML). Defaults to `entries_file` from config.
    pub file: Option<Utf8PathBuf>,

    /// Write the export to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Export format (defaults to the output extension, else JSON).
    #[arg(long, value_enum)]
    pub format: Option<DumpFormat>,
}

/// Render the export in the requested format.
fn render(export: &MissingWordsExport, format: DumpFormat) -> anyhow::Result<String> {
    let mut text = match format {
        DumpFormat::Json => serde_json::to_string_pretty(export)?,
        DumpFormat::Yaml => serde_yaml::to_string(export)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Export the missing words of one language.
#[instrument(name = "cmd_export_missing", skip_all, fields(code = %args.code))]
pub fn cmd_export_missing(
    args: ExportMissingArgs,
    global_json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, output = ?args.output, "executing export-missing command");

    let (path, entries) = load_entries(args.file.as_deref(), config)?;
    let report = compute_statistics(&entries);
    let language = report
        .language(&args.code)
        .with_context(|| format!("language {} does not occur in {path}", args.code))?;
    let export = MissingWordsExport::from_report(language);

    let format = match (args.format, &args.output) {
        (Some(format), _) => format,
        (None, _) if global_json => DumpFormat::Json,
        (None, Some(output)) => DumpFormat::from_path(output),
        (None, None) => DumpFormat::Json,
    };
    let text = render(&export, format)?;

    match args.output {
        Some(output) => {
            std::fs::write(output.as_std_path(), text)
                .with_context(|| format!("failed to write {output}"))?;
            info!(path = %output, words = export.total_missing_words, "missing words exported");
            if !global_json {
                println!(
                    "{} {} missing words for {} written to {}",
                    "DONE:".green(),
                    export.total_missing_words,
                    export.language_code.bold(),
                    output
                );
            }
        }
        None => print!("{text}"),
    }
    Ok(())
}
