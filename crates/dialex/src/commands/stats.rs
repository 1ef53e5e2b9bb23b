//! Stats command: example coverage statistics per language.

use anyhow::bail;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use dialex_core::config::Config;
use dialex_core::stats::{LanguageSummary, StatisticsSummary, WordCount, compute_statistics};

use super::load_entries;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Entry dump (JSON or YAML). Defaults to `entries_file` from config.
    pub file: Option<Utf8PathBuf>,

    /// Length of the top-word lists.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Only report this language code.
    #[arg(long, value_name = "CODE")]
    pub language: Option<String>,

    /// Emit the full report (every token list, untruncated).
    #[arg(long)]
    pub full: bool,
}

/// Compute and print coverage statistics.
#[instrument(name = "cmd_stats", skip_all, fields(file = ?args.file))]
pub fn cmd_stats(args: StatsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(top = ?args.top, language = ?args.language, full = args.full, "executing stats command");

    let (path, entries) = load_entries(args.file.as_deref(), config)?;
    let mut report = compute_statistics(&entries);

    if let Some(ref code) = args.language {
        report.by_language.retain(|r| &r.language_code == code);
        if report.by_language.is_empty() {
            bail!("language {code} does not occur in {path}");
        }
    }

    let top = args.top.unwrap_or_else(|| config.top_words());

    if global_json {
        if args.full {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&report.summarize(top))?);
        }
        return Ok(());
    }

    let summary = report.summarize(if args.full { usize::MAX } else { top });
    print_summary(&path, &summary);
    Ok(())
}

fn print_summary(path: &Utf8Path, summary: &StatisticsSummary) {
    let overall = &summary.overall;
    println!("{}", path.bold());
    println!(
        "{} entries, {} languages, {} distinct headword tokens",
        overall.total_words, overall.total_languages, overall.unique_dictionary_words
    );

    for language in &summary.by_language {
        println!();
        print_language(language);
    }
}

fn print_language(language: &LanguageSummary) {
    let coverage = format!("{:.1}%", language.coverage_percent);
    let coverage = if language.coverage_percent >= 80.0 {
        coverage.green().to_string()
    } else if language.coverage_percent >= 50.0 {
        coverage.yellow().to_string()
    } else {
        coverage.red().to_string()
    };

    println!("{} coverage {}", language.language_code.bold().underline(), coverage);
    println!(
        "  {}: {} ({} without examples)",
        "Entries".dimmed(),
        language.total_dictionary_words,
        language.words_without_examples
    );
    println!(
        "  {}: {} distinct, {} in dictionary, {} missing",
        "Example words".dimmed(),
        language.unique_words_in_examples,
        language.unique_dictionary_words_in_examples,
        language.words_in_examples_not_in_dictionary
    );
    print_words("Top dictionary words", &language.top_dictionary_words);
    print_words("Top missing words", &language.top_missing_words);
}

fn print_words(label: &str, words: &[WordCount]) {
    if words.is_empty() {
        return;
    }
    let list: Vec<String> = words
        .iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect();
    println!("  {}: {}", label.dimmed(), list.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dump(dir: &TempDir) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("words.json")).unwrap();
        fs::write(
            &path,
            r#"[
                {"word": "muana", "language": ["H131"], "example": "Muana wu musakana(H131). L'enfant est un garçon."},
                {"word": "musakana", "language": ["H131"]}
            ]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn stats_text_succeeds() {
        let tmp = TempDir::new().unwrap();
        let args = StatsArgs {
            file: Some(dump(&tmp)),
            ..StatsArgs::default()
        };
        assert!(cmd_stats(args, false, &Config::default()).is_ok());
    }

    #[test]
    fn stats_json_full_succeeds() {
        let tmp = TempDir::new().unwrap();
        let args = StatsArgs {
            file: Some(dump(&tmp)),
            full: true,
            ..StatsArgs::default()
        };
        assert!(cmd_stats(args, true, &Config::default()).is_ok());
    }

    #[test]
    fn unknown_language_fails() {
        let tmp = TempDir::new().unwrap();
        let args = StatsArgs {
            file: Some(dump(&tmp)),
            language: Some("H99".to_string()),
            ..StatsArgs::default()
        };
        let err = cmd_stats(args, true, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("H99"));
    }
}
