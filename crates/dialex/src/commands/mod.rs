//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use indicatif::ProgressBar;

use dialex_core::DictionaryEntry;
use dialex_core::config::Config;
use dialex_core::source::{EntrySource, FileSource};

pub mod dedupe;
pub mod export_missing;
pub mod extract;
pub mod fix_languages;
pub mod info;
pub mod search;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod stats;

/// Pick the entry dump: the command's `FILE` argument, else `entries_file`
/// from configuration.
pub fn resolve_entries_file(file: Option<&Utf8Path>, config: &Config) -> anyhow::Result<Utf8PathBuf> {
    file.map(Utf8Path::to_path_buf)
        .or_else(|| config.entries_file.clone())
        .context("no entry dump given: pass FILE or set `entries_file` in the configuration")
}

/// Load every entry from the dump, honoring the configured size limit.
///
/// A spinner runs on stderr while the dump is parsed; it stays hidden when
/// stderr is not a terminal.
pub fn load_entries(
    file: Option<&Utf8Path>,
    config: &Config,
) -> anyhow::Result<(Utf8PathBuf, Vec<DictionaryEntry>)> {
    let path = resolve_entries_file(file, config)?;

    let spinner = ProgressBar::new_spinner().with_message(format!("loading {path}"));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let loaded = FileSource::new(&path)
        .with_max_bytes(config.max_input())
        .fetch_all_entries();
    spinner.finish_and_clear();

    let entries = loaded.with_context(|| format!("failed to load entries from {path}"))?;
    Ok((path, entries))
}

/// Where a hygiene job writes its result: `--output` if given, else the
/// source dump itself when `--write` is set. `None` means dry run.
pub fn hygiene_target(
    source: &Utf8Path,
    write: bool,
    output: Option<&Utf8Path>,
) -> Option<Utf8PathBuf> {
    match (output, write) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, true) => Some(source.to_path_buf()),
        (None, false) => None,
    }
}
