//! Logging setup for the CLI.
//!
//! Events are written as JSON lines to a daily-rolling file. Stdout is left
//! to command output (and to the JSON-RPC stream under `serve`), so nothing
//! from here ever prints to it.
//!
//! Filter precedence: `RUST_LOG`, then `-q` / `-v`, then the configured
//! `log_level`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "DIALEX_LOG_PATH";
const LOG_DIR_ENV: &str = "DIALEX_LOG_DIR";
const LOG_FILE_NAME: &str = "dialex.jsonl";

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// One fixed file, never rotated.
    File(PathBuf),
    /// Daily-rolling files inside a directory.
    Directory(PathBuf),
}

/// Resolved logging destination.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Destination, or `None` when no location could be determined.
    pub target: Option<LogTarget>,
}

impl ObservabilityConfig {
    /// Resolve the destination from the environment, the configured
    /// directory, then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let target = resolve_target(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            default_log_dir(),
        );
        Self { target }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dialex").map(|dirs| dirs.data_local_dir().join("logs"))
}

fn resolve_target(
    log_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    config_log_dir: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> Option<LogTarget> {
    log_path.map(LogTarget::File).or_else(|| {
        log_dir
            .or(config_log_dir)
            .or(platform_dir)
            .map(LogTarget::Directory)
    })
}

/// Filter directive for the CLI verbosity flags.
fn filter_directive(quiet: bool, verbose: u8, level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Build the event filter. `RUST_LOG` wins when set and valid.
pub fn env_filter(quiet: bool, verbose: u8, level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose, level)))
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}

/// Install the global subscriber.
///
/// Returns the writer guard; keep it alive until exit so buffered records
/// are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let appender = match config.target {
        Some(LogTarget::File(ref path)) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            create_dir(dir)?;
            Some(tracing_appender::rolling::never(dir, name))
        }
        Some(LogTarget::Directory(ref dir)) => {
            create_dir(dir)?;
            Some(tracing_appender::rolling::daily(dir, LOG_FILE_NAME))
        }
        None => None,
    };

    let Some(appender) = appender else {
        tracing_subscriber::registry()
            .with(filter)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(filter_directive(true, 2, "info"), "error");
    }

    #[test]
    fn verbose_raises_level() {
        assert_eq!(filter_directive(false, 0, "warn"), "warn");
        assert_eq!(filter_directive(false, 1, "warn"), "debug");
        assert_eq!(filter_directive(false, 3, "warn"), "trace");
    }

    #[test]
    fn explicit_log_path_wins() {
        let target = resolve_target(
            Some(PathBuf::from("/tmp/x.jsonl")),
            Some(PathBuf::from("/tmp/dir")),
            Some(PathBuf::from("/tmp/config")),
            None,
        );
        assert_eq!(target, Some(LogTarget::File(PathBuf::from("/tmp/x.jsonl"))));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let target = resolve_target(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
            Some(PathBuf::from("/tmp/platform")),
        );
        assert_eq!(target, Some(LogTarget::Directory(PathBuf::from("/tmp/env"))));
    }

    #[test]
    fn falls_back_to_platform_dir() {
        let target = resolve_target(None, None, None, Some(PathBuf::from("/tmp/platform")));
        assert_eq!(
            target,
            Some(LogTarget::Directory(PathBuf::from("/tmp/platform")))
        );
        assert_eq!(resolve_target(None, None, None, None), None);
    }
}
