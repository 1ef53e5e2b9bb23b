//! Core library for dialex.
//!
//! This crate provides the dictionary model and the analysis used by the
//! `dialex` CLI, its MCP server, and any downstream consumers.
//!
//! # Modules
//!
//! - [`entry`] - Dictionary entry model
//! - [`source`] - Loading and writing entry dumps
//! - [`text`] - Example-text normalization and tokenization
//! - [`stats`] - Per-language example coverage statistics
//! - [`hygiene`] - Dry-run-first data cleanup jobs
//! - [`search`] - Headword prefix search
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use dialex_core::source::{EntrySource, FileSource};
//! use dialex_core::stats::compute_statistics;
//!
//! let entries = FileSource::new("words.json")
//!     .fetch_all_entries()
//!     .expect("Failed to load entries");
//! let report = compute_statistics(&entries);
//!
//! println!("{} languages", report.overall.total_languages);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod entry;
pub mod error;
pub mod hygiene;
pub mod search;
pub mod source;
pub mod stats;
pub mod text;

pub use config::{Config, ConfigLoader, LogLevel};
pub use entry::DictionaryEntry;
pub use error::{ConfigError, ConfigResult, SearchError, SourceError, SourceResult};
pub use stats::{StatisticsReport, compute_statistics};

/// Default maximum size of an entry dump read from disk (32 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 32 * 1024 * 1024;
