//! Entry sources.
//!
//! The analysis works on a full in-memory snapshot of the dictionary. An
//! [`EntrySource`] produces that snapshot; [`FileSource`] reads it from a
//! JSON or YAML dump of the word collection.
//!
//! Two document shapes are accepted:
//! - a bare array of entries
//! - the word-list response envelope, `{ "size": N, "data": [ ... ] }`

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::entry::DictionaryEntry;
use crate::error::{SourceError, SourceResult};

/// Something that can hand over every dictionary entry at once.
pub trait EntrySource {
    /// Fetch the complete entry list.
    fn fetch_all_entries(&self) -> SourceResult<Vec<DictionaryEntry>>;
}

/// Serialization format of an entry dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DumpFormat {
    /// JSON (default for unknown extensions).
    Json,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
}

impl DumpFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse entries from dump text.
pub fn parse_entries(text: &str, format: DumpFormat) -> SourceResult<Vec<DictionaryEntry>> {
    let document: Value = match format {
        DumpFormat::Json => serde_json::from_str(text)?,
        DumpFormat::Yaml => serde_yaml::from_str(text)?,
    };

    let list = match document {
        Value::Object(mut envelope) if envelope.contains_key("data") => envelope
            .remove("data")
            .unwrap_or_else(|| Value::Array(Vec::new())),
        other => other,
    };

    Ok(serde_json::from_value(list)?)
}

/// Reads entries from a dump file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Utf8PathBuf,
    max_bytes: Option<usize>,
}

impl FileSource {
    /// Create a source for the given dump, with no size limit.
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_bytes: None,
        }
    }

    /// Refuse dumps larger than `max_bytes` (`None` disables the check).
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: Option<usize>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Path of the dump.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl EntrySource for FileSource {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    fn fetch_all_entries(&self) -> SourceResult<Vec<DictionaryEntry>> {
        let io_error = |source| SourceError::Io {
            path: self.path.clone(),
            source,
        };

        // Preflight: check the size before reading into memory.
        let metadata = std::fs::metadata(self.path.as_std_path()).map_err(io_error)?;
        if let Some(limit) = self.max_bytes
            && metadata.len() > limit as u64
        {
            return Err(SourceError::TooLarge {
                path: self.path.clone(),
                size: metadata.len(),
                limit,
            });
        }

        let text = std::fs::read_to_string(self.path.as_std_path()).map_err(io_error)?;
        let entries = parse_entries(&text, DumpFormat::from_path(&self.path))?;
        tracing::debug!(count = entries.len(), "entries loaded");
        Ok(entries)
    }
}

/// Serves a snapshot already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<DictionaryEntry>,
}

impl MemorySource {
    /// Wrap an entry list.
    pub const fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }
}

impl EntrySource for MemorySource {
    fn fetch_all_entries(&self) -> SourceResult<Vec<DictionaryEntry>> {
        Ok(self.entries.clone())
    }
}

/// Write entries back as a dump, in the format implied by the extension.
#[tracing::instrument(skip(entries), fields(count = entries.len()))]
pub fn write_entries(path: &Utf8Path, entries: &[DictionaryEntry]) -> SourceResult<()> {
    let mut text = match DumpFormat::from_path(path) {
        DumpFormat::Json => serde_json::to_string_pretty(entries)?,
        DumpFormat::Yaml => serde_yaml::to_string(entries)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    std::fs::write(path.as_std_path(), text).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path, "entries written");
    Ok(())
}
