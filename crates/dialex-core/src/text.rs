//! Example-text processing.
//!
//! Example fields are hand-entered and formatted inconsistently: sometimes
//! one sentence per line, sometimes `". "` is the only separator, often a
//! mix. This module isolates the dialect sentences (the ones tagged with a
//! `(H131)`-style marker), drops their translations, and tokenizes what is
//! left. None of these functions fail; text that does not fit the expected
//! shape simply contributes nothing.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Characters replaced by whitespace before splitting into tokens.
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Tokens shorter than this (in characters) are particles and are ignored.
pub const MIN_TOKEN_CHARS: usize = 3;

/// A dialect code inside a line (`H131`, `h12`, ...).
static DIALECT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Hh]\d+").expect("valid regex"));

/// The marker plus whatever separates it from the sentence: leading
/// whitespace, a stray period, an opening parenthesis.
static MARKER_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\.?\s*\(?\s*[Hh]\d+").expect("valid regex"));

/// Lowercase, strip [`PUNCTUATION`], split on whitespace and keep tokens of
/// at least [`MIN_TOKEN_CHARS`] characters, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || PUNCTUATION.contains(&c))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Rewrite example text so that each sentence sits on its own line.
///
/// Rules, first match wins:
/// 1. No newline at all: only the first `.` becomes `.\n`.
/// 2. More periods than newlines: newlines become spaces, then every
///    `". "` becomes `".\n"`.
/// 3. Otherwise the text is returned unchanged.
pub fn normalize_example_lines(text: &str) -> String {
    if !text.contains('\n') {
        return text.replacen('.', ".\n", 1);
    }

    let periods = text.matches('.').count();
    let newlines = text.matches('\n').count();
    if periods > newlines {
        return text.replace(['\r', '\n'], " ").replace(". ", ".\n");
    }

    text.to_string()
}

/// Whether a line carries a dialect marker.
pub fn is_dialect_line(line: &str) -> bool {
    DIALECT_MARKER.is_match(line)
}

/// Cut a dialect line at its marker: `"Muana wu mubela .(H131)."` becomes
/// `"Muana wu mubela"`.
pub fn strip_marker(line: &str) -> &str {
    MARKER_TAIL
        .find(line)
        .map_or(line, |m| &line[..m.start()])
        .trim()
}

/// Extract the dialect sentences of an example field, space-joined.
///
/// Translation lines (no marker) are discarded.
#[tracing::instrument(level = "trace", skip_all, fields(text_len = example.len()))]
pub fn extract_dialect_text(example: &str) -> String {
    let normalized = normalize_example_lines(example);
    normalized
        .lines()
        .filter(|line| is_dialect_line(line))
        .map(strip_marker)
        .filter(|sentence| !sentence.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens of the dialect sentences of an example field.
pub fn example_tokens(example: &str) -> Vec<String> {
    tokenize(&extract_dialect_text(example))
}

/// Step-by-step view of how an example field is read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExampleBreakdown {
    /// Text after line normalization.
    pub normalized: String,
    /// Dialect lines after marker stripping.
    pub dialect_lines: Vec<String>,
    /// Space-joined dialect text.
    pub dialect_text: String,
    /// Tokens counted by the statistics.
    pub tokens: Vec<String>,
}

/// Explain how an example field is split and tokenized.
pub fn explain_example(example: &str) -> ExampleBreakdown {
    let normalized = normalize_example_lines(example);
    let dialect_lines: Vec<String> = normalized
        .lines()
        .filter(|line| is_dialect_line(line))
        .map(strip_marker)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect();
    let dialect_text = dialect_lines.join(" ");
    let tokens = tokenize(&dialect_text);

    ExampleBreakdown {
        normalized,
        dialect_lines,
        dialect_text,
        tokens,
    }
}
