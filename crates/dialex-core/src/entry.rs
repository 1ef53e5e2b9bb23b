//! Dictionary entry model.
//!
//! Entries are read from dumps of the word collection, so serde uses the
//! stored field names (`word`, `language`) and keeps every other field of
//! the document in [`DictionaryEntry::extra`]. A dump rewritten by a
//! hygiene job therefore loses nothing it did not explicitly change.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The canonical word or phrase being defined.
    #[serde(rename = "word", alias = "headword")]
    pub headword: String,
    /// Free-text meaning. Not analyzed.
    #[serde(default)]
    pub meaning: String,
    /// Language codes this entry belongs to.
    ///
    /// Stored documents carry either a single code or a list of codes.
    #[serde(
        rename = "language",
        alias = "languages",
        default,
        deserialize_with = "one_or_many"
    )]
    pub languages: Vec<String>,
    /// Usage examples: dialect sentences tagged with a `(H131)`-style marker,
    /// usually followed by a translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Remaining document fields (`_id`, `description`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DictionaryEntry {
    /// Create an entry with a headword and meaning, no languages or example.
    pub fn new(headword: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            meaning: meaning.into(),
            languages: Vec::new(),
            example: None,
            extra: Map::new(),
        }
    }

    /// Set the language codes.
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the example text.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Whether the entry has non-blank example text.
    pub fn has_example(&self) -> bool {
        self.example
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Language codes with duplicates removed, in first-seen order.
    pub fn distinct_languages(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.languages.len());
        for code in &self.languages {
            if !seen.contains(&code.as_str()) {
                seen.push(code);
            }
        }
        seen
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(code)) => vec![code],
        Some(OneOrMany::Many(codes)) => codes,
    })
}
