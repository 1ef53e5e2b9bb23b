//! Dictionary coverage statistics.
//!
//! Cross-references the words used in each language's examples against the
//! headwords of the whole dictionary, in two passes:
//!
//! 1. Every headword is split into sub-word tokens, building one index for
//!    all languages. A token is "known" if any headword in any language
//!    contains it, because particles and cognates recur across dialects.
//! 2. Every entry's example is reduced to its dialect sentences, tokenized,
//!    and each token is counted for each of the entry's languages, either as
//!    a dictionary word or as a missing one.
//!
//! Token lists come back sorted by descending count; ties keep the order in
//! which tokens were first met, so the output is fully deterministic.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entry::DictionaryEntry;
use crate::text;

/// Default length of the `top*` lists in a [`StatisticsSummary`].
pub const DEFAULT_TOP_WORDS: usize = 20;

/// A token and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCount {
    /// The token.
    pub word: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Corpus-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    /// Number of entries analyzed.
    pub total_words: usize,
    /// Number of distinct language codes.
    pub total_languages: usize,
    /// Number of distinct headword tokens across all languages.
    pub unique_dictionary_words: usize,
}

/// How one language's examples reflect the dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageReport {
    /// The language code.
    pub language_code: String,
    /// Entries tagged with this language.
    pub total_dictionary_words: usize,
    /// Entries tagged with this language whose example is absent or blank.
    pub words_without_examples: usize,
    /// Example tokens that are also headword tokens.
    pub dictionary_tokens_in_examples: Vec<WordCount>,
    /// Every example token.
    pub all_example_tokens: Vec<WordCount>,
    /// Example tokens found in no headword of any language.
    pub missing_tokens: Vec<WordCount>,
}

impl LanguageReport {
    /// Distinct dictionary words used in examples.
    pub fn unique_dictionary_words_in_examples(&self) -> usize {
        self.dictionary_tokens_in_examples.len()
    }

    /// Distinct tokens used in examples.
    pub fn unique_words_in_examples(&self) -> usize {
        self.all_example_tokens.len()
    }

    /// Distinct example tokens missing from the dictionary.
    pub fn words_in_examples_not_in_dictionary(&self) -> usize {
        self.missing_tokens.len()
    }

    /// Percentage of distinct example tokens that are dictionary words.
    ///
    /// A language with no example tokens is fully covered (100.0).
    pub fn coverage_percent(&self) -> f64 {
        let unique = self.unique_words_in_examples();
        if unique == 0 {
            return 100.0;
        }
        let known = unique - self.words_in_examples_not_in_dictionary();
        round1(known as f64 / unique as f64 * 100.0)
    }
}

/// Result of [`compute_statistics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// Corpus-wide totals.
    pub overall: OverallReport,
    /// One report per language code, in first-seen order.
    pub by_language: Vec<LanguageReport>,
}

impl StatisticsReport {
    /// Look up the report for a language code.
    pub fn language(&self, code: &str) -> Option<&LanguageReport> {
        self.by_language.iter().find(|r| r.language_code == code)
    }

    /// Condense into the response shape served to the statistics page,
    /// truncating the `top*` lists to `top_n` items.
    pub fn summarize(&self, top_n: usize) -> StatisticsSummary {
        StatisticsSummary {
            overall: self.overall.clone(),
            by_language: self
                .by_language
                .iter()
                .map(|report| LanguageSummary::from_report(report, top_n))
                .collect(),
        }
    }
}

/// Condensed statistics, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Corpus-wide totals.
    pub overall: OverallReport,
    /// One summary per language code, in first-seen order.
    pub by_language: Vec<LanguageSummary>,
}

/// Condensed per-language statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    /// The language code.
    pub language_code: String,
    /// Entries tagged with this language.
    pub total_dictionary_words: usize,
    /// Entries without example text.
    pub words_without_examples: usize,
    /// Distinct dictionary words used in examples.
    pub unique_dictionary_words_in_examples: usize,
    /// Distinct tokens used in examples.
    pub unique_words_in_examples: usize,
    /// Distinct example tokens missing from the dictionary.
    pub words_in_examples_not_in_dictionary: usize,
    /// Share of distinct example tokens that are dictionary words.
    pub coverage_percent: f64,
    /// Most frequent dictionary words in examples.
    pub top_dictionary_words: Vec<WordCount>,
    /// Most frequent example tokens.
    pub top_example_words: Vec<WordCount>,
    /// Most frequent missing tokens.
    pub top_missing_words: Vec<WordCount>,
    /// Every missing token.
    pub all_missing_words: Vec<WordCount>,
}

impl LanguageSummary {
    fn from_report(report: &LanguageReport, top_n: usize) -> Self {
        let top = |list: &[WordCount]| list.iter().take(top_n).cloned().collect::<Vec<_>>();
        Self {
            language_code: report.language_code.clone(),
            total_dictionary_words: report.total_dictionary_words,
            words_without_examples: report.words_without_examples,
            unique_dictionary_words_in_examples: report.unique_dictionary_words_in_examples(),
            unique_words_in_examples: report.unique_words_in_examples(),
            words_in_examples_not_in_dictionary: report.words_in_examples_not_in_dictionary(),
            coverage_percent: report.coverage_percent(),
            top_dictionary_words: top(&report.dictionary_tokens_in_examples),
            top_example_words: top(&report.all_example_tokens),
            top_missing_words: top(&report.missing_tokens),
            all_missing_words: report.missing_tokens.clone(),
        }
    }
}

/// Missing words of one language, packaged for hand-off to lexicographers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingWordsExport {
    /// The language code.
    pub language_code: String,
    /// Number of distinct missing words.
    pub total_missing_words: usize,
    /// What the list contains.
    pub description: String,
    /// Missing words, most frequent first.
    pub words: Vec<WordCount>,
}

impl MissingWordsExport {
    /// Build the export for one language.
    pub fn from_report(report: &LanguageReport) -> Self {
        Self {
            language_code: report.language_code.clone(),
            total_missing_words: report.missing_tokens.len(),
            description: "Words that appear in examples but are not yet in the dictionary"
                .to_string(),
            words: report.missing_tokens.clone(),
        }
    }
}

/// Count every headword token across all entries and languages.
pub fn dictionary_index(entries: &[DictionaryEntry]) -> IndexMap<String, usize> {
    let mut index: IndexMap<String, usize> = IndexMap::new();
    for entry in entries {
        for token in text::tokenize(entry.headword.trim()) {
            *index.entry(token).or_insert(0) += 1;
        }
    }
    index
}

/// Per-language counters while scanning examples.
#[derive(Default)]
struct LanguageTally {
    total_dictionary_words: usize,
    words_without_examples: usize,
    dictionary_tokens: IndexMap<String, usize>,
    all_tokens: IndexMap<String, usize>,
    missing_tokens: IndexMap<String, usize>,
}

impl LanguageTally {
    fn record(&mut self, token: &str, known: bool) {
        bump(&mut self.all_tokens, token);
        if known {
            bump(&mut self.dictionary_tokens, token);
        } else {
            bump(&mut self.missing_tokens, token);
        }
    }

    fn finish(self, language_code: String) -> LanguageReport {
        LanguageReport {
            language_code,
            total_dictionary_words: self.total_dictionary_words,
            words_without_examples: self.words_without_examples,
            dictionary_tokens_in_examples: sorted_by_count(self.dictionary_tokens),
            all_example_tokens: sorted_by_count(self.all_tokens),
            missing_tokens: sorted_by_count(self.missing_tokens),
        }
    }
}

fn bump(counts: &mut IndexMap<String, usize>, token: &str) {
    if let Some(count) = counts.get_mut(token) {
        *count += 1;
    } else {
        counts.insert(token.to_string(), 1);
    }
}

/// Descending by count; `sort_by` is stable, so ties keep insertion order.
fn sorted_by_count(counts: IndexMap<String, usize>) -> Vec<WordCount> {
    let mut list: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    list.sort_by(|a, b| b.count.cmp(&a.count));
    list
}

/// Compute per-language example coverage for a snapshot of the dictionary.
///
/// Pure and deterministic: the entries are only read, and every map lives
/// for the duration of this call.
#[tracing::instrument(skip_all, fields(entries = entries.len()))]
pub fn compute_statistics(entries: &[DictionaryEntry]) -> StatisticsReport {
    let index = dictionary_index(entries);
    let mut tallies: IndexMap<String, LanguageTally> = IndexMap::new();

    for entry in entries {
        let codes = entry.distinct_languages();
        if codes.is_empty() {
            continue;
        }

        let tokens = match entry.example.as_deref() {
            Some(example) if entry.has_example() => text::example_tokens(example),
            _ => Vec::new(),
        };

        for code in codes {
            let tally = tallies.entry(code.to_string()).or_default();
            tally.total_dictionary_words += 1;
            if !entry.has_example() {
                tally.words_without_examples += 1;
            }
            for token in &tokens {
                tally.record(token, index.contains_key(token.as_str()));
            }
        }
    }

    let overall = OverallReport {
        total_words: entries.len(),
        total_languages: tallies.len(),
        unique_dictionary_words: index.len(),
    };
    let by_language: Vec<LanguageReport> = tallies
        .into_iter()
        .map(|(code, tally)| tally.finish(code))
        .collect();

    tracing::debug!(
        total_words = overall.total_words,
        total_languages = overall.total_languages,
        unique_dictionary_words = overall.unique_dictionary_words,
        "statistics computed"
    );

    StatisticsReport {
        overall,
        by_language,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
