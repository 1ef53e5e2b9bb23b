//! Headword prefix search.
//!
//! A linear scan over the snapshot, case-insensitive and anchored at the
//! start of the headword. The query is matched literally.

use regex::RegexBuilder;

use crate::entry::DictionaryEntry;
use crate::error::{SearchError, SearchResult};

/// Entries whose headword starts with `prefix`, ignoring case, in input order.
#[tracing::instrument(skip(entries), fields(entries = entries.len()))]
pub fn search_prefix<'a>(
    entries: &'a [DictionaryEntry],
    prefix: &str,
) -> SearchResult<Vec<&'a DictionaryEntry>> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let pattern = RegexBuilder::new(&format!("^{}", regex::escape(prefix)))
        .case_insensitive(true)
        .build()
        .map_err(|e| SearchError::Pattern(e.to_string()))?;

    let matches: Vec<&DictionaryEntry> = entries
        .iter()
        .filter(|entry| pattern.is_match(&entry.headword))
        .collect();
    tracing::debug!(matches = matches.len(), "prefix search finished");
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<DictionaryEntry> {
        ["Muana", "musakana", "kumuana", "mu.ana", "nti"]
            .into_iter()
            .map(|w| DictionaryEntry::new(w, ""))
            .collect()
    }

    fn headwords<'a>(found: &[&'a DictionaryEntry]) -> Vec<&'a str> {
        found.iter().map(|e| e.headword.as_str()).collect()
    }

    #[test]
    fn matches_prefix_case_insensitively() {
        let entries = corpus();
        let found = search_prefix(&entries, "mu").unwrap();
        assert_eq!(headwords(&found), vec!["Muana", "musakana", "mu.ana"]);
    }

    #[test]
    fn does_not_match_inside_headword() {
        let entries = corpus();
        let found = search_prefix(&entries, "muana").unwrap();
        assert_eq!(headwords(&found), vec!["Muana"]);
    }

    #[test]
    fn query_is_literal() {
        let entries = corpus();
        let found = search_prefix(&entries, "mu.").unwrap();
        assert_eq!(headwords(&found), vec!["mu.ana"]);
        assert!(search_prefix(&entries, "(").unwrap().is_empty());
    }

    #[test]
    fn empty_query_is_rejected() {
        assert_eq!(search_prefix(&corpus(), "  "), Err(SearchError::EmptyQuery));
    }
}
