//! Dictionary hygiene jobs.
//!
//! Each job is split into a *plan* (a pure description of what would change)
//! and an *apply* step that returns a rewritten copy of the entries. Callers
//! show the plan by default and only persist the applied result on request.
//! Every job is idempotent: planning again over an applied result yields an
//! empty plan.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entry::DictionaryEntry;

// -- Full-stop duplicates ---------------------------------------------------

/// An entry that duplicates another except for a trailing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DuplicateRemoval {
    /// Position of the entry to remove.
    pub removed_index: usize,
    /// Headword of the entry to remove (ends with `.`).
    pub removed_headword: String,
    /// Position of the entry that stays.
    pub kept_index: usize,
    /// Headword of the entry that stays.
    pub kept_headword: String,
    /// Meaning shared by both entries.
    pub meaning: String,
}

/// A period-terminated headword with no clean twin; left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnmatchedEntry {
    /// Position of the entry.
    pub index: usize,
    /// Its headword.
    pub headword: String,
}

/// Planned removal of full-stop duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DuplicatePlan {
    /// Entries to remove.
    pub removals: Vec<DuplicateRemoval>,
    /// Period-terminated entries that stay because nothing matches them.
    pub kept_unmatched: Vec<UnmatchedEntry>,
}

impl DuplicatePlan {
    /// Whether the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    /// Return the entries without the planned removals.
    pub fn apply(&self, entries: &[DictionaryEntry]) -> Vec<DictionaryEntry> {
        let mut removed = vec![false; entries.len()];
        for removal in &self.removals {
            if let Some(slot) = removed.get_mut(removal.removed_index) {
                *slot = true;
            }
        }
        entries
            .iter()
            .zip(removed)
            .filter(|(_, gone)| !gone)
            .map(|(entry, _)| entry.clone())
            .collect()
    }
}

/// Find entries whose headword is another entry's headword plus a trailing
/// `.`, with an identical meaning.
#[tracing::instrument(skip_all, fields(entries = entries.len()))]
pub fn plan_fullstop_cleanup(entries: &[DictionaryEntry]) -> DuplicatePlan {
    let mut by_key: HashMap<(&str, &str), usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        by_key
            .entry((entry.headword.as_str(), entry.meaning.as_str()))
            .or_insert(index);
    }

    let mut plan = DuplicatePlan::default();
    for (index, entry) in entries.iter().enumerate() {
        let Some(clean) = entry.headword.strip_suffix('.') else {
            continue;
        };

        match by_key.get(&(clean, entry.meaning.as_str())) {
            Some(&kept_index) => plan.removals.push(DuplicateRemoval {
                removed_index: index,
                removed_headword: entry.headword.clone(),
                kept_index,
                kept_headword: entries[kept_index].headword.clone(),
                meaning: entry.meaning.clone(),
            }),
            None => plan.kept_unmatched.push(UnmatchedEntry {
                index,
                headword: entry.headword.clone(),
            }),
        }
    }

    tracing::debug!(
        removals = plan.removals.len(),
        unmatched = plan.kept_unmatched.len(),
        "full-stop cleanup planned"
    );
    plan
}

// -- Language codes ---------------------------------------------------------

/// Rewrite rule for free-text language names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageAlias {
    /// Case-insensitive substring to look for (e.g. `sundi`).
    pub pattern: String,
    /// Code that replaces any matching language (e.g. `H131`).
    pub code: String,
}

impl LanguageAlias {
    /// Create a rule.
    pub fn new(pattern: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            code: code.into(),
        }
    }
}

/// The rules applied when none are configured.
pub fn default_language_aliases() -> Vec<LanguageAlias> {
    vec![
        LanguageAlias::new("sundi", "H131"),
        LanguageAlias::new("ibinda", "H16d"),
        LanguageAlias::new("kikongo", "H16d"),
        LanguageAlias::new("vili", "H12"),
    ]
}

/// One entry whose language list changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageFix {
    /// Position of the entry.
    pub index: usize,
    /// Its headword.
    pub headword: String,
    /// Language list before.
    pub before: Vec<String>,
    /// Language list after.
    pub after: Vec<String>,
}

/// How often a rule fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AliasHits {
    /// The rule's pattern.
    pub pattern: String,
    /// The rule's target code.
    pub code: String,
    /// Number of language values rewritten by this rule.
    pub hits: usize,
}

/// Planned language-code rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageFixPlan {
    /// Entries whose languages change.
    pub fixes: Vec<LanguageFix>,
    /// Per-rule counts, in rule order.
    pub hits: Vec<AliasHits>,
}

impl LanguageFixPlan {
    /// Whether the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Return the entries with the planned language lists.
    pub fn apply(&self, entries: &[DictionaryEntry]) -> Vec<DictionaryEntry> {
        let mut updated = entries.to_vec();
        for fix in &self.fixes {
            if let Some(entry) = updated.get_mut(fix.index) {
                entry.languages.clone_from(&fix.after);
            }
        }
        updated
    }
}

/// Plan rewrites of language names to their codes.
///
/// The first rule whose pattern occurs in a language value replaces it.
/// Values already equal to the target code are left alone, and each
/// rewritten list is de-duplicated in first-seen order.
#[tracing::instrument(skip_all, fields(entries = entries.len(), rules = aliases.len()))]
pub fn plan_language_fixes(
    entries: &[DictionaryEntry],
    aliases: &[LanguageAlias],
) -> LanguageFixPlan {
    let patterns: Vec<String> = aliases.iter().map(|a| a.pattern.to_lowercase()).collect();
    let mut hits = vec![0usize; aliases.len()];
    let mut fixes = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let mut after: Vec<String> = Vec::with_capacity(entry.languages.len());
        for language in &entry.languages {
            let lowered = language.to_lowercase();
            let rule = patterns
                .iter()
                .position(|pattern| !pattern.is_empty() && lowered.contains(pattern.as_str()));

            let code = match rule {
                Some(rule) if aliases[rule].code != *language => {
                    hits[rule] += 1;
                    aliases[rule].code.clone()
                }
                _ => language.clone(),
            };
            if !after.contains(&code) {
                after.push(code);
            }
        }

        if after != entry.languages {
            fixes.push(LanguageFix {
                index,
                headword: entry.headword.clone(),
                before: entry.languages.clone(),
                after,
            });
        }
    }

    tracing::debug!(fixes = fixes.len(), "language fixes planned");
    LanguageFixPlan {
        fixes,
        hits: aliases
            .iter()
            .zip(hits)
            .map(|(alias, hits)| AliasHits {
                pattern: alias.pattern.clone(),
                code: alias.code.clone(),
                hits,
            })
            .collect(),
    }
}
