//! Sentence metadata and the metadata join
//!
//! Comment lines give each sentence an ordered key/value mapping. Joining
//! turns every key seen anywhere in the file into a column, replicated
//! across all tokens of each sentence.

use crate::table::{Column, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[12][0-9][0-9][0-9]").unwrap());

/// Metadata for one sentence. Keys keep their first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceMeta {
    entries: Vec<(String, String)>,
}

impl SentenceMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`; an existing key keeps its position but takes the new value
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Metadata every sentence of a file starts with.
///
/// A four-digit year (1000-2999) in the file name becomes `year`.
pub fn file_seed(file_name: &str) -> SentenceMeta {
    let mut seed = SentenceMeta::new();
    if let Some(year) = YEAR.find(file_name) {
        seed.insert("year".to_string(), year.as_str().to_string());
    }
    seed
}

/// Inner-join per-sentence metadata onto the token table.
///
/// `metadata[k]` belongs to sentence `k + 1`. Tokens whose sentence has no
/// entry are dropped. Metadata columns are placed before the token columns;
/// a key that clashes with an existing column is skipped.
pub fn join_metadata(table: &mut Table, metadata: &[SentenceMeta]) {
    let sentence_of = |s: usize| s.checked_sub(1).and_then(|k| metadata.get(k));

    let keep: Vec<usize> = table
        .index()
        .iter()
        .enumerate()
        .filter(|(_, key)| sentence_of(key.sentence).is_some())
        .map(|(row, _)| row)
        .collect();
    if keep.len() != table.len() {
        tracing::debug!(
            dropped = table.len() - keep.len(),
            "tokens without sentence metadata"
        );
        table.select_rows(&keep);
    }

    let mut seen = FxHashSet::default();
    let mut keys: Vec<&str> = Vec::new();
    for meta in metadata {
        for (key, _) in meta.iter() {
            if seen.insert(key) {
                keys.push(key);
            }
        }
    }

    let mut added = Vec::with_capacity(keys.len());
    for key in keys {
        if table.contains(key) {
            tracing::debug!(key, "metadata key clashes with a token column");
            continue;
        }
        let values = table
            .index()
            .iter()
            .map(|row| {
                sentence_of(row.sentence)
                    .and_then(|meta| meta.get(key))
                    .map(str::to_string)
            })
            .collect();
        // one value per row by construction
        if table.insert(key, Column::Text(values)).is_ok() {
            added.push(key);
        }
    }
    tracing::debug!(columns = added.len(), "joined sentence metadata");
    table.reorder(&added);
}
