//! Morphological feature expansion
//!
//! The packed `m` (FEATS) and `o` (MISC) columns hold `Key=Value|Key=Value`
//! strings. Expansion runs in two passes:
//!
//! 1. Build the vocabulary: the baseline UD attributes, the extra names
//!    (given, or discovered in the `o` column), and `SpaceAfter`.
//! 2. For each token and each vocabulary name, pull that feature's value
//!    out of the token's combined feature string.
//!
//! The number of new columns is exactly the vocabulary size.

use crate::options::ExtraFields;
use crate::schema::{EXTRA_COLUMN, MORPH_ATTS, MORPH_COLUMN, SPACE_AFTER};
use crate::table::{Column, Table, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

/// A feature key at the start of the string or right after a `|`
static FEATURE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\|)([^=|]+)=").unwrap());

/// Feature names used in the "other" column, in first-seen order
pub fn discover_features(extra: &Column) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    for row in 0..extra.len() {
        let Some(text) = extra.get(row).as_str() else {
            continue;
        };
        for caps in FEATURE_KEY.captures_iter(text) {
            let name = &caps[1];
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Baseline attributes, then `extra`, then `SpaceAfter`; duplicates removed
pub fn vocabulary(extra: &[String]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    MORPH_ATTS
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
        .chain(std::iter::once(SPACE_AFTER))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Join the "other" and morphology strings, trimming `|` and `_` from both ends
pub fn combine(extra: &str, morph: &str) -> String {
    let joined = format!("{}|{}", extra, morph);
    joined.trim_matches(['|', '_']).to_string()
}

/// Value of feature `name` in a combined string.
///
/// Names compare case-insensitively; the first occurrence wins. A key with
/// an empty value counts as absent.
///
/// The name must equal a whole key: `Type` does not match `PronType=Prs`.
pub fn extract<'a>(features: &'a str, name: &str) -> Option<&'a str> {
    features
        .split('|')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Expand the packed morphology columns into one column per feature.
///
/// Returns the names of the columns added, in order.
pub fn expand_morphology(table: &mut Table, extra_fields: &ExtraFields) -> Vec<String> {
    let discovered;
    let extra: &[String] = match extra_fields {
        ExtraFields::Explicit(names) => names,
        ExtraFields::Auto => {
            discovered = table
                .column(EXTRA_COLUMN)
                .map(discover_features)
                .unwrap_or_default();
            &discovered
        }
    };
    let vocab: Vec<String> = vocabulary(extra)
        .into_iter()
        .filter(|name| {
            let clash = table.contains(name);
            if clash {
                tracing::debug!(name = name.as_str(), "feature name clashes with a column");
            }
            !clash
        })
        .collect();
    tracing::debug!(features = vocab.len(), "morphology vocabulary");

    let text_of = |value: Value<'_>| value.as_str().map(str::to_string).unwrap_or_default();
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); vocab.len()];
    for row in 0..table.len() {
        let other = table.get(row, EXTRA_COLUMN).map(text_of).unwrap_or_default();
        let morph = table.get(row, MORPH_COLUMN).map(text_of).unwrap_or_default();
        let features = combine(&other, &morph);
        for (column, name) in columns.iter_mut().zip(&vocab) {
            column.push(extract(&features, name).map(str::to_string));
        }
    }

    for (name, values) in vocab.iter().zip(columns) {
        if let Err(e) = table.insert(name.as_str(), Column::Text(values)) {
            tracing::warn!("{}", e);
        }
    }
    vocab
}
