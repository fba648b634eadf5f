//! Row keys and the head-index lookup
//!
//! Every row of a token table is identified by (file, sentence, token).
//! The file level is optional so it can be dropped from single-file results.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// CoNLL-U token ID: a plain word, a multiword range or an empty node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenId {
    Single(usize),
    Range(usize, usize),
    Decimal(usize, usize),
    /// Anything that is not a well-formed ID, kept verbatim
    Other(String),
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenId::Single(n) => write!(f, "{}", n),
            TokenId::Range(a, b) => write!(f, "{}-{}", a, b),
            TokenId::Decimal(a, b) => write!(f, "{}.{}", a, b),
            TokenId::Other(s) => f.write_str(s),
        }
    }
}

/// Composite row key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub file: Option<Arc<str>>,
    pub sentence: usize,
    pub token: TokenId,
}

impl RowKey {
    pub fn new(file: Option<Arc<str>>, sentence: usize, token: TokenId) -> Self {
        Self {
            file,
            sentence,
            token,
        }
    }
}

/// Map from (file, sentence, token index) to row position.
///
/// Only plain tokens are indexed; ranges and empty nodes can never be heads.
#[derive(Debug)]
pub struct GovernorIndex<'a> {
    rows: FxHashMap<(Option<&'a str>, usize, usize), usize>,
}

impl<'a> GovernorIndex<'a> {
    /// Build the index from a table's row keys. Duplicate keys keep the first row.
    pub fn build(keys: &'a [RowKey]) -> Self {
        let mut rows = FxHashMap::default();
        rows.reserve(keys.len());
        for (row, key) in keys.iter().enumerate() {
            if let TokenId::Single(n) = key.token {
                rows.entry((key.file.as_deref(), key.sentence, n))
                    .or_insert(row);
            }
        }
        Self { rows }
    }

    /// Row holding the governor of the token at `key`, if any.
    ///
    /// Root (`0`), negative and dangling heads all return `None`.
    pub fn governor_of(&self, key: &RowKey, head: i64) -> Option<usize> {
        let head = usize::try_from(head).ok().filter(|&h| h > 0)?;
        self.rows
            .get(&(key.file.as_deref(), key.sentence, head))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(file: &str, s: usize, token: TokenId) -> RowKey {
        RowKey::new(Some(Arc::from(file)), s, token)
    }

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId::Single(3).to_string(), "3");
        assert_eq!(TokenId::Range(1, 2).to_string(), "1-2");
        assert_eq!(TokenId::Decimal(2, 1).to_string(), "2.1");
        assert_eq!(TokenId::Other("x".into()).to_string(), "x");
    }

    #[test]
    fn test_governor_lookup() {
        let keys = vec![
            key("a", 1, TokenId::Single(1)),
            key("a", 1, TokenId::Single(2)),
            key("a", 2, TokenId::Single(1)),
            key("b", 1, TokenId::Single(1)),
        ];
        let index = GovernorIndex::build(&keys);

        assert_eq!(index.len(), 4);
        assert_eq!(index.governor_of(&keys[0], 2), Some(1));
        assert_eq!(index.governor_of(&keys[1], 1), Some(0));
        // scoped per sentence and per file
        assert_eq!(index.governor_of(&keys[2], 1), Some(2));
        assert_eq!(index.governor_of(&keys[3], 1), Some(3));
        assert_eq!(index.governor_of(&keys[2], 2), None);
    }

    #[test]
    fn test_root_and_dangling_heads() {
        let keys = vec![key("a", 1, TokenId::Single(1))];
        let index = GovernorIndex::build(&keys);

        assert_eq!(index.governor_of(&keys[0], 0), None);
        assert_eq!(index.governor_of(&keys[0], -1), None);
        assert_eq!(index.governor_of(&keys[0], 9), None);
    }

    #[test]
    fn test_ranges_are_not_indexed() {
        let keys = vec![
            key("a", 1, TokenId::Range(1, 2)),
            key("a", 1, TokenId::Decimal(1, 1)),
        ];
        let index = GovernorIndex::build(&keys);
        assert!(index.is_empty());
    }

    #[test]
    fn test_without_file_level() {
        let keys = vec![
            RowKey::new(None, 1, TokenId::Single(1)),
            RowKey::new(None, 1, TokenId::Single(2)),
        ];
        let index = GovernorIndex::build(&keys);
        assert_eq!(index.governor_of(&keys[0], 2), Some(1));
    }
}
