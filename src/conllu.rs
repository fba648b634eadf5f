//! CoNLL-U sentence splitting and normalization
//!
//! Raw file text is cut into sentence blocks on blank lines. Each block is
//! then normalized: comment lines become sentence metadata, and token lines
//! are prefixed with the file name and the 1-based sentence index so that
//! all sentences can be parsed as one tab-separated table.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::bytes::{split_blocks, split_lines, split_once_str};
use crate::index::TokenId;
use crate::metadata::SentenceMeta;

/// One normalized sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSentence {
    /// Token lines, each prefixed with `file\tsentence\t`, joined by `\n`
    pub tokens: String,
    pub metadata: SentenceMeta,
}

/// Split trimmed file text into sentence blocks.
///
/// Blocks are numbered from 1 by their position in the returned vector.
/// Empty blocks are kept; they normalize to no tokens.
pub fn split_sentences(text: &str) -> Vec<&str> {
    split_blocks(text)
}

/// Normalize one sentence block.
///
/// `base` is copied and then updated by the block's comments, so later
/// comments override both earlier ones and the per-file seed values.
/// With `skip_meta`, comment lines are discarded and `base` is returned as is.
pub fn normalize_sentence(
    block: &str,
    file_name: &str,
    base: &SentenceMeta,
    delimiter: &str,
    index: usize,
    skip_meta: bool,
) -> NormalizedSentence {
    let mut metadata = base.clone();
    let mut tokens = String::with_capacity(block.len() + 16);

    for line in split_lines(block) {
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if !skip_meta {
                parse_comment(line, delimiter, &mut metadata);
            }
            continue;
        }
        if !tokens.is_empty() {
            tokens.push('\n');
        }
        tokens.push_str(file_name);
        tokens.push('\t');
        tokens.push_str(&index.to_string());
        tokens.push('\t');
        tokens.push_str(line);
    }

    NormalizedSentence { tokens, metadata }
}

/// Parse a comment line (starts with #) into `metadata`.
///
/// The configured delimiter is tried first, then its bare form, so
/// `# key = value` and `# key=value` both work under either schema.
/// Lines with no delimiter at all (e.g. `# newpar`) are ignored.
pub fn parse_comment(line: &str, delimiter: &str, metadata: &mut SentenceMeta) {
    let comment = line.trim_start_matches(['#', ' ']);

    let pair = split_once_str(comment, delimiter).or_else(|| {
        let bare = delimiter.trim();
        if bare.is_empty() || bare == delimiter {
            None
        } else {
            split_once_str(comment, bare)
        }
    });

    match pair {
        Some((key, value)) => metadata.insert(key.trim().to_lowercase(), value.trim().to_string()),
        None => tracing::trace!(comment, "comment without a key/value delimiter"),
    }
}

/// Parse ID field (can be integer, range, or decimal).
///
/// Malformed IDs are kept verbatim rather than rejected.
pub fn parse_id(s: &str) -> TokenId {
    let parse_pair = |sep: char| -> Option<(usize, usize)> {
        let (a, b) = s.split_once(sep)?;
        Some((a.parse().ok()?, b.parse().ok()?))
    };

    if let Ok(id) = s.parse() {
        TokenId::Single(id)
    } else if let Some((start, end)) = parse_pair('-') {
        TokenId::Range(start, end)
    } else if let Some((main, sub)) = parse_pair('.') {
        TokenId::Decimal(main, sub)
    } else {
        TokenId::Other(s.to_string())
    }
}
