//! Byte-level scanning helpers
//!
//! Block, line and field boundaries are located with `memchr`; numbers are
//! parsed straight from the bytes with `atoi`.

use atoi::FromRadix10SignedChecked;
use memchr::memmem;

/// Split `text` on every non-overlapping `"\n\n"`.
///
/// Runs of three or more newlines leave the remainder at the start of the
/// following block, and leading/trailing separators produce empty blocks.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    for pos in memmem::find_iter(text.as_bytes(), b"\n\n") {
        // find_iter yields non-overlapping matches, so pos >= start
        blocks.push(&text[start..pos]);
        start = pos + 2;
    }
    blocks.push(&text[start..]);
    blocks
}

/// Iterate over the lines of `text`, dropping a trailing `\r`
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut ends = memchr::memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len()));
    std::iter::from_fn(move || {
        let end = ends.next()?;
        let line = &text[start..end];
        start = end + 1;
        // trailing newline produces no extra line
        if end == bytes.len() && line.is_empty() {
            return None;
        }
        Some(line.strip_suffix('\r').unwrap_or(line))
    })
}

/// Iterate over tab-separated fields
pub fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    let bytes = line.as_bytes();
    let mut start = 0;
    let mut done = false;
    let mut tabs = memchr::memchr_iter(b'\t', bytes);
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match tabs.next() {
            Some(pos) => {
                let field = &line[start..pos];
                start = pos + 1;
                Some(field)
            }
            None => {
                done = true;
                Some(&line[start..])
            }
        }
    })
}

// Divide a string into two at the first occurrence of delim
#[inline]
pub fn split_once_str<'a>(s: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let pos = memmem::find(s.as_bytes(), delim.as_bytes())?;
    Some((&s[..pos], &s[pos + delim.len()..]))
}

/// Parse a head index.
///
/// Placeholder underscores count as zeros; anything else that is not a
/// complete integer yields `None`.
pub fn parse_head(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let bytes: Vec<u8> = s
        .bytes()
        .map(|b| if b == b'_' { b'0' } else { b })
        .collect();
    match i64::from_radix_10_signed_checked(&bytes) {
        (Some(n), used) if used == bytes.len() => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== split_blocks Tests =====

    #[test]
    fn test_split_blocks() {
        assert_eq!(split_blocks("a\nb\n\nc"), vec!["a\nb", "c"]);
        assert_eq!(split_blocks("a"), vec!["a"]);
        assert_eq!(split_blocks(""), vec![""]);
    }

    #[test]
    fn test_split_blocks_long_runs() {
        // Three newlines: the third one starts the next block
        assert_eq!(split_blocks("a\n\n\nb"), vec!["a", "\nb"]);
        // Four newlines: an empty block in between
        assert_eq!(split_blocks("a\n\n\n\nb"), vec!["a", "", "b"]);
    }

    // ===== split_lines / split_fields Tests =====

    #[test]
    fn test_split_lines() {
        let lines: Vec<_> = split_lines("one\ntwo\r\n\nthree\n").collect();
        assert_eq!(lines, vec!["one", "two", "", "three"]);
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("x").collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_split_fields() {
        let fields: Vec<_> = split_fields("1\tdog\t\t_").collect();
        assert_eq!(fields, vec!["1", "dog", "", "_"]);
        assert_eq!(split_fields("").collect::<Vec<_>>(), vec![""]);
    }

    // ===== split_once_str Tests =====

    #[test]
    fn test_split_once_str() {
        assert_eq!(split_once_str("key = value", " = "), Some(("key", "value")));
        assert_eq!(split_once_str("key=value", " = "), None);
        assert_eq!(split_once_str("a=b=c", "="), Some(("a", "b=c")));
        assert_eq!(split_once_str("key=", "="), Some(("key", "")));
    }

    // ===== parse_head Tests =====

    #[test]
    fn test_parse_head_valid() {
        assert_eq!(parse_head("0"), Some(0));
        assert_eq!(parse_head("42"), Some(42));
        assert_eq!(parse_head(" 7 "), Some(7));
        assert_eq!(parse_head("_"), Some(0));
    }

    #[test]
    fn test_parse_head_invalid() {
        assert_eq!(parse_head(""), None);
        assert_eq!(parse_head("abc"), None);
        assert_eq!(parse_head("1-2"), None);
        assert_eq!(parse_head("3.1"), None);
        assert_eq!(parse_head("99999999999999999999"), None);
    }
}
