//! Governor (head) resolution
//!
//! Copies each token's head word, lemma, POS and function into `gw`, `gl`,
//! `gp` and `gf`. The head column is a foreign key into the token index of
//! the same sentence, so this is a self-join done through an explicit
//! `GovernorIndex`: one pass to build it, one pass to look up every row.
//! Tokens without a head row (root, dangling or unparseable heads) get
//! `ROOT` instead of disappearing.

use crate::bytes::parse_head;
use crate::index::GovernorIndex;
use crate::schema::HEAD_COLUMN;
use crate::table::{Table, Value};

/// Placeholder for tokens whose head is not a token
pub const ROOT: &str = "ROOT";

/// (source column, governor column)
pub const GOVERNOR_COLUMNS: [(&str, &str); 4] =
    [("w", "gw"), ("l", "gl"), ("p", "gp"), ("f", "gf")];

fn head_of(value: Value<'_>) -> i64 {
    match value {
        Value::Int(n) => n,
        Value::Str(s) => parse_head(s).unwrap_or(0),
        Value::Missing => 0,
    }
}

/// For every row, the row of its governor
pub fn governor_rows(table: &Table) -> Vec<Option<usize>> {
    let Some(heads) = table.column(HEAD_COLUMN) else {
        return vec![None; table.len()];
    };
    let index = GovernorIndex::build(table.index());
    table
        .index()
        .iter()
        .enumerate()
        .map(|(row, key)| index.governor_of(key, head_of(heads.get(row))))
        .collect()
}

/// Add the governor columns. Existing columns with the same names are replaced.
///
/// Without a head column there is nothing to resolve and the table is left
/// unchanged. Source columns that are absent are skipped.
pub fn add_governors(table: &mut Table) {
    if !table.contains(HEAD_COLUMN) {
        tracing::warn!("no head column, skipping governor resolution");
        return;
    }
    let rows = governor_rows(table);
    tracing::debug!(
        rows = rows.len(),
        roots = rows.iter().filter(|r| r.is_none()).count(),
        "resolved governors"
    );

    let mut added = Vec::with_capacity(GOVERNOR_COLUMNS.len());
    for (source, target) in GOVERNOR_COLUMNS {
        match table.column(source) {
            Some(column) => added.push((target, column.gather(&rows, ROOT))),
            None => tracing::debug!(source, "governor source column missing"),
        }
    }
    for (target, column) in added {
        if let Err(e) = table.insert(target, column) {
            tracing::warn!("{}", e);
        }
    }
}
