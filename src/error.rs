//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors from reading a treebank file
#[derive(Debug, Error)]
pub enum ConllDfError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from individual table operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no such column: {0}")]
    UnknownColumn(String),

    #[error("column {column} has {found} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column {column} cannot be categorized: {reason}")]
    NotCategorizable { column: String, reason: &'static str },
}
