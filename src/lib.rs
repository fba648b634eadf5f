//! conll_df: CoNLL-U treebanks as token tables
//!
//! Reads a CoNLL-U file into a column-oriented table with one row per token:
//! word, lemma, POS, head and function columns, one column per morphological
//! feature, sentence metadata replicated onto every token, and optionally
//! the head token's attributes (`gw`, `gl`, `gp`, `gf`).

// Pipeline stages, in the order they run
pub mod conllu; // Sentence splitting and normalization
pub mod builder; // Normalized lines to table
pub mod morph; // Morphological feature expansion
pub mod metadata; // Sentence metadata and the metadata join
pub mod governor; // Head token resolution
pub mod postprocess; // Dropping, coercion, encoding, pruning
pub mod reader; // End-to-end entry points

// Supporting modules
pub mod bytes; // Byte-level scanning helpers
pub mod error;
pub mod index; // Row keys and head lookup
pub mod options; // Per-call configuration
pub mod schema; // v1/v2 column layouts and the feature vocabulary
pub mod table; // Column storage with categorical encoding

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use error::{ConllDfError, TableError};
pub use index::{RowKey, TokenId};
pub use options::{ExtraFields, ReadOptions};
pub use reader::{conll_df, conll_df_from_str};
pub use schema::SchemaVersion;
pub use table::{Categorical, Column, Table, Value};
