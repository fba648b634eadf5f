//! Final clean-up of a joined token table
//!
//! Steps run in a fixed order, each switched by `ReadOptions`:
//! column dropping, head coercion and gap filling, categorical encoding,
//! governor resolution, file-level removal, constant-column pruning and
//! column reordering.

use crate::bytes::parse_head;
use crate::governor::add_governors;
use crate::options::ReadOptions;
use crate::schema::{
    EXTRA_COLUMN, FILE_COLUMN, HEAD_COLUMN, MORPH_COLUMN, SENTENCE_COLUMN, SchemaVersion,
    TOKEN_COLUMN,
};
use crate::table::{Column, Table, Value};

/// Placeholder written into empty cells
pub const MISSING: &str = "_";

/// Columns never encoded as categories
const NOT_CATEGORICAL: [&str; 2] = [HEAD_COLUMN, "date"];

/// Run every enabled post-processing step.
///
/// `morph_expanded` says whether the packed morphology columns were
/// expanded; if not they are kept as the only morphological information.
pub fn postprocess(
    table: &mut Table,
    opts: &ReadOptions,
    schema: SchemaVersion,
    morph_expanded: bool,
) {
    drop_unwanted(table, &opts.drop, morph_expanded);
    coerce_heads(table);
    table.fill_missing(MISSING);
    if opts.categories {
        categorize_columns(table);
    }
    if opts.add_governors {
        add_governors(table);
    }
    if !opts.file_index {
        table.drop_file_level();
    }
    if opts.drop_redundant {
        let keep: &[&str] = if opts.add_governors {
            &[]
        } else {
            &[HEAD_COLUMN]
        };
        drop_redundant(table, keep);
    }
    table.reorder(schema.columns());
}

/// Remove internal columns, expanded packed columns, and `extra`
pub fn drop_unwanted(table: &mut Table, extra: &[String], morph_expanded: bool) {
    table.drop_columns(&["sent_id", SENTENCE_COLUMN, TOKEN_COLUMN, FILE_COLUMN]);
    if morph_expanded {
        table.drop_columns(&[EXTRA_COLUMN, MORPH_COLUMN]);
    }
    table.drop_columns(extra);
}

/// Turn the head column into integers.
///
/// Missing heads become 0, and so does anything unparseable after
/// placeholder underscores are read as zeros.
pub fn coerce_heads(table: &mut Table) {
    let Some(column) = table.column_mut(HEAD_COLUMN) else {
        return;
    };
    if let Column::Int(_) = column {
        return;
    }
    let mut bad = 0usize;
    let heads: Vec<i64> = (0..column.len())
        .map(|row| match column.get(row) {
            Value::Int(n) => n,
            Value::Missing => 0,
            Value::Str(s) => parse_head(s).unwrap_or_else(|| {
                bad += 1;
                0
            }),
        })
        .collect();
    if bad > 0 {
        tracing::trace!(bad, "unparseable head indices set to 0");
    }
    *column = Column::Int(heads);
}

/// Encode every eligible column as categorical; columns that cannot be
/// encoded are left as they are
pub fn categorize_columns(table: &mut Table) {
    let names: Vec<String> = table
        .column_names()
        .iter()
        .filter(|name| !NOT_CATEGORICAL.contains(&name.as_str()))
        .cloned()
        .collect();
    for name in names {
        if let Err(e) = table.categorize(&name) {
            tracing::trace!("{}", e);
        }
    }
}

/// Drop every column with a single distinct value, except those in `keep`
pub fn drop_redundant(table: &mut Table, keep: &[&str]) {
    let constant: Vec<String> = table
        .columns()
        .filter(|(name, column)| !keep.contains(name) && column.n_unique() == 1)
        .map(|(name, _)| name.to_string())
        .collect();
    tracing::debug!(columns = constant.len(), "dropping constant columns");
    table.drop_columns(&constant);
}
