//! Token table construction from normalized lines
//!
//! Input lines look like `file\tsentence\t<10 CoNLL-U fields>`. The first
//! three fields become the row key; the rest become text columns named by
//! the schema. No type inference happens here: `_` and numbers alike stay
//! literal strings.

use crate::bytes::{split_fields, split_lines};
use crate::conllu::parse_id;
use crate::index::RowKey;
use crate::schema::SchemaVersion;
use crate::table::{Column, Table};
use std::sync::Arc;

/// Parse normalized token lines into a table keyed by (file, sentence, token).
///
/// Blank lines are skipped. Short lines leave their trailing columns
/// missing; extra fields are ignored.
pub fn build_table(text: &str, schema: SchemaVersion) -> Table {
    let names = &schema.columns()[1..];
    let mut index = Vec::new();
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut file: Option<Arc<str>> = None;

    for (line_num, line) in split_lines(text).enumerate() {
        if line.is_empty() {
            continue;
        }
        let mut fields = split_fields(line);

        // consecutive rows share one allocation for the file name
        let file_field = fields.next().unwrap_or_default();
        if file.as_deref() != Some(file_field) {
            file = Some(Arc::from(file_field));
        }
        let sentence = fields
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                tracing::trace!(line_num, "token line without a sentence index");
                0
            });
        let token = parse_id(fields.next().unwrap_or_default());
        index.push(RowKey::new(file.clone(), sentence, token));

        let mut found = 0;
        for (column, field) in columns.iter_mut().zip(fields.by_ref()) {
            column.push(Some(field.to_string()));
            found += 1;
        }
        if found < names.len() {
            tracing::warn!(
                line_num,
                expected = names.len() + 1,
                found = found + 1,
                "token line has too few fields"
            );
            for column in &mut columns[found..] {
                column.push(None);
            }
        } else if fields.next().is_some() {
            tracing::warn!(line_num, "token line has extra fields, ignoring them");
        }
    }

    let mut table = Table::new(index);
    for (name, values) in names.iter().zip(columns) {
        // every column was filled once per row
        if let Err(e) = table.insert(*name, Column::Text(values)) {
            tracing::warn!("{}", e);
        }
    }
    tracing::debug!(
        rows = table.len(),
        columns = table.n_columns(),
        "built token table"
    );
    table
}
