//! Column-oriented token table
//!
//! A `Table` is an ordered set of named columns sharing one row index of
//! `RowKey`s. Columns hold text, integers, or dictionary-encoded
//! (categorical) text. Categorical columns intern their levels in a
//! `lasso::Rodeo`, so new levels can be added after construction.

use crate::error::TableError;
use crate::index::RowKey;
use crate::schema::{FILE_COLUMN, SENTENCE_COLUMN, TOKEN_COLUMN};
use lasso::{Rodeo, Spur};
use rustc_hash::FxHashSet;
use std::fmt;
use std::io::{self, Write};

/// A single cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value<'a> {
    Missing,
    Str(&'a str),
    Int(i64),
}

impl<'a> Value<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Dictionary-encoded text column
pub struct Categorical {
    levels: Rodeo<Spur>,
    codes: Vec<Option<Spur>>,
}

impl Categorical {
    pub fn new() -> Self {
        Self {
            levels: Rodeo::new(),
            codes: Vec::new(),
        }
    }

    /// Encode a sequence of optional strings
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut cat = Self::new();
        for value in values {
            cat.push(value);
        }
        cat
    }

    pub fn push(&mut self, value: Option<&str>) {
        let code = value.map(|v| self.levels.get_or_intern(v));
        self.codes.push(code);
    }

    /// Add a level without adding a row. Existing levels are left alone.
    pub fn add_level(&mut self, level: &str) {
        self.levels.get_or_intern(level);
    }

    pub fn has_level(&self, level: &str) -> bool {
        self.levels.contains(level)
    }

    /// Levels in the order they were first seen
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.levels.strings()
    }

    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.codes
            .get(row)
            .copied()
            .flatten()
            .map(|code| self.levels.resolve(&code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// An empty column with the same levels, in the same order
    fn with_levels_of(other: &Categorical) -> Self {
        let mut cat = Self::new();
        for level in other.levels() {
            cat.add_level(level);
        }
        cat
    }
}

impl Default for Categorical {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Categorical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Categorical")
            .field("levels", &self.levels().collect::<Vec<_>>())
            .field("values", &(0..self.len()).map(|r| self.get(r)).collect::<Vec<_>>())
            .finish()
    }
}

/// Column storage
#[derive(Debug)]
pub enum Column {
    Text(Vec<Option<String>>),
    Int(Vec<i64>),
    Categorical(Categorical),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Categorical(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize) -> Value<'_> {
        match self {
            Column::Text(v) => match v.get(row) {
                Some(Some(s)) => Value::Str(s),
                _ => Value::Missing,
            },
            Column::Int(v) => v.get(row).map_or(Value::Missing, |&n| Value::Int(n)),
            Column::Categorical(c) => c.get(row).map_or(Value::Missing, Value::Str),
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, Column::Categorical(_))
    }

    /// Number of distinct values, counting "missing" as one value
    pub fn n_unique(&self) -> usize {
        match self {
            Column::Int(v) => v.iter().collect::<FxHashSet<_>>().len(),
            _ => (0..self.len())
                .map(|row| self.get(row))
                .collect::<FxHashSet<_>>()
                .len(),
        }
    }

    pub fn has_missing(&self) -> bool {
        (0..self.len()).any(|row| self.get(row).is_missing())
    }

    /// Whether this column's values can be dictionary-encoded.
    ///
    /// Text can; integers stay integers. Categorical columns trivially can.
    pub fn can_categorize(&self) -> Result<(), &'static str> {
        match self {
            Column::Text(_) | Column::Categorical(_) => Ok(()),
            Column::Int(_) => Err("integer columns are not dictionary-encoded"),
        }
    }

    /// Replace missing cells with `fill`. Integer columns never have gaps.
    pub fn fill_missing(&mut self, fill: &str) {
        match self {
            Column::Text(v) => {
                for cell in v.iter_mut().filter(|c| c.is_none()) {
                    *cell = Some(fill.to_string());
                }
            }
            Column::Int(_) => {}
            Column::Categorical(c) => {
                if c.codes.iter().any(Option::is_none) {
                    let code = c.levels.get_or_intern(fill);
                    for cell in c.codes.iter_mut().filter(|cell| cell.is_none()) {
                        *cell = Some(code);
                    }
                }
            }
        }
    }

    /// New column holding the rows at `rows`, in that order
    pub fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Text(v) => Column::Text(rows.iter().map(|&r| v[r].clone()).collect()),
            Column::Int(v) => Column::Int(rows.iter().map(|&r| v[r]).collect()),
            Column::Categorical(c) => {
                let mut out = Categorical::with_levels_of(c);
                for &r in rows {
                    out.push(c.get(r));
                }
                Column::Categorical(out)
            }
        }
    }

    /// New column where each row copies the value at `rows[i]`, or `fallback`
    /// when there is no source row (or the source cell is missing).
    ///
    /// Categorical columns stay categorical, with `fallback` added as a level.
    pub fn gather(&self, rows: &[Option<usize>], fallback: &str) -> Column {
        match self {
            Column::Categorical(c) => {
                let mut out = Categorical::with_levels_of(c);
                out.add_level(fallback);
                for source in rows {
                    out.push(Some(source.and_then(|r| c.get(r)).unwrap_or(fallback)));
                }
                Column::Categorical(out)
            }
            _ => Column::Text(
                rows.iter()
                    .map(|source| {
                        let value = source.map_or(Value::Missing, |r| self.get(r));
                        Some(match value {
                            Value::Missing => fallback.to_string(),
                            v => v.to_string(),
                        })
                    })
                    .collect(),
            ),
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.len() == other.len()
            && (0..self.len()).all(|row| self.get(row) == other.get(row))
    }
}

/// Named columns over a shared row index
#[derive(Debug, Default, PartialEq)]
pub struct Table {
    index: Vec<RowKey>,
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Empty table (no columns) over the given rows
    pub fn new(index: Vec<RowKey>) -> Self {
        Self {
            index,
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[RowKey] {
        &self.index
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.position(name).map(|i| &mut self.columns[i])
    }

    /// Iterate over (name, column) pairs in order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Cell value, or `None` if there is no such column
    pub fn get(&self, row: usize, name: &str) -> Option<Value<'_>> {
        self.column(name).map(|c| c.get(row))
    }

    /// Add a column at the end, or replace one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Result<(), TableError> {
        let name = name.into();
        if column.len() != self.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.len(),
                found: column.len(),
            });
        }
        match self.position(&name) {
            Some(i) => self.columns[i] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Column> {
        let i = self.position(name)?;
        self.names.remove(i);
        Some(self.columns.remove(i))
    }

    /// Remove every listed column that exists; others are ignored
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.remove(name.as_ref());
        }
    }

    /// Keep only the rows at `rows`, in that order
    pub fn select_rows(&mut self, rows: &[usize]) {
        self.index = rows.iter().map(|&r| self.index[r].clone()).collect();
        for column in &mut self.columns {
            *column = column.take(rows);
        }
    }

    /// Forget which file each row came from
    pub fn drop_file_level(&mut self) {
        for key in &mut self.index {
            key.file = None;
        }
    }

    pub fn has_file_level(&self) -> bool {
        self.index.iter().any(|k| k.file.is_some())
    }

    pub fn n_unique(&self, name: &str) -> Option<usize> {
        self.column(name).map(Column::n_unique)
    }

    pub fn fill_missing(&mut self, fill: &str) {
        for column in &mut self.columns {
            column.fill_missing(fill);
        }
    }

    /// Convert a column to categorical storage.
    ///
    /// Fails without touching the column if its values cannot be encoded.
    pub fn categorize(&mut self, name: &str) -> Result<(), TableError> {
        let column = self
            .column_mut(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        column
            .can_categorize()
            .map_err(|reason| TableError::NotCategorizable {
                column: name.to_string(),
                reason,
            })?;
        if let Column::Text(values) = column {
            let cat = Categorical::from_values(values.iter().map(Option::as_deref));
            *column = Column::Categorical(cat);
        }
        Ok(())
    }

    /// Move the listed columns that exist to the front, in the given order.
    /// Everything else keeps its relative order.
    pub fn reorder<S: AsRef<str>>(&mut self, first: &[S]) {
        let mut names = Vec::with_capacity(self.names.len());
        let mut columns = Vec::with_capacity(self.columns.len());
        for name in first {
            if let Some(i) = self.position(name.as_ref()) {
                names.push(self.names.remove(i));
                columns.push(self.columns.remove(i));
            }
        }
        names.append(&mut self.names);
        columns.append(&mut self.columns);
        self.names = names;
        self.columns = columns;
    }

    /// Write the table as tab-separated text with a header row.
    ///
    /// Index levels come first (`file` only while it is part of the key).
    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        let with_file = self.has_file_level();
        let mut header: Vec<&str> = Vec::new();
        if with_file {
            header.push(FILE_COLUMN);
        }
        header.extend([SENTENCE_COLUMN, TOKEN_COLUMN]);
        header.extend(self.names.iter().map(String::as_str));
        writeln!(out, "{}", header.join("\t"))?;

        for (row, key) in self.index.iter().enumerate() {
            if with_file {
                write!(out, "{}\t", key.file.as_deref().unwrap_or(""))?;
            }
            write!(out, "{}\t{}", key.sentence, key.token)?;
            for column in &self.columns {
                write!(out, "\t{}", column.get(row))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TokenId;
    use std::sync::Arc;

    fn text(values: &[Option<&str>]) -> Column {
        Column::Text(values.iter().map(|v| v.map(str::to_string)).collect())
    }

    fn three_rows() -> Table {
        let file: Arc<str> = Arc::from("a.conllu");
        let index = (1..=3)
            .map(|i| RowKey::new(Some(file.clone()), 1, TokenId::Single(i)))
            .collect();
        let mut table = Table::new(index);
        table
            .insert("w", text(&[Some("the"), Some("dog"), Some("barks")]))
            .unwrap();
        table.insert("g", Column::Int(vec![2, 3, 0])).unwrap();
        table
            .insert("x", text(&[Some("DET"), None, Some("DET")]))
            .unwrap();
        table
    }

    #[test]
    fn test_insert_and_get() {
        let table = three_rows();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), ["w", "g", "x"]);
        assert_eq!(table.get(1, "w"), Some(Value::Str("dog")));
        assert_eq!(table.get(2, "g"), Some(Value::Int(0)));
        assert_eq!(table.get(1, "x"), Some(Value::Missing));
        assert_eq!(table.get(0, "nope"), None);
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut table = three_rows();
        let err = table.insert("bad", Column::Int(vec![1])).unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "bad".into(),
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn test_drop_ignores_missing_columns() {
        let mut table = three_rows();
        table.drop_columns(&["x", "not-there"]);
        assert_eq!(table.column_names(), ["w", "g"]);
    }

    #[test]
    fn test_n_unique_counts_missing() {
        let table = three_rows();
        assert_eq!(table.n_unique("w"), Some(3));
        assert_eq!(table.n_unique("x"), Some(2));
        assert_eq!(table.n_unique("none"), None);
    }

    #[test]
    fn test_fill_missing() {
        let mut table = three_rows();
        table.fill_missing("_");
        assert_eq!(table.get(1, "x"), Some(Value::Str("_")));
        assert!(!table.column("x").unwrap().has_missing());
    }

    #[test]
    fn test_categorize() {
        let mut table = three_rows();
        table.categorize("x").unwrap();
        let col = table.column("x").unwrap();
        assert!(col.is_categorical());
        assert_eq!(col.get(0), Value::Str("DET"));
        assert_eq!(col.get(1), Value::Missing);
        match col {
            Column::Categorical(c) => assert_eq!(c.n_levels(), 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_categorize_rejects_integers() {
        let mut table = three_rows();
        let err = table.categorize("g").unwrap_err();
        assert!(matches!(err, TableError::NotCategorizable { .. }));
        assert!(matches!(table.column("g"), Some(Column::Int(_))));
        assert_eq!(
            table.categorize("zzz"),
            Err(TableError::UnknownColumn("zzz".into()))
        );
    }

    #[test]
    fn test_categorical_fill_adds_level() {
        let mut col = Column::Categorical(Categorical::from_values([Some("a"), None]));
        col.fill_missing("_");
        assert_eq!(col.get(1), Value::Str("_"));
    }

    #[test]
    fn test_gather_with_fallback() {
        let col = text(&[Some("the"), Some("dog")]);
        let out = col.gather(&[Some(1), None], "ROOT");
        assert_eq!(out.get(0), Value::Str("dog"));
        assert_eq!(out.get(1), Value::Str("ROOT"));
        assert!(!out.is_categorical());
    }

    #[test]
    fn test_gather_categorical_adds_root_level() {
        let col = Column::Categorical(Categorical::from_values([Some("the"), Some("dog")]));
        let out = col.gather(&[Some(0), None], "ROOT");
        match &out {
            Column::Categorical(c) => {
                assert!(c.has_level("ROOT"));
                assert_eq!(c.levels().collect::<Vec<_>>(), vec!["the", "dog", "ROOT"]);
            }
            _ => panic!("expected categorical"),
        }
        assert_eq!(out.get(1), Value::Str("ROOT"));
    }

    #[test]
    fn test_select_rows() {
        let mut table = three_rows();
        table.categorize("w").unwrap();
        table.select_rows(&[2, 0]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.index()[0].token, TokenId::Single(3));
        assert_eq!(table.get(0, "w"), Some(Value::Str("barks")));
        assert_eq!(table.get(1, "g"), Some(Value::Int(2)));
    }

    #[test]
    fn test_reorder() {
        let mut table = three_rows();
        table.reorder(&["x", "missing", "w"]);
        assert_eq!(table.column_names(), ["x", "w", "g"]);
    }

    #[test]
    fn test_equality_ignores_encoding_order() {
        let a = Column::Categorical(Categorical::from_values([Some("b"), Some("a")]));
        let mut cat = Categorical::new();
        cat.add_level("a");
        cat.push(Some("b"));
        cat.push(Some("a"));
        assert_eq!(a, Column::Categorical(cat));
        assert_ne!(a, text(&[Some("b"), Some("a")]));
    }

    #[test]
    fn test_write_tsv() {
        let mut table = three_rows();
        table.drop_columns(&["x"]);
        let mut out = Vec::new();
        table.write_tsv(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert_eq!(
            written,
            "file\ts\ti\tw\tg\n\
             a.conllu\t1\t1\tthe\t2\n\
             a.conllu\t1\t2\tdog\t3\n\
             a.conllu\t1\t3\tbarks\t0\n"
        );

        table.drop_file_level();
        let mut out = Vec::new();
        table.write_tsv(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("s\ti\tw\tg\n"));
    }
}
