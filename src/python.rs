//! Python bindings for conll_df
//!
//! Exposes `conll_df(path, ...)`, returning a dict of column name to list
//! that can be handed straight to `pandas.DataFrame`. Index levels come
//! first as `file` (when kept), `s` and `i`.

use pyo3::exceptions::PyIOError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::ConllDfError;
use crate::options::{ExtraFields, ReadOptions};
use crate::schema::{FILE_COLUMN, SENTENCE_COLUMN, SchemaVersion, TOKEN_COLUMN};
use crate::table::{Column, Table, Value};

/// Convert ConllDfError to Python exception
impl From<ConllDfError> for PyErr {
    fn from(err: ConllDfError) -> PyErr {
        match err {
            ConllDfError::Io { .. } => PyIOError::new_err(err.to_string()),
        }
    }
}

fn table_to_dict<'py>(py: Python<'py>, table: &Table) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    let index = table.index();

    if table.has_file_level() {
        let files: Vec<String> = index
            .iter()
            .map(|k| k.file.as_deref().unwrap_or("").to_string())
            .collect();
        dict.set_item(FILE_COLUMN, files)?;
    }
    let sentences: Vec<usize> = index.iter().map(|k| k.sentence).collect();
    dict.set_item(SENTENCE_COLUMN, sentences)?;
    let tokens: Vec<String> = index.iter().map(|k| k.token.to_string()).collect();
    dict.set_item(TOKEN_COLUMN, tokens)?;

    for (name, column) in table.columns() {
        match column {
            Column::Int(values) => dict.set_item(name, values.clone())?,
            _ => {
                let values: Vec<Option<String>> = (0..column.len())
                    .map(|row| match column.get(row) {
                        Value::Missing => None,
                        v => Some(v.to_string()),
                    })
                    .collect();
                dict.set_item(name, values)?;
            }
        }
    }
    Ok(dict)
}

/// Read a CoNLL-U file into a dict of columns.
///
/// Args:
///     path: File to read (`.gz` files are decompressed)
///     v2: True/False to force the UD v2/v1 schema, None to detect it
///     skip_morph: Keep packed morphology instead of expanding it
///     skip_meta: Ignore comment lines
///     add_gov: Add governor columns gw, gl, gp, gf
///     drop: Columns to remove (default: text, newdoc id)
///     file_index: Keep the file name in the index
///     categories: Dictionary-encode text columns (no effect on the lists returned)
///     extra_fields: Extra feature names, or None to discover them
///     drop_redundant: Remove columns with a single value
///
/// Example:
///     >>> import pandas as pd
///     >>> df = pd.DataFrame(conll_df("en_ewt-ud-dev.conllu", add_gov=True))
#[pyfunction(name = "conll_df")]
#[pyo3(signature = (
    path,
    v2=None,
    skip_morph=false,
    skip_meta=false,
    add_gov=false,
    drop=None,
    file_index=true,
    categories=true,
    extra_fields=None,
    drop_redundant=true
))]
#[allow(clippy::too_many_arguments)]
fn py_conll_df<'py>(
    py: Python<'py>,
    path: &str,
    v2: Option<bool>,
    skip_morph: bool,
    skip_meta: bool,
    add_gov: bool,
    drop: Option<Vec<String>>,
    file_index: bool,
    categories: bool,
    extra_fields: Option<Vec<String>>,
    drop_redundant: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let schema = match v2 {
        None => SchemaVersion::Auto,
        Some(true) => SchemaVersion::V2,
        Some(false) => SchemaVersion::V1,
    };
    let mut opts = ReadOptions::new()
        .with_schema(schema)
        .with_skip_morph(skip_morph)
        .with_skip_meta(skip_meta)
        .with_governors(add_gov)
        .with_file_index(file_index)
        .with_categories(categories)
        .with_drop_redundant(drop_redundant);
    if let Some(drop) = drop {
        opts = opts.with_drop(drop);
    }
    if let Some(fields) = extra_fields {
        opts = opts.with_extra_fields(ExtraFields::Explicit(fields));
    }

    let table = crate::reader::conll_df(path, &opts)?;
    table_to_dict(py, &table)
}

#[pymodule]
fn conll_df(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(py_conll_df, m)?)?;
    Ok(())
}
