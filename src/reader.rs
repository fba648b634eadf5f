//! CoNLL-U file to token table
//!
//! The pipeline: split the text into sentences, normalize each one, parse
//! the normalized lines into a table, expand morphology, join sentence
//! metadata, and post-process.

use crate::builder::build_table;
use crate::conllu::{NormalizedSentence, normalize_sentence, split_sentences};
use crate::error::ConllDfError;
use crate::metadata::{SentenceMeta, file_seed, join_metadata};
use crate::morph::expand_morphology;
use crate::options::ReadOptions;
use crate::postprocess::postprocess;
use crate::table::Table;
use bstr::ByteSlice;
use flate2::read::MultiGzDecoder;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a CoNLL-U file (optionally gzipped) into a token table.
///
/// The file's base name becomes the `file` level of the row key and is
/// searched for a year. Read failures are the only errors; everything
/// inside the file is handled best-effort.
pub fn conll_df(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<Table, ConllDfError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(conll_df_from_str(&text, &file_name, opts))
}

/// Convert in-memory CoNLL-U text, using `file_name` as if it had been read
/// from a file of that name
pub fn conll_df_from_str(text: &str, file_name: &str, opts: &ReadOptions) -> Table {
    let text = normalize_newlines(text);
    let text = text.trim_matches('\n');
    let schema = opts.schema.resolve(text);
    let delimiter = opts.schema.comment_delimiter();

    let seed = if opts.skip_meta {
        SentenceMeta::new()
    } else {
        file_seed(file_name)
    };

    let sentences: Vec<NormalizedSentence> = split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(i, block)| {
            normalize_sentence(block, file_name, &seed, delimiter, i + 1, opts.skip_meta)
        })
        .collect();
    tracing::debug!(
        file = file_name,
        sentences = sentences.len(),
        ?schema,
        "normalized sentences"
    );

    let mut lines = String::with_capacity(text.len() + sentences.len() * (file_name.len() + 8));
    for sentence in sentences.iter().filter(|s| !s.tokens.is_empty()) {
        lines.push_str(&sentence.tokens);
        lines.push('\n');
    }
    let mut table = build_table(&lines, schema);
    drop(lines);

    let morph_expanded = schema.is_v2() && !opts.skip_morph;
    if morph_expanded {
        expand_morphology(&mut table, &opts.extra_fields);
    }

    if !opts.skip_meta {
        let metadata: Vec<SentenceMeta> = sentences.into_iter().map(|s| s.metadata).collect();
        join_metadata(&mut table, &metadata);
    }

    postprocess(&mut table, opts, schema, morph_expanded);
    tracing::debug!(
        rows = table.len(),
        columns = table.n_columns(),
        "finished token table"
    );
    table
}

/// `\r\n` line endings as `\n`, so blank lines between sentences are found
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Whole file as text. `.gz` files are decompressed; invalid UTF-8 is
/// replaced rather than rejected.
fn read_text(path: &Path) -> Result<String, ConllDfError> {
    let io_err = |source| ConllDfError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        MultiGzDecoder::new(BufReader::new(file))
            .read_to_end(&mut bytes)
            .map_err(io_err)?;
    } else {
        BufReader::new(file).read_to_end(&mut bytes).map_err(io_err)?;
    }
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().to_str_lossy().into_owned()))
}
