//! Per-call reader configuration

use crate::schema::SchemaVersion;

/// Source of extra morphology feature names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtraFields {
    /// Discover names from the "other" column
    #[default]
    Auto,
    /// Use exactly these names (in addition to the baseline vocabulary)
    Explicit(Vec<String>),
}

/// Options controlling how a CoNLL-U file becomes a table.
///
/// The defaults match the most common use: automatic schema detection,
/// metadata and morphology expanded, categorical columns, constant columns
/// pruned, no governor columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    pub schema: SchemaVersion,
    pub skip_morph: bool,
    pub skip_meta: bool,
    pub add_governors: bool,
    /// Columns removed from the result if present
    pub drop: Vec<String>,
    /// Keep the file name as the first level of the row key
    pub file_index: bool,
    pub categories: bool,
    pub extra_fields: ExtraFields,
    pub drop_redundant: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            schema: SchemaVersion::Auto,
            skip_morph: false,
            skip_meta: false,
            add_governors: false,
            drop: vec!["text".to_string(), "newdoc id".to_string()],
            file_index: true,
            categories: true,
            extra_fields: ExtraFields::Auto,
            drop_redundant: true,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_skip_morph(mut self, skip: bool) -> Self {
        self.skip_morph = skip;
        self
    }

    pub fn with_skip_meta(mut self, skip: bool) -> Self {
        self.skip_meta = skip;
        self
    }

    pub fn with_governors(mut self, add: bool) -> Self {
        self.add_governors = add;
        self
    }

    pub fn with_drop<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_index(mut self, keep: bool) -> Self {
        self.file_index = keep;
        self
    }

    pub fn with_categories(mut self, categorize: bool) -> Self {
        self.categories = categorize;
        self
    }

    pub fn with_extra_fields(mut self, fields: ExtraFields) -> Self {
        self.extra_fields = fields;
        self
    }

    pub fn with_drop_redundant(mut self, prune: bool) -> Self {
        self.drop_redundant = prune;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ReadOptions::default();
        assert_eq!(opts.schema, SchemaVersion::Auto);
        assert_eq!(opts.drop, vec!["text", "newdoc id"]);
        assert!(opts.file_index);
        assert!(opts.categories);
        assert!(opts.drop_redundant);
        assert!(!opts.add_governors);
        assert_eq!(opts.extra_fields, ExtraFields::Auto);
    }

    #[test]
    fn test_builder() {
        let opts = ReadOptions::new()
            .with_schema(SchemaVersion::V2)
            .with_governors(true)
            .with_drop(["text"])
            .with_extra_fields(ExtraFields::Explicit(vec!["Foo".into()]));
        assert_eq!(opts.schema, SchemaVersion::V2);
        assert!(opts.add_governors);
        assert_eq!(opts.drop, vec!["text"]);
        assert_eq!(opts.extra_fields, ExtraFields::Explicit(vec!["Foo".into()]));
    }
}
