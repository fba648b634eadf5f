//! Column schemas and the baseline morphology vocabulary
//!
//! Universal Dependencies changed the meaning of several CoNLL-U columns
//! between v1 and v2. Columns are named with the short single-letter codes
//! used throughout the crate:
//!
//! | code | v1              | v2              |
//! |------|-----------------|-----------------|
//! | i    | token index     | token index     |
//! | w    | word form       | word form       |
//! | l    | lemma           | lemma           |
//! | x    | -               | universal POS   |
//! | p    | POS             | language POS    |
//! | n    | fine POS        | -               |
//! | m    | morphology      | morphology      |
//! | g    | governor (head) | governor (head) |
//! | f    | function        | function        |
//! | d/e  | phead / deps    | enhanced deps   |
//! | c/o  | pdeprel         | misc ("other")  |

/// Leading fields added to every normalized token line
pub const FILE_COLUMN: &str = "file";
pub const SENTENCE_COLUMN: &str = "s";
pub const TOKEN_COLUMN: &str = "i";

/// Head (governor) index column
pub const HEAD_COLUMN: &str = "g";
/// Packed UD morphology column
pub const MORPH_COLUMN: &str = "m";
/// Packed "other"/misc column (v2 only)
pub const EXTRA_COLUMN: &str = "o";

/// UD 1.0
pub const CONLL_COLUMNS: [&str; 10] = ["i", "w", "l", "p", "n", "m", "g", "f", "d", "c"];
/// UD 2.0
pub const CONLL_COLUMNS_V2: [&str; 10] = ["i", "w", "l", "x", "p", "m", "g", "f", "e", "o"];

/// Known morphological attributes, always expanded into their own columns
pub const MORPH_ATTS: [&str; 26] = [
    "type", "animacy", "gender", "number", "Abbr", "Animacy", "Aspect", "Case", "Definite",
    "Degree", "Evident", "Foreign", "Gender", "Mood", "NumType", "Number", "Person", "Polarity",
    "Polite", "Poss", "PronType", "Reflex", "Tense", "VerbForm", "Voice", "Type",
];

/// Feature appended to every vocabulary
pub const SPACE_AFTER: &str = "SpaceAfter";

/// How much of the raw file is scanned when detecting the schema
pub const DETECT_WINDOW: usize = 9999;

/// Marker whose presence implies the v2 schema
const V2_MARKER: &str = "sent_id = ";

/// Which column layout to parse with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    /// Decide from the file contents
    #[default]
    Auto,
    V1,
    V2,
}

impl SchemaVersion {
    /// Delimiter between key and value in comment lines.
    ///
    /// `Auto` uses the v2 style; the normalizer falls back to a bare `=`
    /// whenever the padded form is missing.
    pub fn comment_delimiter(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "=",
            SchemaVersion::Auto | SchemaVersion::V2 => " = ",
        }
    }

    /// Resolve `Auto` against the raw file text. Explicit versions pass through.
    pub fn resolve(self, text: &str) -> SchemaVersion {
        match self {
            SchemaVersion::Auto => {
                if detect_window(text).contains(V2_MARKER) {
                    SchemaVersion::V2
                } else {
                    SchemaVersion::V1
                }
            }
            explicit => explicit,
        }
    }

    pub fn is_v2(self) -> bool {
        self == SchemaVersion::V2
    }

    /// Column names for this schema, in file order.
    ///
    /// `Auto` must be resolved first; it is treated as v2 here.
    pub fn columns(self) -> &'static [&'static str; 10] {
        match self {
            SchemaVersion::V1 => &CONLL_COLUMNS,
            SchemaVersion::Auto | SchemaVersion::V2 => &CONLL_COLUMNS_V2,
        }
    }
}

/// The first `DETECT_WINDOW` characters of `text`
fn detect_window(text: &str) -> &str {
    match text.char_indices().nth(DETECT_WINDOW) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
