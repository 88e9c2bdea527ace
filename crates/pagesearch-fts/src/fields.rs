//! Engine-neutral field definitions of a page index.
//!
//! Every language index declares the same fields:
//!
//! | Field | Kind | Indexed | Stored | Notes |
//! |-------|------|---------|--------|-------|
//! | `id` | identifier | yes | yes | `<index name>.<page id>` |
//! | `text` | text | yes | no | the document field |
//! | `pub_date` | datetime | yes | yes | nullable |
//! | `login_required` | boolean | yes | yes | |
//! | `url` | text | no | yes | |
//! | `title` | text | no | yes | |
//! | `site_id` | integer | yes | yes | |
//!
//! Search-engine adapters translate these into their own schema types.

use serde::{Deserialize, Serialize};

/// Value kind of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Exact-match identifier.
    Identifier,
    /// Free text.
    Text,
    /// Timestamp.
    DateTime,
    /// Boolean flag.
    Boolean,
    /// Integer.
    Integer,
}

/// Definition of one index field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: &'static str,
    /// Value kind.
    pub kind: FieldKind,
    /// Searchable.
    pub indexed: bool,
    /// Returned with hits.
    pub stored: bool,
    /// May be absent from a document.
    pub nullable: bool,
    /// The index's primary document field.
    pub document: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind, indexed: bool, stored: bool) -> Self {
        Self {
            name,
            kind,
            indexed,
            stored,
            nullable: false,
            document: false,
        }
    }
}

/// Document identifier field name.
pub const ID: &str = "id";
/// Document text field name.
pub const TEXT: &str = "text";
/// Publication date field name.
pub const PUB_DATE: &str = "pub_date";
/// Login-required field name.
pub const LOGIN_REQUIRED: &str = "login_required";
/// URL field name.
pub const URL: &str = "url";
/// Title field name.
pub const TITLE: &str = "title";
/// Site id field name.
pub const SITE_ID: &str = "site_id";

static PAGE_FIELDS: [FieldSpec; 7] = [
    FieldSpec::new(ID, FieldKind::Identifier, true, true),
    FieldSpec {
        document: true,
        ..FieldSpec::new(TEXT, FieldKind::Text, true, false)
    },
    FieldSpec {
        nullable: true,
        ..FieldSpec::new(PUB_DATE, FieldKind::DateTime, true, true)
    },
    FieldSpec::new(LOGIN_REQUIRED, FieldKind::Boolean, true, true),
    FieldSpec::new(URL, FieldKind::Text, false, true),
    FieldSpec::new(TITLE, FieldKind::Text, false, true),
    FieldSpec::new(SITE_ID, FieldKind::Integer, true, true),
];

/// Field definitions shared by every page index.
pub fn page_fields() -> &'static [FieldSpec] {
    &PAGE_FIELDS
}

/// The document field among `fields`, if any.
pub fn document_field(fields: &[FieldSpec]) -> Option<&FieldSpec> {
    fields.iter().find(|f| f.document)
}

// ============================================================================
// Tests
// ============================================================================
