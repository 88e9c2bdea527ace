//! Tantivy schema for a language index.
//!
//! Translates the engine-neutral [`FieldSpec`]s of an index into a Tantivy
//! schema:
//!
//! | Kind | Tantivy field |
//! |------|---------------|
//! | identifier | text, `raw` tokenizer, no positions |
//! | text | text, language tokenizer, with positions |
//! | datetime | date |
//! | boolean | bool |
//! | integer | u64 |
//!
//! Indexed and stored flags carry over unchanged.
//!
//! # Tokenizer
//!
//! Text fields use `<lang>_stem` (SimpleTokenizer → RemoveLongFilter →
//! LowerCaser → Stemmer) when Tantivy ships a stemmer for the primary
//! subtag of the index language, so `pt-br` shares `pt_stem` with `pt`.
//! Every other language uses Tantivy's built-in `default` tokenizer.

use std::collections::HashMap;

use pagesearch_core::{Error, Result};
use tantivy::Index;
use tantivy::schema::{
    DateOptions, Field, IndexRecordOption, NumericOptions, Schema, SchemaBuilder,
    TextFieldIndexing, TextOptions,
};
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer,
};

use crate::fields::{self, FieldKind, FieldSpec};
use crate::page_index::SearchIndex;

/// Built-in Tantivy tokenizer for languages without a stemmer.
pub const DEFAULT_TOKENIZER: &str = "default";

/// Tokens longer than this are dropped.
const MAX_TOKEN_LEN: usize = 40;

/// Search schema holding field references and the Tantivy schema.
#[derive(Clone)]
pub struct SearchSchema {
    schema: Schema,
    tokenizer: String,
    stemmer: Option<Language>,

    // Identity
    /// `<index name>.<page id>`.
    pub id: Field,

    // Document field
    /// Searchable page text.
    pub text: Field,

    // Attributes
    /// Publication date.
    pub pub_date: Field,
    /// Login-required flag.
    pub login_required: Field,
    /// Page URL (stored only).
    pub url: Field,
    /// Page title (stored only).
    pub title: Field,
    /// Owning site.
    pub site_id: Field,
}

impl SearchSchema {
    /// Build the schema for `index`.
    pub fn for_index(index: &dyn SearchIndex) -> Result<Self> {
        Self::from_fields(index.language(), index.fields())
    }

    /// Build a schema from field definitions for `language`.
    ///
    /// Every page field must be declared.
    pub fn from_fields(language: Option<&str>, specs: &[FieldSpec]) -> Result<Self> {
        let stemmer = language.and_then(stemmer_language);
        let tokenizer = match (language, stemmer) {
            (Some(code), Some(_)) => format!("{}_stem", primary_subtag(code)),
            _ => DEFAULT_TOKENIZER.to_string(),
        };

        let mut builder = SchemaBuilder::new();
        let mut declared = HashMap::new();
        for spec in specs {
            declared.insert(spec.name, add_field(&mut builder, spec, &tokenizer));
        }
        let schema = builder.build();

        let field = |name: &str| {
            declared
                .get(name)
                .copied()
                .ok_or_else(|| Error::config(format!("index does not declare the '{name}' field")))
        };

        Ok(Self {
            id: field(fields::ID)?,
            text: field(fields::TEXT)?,
            pub_date: field(fields::PUB_DATE)?,
            login_required: field(fields::LOGIN_REQUIRED)?,
            url: field(fields::URL)?,
            title: field(fields::TITLE)?,
            site_id: field(fields::SITE_ID)?,
            schema,
            tokenizer,
            stemmer,
        })
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the tokenizer used by text fields.
    pub fn tokenizer(&self) -> &str {
        &self.tokenizer
    }

    /// Register this schema's tokenizer with a Tantivy index.
    ///
    /// Must be called after creating/opening an index to enable stemming.
    pub fn register_tokenizers(&self, index: &Index) {
        if let Some(language) = self.stemmer {
            let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
                .filter(LowerCaser)
                .filter(Stemmer::new(language))
                .build();
            index.tokenizers().register(&self.tokenizer, analyzer);
        }
    }

    /// Get all page fields.
    pub fn all_fields(&self) -> Vec<Field> {
        vec![
            self.id,
            self.text,
            self.pub_date,
            self.login_required,
            self.url,
            self.title,
            self.site_id,
        ]
    }
}

impl std::fmt::Debug for SearchSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSchema")
            .field("field_count", &self.schema.fields().count())
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}

fn add_field(builder: &mut SchemaBuilder, spec: &FieldSpec, tokenizer: &str) -> Field {
    match spec.kind {
        FieldKind::Identifier => {
            let indexing = TextFieldIndexing::default()
                .set_tokenizer("raw")
                .set_index_option(IndexRecordOption::Basic);
            builder.add_text_field(spec.name, text_options(spec, indexing))
        }
        FieldKind::Text => {
            let indexing = TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions);
            builder.add_text_field(spec.name, text_options(spec, indexing))
        }
        FieldKind::DateTime => {
            let mut options = DateOptions::default();
            if spec.indexed {
                options = options.set_indexed();
            }
            if spec.stored {
                options = options.set_stored();
            }
            builder.add_date_field(spec.name, options)
        }
        FieldKind::Boolean => builder.add_bool_field(spec.name, numeric_options(spec)),
        FieldKind::Integer => builder.add_u64_field(spec.name, numeric_options(spec)),
    }
}

fn text_options(spec: &FieldSpec, indexing: TextFieldIndexing) -> TextOptions {
    let mut options = TextOptions::default();
    if spec.indexed {
        options = options.set_indexing_options(indexing);
    }
    if spec.stored {
        options = options.set_stored();
    }
    options
}

fn numeric_options(spec: &FieldSpec) -> NumericOptions {
    let mut options = NumericOptions::default();
    if spec.indexed {
        options = options.set_indexed();
    }
    if spec.stored {
        options = options.set_stored();
    }
    options
}

fn primary_subtag(code: &str) -> String {
    code.split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_ascii_lowercase()
}

/// Tantivy stemmer for a language code, matched on its primary subtag.
pub fn stemmer_language(code: &str) -> Option<Language> {
    let language = match primary_subtag(code).as_str() {
        "ar" => Language::Arabic,
        "da" => Language::Danish,
        "de" => Language::German,
        "el" => Language::Greek,
        "en" => Language::English,
        "es" => Language::Spanish,
        "fi" => Language::Finnish,
        "fr" => Language::French,
        "hu" => Language::Hungarian,
        "it" => Language::Italian,
        "nl" => Language::Dutch,
        "no" | "nb" | "nn" => Language::Norwegian,
        "pt" => Language::Portuguese,
        "ro" => Language::Romanian,
        "ru" => Language::Russian,
        "sv" => Language::Swedish,
        "ta" => Language::Tamil,
        "tr" => Language::Turkish,
        _ => return None,
    };
    Some(language)
}

// ============================================================================
// Tests
// ============================================================================
