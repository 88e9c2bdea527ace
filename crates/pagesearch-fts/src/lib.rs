//! Per-language full-text page indexes for pagesearch.
//!
//! This crate turns the pages of a content-managed site tree into one search
//! index per configured language. Each index knows which pages belong in it
//! and how to turn a page, together with every content block it carries in
//! that language, into a single searchable document. The Tantivy sink that
//! writes those documents to disk is feature-gated.
//!
//! # Features
//!
//! - `fts-tantivy`: Tantivy schema, index writer, and batch reindexer
//!   (enabled by default)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      pagesearch-fts                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  initialize_search_indexes → IndexRegistry / RegistryHandle │
//! │  └── PageIndex (one per language, SearchIndex trait)        │
//! │      ├── candidate_set  (per-site eligibility, unioned)     │
//! │      └── build_document (language-pinned)                   │
//! │          └── aggregate_text → extract_text / strip_tags     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PageStore / ContentResolver / Renderer (collaborators)     │
//! │  MemoryStore / MemoryContent (in-memory implementations)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchSchema (per-language stemming)                       │
//! │  Indexer (Tantivy index writer)                             │
//! │  Reindexer (batch rebuild)                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Index Fields
//!
//! | Field | Type | Purpose |
//! |-------|------|---------|
//! | `id` | identifier | `<index>.<page id>` |
//! | `text` | text | Block text, meta description, title |
//! | `pub_date` | datetime | Publication start (nullable) |
//! | `login_required` | boolean | Access filter |
//! | `url` | stored | Link target |
//! | `title` | stored | Hit label |
//! | `site_id` | integer | Site filter |
//!
//! # Example
//!
//! ```rust,ignore
//! use pagesearch_fts::{ProxyPageTypes, Reindexer, RegistryHandle};
//!
//! let handle = RegistryHandle::empty();
//! let registry = handle.rebuild(&settings, &sources, &ProxyPageTypes)?;
//!
//! let totals = Reindexer::from_settings(&settings).rebuild_configured(&registry, &settings)?;
//! ```

// Core modules (always available)
pub mod aggregate;
pub mod candidates;
pub mod document;
pub mod extract;
pub mod fields;
pub mod memory;
pub mod model;
pub mod page_index;
pub mod registry;
pub mod source;

// Feature-gated Tantivy modules
#[cfg(feature = "fts-tantivy")]
pub mod schema;

#[cfg(feature = "fts-tantivy")]
pub mod indexer;

#[cfg(feature = "fts-tantivy")]
pub mod builder;

// Re-exports
pub use aggregate::aggregate_text;
pub use candidates::{candidate_set, eligible_pages};
pub use document::PageDocument;
pub use extract::{extract_text, strip_tags};
pub use fields::{FieldKind, FieldSpec, page_fields};
pub use memory::{MemoryContent, MemoryStore};
pub use model::{
    Block, BlockId, ContentInstance, ContentType, Page, PageId, Placeholder, SearchCapability,
    Site, SiteId, TitleRecord,
};
pub use page_index::{PageIndex, PageTypeResolver, PageTypeView, ProxyPageTypes, SearchIndex};
pub use registry::{IndexRegistry, RegistryHandle, initialize_search_indexes};
pub use source::{
    ContentResolver, ContentSources, PageQuery, PageStore, RenderContext, Renderer, Resolved,
};

#[cfg(feature = "fts-tantivy")]
pub use schema::SearchSchema;

#[cfg(feature = "fts-tantivy")]
pub use indexer::Indexer;

#[cfg(feature = "fts-tantivy")]
pub use builder::{IndexStats, Reindexer};
