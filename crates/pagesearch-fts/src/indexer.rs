//! Tantivy index writer wrapper.
//!
//! `Indexer` owns a Tantivy `IndexWriter` for one language index and
//! converts [`PageDocument`]s into Tantivy documents.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pagesearch_fts::{Indexer, SearchSchema};
//!
//! let schema = SearchSchema::for_index(index.as_ref())?;
//! let mut indexer = Indexer::new(&index_root.join(index.name()), &schema)?;
//!
//! indexer.add_document(&index.build_document(&page)?)?;
//! indexer.commit()?;
//! ```

use std::path::Path;

use pagesearch_core::{Error, Result};
use tantivy::{DateTime, Index, IndexWriter, TantivyDocument};

use crate::document::PageDocument;
use crate::schema::SearchSchema;

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// Tantivy index writer wrapper.
pub struct Indexer {
    index: Index,
    writer: IndexWriter,
    schema: SearchSchema,
}

impl Indexer {
    /// Create or open a Tantivy index at the given path.
    ///
    /// Creates the directory and a new index if none exists there yet.
    pub fn new(index_path: &Path, schema: &SearchSchema) -> Result<Self> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(|e| Error::io_with_path(e, index_path))?;
        }

        let index = if index_path.join("meta.json").exists() {
            Index::open_in_dir(index_path)
                .map_err(|e| Error::operation(format!("Failed to open index: {e}")))?
        } else {
            Index::create_in_dir(index_path, schema.schema().clone())
                .map_err(|e| Error::operation(format!("Failed to create index: {e}")))?
        };

        Self::with_index(index, schema)
    }

    /// Create an in-memory index.
    pub fn new_in_memory(schema: &SearchSchema) -> Result<Self> {
        Self::with_index(Index::create_in_ram(schema.schema().clone()), schema)
    }

    fn with_index(index: Index, schema: &SearchSchema) -> Result<Self> {
        schema.register_tokenizers(&index);

        let writer = index
            .writer(WRITER_BUFFER_SIZE)
            .map_err(|e| Error::operation(format!("Failed to create index writer: {e}")))?;

        Ok(Self {
            index,
            writer,
            schema: schema.clone(),
        })
    }

    /// Stage a document; it becomes searchable on [`commit`](Self::commit).
    pub fn add_document(&mut self, doc: &PageDocument) -> Result<()> {
        let tantivy_doc = self.convert_to_tantivy_doc(doc);
        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| Error::operation(format!("Failed to add document {}: {e}", doc.id)))?;
        Ok(())
    }

    /// Commit staged changes to make them searchable.
    pub fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| Error::operation(format!("Failed to commit index: {e}")))?;
        Ok(())
    }

    /// Clear all documents from the index.
    pub fn clear(&mut self) -> Result<()> {
        self.stage_clear()?;
        self.commit()
    }

    /// Stage the removal of all documents; takes effect on the next commit.
    pub fn stage_clear(&mut self) -> Result<()> {
        self.writer
            .delete_all_documents()
            .map_err(|e| Error::operation(format!("Failed to clear index: {e}")))?;
        Ok(())
    }

    /// Discard every change staged since the last commit.
    pub fn rollback(&mut self) -> Result<()> {
        self.writer
            .rollback()
            .map_err(|e| Error::operation(format!("Failed to roll back index: {e}")))?;
        Ok(())
    }

    /// Number of committed documents.
    pub fn num_docs(&self) -> Result<u64> {
        let reader = self
            .index
            .reader()
            .map_err(|e| Error::operation(format!("Failed to open index reader: {e}")))?;
        Ok(reader.searcher().num_docs())
    }

    /// Get reference to the underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the schema.
    pub fn schema(&self) -> &SearchSchema {
        &self.schema
    }

    fn convert_to_tantivy_doc(&self, doc: &PageDocument) -> TantivyDocument {
        let s = &self.schema;

        let mut tantivy_doc = TantivyDocument::new();
        tantivy_doc.add_text(s.id, &doc.id);
        tantivy_doc.add_text(s.text, &doc.text);
        if let Some(pub_date) = doc.pub_date {
            tantivy_doc.add_date(s.pub_date, DateTime::from_timestamp_secs(pub_date.timestamp()));
        }
        tantivy_doc.add_bool(s.login_required, doc.login_required);
        tantivy_doc.add_text(s.url, &doc.url);
        tantivy_doc.add_text(s.title, &doc.title);
        tantivy_doc.add_u64(s.site_id, doc.site_id.0);
        tantivy_doc
    }
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("index", &"<tantivy::Index>")
            .field("schema", &self.schema)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
