//! Batch reindexing.
//!
//! [`Reindexer`] drives a full rebuild of language indexes: it clears the
//! target index, walks the index's candidate set, builds one document per
//! page, and commits in batches. There is no incremental mode; every run
//! starts from an empty index.
//!
//! Per-page build errors follow the configured [`PageErrorPolicy`]: `skip`
//! logs the page and moves on, committing every `batch_size` documents.
//! `abort` stages the whole run and commits once at the end; on the first
//! failure it rolls back, so the index keeps its previous committed contents.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pagesearch_fts::{Reindexer, initialize_search_indexes};
//!
//! let registry = initialize_search_indexes(&settings, &sources, &ProxyPageTypes, None)?;
//! let totals = Reindexer::from_settings(&settings).rebuild_configured(&registry, &settings)?;
//! for (name, stats) in &totals {
//!     println!("{name}: {} documents", stats.documents_indexed);
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use pagesearch_core::{Error, IndexSettings, PageErrorPolicy, Result};

use crate::indexer::Indexer;
use crate::page_index::SearchIndex;
use crate::registry::IndexRegistry;
use crate::schema::SearchSchema;

/// Statistics about a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of documents successfully indexed.
    pub documents_indexed: usize,
    /// Number of candidate pages processed.
    pub pages_considered: usize,
    /// Number of pages skipped because their document could not be built.
    pub pages_skipped: usize,
    /// Number of errors encountered.
    pub errors: usize,
}

/// Batch rebuild driver.
#[derive(Debug, Clone)]
pub struct Reindexer {
    batch_size: usize,
    on_page_error: PageErrorPolicy,
}

impl Reindexer {
    /// Create a reindexer with default batch size and the `skip` policy.
    pub fn new() -> Self {
        Self {
            batch_size: 100,
            on_page_error: PageErrorPolicy::Skip,
        }
    }

    /// Create a reindexer from the batch size and policy in `settings`.
    pub fn from_settings(settings: &IndexSettings) -> Self {
        Self::new()
            .with_batch_size(settings.batch_size)
            .on_page_error(settings.on_page_error)
    }

    /// Set the batch size for commits.
    ///
    /// Zero is treated as one.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the per-page error policy.
    pub fn on_page_error(mut self, policy: PageErrorPolicy) -> Self {
        self.on_page_error = policy;
        self
    }

    /// Rebuild `index` into `indexer` from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the candidate set cannot be computed
    /// - a page fails to build under the `abort` policy
    /// - the index cannot be cleared or committed
    pub fn rebuild_index(&self, index: &dyn SearchIndex, indexer: &mut Indexer) -> Result<IndexStats> {
        log::info!("Rebuilding index '{}'", index.name());

        let stats = match self.on_page_error {
            PageErrorPolicy::Skip => {
                indexer.clear()?;
                self.index_pages(index, indexer, true)?
            }
            PageErrorPolicy::Abort => {
                indexer.stage_clear()?;
                match self.index_pages(index, indexer, false) {
                    Ok(stats) => {
                        indexer.commit()?;
                        stats
                    }
                    Err(e) => {
                        log::warn!("Rolling back rebuild of '{}'", index.name());
                        indexer.rollback()?;
                        return Err(e);
                    }
                }
            }
        };

        log::info!(
            "Indexed {} documents into '{}' ({} skipped, {} errors)",
            stats.documents_indexed,
            index.name(),
            stats.pages_skipped,
            stats.errors
        );

        Ok(stats)
    }

    /// Add a document per candidate page. With `batched`, commits every
    /// `batch_size` documents and once more at the end.
    fn index_pages(
        &self,
        index: &dyn SearchIndex,
        indexer: &mut Indexer,
        batched: bool,
    ) -> Result<IndexStats> {
        let pages = index.candidate_set()?;

        let mut stats = IndexStats::default();
        let mut batch_count = 0;

        for page in &pages {
            stats.pages_considered += 1;

            let doc = match index.build_document(page) {
                Ok(doc) => doc,
                Err(e) if self.on_page_error == PageErrorPolicy::Skip => {
                    log::warn!("Skipping page {} in '{}': {e}", page.id, index.name());
                    stats.pages_skipped += 1;
                    stats.errors += 1;
                    continue;
                }
                Err(e) => {
                    log::warn!("Aborting rebuild of '{}' at page {}", index.name(), page.id);
                    return Err(e);
                }
            };

            if let Err(e) = indexer.add_document(&doc) {
                log::warn!("Failed to index {}: {e}", doc.id);
                stats.errors += 1;
                continue;
            }

            stats.documents_indexed += 1;
            batch_count += 1;

            if batched && batch_count >= self.batch_size {
                indexer.commit()?;
                batch_count = 0;
            }
        }

        if batched && batch_count > 0 {
            indexer.commit()?;
        }

        Ok(stats)
    }

    /// Rebuild every index in `registry` under `root/<index name>`.
    pub fn rebuild_all(
        &self,
        registry: &IndexRegistry,
        root: &Path,
    ) -> Result<IndexMap<String, IndexStats>> {
        let mut totals = IndexMap::with_capacity(registry.len());

        for index in registry.iter() {
            let schema = SearchSchema::for_index(index.as_ref())?;
            let mut indexer = Indexer::new(&root.join(index.name()), &schema)?;
            let stats = self.rebuild_index(index.as_ref(), &mut indexer)?;
            totals.insert(index.name().to_string(), stats);
        }

        Ok(totals)
    }

    /// [`rebuild_all`](Self::rebuild_all) under the configured `index_root`.
    pub fn rebuild_configured(
        &self,
        registry: &IndexRegistry,
        settings: &IndexSettings,
    ) -> Result<IndexMap<String, IndexStats>> {
        let root = settings
            .index_root
            .as_deref()
            .ok_or_else(|| Error::config("index_root is not configured"))?;
        self.rebuild_all(registry, root)
    }
}

impl Default for Reindexer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
