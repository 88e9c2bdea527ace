//! In-memory collaborators.
//!
//! [`MemoryStore`] and [`MemoryContent`] keep a whole site tree in memory.
//! They back the test suites and suit small embedded sites whose content
//! is loaded from a JSON snapshot.

use std::collections::HashMap;

use pagesearch_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Block, BlockId, ContentInstance, ContentType, Page, Site};
use crate::source::{ContentResolver, PageQuery, PageStore, Resolved};

/// Page store backed by vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    sites: Vec<Site>,
    #[serde(default)]
    pages: Vec<Page>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot of the form
    /// `{"sites": [...], "pages": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::store_with_source("invalid page store snapshot", e))
    }

    /// Add a site.
    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    /// Add a page.
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Number of stored pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl PageStore for MemoryStore {
    fn sites(&self) -> Result<Vec<Site>> {
        Ok(self.sites.clone())
    }

    fn pages(&self, query: &PageQuery) -> Result<Vec<Page>> {
        Ok(self
            .pages
            .iter()
            .filter(|page| query.matches(page))
            .cloned()
            .collect())
    }
}

/// Content resolver backed by maps of instances and content types.
///
/// A block whose content type is unknown fails to resolve; a block of a
/// known type without a stored instance resolves as empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryContent {
    types: HashMap<String, ContentType>,
    instances: HashMap<BlockId, ContentInstance>,
}

impl MemoryContent {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type.
    pub fn with_type(mut self, content_type: ContentType) -> Self {
        self.types.insert(content_type.name.clone(), content_type);
        self
    }

    /// Register an instance for its block.
    pub fn with_instance(mut self, instance: ContentInstance) -> Self {
        self.instances.insert(instance.block, instance);
        self
    }
}

impl ContentResolver for MemoryContent {
    fn resolve(&self, block: &Block) -> Result<Resolved> {
        let content_type = self.types.get(&block.plugin_type).cloned().ok_or_else(|| {
            Error::resolve(
                block.id,
                format!("unknown content type '{}'", block.plugin_type),
            )
        })?;

        Ok(Resolved {
            instance: self.instances.get(&block.id).cloned(),
            content_type,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
