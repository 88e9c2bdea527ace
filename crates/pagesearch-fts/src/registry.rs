//! Index registry and its initializer.
//!
//! [`initialize_search_indexes`] is the startup entry point: it builds one
//! [`PageIndex`] per configured language and returns a fresh
//! [`IndexRegistry`]. Nothing is installed anywhere as a side effect; hosts
//! that need a process-wide registry keep it in a [`RegistryHandle`], which
//! replaces its contents only when a rebuild succeeds.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pagesearch_core::{ActiveLanguage, IndexSettings, LanguageEntry};
//! use pagesearch_fts::memory::{MemoryContent, MemoryStore};
//! use pagesearch_fts::model::ContentInstance;
//! use pagesearch_fts::page_index::ProxyPageTypes;
//! use pagesearch_fts::registry::{RegistryHandle, initialize_search_indexes};
//! use pagesearch_fts::source::{ContentSources, RenderContext, Renderer};
//!
//! struct NoMarkup;
//! impl Renderer for NoMarkup {
//!     fn render(&self, _: &ContentInstance, _: &RenderContext) -> pagesearch_core::Result<String> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let settings = IndexSettings::new(vec![
//!     LanguageEntry::new("en", "English"),
//!     LanguageEntry::new("de", "German"),
//! ]);
//! let sources = ContentSources::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryContent::new()),
//!     Arc::new(NoMarkup),
//!     ActiveLanguage::new("en"),
//! );
//!
//! let registry = initialize_search_indexes(&settings, &sources, &ProxyPageTypes, None).unwrap();
//! assert_eq!(registry.names().collect::<Vec<_>>(), ["page_en", "page_de"]);
//!
//! let handle = RegistryHandle::new(registry);
//! assert!(handle.snapshot().get("page_de").is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use pagesearch_core::{Error, IndexSettings, Result};
use parking_lot::{Mutex, RwLock};

use crate::page_index::{PageIndex, PageTypeResolver, SearchIndex};
use crate::source::ContentSources;

// ============================================================================
// IndexRegistry
// ============================================================================

/// Ordered collection of indexes keyed by name.
///
/// Iteration follows installation order.
#[derive(Clone, Default)]
pub struct IndexRegistry {
    indexes: IndexMap<String, Arc<dyn SearchIndex>>,
}

impl IndexRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexes.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns `true` if no index is registered.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Index called `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SearchIndex>> {
        self.indexes.get(name)
    }

    /// First index bound to `language`.
    pub fn for_language(&self, language: &str) -> Option<&Arc<dyn SearchIndex>> {
        self.indexes
            .values()
            .find(|index| index.language() == Some(language))
    }

    /// Indexes in installation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SearchIndex>> {
        self.indexes.values()
    }

    /// Index names in installation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    /// Install `index`, returning the index it replaced, if any.
    ///
    /// A replaced index keeps its position.
    pub fn insert(&mut self, index: Arc<dyn SearchIndex>) -> Option<Arc<dyn SearchIndex>> {
        self.indexes.insert(index.name().to_string(), index)
    }

    /// Returns `true` if an index called `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.indexes.contains_key(name)
    }
}

impl fmt::Debug for IndexRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexRegistry")
            .field("indexes", &self.indexes.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Build the registry for every configured language.
///
/// Settings are validated and every page index is constructed before the
/// registry is assembled, so any failure returns an error and no partial
/// registry. Indexes from `previous` whose names do not clash with a new
/// page index are carried over after the page indexes.
pub fn initialize_search_indexes(
    settings: &IndexSettings,
    sources: &ContentSources,
    page_types: &dyn PageTypeResolver,
    previous: Option<&IndexRegistry>,
) -> Result<IndexRegistry> {
    settings.validate()?;

    let page_indexes = settings
        .languages
        .iter()
        .map(|entry| {
            let view = page_types.resolve(entry)?;
            PageIndex::new(settings, &entry.code, view, sources.clone())
        })
        .collect::<Result<Vec<_>>>()?;

    let mut registry = IndexRegistry::new();
    for index in page_indexes {
        if let Some(clash) = registry.insert(Arc::new(index)) {
            return Err(Error::config(format!(
                "languages map to the same index name '{}'",
                clash.name()
            )));
        }
    }

    let mut carried = 0;
    if let Some(previous) = previous {
        for index in previous.iter() {
            if !registry.contains(index.name()) {
                registry.insert(Arc::clone(index));
                carried += 1;
            }
        }
    }

    log::info!(
        "Initialized {} page indexes ({} carried over)",
        registry.len() - carried,
        carried
    );

    Ok(registry)
}

// ============================================================================
// RegistryHandle
// ============================================================================

/// Thread-safe cell holding the process-wide registry.
///
/// Cheap to clone (Arc internals). Readers take a [`snapshot`](Self::snapshot)
/// and keep using it while a rebuild runs; a rebuild swaps in the new
/// registry in one step, or leaves the cell untouched if it fails.
#[derive(Clone)]
pub struct RegistryHandle {
    inner: Arc<RegistryHandleInner>,
}

struct RegistryHandleInner {
    current: RwLock<Arc<IndexRegistry>>,
    // Serializes rebuilds so none is lost.
    rebuild: Mutex<()>,
}

impl RegistryHandle {
    /// Create a handle holding `registry`.
    pub fn new(registry: IndexRegistry) -> Self {
        Self {
            inner: Arc::new(RegistryHandleInner {
                current: RwLock::new(Arc::new(registry)),
                rebuild: Mutex::new(()),
            }),
        }
    }

    /// Create a handle holding an empty registry.
    pub fn empty() -> Self {
        Self::new(IndexRegistry::new())
    }

    /// The current registry.
    pub fn snapshot(&self) -> Arc<IndexRegistry> {
        Arc::clone(&self.inner.current.read())
    }

    /// Replace the current registry, returning the old one.
    pub fn install(&self, registry: IndexRegistry) -> Arc<IndexRegistry> {
        std::mem::replace(&mut *self.inner.current.write(), Arc::new(registry))
    }

    /// Rebuild from `settings`, carrying over the current registry's
    /// non-conflicting indexes, and install the result.
    ///
    /// On error the current registry is left in place.
    pub fn rebuild(
        &self,
        settings: &IndexSettings,
        sources: &ContentSources,
        page_types: &dyn PageTypeResolver,
    ) -> Result<Arc<IndexRegistry>> {
        let _rebuild = self.inner.rebuild.lock();
        let current = self.snapshot();

        let registry = initialize_search_indexes(settings, sources, page_types, Some(&current))
            .inspect_err(|e| log::warn!("Registry rebuild failed, keeping current: {e}"))?;

        let registry = Arc::new(registry);
        *self.inner.current.write() = Arc::clone(&registry);
        Ok(registry)
    }
}

impl Default for RegistryHandle {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("current", &*self.inner.current.read())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
