//! Collaborator seams: page store, content resolution, and rendering.
//!
//! pagesearch does not own storage or rendering. It reads pages through a
//! [`PageStore`], turns blocks into content-type instances through a
//! [`ContentResolver`], and renders full-text blocks through a [`Renderer`].
//! [`ContentSources`] bundles the three together with the shared
//! [`ActiveLanguage`] handle; every page index built from the same sources
//! shares them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagesearch_core::{ActiveLanguage, Result};

use crate::model::{Block, ContentInstance, ContentType, Page, Site, SiteId};

/// Filters a store applies when listing pages.
///
/// Every field left at its default does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Only pages of this site.
    pub site: Option<SiteId>,
    /// Only pages publicly visible at this instant.
    pub published_at: Option<DateTime<Utc>>,
    /// Only draft (`Some(true)`) or public (`Some(false)`) copies.
    pub is_draft: Option<bool>,
    /// Only pages with a title record in this language.
    pub title_language: Option<String>,
    /// With `title_language`: the matching record must not redirect.
    pub without_redirect: bool,
    /// Exclude pages carrying this structural marker.
    pub exclude_reverse_id: Option<String>,
}

impl PageQuery {
    /// Returns `true` if `page` satisfies every filter.
    pub fn matches(&self, page: &Page) -> bool {
        if self.site.is_some_and(|site| site != page.site_id) {
            return false;
        }
        if self.published_at.is_some_and(|now| !page.is_published_at(now)) {
            return false;
        }
        if self.is_draft.is_some_and(|draft| draft != page.is_draft) {
            return false;
        }
        if let Some(ref marker) = self.exclude_reverse_id {
            if page.has_reverse_id(marker) {
                return false;
            }
        }
        if let Some(ref language) = self.title_language {
            // Language and redirect conditions apply to the same record.
            let qualifies = page
                .titles
                .iter()
                .any(|t| &t.language == language && !(self.without_redirect && t.has_redirect()));
            if !qualifies {
                return false;
            }
        }
        true
    }
}

/// Read-only access to sites, pages, and their blocks.
pub trait PageStore: Send + Sync {
    /// All sites, in a stable order.
    fn sites(&self) -> Result<Vec<Site>>;

    /// Pages matching `query`.
    ///
    /// Stores may return a superset when they cannot express a filter;
    /// callers re-check with [`PageQuery::matches`].
    fn pages(&self, query: &PageQuery) -> Result<Vec<Page>>;

    /// Blocks attached to any placeholder of `page` in `language`.
    ///
    /// Order follows placeholder order, then block order within a
    /// placeholder.
    fn blocks(&self, page: &Page, language: &str) -> Result<Vec<Block>> {
        Ok(page.blocks_in(language).cloned().collect())
    }
}

/// Outcome of resolving a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Concrete payload; `None` for an empty block.
    pub instance: Option<ContentInstance>,
    /// Descriptor of the block's content type.
    pub content_type: ContentType,
}

impl Resolved {
    /// A resolved block with a payload.
    pub fn instance(instance: ContentInstance, content_type: ContentType) -> Self {
        Self {
            instance: Some(instance),
            content_type,
        }
    }

    /// A block without a payload.
    pub fn empty(content_type: ContentType) -> Self {
        Self {
            instance: None,
            content_type,
        }
    }
}

/// Resolves blocks to their concrete content-type instances.
pub trait ContentResolver: Send + Sync {
    /// Resolve `block`. Failures are reported as `Error::Resolve`.
    fn resolve(&self, block: &Block) -> Result<Resolved>;
}

/// Minimal request-like context handed to the renderer.
///
/// No real request is made; the context only pins the language the block
/// is rendered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Language the output must be rendered in.
    pub language: String,
    /// Path of the synthetic request.
    pub path: String,
    /// Session data; always empty for indexing.
    pub session: BTreeMap<String, String>,
}

impl RenderContext {
    /// Context for rendering in `language` at `/` with an empty session.
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            path: "/".to_string(),
            session: BTreeMap::new(),
        }
    }
}

/// Renders content-type instances to markup.
pub trait Renderer: Send + Sync {
    /// Render `instance`. Failures are reported as `Error::Render`.
    fn render(&self, instance: &ContentInstance, context: &RenderContext) -> Result<String>;
}

/// Collaborators shared by every page index.
#[derive(Clone)]
pub struct ContentSources {
    /// Page and block store.
    pub store: Arc<dyn PageStore>,
    /// Block-to-instance resolution.
    pub resolver: Arc<dyn ContentResolver>,
    /// Instance rendering.
    pub renderer: Arc<dyn Renderer>,
    /// Process-wide active language.
    pub active_language: ActiveLanguage,
}

impl ContentSources {
    /// Bundle collaborators.
    pub fn new(
        store: Arc<dyn PageStore>,
        resolver: Arc<dyn ContentResolver>,
        renderer: Arc<dyn Renderer>,
        active_language: ActiveLanguage,
    ) -> Self {
        Self {
            store,
            resolver,
            renderer,
            active_language,
        }
    }
}

impl fmt::Debug for ContentSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSources")
            .field("store", &"<dyn PageStore>")
            .field("resolver", &"<dyn ContentResolver>")
            .field("renderer", &"<dyn Renderer>")
            .field("active_language", &self.active_language)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
