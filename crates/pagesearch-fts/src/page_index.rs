//! Per-language page indexes.
//!
//! A [`PageIndex`] binds one configured language to a language-specific
//! page-type view and to the shared [`ContentSources`]. It exposes the
//! field definitions, the candidate set, and per-page document building
//! through the object-safe [`SearchIndex`] trait, so the registry can hold
//! page indexes next to any other index kind.
//!
//! Document building runs inside a [`LanguageGuard`](pagesearch_core::LanguageGuard)
//! section: the active language is pinned to the index's language while the
//! text is aggregated and restored afterwards, whether or not the build
//! succeeds.

use chrono::{DateTime, Utc};
use pagesearch_core::{Error, IndexSettings, LanguageEntry, Result};

use crate::aggregate::aggregate_text;
use crate::candidates::candidate_set;
use crate::document::{PageDocument, compose_text};
use crate::fields::{FieldSpec, page_fields};
use crate::model::Page;
use crate::source::ContentSources;

// ============================================================================
// Page-type views
// ============================================================================

/// Language-specific view over the page type an index is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageTypeView {
    /// Registry name of the index built on this view.
    pub name: String,
    /// Language the view is pinned to.
    pub language: String,
}

/// Resolves the page-type view for a configured language.
pub trait PageTypeResolver: Send + Sync {
    /// View for `language`; failures are `Error::PageTypeUnresolved`.
    fn resolve(&self, language: &LanguageEntry) -> Result<PageTypeView>;
}

/// Derives `page_<code>` views, with dashes in the code folded to
/// underscores (`pt-br` gives `page_pt_br`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyPageTypes;

impl ProxyPageTypes {
    /// View name for `code`, if the code can form one.
    pub fn view_name(code: &str) -> Option<String> {
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| format!("page_{}", code.to_ascii_lowercase().replace('-', "_")))
    }
}

impl PageTypeResolver for ProxyPageTypes {
    fn resolve(&self, language: &LanguageEntry) -> Result<PageTypeView> {
        let name = Self::view_name(&language.code).ok_or_else(|| {
            Error::page_type_unresolved(
                &language.code,
                "language code cannot form a page-type name",
            )
        })?;
        Ok(PageTypeView {
            name,
            language: language.code.clone(),
        })
    }
}

// ============================================================================
// SearchIndex
// ============================================================================

/// An index the external search engine can populate.
pub trait SearchIndex: Send + Sync {
    /// Registry name, unique within a registry.
    fn name(&self) -> &str;

    /// Language the index is bound to, if any.
    fn language(&self) -> Option<&str>;

    /// Declared fields.
    fn fields(&self) -> &[FieldSpec];

    /// Pages to index, as of now.
    fn candidate_set(&self) -> Result<Vec<Page>>;

    /// Build the document for one page.
    fn build_document(&self, page: &Page) -> Result<PageDocument>;
}

// ============================================================================
// PageIndex
// ============================================================================

/// Page index for one configured language.
#[derive(Debug, Clone)]
pub struct PageIndex {
    view: PageTypeView,
    language: LanguageEntry,
    entry_page_marker: String,
    sources: ContentSources,
}

impl PageIndex {
    /// Bind `code` to `view`.
    ///
    /// Fails with `Error::UnknownLanguage` if `code` is not configured in
    /// `settings`, and with a configuration error if `view` belongs to a
    /// different language.
    pub fn new(
        settings: &IndexSettings,
        code: &str,
        view: PageTypeView,
        sources: ContentSources,
    ) -> Result<Self> {
        let language = settings
            .language(code)
            .cloned()
            .ok_or_else(|| Error::unknown_language(code))?;

        if view.language != language.code {
            return Err(Error::config(format!(
                "page-type view '{}' is pinned to '{}', not '{}'",
                view.name, view.language, language.code
            )));
        }

        Ok(Self {
            view,
            language,
            entry_page_marker: settings.entry_page_marker.clone(),
            sources,
        })
    }

    /// The configured language entry.
    pub fn language_entry(&self) -> &LanguageEntry {
        &self.language
    }

    /// The bound page-type view.
    pub fn view(&self) -> &PageTypeView {
        &self.view
    }

    /// Candidate set as of `now`.
    pub fn candidate_set_at(&self, now: DateTime<Utc>) -> Result<Vec<Page>> {
        candidate_set(
            self.sources.store.as_ref(),
            &self.language.code,
            &self.entry_page_marker,
            now,
        )
    }
}

impl SearchIndex for PageIndex {
    fn name(&self) -> &str {
        &self.view.name
    }

    fn language(&self) -> Option<&str> {
        Some(&self.language.code)
    }

    fn fields(&self) -> &[FieldSpec] {
        page_fields()
    }

    fn candidate_set(&self) -> Result<Vec<Page>> {
        self.candidate_set_at(Utc::now())
    }

    fn build_document(&self, page: &Page) -> Result<PageDocument> {
        let code = self.language.code.as_str();
        let _guard = self.sources.active_language.enter(code);

        let mut doc = PageDocument::from_page(&self.view.name, page, code);
        let blocks = aggregate_text(&self.sources, page, code)?;
        doc.text = compose_text(&blocks, page.meta_description(code), page.title(code));

        log::debug!("Built document {} ({} chars)", doc.id, doc.text.len());
        Ok(doc)
    }
}

// ============================================================================
// Tests
// ============================================================================
