//! Language index documents.
//!
//! A [`PageDocument`] is what a language index produces for one page. It maps
//! one-to-one onto the fields in [`crate::fields`].
//!
//! # Text layout
//!
//! The document text is assembled by [`compose_text`]:
//!
//! ```text
//! <block text> <meta description> <title>␠
//! ```
//!
//! Block text is omitted (with its separator) when the page has no
//! contributing blocks; meta description and title are always present, as
//! empty strings when the page has none.
//!
//! ```rust
//! use pagesearch_fts::document::compose_text;
//!
//! assert_eq!(compose_text("Hello world", Some("Home page"), Some("Welcome")),
//!            "Hello world Home page Welcome ");
//! assert_eq!(compose_text("", None, Some("Welcome")), " Welcome ");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Page, PageId, SiteId};

/// The searchable record of one page in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDocument {
    // Identity
    /// `<index name>.<page id>`.
    pub id: String,
    /// Source page.
    pub page_id: PageId,
    /// Language the document was built for.
    pub language: String,

    // Document field
    /// Searchable text; indexed, not stored.
    pub text: String,

    // Attributes
    /// Publication start, if set.
    pub pub_date: Option<DateTime<Utc>>,
    /// Whether viewing the page requires login.
    pub login_required: bool,
    /// Absolute URL in the document's language.
    pub url: String,
    /// Title in the document's language.
    pub title: String,
    /// Owning site.
    pub site_id: SiteId,
}

impl PageDocument {
    /// Create a document builder.
    pub fn builder() -> PageDocumentBuilder {
        PageDocumentBuilder::default()
    }

    /// Map page attributes onto a document with empty text.
    pub fn from_page(index_name: &str, page: &Page, language: &str) -> Self {
        Self {
            id: document_id(index_name, page.id),
            page_id: page.id,
            language: language.to_string(),
            text: String::new(),
            pub_date: page.publication_date,
            login_required: page.login_required,
            url: page.absolute_url(language).to_string(),
            title: page.title(language).unwrap_or_default().to_string(),
            site_id: page.site_id,
        }
    }
}

/// Document identifier of `page` in the index called `index_name`.
pub fn document_id(index_name: &str, page: PageId) -> String {
    format!("{index_name}.{page}")
}

/// Assemble the document text from block text, meta description, and title.
pub fn compose_text(blocks: &str, meta_description: Option<&str>, title: Option<&str>) -> String {
    let meta = meta_description.unwrap_or_default();
    let title = title.unwrap_or_default();

    let mut text = String::with_capacity(blocks.len() + meta.len() + title.len() + 3);
    if !blocks.is_empty() {
        text.push_str(blocks);
        text.push(' ');
    }
    text.push_str(meta);
    text.push(' ');
    text.push_str(title);
    text.push(' ');
    text
}

/// Builder for PageDocument.
#[derive(Debug)]
pub struct PageDocumentBuilder {
    doc: PageDocument,
}

impl Default for PageDocumentBuilder {
    fn default() -> Self {
        Self {
            doc: PageDocument {
                id: String::new(),
                page_id: PageId(0),
                language: String::new(),
                text: String::new(),
                pub_date: None,
                login_required: false,
                url: String::new(),
                title: String::new(),
                site_id: SiteId(0),
            },
        }
    }
}

impl PageDocumentBuilder {
    /// Set the document ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.doc.id = id.into();
        self
    }

    /// Set the source page.
    pub fn page_id(mut self, page_id: u64) -> Self {
        self.doc.page_id = PageId(page_id);
        self
    }

    /// Set the language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.doc.language = language.into();
        self
    }

    /// Set the text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.doc.text = text.into();
        self
    }

    /// Set the publication date.
    pub fn pub_date(mut self, pub_date: DateTime<Utc>) -> Self {
        self.doc.pub_date = Some(pub_date);
        self
    }

    /// Set the login-required flag.
    pub fn login_required(mut self, login_required: bool) -> Self {
        self.doc.login_required = login_required;
        self
    }

    /// Set the URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.doc.url = url.into();
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.doc.title = title.into();
        self
    }

    /// Set the site.
    pub fn site_id(mut self, site_id: u64) -> Self {
        self.doc.site_id = SiteId(site_id);
        self
    }

    /// Build the document.
    pub fn build(self) -> PageDocument {
        self.doc
    }
}

// ============================================================================
// Tests
// ============================================================================
