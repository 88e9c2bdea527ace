//! Content model read by the indexing pipeline.
//!
//! Pages live in a site's content tree. Each page carries one title record per
//! language (title, meta description, redirect, URL) and an ordered list of
//! placeholders, each holding language-tagged blocks. A block resolves to a
//! content-type instance that may declare a [`SearchCapability`].
//!
//! These types are read-only to pagesearch; they are produced by a
//! [`PageStore`](crate::source::PageStore) implementation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

/// Site identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u64);

/// Block identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A tenant/domain scope. Every page belongs to exactly one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Site identifier.
    pub id: SiteId,
    /// Domain the site is served on.
    pub domain: String,
}

impl Site {
    /// Create a site.
    pub fn new(id: u64, domain: impl Into<String>) -> Self {
        Self {
            id: SiteId(id),
            domain: domain.into(),
        }
    }
}

/// Language-qualified page attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    /// Language code this record is written in.
    pub language: String,
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Meta description.
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Redirect target; empty or absent means no redirect.
    #[serde(default)]
    pub redirect: Option<String>,
    /// Absolute URL of the page in this language.
    #[serde(default)]
    pub url: String,
}

impl TitleRecord {
    /// Create a title record with a title and URL.
    pub fn new(
        language: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            title: Some(title.into()),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the meta description.
    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    /// Set the redirect target.
    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    /// Returns `true` if this record redirects elsewhere.
    pub fn has_redirect(&self) -> bool {
        self.redirect.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// A language-tagged unit of content inside a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block identifier.
    pub id: BlockId,
    /// Name of the content-type plugin this block resolves through.
    pub plugin_type: String,
    /// Language the block is authored in.
    pub language: String,
}

impl Block {
    /// Create a block.
    pub fn new(id: u64, plugin_type: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: BlockId(id),
            plugin_type: plugin_type.into(),
            language: language.into(),
        }
    }
}

/// A named content slot on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Slot name, e.g. `content` or `sidebar`.
    pub slot: String,
    /// Blocks of every language, in display order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Placeholder {
    /// Create an empty placeholder.
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// A content node in the site tree; the unit of indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page identifier.
    pub id: PageId,
    /// Owning site.
    pub site_id: SiteId,
    /// One record per language the page is available in.
    #[serde(default)]
    pub titles: Vec<TitleRecord>,
    /// Publication start; absent means "as soon as published".
    #[serde(default)]
    pub publication_date: Option<DateTime<Utc>>,
    /// Publication end; absent means "never expires".
    #[serde(default)]
    pub publication_end_date: Option<DateTime<Utc>>,
    /// Published flag set by the editing workflow.
    #[serde(default)]
    pub published: bool,
    /// Draft copy (as opposed to the public copy).
    #[serde(default)]
    pub is_draft: bool,
    /// Whether viewing the page requires login.
    #[serde(default)]
    pub login_required: bool,
    /// Structural role marker, e.g. the site's entry page.
    #[serde(default)]
    pub reverse_id: Option<String>,
    /// Content slots, in order.
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Page {
    /// Create a published, public page with no titles or content.
    pub fn new(id: u64, site_id: u64) -> Self {
        Self {
            id: PageId(id),
            site_id: SiteId(site_id),
            titles: Vec::new(),
            publication_date: None,
            publication_end_date: None,
            published: true,
            is_draft: false,
            login_required: false,
            reverse_id: None,
            placeholders: Vec::new(),
        }
    }

    /// Add a title record.
    pub fn with_title(mut self, title: TitleRecord) -> Self {
        self.titles.push(title);
        self
    }

    /// Add a placeholder.
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholders.push(placeholder);
        self
    }

    /// Set the structural role marker.
    pub fn with_reverse_id(mut self, reverse_id: impl Into<String>) -> Self {
        self.reverse_id = Some(reverse_id.into());
        self
    }

    /// The title record for `language`, if any.
    pub fn title_record(&self, language: &str) -> Option<&TitleRecord> {
        self.titles.iter().find(|t| t.language == language)
    }

    /// Title in `language`, if the page has one.
    pub fn title(&self, language: &str) -> Option<&str> {
        self.title_record(language)?.title.as_deref()
    }

    /// Meta description in `language`, if the page has one.
    pub fn meta_description(&self, language: &str) -> Option<&str> {
        self.title_record(language)?.meta_description.as_deref()
    }

    /// Absolute URL in `language`; empty if the page has no such record.
    pub fn absolute_url(&self, language: &str) -> &str {
        self.title_record(language)
            .map(|t| t.url.as_str())
            .unwrap_or("")
    }

    /// Returns `true` if the page carries the given structural marker.
    pub fn has_reverse_id(&self, marker: &str) -> bool {
        self.reverse_id.as_deref() == Some(marker)
    }

    /// Returns `true` if the page is publicly visible at `now`.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published
            && self.publication_date.is_none_or(|start| start <= now)
            && self.publication_end_date.is_none_or(|end| end > now)
    }

    /// Blocks across every placeholder tagged with `language`, in traversal order.
    pub fn blocks_in(&self, language: &str) -> impl Iterator<Item = &Block> {
        self.placeholders
            .iter()
            .flat_map(|p| p.blocks.iter())
            .filter(move |b| b.language == language)
    }
}

/// A block's declared participation in text extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCapability {
    /// Attributes whose values are added to the page text, in order.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Whether the rendered output is captured in full.
    #[serde(default)]
    pub full_text: bool,
}

impl SearchCapability {
    /// Capture the named attributes.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            full_text: false,
        }
    }

    /// Capture the full rendered output.
    pub fn full_text() -> Self {
        Self {
            fields: Vec::new(),
            full_text: true,
        }
    }
}

/// Descriptor of a content-type plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    /// Plugin name, matching [`Block::plugin_type`].
    pub name: String,
    /// Search capability declared for every instance of this type.
    #[serde(default)]
    pub search: Option<SearchCapability>,
}

impl ContentType {
    /// Create a descriptor without a search capability.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search: None,
        }
    }

    /// Declare a search capability.
    pub fn with_search(mut self, search: SearchCapability) -> Self {
        self.search = Some(search);
        self
    }
}

/// The resolved, concrete payload of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInstance {
    /// Block this instance belongs to.
    pub block: BlockId,
    /// Plugin name.
    pub plugin_type: String,
    /// Attribute values by name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Search capability declared by this instance.
    #[serde(default)]
    pub search: Option<SearchCapability>,
}

impl ContentInstance {
    /// Create an instance with no attributes.
    pub fn new(block: BlockId, plugin_type: impl Into<String>) -> Self {
        Self {
            block,
            plugin_type: plugin_type.into(),
            attributes: BTreeMap::new(),
            search: None,
        }
    }

    /// Set an attribute value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Declare a search capability.
    pub fn with_search(mut self, search: SearchCapability) -> Self {
        self.search = Some(search);
        self
    }

    /// Attribute value, or `""` when the attribute is missing.
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    /// Search fields of the instance, or of its content type when the
    /// instance declares none.
    pub fn search_fields<'a>(&'a self, content_type: &'a ContentType) -> &'a [String] {
        let declared = |search: &'a Option<SearchCapability>| {
            search
                .as_ref()
                .map(|s| s.fields.as_slice())
                .filter(|fields| !fields.is_empty())
        };
        declared(&self.search)
            .or_else(|| declared(&content_type.search))
            .unwrap_or(&[])
    }

    /// Returns `true` if the instance or its content type asks for full-text capture.
    pub fn captures_full_text(&self, content_type: &ContentType) -> bool {
        self.search.as_ref().is_some_and(|s| s.full_text)
            || content_type.search.as_ref().is_some_and(|s| s.full_text)
    }
}

// ============================================================================
// Tests
// ============================================================================
