//! Common fixtures and harness for pagesearch-fts integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pagesearch_core::{ActiveLanguage, IndexSettings, Result};
use pagesearch_fts::{
    BlockId, ContentInstance, ContentSources, ContentType, MemoryContent, MemoryStore,
    RenderContext, Renderer, SearchCapability,
};
use parking_lot::Mutex;

/// Settings for an English/German installation.
pub const SETTINGS_TOML: &str = r#"
entry_page_marker = "homepage"
batch_size = 2

[[languages]]
code = "en"
name = "English"

[[languages]]
code = "de"
name = "German"
"#;

/// Two sites, six pages:
///
/// | page | site | notes |
/// |------|------|-------|
/// | 1 | 1 | entry page (en, de) |
/// | 2 | 1 | en + de, blocks in both languages |
/// | 3 | 1 | en only, login required, dated |
/// | 4 | 2 | en; de record redirects |
/// | 5 | 2 | draft copy |
/// | 6 | 2 | not published |
pub const STORE_JSON: &str = r#"{
  "sites": [
    { "id": 1, "domain": "example.test" },
    { "id": 2, "domain": "example.org" }
  ],
  "pages": [
    {
      "id": 1, "site_id": 1, "published": true, "reverse_id": "homepage",
      "titles": [
        { "language": "en", "title": "Home", "url": "/en/" },
        { "language": "de", "title": "Start", "url": "/de/" }
      ]
    },
    {
      "id": 2, "site_id": 1, "published": true,
      "titles": [
        { "language": "en", "title": "Opening hours", "meta_description": "Visit us",
          "url": "/en/hours/" },
        { "language": "de", "title": "Öffnungszeiten", "url": "/de/zeiten/" }
      ],
      "placeholders": [
        { "slot": "content", "blocks": [
          { "id": 10, "plugin_type": "text", "language": "en" },
          { "id": 11, "plugin_type": "text", "language": "de" },
          { "id": 12, "plugin_type": "html", "language": "en" }
        ] }
      ]
    },
    {
      "id": 3, "site_id": 1, "published": true, "login_required": true,
      "publication_date": "2020-01-01T00:00:00Z",
      "titles": [ { "language": "en", "title": "Members", "url": "/en/members/" } ]
    },
    {
      "id": 4, "site_id": 2, "published": true,
      "titles": [
        { "language": "en", "title": "Workshops", "url": "/en/workshops/" },
        { "language": "de", "title": "Kurse", "url": "/de/kurse/", "redirect": "/de/alt/" }
      ],
      "placeholders": [
        { "slot": "main", "blocks": [ { "id": 13, "plugin_type": "text", "language": "en" } ] }
      ]
    },
    {
      "id": 5, "site_id": 2, "published": true, "is_draft": true,
      "titles": [ { "language": "en", "title": "Draft", "url": "/en/draft/" } ]
    },
    {
      "id": 6, "site_id": 2, "published": false,
      "titles": [ { "language": "en", "title": "Hidden", "url": "/en/hidden/" } ]
    }
  ]
}"#;

/// Content types and instances for the fixture blocks.
pub fn fixture_content() -> MemoryContent {
    let body = || SearchCapability::fields(["body"]);
    MemoryContent::new()
        .with_type(ContentType::new("text"))
        .with_type(ContentType::new("html").with_search(SearchCapability::full_text()))
        .with_instance(
            ContentInstance::new(BlockId(10), "text")
                .with_attribute("body", "<p>We open at nine</p>")
                .with_search(body()),
        )
        .with_instance(
            ContentInstance::new(BlockId(11), "text")
                .with_attribute("body", "<p>Wir öffnen um neun</p>")
                .with_search(body()),
        )
        .with_instance(
            ContentInstance::new(BlockId(12), "html").with_attribute("body", "<b>Bring your ticket</b>"),
        )
        .with_instance(
            ContentInstance::new(BlockId(13), "text")
                .with_attribute("body", "Running workshops for teachers")
                .with_search(body()),
        )
}

/// Renderer that records every render made while the active language
/// differs from the render context's language.
pub struct CheckingRenderer {
    active: ActiveLanguage,
    mismatches: Mutex<Vec<String>>,
    calls: Mutex<usize>,
}

impl CheckingRenderer {
    /// Check renders against `active`.
    pub fn new(active: ActiveLanguage) -> Self {
        Self {
            active,
            mismatches: Mutex::new(Vec::new()),
            calls: Mutex::new(0),
        }
    }

    /// Renders made in the wrong language.
    pub fn mismatches(&self) -> Vec<String> {
        self.mismatches.lock().clone()
    }

    /// Total renders.
    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl Renderer for CheckingRenderer {
    fn render(&self, instance: &ContentInstance, context: &RenderContext) -> Result<String> {
        *self.calls.lock() += 1;
        let active = self.active.current();
        if active != context.language {
            self.mismatches.lock().push(format!(
                "block {} rendered for '{}' while '{active}' was active",
                instance.block, context.language
            ));
        }
        Ok(format!("<div>{}</div>", instance.attribute("body")))
    }
}

/// Test harness wiring the fixtures together.
pub struct TestHarness {
    /// Parsed settings.
    pub settings: IndexSettings,
    /// Shared active language.
    pub active_language: ActiveLanguage,
    /// Renderer that checks the active language.
    pub renderer: Arc<CheckingRenderer>,
    /// Collaborators handed to the indexes.
    pub sources: ContentSources,
}

impl TestHarness {
    /// Build the harness from the fixture settings and store.
    pub fn new() -> Self {
        Self::with_settings(IndexSettings::from_toml_str(SETTINGS_TOML).unwrap())
    }

    /// Build the harness with custom settings.
    pub fn with_settings(settings: IndexSettings) -> Self {
        let active_language = ActiveLanguage::new(settings.initial_language().unwrap());
        let renderer = Arc::new(CheckingRenderer::new(active_language.clone()));
        let sources = ContentSources::new(
            Arc::new(MemoryStore::from_json(STORE_JSON).unwrap()),
            Arc::new(fixture_content()),
            renderer.clone(),
            active_language.clone(),
        );
        Self {
            settings,
            active_language,
            renderer,
            sources,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
