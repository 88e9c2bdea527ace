//! Indexing settings.
//!
//! Host applications describe which languages get a page index, and how the
//! reindex driver behaves, in a TOML document:
//!
//! ```toml
//! default_language = "en"
//! entry_page_marker = "homepage"
//! index_root = "/var/lib/pagesearch"
//! batch_size = 200
//! on_page_error = "skip"
//!
//! [[languages]]
//! code = "en"
//! name = "English"
//!
//! [[languages]]
//! code = "de"
//! name = "German"
//! ```
//!
//! Only `languages` is required. Settings are validated before any index is
//! constructed; validation failures are configuration errors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One configured language: its code and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Language code, e.g. `en` or `pt-br`.
    pub code: String,
    /// Human-readable name, e.g. `English`.
    pub name: String,
}

impl LanguageEntry {
    /// Create a language entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// What the reindex driver does when building one page's document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageErrorPolicy {
    /// Log the failure, count it, and continue with the next page.
    #[default]
    Skip,
    /// Stop the run, keep the index's previous contents, and return the error.
    Abort,
}

/// Settings for the page indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Ordered languages; one page index is built per entry.
    pub languages: Vec<LanguageEntry>,

    /// Language active when the process starts. Defaults to the first entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    /// Structural marker of a site's entry page, which is never indexed.
    #[serde(default = "default_entry_page_marker")]
    pub entry_page_marker: String,

    /// Directory holding one on-disk index per language index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_root: Option<PathBuf>,

    /// Documents per commit in the reindex driver.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Policy for per-page build errors in the reindex driver.
    #[serde(default)]
    pub on_page_error: PageErrorPolicy,
}

fn default_entry_page_marker() -> String {
    "homepage".to_string()
}

fn default_batch_size() -> usize {
    100
}

impl IndexSettings {
    /// Create settings for the given languages with every other key defaulted.
    pub fn new(languages: Vec<LanguageEntry>) -> Self {
        Self {
            languages,
            default_language: None,
            entry_page_marker: default_entry_page_marker(),
            index_root: None,
            batch_size: default_batch_size(),
            on_page_error: PageErrorPolicy::default(),
        }
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse, and validate a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Loading index settings from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Check the settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(Error::config("at least one language must be configured"));
        }

        let mut seen = HashSet::new();
        for entry in &self.languages {
            if entry.code.trim().is_empty() {
                return Err(Error::config(format!(
                    "language '{}' has an empty code",
                    entry.name
                )));
            }
            if !seen.insert(entry.code.as_str()) {
                return Err(Error::config(format!(
                    "language '{}' is configured more than once",
                    entry.code
                )));
            }
        }

        if let Some(ref code) = self.default_language {
            if self.language(code).is_none() {
                return Err(Error::config(format!(
                    "default language '{code}' is not among the configured languages"
                )));
            }
        }

        if self.batch_size == 0 {
            return Err(Error::config("batch_size must be greater than zero"));
        }

        if self.entry_page_marker.is_empty() {
            return Err(Error::config("entry_page_marker must not be empty"));
        }

        Ok(())
    }

    /// Look up a configured language by code.
    pub fn language(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|entry| entry.code == code)
    }

    /// Returns `true` if `code` is configured.
    pub fn has_language(&self, code: &str) -> bool {
        self.language(code).is_some()
    }

    /// Configured language codes, in order.
    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|entry| entry.code.as_str())
    }

    /// The language that should be active at startup.
    pub fn initial_language(&self) -> Option<&str> {
        self.default_language
            .as_deref()
            .or_else(|| self.languages.first().map(|entry| entry.code.as_str()))
    }
}

// ============================================================================
// Tests
// ============================================================================
