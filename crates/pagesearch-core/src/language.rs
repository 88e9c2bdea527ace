//! Process-wide active language.
//!
//! Rendering collaborators read the active language to pick translations,
//! so index builders must pin it while they extract text for a language.
//! [`ActiveLanguage`] holds the setting; [`ActiveLanguage::enter`] is the only
//! way to change it and returns a [`LanguageGuard`] that restores the previous
//! value when dropped, including on early returns and unwinding panics.
//!
//! ```rust
//! use pagesearch_core::ActiveLanguage;
//!
//! let active = ActiveLanguage::new("en");
//! {
//!     let _guard = active.enter("de");
//!     assert_eq!(active.current(), "de");
//! }
//! assert_eq!(active.current(), "en");
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};

/// Shared handle to one active-language setting.
///
/// Cheap to clone (Arc internals); clones observe the same setting.
/// Workers that build documents in parallel either share one handle (their
/// language sections then run one at a time) or each use their own handle.
#[derive(Clone)]
pub struct ActiveLanguage {
    inner: Arc<ActiveLanguageInner>,
}

struct ActiveLanguageInner {
    current: RwLock<String>,
    // Held for the lifetime of a LanguageGuard.
    section: Mutex<()>,
}

impl ActiveLanguage {
    /// Create a setting with the given initial language.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ActiveLanguageInner {
                current: RwLock::new(initial.into()),
                section: Mutex::new(()),
            }),
        }
    }

    /// The currently active language code.
    pub fn current(&self) -> String {
        self.inner.current.read().clone()
    }

    /// Returns `true` if `code` is the active language.
    pub fn is_active(&self, code: &str) -> bool {
        *self.inner.current.read() == code
    }

    /// Pin the active language to `code` until the returned guard drops.
    ///
    /// Blocks while another guard on this setting is alive. Must not be
    /// called again on the same thread while a guard is held.
    pub fn enter(&self, code: &str) -> LanguageGuard<'_> {
        let section = self.inner.section.lock();
        let previous = {
            let mut current = self.inner.current.write();
            let previous = current.clone();
            if *current != code {
                log::trace!("Activating language '{code}' (was '{previous}')");
                *current = code.to_string();
            }
            previous
        };

        LanguageGuard {
            owner: self,
            previous,
            _section: section,
        }
    }
}

impl fmt::Debug for ActiveLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveLanguage")
            .field("current", &*self.inner.current.read())
            .finish()
    }
}

/// Scoped pin of the active language; restores the previous value on drop.
#[must_use = "the language is restored as soon as the guard is dropped"]
pub struct LanguageGuard<'a> {
    owner: &'a ActiveLanguage,
    previous: String,
    _section: MutexGuard<'a, ()>,
}

impl LanguageGuard<'_> {
    /// The language that was active before this guard was taken.
    pub fn previous(&self) -> &str {
        &self.previous
    }
}

impl Drop for LanguageGuard<'_> {
    fn drop(&mut self) {
        let mut current = self.owner.inner.current.write();
        if *current != self.previous {
            log::trace!("Restoring language '{}'", self.previous);
            *current = std::mem::take(&mut self.previous);
        }
    }
}

impl fmt::Debug for LanguageGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageGuard")
            .field("previous", &self.previous)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
