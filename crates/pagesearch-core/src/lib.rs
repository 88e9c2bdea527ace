//! pagesearch core: shared errors, settings, and the active-language guard.
//!
//! This crate provides the foundational types used across the pagesearch
//! crates. It has no internal pagesearch dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: Indexing settings loaded from TOML
//! - [`language`]: Process-wide active language and its scoped guard

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod language;

// Re-export key types at crate root for convenience
pub use config::{IndexSettings, LanguageEntry, PageErrorPolicy};
pub use error::{Error, Result};
pub use language::{ActiveLanguage, LanguageGuard};
