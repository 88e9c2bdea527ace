//! Error types for pagesearch.

use std::path::{Path, PathBuf};

/// Errors that can occur while building page indexes.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid or inconsistent settings.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A language code that is not among the configured languages.
    #[error("Language '{code}' is not configured")]
    UnknownLanguage {
        /// The offending language code
        code: String,
    },

    /// The page-type view for a configured language could not be resolved.
    #[error("No page type for language '{language}': {message}")]
    PageTypeUnresolved {
        /// Language code whose view is missing
        language: String,
        /// Why resolution failed
        message: String,
    },

    /// The page/block store failed to answer a query.
    #[error("Store error: {message}")]
    Store {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A block could not be resolved to its content-type instance.
    #[error("Cannot resolve block {block}: {message}")]
    Resolve {
        /// Block identifier
        block: String,
        /// What went wrong
        message: String,
    },

    /// A block failed to render.
    #[error("Cannot render block {block}: {message}")]
    Render {
        /// Block identifier
        block: String,
        /// What went wrong
        message: String,
    },

    /// The search-engine sink rejected an operation.
    #[error("Index operation failed: {message}")]
    Operation {
        /// What went wrong
        message: String,
    },

    /// I/O error with the path that caused it.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::IndexSettings`].
    #[error("Invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience `Result` type alias for pagesearch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error only invalidates a single block's contribution.
    ///
    /// Block-recoverable errors are skipped during text aggregation; every
    /// other error propagates to the caller.
    pub fn is_block_recoverable(&self) -> bool {
        matches!(self, Error::Resolve { .. } | Error::Render { .. })
    }

    /// Returns whether this error belongs to the startup configuration class.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::UnknownLanguage { .. }
                | Error::PageTypeUnresolved { .. }
                | Error::Toml(_)
        )
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an unknown-language error.
    pub fn unknown_language<S: Into<String>>(code: S) -> Self {
        Error::UnknownLanguage { code: code.into() }
    }

    /// Creates a page-type resolution error.
    pub fn page_type_unresolved<L, M>(language: L, message: M) -> Self
    where
        L: Into<String>,
        M: Into<String>,
    {
        Error::PageTypeUnresolved {
            language: language.into(),
            message: message.into(),
        }
    }

    /// Creates a new store error with a message.
    pub fn store<S: Into<String>>(message: S) -> Self {
        Error::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new store error with a message and source error.
    pub fn store_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a block resolution error.
    pub fn resolve<B: ToString, M: Into<String>>(block: B, message: M) -> Self {
        Error::Resolve {
            block: block.to_string(),
            message: message.into(),
        }
    }

    /// Creates a block render error.
    pub fn render<B: ToString, M: Into<String>>(block: B, message: M) -> Self {
        Error::Render {
            block: block.to_string(),
            message: message.into(),
        }
    }

    /// Creates an index operation error.
    pub fn operation<S: Into<String>>(message: S) -> Self {
        Error::Operation {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
