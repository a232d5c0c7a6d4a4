//! Error types for glossing.

use thiserror::Error;

/// Rejected token construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token must not be blank")]
    Blank,
    #[error("token must not contain whitespace: {token:?}")]
    Whitespace { token: String },
}

/// Dictionary loading failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DictionaryError {
    #[error("failed to read dictionary at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dictionary parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Caller-facing advisories produced by [`crate::translate_checked`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TranslateError {
    /// Blank or whitespace-only input.
    #[error("nothing to translate")]
    InputEmpty,
    /// Every word was filtered and nothing was left to spell.
    #[error("no translatable content")]
    NoTranslatableContent,
}
