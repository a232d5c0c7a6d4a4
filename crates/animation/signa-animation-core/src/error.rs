//! Clip loading errors. All of them are absorbed by the sequencer as skips.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ClipLoadError {
    /// Neither the dictionary nor the letter template names a resource.
    #[error("no animation resource for token {token}")]
    MissingResource { token: String },

    #[error("failed to read clip resource {resource}: {reason}")]
    Io { resource: String, reason: String },

    #[error("failed to parse clip resource {resource}: {reason}")]
    Parse { resource: String, reason: String },

    #[error("clip resource {resource} contains no clips")]
    NoClips { resource: String },

    #[error("invalid clip in {resource}: {reason}")]
    Invalid { resource: String, reason: String },
}

impl ClipLoadError {
    /// Short category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingResource { .. } => "missing",
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::NoClips { .. } => "empty",
            Self::Invalid { .. } => "invalid",
        }
    }
}
