use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use signa_animation_core::SequencerConfig;
use signa_gloss_core::DictionaryError;

/// Where a session finds its dictionary and clips, plus the playback policy.
///
/// ```json
/// { "dictionary": "dictionary.json", "clips_root": ".", "sequencer": { "fade_duration": 0.3 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Path of the dictionary JSON object.
    pub dictionary: PathBuf,
    /// Directory clip resource identifiers are resolved against.
    #[serde(default = "default_clips_root")]
    pub clips_root: PathBuf,
    #[serde(default)]
    pub sequencer: SequencerConfig,
}

fn default_clips_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read session config at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("session config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid session config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

impl SessionConfig {
    pub fn new(dictionary: impl Into<PathBuf>, clips_root: impl Into<PathBuf>) -> Self {
        Self {
            dictionary: dictionary.into(),
            clips_root: clips_root.into(),
            sequencer: SequencerConfig::default(),
        }
    }

    /// Parse a config; relative paths are kept as written.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SessionConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file; relative paths are resolved against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut cfg = Self::from_json_str(&text)?;
        if let Some(base) = path.parent() {
            cfg.resolve_relative_to(base);
        }
        Ok(cfg)
    }

    /// Prefix relative paths with `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        if self.dictionary.is_relative() {
            self.dictionary = base.join(&self.dictionary);
        }
        if self.clips_root.is_relative() {
            self.clips_root = base.join(&self.clips_root);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let seq = &self.sequencer;
        if !(seq.playback_rate.is_finite() && seq.playback_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "playback_rate must be positive, got {}",
                seq.playback_rate
            )));
        }
        for (name, v) in [
            ("fade_duration", seq.fade_duration),
            ("completion_fade", seq.completion_fade),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number of seconds, got {v}"
                )));
            }
        }
        if self.dictionary.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("dictionary path is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = SessionConfig::from_json_str(r#"{"dictionary":"dict.json"}"#).unwrap();
        assert_eq!(cfg.clips_root, PathBuf::from("."));
        assert_eq!(cfg.sequencer, SequencerConfig::default());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let mut cfg = SessionConfig::new("dict.json", "clips");
        cfg.resolve_relative_to(Path::new("/srv/signa"));
        assert_eq!(cfg.dictionary, PathBuf::from("/srv/signa/dict.json"));
        assert_eq!(cfg.clips_root, PathBuf::from("/srv/signa/clips"));
    }

    #[test]
    fn nonsense_rates_are_rejected() {
        let err = SessionConfig::from_json_str(
            r#"{"dictionary":"d.json","sequencer":{"playback_rate":0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(matches!(
            SessionConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
