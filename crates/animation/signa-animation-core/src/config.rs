//! Playback policy for the sequencer.

use serde::{Deserialize, Serialize};

use crate::retarget::RetargetOptions;

/// Placeholder substituted with the spelled letter in [`SequencerConfig::letter_resource`].
pub const LETTER_PLACEHOLDER: &str = "{letter}";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SequencerConfig {
    /// Cross-fade duration between consecutive clips, in seconds.
    pub fade_duration: f32,
    /// Fade-out applied to the last clip once the queue is exhausted, in seconds.
    pub completion_fade: f32,
    /// Uniform time scale applied to every loaded clip (0.5 = half speed).
    pub playback_rate: f32,
    /// Fade the first clip of a queue in instead of starting it at full weight.
    pub fade_in_first: bool,
    /// Resource template for spelling tokens missing from the dictionary.
    /// `None` disables the fallback.
    pub letter_resource: Option<String>,
    pub retarget: RetargetOptions,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            fade_duration: 0.3,
            completion_fade: 0.5,
            playback_rate: 0.5,
            fade_in_first: false,
            letter_resource: Some(format!("clips/letters/{LETTER_PLACEHOLDER}.json")),
            retarget: RetargetOptions::default(),
        }
    }
}

impl SequencerConfig {
    /// Resource identifier for a spelled letter, if the fallback is enabled.
    pub fn letter_resource_for(&self, letter: char) -> Option<String> {
        self.letter_resource
            .as_ref()
            .map(|tpl| tpl.replace(LETTER_PLACEHOLDER, &letter.to_string()))
    }
}
