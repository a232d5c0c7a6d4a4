//! Output contracts.
//!
//! Outputs carry the blended pose for this tick (keyed by rig target path)
//! and the playback events raised since the previous tick.

use serde::{Deserialize, Serialize};

use signa_gloss_core::Token;

/// One blended target value this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    /// Target path, e.g. `LeftHand.quaternion`.
    pub key: String,
    pub value: crate::value::Value,
    /// Total weight of the contributing actions. Below 1 during a fade to
    /// rest; renderers blend the remainder with the bind pose.
    pub weight: f32,
}

/// Presentation-level playback notifications.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SequencerEvent {
    /// Playback of `queue[index]` begins (fired before its clip resolves).
    TokenChanged { token: Token, index: usize },
    /// The clip for `queue[index]` could not be loaded; playback moved on.
    TokenSkipped {
        token: Token,
        index: usize,
        reason: String,
    },
    /// The queue is exhausted. Fired once per loaded queue.
    Completed,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<SequencerEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Convenience: the last `TokenChanged` in this frame, if any.
    pub fn last_token_change(&self) -> Option<(&Token, usize)> {
        self.events.iter().rev().find_map(|e| match e {
            SequencerEvent::TokenChanged { token, index } => Some((token, *index)),
            _ => None,
        })
    }

    pub fn completed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SequencerEvent::Completed))
    }
}
