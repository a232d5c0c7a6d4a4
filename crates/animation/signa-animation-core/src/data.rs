//! Canonical clip data model.
//!
//! A clip is a set of tracks; each track drives one property of one bone
//! (`<bone>.<property>`, optionally behind a root hierarchy prefix) through
//! keypoints stamped in normalized time.

use serde::{Deserialize, Serialize};

use crate::ids::ClipId;
use crate::value::Value;

/// 2D vector used for transition control points (normalized 0..1 domain).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Per-keypoint cubic-bezier timing handles, used by [`Interpolation::Bezier`] tracks.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Transitions {
    #[serde(default)]
    #[serde(rename = "in")]
    pub r#in: Option<Vec2>,
    #[serde(default)]
    #[serde(rename = "out")]
    pub r#out: Option<Vec2>,
}

/// A single keypoint in normalized time [0..1].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keypoint {
    pub stamp: f32,
    pub value: Value,
    #[serde(default)]
    pub transitions: Option<Transitions>,
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    Bezier,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    /// Target path, e.g. `Armature/mixamorigHips.quaternion`.
    #[serde(rename = "animatableId")]
    pub animatable_id: String,
    #[serde(default)]
    pub interpolation: Interpolation,
    pub points: Vec<Keypoint>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipData {
    /// Assigned when the clip is added to a mixer.
    #[serde(skip)]
    pub id: Option<ClipId>,
    pub name: String,
    pub tracks: Vec<Track>,
    /// Duration in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u32,
}

impl ClipData {
    #[inline]
    pub fn duration_secs(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }

    /// Validate basic invariants (monotonic stamps in [0,1], non-zero duration).
    pub fn validate_basic(&self) -> Result<(), String> {
        if self.duration_ms == 0 {
            return Err(format!("clip '{}' must have a duration > 0 ms", self.name));
        }
        for track in &self.tracks {
            let mut last = -f32::INFINITY;
            let mut kind = None;
            for p in &track.points {
                if !p.stamp.is_finite() || p.stamp < 0.0 || p.stamp > 1.0 {
                    return Err(format!(
                        "Keypoint stamp must be in [0,1] and finite for '{}'",
                        track.animatable_id
                    ));
                }
                if p.stamp < last {
                    return Err(format!(
                        "Keypoint stamps must be non-decreasing for '{}'",
                        track.animatable_id
                    ));
                }
                last = p.stamp;
                match kind {
                    None => kind = Some(p.value.kind()),
                    Some(k) if k != p.value.kind() => {
                        return Err(format!(
                            "Keypoint values must share one kind for '{}'",
                            track.animatable_id
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
