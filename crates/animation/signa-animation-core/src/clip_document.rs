//! Clip resource documents.
//!
//! A resource holds either a single clip object or a bundle
//! `{ "animations": [clip, ...] }`. Keypoint values are untagged:
//! a number, `{x,y,z}`, `{x,y,z,w}`, or a 3/4-element array.

use serde::Deserialize;

use crate::data::{ClipData, Interpolation, Keypoint, Track, Transitions, Vec2};
use crate::error::ClipLoadError;
use crate::value::Value;

/// Parse a clip document into zero or more validated clips.
pub fn parse_clip_document(s: &str, resource: &str) -> Result<Vec<ClipData>, ClipLoadError> {
    let doc: RawDocument = serde_json::from_str(s).map_err(|e| ClipLoadError::Parse {
        resource: resource.to_string(),
        reason: e.to_string(),
    })?;
    let raw_clips = match doc {
        RawDocument::Bundle { animations } => animations,
        RawDocument::Single(clip) => vec![clip],
    };

    let mut clips = Vec::with_capacity(raw_clips.len());
    for rc in raw_clips {
        let clip = to_clip(rc).map_err(|reason| ClipLoadError::Parse {
            resource: resource.to_string(),
            reason,
        })?;
        clip.validate_basic()
            .map_err(|reason| ClipLoadError::Invalid {
                resource: resource.to_string(),
                reason,
            })?;
        clips.push(clip);
    }
    Ok(clips)
}

fn to_clip(rc: RawClip) -> Result<ClipData, String> {
    let mut tracks = Vec::with_capacity(rc.tracks.len());
    for rt in rc.tracks {
        let mut points = Vec::with_capacity(rt.points.len());
        for p in rt.points {
            points.push(Keypoint {
                stamp: p.stamp as f32,
                value: to_core_value(&p.value, &rt.animatable_id)?,
                transitions: p.transitions.map(|t| Transitions {
                    r#in: t.r#in.map(to_vec2),
                    r#out: t.r#out.map(to_vec2),
                }),
            });
        }
        tracks.push(Track {
            name: rt.name.unwrap_or_else(|| rt.animatable_id.clone()),
            animatable_id: rt.animatable_id,
            interpolation: rt.interpolation.unwrap_or_default(),
            points,
        });
    }
    Ok(ClipData {
        id: None,
        name: rc.name,
        tracks,
        duration_ms: rc.duration.min(u32::MAX as u64) as u32,
    })
}

fn to_vec2(v: RawVec2) -> Vec2 {
    Vec2 {
        x: v.x as f32,
        y: v.y as f32,
    }
}

fn to_core_value(v: &RawValue, target: &str) -> Result<Value, String> {
    match v {
        RawValue::Number(n) => Ok(Value::Scalar(*n as f32)),
        RawValue::Quat { x, y, z, w } => Ok(Value::Quat([
            *x as f32, *y as f32, *z as f32, *w as f32,
        ])),
        RawValue::Vector3 { x, y, z } => Ok(Value::Vec3([*x as f32, *y as f32, *z as f32])),
        RawValue::Array(a) => match a.as_slice() {
            [x, y, z] => Ok(Value::Vec3([*x as f32, *y as f32, *z as f32])),
            [x, y, z, w] => Ok(Value::Quat([*x as f32, *y as f32, *z as f32, *w as f32])),
            _ => Err(format!(
                "array value for '{target}' must have 3 or 4 components, got {}",
                a.len()
            )),
        },
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Bundle { animations: Vec<RawClip> },
    Single(RawClip),
}

#[derive(Debug, Deserialize)]
struct RawClip {
    name: String,
    #[serde(default)]
    tracks: Vec<RawTrack>,
    duration: u64, // milliseconds
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "animatableId")]
    animatable_id: String,
    #[serde(default)]
    interpolation: Option<Interpolation>,
    points: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    stamp: f64, // 0..1
    value: RawValue,
    #[serde(default)]
    transitions: Option<RawTransitions>,
}

#[derive(Debug, Copy, Clone, Deserialize)]
struct RawVec2 {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawTransitions {
    #[serde(default)]
    #[serde(rename = "in")]
    r#in: Option<RawVec2>,
    #[serde(default)]
    #[serde(rename = "out")]
    r#out: Option<RawVec2>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    // Quat before Vector3: unknown fields are ignored, so {x,y,z,w} would also match Vector3.
    Quat { x: f64, y: f64, z: f64, w: f64 },
    Vector3 { x: f64, y: f64, z: f64 },
    Array(Vec<f64>),
}
