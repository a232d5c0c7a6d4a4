//! Track sampling.
//!
//! - Keypoints are ordered by normalized stamp in [0,1].
//! - `Linear` tracks lerp (NLERP for quaternions) between neighbours.
//! - `Step` tracks hold the left keypoint.
//! - `Bezier` tracks ease each segment with cubic-bezier timing:
//!   cp0 = Pi.transitions.out or default {x:0.42, y:0.0}
//!   cp1 = P(i+1).transitions.in or default {x:0.58, y:1.0}

use crate::data::{Interpolation, Keypoint, Track};
use crate::interp::functions::{bezier_value, linear_value, step_value};
use crate::value::Value;

const DEFAULT_OUT_X: f32 = 0.42;
const DEFAULT_OUT_Y: f32 = 0.0;
const DEFAULT_IN_X: f32 = 0.58;
const DEFAULT_IN_Y: f32 = 1.0;

/// Find the segment [i, i+1] that contains normalized time u, and return (i, i+1, local_t).
/// Before the first / after the last keypoint the index pair collapses to that keypoint.
fn find_segment(points: &[Keypoint], u: f32) -> (usize, usize, f32) {
    let n = points.len();
    if n == 0 {
        return (0, 0, 0.0);
    }
    if n == 1 || u <= points[0].stamp {
        return (0, 0, 0.0);
    }
    if u >= points[n - 1].stamp {
        return (n - 1, n - 1, 0.0);
    }
    // First keypoint strictly after u.
    let hi = points.partition_point(|p| p.stamp <= u).min(n - 1);
    let lo = hi - 1;
    let t0 = points[lo].stamp;
    let t1 = points[hi].stamp;
    let denom = (t1 - t0).max(f32::EPSILON);
    (lo, hi, ((u - t0) / denom).clamp(0.0, 1.0))
}

/// Sample a track at normalized time u in [0,1]. `None` for tracks without keypoints.
pub fn sample_track(track: &Track, u: f32) -> Option<Value> {
    let points = &track.points;
    match points.len() {
        0 => None,
        1 => Some(points[0].value.clone()),
        _ => {
            let (i0, i1, lt) = find_segment(points, u.clamp(0.0, 1.0));
            if i0 == i1 {
                return Some(points[i0].value.clone());
            }
            let left = &points[i0];
            let right = &points[i1];
            let v = match track.interpolation {
                Interpolation::Step => step_value(&left.value),
                Interpolation::Linear => linear_value(&left.value, &right.value, lt),
                Interpolation::Bezier => {
                    let (x1, y1) = left
                        .transitions
                        .as_ref()
                        .and_then(|t| t.r#out.as_ref())
                        .map(|v| (v.x, v.y))
                        .unwrap_or((DEFAULT_OUT_X, DEFAULT_OUT_Y));
                    let (x2, y2) = right
                        .transitions
                        .as_ref()
                        .and_then(|t| t.r#in.as_ref())
                        .map(|v| (v.x, v.y))
                        .unwrap_or((DEFAULT_IN_X, DEFAULT_IN_Y));
                    bezier_value(&left.value, &right.value, lt, [x1, y1, x2, y2])
                }
            };
            Some(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_track(interpolation: Interpolation, keys: &[(f32, f32)]) -> Track {
        Track {
            name: "t".into(),
            animatable_id: "Bone.value".into(),
            interpolation,
            points: keys
                .iter()
                .map(|(s, v)| Keypoint {
                    stamp: *s,
                    value: Value::Scalar(*v),
                    transitions: None,
                })
                .collect(),
        }
    }

    fn scalar(v: Option<Value>) -> f32 {
        match v {
            Some(Value::Scalar(x)) => x,
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn linear_step_and_bezier_sampling() {
        let keys = [(0.0, 0.0), (0.5, 1.0), (1.0, 3.0)];
        let lin = scalar_track(Interpolation::Linear, &keys);
        assert!((scalar(sample_track(&lin, 0.25)) - 0.5).abs() < 1e-6);
        assert!((scalar(sample_track(&lin, 0.75)) - 2.0).abs() < 1e-6);
        assert_eq!(scalar(sample_track(&lin, 2.0)), 3.0);

        let step = scalar_track(Interpolation::Step, &keys);
        assert_eq!(scalar(sample_track(&step, 0.49)), 0.0);
        assert_eq!(scalar(sample_track(&step, 0.5)), 1.0);

        let bez = scalar_track(Interpolation::Bezier, &keys);
        let mid = scalar(sample_track(&bez, 0.25));
        assert!((mid - 0.5).abs() < 1e-3, "ease-in-out is symmetric at the midpoint");
        assert!(scalar(sample_track(&bez, 0.05)) < 0.1);
    }

    #[test]
    fn empty_tracks_sample_to_none() {
        let t = scalar_track(Interpolation::Linear, &[]);
        assert!(sample_track(&t, 0.3).is_none());
    }
}
