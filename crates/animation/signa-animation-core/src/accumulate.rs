//! Accumulation of per-target contributions and blending into final Values.

use hashbrown::HashMap;

use crate::interp::functions::normalize4;
use crate::value::Value;

/// Weighted sums per Value kind. Quaternions are summed component-wise with
/// hemisphere alignment to the first contribution, then normalized.
#[derive(Clone, Debug)]
enum AccumEntry {
    Scalar { sum: f32, w: f32 },
    Vec3 { sum: [f32; 3], w: f32 },
    Quat { sum: [f32; 4], first: [f32; 4], w: f32 },
}

impl AccumEntry {
    fn from_value(v: &Value, w: f32) -> Self {
        match v {
            Value::Scalar(x) => AccumEntry::Scalar { sum: *x * w, w },
            Value::Vec3(a) => AccumEntry::Vec3 {
                sum: [a[0] * w, a[1] * w, a[2] * w],
                w,
            },
            Value::Quat(q) => AccumEntry::Quat {
                sum: [q[0] * w, q[1] * w, q[2] * w, q[3] * w],
                first: *q,
                w,
            },
        }
    }

    fn add_value(&mut self, v: &Value, w: f32) {
        match (self, v) {
            (AccumEntry::Scalar { sum, w: ww }, Value::Scalar(x)) => {
                *sum += x * w;
                *ww += w;
            }
            (AccumEntry::Vec3 { sum, w: ww }, Value::Vec3(a)) => {
                sum[0] += a[0] * w;
                sum[1] += a[1] * w;
                sum[2] += a[2] * w;
                *ww += w;
            }
            (AccumEntry::Quat { sum, first, w: ww }, Value::Quat(q)) => {
                let sign = if crate::interp::functions::dot4(*first, *q) < 0.0 {
                    -1.0
                } else {
                    1.0
                };
                sum[0] += q[0] * w * sign;
                sum[1] += q[1] * w * sign;
                sum[2] += q[2] * w * sign;
                sum[3] += q[3] * w * sign;
                *ww += w;
            }
            _ => {
                // Mismatched kind; ignore to stay fail-soft.
            }
        }
    }

    fn weight(&self) -> f32 {
        match self {
            AccumEntry::Scalar { w, .. } | AccumEntry::Vec3 { w, .. } | AccumEntry::Quat { w, .. } => *w,
        }
    }

    fn finalize(self) -> Option<Value> {
        match self {
            AccumEntry::Scalar { sum, w } if w > 0.0 => Some(Value::Scalar(sum / w)),
            AccumEntry::Vec3 { sum, w } if w > 0.0 => {
                Some(Value::Vec3([sum[0] / w, sum[1] / w, sum[2] / w]))
            }
            AccumEntry::Quat { sum, w, .. } if w > 0.0 => Some(Value::Quat(normalize4(sum))),
            _ => None,
        }
    }
}

/// Blended value for one target plus the total weight that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Blended {
    pub value: Value,
    pub weight: f32,
}

/// Accumulates per-target contributions across actions.
#[derive(Default)]
pub struct Accumulator {
    map: HashMap<String, AccumEntry>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, target: &str, value: &Value, weight: f32) {
        if weight <= 0.0 {
            return;
        }
        if let Some(entry) = self.map.get_mut(target) {
            entry.add_value(value, weight);
        } else {
            self.map
                .insert(target.to_string(), AccumEntry::from_value(value, weight));
        }
    }

    /// Weighted averages keyed by target, sorted by target for stable output.
    pub fn finalize(self) -> Vec<(String, Blended)> {
        let mut out: Vec<(String, Blended)> = self
            .map
            .into_iter()
            .filter_map(|(k, entry)| {
                let weight = entry.weight();
                entry.finalize().map(|value| (k, Blended { value, weight }))
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_average_and_total_weight() {
        let mut acc = Accumulator::new();
        acc.add("Hips.position", &Value::Vec3([0.0, 0.0, 0.0]), 0.25);
        acc.add("Hips.position", &Value::Vec3([4.0, 0.0, 0.0]), 0.75);
        acc.add("Hips.position", &Value::Vec3([100.0, 0.0, 0.0]), 0.0);
        let out = acc.finalize();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1.value, Value::Vec3([3.0, 0.0, 0.0]));
        assert!((out[0].1.weight - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_hemisphere_quats_do_not_cancel() {
        let mut acc = Accumulator::new();
        acc.add("Head.quaternion", &Value::Quat([0.0, 0.0, 0.0, 1.0]), 0.5);
        acc.add("Head.quaternion", &Value::Quat([0.0, 0.0, 0.0, -1.0]), 0.5);
        let out = acc.finalize();
        match &out[0].1.value {
            Value::Quat(q) => assert!((q[3].abs() - 1.0).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
    }
}
