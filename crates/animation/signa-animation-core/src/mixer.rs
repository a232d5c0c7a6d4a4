//! Mixer: owns clips and the actions that play them against one rig.
//!
//! Each tick advances fades and action clocks, reports actions that reached
//! their end, and blends every weighted action into per-target pose changes.

use serde::{Deserialize, Serialize};

use crate::accumulate::Accumulator;
use crate::data::ClipData;
use crate::ids::{ActionId, ClipId, IdAllocator};
use crate::outputs::Change;
use crate::sampling::sample_track;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        let k = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * k
    }

    fn done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback of one clip.
#[derive(Clone, Debug)]
pub struct Action {
    pub id: ActionId,
    pub clip: ClipId,
    /// Clip-local time in seconds (unwrapped for ping-pong).
    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    /// Hold the final pose after a `Once` action finishes.
    pub clamp_when_finished: bool,
    weight: f32,
    fade: Option<Fade>,
    enabled: bool,
    running: bool,
    finished: bool,
}

impl Action {
    fn new(id: ActionId, clip: ClipId) -> Self {
        Self {
            id,
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            clamp_when_finished: false,
            weight: 1.0,
            fade: None,
            enabled: false,
            running: false,
            finished: false,
        }
    }

    /// Weight this action contributes to the pose right now.
    #[inline]
    pub fn effective_weight(&self) -> f32 {
        if self.enabled {
            self.weight
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn halt(&mut self) {
        self.enabled = false;
        self.running = false;
        self.weight = 0.0;
        self.fade = None;
    }
}

/// Result of one mixer tick.
#[derive(Clone, Debug, Default)]
pub struct MixerFrame {
    /// Blended pose, sorted by target.
    pub changes: Vec<Change>,
    /// `Once` actions that reached their end this tick.
    pub finished: Vec<ActionId>,
}

#[derive(Default, Debug)]
struct ClipLib {
    items: Vec<(ClipId, ClipData)>,
}

impl ClipLib {
    fn insert(&mut self, id: ClipId, data: ClipData) {
        self.items.push((id, data));
    }

    fn get(&self, id: ClipId) -> Option<&ClipData> {
        self.items
            .iter()
            .find_map(|(c, d)| if *c == id { Some(d) } else { None })
    }
}

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Reflect t into [0, span] with ping-pong behavior.
fn ping_pong(t: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    let m = fmod(t, 2.0 * span);
    if m <= span {
        m
    } else {
        2.0 * span - m
    }
}

#[derive(Default, Debug)]
pub struct Mixer {
    ids: IdAllocator,
    clips: ClipLib,
    actions: Vec<Action>,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_clip(&mut self, mut data: ClipData) -> ClipId {
        let id = self.ids.alloc_clip();
        data.id = Some(id);
        self.clips.insert(id, data);
        id
    }

    pub fn clip(&self, id: ClipId) -> Option<&ClipData> {
        self.clips.get(id)
    }

    /// Create an action for `clip`. `None` if the clip is unknown.
    pub fn clip_action(&mut self, clip: ClipId) -> Option<ActionId> {
        self.clips.get(clip)?;
        let id = self.ids.alloc_action();
        self.actions.push(Action::new(id, clip));
        Some(id)
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    fn action_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions.iter_mut().find(|a| a.id == id)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Actions currently contributing weight, with that weight.
    pub fn active_actions(&self) -> Vec<(ActionId, f32)> {
        self.actions
            .iter()
            .filter(|a| a.effective_weight() > 0.0)
            .map(|a| (a.id, a.effective_weight()))
            .collect()
    }

    pub fn configure(
        &mut self,
        id: ActionId,
        loop_mode: LoopMode,
        clamp_when_finished: bool,
        time_scale: f32,
    ) {
        if let Some(a) = self.action_mut(id) {
            a.loop_mode = loop_mode;
            a.clamp_when_finished = clamp_when_finished;
            a.time_scale = time_scale;
        }
    }

    /// Start (or resume) an action. A finished action stays finished until reset.
    pub fn play(&mut self, id: ActionId) {
        if let Some(a) = self.action_mut(id) {
            a.enabled = true;
            a.running = !a.finished;
        }
    }

    pub fn stop(&mut self, id: ActionId) {
        if let Some(a) = self.action_mut(id) {
            a.halt();
            a.time = 0.0;
            a.finished = false;
        }
    }

    pub fn stop_all(&mut self) {
        for a in &mut self.actions {
            a.halt();
            a.time = 0.0;
            a.finished = false;
        }
    }

    /// Rewind to the start at full weight, cancelling any fade.
    pub fn reset(&mut self, id: ActionId) {
        if let Some(a) = self.action_mut(id) {
            a.time = 0.0;
            a.finished = false;
            a.running = false;
            a.fade = None;
            a.weight = 1.0;
        }
    }

    pub fn set_weight(&mut self, id: ActionId, weight: f32) {
        if let Some(a) = self.action_mut(id) {
            a.fade = None;
            a.weight = weight.max(0.0);
        }
    }

    /// Ramp weight from 0 to 1 over `duration` seconds.
    pub fn fade_in(&mut self, id: ActionId, duration: f32) {
        if let Some(a) = self.action_mut(id) {
            if duration <= 0.0 {
                a.fade = None;
                a.weight = 1.0;
            } else {
                a.weight = 0.0;
                a.fade = Some(Fade {
                    from: 0.0,
                    to: 1.0,
                    duration,
                    elapsed: 0.0,
                });
            }
        }
    }

    /// Ramp weight from its current value to 0, then stop the action.
    pub fn fade_out(&mut self, id: ActionId, duration: f32) {
        if let Some(a) = self.action_mut(id) {
            if !a.enabled {
                return;
            }
            if duration <= 0.0 {
                a.halt();
            } else {
                a.fade = Some(Fade {
                    from: a.weight,
                    to: 0.0,
                    duration,
                    elapsed: 0.0,
                });
            }
        }
    }

    /// Advance by `dt` seconds and blend the pose.
    pub fn update(&mut self, dt: f32) -> MixerFrame {
        let mut frame = MixerFrame::default();
        let dt = dt.max(0.0);

        for a in &mut self.actions {
            if !a.enabled {
                continue;
            }
            if let Some(mut fade) = a.fade {
                fade.elapsed += dt;
                a.weight = fade.weight();
                if fade.done() {
                    a.fade = None;
                    if fade.to <= 0.0 {
                        a.halt();
                        continue;
                    }
                } else {
                    a.fade = Some(fade);
                }
            }
            if !a.running {
                continue;
            }
            let duration = match self.clips.get(a.clip) {
                Some(c) => c.duration_secs(),
                None => continue,
            };
            a.time += dt * a.time_scale;
            match a.loop_mode {
                LoopMode::Once => {
                    let end = a.time_scale >= 0.0 && a.time >= duration;
                    let start = a.time_scale < 0.0 && a.time <= 0.0;
                    if end || start {
                        a.time = a.time.clamp(0.0, duration);
                        a.running = false;
                        a.finished = true;
                        frame.finished.push(a.id);
                        if !a.clamp_when_finished {
                            a.halt();
                        }
                    }
                }
                LoopMode::Loop => a.time = fmod(a.time, duration),
                LoopMode::PingPong => {}
            }
        }

        let mut accum = Accumulator::new();
        for a in &self.actions {
            let w = a.effective_weight();
            if w <= 0.0 {
                continue;
            }
            let clip = match self.clips.get(a.clip) {
                Some(c) => c,
                None => continue,
            };
            let duration = clip.duration_secs();
            let local = match a.loop_mode {
                LoopMode::PingPong => ping_pong(a.time, duration),
                _ => a.time.clamp(0.0, duration),
            };
            let u = if duration > 0.0 { local / duration } else { 0.0 };
            for track in &clip.tracks {
                if let Some(value) = sample_track(track, u) {
                    accum.add(&track.animatable_id, &value, w);
                }
            }
        }
        frame.changes = accum
            .finalize()
            .into_iter()
            .map(|(key, b)| Change {
                key,
                value: b.value,
                weight: b.weight,
            })
            .collect();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Interpolation, Keypoint, Track};
    use crate::value::Value;

    fn clip(duration_ms: u32) -> ClipData {
        ClipData {
            id: None,
            name: "c".into(),
            tracks: vec![Track {
                name: "x".into(),
                animatable_id: "Hips.position".into(),
                interpolation: Interpolation::Linear,
                points: vec![
                    Keypoint {
                        stamp: 0.0,
                        value: Value::Vec3([0.0, 0.0, 0.0]),
                        transitions: None,
                    },
                    Keypoint {
                        stamp: 1.0,
                        value: Value::Vec3([1.0, 0.0, 0.0]),
                        transitions: None,
                    },
                ],
            }],
            duration_ms,
        }
    }

    #[test]
    fn once_action_finishes_exactly_once_and_holds() {
        let mut m = Mixer::new();
        let c = m.add_clip(clip(1000));
        let a = m.clip_action(c).unwrap();
        m.configure(a, LoopMode::Once, true, 0.5);
        m.play(a);
        assert!(m.update(1.0).finished.is_empty());
        let f = m.update(1.0);
        assert_eq!(f.finished, vec![a]);
        assert_eq!(f.changes[0].value, Value::Vec3([1.0, 0.0, 0.0]));
        let f = m.update(1.0);
        assert!(f.finished.is_empty());
        assert_eq!(f.changes.len(), 1, "clamped action keeps its final pose");
    }

    #[test]
    fn fade_out_stops_the_action() {
        let mut m = Mixer::new();
        let c = m.add_clip(clip(1000));
        let a = m.clip_action(c).unwrap();
        m.play(a);
        m.fade_out(a, 0.5);
        m.update(0.25);
        assert!((m.action(a).unwrap().effective_weight() - 0.5).abs() < 1e-6);
        m.update(0.25);
        assert_eq!(m.action(a).unwrap().effective_weight(), 0.0);
        assert!(m.active_actions().is_empty());
    }

    #[test]
    fn looping_actions_wrap_and_weights_blend() {
        let mut m = Mixer::new();
        let c = m.add_clip(clip(1000));
        let a = m.clip_action(c).unwrap();
        let b = m.clip_action(c).unwrap();
        m.configure(a, LoopMode::Loop, false, 1.0);
        m.play(a);
        m.play(b);
        m.set_weight(b, 0.0);
        let f = m.update(1.25);
        assert!(f.finished.is_empty());
        assert!((m.action(a).unwrap().time - 0.25).abs() < 1e-6);
        assert_eq!(f.changes[0].value, Value::Vec3([0.25, 0.0, 0.0]));

        m.stop(a);
        assert!(m.action(a).unwrap().time == 0.0 && !m.action(a).unwrap().is_running());
        assert!(m.clip_action(ClipId(99)).is_none());
    }

    #[test]
    fn ping_pong_reflects_time() {
        assert_eq!(ping_pong(0.5, 1.0), 0.5);
        assert_eq!(ping_pong(1.5, 1.0), 0.5);
        assert_eq!(ping_pong(2.25, 1.0), 0.25);
    }
}
