//! Bone-name retargeting.
//!
//! Clips authored against a Mixamo skeleton name their tracks
//! `Armature/mixamorigLeftHand.quaternion`; the rig names the same bone
//! `LeftHand`. Retargeting strips the root prefix, splits off the property
//! suffix and renames the bone through [`BONE_RENAME_TABLE`]. Keyframes are
//! never touched. Bones missing from the table keep their name.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::data::ClipData;

macro_rules! mixamo_bones {
    ($($bone:literal),* $(,)?) => {
        &[$(
            (concat!("mixamorig", $bone), $bone),
            (concat!("mixamorig:", $bone), $bone),
        )*]
    };
}

/// Source skeleton bone name → rig bone name.
pub static BONE_RENAME_TABLE: &[(&str, &str)] = mixamo_bones![
    "Hips", "Spine", "Spine1", "Spine2", "Neck", "Head", "HeadTop_End",
    "LeftEye", "RightEye",
    "LeftShoulder", "LeftArm", "LeftForeArm", "LeftHand",
    "LeftHandThumb1", "LeftHandThumb2", "LeftHandThumb3", "LeftHandThumb4",
    "LeftHandIndex1", "LeftHandIndex2", "LeftHandIndex3", "LeftHandIndex4",
    "LeftHandMiddle1", "LeftHandMiddle2", "LeftHandMiddle3", "LeftHandMiddle4",
    "LeftHandRing1", "LeftHandRing2", "LeftHandRing3", "LeftHandRing4",
    "LeftHandPinky1", "LeftHandPinky2", "LeftHandPinky3", "LeftHandPinky4",
    "RightShoulder", "RightArm", "RightForeArm", "RightHand",
    "RightHandThumb1", "RightHandThumb2", "RightHandThumb3", "RightHandThumb4",
    "RightHandIndex1", "RightHandIndex2", "RightHandIndex3", "RightHandIndex4",
    "RightHandMiddle1", "RightHandMiddle2", "RightHandMiddle3", "RightHandMiddle4",
    "RightHandRing1", "RightHandRing2", "RightHandRing3", "RightHandRing4",
    "RightHandPinky1", "RightHandPinky2", "RightHandPinky3", "RightHandPinky4",
    "LeftUpLeg", "LeftLeg", "LeftFoot", "LeftToeBase", "LeftToe_End",
    "RightUpLeg", "RightLeg", "RightFoot", "RightToeBase", "RightToe_End",
];

static BONE_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BONE_RENAME_TABLE.iter().copied().collect());

/// Rig name for a source bone, if the table knows it.
#[inline]
pub fn rename_bone(source: &str) -> Option<&'static str> {
    BONE_INDEX.get(source).copied()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetargetOptions {
    /// Root hierarchy prefix stripped from track targets.
    pub root_prefix: String,
}

impl Default for RetargetOptions {
    fn default() -> Self {
        Self {
            root_prefix: "Armature/".to_string(),
        }
    }
}

/// What a retargeting pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetargetReport {
    pub renamed: usize,
    /// Distinct bone names with no table entry, sorted.
    pub unmapped: Vec<String>,
}

/// Split a target path into `(bone, property_suffix)`; the suffix keeps its leading `.`.
pub fn split_target(path: &str) -> (&str, &str) {
    match path.find('.') {
        Some(i) => path.split_at(i),
        None => (path, ""),
    }
}

/// Retarget a single target path. Returns the new path and whether the bone was mapped.
pub fn retarget_path(path: &str, opts: &RetargetOptions) -> (String, bool) {
    let stripped = if opts.root_prefix.is_empty() {
        path
    } else {
        path.strip_prefix(opts.root_prefix.as_str()).unwrap_or(path)
    };
    let (bone, suffix) = split_target(stripped);
    match rename_bone(bone) {
        Some(target) => (format!("{target}{suffix}"), true),
        None => (stripped.to_string(), false),
    }
}

/// Rewrite every track target of `clip` in place.
pub fn retarget_clip(clip: &mut ClipData, opts: &RetargetOptions) -> RetargetReport {
    let mut report = RetargetReport::default();
    for track in &mut clip.tracks {
        let (path, mapped) = retarget_path(&track.animatable_id, opts);
        if mapped {
            report.renamed += 1;
        } else {
            let (bone, _) = split_target(&path);
            report.unmapped.push(bone.to_string());
        }
        track.animatable_id = path;
    }
    report.unmapped.sort();
    report.unmapped.dedup();
    if !report.unmapped.is_empty() {
        log::debug!(
            "clip '{}': {} bone(s) kept their source name: {:?}",
            clip.name,
            report.unmapped.len(),
            report.unmapped
        );
    }
    report
}
