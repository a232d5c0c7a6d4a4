//! Signa Animation Core (engine-agnostic)
//!
//! Plays gloss token sequences as skeletal animation: clip documents are
//! loaded on demand, retargeted onto the rig's bone names, and sequenced
//! back to back through a cross-fading mixer. The host renders the blended
//! pose from [`Outputs`] and shows progress from its [`SequencerEvent`]s.

pub mod accumulate;
pub mod clip_document;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod mixer;
pub mod outputs;
pub mod retarget;
pub mod sampling;
pub mod sequencer;
pub mod source;
pub mod value;

// Re-exports for consumers (hosts and the orchestrator)
pub use clip_document::parse_clip_document;
pub use config::SequencerConfig;
pub use data::{ClipData, Interpolation, Keypoint, Track, Transitions, Vec2};
pub use error::ClipLoadError;
pub use ids::{ActionId, ClipId, Generation};
pub use inputs::{LoadRequest, LoadTicket, SequencerInput};
pub use mixer::{LoopMode, Mixer, MixerFrame};
pub use outputs::{Change, Outputs, SequencerEvent};
pub use retarget::{retarget_clip, RetargetOptions, RetargetReport, BONE_RENAME_TABLE};
pub use sampling::sample_track;
pub use sequencer::{PlaybackState, Sequencer, SequencerState};
pub use source::{ClipSource, FsClipSource, MemoryClipSource};
pub use value::{Value, ValueKind};
