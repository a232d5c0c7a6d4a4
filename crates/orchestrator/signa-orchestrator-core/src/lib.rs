//! signa-orchestrator
//!
//! Host-facing session: submit Spanish text, step frames, render the pose in
//! each [`SessionFrame`], and follow progress through a [`PlaybackObserver`].
//! Clip loads requested by the sequencer are answered synchronously from the
//! session's [`ClipSource`] at the start and end of every step.

pub mod config;
pub mod observer;

use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use signa_animation_core::{
    Change, ClipSource, FsClipSource, PlaybackState, Sequencer, SequencerConfig, SequencerEvent,
    SequencerState,
};
use signa_gloss_core::{Dictionary, TokenSequence, TranslateError, Translator};

pub use crate::config::{ConfigError, SessionConfig};
pub use crate::observer::{PlaybackObserver, RecordingObserver};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFrame {
    pub epoch: u64,
    pub dt: f32,
    /// Blended pose for this frame, keyed by rig target path.
    pub changes: Vec<Change>,
    /// Playback events raised since the previous frame, in order.
    pub events: Vec<SequencerEvent>,
    pub state: SequencerState,
    pub current_index: usize,
}

pub struct Session<S: ClipSource = FsClipSource> {
    dictionary: Arc<Dictionary>,
    translator: Translator,
    sequencer: Sequencer,
    source: S,
    observer: Option<Box<dyn PlaybackObserver>>,
    pub epoch: u64,
}

impl<S: ClipSource> Session<S> {
    pub fn new(dictionary: Arc<Dictionary>, cfg: SequencerConfig, source: S) -> Self {
        Self {
            sequencer: Sequencer::new(Arc::clone(&dictionary), cfg),
            dictionary,
            translator: Translator::new(),
            source,
            observer: None,
            epoch: 0,
        }
    }

    /// Register the presentation observer (replaces any previous one).
    pub fn with_observer(mut self, observer: impl PlaybackObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn PlaybackObserver>>) {
        self.observer = observer;
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn playback(&self) -> &PlaybackState {
        self.sequencer.playback()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Gloss `text` without touching playback.
    pub fn translate(&self, text: &str) -> TokenSequence {
        self.translator.translate(text, &self.dictionary)
    }

    /// Translate `text` and restart playback with the result.
    ///
    /// Blank input and input with nothing left to sign are reported and
    /// leave the current playback alone.
    pub fn submit(&mut self, text: &str) -> Result<TokenSequence, TranslateError> {
        let tokens = self.translator.translate_checked(text, &self.dictionary)?;
        log::debug!("submitting {} token(s): {tokens}", tokens.len());
        self.sequencer.load_queue(tokens.clone());
        Ok(tokens)
    }

    /// Stop playback and forget the queue. Loaded clips stay cached.
    pub fn reset(&mut self) {
        self.sequencer.reset();
    }

    /// Advance playback by `dt` seconds and return the frame.
    pub fn step(&mut self, dt: f32) -> Result<SessionFrame> {
        if !dt.is_finite() || dt < 0.0 {
            bail!("step dt must be a finite, non-negative number of seconds (got {dt})");
        }
        self.epoch = self.epoch.wrapping_add(1);

        self.sequencer.fulfill_with(&mut self.source);
        let out = self.sequencer.update(dt);
        let changes = out.changes.clone();
        let events = out.events.clone();
        // Loads requested while advancing are answered now so the next clip
        // starts on the following frame.
        self.sequencer.fulfill_with(&mut self.source);

        if let Some(obs) = self.observer.as_deref_mut() {
            for event in &events {
                observer::notify(obs, event);
            }
        }

        Ok(SessionFrame {
            epoch: self.epoch,
            dt,
            changes,
            events,
            state: self.sequencer.state(),
            current_index: self.sequencer.playback().current_index,
        })
    }
}

impl Session<FsClipSource> {
    /// Load the dictionary and point an [`FsClipSource`] at the clip root.
    pub fn from_config(cfg: SessionConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let dictionary = Dictionary::from_path(&cfg.dictionary)?;
        log::debug!(
            "session dictionary {} ({} entries), clips under {}",
            cfg.dictionary.display(),
            dictionary.len(),
            cfg.clips_root.display()
        );
        Ok(Self::new(
            Arc::new(dictionary),
            cfg.sequencer,
            FsClipSource::new(cfg.clips_root),
        ))
    }
}

impl<S: ClipSource> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("epoch", &self.epoch)
            .field("dictionary_entries", &self.dictionary.len())
            .field("state", &self.sequencer.state())
            .field("playback", self.sequencer.playback())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
