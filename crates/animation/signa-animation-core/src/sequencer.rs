//! Gloss playback sequencer.
//!
//! Plays a token queue back to back: resolve each token to a clip (cached per
//! sequencer), retarget it onto the rig, cross-fade from the previous clip,
//! wait for it to finish, move on. Failed tokens are skipped.
//!
//! States: `Idle` → `Loading` → `Playing` → `Advancing` → `Idle`.
//! Transitions happen only while draining the input queue, so ordering is
//! deterministic. Loads are requested through [`LoadRequest`]s tagged with
//! the queue generation; results for a superseded queue are discarded.

use std::collections::VecDeque;
use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use signa_gloss_core::{Dictionary, Token, TokenSequence};

use crate::config::SequencerConfig;
use crate::data::ClipData;
use crate::error::ClipLoadError;
use crate::ids::{ActionId, Generation};
use crate::inputs::{LoadRequest, LoadTicket, SequencerInput};
use crate::mixer::{LoopMode, Mixer};
use crate::outputs::{Outputs, SequencerEvent};
use crate::retarget::retarget_clip;
use crate::source::ClipSource;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerState {
    /// No queue, queue exhausted, or about to look at the next token.
    Idle,
    /// Waiting for the current token's clip.
    Loading,
    /// Current clip is playing.
    Playing,
    /// Current clip finished; moving to the next index.
    Advancing,
}

/// Playback bookkeeping. Only the sequencer mutates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub queue: TokenSequence,
    pub current_index: usize,
    pub current_action: Option<ActionId>,
    pub previous_action: Option<ActionId>,
    pub is_playing: bool,
}

impl PlaybackState {
    fn with_queue(queue: TokenSequence) -> Self {
        Self {
            queue,
            ..Self::default()
        }
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.queue.get(self.current_index)
    }
}

#[derive(Debug)]
pub struct Sequencer {
    cfg: SequencerConfig,
    dictionary: Arc<Dictionary>,
    mixer: Mixer,
    cache: HashMap<Token, ActionId>,
    playback: PlaybackState,
    state: SequencerState,
    generation: Generation,
    /// Whether the current queue still owes its completion notification.
    completion_owed: bool,
    /// Action last sent into a fade-out; the only one allowed to overlap the current clip.
    outgoing: Option<ActionId>,
    outbox: Option<LoadRequest>,
    inbox: VecDeque<SequencerInput>,
    events: Vec<SequencerEvent>,
    outputs: Outputs,
}

impl Sequencer {
    pub fn new(dictionary: Arc<Dictionary>, cfg: SequencerConfig) -> Self {
        Self {
            cfg,
            dictionary,
            mixer: Mixer::new(),
            cache: HashMap::new(),
            playback: PlaybackState::default(),
            state: SequencerState::Idle,
            generation: Generation::default(),
            completion_owed: false,
            outgoing: None,
            outbox: None,
            inbox: VecDeque::new(),
            events: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.cfg
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    /// Tokens whose clips are cached, in no particular order.
    pub fn cached_tokens(&self) -> impl Iterator<Item = &Token> {
        self.cache.keys()
    }

    pub fn is_cached(&self, token: &Token) -> bool {
        self.cache.contains_key(token)
    }

    /// (Re)start playback with `queue`.
    pub fn load_queue(&mut self, queue: TokenSequence) {
        self.dispatch(SequencerInput::QueueReplaced(queue));
    }

    /// Clear playback state; the clip cache is kept.
    pub fn reset(&mut self) {
        self.dispatch(SequencerInput::Reset);
    }

    /// The load the sequencer is waiting on, if it has not been taken yet.
    pub fn pending_load(&self) -> Option<&LoadRequest> {
        self.outbox.as_ref()
    }

    /// Take the pending load request; the caller must answer it with
    /// [`Sequencer::complete_load`] (late answers for old queues are ignored).
    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        self.outbox.take()
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ClipData>, ClipLoadError>,
    ) {
        let input = match result {
            Ok(clips) => SequencerInput::LoadSucceeded { ticket, clips },
            Err(error) => SequencerInput::LoadFailed { ticket, error },
        };
        self.dispatch(input);
    }

    /// Answer load requests synchronously from `source` until none is pending.
    pub fn fulfill_with(&mut self, source: &mut dyn ClipSource) {
        while let Some(req) = self.take_load_request() {
            let result = source.fetch(&req.resource);
            self.complete_load(req.ticket, result);
        }
    }

    /// Queue an input and apply everything queued.
    pub fn dispatch(&mut self, input: SequencerInput) {
        self.inbox.push_back(input);
        while let Some(next) = self.inbox.pop_front() {
            self.apply(next);
        }
    }

    /// Advance the mixer by `dt` seconds. Returns the pose and every event
    /// raised since the previous update.
    pub fn update(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        let frame = self.mixer.update(dt);
        for action in frame.finished {
            self.inbox.push_back(SequencerInput::ClipFinished { action });
        }
        while let Some(next) = self.inbox.pop_front() {
            self.apply(next);
        }
        self.outputs.changes = frame.changes;
        self.outputs.events = std::mem::take(&mut self.events);
        &self.outputs
    }

    fn apply(&mut self, input: SequencerInput) {
        match input {
            SequencerInput::QueueReplaced(queue) => {
                self.generation = self.generation.next();
                self.outbox = None;
                // Mid-load the previous clip is the one still holding its pose.
                let last = self
                    .playback
                    .current_action
                    .or(self.playback.previous_action);
                if let Some(active) = last {
                    self.mixer.fade_out(active, self.cfg.fade_duration);
                    self.outgoing = Some(active);
                }
                log::debug!(
                    "queue replaced (generation {}): {} token(s)",
                    self.generation.0,
                    queue.len()
                );
                self.playback = PlaybackState::with_queue(queue);
                self.state = SequencerState::Idle;
                self.completion_owed = true;
                self.evaluate();
            }
            SequencerInput::Reset => {
                self.generation = self.generation.next();
                self.outbox = None;
                self.mixer.stop_all();
                self.playback = PlaybackState::default();
                self.state = SequencerState::Idle;
                self.completion_owed = false;
                self.outgoing = None;
                // Nothing raised for the cleared queue may reach the host.
                self.events.clear();
                self.inbox.clear();
            }
            SequencerInput::LoadSucceeded { ticket, clips } => {
                if self.is_stale(ticket) {
                    log::debug!("discarding stale load result for index {}", ticket.index);
                    return;
                }
                match self.install_clip(clips, ticket) {
                    Ok(action) => self.start_playback(action),
                    Err(error) => self.skip_current(error),
                }
            }
            SequencerInput::LoadFailed { ticket, error } => {
                if self.is_stale(ticket) {
                    log::debug!("discarding stale load failure for index {}", ticket.index);
                    return;
                }
                self.skip_current(error);
            }
            SequencerInput::ClipFinished { action } => {
                if self.state != SequencerState::Playing
                    || self.playback.current_action != Some(action)
                {
                    return;
                }
                self.state = SequencerState::Advancing;
                self.playback.current_index += 1;
                self.playback.previous_action = self.playback.current_action.take();
                self.state = SequencerState::Idle;
                self.evaluate();
            }
        }
    }

    fn is_stale(&self, ticket: LoadTicket) -> bool {
        ticket.generation != self.generation
            || ticket.index != self.playback.current_index
            || self.state != SequencerState::Loading
    }

    /// Decide what to do from `Idle`.
    fn evaluate(&mut self) {
        let index = self.playback.current_index;
        let token = match self.playback.queue.get(index) {
            Some(t) => t.clone(),
            None => {
                self.finish_queue();
                return;
            }
        };

        self.events.push(SequencerEvent::TokenChanged {
            token: token.clone(),
            index,
        });
        self.state = SequencerState::Loading;
        self.playback.is_playing = true;

        if let Some(&action) = self.cache.get(&token) {
            self.start_playback(action);
            return;
        }

        let ticket = LoadTicket {
            generation: self.generation,
            index,
        };
        match self.resolve_resource(&token) {
            Some(resource) => {
                self.outbox = Some(LoadRequest {
                    ticket,
                    token,
                    resource,
                });
            }
            None => self.inbox.push_back(SequencerInput::LoadFailed {
                ticket,
                error: ClipLoadError::MissingResource {
                    token: token.to_string(),
                },
            }),
        }
    }

    fn finish_queue(&mut self) {
        self.state = SequencerState::Idle;
        self.playback.is_playing = false;
        if !self.completion_owed {
            return;
        }
        self.completion_owed = false;
        self.events.push(SequencerEvent::Completed);
        let last = self
            .playback
            .current_action
            .or(self.playback.previous_action);
        if let Some(action) = last {
            self.mixer.fade_out(action, self.cfg.completion_fade);
            self.outgoing = Some(action);
        }
        log::debug!("queue complete (generation {})", self.generation.0);
    }

    fn resolve_resource(&self, token: &Token) -> Option<String> {
        if let Some(r) = self.dictionary.resource_for(token.as_str()) {
            return Some(r.to_string());
        }
        token
            .spelled_letter()
            .and_then(|letter| self.cfg.letter_resource_for(letter))
    }

    /// Retarget, configure and cache the first fetched clip.
    fn install_clip(
        &mut self,
        clips: Vec<ClipData>,
        ticket: LoadTicket,
    ) -> Result<ActionId, ClipLoadError> {
        let token = match self.playback.queue.get(ticket.index) {
            Some(t) => t.clone(),
            None => {
                return Err(ClipLoadError::MissingResource {
                    token: format!("#{}", ticket.index),
                })
            }
        };
        let resource = self.resolve_resource(&token).unwrap_or_default();
        let mut clip = clips
            .into_iter()
            .next()
            .ok_or_else(|| ClipLoadError::NoClips {
                resource: resource.clone(),
            })?;
        clip.validate_basic()
            .map_err(|reason| ClipLoadError::Invalid { resource, reason })?;

        retarget_clip(&mut clip, &self.cfg.retarget);
        clip.name = token.to_string();
        let clip_id = self.mixer.add_clip(clip);
        let action = self
            .mixer
            .clip_action(clip_id)
            .ok_or_else(|| ClipLoadError::Invalid {
                resource: token.to_string(),
                reason: "clip rejected by mixer".into(),
            })?;
        self.mixer
            .configure(action, LoopMode::Once, true, self.cfg.playback_rate);
        self.cache.insert(token, action);
        Ok(action)
    }

    fn start_playback(&mut self, action: ActionId) {
        self.state = SequencerState::Playing;
        let fade = self.cfg.fade_duration;
        let outgoing = match self.playback.previous_action {
            Some(prev) if prev != action => Some(prev),
            _ => self.outgoing.filter(|&o| o != action),
        };
        // At most two clips carry weight: the outgoing one and this one.
        for (id, _) in self.mixer.active_actions() {
            if id != action && Some(id) != outgoing {
                self.mixer.fade_out(id, 0.0);
            }
        }
        self.outgoing = outgoing;

        self.mixer.reset(action);
        match self.playback.previous_action {
            Some(prev) if prev != action => {
                self.mixer.fade_out(prev, fade);
                self.mixer.fade_in(action, fade);
            }
            // Same clip again: restart it and fade back in.
            Some(_) => self.mixer.fade_in(action, fade),
            None => {
                if self.cfg.fade_in_first {
                    self.mixer.fade_in(action, fade);
                }
            }
        }
        self.mixer.play(action);
        self.playback.current_action = Some(action);
    }

    fn skip_current(&mut self, error: ClipLoadError) {
        let index = self.playback.current_index;
        if let Some(token) = self.playback.current_token().cloned() {
            log::warn!(
                "skipping token {token} at index {index} ({}): {error}",
                error.category()
            );
            self.events.push(SequencerEvent::TokenSkipped {
                token,
                index,
                reason: error.to_string(),
            });
        }
        self.outbox = None;
        self.playback.current_index += 1;
        self.state = SequencerState::Idle;
        self.evaluate();
    }
}
