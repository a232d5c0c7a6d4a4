use std::cell::RefCell;
use std::rc::Rc;

use signa_animation_core::SequencerEvent;
use signa_gloss_core::Token;

/// Presentation hooks: highlight the gloss being signed, announce the end.
///
/// Called from [`crate::Session::step`] in event order, after the frame's
/// pose has been computed.
pub trait PlaybackObserver {
    fn on_token_change(&mut self, token: &Token, index: usize);

    fn on_complete(&mut self);

    fn on_token_skipped(&mut self, _token: &Token, _index: usize, _reason: &str) {}
}

/// Route one event to the matching observer hook.
pub(crate) fn notify(observer: &mut dyn PlaybackObserver, event: &SequencerEvent) {
    match event {
        SequencerEvent::TokenChanged { token, index } => observer.on_token_change(token, *index),
        SequencerEvent::TokenSkipped {
            token,
            index,
            reason,
        } => observer.on_token_skipped(token, *index, reason),
        SequencerEvent::Completed => observer.on_complete(),
        _ => {}
    }
}

/// Observer that records what it saw. Handy for hosts that poll and for tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingObserver {
    pub changes: Vec<(String, usize)>,
    pub skipped: Vec<(String, usize)>,
    pub completions: usize,
}

impl PlaybackObserver for RecordingObserver {
    fn on_token_change(&mut self, token: &Token, index: usize) {
        self.changes.push((token.to_string(), index));
    }

    fn on_complete(&mut self) {
        self.completions += 1;
    }

    fn on_token_skipped(&mut self, token: &Token, index: usize, _reason: &str) {
        self.skipped.push((token.to_string(), index));
    }
}

/// Shared observer, so the host keeps a handle while the session drives it.
impl<O: PlaybackObserver + ?Sized> PlaybackObserver for Rc<RefCell<O>> {
    fn on_token_change(&mut self, token: &Token, index: usize) {
        self.borrow_mut().on_token_change(token, index);
    }

    fn on_complete(&mut self) {
        self.borrow_mut().on_complete();
    }

    fn on_token_skipped(&mut self, token: &Token, index: usize, reason: &str) {
        self.borrow_mut().on_token_skipped(token, index, reason);
    }
}
