//! Input contracts for the sequencer.
//!
//! Every state change is driven by one of these inputs, queued and applied in
//! order on the sequencer's single thread.

use signa_gloss_core::{Token, TokenSequence};

use crate::data::ClipData;
use crate::error::ClipLoadError;
use crate::ids::{ActionId, Generation};

/// Identifies which queue position a load belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub generation: Generation,
    pub index: usize,
}

/// A clip the sequencer needs before it can continue.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub token: Token,
    pub resource: String,
}

#[derive(Clone, Debug)]
pub enum SequencerInput {
    /// Start over with a new queue. The clip cache survives.
    QueueReplaced(TokenSequence),
    /// Drop the queue and stop every action. The clip cache survives.
    Reset,
    /// Clips fetched for a ticket; the first one is used.
    LoadSucceeded {
        ticket: LoadTicket,
        clips: Vec<ClipData>,
    },
    LoadFailed {
        ticket: LoadTicket,
        error: ClipLoadError,
    },
    /// A `Once` action reached its end.
    ClipFinished { action: ActionId },
}
