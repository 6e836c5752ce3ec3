//! Decode / reset / tick orchestration.
//!
//! A `Session` ties the decoder, the board, the sequencer and the presentation
//! state together. It is clock-agnostic: every operation takes the current time.

use std::time::Duration;

use tracing::{info, warn};

use crate::board::Board;
use crate::decoder::{decode, DecodeError, DecodedMessage};
use crate::presentation::Presentation;
use crate::reveal::{ResultReveal, StepsReveal};
use crate::sequencer::{Sequencer, SequencerEvent, SequencerState, Timings};

/// High-level session phase, mostly for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing decoded yet, or reset
    Idle,
    /// The planchette is spelling the message
    Animating,
    /// The message is being (or has been) revealed
    Revealed,
    /// The last input was rejected
    Failed,
}

/// One decode-and-animate session over a fixed board.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    presentation: Presentation,
    sequencer: Sequencer,
    message: Option<DecodedMessage>,
    phase: SessionPhase,
}

impl Session {
    pub fn new(board: Board, timings: Timings) -> Self {
        let presentation = Presentation::new(board.center());
        Self {
            board,
            presentation,
            sequencer: Sequencer::new(timings),
            message: None,
            phase: SessionPhase::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The message currently being animated or shown.
    pub fn message(&self) -> Option<&DecodedMessage> {
        self.message.as_ref()
    }

    /// Index of the code the planchette is visiting.
    pub fn current_step(&self) -> Option<usize> {
        self.sequencer.current_index()
    }

    /// Decodes `input` and starts the planchette.
    ///
    /// On a decode error the error panel is shown and nothing is animated.
    /// Any run already in flight is cancelled either way.
    pub fn decipher(
        &mut self,
        input: &str,
        now: Duration,
    ) -> Result<Vec<SequencerEvent>, DecodeError> {
        self.sequencer.cancel(&mut self.presentation);
        self.presentation.hide_indicator();

        let codes = match decode(input) {
            Ok(codes) => codes,
            Err(err) => {
                warn!(error = ?err, "rejected input");
                self.message = None;
                self.presentation.show_error(err.to_string());
                self.phase = SessionPhase::Failed;
                return Err(err);
            }
        };

        let message = DecodedMessage::from_codes(&codes);
        info!(codes = message.len(), text = %message.joined(), "decoded input");

        self.presentation.clear_panels();
        self.presentation.show_steps(StepsReveal::new(&message, now));
        self.message = Some(message);
        self.phase = SessionPhase::Animating;

        let events = self
            .sequencer
            .start(codes, now, &self.board, &mut self.presentation);
        self.handle_events(&events);
        Ok(events)
    }

    /// Stops everything and clears the screen state.
    pub fn reset(&mut self) {
        self.sequencer.cancel(&mut self.presentation);
        self.presentation.clear_panels();
        self.presentation.hide_indicator();
        self.presentation.clear_active();
        self.message = None;
        self.phase = SessionPhase::Idle;
        info!("session reset");
    }

    /// Advances the animation to `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<SequencerEvent> {
        if self.sequencer.state() == SequencerState::Idle {
            return Vec::new();
        }
        let events = self
            .sequencer
            .advance(now, &self.board, &mut self.presentation);
        self.handle_events(&events);
        events
    }

    /// Starts the result reveal once the sequence finishes.
    fn handle_events(&mut self, events: &[SequencerEvent]) {
        for event in events {
            if let SequencerEvent::Finished { at } = event {
                if let Some(message) = &self.message {
                    let reveal = ResultReveal::new(message.clone(), *at);
                    self.presentation.show_result(reveal);
                }
                self.phase = SessionPhase::Revealed;
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Board::default(), Timings::default())
    }
}
