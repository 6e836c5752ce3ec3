//! Application state.
//!
//! This module contains the state of the interactive application:
//! - The input field the user types codes into
//! - The decode session (board, planchette, panels)
//! - Ambient audio controls, help overlay and quit flag

use std::time::Duration;

use tracing::info;

use crate::clock::Clock;
use crate::session::{Session, SessionPhase};

/// Ambient soundtrack state.
///
/// There is no audio backend; the state is tracked and shown so the
/// play/pause controls behave consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbientAudio {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl AmbientAudio {
    pub fn label(self) -> &'static str {
        match self {
            AmbientAudio::Stopped => "parado",
            AmbientAudio::Playing => "tocando",
            AmbientAudio::Paused => "pausado",
        }
    }
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// Decode session
    pub session: Session,
    /// Codes typed so far
    pub input: String,
    /// Ambient audio state
    pub ambient: AmbientAudio,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
    clock: Box<dyn Clock>,
}

impl AppState {
    /// Creates a new application state driven by `clock`.
    pub fn new(session: Session, clock: Box<dyn Clock>) -> Self {
        Self {
            session,
            input: String::new(),
            ambient: AmbientAudio::default(),
            show_help: false,
            should_quit: false,
            status_message: None,
            clock,
        }
    }

    /// Current time on the application clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Appends a character to the input field.
    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Deletes the last character of the input field.
    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Decodes the input field and starts the planchette.
    pub fn decipher(&mut self) {
        let now = self.now();
        self.status_message = match self.session.decipher(&self.input, now) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    /// Clears the input and every panel, stopping any animation.
    pub fn reset(&mut self) {
        self.input.clear();
        self.session.reset();
        self.status_message = None;
    }

    /// Advances time-driven state.
    pub fn tick(&mut self) {
        let now = self.now();
        self.session.tick(now);
    }

    /// Whether the screen still changes without user input.
    pub fn is_animating(&self) -> bool {
        let now = self.now();
        match self.session.phase() {
            SessionPhase::Animating => true,
            SessionPhase::Revealed => {
                let presentation = self.session.presentation();
                presentation
                    .result()
                    .is_some_and(|r| !r.schedule().is_complete(now))
            }
            SessionPhase::Idle | SessionPhase::Failed => false,
        }
    }

    pub fn play_audio(&mut self) {
        if self.ambient != AmbientAudio::Playing {
            info!("ambient audio playing");
        }
        self.ambient = AmbientAudio::Playing;
        self.status_message = Some(format!("Áudio {}", self.ambient.label()));
    }

    pub fn pause_audio(&mut self) {
        if self.ambient == AmbientAudio::Playing {
            info!("ambient audio paused");
            self.ambient = AmbientAudio::Paused;
        }
        self.status_message = Some(format!("Áudio {}", self.ambient.label()));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }
}
