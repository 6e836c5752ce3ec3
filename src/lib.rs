//! # Planchette - Terminal Ouija Board
//!
//! Type whitespace-separated ASCII codes; a planchette glides across a board
//! of letters to spell them out, then the decoded message is revealed.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `decoder`: Input parsing/validation and code → token mapping
//! - `board`: Static board layout and glyph lookup
//! - `clock`: Time sources (monotonic and manual)
//! - `presentation`: Single owner of all mutable display state
//! - `sequencer`: Deadline-driven planchette animation
//! - `reveal`: Staggered text reveals for the panels
//! - `session`: Decode / reset / tick orchestration
//! - `model`: Application state (input field, audio, help)
//! - `event`: Keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: Terminal setup and main loop
//! - `logging`: File logging with tracing

pub mod board;
pub mod clock;
pub mod controller;
pub mod decoder;
pub mod event;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod reveal;
pub mod sequencer;
pub mod session;
pub mod ui;
