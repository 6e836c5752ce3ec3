//! The planchette animation sequencer.
//!
//! For each decoded code, in order, the planchette:
//! 1. looks up the glyph on the board
//! 2. glides to it (`travel`)
//! 3. lights the glyph up for `dwell`, then turns it off
//! 4. pauses (`pause`) before the next code
//!
//! Codes with no glyph skip steps 2-3 but still pause. The sequencer is a
//! deadline-driven state machine: callers feed it the current time and it
//! catches up on every deadline that has passed, chaining each deadline from
//! the previous one rather than from the observed time.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::{Board, GlyphId};
use crate::decoder::AsciiCode;
use crate::presentation::Presentation;

/// Fixed animation timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Planchette travel time to a glyph
    pub travel: Duration,
    /// How long a glyph stays lit
    pub dwell: Duration,
    /// Pause after every code, found or not
    pub pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            travel: Duration::from_millis(1000),
            dwell: Duration::from_millis(800),
            pause: Duration::from_millis(300),
        }
    }
}

/// Something observable the sequencer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Step `index` looked up its glyph at `at`
    StepStarted {
        index: usize,
        at: Duration,
        target: Option<GlyphId>,
    },
    Activated { glyph: GlyphId, at: Duration },
    Deactivated { glyph: GlyphId, at: Duration },
    /// Last pause elapsed; the result may now be shown
    Finished { at: Duration },
}

/// Where the current step is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Travelling { glyph: GlyphId, until: Duration },
    Holding { glyph: GlyphId, until: Duration },
    Pausing { until: Duration },
}

#[derive(Debug, Clone)]
struct Run {
    codes: Vec<AsciiCode>,
    index: usize,
    phase: Phase,
}

/// Whether a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Running,
}

/// Drives the planchette over a decoded message.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    timings: Timings,
    run: Option<Run>,
}

impl Sequencer {
    pub fn new(timings: Timings) -> Self {
        Self { timings, run: None }
    }

    pub fn state(&self) -> SequencerState {
        if self.run.is_some() {
            SequencerState::Running
        } else {
            SequencerState::Idle
        }
    }

    /// Index of the code being visited, if running.
    pub fn current_index(&self) -> Option<usize> {
        self.run.as_ref().map(|r| r.index)
    }

    /// Starts a new run at `now`, replacing any run in flight.
    ///
    /// The first step begins immediately; its events are returned.
    pub fn start(
        &mut self,
        codes: Vec<AsciiCode>,
        now: Duration,
        board: &Board,
        presentation: &mut Presentation,
    ) -> Vec<SequencerEvent> {
        if self.run.is_some() {
            self.cancel(presentation);
        }
        info!(codes = codes.len(), "planchette sequence started");
        presentation.show_indicator();

        let mut events = Vec::new();
        if codes.is_empty() {
            presentation.hide_indicator();
            events.push(SequencerEvent::Finished { at: now });
            return events;
        }

        let phase = self.begin_step(&codes, 0, now, board, presentation, &mut events);
        self.run = Some(Run {
            codes,
            index: 0,
            phase,
        });
        events
    }

    /// Cancels the run in flight. No further mutation happens for it.
    ///
    /// A glyph lit by the cancelled run is turned off.
    pub fn cancel(&mut self, presentation: &mut Presentation) {
        if let Some(run) = self.run.take() {
            if let Phase::Holding { glyph, .. } = run.phase {
                presentation.deactivate(glyph);
            }
            info!(index = run.index, "planchette sequence cancelled");
        }
    }

    /// Processes every deadline up to `now`.
    pub fn advance(
        &mut self,
        now: Duration,
        board: &Board,
        presentation: &mut Presentation,
    ) -> Vec<SequencerEvent> {
        let mut events = Vec::new();

        while let Some(mut run) = self.run.take() {
            match run.phase {
                Phase::Travelling { glyph, until } if now >= until => {
                    presentation.activate(glyph);
                    events.push(SequencerEvent::Activated { glyph, at: until });
                    run.phase = Phase::Holding {
                        glyph,
                        until: until + self.timings.dwell,
                    };
                }
                Phase::Holding { glyph, until } if now >= until => {
                    presentation.deactivate(glyph);
                    events.push(SequencerEvent::Deactivated { glyph, at: until });
                    run.phase = Phase::Pausing {
                        until: until + self.timings.pause,
                    };
                }
                Phase::Pausing { until } if now >= until => {
                    run.index += 1;
                    if run.index >= run.codes.len() {
                        presentation.hide_indicator();
                        events.push(SequencerEvent::Finished { at: until });
                        info!("planchette sequence finished");
                        // run is dropped, state returns to idle
                        continue;
                    }
                    run.phase = self.begin_step(
                        &run.codes,
                        run.index,
                        until,
                        board,
                        presentation,
                        &mut events,
                    );
                }
                _ => {
                    self.run = Some(run);
                    break;
                }
            }
            self.run = Some(run);
        }

        events
    }

    /// Looks up the glyph for step `index` and schedules its first phase.
    fn begin_step(
        &self,
        codes: &[AsciiCode],
        index: usize,
        at: Duration,
        board: &Board,
        presentation: &mut Presentation,
        events: &mut Vec<SequencerEvent>,
    ) -> Phase {
        let code = codes[index];
        let identity = code.board_identity();
        let target = board.locate(&identity);
        events.push(SequencerEvent::StepStarted { index, at, target });

        match target.and_then(|id| board.glyph(id).map(|g| (id, g.center()))) {
            Some((glyph, point)) => {
                debug!(index, code = code.value(), identity = %identity, "moving planchette");
                presentation.move_indicator(point, at, self.timings.travel);
                Phase::Travelling {
                    glyph,
                    until: at + self.timings.travel,
                }
            }
            None => {
                debug!(
                    index,
                    code = code.value(),
                    identity = %identity,
                    "no glyph on board, skipping"
                );
                Phase::Pausing {
                    until: at + self.timings.pause,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (Board, Presentation, Sequencer) {
        let board = Board::default();
        let presentation = Presentation::new(board.center());
        (board, presentation, Sequencer::default())
    }

    fn step_starts(events: &[SequencerEvent]) -> Vec<(usize, Duration)> {
        events
            .iter()
            .filter_map(|e| match e {
                SequencerEvent::StepStarted { index, at, .. } => Some((*index, *at)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_found_code_timeline() {
        let (board, mut p, mut seq) = setup();
        let a = board.locate("A").unwrap();
        let events = seq.start(decode("65").unwrap(), ms(0), &board, &mut p);
        assert_eq!(
            events,
            vec![SequencerEvent::StepStarted {
                index: 0,
                at: ms(0),
                target: Some(a),
            }]
        );
        assert!(p.indicator().visible);
        assert_eq!(seq.state(), SequencerState::Running);

        assert!(seq.advance(ms(999), &board, &mut p).is_empty());
        assert!(!p.is_active(a));

        let events = seq.advance(ms(1000), &board, &mut p);
        assert_eq!(
            events,
            vec![SequencerEvent::Activated {
                glyph: a,
                at: ms(1000),
            }]
        );
        assert!(p.is_active(a));
        assert_eq!(p.indicator().position(ms(1000)), board.glyph(a).unwrap().center());

        let events = seq.advance(ms(1800), &board, &mut p);
        assert_eq!(
            events,
            vec![SequencerEvent::Deactivated {
                glyph: a,
                at: ms(1800),
            }]
        );
        assert!(!p.is_active(a));

        assert!(seq.advance(ms(2099), &board, &mut p).is_empty());
        let events = seq.advance(ms(2100), &board, &mut p);
        assert_eq!(events, vec![SequencerEvent::Finished { at: ms(2100) }]);
        assert!(!p.indicator().visible);
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_steps_are_strictly_sequential() {
        let (board, mut p, mut seq) = setup();
        let mut events = seq.start(decode("72 73 74").unwrap(), ms(0), &board, &mut p);
        // Tick every 50ms like the UI loop does.
        let mut now = ms(0);
        while seq.state() == SequencerState::Running {
            now += ms(50);
            events.extend(seq.advance(now, &board, &mut p));
        }
        assert_eq!(
            step_starts(&events),
            vec![(0, ms(0)), (1, ms(2100)), (2, ms(4200))]
        );
        assert_eq!(events.last(), Some(&SequencerEvent::Finished { at: ms(6300) }));
    }

    #[test]
    fn test_late_tick_catches_up_without_drift() {
        let (board, mut p, mut seq) = setup();
        seq.start(decode("72 73").unwrap(), ms(0), &board, &mut p);
        let events = seq.advance(ms(10_000), &board, &mut p);
        assert_eq!(step_starts(&events), vec![(1, ms(2100))]);
        assert_eq!(events.last(), Some(&SequencerEvent::Finished { at: ms(4200) }));
        assert_eq!(p.active_glyphs().count(), 0);
    }

    #[test]
    fn test_missing_glyph_only_pauses() {
        let (board, mut p, mut seq) = setup();
        let rest = p.indicator().position(ms(0));
        // '1' has no tile on the default board.
        let events = seq.start(decode("49 65").unwrap(), ms(0), &board, &mut p);
        assert_eq!(
            events,
            vec![SequencerEvent::StepStarted {
                index: 0,
                at: ms(0),
                target: None,
            }]
        );
        assert_eq!(p.indicator().motion.to, rest);

        assert!(seq.advance(ms(299), &board, &mut p).is_empty());
        let events = seq.advance(ms(300), &board, &mut p);
        assert_eq!(step_starts(&events), vec![(1, ms(300))]);
        assert_eq!(p.indicator().position(ms(300)), rest);
    }

    #[test]
    fn test_space_and_question_mark_tiles_are_visited() {
        let (board, mut p, mut seq) = setup();
        let mut events = seq.start(decode("32 63").unwrap(), ms(0), &board, &mut p);
        events.extend(seq.advance(ms(10_000), &board, &mut p));
        let targets: Vec<Option<GlyphId>> = events
            .iter()
            .filter_map(|e| match e {
                SequencerEvent::StepStarted { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![board.locate(" "), board.locate("¿?")]);
        assert!(targets.iter().all(Option::is_some));
    }

    #[test]
    fn test_cancel_stops_all_mutation() {
        let (board, mut p, mut seq) = setup();
        let h = board.locate("H").unwrap();
        seq.start(decode("72 73").unwrap(), ms(0), &board, &mut p);
        seq.advance(ms(1200), &board, &mut p);
        assert!(p.is_active(h));

        seq.cancel(&mut p);
        assert!(!p.is_active(h));
        assert_eq!(seq.state(), SequencerState::Idle);
        assert!(seq.advance(ms(60_000), &board, &mut p).is_empty());
        assert_eq!(p.active_glyphs().count(), 0);
    }

    #[test]
    fn test_restart_replaces_previous_run() {
        let (board, mut p, mut seq) = setup();
        seq.start(decode("72").unwrap(), ms(0), &board, &mut p);
        seq.advance(ms(1100), &board, &mut p);
        let events = seq.start(decode("90").unwrap(), ms(1100), &board, &mut p);
        assert_eq!(step_starts(&events), vec![(0, ms(1100))]);
        assert_eq!(p.active_glyphs().count(), 0);
        assert_eq!(seq.current_index(), Some(0));
    }

    #[test]
    fn test_empty_run_finishes_immediately() {
        let (board, mut p, mut seq) = setup();
        let events = seq.start(Vec::new(), ms(5), &board, &mut p);
        assert_eq!(events, vec![SequencerEvent::Finished { at: ms(5) }]);
        assert!(!p.indicator().visible);
        assert_eq!(seq.state(), SequencerState::Idle);
    }
}
