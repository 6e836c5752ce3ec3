//! Presentation state.
//!
//! Everything the screen shows that changes over time lives here: the details
//! panel, the result panel, the planchette and the glyph highlight flags.
//! Other modules only mutate it through the methods below.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::board::{BoardPoint, GlyphId};
use crate::reveal::{ResultReveal, StepsReveal};

/// Contents of the details panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailsPanel {
    #[default]
    Empty,
    /// Calculation steps for a successful decode
    Steps(StepsReveal),
    /// A validation error message
    Error(String),
}

/// Eased `cubic-bezier(0.4, 0.0, 0.2, 1.0)` curve, `t` and result in [0, 1].
pub fn ease(t: f32) -> f32 {
    const P1: (f32, f32) = (0.4, 0.0);
    const P2: (f32, f32) = (0.2, 1.0);

    fn bezier(a: f32, b: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    }

    let t = t.clamp(0.0, 1.0);
    // x(s) is monotonic for these control points, so bisection is enough.
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..24 {
        let mid = (lo + hi) / 2.0;
        if bezier(P1.0, P2.0, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier(P1.1, P2.1, (lo + hi) / 2.0)
}

/// A planchette translation in board space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub from: BoardPoint,
    pub to: BoardPoint,
    pub started_at: Duration,
    pub duration: Duration,
}

impl Motion {
    /// A motion that is already at rest.
    pub fn at_rest(point: BoardPoint) -> Self {
        Self {
            from: point,
            to: point,
            started_at: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// Eased position at `now`.
    pub fn position(&self, now: Duration) -> BoardPoint {
        if self.duration.is_zero() || now >= self.started_at + self.duration {
            return self.to;
        }
        if now <= self.started_at {
            return self.from;
        }
        let t = (now - self.started_at).as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, ease(t))
    }
}

/// The moving planchette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub visible: bool,
    pub motion: Motion,
}

impl Indicator {
    pub fn position(&self, now: Duration) -> BoardPoint {
        self.motion.position(now)
    }
}

/// Owner of all mutable display state.
#[derive(Debug, Clone)]
pub struct Presentation {
    details: DetailsPanel,
    result: Option<ResultReveal>,
    indicator: Indicator,
    active: BTreeSet<GlyphId>,
}

impl Presentation {
    /// Creates an empty presentation with the planchette hidden at `rest`.
    pub fn new(rest: BoardPoint) -> Self {
        Self {
            details: DetailsPanel::Empty,
            result: None,
            indicator: Indicator {
                visible: false,
                motion: Motion::at_rest(rest),
            },
            active: BTreeSet::new(),
        }
    }

    pub fn details(&self) -> &DetailsPanel {
        &self.details
    }

    pub fn result(&self) -> Option<&ResultReveal> {
        self.result.as_ref()
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn is_active(&self, glyph: GlyphId) -> bool {
        self.active.contains(&glyph)
    }

    pub fn active_glyphs(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.active.iter().copied()
    }

    /// Clears both text panels.
    pub fn clear_panels(&mut self) {
        self.details = DetailsPanel::Empty;
        self.result = None;
    }

    pub fn show_steps(&mut self, steps: StepsReveal) {
        self.details = DetailsPanel::Steps(steps);
    }

    /// Replaces the details panel with an error and empties the result panel.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.details = DetailsPanel::Error(message.into());
        self.result = None;
    }

    pub fn show_result(&mut self, result: ResultReveal) {
        self.result = Some(result);
    }

    pub fn show_indicator(&mut self) {
        self.indicator.visible = true;
    }

    pub fn hide_indicator(&mut self) {
        self.indicator.visible = false;
    }

    /// Starts moving the planchette from wherever it is at `now` to `to`.
    pub fn move_indicator(&mut self, to: BoardPoint, now: Duration, duration: Duration) {
        let from = self.indicator.position(now);
        self.indicator.motion = Motion {
            from,
            to,
            started_at: now,
            duration,
        };
    }

    pub fn activate(&mut self, glyph: GlyphId) {
        self.active.insert(glyph);
    }

    pub fn deactivate(&mut self, glyph: GlyphId) {
        self.active.remove(&glyph);
    }

    pub fn clear_active(&mut self) {
        self.active.clear();
    }
}
