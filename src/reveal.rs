//! Staggered text reveals.
//!
//! Both text panels appear piece by piece: entry `i` becomes visible at
//! `start + interval * i`. Every entry is scheduled from the same zero point,
//! so a slow frame never pushes later entries back.

use std::time::Duration;

use crate::decoder::{AsciiCode, DecodedMessage};

/// Header of the decoded message panel.
pub const RESULT_HEADER: &str = "✨ Mensagem Decifrada:";
/// Header of the calculation steps panel.
pub const STEPS_HEADER: &str = "🔮 Passo a Passo da Decifração:";
/// Delay between two decoded tokens.
pub const RESULT_STAGGER: Duration = Duration::from_millis(150);
/// Delay between two calculation steps.
pub const STEPS_STAGGER: Duration = Duration::from_millis(100);

/// Reveal schedule for `count` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    started_at: Duration,
    interval: Duration,
    count: usize,
}

impl Stagger {
    pub fn new(count: usize, started_at: Duration, interval: Duration) -> Self {
        Self {
            started_at,
            interval,
            count,
        }
    }

    /// Number of entries visible at `now`.
    pub fn visible_count(&self, now: Duration) -> usize {
        if now < self.started_at {
            return 0;
        }
        let interval = self.interval.as_nanos();
        if interval == 0 {
            return self.count;
        }
        let elapsed = (now - self.started_at).as_nanos();
        let shown = usize::try_from(elapsed / interval).unwrap_or(usize::MAX);
        shown.saturating_add(1).min(self.count)
    }

    /// Whether every entry is visible at `now`.
    pub fn is_complete(&self, now: Duration) -> bool {
        self.visible_count(now) == self.count
    }
}

/// The decoded message panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReveal {
    message: DecodedMessage,
    schedule: Stagger,
}

impl ResultReveal {
    pub fn new(message: DecodedMessage, started_at: Duration) -> Self {
        let schedule = Stagger::new(message.len(), started_at, RESULT_STAGGER);
        Self { message, schedule }
    }

    pub fn message(&self) -> &DecodedMessage {
        &self.message
    }

    pub fn schedule(&self) -> &Stagger {
        &self.schedule
    }

    /// Visible pieces, each followed by `", "` unless it is the last token.
    pub fn visible_pieces(&self, now: Duration) -> Vec<String> {
        let last = self.message.len().saturating_sub(1);
        self.message
            .tokens()
            .iter()
            .take(self.schedule.visible_count(now))
            .enumerate()
            .map(|(i, token)| {
                if i < last {
                    format!("{}, ", token)
                } else {
                    token.clone()
                }
            })
            .collect()
    }

    /// Text visible at `now`.
    pub fn text(&self, now: Duration) -> String {
        self.visible_pieces(now).concat()
    }
}

/// One line of the calculation steps panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// 1-based position in the input
    pub ordinal: usize,
    pub code: AsciiCode,
    pub token: String,
}

impl StepEntry {
    pub fn line(&self) -> String {
        format!("Código {}: {} → {}", self.ordinal, self.code, self.token)
    }
}

/// The calculation steps panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepsReveal {
    entries: Vec<StepEntry>,
    schedule: Stagger,
}

impl StepsReveal {
    pub fn new(message: &DecodedMessage, started_at: Duration) -> Self {
        let entries: Vec<StepEntry> = message
            .codes()
            .iter()
            .zip(message.tokens())
            .enumerate()
            .map(|(i, (code, token))| StepEntry {
                ordinal: i + 1,
                code: *code,
                token: token.clone(),
            })
            .collect();
        let schedule = Stagger::new(entries.len(), started_at, STEPS_STAGGER);
        Self { entries, schedule }
    }

    pub fn entries(&self) -> &[StepEntry] {
        &self.entries
    }

    /// Entries visible at `now`.
    pub fn visible(&self, now: Duration) -> &[StepEntry] {
        &self.entries[..self.schedule.visible_count(now)]
    }
}

/// Full plain-text transcript of a decode: the steps panel followed by the
/// complete message, as printed by the non-interactive mode.
pub fn transcript(message: &DecodedMessage) -> String {
    let mut out = String::new();
    out.push_str(STEPS_HEADER);
    out.push('\n');
    for entry in StepsReveal::new(message, Duration::ZERO).entries() {
        out.push_str(&entry.line());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(RESULT_HEADER);
    out.push('\n');
    out.push_str(&message.joined());
    out.push('\n');
    out
}
