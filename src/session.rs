//! Round driving and scoring: the layer between the grid engine and the
//! browser surface.
//!
//! A hit opens a timed reveal window so the player sees their correct answer;
//! input is suppressed while it is open and the next grid is built once it
//! elapses — polled from the frame loop, never a blocking wait. All
//! timestamps are supplied by the caller, so sessions are fully deterministic
//! under test.

use rand::Rng;

use crate::grid::{BubbleGrid, Verdict};
use crate::kana::DisplayMode;

/// How long a correct answer stays on screen before the next round.
pub const REVEAL_MS: f64 = 1000.0;

/// Option set handed over by the setup page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameOptions {
    pub rows: usize,
    pub cols: usize,
    /// Script drawn on the bubbles.
    pub question_mode: DisplayMode,
    /// Script the clue is shown in.
    pub answer_mode: DisplayMode,
    pub show_timer: bool,
    pub show_score: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 3,
            question_mode: DisplayMode::Hiragana,
            answer_mode: DisplayMode::Romaji,
            show_timer: true,
            show_score: true,
        }
    }
}

impl GameOptions {
    /// Zero dimensions clamp to one; a degenerate setup page never breaks
    /// the game.
    pub fn clamped(mut self) -> Self {
        self.rows = self.rows.max(1);
        self.cols = self.cols.max(1);
        self
    }
}

/// Correct / wrong tallies plus the 1-based question counter.
#[derive(Clone, Copy, Debug)]
pub struct Scoreboard {
    pub correct: u32,
    pub wrong: u32,
    pub question: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            correct: 0,
            wrong: 0,
            question: 1,
        }
    }
}

impl Scoreboard {
    /// Percentage of guesses that were correct; `None` before any guess.
    pub fn accuracy(&self) -> Option<f32> {
        let total = self.correct + self.wrong;
        (total > 0).then(|| self.correct as f32 / total as f32 * 100.0)
    }

    /// Guesses spent per solved question; `None` before the first hit.
    pub fn avg_guesses(&self) -> Option<f32> {
        (self.correct > 0).then(|| (self.correct + self.wrong) as f32 / self.correct as f32)
    }
}

/// One play session: the current grid, the tallies, and the reveal window.
pub struct Session {
    options: GameOptions,
    grid: BubbleGrid,
    score: Scoreboard,
    start_ms: f64,
    reveal_until_ms: Option<f64>,
}

impl Session {
    pub fn new(options: GameOptions, start_ms: f64, rng: &mut impl Rng) -> Self {
        let options = options.clamped();
        let grid = BubbleGrid::new(options.rows, options.cols, rng);
        Self {
            options,
            grid,
            score: Scoreboard::default(),
            start_ms,
            reveal_until_ms: None,
        }
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn grid(&self) -> &BubbleGrid {
        &self.grid
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    /// Feed one touch through the grid and update the tallies. Touches that
    /// arrive while a solved round is held on screen are dropped before they
    /// reach the grid.
    pub fn touch(&mut self, x: f32, y: f32, side_margin: f32, top_margin: f32, now: f64) -> Verdict {
        if self.reveal_until_ms.is_some() {
            return Verdict::None;
        }
        let verdict = self.grid.resolve_touch(x, y, side_margin, top_margin);
        match verdict {
            Verdict::Hit { .. } => {
                self.score.correct += 1;
                self.reveal_until_ms = Some(now + REVEAL_MS);
            }
            Verdict::Miss { .. } => self.score.wrong += 1,
            Verdict::None => {}
        }
        verdict
    }

    /// Replace the solved grid once the reveal window has elapsed. The new
    /// round keeps the dimensions and draws an independent target. Returns
    /// true when a new round was started.
    pub fn advance_if_due(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        match self.reveal_until_ms {
            Some(until) if now >= until => {
                self.grid = BubbleGrid::new(self.options.rows, self.options.cols, rng);
                self.score.question += 1;
                self.reveal_until_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn elapsed_ms(&self, now: f64) -> f64 {
        (now - self.start_ms).max(0.0)
    }

    /// Timer readout as `m:ss`.
    pub fn elapsed_clock(&self, now: f64) -> String {
        let total_sec = (self.elapsed_ms(now) / 1000.0) as u64;
        format!("{}:{:02}", total_sec / 60, total_sec % 60)
    }
}
