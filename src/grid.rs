//! Grid/target engine: bubbles, round construction with duplicate removal,
//! and touch resolution.
//!
//! The engine is pure data plus deterministic logic. All randomness comes in
//! through the `rand::Rng` handed to the constructor, so rounds are
//! reproducible under a seeded generator. The surface owns the clock, the
//! entropy source, and the serialization of touch events; nothing here blocks
//! or locks.

use rand::Rng;

use crate::kana::{DisplayMode, KANA_COUNT};

/// Edge length of one grid cell in canvas pixels (the bubble diameter).
pub const CELL_SIZE: f32 = 100.0;

// --- Bubble ------------------------------------------------------------------

/// Selection state of a bubble. Set on the touched bubble and kept until the
/// grid is replaced for the next round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Neutral,
    Correct,
    Wrong,
}

/// One labeled bubble: a kana identity plus a grid-local position.
#[derive(Clone, Debug)]
pub struct Bubble {
    index: usize,
    x: f32,
    y: f32,
    highlight: Highlight,
}

impl Bubble {
    /// An out-of-range index clamps to the first kana; construction never
    /// fails.
    pub fn new(index: usize) -> Self {
        Self {
            index: if index < KANA_COUNT { index } else { 0 },
            x: 0.0,
            y: 0.0,
            highlight: Highlight::Neutral,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// Reassign the kana identity. An out-of-range index is ignored and the
    /// prior identity kept — only `new` falls back to a default.
    pub fn set_index(&mut self, index: usize) {
        if index < KANA_COUNT {
            self.index = index;
        }
    }

    /// Draw a fresh uniform identity; position and highlight are untouched.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.index = rng.gen_range(0..KANA_COUNT);
    }

    /// Written form of this bubble's kana in the given mode.
    pub fn label(&self, mode: DisplayMode) -> &'static str {
        mode.glyph(self.index)
    }

    /// Raw-mode variant for the JS boundary: an unrecognized mode integer
    /// yields an empty label, not an error.
    pub fn label_raw(&self, raw: u32) -> &'static str {
        DisplayMode::from_raw(raw).map_or("", |mode| self.label(mode))
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }
}

impl Default for Bubble {
    fn default() -> Self {
        Self::new(0)
    }
}

// --- Grid --------------------------------------------------------------------

/// Round lifecycle: `Active` accepts touches; `Resolved` means the last touch
/// hit the target and the caller is expected to replace the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Resolved,
}

/// Outcome of one touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The touched bubble matched the target; the round is over.
    Hit { row: usize, col: usize },
    /// The touched bubble did not match the target.
    Miss { row: usize, col: usize },
    /// The touch landed outside the grid; nothing changed.
    None,
}

/// The game grid for one round: a fixed rows x cols field of bubbles, exactly
/// one of which carries the target kana.
#[derive(Clone, Debug)]
pub struct BubbleGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Bubble>, // row-major
    target_index: usize,
    target: Bubble,
    phase: Phase,
}

impl BubbleGrid {
    /// Build a round: random fill, independent target pick, duplicate
    /// removal, then target placement. Zero dimensions clamp to 1.
    pub fn new(rows: usize, cols: usize, rng: &mut impl Rng) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let mut bubble = Bubble::default();
                bubble.set_position(col as f32 * CELL_SIZE, row as f32 * CELL_SIZE);
                bubble.randomize(rng);
                cells.push(bubble);
            }
        }

        // Target cell and target kana are chosen independently of the fill.
        let target_row = rng.gen_range(0..rows);
        let target_col = rng.gen_range(0..cols);
        let target_index = rng.gen_range(0..KANA_COUNT);

        // The target kana must not appear anywhere it was not deliberately
        // placed: cells that happen to share it are redrawn from the other
        // identities. Non-target cells may still repeat each other; only the
        // target is unique.
        for cell in &mut cells {
            if cell.index() == target_index {
                cell.set_index(random_other_index(target_index, rng));
            }
        }
        cells[target_row * cols + target_col].set_index(target_index);

        Self {
            rows,
            cols,
            cells,
            target_index,
            target: Bubble::new(target_index),
            phase: Phase::Active,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// The standalone clue bubble shown to the player; decoupled from the
    /// copy placed in the grid.
    pub fn target(&self) -> &Bubble {
        &self.target
    }

    /// Bubble at `(row, col)`, or `None` out of bounds.
    pub fn bubble(&self, row: usize, col: usize) -> Option<&Bubble> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Grid width in canvas pixels.
    pub fn width(&self) -> f32 {
        self.cols as f32 * CELL_SIZE
    }

    /// Grid height in canvas pixels.
    pub fn height(&self) -> f32 {
        self.rows as f32 * CELL_SIZE
    }

    /// Map a canvas-space touch to a grid cell, given the margins the surface
    /// drew the grid at. Touches outside the grid rectangle yield `None`.
    pub fn cell_at(&self, x: f32, y: f32, side_margin: f32, top_margin: f32) -> Option<(usize, usize)> {
        let local_x = x - side_margin;
        let local_y = y - top_margin;
        if local_x < 0.0 || local_x >= self.width() || local_y < 0.0 || local_y >= self.height() {
            return None;
        }
        Some(((local_y / CELL_SIZE) as usize, (local_x / CELL_SIZE) as usize))
    }

    /// Resolve one touch: highlight the touched bubble and report the
    /// verdict. A hit resolves the round; a miss leaves it active, so further
    /// touches (including re-touching the same wrong bubble) are processed
    /// normally.
    pub fn resolve_touch(&mut self, x: f32, y: f32, side_margin: f32, top_margin: f32) -> Verdict {
        let Some((row, col)) = self.cell_at(x, y, side_margin, top_margin) else {
            return Verdict::None;
        };
        let idx = row * self.cols + col;
        if self.cells[idx].index() == self.target_index {
            self.cells[idx].set_highlight(Highlight::Correct);
            self.phase = Phase::Resolved;
            Verdict::Hit { row, col }
        } else {
            self.cells[idx].set_highlight(Highlight::Wrong);
            Verdict::Miss { row, col }
        }
    }
}

/// Uniform draw over the alphabet excluding `exclude`: sample the 69-element
/// range and shift past the hole. Equivalent to redrawing until the collision
/// clears, without the open-ended loop.
fn random_other_index(exclude: usize, rng: &mut impl Rng) -> usize {
    let drawn = rng.gen_range(0..KANA_COUNT - 1);
    if drawn >= exclude { drawn + 1 } else { drawn }
}
