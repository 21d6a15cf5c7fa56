//! Kana Pop core crate.
//!
//! A bubble-popping practice game for the Japanese kana syllabaries: the
//! player is shown a clue kana in one script and must pop the grid bubble
//! carrying the same syllable in another. The alphabet, grid, and session
//! engines are plain Rust and run natively under `cargo test`; the browser
//! surface binds them to a canvas via wasm-bindgen.

use wasm_bindgen::prelude::*;

pub mod grid;
pub mod kana;
pub mod session;
mod surface;

pub use grid::{Bubble, BubbleGrid, Highlight, Phase, Verdict, CELL_SIZE};
pub use kana::{DisplayMode, HIRAGANA, KANA_COUNT, KATAKANA, ROMAJI};
pub use session::{GameOptions, Scoreboard, Session, REVEAL_MS};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Launch the game with the default option set (2x3 grid, hiragana bubbles,
/// romaji clue).
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    surface::start(GameOptions::default())
}

/// Launch with explicit options from the setup page. Unrecognized mode
/// integers fall back to the defaults rather than failing.
#[wasm_bindgen]
pub fn start_game_with(
    rows: u32,
    cols: u32,
    question_mode: u32,
    answer_mode: u32,
    show_timer: bool,
    show_score: bool,
) -> Result<(), JsValue> {
    let defaults = GameOptions::default();
    let options = GameOptions {
        rows: rows as usize,
        cols: cols as usize,
        question_mode: DisplayMode::from_raw(question_mode).unwrap_or(defaults.question_mode),
        answer_mode: DisplayMode::from_raw(answer_mode).unwrap_or(defaults.answer_mode),
        show_timer,
        show_score,
    };
    surface::start(options)
}

/// Launch from a JSON option object; absent fields take their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_json(config: &str) -> Result<(), JsValue> {
    let options: GameOptions =
        serde_json::from_str(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    surface::start(options)
}
