//! Browser surface: canvas drawing, score/timer readouts, and input wiring.
//!
//! Everything here is a thin collaborator over the session/grid core. The
//! surface owns the clock (`performance.now`), the entropy-seeded RNG, and
//! the serialization of click events; the post-hit pause is the session's
//! reveal window, polled from the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::grid::{Highlight, CELL_SIZE};
use crate::session::{GameOptions, Session};

const KANA_FONT: &str = "70px 'Noto Sans JP', sans-serif";
const OVERLAY_FONT: &str = "20px 'Fira Code', monospace";

struct SurfaceState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: Session,
    rng: SmallRng,
}

thread_local! {
    static SURFACE_STATE: RefCell<Option<SurfaceState>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Margins the grid is drawn at: horizontally centered, upper quarter of the
/// remaining vertical space.
fn margins(canvas: &HtmlCanvasElement, session: &Session) -> (f32, f32) {
    let grid = session.grid();
    let side = (canvas.width() as f32 - grid.width()) / 2.0;
    let top = (canvas.height() as f32 - grid.height()) / 4.0;
    (side, top)
}

pub fn start(options: GameOptions) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the game canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("kp-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("kp-canvas");
        c.set_width(480);
        c.set_height(800);
        c.set_attribute(
            "style",
            "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); background:#000; z-index:20;",
        )
        .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_text_align("center");

    let start_ms = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let mut rng = SmallRng::from_entropy();
    let session = Session::new(options, start_ms, &mut rng);

    SURFACE_STATE.with(|cell| {
        cell.replace(Some(SurfaceState {
            canvas: canvas.clone(),
            ctx,
            session,
            rng,
        }))
    });

    // Click listener: resolve against the margins the grid was drawn at.
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let x = evt.offset_x() as f32;
            let y = evt.offset_y() as f32;
            SURFACE_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    let (side, top) = margins(&state.canvas, &state.session);
                    state.session.touch(x, y, side, top, now_ms());
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        SURFACE_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                frame(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame(state: &mut SurfaceState, now: f64) {
    state.session.advance_if_due(now, &mut state.rng);
    draw(state, now);
}

fn draw(state: &mut SurfaceState, now: f64) {
    let ctx = &state.ctx;
    let session = &state.session;
    let grid = session.grid();
    let options = session.options();
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;

    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, w, h);

    // Bubbles, colored by selection state, labeled in the question script.
    let (side, top) = margins(&state.canvas, session);
    let half_cell = CELL_SIZE as f64 / 2.0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(bubble) = grid.bubble(row, col) else {
                continue;
            };
            let cx = (bubble.x() + side) as f64 + half_cell;
            let cy = (bubble.y() + top) as f64 + half_cell;
            let fill = match bubble.highlight() {
                Highlight::Neutral => "#3fa34d",
                Highlight::Correct => "#2d7dd2",
                Highlight::Wrong => "#d1462f",
            };
            ctx.set_fill_style_str(fill);
            ctx.begin_path();
            ctx.arc(cx, cy, half_cell - 2.0, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();

            ctx.set_fill_style_str("#000");
            ctx.set_font(KANA_FONT);
            ctx.fill_text(bubble.label(options.question_mode), cx, cy + 25.0)
                .ok();
        }
    }

    // The clue: the target kana in the answer script, below the grid.
    ctx.set_fill_style_str("#fff");
    ctx.set_font(KANA_FONT);
    ctx.fill_text(grid.target().label(options.answer_mode), w / 2.0, h - 100.0)
        .ok();

    // Question counter.
    ctx.set_font(OVERLAY_FONT);
    ctx.fill_text(&format!("# {}", session.score().question), w / 2.0, 30.0)
        .ok();

    if options.show_timer {
        ctx.set_text_align("left");
        ctx.fill_text(&session.elapsed_clock(now), 3.0, 30.0).ok();
        ctx.set_text_align("center");
    }

    if options.show_score {
        let score = session.score();
        let section = w / 4.0;
        ctx.fill_text(&format!("Correct: {}", score.correct), section, h - 55.0)
            .ok();
        ctx.fill_text(&format!("Wrong: {}", score.wrong), section * 3.0, h - 55.0)
            .ok();
        if let Some(accuracy) = score.accuracy() {
            ctx.fill_text(&format!("Accuracy: {accuracy:.0}%"), section, h - 25.0)
                .ok();
        }
        if let Some(avg) = score.avg_guesses() {
            ctx.fill_text(
                &format!("{avg:.1} guesses/question"),
                section * 3.0,
                h - 25.0,
            )
            .ok();
        }
    }
}
