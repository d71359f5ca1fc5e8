// Click-triggered confetti burst. Pieces rain from above the viewport with
// individual drift, fall speed, and spin; the burst's frame loop retires
// pieces that fall past the bottom and shuts itself down when none are left.

use crate::color::{Color, CONFETTI_PALETTE};
use crate::raf;
use crate::utils;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

pub const PIECE_COUNT: usize = 120;
const CLICK_DELAY_MS: i32 = 100;
// Pieces are kept until this far below the bottom edge
const RETIRE_MARGIN: f64 = 20.0;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PieceShape {
    Rect,
    Circle,
}

#[derive(Copy, Clone, Debug)]
pub struct ConfettiPiece {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
    pub rotation_deg: f64,
    pub spin_deg: f64,
    pub shape: PieceShape,
}

impl ConfettiPiece {
    pub fn spawn<R: Rng>(rng: &mut R, width: f64) -> ConfettiPiece {
        ConfettiPiece {
            pos: [rng.gen::<f64>() * width, -10.0 - rng.gen::<f64>() * 200.0],
            vel: [(rng.gen::<f64>() - 0.5) * 3.0, rng.gen::<f64>() * 4.0 + 2.0],
            radius: rng.gen::<f64>() * 7.0 + 3.0,
            color: CONFETTI_PALETTE[rng.gen_range(0, CONFETTI_PALETTE.len())],
            rotation_deg: rng.gen::<f64>() * 360.0,
            spin_deg: (rng.gen::<f64>() - 0.5) * 8.0,
            shape: if rng.gen::<f64>() > 0.5 {
                PieceShape::Rect
            } else {
                PieceShape::Circle
            },
        }
    }

    pub fn advance(&mut self) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.rotation_deg += self.spin_deg;
    }

    pub fn is_retired(&self, height: f64) -> bool {
        self.pos[1] >= height + RETIRE_MARGIN
    }

    fn draw(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        ctx.save();
        ctx.translate(self.pos[0], self.pos[1])?;
        ctx.rotate(self.rotation_deg * PI / 180.0)?;
        ctx.set_fill_style(&JsValue::from_str(&self.color.to_css()));
        match self.shape {
            PieceShape::Rect => {
                ctx.fill_rect(-self.radius, -self.radius / 2.0, self.radius * 2.0, self.radius)
            }
            PieceShape::Circle => {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, self.radius, 0.0, PI * 2.0)?;
                ctx.fill();
            }
        }
        ctx.restore();
        Ok(())
    }
}

pub struct ConfettiBurst {
    pieces: Vec<ConfettiPiece>,
}

impl ConfettiBurst {
    pub fn new<R: Rng>(rng: &mut R, count: usize, width: f64) -> ConfettiBurst {
        let mut pieces = Vec::with_capacity(count);
        for _ in 0..count {
            pieces.push(ConfettiPiece::spawn(rng, width));
        }
        ConfettiBurst { pieces }
    }

    // Advances all pieces, drops the ones past the bottom, and reports how
    // many are still falling
    pub fn step(&mut self, height: f64) -> usize {
        for piece in &mut self.pieces {
            piece.advance();
        }
        self.pieces.retain(|piece| !piece.is_retired(height));
        self.pieces.len()
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    fn draw(&self, ctx: &CanvasRenderingContext2d, width: f64, height: f64) -> Result<(), JsValue> {
        ctx.clear_rect(0.0, 0.0, width, height);
        for piece in &self.pieces {
            piece.draw(ctx)?;
        }
        Ok(())
    }
}

// Fires one burst on the given canvas. `running` collapses overlapping
// triggers into one burst and is disarmed again on setup failure, so a bad
// canvas never blocks later attempts.
pub fn launch(canvas: &HtmlCanvasElement, running: &Rc<Cell<bool>>) -> Result<(), JsValue> {
    if running.get() {
        return Ok(());
    }

    let (width, height) = crate::scene::viewport_size()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let style = canvas.clone().dyn_into::<HtmlElement>()?.style();
    style.set_property("display", "block")?;

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let mut rng = SmallRng::from_entropy();
    let burst = Rc::new(RefCell::new(ConfettiBurst::new(&mut rng, PIECE_COUNT, width)));

    // Arm the guard only once nothing fallible is left before the loop, so
    // an early setup error cannot wedge it and disable the effect for good
    running.set(true);
    let running_loop = running.clone();
    let style_loop = style.clone();
    let started = raf::spawn_detached(move || {
        let mut burst = burst.borrow_mut();
        if burst.draw(&ctx, width, height).is_err() {
            running_loop.set(false);
            return false;
        }
        if burst.step(height) > 0 {
            return true;
        }
        let _ = style_loop.set_property("display", "none");
        running_loop.set(false);
        false
    });
    if started.is_err() {
        running.set(false);
        let _ = style.set_property("display", "none");
    }
    started
}

// Hooks the burst up to every glow button; no canvas, no effect
pub fn mount_confetti(canvas_id: &str) -> Result<(), JsValue> {
    let document = utils::document()?;
    let canvas = match document.get_element_by_id(canvas_id) {
        Some(canvas) => canvas.dyn_into::<HtmlCanvasElement>()?,
        None => return Ok(()),
    };
    let buttons = document.query_selector_all(".btn-glow")?;
    let running = Rc::new(Cell::new(false));

    for i in 0..buttons.length() {
        let button = match buttons.item(i) {
            Some(button) => button,
            None => continue,
        };
        let canvas = canvas.clone();
        let running = running.clone();

        // The burst starts a beat after the click so the button's own
        // animation reads first
        let fire = Closure::wrap(Box::new(move || {
            let _ = launch(&canvas, &running);
        }) as Box<dyn FnMut()>);
        let fire = Rc::new(fire);

        let fire_inner = fire.clone();
        let on_click = Closure::wrap(Box::new(move || {
            if let Ok(window) = utils::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    fire_inner.as_ref().as_ref().unchecked_ref(),
                    CLICK_DELAY_MS,
                );
            }
        }) as Box<dyn FnMut()>);

        if let Some(target) = button.dyn_ref::<web_sys::EventTarget>() {
            target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        }
        on_click.forget();
        std::mem::forget(fire);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_above_the_viewport_with_downward_speed() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..500 {
            let piece = ConfettiPiece::spawn(&mut rng, 1024.0);
            assert!(piece.pos[0] >= 0.0 && piece.pos[0] <= 1024.0);
            assert!(piece.pos[1] <= -10.0 && piece.pos[1] >= -210.0);
            assert!(piece.vel[1] >= 2.0 && piece.vel[1] <= 6.0);
            assert!(piece.radius >= 3.0 && piece.radius <= 10.0);
            assert!(CONFETTI_PALETTE.contains(&piece.color));
        }
    }

    #[test]
    fn burst_always_terminates() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut burst = ConfettiBurst::new(&mut rng, PIECE_COUNT, 800.0);
        assert_eq!(burst.pieces().len(), PIECE_COUNT);
        let mut frames = 0;
        while burst.step(600.0) > 0 {
            frames += 1;
            // Slowest piece: 2 px/frame over at most 830 px of travel
            assert!(frames < 1_000, "burst did not settle");
        }
        assert!(burst.pieces().is_empty());
    }

    #[test]
    fn pieces_fall_monotonically() {
        let mut rng = SmallRng::seed_from_u64(13);
        let mut piece = ConfettiPiece::spawn(&mut rng, 800.0);
        let mut last_y = piece.pos[1];
        for _ in 0..100 {
            piece.advance();
            assert!(piece.pos[1] > last_y);
            last_y = piece.pos[1];
        }
    }

    #[test]
    fn retirement_uses_the_bottom_margin() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut piece = ConfettiPiece::spawn(&mut rng, 800.0);
        piece.pos[1] = 619.0;
        assert!(!piece.is_retired(600.0));
        piece.pos[1] = 620.0;
        assert!(piece.is_retired(600.0));
    }
}
