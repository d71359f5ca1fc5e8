// Simple particle struct to keep track of individual position, velocity,
// radius, opacity, and color. Particles that drift off the canvas are
// re-rolled from scratch rather than clamped or bounced; the teleport is
// part of the ambient look.

use crate::color::{self, Color};
use rand::Rng;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub const MAX_SPEED: f64 = 0.3;
pub const MIN_RADIUS: f64 = 0.5;
pub const MAX_RADIUS: f64 = 3.0;
pub const MIN_ALPHA: f64 = 0.1;
pub const MAX_ALPHA: f64 = 0.6;
const GLOW_BLUR: f64 = 8.0;

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub alpha: f64,
    pub color: Color,
}

impl Particle {
    pub fn new<R: Rng>(rng: &mut R, width: f64, height: f64) -> Particle {
        let mut p = Particle {
            pos: [0.0, 0.0],
            vel: [0.0, 0.0],
            radius: 0.0,
            alpha: 0.0,
            color: color::PARTICLE_GREEN,
        };
        p.reset(rng, width, height);
        p
    }

    // Re-rolls every attribute against the current canvas bounds
    pub fn reset<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64) {
        self.pos = [rng.gen::<f64>() * width, rng.gen::<f64>() * height];
        self.vel = [
            (rng.gen::<f64>() - 0.5) * MAX_SPEED * 2.0,
            (rng.gen::<f64>() - 0.5) * MAX_SPEED * 2.0,
        ];
        self.radius = rng.gen::<f64>() * (MAX_RADIUS - MIN_RADIUS) + MIN_RADIUS;
        self.alpha = rng.gen::<f64>() * (MAX_ALPHA - MIN_ALPHA) + MIN_ALPHA;
        self.color = if rng.gen::<f64>() > 0.5 {
            color::PARTICLE_GREEN
        } else {
            color::PARTICLE_GOLD
        };
    }

    // One simulation step. Leaving the canvas on either axis re-rolls the
    // particle instead of clamping it at the edge.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        let [x, y] = self.pos;
        if x < 0.0 || x > width || y < 0.0 || y > height {
            self.reset(rng, width, height);
        }
    }

    pub fn draw(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let css = self.color.to_css();
        ctx.save();
        ctx.set_global_alpha(self.alpha);
        ctx.set_fill_style(&JsValue::from_str(&css));
        ctx.set_shadow_blur(GLOW_BLUR);
        ctx.set_shadow_color(&css);
        ctx.begin_path();
        ctx.arc(self.pos[0], self.pos[1], self.radius, 0.0, PI * 2.0)?;
        ctx.fill();
        ctx.restore();
        Ok(())
    }
}
