// Pairwise connection pass: a faint line between every two particles closer
// than LINK_DISTANCE, fading out linearly with distance. O(n^2) over the
// field, which is fine for 90 particles but needs spatial partitioning
// before growing much past ~150.

use crate::color;
use crate::particle::Particle;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub const LINK_DISTANCE: f64 = 100.0;
pub const LINK_MAX_ALPHA: f64 = 0.15;
pub const LINK_WIDTH: f64 = 0.6;

// Line opacity for a pair at the given distance; None at or past the cutoff
pub fn link_alpha(dist: f64) -> Option<f64> {
    if dist < LINK_DISTANCE {
        Some((1.0 - dist / LINK_DISTANCE) * LINK_MAX_ALPHA)
    } else {
        None
    }
}

// Every unordered pair (i < j) close enough to connect, with its line alpha
pub fn linked_pairs(particles: &[Particle]) -> Vec<(usize, usize, f64)> {
    let mut pairs = Vec::new();
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let delta = vecmath::vec2_sub(particles[i].pos, particles[j].pos);
            let dist = vecmath::vec2_len(delta);
            if let Some(alpha) = link_alpha(dist) {
                pairs.push((i, j, alpha));
            }
        }
    }
    pairs
}

pub fn draw_links(
    particles: &[Particle],
    ctx: &CanvasRenderingContext2d,
) -> Result<(), JsValue> {
    let css = color::LINK_GREEN.to_css();
    for (i, j, alpha) in linked_pairs(particles) {
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_stroke_style(&JsValue::from_str(&css));
        ctx.set_line_width(LINK_WIDTH);
        ctx.begin_path();
        ctx.move_to(particles[i].pos[0], particles[i].pos[1]);
        ctx.line_to(particles[j].pos[0], particles[j].pos[1]);
        ctx.stroke();
        ctx.restore();
    }
    Ok(())
}
