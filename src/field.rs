// The ambient particle field: a fixed collection of particles advanced and
// drawn once per frame, with the connection pass layered on top.

use crate::connector;
use crate::particle::Particle;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub const PARTICLE_COUNT: usize = 90;

pub struct Field {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl Field {
    pub fn new(width: f64, height: f64) -> Field {
        Field::from_rng(width, height, SmallRng::from_entropy())
    }

    // Seeded constructor so a field's motion and colors are reproducible
    pub fn with_seed(width: f64, height: f64, seed: u64) -> Field {
        Field::from_rng(width, height, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(width: f64, height: f64, mut rng: SmallRng) -> Field {
        let mut particles = Vec::with_capacity(PARTICLE_COUNT);
        for _ in 0..PARTICLE_COUNT {
            particles.push(Particle::new(&mut rng, width, height));
        }
        Field {
            width,
            height,
            particles,
            rng,
        }
    }

    // New bounds apply to future resets only; live particles keep their
    // positions until they drift out and re-roll.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.advance(&mut self.rng, self.width, self.height);
        }
    }

    // One full frame: clear, advance and draw every particle, then links
    pub fn frame(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(&mut self.rng, self.width, self.height);
            particle.draw(ctx)?;
        }
        connector::draw_links(&self.particles, ctx)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_holds_exactly_ninety_particles() {
        let field = Field::with_seed(800.0, 600.0, 1);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    #[test]
    fn count_is_invariant_across_resizes_and_steps() {
        let mut field = Field::with_seed(800.0, 600.0, 2);
        for i in 0..50 {
            field.step();
            if i % 10 == 0 {
                field.resize(400.0 + i as f64, 300.0);
            }
            assert_eq!(field.particles().len(), PARTICLE_COUNT);
        }
    }

    #[test]
    fn steps_respect_current_bounds() {
        let mut field = Field::with_seed(640.0, 480.0, 3);
        for _ in 0..500 {
            field.step();
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 640.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 480.0);
            }
        }
    }

    #[test]
    fn resize_does_not_relocate_particles() {
        let mut field = Field::with_seed(800.0, 600.0, 4);
        let before: Vec<[f64; 2]> = field.particles().iter().map(|p| p.pos).collect();
        field.resize(100.0, 100.0);
        let after: Vec<[f64; 2]> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn seeded_fields_are_reproducible() {
        let mut a = Field::with_seed(800.0, 600.0, 99);
        let mut b = Field::with_seed(800.0, 600.0, 99);
        for _ in 0..100 {
            a.step();
            b.step();
        }
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.color, pb.color);
        }
    }
}
