mod utils;

pub mod raf;

pub mod color;
pub mod confetti;
pub mod connector;
pub mod counter;
pub mod field;
pub mod nav;
pub mod particle;
pub mod pointer;
pub mod reveal;
pub mod scene;
pub mod slider;
pub mod typewriter;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub use crate::scene::ParticleScene;

const PARTICLE_CANVAS_ID: &str = "particles-canvas";
const CONFETTI_CANVAS_ID: &str = "confetti-canvas";
const TYPEWRITER_ID: &str = "typewriter";
const FLOATING_CTA_ID: &str = "float-wa";

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Individual mount points, each a no-op when its elements are missing from
// the page

#[wasm_bindgen]
pub fn mount_particles(seed: Option<u32>) -> Result<Option<ParticleScene>, JsValue> {
    scene::mount_particle_field(PARTICLE_CANVAS_ID, seed)
}

#[wasm_bindgen]
pub fn mount_typewriter() -> Result<(), JsValue> {
    typewriter::mount_typewriter(TYPEWRITER_ID)
}

#[wasm_bindgen]
pub fn mount_scroll_effects() -> Result<(), JsValue> {
    reveal::mount_reveals()?;
    reveal::mount_ingredient_bars()?;
    counter::mount_counters()?;
    nav::mount_floating_cta(FLOATING_CTA_ID)
}

#[wasm_bindgen]
pub fn mount_slider() -> Result<(), JsValue> {
    slider::mount_slider()
}

#[wasm_bindgen]
pub fn mount_confetti() -> Result<(), JsValue> {
    confetti::mount_confetti(CONFETTI_CANVAS_ID)
}

#[wasm_bindgen]
pub fn mount_pointer_effects() -> Result<(), JsValue> {
    pointer::mount_parallax()?;
    pointer::mount_cursor_glow()
}

// Everything at once; pass a seed for reproducible particle motion. The
// returned scene handle stops the background loop when freed, so callers
// that want it running for the page lifetime should hold on to it.
#[wasm_bindgen]
pub fn mount_all(seed: Option<u32>) -> Result<Option<ParticleScene>, JsValue> {
    let scene = mount_particles(seed)?;
    mount_typewriter()?;
    mount_scroll_effects()?;
    mount_slider()?;
    mount_confetti()?;
    mount_pointer_effects()?;
    Ok(scene)
}
