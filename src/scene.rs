// Wires the particle field to a real canvas: owns the 2d context and the
// frame loop, and keeps the field bounds in sync with the window.

use crate::field::Field;
use crate::raf::FrameLoop;
use crate::utils;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

#[wasm_bindgen]
pub struct ParticleScene {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: Rc<RefCell<Field>>,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl ParticleScene {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ParticleScene, JsValue> {
        ParticleScene::build(canvas_id, None)
    }

    // Seeded constructor for reproducible motion
    pub fn with_seed(canvas_id: &str, seed: u32) -> Result<ParticleScene, JsValue> {
        ParticleScene::build(canvas_id, Some(seed as u64))
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.frame_loop.is_some() {
            return Ok(());
        }
        let field = self.field.clone();
        let ctx = self.ctx.clone();
        self.frame_loop = Some(FrameLoop::start(move || {
            match field.borrow_mut().frame(&ctx) {
                Ok(()) => true,
                Err(err) => {
                    console::error_1(&err);
                    false
                }
            }
        })?);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.frame_loop.take();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_some()
    }

    // Resizes the backing canvas and the field bounds together. Particles
    // keep their positions; only future resets see the new bounds.
    pub fn resize(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field.borrow_mut().resize(width, height);
    }
}

impl ParticleScene {
    fn build(canvas_id: &str, seed: Option<u64>) -> Result<ParticleScene, JsValue> {
        let document = utils::document()?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("particle canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        let (width, height) = viewport_size()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let field = match seed {
            Some(seed) => Field::with_seed(width, height, seed),
            None => Field::new(width, height),
        };
        Ok(ParticleScene {
            canvas,
            ctx,
            field: Rc::new(RefCell::new(field)),
            frame_loop: None,
        })
    }

    // Follows window resizes for the lifetime of the page
    pub fn bind_resize(&self) -> Result<(), JsValue> {
        let canvas = self.canvas.clone();
        let field = self.field.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Ok((width, height)) = viewport_size() {
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                field.borrow_mut().resize(width, height);
            }
        }) as Box<dyn FnMut()>);
        utils::window()?
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

pub fn viewport_size() -> Result<(f64, f64), JsValue> {
    let window = utils::window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

// Full particle-background setup: sized canvas, resize tracking, running
// loop. Skips quietly when the canvas is not on this page.
pub fn mount_particle_field(
    canvas_id: &str,
    seed: Option<u32>,
) -> Result<Option<ParticleScene>, JsValue> {
    if utils::document()?.get_element_by_id(canvas_id).is_none() {
        return Ok(None);
    }
    let mut scene = match seed {
        Some(seed) => ParticleScene::with_seed(canvas_id, seed)?,
        None => ParticleScene::new(canvas_id)?,
    };
    scene.bind_resize()?;
    scene.start()?;
    Ok(Some(scene))
}
