// Before/after comparison slider: dragging the handle re-clips the "before"
// image, and a short automatic sweep on load hints that the thing is
// draggable. Percent math and the sweep are plain state so both are testable.

use crate::utils;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, MouseEvent, TouchEvent};

pub const MIN_PERCENT: f64 = 5.0;
pub const MAX_PERCENT: f64 = 95.0;

const HINT_START_MS: i32 = 1200;
const HINT_TICK_MS: i32 = 16;
const HINT_LIFETIME_MS: i32 = 4000;
const HINT_STEP: f64 = 0.6;
const HINT_LOW: f64 = 25.0;
const HINT_HIGH: f64 = 75.0;

// Reveal percentage for a pointer at `x`, clamped away from the edges so the
// handle always stays grabbable
pub fn reveal_percent(x: f64, rect_left: f64, rect_width: f64) -> f64 {
    let pct = (x - rect_left) / rect_width * 100.0;
    pct.max(MIN_PERCENT).min(MAX_PERCENT)
}

// Slow oscillation between the hint bounds; the mount code stops it on a
// timer or as soon as the user grabs the handle
pub struct HintSweep {
    pos: f64,
    dir: f64,
}

impl HintSweep {
    pub fn new() -> HintSweep {
        HintSweep {
            pos: 50.0,
            dir: -1.0,
        }
    }

    pub fn tick(&mut self) -> f64 {
        self.pos += self.dir * HINT_STEP;
        if self.pos < HINT_LOW || self.pos > HINT_HIGH {
            self.dir = -self.dir;
        }
        self.pos
    }
}

#[derive(Clone)]
struct SliderParts {
    container: Element,
    before: HtmlElement,
    handle: HtmlElement,
}

impl SliderParts {
    fn set_percent(&self, pct: f64) {
        let _ = self
            .before
            .style()
            .set_property("clip-path", &format!("inset(0 {}% 0 0)", 100.0 - pct));
        let _ = self.handle.style().set_property("left", &format!("{}%", pct));
    }

    fn set_from_pointer(&self, x: f64) {
        let rect = self.container.get_bounding_client_rect();
        self.set_percent(reveal_percent(x, rect.left(), rect.width()));
    }
}

pub fn mount_slider() -> Result<(), JsValue> {
    let document = utils::document()?;
    let container = match document.query_selector(".ba-container")? {
        Some(container) => container,
        None => return Ok(()),
    };
    let before = match container.query_selector(".ba-before")? {
        Some(el) => el.dyn_into::<HtmlElement>()?,
        None => return Ok(()),
    };
    let handle = match container.query_selector(".ba-handle")? {
        Some(el) => el.dyn_into::<HtmlElement>()?,
        None => return Ok(()),
    };

    let parts = SliderParts {
        container,
        before,
        handle,
    };
    parts.set_percent(50.0);

    let dragging = Rc::new(Cell::new(false));
    let window = utils::window()?;

    // Grabbing the handle
    {
        let dragging = dragging.clone();
        let closure = Closure::wrap(Box::new(move || dragging.set(true)) as Box<dyn FnMut()>);
        parts
            .handle
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        let mut options = AddEventListenerOptions::new();
        options.passive(true);
        parts.handle.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    // Releasing anywhere
    {
        let dragging = dragging.clone();
        let closure = Closure::wrap(Box::new(move || dragging.set(false)) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse drag
    {
        let dragging = dragging.clone();
        let parts = parts.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            if dragging.get() {
                parts.set_from_pointer(event.client_x() as f64);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch drag
    {
        let dragging = dragging.clone();
        let parts = parts.clone();
        let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            if !dragging.get() {
                return;
            }
            if let Some(touch) = event.touches().item(0) {
                parts.set_from_pointer(touch.client_x() as f64);
            }
        }) as Box<dyn FnMut(TouchEvent)>);
        let mut options = AddEventListenerOptions::new();
        options.passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    schedule_hint(parts, dragging)
}

// The demonstration sweep: starts a moment after load, oscillates the handle,
// and stops on its lifetime timer or when the user starts dragging.
fn schedule_hint(parts: SliderParts, dragging: Rc<Cell<bool>>) -> Result<(), JsValue> {
    let start = Closure::wrap(Box::new(move || {
        let sweep = Rc::new(RefCell::new(HintSweep::new()));
        let interval_id = Rc::new(Cell::new(0));

        let tick = {
            let parts = parts.clone();
            let dragging = dragging.clone();
            let interval_id = interval_id.clone();
            Closure::wrap(Box::new(move || {
                let window = match utils::window() {
                    Ok(window) => window,
                    Err(_) => return,
                };
                if dragging.get() {
                    window.clear_interval_with_handle(interval_id.get());
                    return;
                }
                let pct = sweep.borrow_mut().tick();
                parts.set_percent(pct.max(MIN_PERCENT).min(MAX_PERCENT));
            }) as Box<dyn FnMut()>)
        };

        let stop = {
            let interval_id = interval_id.clone();
            Closure::wrap(Box::new(move || {
                if let Ok(window) = utils::window() {
                    window.clear_interval_with_handle(interval_id.get());
                }
            }) as Box<dyn FnMut()>)
        };

        if let Ok(window) = utils::window() {
            if let Ok(id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                HINT_TICK_MS,
            ) {
                interval_id.set(id);
            }
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                stop.as_ref().unchecked_ref(),
                HINT_LIFETIME_MS,
            );
        }
        tick.forget();
        stop.forget();
    }) as Box<dyn FnMut()>);

    utils::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        start.as_ref().unchecked_ref(),
        HINT_START_MS,
    )?;
    start.forget();
    Ok(())
}
