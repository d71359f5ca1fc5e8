// Scroll-reveal effects built on IntersectionObserver: each observed element
// fires once when it crosses the visibility threshold and is then dropped
// from the observer.

use crate::utils;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
              IntersectionObserverInit};

pub const REVEAL_THRESHOLD: f64 = 0.12;
pub const BAR_THRESHOLD: f64 = 0.3;
const BAR_DELAY_MS: i32 = 200;

const REVEAL_SELECTOR: &str = ".reveal,.reveal-left,.reveal-right,.reveal-scale";

// Observes every element matching `selector` and runs `on_visible` exactly
// once per element, the first time it crosses `threshold`.
pub fn observe_once<F>(selector: &str, threshold: f64, mut on_visible: F) -> Result<(), JsValue>
where
    F: FnMut(&Element) + 'static,
{
    let document = utils::document()?;
    let nodes = document.query_selector_all(selector)?;
    if nodes.length() == 0 {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    on_visible(&target);
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Some(element) = node.dyn_ref::<Element>() {
                observer.observe(element);
            }
        }
    }
    // Observer and callback live for the page lifetime
    callback.forget();
    Ok(())
}

// One-shot `visible` class toggle on all reveal-family elements
pub fn mount_reveals() -> Result<(), JsValue> {
    observe_once(REVEAL_SELECTOR, REVEAL_THRESHOLD, |element| {
        let _ = element.class_list().add_1("visible");
    })
}

// Ingredient cards: once a card scrolls in, its bar animates to the width
// stashed in data-width, after a short delay so the card transition lands
// first.
pub fn mount_ingredient_bars() -> Result<(), JsValue> {
    observe_once(".ing-card", BAR_THRESHOLD, |card| {
        let bar = match card.query_selector(".ing-bar") {
            Ok(Some(bar)) => bar,
            _ => return,
        };
        let bar = match bar.dyn_into::<HtmlElement>() {
            Ok(bar) => bar,
            Err(_) => return,
        };
        let closure = Closure::wrap(Box::new(move || {
            if let Some(width) = bar.dataset().get("width") {
                let _ = bar.style().set_property("width", &width);
            }
        }) as Box<dyn FnMut()>);
        if let Ok(window) = utils::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                BAR_DELAY_MS,
            );
        }
        closure.forget();
    })
}
