// Floating call-to-action visibility: hidden at the top of the page, shown
// once the user has scrolled past the threshold.

use crate::utils;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const SCROLL_THRESHOLD: f64 = 200.0;

pub fn cta_opacity(scroll_y: f64) -> &'static str {
    if scroll_y > SCROLL_THRESHOLD {
        "1"
    } else {
        "0"
    }
}

pub fn mount_floating_cta(element_id: &str) -> Result<(), JsValue> {
    let document = utils::document()?;
    let element = match document.get_element_by_id(element_id) {
        Some(element) => element.dyn_into::<HtmlElement>()?,
        None => return Ok(()),
    };
    let window = utils::window()?;

    let closure = Closure::wrap(Box::new(move || {
        if let Ok(window) = utils::window() {
            if let Ok(scroll_y) = window.scroll_y() {
                let _ = element.style().set_property("opacity", cta_opacity(scroll_y));
            }
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_past_the_threshold() {
        assert_eq!(cta_opacity(0.0), "0");
        assert_eq!(cta_opacity(200.0), "0");
        assert_eq!(cta_opacity(200.1), "1");
        assert_eq!(cta_opacity(5_000.0), "1");
    }
}
