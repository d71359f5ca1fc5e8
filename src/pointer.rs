// Mouse-position effects: the hero image parallax drift and the radial
// cursor glow. Both are passive listeners for the page lifetime.

use crate::utils;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

pub const PARALLAX_RANGE_X: f64 = 18.0;
pub const PARALLAX_RANGE_Y: f64 = 12.0;

const GLOW_CSS: &str = "position:fixed;pointer-events:none;z-index:9999;\
width:28px;height:28px;border-radius:50%;\
background:radial-gradient(circle,rgba(57,255,106,.35),transparent);\
transform:translate(-50%,-50%);transition:transform .1s;mix-blend-mode:screen;";

// Offset of the hero image for a pointer at (x, y) in a w x h viewport,
// centered on zero
pub fn parallax_offset(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (
        (x / width - 0.5) * PARALLAX_RANGE_X,
        (y / height - 0.5) * PARALLAX_RANGE_Y,
    )
}

pub fn mount_parallax() -> Result<(), JsValue> {
    let document = utils::document()?;
    let hero = match document.query_selector(".hero-float")? {
        Some(hero) => hero.dyn_into::<HtmlElement>()?,
        None => return Ok(()),
    };
    let window = utils::window()?;

    let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        let (width, height) = match crate::scene::viewport_size() {
            Ok(size) => size,
            Err(_) => return,
        };
        if width == 0.0 || height == 0.0 {
            return;
        }
        let (dx, dy) =
            parallax_offset(event.client_x() as f64, event.client_y() as f64, width, height);
        let _ = hero
            .style()
            .set_property("transform", &format!("translate({}px,{}px)", dx, dy));
    }) as Box<dyn FnMut(MouseEvent)>);
    window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// Soft glow dot that trails the cursor. Only created on devices with a fine
// pointer; touch screens never see it.
pub fn mount_cursor_glow() -> Result<(), JsValue> {
    let window = utils::window()?;
    let fine_pointer = window
        .match_media("(pointer:fine)")?
        .map(|media| media.matches())
        .unwrap_or(false);
    if !fine_pointer {
        return Ok(());
    }

    let document = utils::document()?;
    let glow = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    glow.style().set_css_text(GLOW_CSS);
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&glow)?;

    let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        let _ = glow
            .style()
            .set_property("left", &format!("{}px", event.client_x()));
        let _ = glow
            .style()
            .set_property("top", &format!("{}px", event.client_y()));
    }) as Box<dyn FnMut(MouseEvent)>);
    window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pointer_means_no_offset() {
        assert_eq!(parallax_offset(500.0, 400.0, 1000.0, 800.0), (0.0, 0.0));
    }

    #[test]
    fn corners_hit_the_full_range() {
        let (dx, dy) = parallax_offset(0.0, 0.0, 1000.0, 800.0);
        assert_eq!((dx, dy), (-PARALLAX_RANGE_X / 2.0, -PARALLAX_RANGE_Y / 2.0));
        let (dx, dy) = parallax_offset(1000.0, 800.0, 1000.0, 800.0);
        assert_eq!((dx, dy), (PARALLAX_RANGE_X / 2.0, PARALLAX_RANGE_Y / 2.0));
    }
}
