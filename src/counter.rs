// Visibility-triggered numeric count-up. The arithmetic is a tiny fixed-step
// ramp kept separate from the DOM so the 80-step/20ms contract is testable.

use crate::reveal;
use crate::utils;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const COUNT_STEPS: f64 = 80.0;
pub const TICK_MS: i32 = 20;
pub const COUNTER_THRESHOLD: f64 = 0.5;

pub struct CountUp {
    value: f64,
    target: f64,
    step: f64,
}

impl CountUp {
    pub fn new(target: f64) -> CountUp {
        CountUp {
            value: 0.0,
            target,
            step: target / COUNT_STEPS,
        }
    }

    // Advances one tick and returns the value to display, clamped at target
    pub fn tick(&mut self) -> f64 {
        self.value = (self.value + self.step).min(self.target);
        self.value
    }

    pub fn done(&self) -> bool {
        self.value >= self.target
    }

    pub fn display(&self, suffix: &str) -> String {
        format!("{}{}", self.value.round() as i64, suffix)
    }
}

// Starts the interval that writes the ramp into the element's text
fn animate_counter(element: HtmlElement, target: f64, suffix: String) -> Result<(), JsValue> {
    let counter = Rc::new(RefCell::new(CountUp::new(target)));
    let handle = Rc::new(Cell::new(0));
    let handle_inner = handle.clone();

    let closure = Closure::wrap(Box::new(move || {
        let mut counter = counter.borrow_mut();
        counter.tick();
        element.set_text_content(Some(&counter.display(&suffix)));
        if counter.done() {
            if let Ok(window) = utils::window() {
                window.clear_interval_with_handle(handle_inner.get());
            }
        }
    }) as Box<dyn FnMut()>);

    let id = utils::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        TICK_MS,
    )?;
    handle.set(id);
    closure.forget();
    Ok(())
}

// Counters start their ramp the first time they become half visible. Target
// and suffix come from data-target / data-suffix on the element.
pub fn mount_counters() -> Result<(), JsValue> {
    reveal::observe_once(".counter-num", COUNTER_THRESHOLD, |element| {
        let element = match element.clone().dyn_into::<HtmlElement>() {
            Ok(element) => element,
            Err(_) => return,
        };
        let target = element
            .dataset()
            .get("target")
            .and_then(|t| t.parse::<f64>().ok());
        let target = match target {
            Some(target) => target,
            None => return,
        };
        let suffix = element.dataset().get("suffix").unwrap_or_default();
        let _ = animate_counter(element, target, suffix);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_in_eighty_steps() {
        let mut counter = CountUp::new(400.0);
        for step in 1..=80 {
            let value = counter.tick();
            assert!((value - step as f64 * 5.0).abs() < 1e-9);
        }
        assert!(counter.done());
    }

    #[test]
    fn never_overshoots_target() {
        let mut counter = CountUp::new(97.0);
        for _ in 0..200 {
            assert!(counter.tick() <= 97.0);
        }
        assert!(counter.done());
        assert_eq!(counter.display("%"), "97%");
    }

    #[test]
    fn display_rounds_and_appends_suffix() {
        let mut counter = CountUp::new(10.0);
        counter.tick();
        assert_eq!(counter.display("+"), "0+");
        for _ in 0..3 {
            counter.tick();
        }
        assert_eq!(counter.display("+"), "1+");
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = CountUp::new(0.0);
        counter.tick();
        assert!(counter.done());
        assert_eq!(counter.display(""), "0");
    }
}
