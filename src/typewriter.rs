// Cycling type/delete headline effect. The pacing lives in a plain state
// machine that hands back the text to show and how long to wait before the
// next step; the DOM driver just replays those steps through setTimeout.

use crate::utils;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub const TYPE_DELAY_MS: i32 = 80;
pub const HOLD_DELAY_MS: i32 = 1800;
pub const DELETE_DELAY_MS: i32 = 45;
pub const PAUSE_DELAY_MS: i32 = 400;

const DEFAULT_PHRASES: [&str; 4] = ["Articulações", "Musculares", "nas Costas", "Crônicas"];

#[derive(Debug, PartialEq)]
pub struct TypeStep {
    pub text: String,
    pub delay_ms: i32,
}

pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    shown: usize,
    deleting: bool,
}

impl Typewriter {
    // Empty phrases would make the delete phase underflow, so they are
    // dropped up front; a list with nothing left idles in tick().
    pub fn new(phrases: Vec<String>) -> Typewriter {
        let phrases = phrases.into_iter().filter(|p| !p.is_empty()).collect();
        Typewriter {
            phrases,
            phrase: 0,
            shown: 0,
            deleting: false,
        }
    }

    // One keystroke of the effect: grow the visible prefix until the phrase
    // is complete, hold, shrink it back, then pause and move on.
    pub fn tick(&mut self) -> TypeStep {
        if self.phrases.is_empty() {
            return TypeStep {
                text: String::new(),
                delay_ms: PAUSE_DELAY_MS,
            };
        }
        let full_len = self.phrases[self.phrase].chars().count();
        let delay_ms;
        if !self.deleting {
            self.shown += 1;
            if self.shown >= full_len {
                self.shown = full_len;
                self.deleting = true;
                delay_ms = HOLD_DELAY_MS;
            } else {
                delay_ms = TYPE_DELAY_MS;
            }
        } else {
            self.shown -= 1;
            if self.shown == 0 {
                self.deleting = false;
                self.phrase = (self.phrase + 1) % self.phrases.len();
                delay_ms = PAUSE_DELAY_MS;
            } else {
                delay_ms = DELETE_DELAY_MS;
            }
        }
        // On the pause step shown is 0, so the phrase index having already
        // advanced does not change the (empty) text.
        TypeStep {
            text: self.phrases[self.phrase].chars().take(self.shown).collect(),
            delay_ms,
        }
    }
}

// Starts the effect on the element with the given id, if present
pub fn mount_typewriter(element_id: &str) -> Result<(), JsValue> {
    let document = utils::document()?;
    let element = match document.get_element_by_id(element_id) {
        Some(element) => element,
        None => return Ok(()),
    };

    let phrases = DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect();
    let state = Rc::new(RefCell::new(Typewriter::new(phrases)));

    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let slot_inner = slot.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let step = state.borrow_mut().tick();
        element.set_text_content(Some(&step.text));
        if let (Ok(window), Some(closure)) = (utils::window(), slot_inner.borrow().as_ref()) {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                step.delay_ms,
            );
        }
    }) as Box<dyn FnMut()>));

    if let Some(closure) = slot.borrow().as_ref() {
        utils::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TYPE_DELAY_MS,
        )?;
    }
    // The effect runs for the page lifetime; the closure stays alive through
    // the Rc cycle above.
    std::mem::forget(slot);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn types_out_a_phrase_character_by_character() {
        let mut tw = machine(&["hey"]);
        assert_eq!(
            tw.tick(),
            TypeStep {
                text: "h".into(),
                delay_ms: TYPE_DELAY_MS
            }
        );
        assert_eq!(
            tw.tick(),
            TypeStep {
                text: "he".into(),
                delay_ms: TYPE_DELAY_MS
            }
        );
        // Completion switches to the long hold
        assert_eq!(
            tw.tick(),
            TypeStep {
                text: "hey".into(),
                delay_ms: HOLD_DELAY_MS
            }
        );
    }

    #[test]
    fn deletes_back_and_advances_to_the_next_phrase() {
        let mut tw = machine(&["ab", "cd"]);
        tw.tick(); // a
        tw.tick(); // ab, hold
        assert_eq!(
            tw.tick(),
            TypeStep {
                text: "a".into(),
                delay_ms: DELETE_DELAY_MS
            }
        );
        let pause = tw.tick();
        assert_eq!(pause.text, "");
        assert_eq!(pause.delay_ms, PAUSE_DELAY_MS);
        // Next phrase starts typing
        assert_eq!(tw.tick().text, "c");
    }

    #[test]
    fn cycles_through_all_phrases() {
        let mut tw = machine(&["a", "b", "c"]);
        let mut seen = Vec::new();
        for _ in 0..8 {
            let step = tw.tick();
            if step.delay_ms == HOLD_DELAY_MS {
                seen.push(step.text);
            }
        }
        assert_eq!(seen, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn empty_phrase_list_idles_instead_of_panicking() {
        let mut tw = machine(&[]);
        for _ in 0..10 {
            let step = tw.tick();
            assert_eq!(step.text, "");
            assert_eq!(step.delay_ms, PAUSE_DELAY_MS);
        }
    }

    #[test]
    fn empty_phrases_are_skipped() {
        let mut tw = machine(&["", "ok", ""]);
        let mut seen = Vec::new();
        for _ in 0..8 {
            let step = tw.tick();
            if step.delay_ms == HOLD_DELAY_MS {
                seen.push(step.text);
            }
        }
        // Only the non-empty phrase ever completes
        assert_eq!(seen, vec!["ok", "ok"]);
    }

    #[test]
    fn handles_multibyte_phrases() {
        let mut tw = machine(&["Crônicas"]);
        assert_eq!(tw.tick().text, "C");
        assert_eq!(tw.tick().text, "Cr");
        assert_eq!(tw.tick().text, "Crô");
    }
}
