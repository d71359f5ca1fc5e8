// requestAnimationFrame plumbing. The browser gives us a one-shot callback
// per refresh; these helpers turn that into a recurring tick that can be
// stopped, either by dropping the handle or by the tick itself returning
// false.

use crate::utils;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameClosure = Closure<dyn FnMut()>;

fn request_frame(closure: &FrameClosure) -> Result<i32, JsValue> {
    utils::window()?.request_animation_frame(closure.as_ref().unchecked_ref())
}

// A recurring per-frame task. Cancels on drop, so whoever owns the handle
// owns the loop; a tick returning false ends the loop from the inside.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
    slot: Rc<RefCell<Option<FrameClosure>>>,
}

impl FrameLoop {
    pub fn start<F>(tick: F) -> Result<FrameLoop, JsValue>
    where
        F: FnMut() -> bool + 'static,
    {
        let raf_id = Rc::new(Cell::new(None));
        let cancelled = Rc::new(Cell::new(false));
        let slot = schedule(tick, raf_id.clone(), cancelled.clone())?;
        Ok(FrameLoop {
            raf_id,
            cancelled,
            slot,
        })
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.raf_id.take() {
            if let Ok(window) = utils::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // The closure holds an Rc back to its own slot; with the pending
        // frame cancelled it would never run again to free itself, so the
        // cycle has to be broken here. Never called from inside a tick, and
        // a loop that already ended itself leaves an empty slot.
        self.slot.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

// Fire-and-forget variant for loops that decide their own end, like the
// confetti burst. Nothing to cancel from outside; the closure frees itself
// once the tick reports it is done.
pub fn spawn_detached<F>(tick: F) -> Result<(), JsValue>
where
    F: FnMut() -> bool + 'static,
{
    schedule(tick, Rc::new(Cell::new(None)), Rc::new(Cell::new(false)))?;
    Ok(())
}

fn schedule<F>(
    mut tick: F,
    raf_id: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
) -> Result<Rc<RefCell<Option<FrameClosure>>>, JsValue>
where
    F: FnMut() -> bool + 'static,
{
    let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let slot_inner = slot.clone();
    let raf_inner = raf_id.clone();
    let cancelled_inner = cancelled.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancelled_inner.get() {
            slot_inner.borrow_mut().take();
            return;
        }
        if !tick() {
            cancelled_inner.set(true);
            slot_inner.borrow_mut().take();
            return;
        }
        let next = {
            let slot_ref = slot_inner.borrow();
            match slot_ref.as_ref() {
                Some(closure) => request_frame(closure),
                None => return,
            }
        };
        match next {
            Ok(id) => raf_inner.set(Some(id)),
            Err(_) => cancelled_inner.set(true),
        }
    }) as Box<dyn FnMut()>));

    let first = {
        let slot_ref = slot.borrow();
        request_frame(slot_ref.as_ref().ok_or_else(|| {
            JsValue::from_str("frame closure missing")
        })?)?
    };
    raf_id.set(Some(first));
    Ok(slot)
}
