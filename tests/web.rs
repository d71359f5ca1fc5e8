//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use rust_canvas_effects_backend as fx;

// Every mount is a guard-and-no-op when its elements are missing, so on the
// bare test document they should all succeed and attach nothing.
#[wasm_bindgen_test]
fn mounts_are_noops_without_their_elements() {
    fx::initialize();
    assert!(fx::mount_typewriter().is_ok());
    assert!(fx::mount_scroll_effects().is_ok());
    assert!(fx::mount_slider().is_ok());
    assert!(fx::mount_confetti().is_ok());
    assert!(fx::mount_pointer_effects().is_ok());
    // No particle canvas on the page means no scene either
    assert!(fx::mount_particles(None).unwrap().is_none());
}

// Cancelling a loop must free its frame closure; the closure keeps an Rc to
// its own slot, so without an explicit break the captures would live forever
// and every start/stop cycle would leak one closure.
#[wasm_bindgen_test]
fn cancelling_a_frame_loop_releases_its_closure() {
    use std::cell::Cell;
    use std::rc::Rc;

    let marker = Rc::new(Cell::new(0u32));
    let captured = marker.clone();
    let frame_loop = fx::raf::FrameLoop::start(move || {
        captured.set(captured.get() + 1);
        true
    })
    .unwrap();
    assert_eq!(Rc::strong_count(&marker), 2);

    drop(frame_loop);
    // The closure (and everything it captured) is gone as soon as the
    // handle is, not at some later frame
    assert_eq!(Rc::strong_count(&marker), 1);
}

#[wasm_bindgen_test]
fn repeated_start_stop_cycles_are_leak_free() {
    use std::cell::Cell;
    use std::rc::Rc;

    let marker = Rc::new(Cell::new(0u32));
    for _ in 0..50 {
        let captured = marker.clone();
        let frame_loop = fx::raf::FrameLoop::start(move || {
            captured.set(captured.get() + 1);
            true
        })
        .unwrap();
        frame_loop.cancel();
    }
    assert_eq!(Rc::strong_count(&marker), 1);
}

// The confetti guard must only stay armed while a burst is actually running:
// a setup failure has to disarm it again or the effect would be dead for the
// rest of the page.
#[wasm_bindgen_test]
fn confetti_guard_tracks_launch_outcome() {
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    // Claiming a non-2d context first locks the canvas, making the later
    // 2d request fail where the browser supports that context kind
    let _ = canvas.get_context("webgl");

    let running = Rc::new(Cell::new(false));
    match fx::confetti::launch(&canvas, &running) {
        // Setup failed: the guard must be disarmed so a retry is possible
        Err(_) => assert!(!running.get()),
        // Setup succeeded (no webgl in this browser): a burst is in flight
        Ok(()) => assert!(running.get()),
    }
}

#[wasm_bindgen_test]
fn running_confetti_burst_swallows_further_triggers() {
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();

    let running = Rc::new(Cell::new(false));
    fx::confetti::launch(&canvas, &running).unwrap();
    assert!(running.get());
    // Second trigger while running is a quiet no-op
    fx::confetti::launch(&canvas, &running).unwrap();
    assert!(running.get());
}

#[wasm_bindgen_test]
fn particle_scene_runs_against_a_real_canvas() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id("particles-canvas");
    document.body().unwrap().append_child(&canvas).unwrap();

    let mut scene = fx::ParticleScene::with_seed("particles-canvas", 7).unwrap();
    scene.start().unwrap();
    assert!(scene.is_running());
    scene.stop();
    assert!(!scene.is_running());

    document.body().unwrap().remove_child(&canvas).unwrap();
}
