// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use portfolio_particles::{initialize, ParticleCanvas};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn context_2d() -> CanvasRenderingContext2d {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(240);
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<CanvasRenderingContext2d>()
        .unwrap()
}

#[wasm_bindgen_test]
fn ticks_on_a_real_canvas() {
    let ctx = context_2d();
    let mut particles = ParticleCanvas::new(320, 240);
    particles.on_pointer_move(160.0, 120.0);
    for _ in 0..10 {
        particles.tick(&ctx).unwrap();
    }
    assert_eq!(particles.particle_count(), 80);
}

#[wasm_bindgen_test]
fn resize_reseeds_inside_new_bounds() {
    let mut particles = ParticleCanvas::new(320, 240);
    particles.on_resize(100, 50);
    assert_eq!(particles.particle_count(), 80);
    assert!(particles
        .field()
        .particles()
        .iter()
        .all(|p| p.pos[0] <= 100.0 && p.pos[1] <= 50.0));
}

#[wasm_bindgen_test]
fn initialize_twice_keeps_console_logger() {
    initialize();
    initialize();
    log::info!("still logging after a second initialize");
}
