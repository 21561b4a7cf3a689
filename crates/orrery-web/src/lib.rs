//! `#[wasm_bindgen]` exports for the orrery viewer.
//!
//! The runner lives in a `thread_local!`. Call `viewer_init` once before
//! anything else; until then every export is a logged no-op.

pub mod runner;

pub use runner::{ViewerRunner, LIGHTING_FLOATS};

use std::cell::RefCell;

use orrery_engine::{InputEvent, MeshBounds};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<ViewerRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Returns `None` before `viewer_init`.
fn with_runner<R>(f: impl FnOnce(&mut ViewerRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("viewer not initialized; call viewer_init() first");
                None
            }
        }
    })
}

fn to_js(err: orrery_engine::ConfigError) -> JsValue {
    log::error!("{}", err);
    JsValue::from_str(&err.to_string())
}

/// Initialize with a JSON config (empty string for defaults).
#[wasm_bindgen]
pub fn viewer_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = ViewerRunner::from_json(config_json).map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn viewer_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn viewer_load_catalog(json: &str) -> Result<(), JsValue> {
    match with_runner(|r| r.load_catalog(json)) {
        Some(result) => result.map_err(to_js),
        None => Err(JsValue::from_str("viewer not initialized")),
    }
}

#[wasm_bindgen]
pub fn viewer_set_mesh_bounds(
    min_x: f32,
    min_y: f32,
    min_z: f32,
    max_x: f32,
    max_y: f32,
    max_z: f32,
) {
    let bounds = MeshBounds::from_arrays([min_x, min_y, min_z], [max_x, max_y, max_z]);
    with_runner(|r| r.set_mesh_bounds(bounds));
}

// ---- Input ----

#[wasm_bindgen]
pub fn viewer_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn viewer_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn viewer_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn viewer_scroll(dx: f32, dy: f32) {
    with_runner(|r| r.push_input(InputEvent::Scroll { dx, dy }));
}

#[wasm_bindgen]
pub fn viewer_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn viewer_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

#[wasm_bindgen]
pub fn viewer_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sprites_ptr() -> *const f32 {
    with_runner(|r| r.sprites_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_sprite_count() -> u32 {
    with_runner(|r| r.sprite_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_lighting_ptr() -> *const f32 {
    with_runner(|r| r.lighting_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

// ---- Mode and texture accessors ----

#[wasm_bindgen]
pub fn get_render_mode() -> u32 {
    with_runner(|r| r.render_mode()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_focused_body() -> i32 {
    with_runner(|r| r.focused_body()).unwrap_or(-1)
}

#[wasm_bindgen]
pub fn get_texture_count() -> u32 {
    with_runner(|r| r.texture_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_texture_name(slot: u32) -> Option<String> {
    with_runner(|r| r.texture_name(slot)).flatten()
}
