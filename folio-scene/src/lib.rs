//! Browser side of folio portfolio pages
//!
//! Two independent pieces run in the page: the animated background scene
//! ([`bootstrap`]) and the content and interaction controller
//! ([`controller`]). Both wire themselves up from [`init`] on the usual page
//! lifecycle events; they can also be started by hand from JS.

use std::cell::{Cell, RefCell};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub mod bootstrap;
pub mod camera3d;
pub mod canvas2d;
pub mod content;
pub mod controller;
pub mod filter;
pub mod geometry;
pub mod loading;
pub mod markup;
pub mod nav;
pub mod reveal;
pub mod scene;
#[cfg(all(feature = "webgpu", target_arch = "wasm32"))]
pub mod webgpu;

pub use bootstrap::SceneHandle;
pub use scene::{Scene, SceneConfig};

thread_local! {
    static CONTROLLER_STARTED: Cell<bool> = const { Cell::new(false) };
    static PAGE_SCENE: RefCell<Option<SceneHandle>> = const { RefCell::new(None) };
}

/// Initialize WASM panic hook and schedule both page components
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(run_controller);
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        run_controller();
    }

    if document.ready_state() == "complete" {
        mount_page_scene();
    } else {
        let on_load = Closure::once_into_js(mount_page_scene);
        let _ = window.add_event_listener_with_callback("load", on_load.unchecked_ref());
    }
}

fn run_controller() {
    if let Err(e) = start_controller() {
        web_sys::console::error_2(&JsValue::from_str("folio controller failed:"), &e);
    }
}

fn mount_page_scene() {
    wasm_bindgen_futures::spawn_local(async {
        let handle = bootstrap::start(bootstrap::MOUNT_ID, SceneConfig::default()).await;
        if let Some(handle) = handle {
            PAGE_SCENE.with(|slot| {
                if let Some(previous) = slot.borrow_mut().replace(handle) {
                    previous.dispose();
                }
            });
        }
    });
}

/// Wire up the page content and interactions. Runs at most once per page.
#[wasm_bindgen]
pub fn start_controller() -> Result<(), JsValue> {
    if CONTROLLER_STARTED.with(|started| started.replace(true)) {
        return Ok(());
    }
    controller::start()
}

/// Mount a background scene under `mount_id` (default `animation-3d`).
///
/// Resolves to a `SceneHandle`, or `null` when the element is missing or no
/// rendering context is available.
#[wasm_bindgen]
pub async fn start_scene(mount_id: Option<String>) -> Result<JsValue, JsValue> {
    let mount_id = mount_id.as_deref().unwrap_or(bootstrap::MOUNT_ID);
    match bootstrap::start(mount_id, SceneConfig::default()).await {
        Some(handle) => Ok(JsValue::from(handle)),
        None => Ok(JsValue::NULL),
    }
}

/// Dispose the scene mounted automatically on page load, if any
#[wasm_bindgen]
pub fn dispose_scene() {
    if let Some(handle) = PAGE_SCENE.with(|slot| slot.borrow_mut().take()) {
        handle.dispose();
    }
}

/// Check if WebGPU is supported in the current browser
#[wasm_bindgen]
pub async fn check_webgpu_support() -> bool {
    has_webgpu()
}

/// Display name for a portfolio category id
#[wasm_bindgen(js_name = category_name)]
pub fn category_label(category: &str) -> String {
    content::category_name(category).to_string()
}

pub(crate) fn has_webgpu() -> bool {
    web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("gpu")).ok())
        .is_some_and(|gpu| !gpu.is_undefined() && !gpu.is_null())
}

/// Random source seeded from the browser's clock and `Math.random`
pub(crate) fn browser_rng() -> SmallRng {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let clock = js_sys::Date::now() as u64;
    SmallRng::seed_from_u64(noise ^ clock.rotate_left(32))
}

pub(crate) fn log_debug(message: &str) {
    web_sys::console::debug_1(&JsValue::from_str(message));
}
