//! Mounting, driving and tearing down the background scene
//!
//! [`start`] builds the scene, a renderer and a canvas inside the mount
//! element, then runs a self-rescheduling `requestAnimationFrame` loop.
//! Every browser resource it registers is owned by the returned
//! [`SceneHandle`] so [`SceneHandle::dispose`] can undo all of it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use crate::canvas2d::Canvas2DRenderer;
#[cfg(all(feature = "webgpu", target_arch = "wasm32"))]
use crate::webgpu::WebGpuRenderer;
use crate::scene::{PointerState, Scene, SceneConfig};

/// Default id of the element the canvas is appended to
pub const MOUNT_ID: &str = "animation-3d";

/// Canvas backing-store size for a CSS viewport and device pixel ratio
pub fn backing_size(css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
    let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    (
        (css_width * ratio).round().max(1.0) as u32,
        (css_height * ratio).round().max(1.0) as u32,
    )
}

/// Whichever renderer could be created on this browser
pub enum SceneRenderer {
    Canvas2d(Canvas2DRenderer),
    #[cfg(all(feature = "webgpu", target_arch = "wasm32"))]
    WebGpu(WebGpuRenderer),
}

impl SceneRenderer {
    /// Prefer WebGPU when compiled in and available, else Canvas 2D
    async fn create(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<Self, String> {
        #[cfg(all(feature = "webgpu", target_arch = "wasm32"))]
        {
            if crate::has_webgpu() {
                match WebGpuRenderer::new(canvas.clone(), scene).await {
                    Ok(renderer) => return Ok(SceneRenderer::WebGpu(renderer)),
                    Err(e) => {
                        crate::log_debug(&format!("WebGPU unavailable, using canvas 2d: {e}"))
                    }
                }
            }
        }
        let _ = scene;
        Canvas2DRenderer::new(canvas.clone()).map(SceneRenderer::Canvas2d)
    }

    fn resize(&mut self, width: u32, height: u32) {
        match self {
            SceneRenderer::Canvas2d(r) => r.resize(width, height),
            #[cfg(all(feature = "webgpu", target_arch = "wasm32"))]
            SceneRenderer::WebGpu(r) => r.resize(width, height),
        }
    }

    fn render(&mut self, scene: &Scene) {
        match self {
            SceneRenderer::Canvas2d(r) => r.render(scene),
            #[cfg(all(feature = "webgpu", target_arch = "wasm32"))]
            SceneRenderer::WebGpu(r) => r.render(scene),
        }
    }
}

/// Shared state behind a [`SceneHandle`]. Listener closures hold a `Weak`
/// to it so the handle alone keeps it alive.
struct SceneRuntime {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    scene: RefCell<Scene>,
    renderer: RefCell<SceneRenderer>,
    pointer: Cell<PointerState>,
    frame_id: Cell<Option<i32>>,
    running: Cell<bool>,
    on_pointer: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>,
    on_resize: RefCell<Option<Closure<dyn FnMut()>>>,
    on_frame: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl SceneRuntime {
    fn viewport(&self) -> (f64, f64) {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (width, height)
    }

    fn resize(&self) {
        let (width, height) = self.viewport();
        let (pixel_width, pixel_height) =
            backing_size(width, height, self.window.device_pixel_ratio());

        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));

        self.scene
            .borrow_mut()
            .resize(width as f32, height as f32);
        self.renderer
            .borrow_mut()
            .resize(pixel_width, pixel_height);
    }

    fn track_pointer(&self, event: &MouseEvent) {
        let (width, height) = self.viewport();
        self.pointer.set(PointerState::from_client(
            event.client_x() as f32,
            event.client_y() as f32,
            width as f32,
            height as f32,
        ));
    }

    fn schedule_frame(&self) {
        if !self.running.get() {
            return;
        }
        if let Some(callback) = self.on_frame.borrow().as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok();
            self.frame_id.set(id);
        }
    }

    fn frame(&self) {
        self.frame_id.set(None);
        if !self.running.get() {
            return;
        }
        self.schedule_frame();

        let mut scene = self.scene.borrow_mut();
        scene.tick(self.pointer.get(), js_sys::Date::now());
        self.renderer.borrow_mut().render(&scene);
    }

    fn install_listeners(self: &Rc<Self>) -> Result<(), JsValue> {
        let weak: Weak<Self> = Rc::downgrade(self);
        let on_pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(runtime) = weak.upgrade() {
                runtime.track_pointer(&event);
            }
        });
        self.document
            .add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())?;
        *self.on_pointer.borrow_mut() = Some(on_pointer);

        let weak = Rc::downgrade(self);
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.resize();
            }
        });
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        *self.on_resize.borrow_mut() = Some(on_resize);

        let weak = Rc::downgrade(self);
        *self.on_frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.frame();
            }
        }));

        Ok(())
    }

    fn dispose(&self) {
        if !self.running.replace(false) {
            return;
        }

        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(callback) = self.on_pointer.borrow_mut().take() {
            let _ = self.document.remove_event_listener_with_callback(
                "mousemove",
                callback.as_ref().unchecked_ref(),
            );
        }
        if let Some(callback) = self.on_resize.borrow_mut().take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
        }
        self.on_frame.borrow_mut().take();
        self.canvas.remove();
    }
}

impl Drop for SceneRuntime {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A running background scene
#[wasm_bindgen]
pub struct SceneHandle {
    inner: Rc<SceneRuntime>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Stop the animation, unregister listeners and remove the canvas.
    /// Calling it again does nothing.
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    /// Whether the frame loop is still running
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.running.get()
    }
}

/// Mount the background scene under the element with id `mount_id`.
///
/// Returns `None`, leaving the page untouched, when the mount element is
/// missing or no renderer can be created.
pub async fn start(mount_id: &str, config: SceneConfig) -> Option<SceneHandle> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let Some(mount) = document.get_element_by_id(mount_id) else {
        crate::log_debug(&format!("#{mount_id} not found; background animation disabled"));
        return None;
    };

    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;

    let width = window.inner_width().ok()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height().ok()?.as_f64().unwrap_or(0.0);
    let (pixel_width, pixel_height) = backing_size(width, height, window.device_pixel_ratio());
    canvas.set_width(pixel_width);
    canvas.set_height(pixel_height);

    let aspect = if height > 0.0 {
        (width / height) as f32
    } else {
        1.0
    };
    let mut rng = crate::browser_rng();
    let scene = Scene::generate(config, aspect, &mut rng);

    let renderer = match SceneRenderer::create(&canvas, &scene).await {
        Ok(renderer) => renderer,
        Err(e) => {
            crate::log_debug(&format!("No rendering context; background animation disabled: {e}"));
            return None;
        }
    };

    mount.append_child(&canvas).ok()?;

    let runtime = Rc::new(SceneRuntime {
        window,
        document,
        canvas,
        scene: RefCell::new(scene),
        renderer: RefCell::new(renderer),
        pointer: Cell::new(PointerState::default()),
        frame_id: Cell::new(None),
        running: Cell::new(true),
        on_pointer: RefCell::new(None),
        on_resize: RefCell::new(None),
        on_frame: RefCell::new(None),
    });

    if let Err(e) = runtime.install_listeners() {
        crate::log_debug(&format!("Failed to attach scene listeners: {e:?}"));
        runtime.dispose();
        return None;
    }
    runtime.resize();
    runtime.schedule_frame();

    Some(SceneHandle { inner: runtime })
}
