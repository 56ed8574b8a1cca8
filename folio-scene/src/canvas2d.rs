//! 2D Canvas rendering for the background scene
//!
//! Projects the 3D scene through the orbiting camera and draws it with the
//! canvas 2D API. Used whenever WebGPU is unavailable.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::scene::Scene;

/// Format normalized RGB plus alpha as a CSS color
pub fn css_rgba(color: [f32; 3], alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        alpha
    )
}

/// 2D Canvas renderer
pub struct Canvas2DRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl Canvas2DRenderer {
    /// Create renderer from canvas element
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {:?}", e))?
            .ok_or("2d context not available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    /// Update canvas backing-store dimensions
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.width = width as f32;
        self.height = height as f32;
    }

    /// Draw one frame of the scene
    pub fn render(&self, scene: &Scene) {
        // Transparent: the page background shows through.
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let view_proj = scene.camera.view_projection_matrix();
        self.render_particles(scene, &view_proj);
        self.render_shapes(scene, &view_proj);
    }

    fn render_particles(&self, scene: &Scene, view_proj: &[f32; 16]) {
        let cloud = &scene.particles;
        self.ctx
            .set_fill_style_str(&css_rgba(cloud.color, cloud.opacity));

        for point in cloud.world_points() {
            let Some((x, y, w)) = scene
                .camera
                .project(view_proj, point, self.width, self.height)
            else {
                continue;
            };

            let size = scene
                .camera
                .world_size_to_pixels(cloud.size, w, self.height)
                .max(1.0) as f64;
            self.ctx
                .fill_rect(x as f64 - size / 2.0, y as f64 - size / 2.0, size, size);
        }
    }

    /// Fill the lit faces farthest first so nearer translucent faces blend
    /// over the ones behind them.
    fn render_shapes(&self, scene: &Scene, view_proj: &[f32; 16]) {
        let camera = &scene.camera;

        for face in scene.visible_faces() {
            let [a, b, c] = face.corners;
            let (Some((x1, y1, _)), Some((x2, y2, _)), Some((x3, y3, _))) = (
                camera.project(view_proj, a, self.width, self.height),
                camera.project(view_proj, b, self.width, self.height),
                camera.project(view_proj, c, self.width, self.height),
            ) else {
                continue;
            };

            self.ctx
                .set_fill_style_str(&css_rgba(face.color, face.opacity));
            self.ctx.begin_path();
            self.ctx.move_to(x1 as f64, y1 as f64);
            self.ctx.line_to(x2 as f64, y2 as f64);
            self.ctx.line_to(x3 as f64, y3 as f64);
            self.ctx.close_path();
            self.ctx.fill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_rgba_formats_channels() {
        assert_eq!(css_rgba([1.0, 0.0, 0.5], 0.6), "rgba(255, 0, 128, 0.6)");
    }

    #[test]
    fn css_rgba_matches_brand_blue() {
        let blue = crate::scene::rgb(crate::scene::PRIMARY);
        assert_eq!(css_rgba(blue, 0.8), "rgba(59, 130, 246, 0.8)");
    }
}
