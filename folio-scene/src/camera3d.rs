//! 3D perspective camera for the background scene
//!
//! The camera drifts on a horizontal circle around the origin, driven by
//! wall-clock time, and always looks at the origin.

/// Default vertical field of view (75 degrees)
pub const DEFAULT_FOV: f32 = 75.0 * std::f32::consts::PI / 180.0;

/// Radius of the circular camera path in the x-z plane
pub const ORBIT_RADIUS: f32 = 5.0;

/// Angular rate of the camera path in radians per millisecond
pub const ORBIT_RATE: f64 = 0.0005;

/// 3D Camera orbiting the scene origin
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Camera position in world space
    pub position: [f32; 3],
    /// Target point the camera looks at
    pub target: [f32; 3],
    /// Up vector (usually Y-up)
    pub up: [f32; 3],

    /// Field of view in radians
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,

    /// Radius of the orbit path
    pub orbit_radius: f32,
    /// Angular rate of the orbit path (rad/ms)
    pub orbit_rate: f64,
}

impl Camera3D {
    /// Create a new camera sitting on the +z axis, five units out
    pub fn new(aspect: f32) -> Self {
        Self {
            position: [0.0, 0.0, ORBIT_RADIUS],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: DEFAULT_FOV,
            aspect,
            near: 0.1,
            far: 1000.0,
            orbit_radius: ORBIT_RADIUS,
            orbit_rate: ORBIT_RATE,
        }
    }

    /// Update aspect ratio on resize
    pub fn resize(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Place the camera on its circular path for the given wall-clock time
    /// (milliseconds) and aim it at the origin.
    pub fn follow_orbit(&mut self, time_ms: f64) {
        // Reduce in f64 first; epoch milliseconds overflow f32 precision.
        let angle = ((time_ms * self.orbit_rate) % std::f64::consts::TAU) as f32;

        self.position = [
            angle.sin() * self.orbit_radius,
            0.0,
            angle.cos() * self.orbit_radius,
        ];
        self.target = [0.0, 0.0, 0.0];
    }

    /// Get view matrix (4x4 column-major)
    pub fn view_matrix(&self) -> [f32; 16] {
        look_at(self.position, self.target, self.up)
    }

    /// Get projection matrix (4x4 column-major)
    pub fn projection_matrix(&self) -> [f32; 16] {
        perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> [f32; 16] {
        mat4_multiply(self.projection_matrix(), self.view_matrix())
    }

    /// Project a world-space point onto a canvas of the given size.
    ///
    /// Returns canvas `(x, y)` plus the clip-space `w` (view depth), or
    /// `None` when the point is behind the near plane.
    pub fn project(
        &self,
        view_proj: &[f32; 16],
        point: [f32; 3],
        width: f32,
        height: f32,
    ) -> Option<(f32, f32, f32)> {
        let [x, y, _, w] = transform_point(view_proj, point);
        if w <= self.near {
            return None;
        }

        let ndc_x = x / w;
        let ndc_y = y / w;
        let canvas_x = (ndc_x + 1.0) * 0.5 * width;
        let canvas_y = (1.0 - ndc_y) * 0.5 * height;
        Some((canvas_x, canvas_y, w))
    }

    /// Size in pixels of a world-space length seen at view depth `w`
    pub fn world_size_to_pixels(&self, size: f32, w: f32, height: f32) -> f32 {
        let focal = 1.0 / (self.fov / 2.0).tan();
        size * focal / w * height / 2.0
    }
}

// Math helper functions

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

/// Create a look-at view matrix (column-major)
fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> [f32; 16] {
    let f = normalize(sub(target, eye));
    let s = normalize(cross(f, up));
    let u = cross(s, f);

    [
        s[0],
        u[0],
        -f[0],
        0.0,
        s[1],
        u[1],
        -f[1],
        0.0,
        s[2],
        u[2],
        -f[2],
        0.0,
        -dot(s, eye),
        -dot(u, eye),
        dot(f, eye),
        1.0,
    ]
}

/// Create a perspective projection matrix (column-major)
fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> [f32; 16] {
    let f = 1.0 / (fov / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        f / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        f,
        0.0,
        0.0,
        0.0,
        0.0,
        (far + near) * nf,
        -1.0,
        0.0,
        0.0,
        2.0 * far * near * nf,
        0.0,
    ]
}

/// Multiply two 4x4 matrices (column-major)
fn mat4_multiply(a: [f32; 16], b: [f32; 16]) -> [f32; 16] {
    let mut result = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            result[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
        }
    }
    result
}

/// Transform a point (w = 1) by a column-major 4x4 matrix
fn transform_point(m: &[f32; 16], p: [f32; 3]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[row] * p[0] + m[4 + row] * p[1] + m[8 + row] * p[2] + m[12 + row];
    }
    out
}
