//! Background scene state and per-frame update
//!
//! A particle cloud plus a handful of translucent solids that spin, drift,
//! bounce off an invisible box and lean toward the pointer. All randomness
//! comes from a caller-supplied [`rand::Rng`] so scenes can be replayed.

use std::f32::consts::TAU;

use rand::Rng;

use crate::camera3d::{Camera3D, dot, normalize};
use crate::geometry::{Mesh, ShapeKind, rotate_xyz, to_world};

/// Blue used for even shapes, particles and the ambient light
pub const PRIMARY: u32 = 0x3b82f6;

/// Violet used for odd shapes and the directional light
pub const SECONDARY: u32 = 0x8b5cf6;

/// Add `delta` to an angle, keeping the result in `[0, TAU)`
pub fn advance_angle(angle: f32, delta: f32) -> f32 {
    (angle.rem_euclid(TAU) + delta).rem_euclid(TAU)
}

/// Convert a `0xRRGGBB` color into normalized RGB
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// What happens to the accumulated pointer nudge near the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriftPolicy {
    /// Clamp x/y to the boundary plus one frame of overshoot
    #[default]
    Contain,
    /// Let the pointer nudge carry shapes arbitrarily far out
    Unbounded,
}

/// Tuning constants for scene generation and animation
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Number of floating shapes
    pub shape_count: usize,
    /// Number of points in the particle cloud
    pub particle_count: usize,
    /// Half-width of the cube shapes and particles spawn in
    pub spawn_extent: f32,
    /// Shapes reflect once a coordinate magnitude exceeds this
    pub boundary: f32,
    /// Upper bound (exclusive) of per-axis rotation speed, rad/frame
    pub max_rotation_speed: f32,
    /// Lower bound of move speed, units/frame
    pub min_move_speed: f32,
    /// Upper bound (exclusive) of move speed, units/frame
    pub max_move_speed: f32,
    /// Per-frame x/y nudge per unit of normalized pointer offset
    pub pointer_follow: f32,
    /// Particle cloud rotation per frame on x and y
    pub particle_spin: f32,
    pub drift: DriftPolicy,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape_count: 8,
            particle_count: 500,
            spawn_extent: 5.0,
            boundary: 8.0,
            max_rotation_speed: 0.02,
            min_move_speed: 0.001,
            max_move_speed: 0.006,
            pointer_follow: 0.05,
            particle_spin: 0.001,
            drift: DriftPolicy::Contain,
        }
    }
}

impl SceneConfig {
    /// Largest distance a coordinate can travel past the boundary in one frame
    pub fn overshoot(&self) -> f32 {
        self.max_move_speed + self.pointer_follow
    }
}

/// A colored light with an intensity
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Ambient plus one directional light
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: Light,
    pub directional: Light,
    /// Unit vector pointing from the origin toward the directional light
    pub direction: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: Light {
                color: rgb(PRIMARY),
                intensity: 0.3,
            },
            directional: Light {
                color: rgb(SECONDARY),
                intensity: 0.5,
            },
            direction: normalize([5.0, 5.0, 5.0]),
        }
    }
}

impl Lighting {
    /// Lambert shading of `base` for a surface with the given world normal
    pub fn shade(&self, base: [f32; 3], normal: [f32; 3]) -> [f32; 3] {
        let diffuse = dot(normalize(normal), self.direction).max(0.0);
        let mut out = [0.0; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let light = self.ambient.color[i] * self.ambient.intensity
                + self.directional.color[i] * self.directional.intensity * diffuse;
            *channel = (base[i] * light).clamp(0.0, 1.0);
        }
        out
    }
}

/// Normalized pointer position, both axes in [-1, 1] with +y up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Convert client (pixel) coordinates inside a viewport
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        Self {
            x: (client_x / width) * 2.0 - 1.0,
            y: -(client_y / height) * 2.0 + 1.0,
        }
    }
}

/// Per-shape animation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeMotion {
    /// Rotation added each frame, per axis
    pub rotation_speed: [f32; 3],
    /// Distance travelled each frame along `direction`
    pub move_speed: f32,
    /// Unit travel direction
    pub direction: [f32; 3],
}

impl ShapeMotion {
    /// Draw random motion parameters within the configured ranges
    pub fn random<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let rotation_speed = [
            rng.random::<f32>() * config.max_rotation_speed,
            rng.random::<f32>() * config.max_rotation_speed,
            rng.random::<f32>() * config.max_rotation_speed,
        ];
        let move_speed = config.min_move_speed
            + rng.random::<f32>() * (config.max_move_speed - config.min_move_speed);

        let raw = [
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        ];
        let direction = if dot(raw, raw) > f32::EPSILON {
            normalize(raw)
        } else {
            [1.0, 0.0, 0.0]
        };

        Self {
            rotation_speed,
            move_speed,
            direction,
        }
    }
}

/// A camera-facing triangle in world space with its lit color
#[derive(Debug, Clone, Copy)]
pub struct ShadedFace {
    pub corners: [[f32; 3]; 3],
    pub color: [f32; 3],
    pub opacity: f32,
    /// Squared distance from the eye to the centroid
    pub depth: f32,
}

/// A floating translucent solid
#[derive(Debug, Clone)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: [f32; 3],
    pub opacity: f32,
    pub position: [f32; 3],
    /// Euler angles, each kept in `[0, TAU)`
    pub rotation: [f32; 3],
    pub motion: ShapeMotion,
    pub mesh: Mesh,
}

impl Shape {
    /// Create shape number `index` at a random spot inside the spawn cube
    pub fn spawn<R: Rng + ?Sized>(index: usize, config: &SceneConfig, rng: &mut R) -> Self {
        let kind = ShapeKind::cycle(index);
        let color = if index % 2 == 0 {
            rgb(PRIMARY)
        } else {
            rgb(SECONDARY)
        };
        let position = random_point(config.spawn_extent, rng);
        let motion = ShapeMotion::random(config, rng);

        Self {
            kind,
            color,
            opacity: 0.6,
            position,
            rotation: [0.0; 3],
            motion,
            mesh: kind.mesh(),
        }
    }

    /// Advance one frame: spin, drift, reflect off the boundary, follow
    /// the pointer.
    pub fn step(&mut self, config: &SceneConfig, pointer: PointerState) {
        let motion = &mut self.motion;

        for axis in 0..3 {
            self.rotation[axis] = advance_angle(self.rotation[axis], motion.rotation_speed[axis]);
            self.position[axis] += motion.direction[axis] * motion.move_speed;

            // Only flip while still heading outward: one flip per crossing.
            let p = self.position[axis];
            if p.abs() > config.boundary && p.signum() == motion.direction[axis].signum() {
                motion.direction[axis] = -motion.direction[axis];
            }
        }

        self.position[0] += pointer.x * config.pointer_follow;
        self.position[1] += pointer.y * config.pointer_follow;

        if config.drift == DriftPolicy::Contain {
            let limit = config.boundary + config.overshoot();
            self.position[0] = self.position[0].clamp(-limit, limit);
            self.position[1] = self.position[1].clamp(-limit, limit);
        }
    }

    /// Vertices transformed into world space
    pub fn world_vertices(&self) -> Vec<[f32; 3]> {
        self.mesh
            .vertices
            .iter()
            .map(|v| to_world(*v, self.rotation, self.position))
            .collect()
    }

    /// World-space faces that point toward `eye`, each shaded by its normal
    pub fn shaded_faces(&self, lighting: &Lighting, eye: [f32; 3]) -> Vec<ShadedFace> {
        let world = self.world_vertices();

        self.mesh
            .faces
            .iter()
            .filter_map(|&face| {
                let corners = face.map(|i| world[i as usize]);
                let centroid = [0, 1, 2].map(|axis| {
                    (corners[0][axis] + corners[1][axis] + corners[2][axis]) / 3.0
                });
                let to_eye = [
                    eye[0] - centroid[0],
                    eye[1] - centroid[1],
                    eye[2] - centroid[2],
                ];

                let normal = rotate_xyz(self.mesh.face_normal(face), self.rotation);
                if dot(normal, to_eye) <= 0.0 {
                    return None;
                }

                Some(ShadedFace {
                    corners,
                    color: lighting.shade(self.color, normal),
                    opacity: self.opacity,
                    depth: dot(to_eye, to_eye),
                })
            })
            .collect()
    }
}

/// A cloud of points rotated as a whole
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    /// Local positions
    pub points: Vec<[f32; 3]>,
    /// Rotation about x and y, kept in `[0, TAU)`
    pub rotation: [f32; 2],
    /// Point size in world units
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl ParticleCloud {
    /// Scatter `count` points uniformly in the cube [-extent, extent)^3
    pub fn random<R: Rng + ?Sized>(count: usize, extent: f32, rng: &mut R) -> Self {
        Self {
            points: (0..count).map(|_| random_point(extent, rng)).collect(),
            rotation: [0.0, 0.0],
            size: 0.02,
            color: rgb(PRIMARY),
            opacity: 0.8,
        }
    }

    /// Rotate the whole cloud on x and y
    pub fn spin(&mut self, delta: f32) {
        self.rotation[0] = advance_angle(self.rotation[0], delta);
        self.rotation[1] = advance_angle(self.rotation[1], delta);
    }

    /// Points in world space
    pub fn world_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        let rotation = [self.rotation[0], self.rotation[1], 0.0];
        self.points.iter().map(move |p| rotate_xyz(*p, rotation))
    }
}

fn random_point<R: Rng + ?Sized>(extent: f32, rng: &mut R) -> [f32; 3] {
    [
        (rng.random::<f32>() - 0.5) * 2.0 * extent,
        (rng.random::<f32>() - 0.5) * 2.0 * extent,
        (rng.random::<f32>() - 0.5) * 2.0 * extent,
    ]
}

/// Everything the background draws, plus the camera looking at it
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: SceneConfig,
    pub shapes: Vec<Shape>,
    pub particles: ParticleCloud,
    pub camera: Camera3D,
    pub lighting: Lighting,
}

impl Scene {
    /// Build a scene for a viewport with the given aspect ratio
    pub fn generate<R: Rng + ?Sized>(config: SceneConfig, aspect: f32, rng: &mut R) -> Self {
        let particles = ParticleCloud::random(config.particle_count, config.spawn_extent, rng);
        let shapes = (0..config.shape_count)
            .map(|i| Shape::spawn(i, &config, rng))
            .collect();

        Self {
            config,
            shapes,
            particles,
            camera: Camera3D::new(aspect),
            lighting: Lighting::default(),
        }
    }

    /// Advance one frame. `time_ms` is wall-clock time and drives the camera.
    pub fn tick(&mut self, pointer: PointerState, time_ms: f64) {
        self.particles.spin(self.config.particle_spin);

        for shape in &mut self.shapes {
            shape.step(&self.config, pointer);
        }

        self.camera.follow_orbit(time_ms);
    }

    /// Update the camera for a new viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    /// Total number of triangles across all shapes
    pub fn face_count(&self) -> usize {
        self.shapes.iter().map(|s| s.mesh.faces.len()).sum()
    }

    /// Camera-facing faces of every shape, farthest first
    pub fn visible_faces(&self) -> Vec<ShadedFace> {
        let eye = self.camera.position;
        let mut faces: Vec<ShadedFace> = self
            .shapes
            .iter()
            .flat_map(|shape| shape.shaded_faces(&self.lighting, eye))
            .collect();
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        faces
    }
}
