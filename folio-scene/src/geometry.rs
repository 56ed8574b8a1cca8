//! Triangle meshes for the floating background shapes
//!
//! Every shape is a list of triangles over shared vertices. Vertices carry a
//! normal so renderers can shade each face against the scene lights.

use std::f32::consts::TAU;

use crate::camera3d::normalize;

/// The four solid kinds the background cycles through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Torus,
}

impl ShapeKind {
    /// Kinds in spawn order
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Tetrahedron,
        ShapeKind::Octahedron,
        ShapeKind::Icosahedron,
        ShapeKind::Torus,
    ];

    /// Kind for the shape at `index`, cycling through [`ShapeKind::ALL`]
    pub fn cycle(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Build the mesh for this kind at its standard size
    pub fn mesh(self) -> Mesh {
        match self {
            ShapeKind::Tetrahedron => tetrahedron(0.5),
            ShapeKind::Octahedron => octahedron(0.4),
            ShapeKind::Icosahedron => icosahedron(0.6),
            ShapeKind::Torus => torus(0.3, 0.1, 8, 24),
        }
    }
}

/// Vertices, normals and triangle list of a shape in its local frame
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Build a mesh for a polyhedron whose vertices lie on a sphere
    fn polyhedron(unit_vertices: &[[f32; 3]], faces: &[[u32; 3]], radius: f32) -> Self {
        let normals: Vec<[f32; 3]> = unit_vertices.iter().map(|v| normalize(*v)).collect();
        let vertices = normals
            .iter()
            .map(|n| [n[0] * radius, n[1] * radius, n[2] * radius])
            .collect();

        Self {
            vertices,
            normals,
            faces: faces.to_vec(),
        }
    }

    /// Sum of the vertex normals of a face, in the local frame
    pub fn face_normal(&self, face: [u32; 3]) -> [f32; 3] {
        let mut n = [0.0; 3];
        for index in face {
            let v = self.normals[index as usize];
            n[0] += v[0];
            n[1] += v[1];
            n[2] += v[2];
        }
        n
    }
}

/// Tetrahedron with vertices at distance `radius` from the center
pub fn tetrahedron(radius: f32) -> Mesh {
    let vertices = [
        [1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
    ];
    let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    Mesh::polyhedron(&vertices, &faces, radius)
}

/// Octahedron with vertices at distance `radius` from the center
pub fn octahedron(radius: f32) -> Mesh {
    let vertices = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    let faces = [
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ];
    Mesh::polyhedron(&vertices, &faces, radius)
}

/// Icosahedron with vertices at distance `radius` from the center
pub fn icosahedron(radius: f32) -> Mesh {
    // Golden ratio
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let vertices = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ];

    let faces = [
        // 5 faces around point 0
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        // 5 adjacent faces
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        // 5 faces around point 3
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        // 5 adjacent faces
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    Mesh::polyhedron(&vertices, &faces, radius)
}

/// Torus in the x-y plane.
///
/// `radial_segments` rings go around the tube, `tubular_segments` around
/// the main circle; each grid cell is split into two triangles. Segment
/// counts below one are treated as one.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let radial_segments = radial_segments.max(1);
    let tubular_segments = tubular_segments.max(1);

    let mut vertices = Vec::with_capacity((radial_segments * tubular_segments) as usize);
    let mut normals = Vec::with_capacity(vertices.capacity());

    for j in 0..radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;

            vertices.push([
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            ]);
            normals.push([v.cos() * u.cos(), v.cos() * u.sin(), v.sin()]);
        }
    }

    let index = |j: u32, i: u32| (j % radial_segments) * tubular_segments + (i % tubular_segments);
    let mut faces = Vec::with_capacity((2 * radial_segments * tubular_segments) as usize);
    for j in 0..radial_segments {
        for i in 0..tubular_segments {
            let a = index(j, i);
            let b = index(j + 1, i);
            let c = index(j + 1, i + 1);
            let d = index(j, i + 1);
            // A single ring or column wraps onto itself
            for face in [[a, b, d], [b, c, d]] {
                if face[0] != face[1] && face[1] != face[2] && face[0] != face[2] {
                    faces.push(face);
                }
            }
        }
    }

    Mesh {
        vertices,
        normals,
        faces,
    }
}

/// Rotate a vector by Euler angles applied in XYZ order (R = Rx * Ry * Rz)
pub fn rotate_xyz(v: [f32; 3], rotation: [f32; 3]) -> [f32; 3] {
    let (sx, cx) = rotation[0].sin_cos();
    let (sy, cy) = rotation[1].sin_cos();
    let (sz, cz) = rotation[2].sin_cos();

    // Rz
    let x1 = v[0] * cz - v[1] * sz;
    let y1 = v[0] * sz + v[1] * cz;
    let z1 = v[2];

    // Ry
    let x2 = x1 * cy + z1 * sy;
    let y2 = y1;
    let z2 = -x1 * sy + z1 * cy;

    // Rx
    [x2, y2 * cx - z2 * sx, y2 * sx + z2 * cx]
}

/// Rotate then translate a local vertex into world space
pub fn to_world(v: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> [f32; 3] {
    let r = rotate_xyz(v, rotation);
    [r[0] + position[0], r[1] + position[1], r[2] + position[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera3d::dot;
    use std::collections::BTreeMap;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn kinds_cycle_by_index() {
        let kinds: Vec<ShapeKind> = (0..8).map(ShapeKind::cycle).collect();
        assert_eq!(kinds[0], ShapeKind::Tetrahedron);
        assert_eq!(kinds[3], ShapeKind::Torus);
        assert_eq!(kinds[4], ShapeKind::Tetrahedron);
        assert_eq!(kinds[7], ShapeKind::Torus);
    }

    /// Undirected edges with the number of faces using each
    fn edge_use(mesh: &Mesh) -> BTreeMap<(u32, u32), usize> {
        let mut edges = BTreeMap::new();
        for face in &mesh.faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        edges
    }

    #[test]
    fn tetrahedron_counts() {
        let m = tetrahedron(0.5);
        assert_eq!(m.vertices.len(), 4);
        assert_eq!(m.faces.len(), 4);
        assert_eq!(edge_use(&m).len(), 6);
    }

    #[test]
    fn octahedron_counts() {
        let m = octahedron(0.4);
        assert_eq!(m.vertices.len(), 6);
        assert_eq!(m.faces.len(), 8);
        assert_eq!(edge_use(&m).len(), 12);
    }

    #[test]
    fn icosahedron_counts() {
        let m = icosahedron(0.6);
        assert_eq!(m.vertices.len(), 12);
        assert_eq!(m.faces.len(), 20);
        assert_eq!(edge_use(&m).len(), 30);
    }

    #[test]
    fn meshes_are_closed() {
        for kind in ShapeKind::ALL {
            for (edge, uses) in edge_use(&kind.mesh()) {
                assert_eq!(uses, 2, "{kind:?} edge {edge:?}");
            }
        }
    }

    #[test]
    fn polyhedron_face_normals_point_outward() {
        for kind in [
            ShapeKind::Tetrahedron,
            ShapeKind::Octahedron,
            ShapeKind::Icosahedron,
        ] {
            let m = kind.mesh();
            for &face in &m.faces {
                let mut centroid = [0.0; 3];
                for index in face {
                    for (c, v) in centroid.iter_mut().zip(m.vertices[index as usize]) {
                        *c += v / 3.0;
                    }
                }
                assert!(dot(m.face_normal(face), centroid) > 0.0);
            }
        }
    }

    #[test]
    fn polyhedra_vertices_sit_on_radius() {
        for (w, radius) in [
            (tetrahedron(0.5), 0.5),
            (octahedron(0.4), 0.4),
            (icosahedron(0.6), 0.6),
        ] {
            for v in &w.vertices {
                assert!((length(*v) - radius).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn torus_counts_and_bounds() {
        let w = torus(0.3, 0.1, 8, 24);
        assert_eq!(w.vertices.len(), 8 * 24);
        assert_eq!(w.normals.len(), 8 * 24);
        assert_eq!(w.faces.len(), 2 * 8 * 24);

        for v in &w.vertices {
            let ring = (v[0] * v[0] + v[1] * v[1]).sqrt();
            assert!(ring >= 0.2 - 1e-5 && ring <= 0.4 + 1e-5);
            assert!(v[2].abs() <= 0.1 + 1e-5);
        }
    }

    #[test]
    fn torus_with_zero_segments_is_a_point() {
        let m = torus(0.3, 0.1, 0, 0);
        assert_eq!(m.vertices.len(), 1);
        assert!(m.faces.is_empty());

        let ring = torus(0.3, 0.1, 1, 24);
        assert_eq!(ring.vertices.len(), 24);
        assert!(ring.faces.is_empty());
    }

    #[test]
    fn face_indices_are_valid() {
        for kind in ShapeKind::ALL {
            let m = kind.mesh();
            for face in &m.faces {
                for index in face {
                    assert!((*index as usize) < m.vertices.len());
                }
                assert_ne!(face[0], face[1]);
                assert_ne!(face[1], face[2]);
                assert_ne!(face[0], face[2]);
            }
        }
    }

    #[test]
    fn normals_are_unit_length() {
        for kind in ShapeKind::ALL {
            for n in kind.mesh().normals {
                assert!((length(n) - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn rotate_xyz_quarter_turn_about_z() {
        let r = rotate_xyz([1.0, 0.0, 0.0], [0.0, 0.0, std::f32::consts::FRAC_PI_2]);
        assert!(r[0].abs() < 1e-6);
        assert!((r[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = [0.3, -0.7, 0.2];
        let r = rotate_xyz(v, [0.4, 1.3, -2.2]);
        assert!((length(v) - length(r)).abs() < 1e-5);
    }

    #[test]
    fn to_world_translates() {
        let p = to_world([0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [4.0, -5.0, 6.0]);
        assert_eq!(p, [4.0, -5.0, 6.0]);
    }
}
