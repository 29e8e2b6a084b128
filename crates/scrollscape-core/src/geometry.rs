//! Procedural meshes for the section objects.
//!
//! Every generator returns indexed triangles plus a de-duplicated line list so the
//! same mesh can be drawn solid or as a wireframe (WebGPU has no line polygon mode).

use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub edges: Vec<u32>,
}

impl MeshData {
    fn from_triangles(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        let edges = edge_list(&indices);
        Self {
            vertices,
            indices,
            edges,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Unique undirected edges of an indexed triangle list, in first-seen order.
pub fn edge_list(indices: &[u32]) -> Vec<u32> {
    let mut seen = FnvHashSet::default();
    let mut edges = Vec::with_capacity(indices.len() * 2);
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                edges.push(key.0);
                edges.push(key.1);
            }
        }
    }
    edges
}

// ---------------- Torus knot ----------------

fn torus_knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let cu = u.cos();
    let su = u.sin();
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu_over_p.sin() * 0.5,
    )
}

/// (p, q) torus knot swept with a circular tube.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let (pf, qf) = (p.max(1) as f32, q.max(1) as f32);

    let mut vertices = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for j in 0..=tubular {
        let u = j as f32 / tubular as f32 * pf * TAU;
        let p1 = torus_knot_curve(u, pf, qf, radius);
        let p2 = torus_knot_curve(u + 0.01, pf, qf, radius);
        // Frenet-like frame along the curve
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        let n = b.cross(t).normalize_or_zero();
        for i in 0..=radial {
            let v = i as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            vertices.push(MeshVertex::new(pos, (pos - p1).normalize_or_zero()));
        }
    }

    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = (radial + 1) * (j - 1) + (i - 1);
            let b = (radial + 1) * j + (i - 1);
            let c = (radial + 1) * j + i;
            let d = (radial + 1) * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    MeshData::from_triangles(vertices, indices)
}

// ---------------- Polyhedra ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polyhedron {
    Tetrahedron,
    Octahedron,
    Icosahedron,
}

impl Polyhedron {
    pub fn name(self) -> &'static str {
        match self {
            Polyhedron::Tetrahedron => "tetrahedron",
            Polyhedron::Octahedron => "octahedron",
            Polyhedron::Icosahedron => "icosahedron",
        }
    }
}

const TETRA_VERTS: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];
const TETRA_FACES: [u32; 12] = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];

const OCTA_VERTS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTA_FACES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

const ICOSA_FACES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

fn icosa_verts() -> [[f32; 3]; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
}

/// Flat-shaded regular polyhedron with circumradius `radius`.
pub fn polyhedron(kind: Polyhedron, radius: f32) -> MeshData {
    let icosa;
    let (verts, faces): (&[[f32; 3]], &[u32]) = match kind {
        Polyhedron::Tetrahedron => (&TETRA_VERTS, &TETRA_FACES),
        Polyhedron::Octahedron => (&OCTA_VERTS, &OCTA_FACES),
        Polyhedron::Icosahedron => {
            icosa = icosa_verts();
            (&icosa, &ICOSA_FACES)
        }
    };
    let corners: Vec<Vec3> = verts
        .iter()
        .map(|v| Vec3::from(*v).normalize() * radius)
        .collect();

    let mut vertices = Vec::with_capacity(faces.len());
    let mut indices = Vec::with_capacity(faces.len());
    for face in faces.chunks_exact(3) {
        let (a, b, c) = (
            corners[face[0] as usize],
            corners[face[1] as usize],
            corners[face[2] as usize],
        );
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        let centroid = (a + b + c) / 3.0;
        // Convex and centred on the origin: outward normals point away from it
        let (b, c) = if normal.dot(centroid) < 0.0 {
            normal = -normal;
            (c, b)
        } else {
            (b, c)
        };
        let base = vertices.len() as u32;
        vertices.push(MeshVertex::new(a, normal));
        vertices.push(MeshVertex::new(b, normal));
        vertices.push(MeshVertex::new(c, normal));
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    MeshData::from_triangles(vertices, indices)
}

// ---------------- Plane, box, sphere ----------------

/// Subdivided plane in XZ at y = 0, facing +Y.
pub fn plane(width: f32, depth: f32, segments_x: u32, segments_z: u32) -> MeshData {
    let sx = segments_x.max(1);
    let sz = segments_z.max(1);
    let mut vertices = Vec::with_capacity(((sx + 1) * (sz + 1)) as usize);
    for iz in 0..=sz {
        let z = (iz as f32 / sz as f32 - 0.5) * depth;
        for ix in 0..=sx {
            let x = (ix as f32 / sx as f32 - 0.5) * width;
            vertices.push(MeshVertex::new(Vec3::new(x, 0.0, z), Vec3::Y));
        }
    }
    let mut indices = Vec::with_capacity((sx * sz * 6) as usize);
    let row = sx + 1;
    for iz in 0..sz {
        for ix in 0..sx {
            let a = iz * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    MeshData::from_triangles(vertices, indices)
}

/// Axis-aligned box whose base sits on y = 0, so scaling Y grows it upward.
pub fn base_box(width: f32, height: f32, depth: f32) -> MeshData {
    let hx = width * 0.5;
    let hz = depth * 0.5;
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::X,
            [
                Vec3::new(hx, 0.0, hz),
                Vec3::new(hx, 0.0, -hz),
                Vec3::new(hx, height, -hz),
                Vec3::new(hx, height, hz),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-hx, 0.0, -hz),
                Vec3::new(-hx, 0.0, hz),
                Vec3::new(-hx, height, hz),
                Vec3::new(-hx, height, -hz),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-hx, height, hz),
                Vec3::new(hx, height, hz),
                Vec3::new(hx, height, -hz),
                Vec3::new(-hx, height, -hz),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-hx, 0.0, -hz),
                Vec3::new(hx, 0.0, -hz),
                Vec3::new(hx, 0.0, hz),
                Vec3::new(-hx, 0.0, hz),
            ],
        ),
        (
            Vec3::Z,
            [
                Vec3::new(-hx, 0.0, hz),
                Vec3::new(hx, 0.0, hz),
                Vec3::new(hx, height, hz),
                Vec3::new(-hx, height, hz),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(hx, 0.0, -hz),
                Vec3::new(-hx, 0.0, -hz),
                Vec3::new(-hx, height, -hz),
                Vec3::new(hx, height, -hz),
            ],
        ),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, quad) in faces.iter() {
        let base = vertices.len() as u32;
        for corner in quad {
            vertices.push(MeshVertex::new(*corner, *normal));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData::from_triangles(vertices, indices)
}

/// Latitude/longitude sphere centred on the origin.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = v * std::f32::consts::PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * TAU;
            let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            vertices.push(MeshVertex::new(n * radius, n));
        }
    }
    let row = ws + 1;
    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData::from_triangles(vertices, indices)
}

/// Evenly spread points on a sphere (golden-angle spiral).
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let n = count.max(1) as f32;
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f32 + 0.5) / n;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden * i as f32;
            Vec3::new(theta.cos() * r, y, theta.sin() * r) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_list_dedupes_shared_edges() {
        // Two triangles sharing edge (1, 2)
        let edges = edge_list(&[0, 1, 2, 2, 1, 3]);
        assert_eq!(edges.len() / 2, 5);
    }

    #[test]
    fn base_box_sits_on_origin() {
        let mesh = base_box(0.5, 2.0, 0.5);
        let min_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 2.0);
        assert_eq!(mesh.triangle_count(), 12);
    }
}
