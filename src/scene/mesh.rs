//! Octahedron mesh with animated noise distortion.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use noise::{NoiseFn, OpenSimplex};

use crate::params::MaterialConfig;

/// Vertex data for the hero mesh (position + face normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Corners of the unit octahedron
const CORNERS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

/// Faces as corner indices, counter-clockwise seen from outside
const FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

/// Flat-shaded octahedron whose surface wobbles with 3D noise
///
/// Vertices are not shared between faces, so every face keeps its own
/// normal. Corners shared by several faces sit at the same rest position and
/// therefore receive the same displacement, which keeps the surface closed.
pub struct DistortedOctahedron {
    pub vertices: Vec<Vertex>,
    rest_positions: Vec<Vec3>,
    noise: OpenSimplex,
}

impl DistortedOctahedron {
    /// Build an octahedron of the given circumradius and subdivision level
    pub fn new(radius: f32, detail: u32) -> Self {
        let rest_positions = subdivide(radius, detail);
        let vertices = rest_positions
            .iter()
            .map(|p| Vertex {
                position: p.to_array(),
                normal: [0.0; 3],
            })
            .collect();

        let mut mesh = Self {
            vertices,
            rest_positions,
            noise: OpenSimplex::new(0),
        };
        mesh.recompute_normals();
        mesh
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Displace every vertex for the given elapsed time
    ///
    /// `p' = p * (noise(p / 2 + t / 10) * distort² + radius)`, with
    /// `t = elapsed * speed`.
    pub fn update(&mut self, elapsed_s: f32, material: &MaterialConfig) {
        let time = elapsed_s * material.speed;
        let drift = time / 50.0 * 5.0;
        let strength = material.distort * material.distort;

        for (vertex, rest) in self.vertices.iter_mut().zip(&self.rest_positions) {
            let sample = *rest / 2.0 + Vec3::splat(drift);
            let n = self
                .noise
                .get([sample.x as f64, sample.y as f64, sample.z as f64]) as f32;
            let displaced = *rest * (n * strength + material.radius);
            vertex.position = displaced.to_array();
        }

        self.recompute_normals();
    }

    fn recompute_normals(&mut self) {
        for tri in self.vertices.chunks_mut(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
            for vertex in tri {
                vertex.normal = normal;
            }
        }
    }
}

/// Split each face into (detail + 1)² triangles and push the new points out
/// onto the sphere of the given radius
fn subdivide(radius: f32, detail: u32) -> Vec<Vec3> {
    let cols = detail as usize + 1;
    let mut positions = Vec::with_capacity(FACES.len() * cols * cols * 3);

    for face in FACES {
        let [a, b, c] = face.map(|i| Vec3::from_array(CORNERS[i]));

        // grid[i][j]: row i runs from the a-c edge to the b-c edge
        let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    if rows == 0 {
                        aj
                    } else {
                        aj.lerp(bj, j as f32 / rows as f32)
                    }
                })
                .collect();
            grid.push(row);
        }

        for i in 0..cols {
            for j in 0..2 * (cols - i) - 1 {
                let k = j / 2;
                if j % 2 == 0 {
                    positions.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
                } else {
                    positions.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
                }
            }
        }
    }

    positions
        .into_iter()
        .map(|p| p.normalize() * radius)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm_material() -> MaterialConfig {
        MaterialConfig {
            distort: 0.0,
            ..MaterialConfig::default()
        }
    }

    #[test]
    fn test_plain_octahedron_vertex_count() {
        let mesh = DistortedOctahedron::new(1.5, 0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_subdivided_triangle_count() {
        let mesh = DistortedOctahedron::new(1.5, 1);
        assert_eq!(mesh.triangle_count(), 8 * 4);
        let mesh = DistortedOctahedron::new(1.5, 2);
        assert_eq!(mesh.triangle_count(), 8 * 9);
    }

    #[test]
    fn test_rest_vertices_on_sphere() {
        let mesh = DistortedOctahedron::new(1.5, 2);
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normals_point_outward() {
        let mut mesh = DistortedOctahedron::new(1.5, 1);
        mesh.update(3.7, &MaterialConfig::default());

        for tri in mesh.vertices.chunks(3) {
            let centroid = tri
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .sum::<Vec3>()
                / 3.0;
            let normal = Vec3::from_array(tri[0].normal);
            assert!(normal.dot(centroid) > 0.0);
            assert!((normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_no_distortion_keeps_radius() {
        let mut mesh = DistortedOctahedron::new(1.5, 0);
        mesh.update(10.0, &calm_material());
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_distortion_keeps_surface_closed() {
        let mut mesh = DistortedOctahedron::new(1.5, 0);
        mesh.update(5.25, &MaterialConfig::default());

        // Every rest corner must map to exactly one displaced position
        for (i, a) in mesh.rest_positions.iter().enumerate() {
            for (j, b) in mesh.rest_positions.iter().enumerate() {
                if a.distance(*b) < 1e-6 {
                    assert_eq!(mesh.vertices[i].position, mesh.vertices[j].position);
                }
            }
        }
    }

    #[test]
    fn test_distortion_is_bounded() {
        let material = MaterialConfig::default();
        let mut mesh = DistortedOctahedron::new(1.5, 0);
        let max_scale = material.radius + material.distort * material.distort;

        for step in 0..50 {
            mesh.update(step as f32 * 0.3, &material);
            for v in &mesh.vertices {
                let r = Vec3::from_array(v.position).length();
                assert!(r <= 1.5 * max_scale + 1e-4);
                assert!(r >= 1.5 * (material.radius - material.distort * material.distort) - 1e-4);
            }
        }
    }
}
