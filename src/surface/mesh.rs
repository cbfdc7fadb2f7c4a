//! Plane grid mesh with per-vertex normals.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::params::SurfaceParams;

/// Vertex data for the plane mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Regular grid in the local XY plane; z is the displacement axis
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    columns: usize,
    rows: usize,
    /// Scratch accumulator reused by [`PlaneMesh::compute_vertex_normals`]
    normal_accum: Vec<Vec3>,
}

impl PlaneMesh {
    /// Create a flat plane centred at the origin
    ///
    /// Rows run from +Y down to -Y, columns from -X to +X.
    pub fn new(params: &SurfaceParams) -> Self {
        let columns = params.columns();
        let rows = params.rows();
        let half_width = params.width / 2.0;
        let half_height = params.height / 2.0;
        let cell_width = params.width / columns as f32;
        let cell_height = params.height / rows as f32;

        let mut vertices = Vec::with_capacity((columns + 1) * (rows + 1));
        let mut indices = Vec::with_capacity(columns * rows * 6);

        for iy in 0..=rows {
            let y = half_height - iy as f32 * cell_height;
            for ix in 0..=columns {
                let x = ix as f32 * cell_width - half_width;

                vertices.push(Vertex {
                    position: [x, y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [
                        ix as f32 / columns as f32,
                        1.0 - iy as f32 / rows as f32,
                    ],
                });
            }
        }

        // Two counter-clockwise triangles per cell
        for iy in 0..rows {
            for ix in 0..columns {
                let a = (ix + (columns + 1) * iy) as u32;
                let b = (ix + (columns + 1) * (iy + 1)) as u32;
                let c = (ix + 1 + (columns + 1) * (iy + 1)) as u32;
                let d = (ix + 1 + (columns + 1) * iy) as u32;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let vertex_count = vertices.len();

        Self {
            vertices,
            indices,
            columns,
            rows,
            normal_accum: vec![Vec3::ZERO; vertex_count],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Recompute normals by accumulating face normals onto each vertex
    ///
    /// Each triangle contributes its unnormalized normal, so larger faces
    /// weigh more. Vertices whose sum vanishes keep a +Z normal.
    pub fn compute_vertex_normals(&mut self) {
        self.normal_accum.fill(Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

            let a = Vec3::from_array(self.vertices[ia].position);
            let b = Vec3::from_array(self.vertices[ib].position);
            let c = Vec3::from_array(self.vertices[ic].position);

            let face = (c - b).cross(a - b);

            self.normal_accum[ia] += face;
            self.normal_accum[ib] += face;
            self.normal_accum[ic] += face;
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(&self.normal_accum) {
            vertex.normal = sum.try_normalize().unwrap_or(Vec3::Z).to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> SurfaceParams {
        SurfaceParams {
            width: 2.0,
            height: 1.0,
            resolution: 2,
            ..SurfaceParams::default()
        }
    }

    #[test]
    fn test_grid_counts() {
        let mesh = PlaneMesh::new(&SurfaceParams::default());
        assert_eq!(mesh.vertices.len(), 61 * 49);
        assert_eq!(mesh.indices.len(), 60 * 48 * 6);
    }

    #[test]
    fn test_corner_layout() {
        let mesh = PlaneMesh::new(&small_params());
        // First vertex is top-left, last is bottom-right
        assert_eq!(mesh.vertices[0].position, [-1.0, 0.5, 0.0]);
        assert_eq!(mesh.vertices.last().unwrap().position, [1.0, -0.5, 0.0]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(mesh.vertices.last().unwrap().uv, [1.0, 0.0]);
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = PlaneMesh::new(&small_params());
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_flat_plane_normals_face_up() {
        let mut mesh = PlaneMesh::new(&small_params());
        mesh.compute_vertex_normals();
        for vertex in &mesh.vertices {
            let n = Vec3::from_array(vertex.normal);
            assert!((n - Vec3::Z).length() < 1e-6, "normal {:?}", n);
        }
    }

    #[test]
    fn test_tilted_plane_normals() {
        let mut mesh = PlaneMesh::new(&small_params());
        // z = x tilts the surface; normal should be (-1, 0, 1) / sqrt(2)
        for vertex in &mut mesh.vertices {
            vertex.position[2] = vertex.position[0];
        }
        mesh.compute_vertex_normals();

        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        for vertex in &mesh.vertices {
            let n = Vec3::from_array(vertex.normal);
            assert!((n - expected).length() < 1e-5, "normal {:?}", n);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
