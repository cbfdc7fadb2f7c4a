//! Per-frame surface update: displacement followed by normal recomputation.

use super::displacement::Displacement;
use super::mesh::PlaneMesh;
use crate::noise::NoiseField;
use crate::params::SurfaceParams;

/// Displaced plane with a dirty flag for GPU re-upload
pub struct SurfaceSystem {
    pub mesh: PlaneMesh,
    displacement: Displacement,
    needs_upload: bool,
}

impl SurfaceSystem {
    /// Create new surface from parameters
    pub fn new(params: &SurfaceParams) -> Self {
        let mesh = PlaneMesh::new(params);
        let displacement = Displacement::new(
            NoiseField::new(params.noise_seed),
            params.layers.clone(),
        );

        tracing::debug!(
            columns = mesh.columns(),
            rows = mesh.rows(),
            vertices = mesh.vertices.len(),
            "plane mesh built"
        );

        Self {
            mesh,
            displacement,
            needs_upload: true,
        }
    }

    /// Displace every vertex for `time_ms`, then recompute normals
    pub fn update(&mut self, time_ms: f64, amplitude: f32) {
        self.displacement
            .apply(&mut self.mesh.vertices, time_ms, amplitude);
        self.mesh.compute_vertex_normals();
        self.needs_upload = true;
    }

    /// Whether the vertex buffer changed since the last [`SurfaceSystem::mark_uploaded`]
    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    pub fn mark_uploaded(&mut self) {
        self.needs_upload = false;
    }
}
