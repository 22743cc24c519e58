//! Mesh data and its renderable binding.

use std::collections::HashMap;
use std::sync::Arc;

use crate::math::vector::{Vector2d, Vector3d};
use crate::scene::transform::TransformId;

/// Opaque surface payload. Resolution never inspects it, only routes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: [f64; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Per-corner indices into the three vertex attribute pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshVertexIndices {
    /// Index of the 3D position vertex.
    pub v: usize,
    /// Index of the uv (texture space) vertex.
    pub uv: usize,
    /// Index of the normal.
    pub vn: usize,
}

/// Indexed triangle mesh. Three consecutive entries of `tris` form one face;
/// callers keep `tris.len()` a multiple of 3 and the renderer fails loudly
/// when it is not.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vector3d>,
    pub uv_vertices: Vec<Vector2d>,
    pub normals: Vec<Vector3d>,
    pub tris: Vec<MeshVertexIndices>,
    /// Per-face material overrides, keyed by face index (tri index / 3).
    pub tri_materials: HashMap<usize, Arc<Material>>,
}

/// Binds a mesh and a fallback material to a node of the transform graph.
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
    pub transform: TransformId,
}

impl MeshRenderer {
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>, transform: TransformId) -> Self {
        Self {
            mesh,
            material,
            transform,
        }
    }

    /// The material for a face: the per-face override if one exists, the
    /// renderer's own material otherwise.
    pub fn face_material(&self, face: usize) -> Arc<Material> {
        self.mesh
            .tri_materials
            .get(&face)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::transform::TransformGraph;

    #[test]
    fn face_material_falls_back_to_renderer_default() {
        let mut graph = TransformGraph::new();
        let node = graph.spawn(None);

        let special = Arc::new(Material {
            name: "special".into(),
            color: [1.0, 0.0, 0.0],
        });
        let mut mesh = Mesh::default();
        mesh.tri_materials.insert(1, Arc::clone(&special));

        let fallback = Arc::new(Material::default());
        let mr = MeshRenderer::new(Arc::new(mesh), Arc::clone(&fallback), node);

        assert_eq!(mr.face_material(0).name, "");
        assert_eq!(mr.face_material(1).name, "special");
    }
}
