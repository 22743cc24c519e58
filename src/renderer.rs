//! Per-frame resolution of scene components into camera-space geometry.
//!
//! Each frame: registered mesh renderers are validated, their transforms are
//! folded into matrices on the calling thread, and the triangle lists are
//! split into fixed-size chunks that fan out over the worker pool. Every
//! chunk buffers its output locally and appends it to the shared frame
//! buffer under a single mutex, so the lock is taken once per chunk rather
//! than once per triangle.

use std::sync::{Arc, Mutex};

use crate::config::RenderConfig;
use crate::error::ResolveError;
use crate::job_system::worker_pool::WorkerPool;
use crate::math::matrix::Matrix4x4;
use crate::math::vector::Vector3d;
use crate::render_snapshot::{FrameSnapshot, RenderPointLight, RenderTriangle3D, RenderVertex};
use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::mesh::{Mesh, MeshRenderer, MeshVertexIndices};
use crate::scene::transform::TransformGraph;

/// Triangles per worker job.
pub const TRIANGLE_CHUNK_SIZE: usize = 16;

pub struct Renderer {
    worker_pool: WorkerPool,
    mesh_renderers: Vec<MeshRenderer>,
    point_lights: Vec<PointLight>,
    main_camera: Option<Camera>,
    reserve_triangles: usize,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            worker_pool: WorkerPool::new(config.workers),
            mesh_renderers: Vec::new(),
            point_lights: Vec::new(),
            main_camera: None,
            reserve_triangles: config.reserve_triangles,
        }
    }

    /// Drops everything registered for the previous frame. The main camera
    /// persists across frames.
    pub fn begin_frame(&mut self) {
        self.mesh_renderers.clear();
        self.point_lights.clear();
    }

    pub fn set_main_camera(&mut self, camera: Option<&Camera>) {
        self.main_camera = camera.cloned();
    }

    pub fn register_mesh_renderer(&mut self, mr: &MeshRenderer) {
        self.mesh_renderers.push(mr.clone());
    }

    pub fn register_point_light(&mut self, light: &PointLight) {
        self.point_lights.push(light.clone());
    }

    /// Resolves every registered component into a camera-space snapshot.
    ///
    /// The graph is only read on the calling thread; worker jobs receive
    /// precomputed matrices. Blocks until the full batch has completed.
    pub fn resolve(&mut self, graph: &TransformGraph) -> Result<FrameSnapshot, ResolveError> {
        let camera = self.main_camera.as_ref().ok_or(ResolveError::NoCamera)?;

        for mr in &self.mesh_renderers {
            if mr.mesh.tris.len() % 3 != 0 {
                return Err(ResolveError::MalformedMesh {
                    len: mr.mesh.tris.len(),
                });
            }
        }

        let inverse_camera_position = graph.global_position(camera.transform) * -1.0;
        let inverse_camera_rotation = graph
            .global_rotation(camera.transform)
            .inverse()
            .to_rotation_matrix();

        let out = Arc::new(Mutex::new(Vec::with_capacity(self.reserve_triangles)));
        let mut chunk_count = 0usize;

        for mr in &self.mesh_renderers {
            let object_matrix = graph.global_transformation_matrix(mr.transform);
            let normal_matrix =
                object_matrix.drop_translation_components() * inverse_camera_rotation;

            let index_count = mr.mesh.tris.len();
            let mut chunk_start = 0;
            while chunk_start < index_count {
                let chunk_end = (chunk_start + 3 * TRIANGLE_CHUNK_SIZE).min(index_count);
                let mesh = Arc::clone(&mr.mesh);
                let fallback = Arc::clone(&mr.material);
                let out = Arc::clone(&out);

                self.worker_pool.queue(Box::new(move || {
                    let mut local = Vec::with_capacity((chunk_end - chunk_start) / 3);
                    let mut i = chunk_start;
                    while i < chunk_end {
                        let material = mesh
                            .tri_materials
                            .get(&(i / 3))
                            .cloned()
                            .unwrap_or_else(|| Arc::clone(&fallback));
                        local.push(RenderTriangle3D {
                            a: resolve_vertex(
                                &mesh,
                                mesh.tris[i],
                                &object_matrix,
                                &normal_matrix,
                                inverse_camera_position,
                                &inverse_camera_rotation,
                            ),
                            b: resolve_vertex(
                                &mesh,
                                mesh.tris[i + 1],
                                &object_matrix,
                                &normal_matrix,
                                inverse_camera_position,
                                &inverse_camera_rotation,
                            ),
                            c: resolve_vertex(
                                &mesh,
                                mesh.tris[i + 2],
                                &object_matrix,
                                &normal_matrix,
                                inverse_camera_position,
                                &inverse_camera_rotation,
                            ),
                            material,
                        });
                        i += 3;
                    }
                    out.lock().unwrap().append(&mut local);
                }));

                chunk_count += 1;
                chunk_start = chunk_end;
            }
        }

        self.worker_pool.execute();

        // lights are few; resolve them inline
        let lights = self
            .point_lights
            .iter()
            .map(|light| RenderPointLight {
                pos_camera_space: (graph.global_position(light.transform)
                    + inverse_camera_position)
                    * inverse_camera_rotation,
                color: light.color,
                intensity: light.intensity,
                range: light.range,
            })
            .collect();

        let triangles = std::mem::take(&mut *out.lock().unwrap());

        log::debug!(
            "resolved {} renderers into {} triangles across {} chunks, {} lights",
            self.mesh_renderers.len(),
            triangles.len(),
            chunk_count,
            self.point_lights.len()
        );

        Ok(FrameSnapshot { triangles, lights })
    }
}

fn resolve_vertex(
    mesh: &Mesh,
    idx: MeshVertexIndices,
    object_matrix: &Matrix4x4,
    normal_matrix: &Matrix4x4,
    inverse_camera_position: Vector3d,
    inverse_camera_rotation: &Matrix4x4,
) -> RenderVertex {
    let mut pos = mesh.vertices[idx.v];
    pos *= *object_matrix;
    pos += inverse_camera_position;
    pos *= *inverse_camera_rotation;

    let mut normal = mesh.normals[idx.vn];
    normal *= *normal_matrix;
    normal.normalize_self();

    RenderVertex {
        pos_camera_space: pos,
        pos_texture_space: mesh.uv_vertices[idx.uv],
        normal,
    }
}
