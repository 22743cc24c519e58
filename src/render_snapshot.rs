//! Frame output: camera-space geometry handed off for rasterization.

use std::sync::Arc;

use crate::math::vector::{Vector2d, Vector3d};
use crate::scene::mesh::Material;

/// A fully resolved vertex in camera space.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderVertex {
    pub pos_camera_space: Vector3d,
    pub pos_texture_space: Vector2d,
    pub normal: Vector3d,
}

/// One camera-space triangle with its resolved material.
#[derive(Debug, Clone)]
pub struct RenderTriangle3D {
    pub a: RenderVertex,
    pub b: RenderVertex,
    pub c: RenderVertex,
    pub material: Arc<Material>,
}

/// A point light moved into camera space.
#[derive(Debug, Clone)]
pub struct RenderPointLight {
    pub pos_camera_space: Vector3d,
    pub color: [f64; 3],
    pub intensity: f64,
    pub range: f64,
}

/// Everything the downstream rasterizer needs for one frame. Valid for that
/// frame only; triangle order across chunks is unspecified, order within a
/// chunk preserves mesh order.
#[derive(Debug, Default, Clone)]
pub struct FrameSnapshot {
    pub triangles: Vec<RenderTriangle3D>,
    pub lights: Vec<RenderPointLight>,
}
