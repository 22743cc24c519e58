//! Camera component.

use crate::math::vector::Vector3d;
use crate::scene::transform::{TransformGraph, TransformId};

#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: TransformId,
    fov: f64,
    nearclip: f64,
    farclip: f64,
}

impl Camera {
    pub fn new(transform: TransformId, fov: f64, nearclip: f64, farclip: f64) -> Self {
        Self {
            transform,
            fov,
            nearclip,
            farclip,
        }
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f64) {
        self.fov = fov;
    }

    pub fn nearclip(&self) -> f64 {
        self.nearclip
    }

    pub fn set_nearclip(&mut self, nearclip: f64) {
        self.nearclip = nearclip;
    }

    pub fn farclip(&self) -> f64 {
        self.farclip
    }

    pub fn sqr_farclip(&self) -> f64 {
        self.farclip * self.farclip
    }

    pub fn set_farclip(&mut self, farclip: f64) {
        self.farclip = farclip;
    }

    /// Translates a world-space point into this camera's space: offset by the
    /// negated camera position, then rotate by the inverse camera rotation.
    pub fn world_space_to_camera_space(
        &self,
        graph: &TransformGraph,
        world_point: Vector3d,
    ) -> Vector3d {
        let offset = world_point + (graph.global_position(self.transform) * -1.0);
        offset * graph.global_rotation(self.transform).inverse().to_rotation_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::quaternion::Quaternion;
    use crate::math::scalar::DEFAULT_EPSILON;

    #[test]
    fn identity_camera_passes_points_through() {
        let mut graph = TransformGraph::new();
        let cam = Camera::new(graph.spawn(None), 90.0, 0.1, 1000.0);
        let p = Vector3d::new(1.0, 2.0, 3.0);
        assert!(cam
            .world_space_to_camera_space(&graph, p)
            .similar(p, DEFAULT_EPSILON));
    }

    #[test]
    fn camera_translation_offsets_points() {
        let mut graph = TransformGraph::new();
        let node = graph.spawn(None);
        graph.set_position(node, Vector3d::new(10.0, 0.0, 0.0));
        let cam = Camera::new(node, 90.0, 0.1, 1000.0);

        let p = cam.world_space_to_camera_space(&graph, Vector3d::new(11.0, 2.0, 3.0));
        assert!(p.similar(Vector3d::new(1.0, 2.0, 3.0), DEFAULT_EPSILON));
    }

    #[test]
    fn camera_rotation_counter_rotates_points() {
        let mut graph = TransformGraph::new();
        let node = graph.spawn(None);
        let rot = Quaternion::from_euler_angles(Vector3d::new(0.0, 90.0, 0.0));
        graph.set_rotation(node, rot.clone());
        let cam = Camera::new(node, 90.0, 0.1, 1000.0);

        let world = rot.rotate_vector(Vector3d::FORWARD);
        let p = cam.world_space_to_camera_space(&graph, world);
        assert!(p.similar(Vector3d::FORWARD, DEFAULT_EPSILON));
    }
}
