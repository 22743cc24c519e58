//! Point light component.

use crate::scene::transform::TransformId;

#[derive(Debug, Clone)]
pub struct PointLight {
    pub transform: TransformId,
    pub color: [f64; 3],
    pub intensity: f64,
    pub range: f64,
}

impl PointLight {
    pub fn new(transform: TransformId, color: [f64; 3], intensity: f64, range: f64) -> Self {
        Self {
            transform,
            color,
            intensity,
            range,
        }
    }
}
