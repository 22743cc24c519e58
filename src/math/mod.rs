pub mod matrix;
pub mod quaternion;
pub mod scalar;
pub mod vector;

pub use matrix::Matrix4x4;
pub use quaternion::Quaternion;
pub use scalar::DEFAULT_EPSILON;
pub use vector::{
    Vector2, Vector2d, Vector2i, Vector3, Vector3d, Vector3i, Vector4, Vector4d, Vector4i,
};
