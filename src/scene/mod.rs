pub mod camera;
pub mod light;
pub mod mesh;
pub mod transform;

pub use camera::Camera;
pub use light::PointLight;
pub use mesh::{Material, Mesh, MeshRenderer, MeshVertexIndices};
pub use transform::{TransformGraph, TransformId};
