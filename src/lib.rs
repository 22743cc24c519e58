//! Geometry core of a software 3D renderer: a deliberately small math
//! kernel, an arena-backed transform graph, and a parallel resolver that
//! turns scene components into camera-space triangles each frame.

pub mod config;
pub mod error;
pub mod job_system;
pub mod math;
pub mod render_snapshot;
pub mod renderer;
pub mod scene;

pub use config::RenderConfig;
pub use error::{MathError, ResolveError};
pub use math::{Matrix4x4, Quaternion, Vector2d, Vector3d, Vector4d, DEFAULT_EPSILON};
pub use render_snapshot::{FrameSnapshot, RenderPointLight, RenderTriangle3D, RenderVertex};
pub use renderer::{Renderer, TRIANGLE_CHUNK_SIZE};
pub use scene::{
    Camera, Material, Mesh, MeshRenderer, MeshVertexIndices, PointLight, TransformGraph,
    TransformId,
};
