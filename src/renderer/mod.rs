//! wgpu rendering module
//!
//! Meshes are plain triangle lists with separate position and color
//! buffers; every draw carries its own transform matrix.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCall, MeshId, PackedMeshes, Scene};
pub use shapes::Mesh;
