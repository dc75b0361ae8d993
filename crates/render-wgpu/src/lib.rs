//! wgpu render backend for the homestead scene.
//!
//! Turns flattened assets into GPU resources, keeps them in a
//! [`ResourceManager`], and draws a [`homestead_scene::SceneLayout`] each
//! frame through [`Frame`] and [`FrameRenderer`].
//!
//! # Invariants
//! - The renderer never mutates scene layout; it only reads placements.
//! - Every draw of a frame is encoded into one render pass with depth.
//! - Skyboxes and particles blend without writing depth.

mod context;
mod error;
mod frame;
mod geometry;
mod mesh_renderer;
mod model;
mod renderers;
mod resources;
mod shader;
mod shaders;
mod texture;
mod uniforms;

pub use context::{BindLayouts, GpuContext};
pub use error::RenderError;
pub use frame::{DrawItem, Frame, FrameRenderer, Geometry};
pub use geometry::{cube_mesh, land_mesh};
pub use mesh_renderer::{GpuMesh, MeshRenderer};
pub use model::Model;
pub use renderers::{
    LAND_TILING, LandRenderer, ParticleRenderer, RendererKind, RendererSlot, SkyboxRenderer,
};
pub use resources::{ResourceCounts, ResourceManager};
pub use shader::{Shader, ShaderId, ShaderKind};
pub use texture::{DEPTH_FORMAT, GpuTexture, TextureKind};
pub use uniforms::{GlobalUniforms, MaterialUniforms, ObjectUniforms};

pub fn crate_info() -> &'static str {
    "homestead-render-wgpu v0.1.0"
}
