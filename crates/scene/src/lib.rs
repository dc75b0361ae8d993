//! Renderer-agnostic scene state.
//!
//! Holds everything the frame loop mutates between draws: the walking
//! camera, the sun light and its day cycle, particle simulations, and the
//! fixed draw list of the homestead.
//!
//! # Invariants
//! - Nothing here touches the GPU; the wgpu backend reads this state.
//! - The draw list is rebuilt each frame; skyboxes follow the opaque draws
//!   and particles come last.

mod camera;
pub mod layout;
mod light;
pub mod particles;
mod renderer;

pub use camera::Camera;
pub use layout::{DrawCommand, DrawTarget, FARMHOUSE_POSITION, SceneLayout};
pub use light::DirectionalLight;
pub use particles::{Particle, ParticleInstance, ParticleSystem};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "homestead-scene v0.1.0"
}
