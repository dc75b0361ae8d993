//! Asset pipeline: importing, flattening, and naming the scene's resources.
//!
//! Models come in through the glTF importer and are flattened once at load
//! time into [`ModelData`]: a flat list of world-space meshes with their
//! texture bindings. The renderer only ever sees the flattened form.
//!
//! # Layout
//! - [`model`]: scene trees and flattening.
//! - [`import_model`]: glTF files to [`ModelData`].
//! - [`ImageData`] / [`CubeFaces`]: decoded textures.
//! - [`ParticleConfig`]: JSON emitter settings.
//! - [`Registry`]: name-keyed resource storage.
//! - [`SceneManifest`]: the fixed asset paths of the scene.

mod error;
mod gltf_import;
mod manifest;
pub mod model;
mod particle_config;
mod registry;
mod texture;

pub use error::AssetError;
pub use gltf_import::{import_model, import_scene};
pub use manifest::SceneManifest;
pub use model::{Aabb, MeshData, ModelData, Vertex};
pub use particle_config::{MAX_PARTICLES_LIMIT, ParticleConfig};
pub use registry::{Registry, ResourceKind};
pub use texture::{CubeFaces, ImageData};

pub fn crate_info() -> &'static str {
    "homestead-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }
}
