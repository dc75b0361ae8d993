use std::path::PathBuf;

use crate::registry::ResourceKind;

/// Errors from asset loading, validation, and lookup.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image decode error in {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("glTF import error in {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("invalid mesh `{mesh}`: {reason}")]
    InvalidMesh { mesh: String, reason: String },
    #[error("cube map face {face} is {width}x{height}, expected {expected}x{expected}")]
    CubeFaceMismatch {
        face: usize,
        width: u32,
        height: u32,
        expected: u32,
    },
    #[error("unsupported pixel format {format} in {name}")]
    UnsupportedImageFormat { name: String, format: String },
    #[error("{kind} not found: {name}")]
    NotFound { kind: ResourceKind, name: String },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_mesh(mesh: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMesh {
            mesh: mesh.into(),
            reason: reason.into(),
        }
    }
}
