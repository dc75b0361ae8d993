use homestead_assets::AssetError;

use crate::shader::ShaderKind;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("shader {name} is a {found} shader, expected {expected}")]
    ShaderKind {
        name: String,
        expected: ShaderKind,
        found: ShaderKind,
    },

    #[error("renderer {name} is a {found} renderer, expected {expected}")]
    RendererKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("texture {name} is not a {expected} texture")]
    TextureKind { name: String, expected: &'static str },
}
