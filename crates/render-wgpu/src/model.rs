use std::sync::Arc;

use homestead_assets::ModelData;
use homestead_common::Placement;

use crate::context::GpuContext;
use crate::error::RenderError;
use crate::frame::{DrawItem, Frame};
use crate::mesh_renderer::MeshRenderer;
use crate::shader::{Shader, ShaderKind};
use crate::texture::GpuTexture;
use crate::uniforms::ObjectUniforms;

/// An imported model on the GPU: one [`MeshRenderer`] per flattened mesh,
/// all drawn with the same shader and placement.
#[derive(Debug)]
pub struct Model {
    pub name: String,
    shader: Arc<Shader>,
    meshes: Vec<MeshRenderer>,
    emissive: f32,
}

impl Model {
    /// Upload `data`. Meshes without a texture sample `fallback`. Bind groups
    /// keep the uploaded textures alive.
    pub fn from_data(
        ctx: &GpuContext,
        data: &ModelData,
        shader: Arc<Shader>,
        fallback: &GpuTexture,
    ) -> Result<Self, RenderError> {
        shader.expect_kind(ShaderKind::Mesh)?;
        let textures: Vec<GpuTexture> = data
            .images
            .iter()
            .map(|image| GpuTexture::from_image(ctx, image))
            .collect();
        let meshes = data
            .meshes
            .iter()
            .map(|mesh| {
                let texture = mesh
                    .texture
                    .and_then(|i| textures.get(i))
                    .unwrap_or(fallback);
                MeshRenderer::new(ctx, mesh, texture, 1.0)
            })
            .collect();
        tracing::info!(
            "model {}: {} meshes, {} textures, {} vertices",
            data.name,
            data.meshes.len(),
            textures.len(),
            data.vertex_count()
        );
        Ok(Self {
            name: data.name.clone(),
            shader,
            meshes,
            emissive: 0.0,
        })
    }

    pub fn set_shader(&mut self, shader: Arc<Shader>) -> Result<(), RenderError> {
        shader.expect_kind(ShaderKind::Mesh)?;
        self.shader = shader;
        Ok(())
    }

    /// 0 is fully lit, 1 ignores the light.
    pub fn set_emissive(&mut self, emissive: f32) {
        self.emissive = emissive.clamp(0.0, 1.0);
    }

    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>, placement: &Placement) {
        let object = frame.push_object(
            ObjectUniforms::from_placement(placement).with_emissive(self.emissive),
        );
        for mesh in &self.meshes {
            frame.push(DrawItem {
                shader: &self.shader,
                material: &mesh.material,
                geometry: mesh.mesh.geometry(),
                object,
            });
        }
    }
}
