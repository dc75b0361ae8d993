use std::path::Path;
use std::sync::Arc;

use homestead_assets::{CubeFaces, ImageData, ParticleConfig, Registry, ResourceKind};
use homestead_scene::{Camera, DirectionalLight, DrawTarget, SceneLayout};

use crate::context::GpuContext;
use crate::error::RenderError;
use crate::frame::Frame;
use crate::model::Model;
use crate::renderers::{
    LandRenderer, ParticleRenderer, RendererKind, RendererSlot, SkyboxRenderer,
};
use crate::shader::{Shader, ShaderId, ShaderKind};
use crate::texture::{GpuTexture, TextureKind};

/// Counts per resource kind, for the HUD and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceCounts {
    pub shaders: usize,
    pub textures: usize,
    pub lights: usize,
    pub renderers: usize,
    pub models: usize,
    pub cameras: usize,
}

/// Name-keyed store for every resource the scene draws with.
///
/// Loaders take names of resources loaded earlier, so shaders and textures
/// must be in place before the renderers and models that use them.
pub struct ResourceManager {
    shaders: Registry<Arc<Shader>>,
    textures: Registry<Arc<GpuTexture>>,
    lights: Registry<DirectionalLight>,
    renderers: Registry<RendererSlot>,
    models: Registry<Model>,
    cameras: Registry<Camera>,
    white: GpuTexture,
    next_shader_id: u32,
}

impl ResourceManager {
    pub fn new(ctx: &GpuContext) -> Self {
        Self {
            shaders: Registry::new(ResourceKind::Shader),
            textures: Registry::new(ResourceKind::Texture),
            lights: Registry::new(ResourceKind::Light),
            renderers: Registry::new(ResourceKind::Renderer),
            models: Registry::new(ResourceKind::Model),
            cameras: Registry::new(ResourceKind::Camera),
            white: GpuTexture::white(ctx),
            next_shader_id: 1,
        }
    }

    pub fn load_shader(&mut self, ctx: &GpuContext, kind: ShaderKind, name: &str) -> Arc<Shader> {
        let id = ShaderId(self.next_shader_id);
        self.next_shader_id += 1;
        let shader = Arc::new(Shader::new(ctx, id, name, kind));
        tracing::debug!("loaded shader {name} as {:?}", shader.id());
        self.shaders.insert(name, Arc::clone(&shader));
        shader
    }

    pub fn load_2d_texture(
        &mut self,
        ctx: &GpuContext,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<Arc<GpuTexture>, RenderError> {
        let image = ImageData::open(path)?;
        let texture = Arc::new(GpuTexture::from_image(ctx, &image));
        self.textures.insert(name, Arc::clone(&texture));
        Ok(texture)
    }

    /// Six faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn load_box_texture<P: AsRef<Path>>(
        &mut self,
        ctx: &GpuContext,
        faces: &[P; 6],
        name: &str,
    ) -> Result<Arc<GpuTexture>, RenderError> {
        let faces = CubeFaces::open(faces)?;
        let texture = Arc::new(GpuTexture::from_cube(ctx, name, &faces));
        self.textures.insert(name, Arc::clone(&texture));
        Ok(texture)
    }

    pub fn load_light(&mut self, name: &str, light: DirectionalLight) {
        self.lights.insert(name, light);
    }

    /// Build a land or skybox renderer from a loaded shader and texture.
    pub fn load_renderer(
        &mut self,
        ctx: &GpuContext,
        kind: RendererKind,
        shader: &str,
        texture: &str,
        name: &str,
    ) -> Result<(), RenderError> {
        let shader = Arc::clone(self.shaders.get(shader)?);
        let texture = self.textures.get(texture)?;
        let slot = match kind {
            RendererKind::Land => {
                expect_texture(texture, TextureKind::Flat)?;
                RendererSlot::Land(LandRenderer::new(ctx, shader, texture)?)
            }
            RendererKind::Skybox => {
                expect_texture(texture, TextureKind::Cube)?;
                RendererSlot::Skybox(SkyboxRenderer::new(ctx, shader, texture)?)
            }
        };
        self.renderers.insert(name, slot);
        Ok(())
    }

    pub fn load_particle_renderer(
        &mut self,
        ctx: &GpuContext,
        shader: &str,
        texture: &str,
        config: impl AsRef<Path>,
        name: &str,
    ) -> Result<(), RenderError> {
        let shader = Arc::clone(self.shaders.get(shader)?);
        let texture = self.textures.get(texture)?;
        expect_texture(texture, TextureKind::Flat)?;
        let config = ParticleConfig::load(config)?;
        let renderer = ParticleRenderer::new(ctx, shader, texture, config)?;
        self.renderers.insert(name, RendererSlot::Particles(renderer));
        Ok(())
    }

    /// Import a glTF model and upload it with `shader`.
    pub fn load_model(
        &mut self,
        ctx: &GpuContext,
        path: impl AsRef<Path>,
        shader: &str,
        name: &str,
    ) -> Result<&mut Model, RenderError> {
        let shader = Arc::clone(self.shaders.get(shader)?);
        let data = homestead_assets::import_model(path)?;
        let model = Model::from_data(ctx, &data, shader, &self.white)?;
        self.models.insert(name, model);
        Ok(self.models.get_mut(name)?)
    }

    pub fn load_camera(&mut self, name: &str, camera: Camera) {
        self.cameras.insert(name, camera);
    }

    pub fn light_mut(&mut self, name: &str) -> Result<&mut DirectionalLight, RenderError> {
        Ok(self.lights.get_mut(name)?)
    }

    pub fn skybox_mut(&mut self, name: &str) -> Result<&mut SkyboxRenderer, RenderError> {
        let slot = self.renderers.get_mut(name)?;
        let found = slot.kind_name();
        slot.as_skybox_mut().ok_or_else(|| renderer_kind_error(name, "skybox", found))
    }

    pub fn particles_mut(&mut self, name: &str) -> Result<&mut ParticleRenderer, RenderError> {
        let slot = self.renderers.get_mut(name)?;
        let found = slot.kind_name();
        slot.as_particles_mut().ok_or_else(|| renderer_kind_error(name, "particle", found))
    }

    pub fn camera(&self, name: &str) -> Result<&Camera, RenderError> {
        Ok(self.cameras.get(name)?)
    }

    pub fn camera_mut(&mut self, name: &str) -> Result<&mut Camera, RenderError> {
        Ok(self.cameras.get_mut(name)?)
    }

    /// Live particles over every emitter.
    pub fn particle_count(&self) -> usize {
        self.renderers
            .iter()
            .filter_map(|(_, slot)| slot.as_particles())
            .map(ParticleRenderer::live_count)
            .sum()
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            shaders: self.shaders.len(),
            textures: self.textures.len(),
            lights: self.lights.len(),
            renderers: self.renderers.len(),
            models: self.models.len(),
            cameras: self.cameras.len(),
        }
    }

    /// Record every draw of `layout` in order. Unknown names are errors.
    pub fn record<'a>(
        &'a self,
        frame: &mut Frame<'a>,
        layout: &SceneLayout,
    ) -> Result<(), RenderError> {
        for command in &layout.commands {
            match command.target {
                DrawTarget::Renderer(name) => {
                    self.renderers.get(name)?.draw(frame, &command.placement);
                }
                DrawTarget::Model(name) => {
                    self.models.get(name)?.draw(frame, &command.placement);
                }
            }
        }
        Ok(())
    }
}

fn renderer_kind_error(name: &str, expected: &'static str, found: &'static str) -> RenderError {
    RenderError::RendererKind {
        name: name.to_string(),
        expected,
        found,
    }
}

fn expect_texture(texture: &GpuTexture, kind: TextureKind) -> Result<(), RenderError> {
    if texture.kind == kind {
        Ok(())
    } else {
        Err(RenderError::TextureKind {
            name: texture.name.clone(),
            expected: match kind {
                TextureKind::Flat => "2D",
                TextureKind::Cube => "cube",
            },
        })
    }
}
