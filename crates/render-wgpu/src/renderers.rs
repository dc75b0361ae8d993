//! Standalone renderers that are not imported models: the ground, the
//! skyboxes and particle emitters.

use std::sync::Arc;

use glam::Vec3;
use homestead_assets::ParticleConfig;
use homestead_common::Placement;
use homestead_scene::{ParticleInstance, ParticleSystem};
use wgpu::util::DeviceExt;

use crate::context::GpuContext;
use crate::error::RenderError;
use crate::frame::{DrawItem, Frame, Geometry};
use crate::geometry;
use crate::mesh_renderer::{GpuMesh, MeshRenderer, material_bind_group};
use crate::shader::{BILLBOARD_CORNERS, Shader, ShaderKind};
use crate::texture::GpuTexture;
use crate::uniforms::{MaterialUniforms, ObjectUniforms};

/// Texture repeats across the land quad.
pub const LAND_TILING: f32 = 100.0;

/// Textured ground plane.
#[derive(Debug)]
pub struct LandRenderer {
    shader: Arc<Shader>,
    mesh: MeshRenderer,
}

impl LandRenderer {
    pub fn new(
        ctx: &GpuContext,
        shader: Arc<Shader>,
        texture: &GpuTexture,
    ) -> Result<Self, RenderError> {
        shader.expect_kind(ShaderKind::Mesh)?;
        let mesh = MeshRenderer::new(ctx, &geometry::land_mesh(), texture, LAND_TILING);
        Ok(Self { shader, mesh })
    }

    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>, placement: &Placement) {
        let object = frame.push_object(ObjectUniforms::from_placement(placement));
        frame.push(DrawItem {
            shader: &self.shader,
            material: &self.mesh.material,
            geometry: self.mesh.mesh.geometry(),
            object,
        });
    }
}

/// A cube-mapped box drawn around the scene with adjustable opacity.
#[derive(Debug)]
pub struct SkyboxRenderer {
    shader: Arc<Shader>,
    mesh: GpuMesh,
    cube: wgpu::BindGroup,
    alpha: f32,
}

impl SkyboxRenderer {
    pub fn new(
        ctx: &GpuContext,
        shader: Arc<Shader>,
        texture: &GpuTexture,
    ) -> Result<Self, RenderError> {
        shader.expect_kind(ShaderKind::Skybox)?;
        let cube = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("skybox_bind_group"),
            layout: &ctx.layouts.material_cube,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });
        Ok(Self {
            shader,
            mesh: GpuMesh::new(ctx, &geometry::cube_mesh()),
            cube,
            alpha: 1.0,
        })
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>, placement: &Placement) {
        if self.alpha <= 0.0 {
            return;
        }
        let object = frame.push_object(
            ObjectUniforms::from_placement(placement).with_tint(Vec3::ONE, self.alpha),
        );
        frame.push(DrawItem {
            shader: &self.shader,
            material: &self.cube,
            geometry: self.mesh.geometry(),
            object,
        });
    }
}

/// Billboarded particles from a CPU [`ParticleSystem`].
#[derive(Debug)]
pub struct ParticleRenderer {
    shader: Arc<Shader>,
    system: ParticleSystem,
    corners: wgpu::Buffer,
    instances: wgpu::Buffer,
    instance_count: u32,
    material: wgpu::BindGroup,
}

impl ParticleRenderer {
    pub fn new(
        ctx: &GpuContext,
        shader: Arc<Shader>,
        texture: &GpuTexture,
        config: ParticleConfig,
    ) -> Result<Self, RenderError> {
        shader.expect_kind(ShaderKind::Particle)?;
        config.validate()?;
        let corners = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_corner_buffer"),
            contents: bytemuck::cast_slice(&BILLBOARD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instances = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instance_buffer"),
            size: u64::from(config.max_particles) * size_of::<ParticleInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let material_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_material_buffer"),
            contents: bytemuck::bytes_of(&MaterialUniforms::new([1.0; 4], 1.0)),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let material = material_bind_group(ctx, texture, &material_buffer);
        Ok(Self {
            shader,
            system: ParticleSystem::new(config),
            corners,
            instances,
            instance_count: 0,
            material,
        })
    }

    pub fn live_count(&self) -> usize {
        self.system.len()
    }

    /// Step the simulation and re-upload instances sorted for
    /// `view_origin`, given in emitter space.
    pub fn update(&mut self, queue: &wgpu::Queue, dt: f32, view_origin: Vec3) {
        self.system.update(dt);
        let instances = self.system.instances(view_origin);
        if !instances.is_empty() {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&instances));
        }
        self.instance_count = instances.len() as u32;
    }

    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>, placement: &Placement) {
        if self.instance_count == 0 {
            return;
        }
        let object = frame.push_object(ObjectUniforms::from_placement(placement));
        frame.push(DrawItem {
            shader: &self.shader,
            material: &self.material,
            geometry: Geometry::Instanced {
                vertices: &self.corners,
                vertex_count: BILLBOARD_CORNERS.len() as u32,
                instances: &self.instances,
                instance_count: self.instance_count,
            },
            object,
        });
    }
}

/// Kinds accepted by `ResourceManager::load_renderer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Land,
    Skybox,
}

/// Any standalone renderer held by the resource manager.
#[derive(Debug)]
pub enum RendererSlot {
    Land(LandRenderer),
    Skybox(SkyboxRenderer),
    Particles(ParticleRenderer),
}

impl RendererSlot {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Land(_) => "land",
            Self::Skybox(_) => "skybox",
            Self::Particles(_) => "particle",
        }
    }

    pub fn as_skybox_mut(&mut self) -> Option<&mut SkyboxRenderer> {
        match self {
            Self::Skybox(skybox) => Some(skybox),
            _ => None,
        }
    }

    pub fn as_particles_mut(&mut self) -> Option<&mut ParticleRenderer> {
        match self {
            Self::Particles(particles) => Some(particles),
            _ => None,
        }
    }

    pub fn as_particles(&self) -> Option<&ParticleRenderer> {
        match self {
            Self::Particles(particles) => Some(particles),
            _ => None,
        }
    }

    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>, placement: &Placement) {
        match self {
            Self::Land(land) => land.draw(frame, placement),
            Self::Skybox(skybox) => skybox.draw(frame, placement),
            Self::Particles(particles) => particles.draw(frame, placement),
        }
    }
}
