use std::fmt;

use homestead_assets::Vertex;
use homestead_scene::ParticleInstance;

use crate::context::GpuContext;
use crate::error::RenderError;
use crate::shaders;
use crate::texture::DEPTH_FORMAT;

/// Which pipeline a shader program builds; fixes its vertex layout, blend
/// and depth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Mesh,
    Skybox,
    Particle,
}

impl ShaderKind {
    fn source(self) -> String {
        match self {
            Self::Mesh => shaders::mesh_source(),
            Self::Skybox => shaders::skybox_source(),
            Self::Particle => shaders::particle_source(),
        }
    }

    /// Blended kinds draw over the opaque scene without writing depth.
    pub fn is_blended(self) -> bool {
        !matches!(self, Self::Mesh)
    }

    /// Error unless a shader `name` of this kind can stand in for `expected`.
    pub fn require(self, expected: ShaderKind, name: &str) -> Result<(), RenderError> {
        if self == expected {
            Ok(())
        } else {
            Err(RenderError::ShaderKind {
                name: name.to_string(),
                expected,
                found: self,
            })
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mesh => "mesh",
            Self::Skybox => "skybox",
            Self::Particle => "particle",
        })
    }
}

/// Numeric handle, unique per loaded shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

/// A compiled program and the pipeline built from it.
#[derive(Debug)]
pub struct Shader {
    id: ShaderId,
    name: String,
    kind: ShaderKind,
    pipeline: wgpu::RenderPipeline,
}

/// Unit quad corners for billboards, two triangles.
pub const BILLBOARD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

impl Shader {
    pub fn new(ctx: &GpuContext, id: ShaderId, name: &str, kind: ShaderKind) -> Self {
        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(kind.source().into()),
        });

        let material = match kind {
            ShaderKind::Skybox => &ctx.layouts.material_cube,
            ShaderKind::Mesh | ShaderKind::Particle => &ctx.layouts.material_2d,
        };
        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&ctx.layouts.globals, &ctx.layouts.object, material],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x2,
            ],
        }];
        let particle_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x3,
                    2 => Float32,
                    3 => Float32x4,
                ],
            },
        ];
        let buffers: &[wgpu::VertexBufferLayout<'_>] = match kind {
            ShaderKind::Mesh | ShaderKind::Skybox => &mesh_buffers,
            ShaderKind::Particle => &particle_buffers,
        };

        let blend = if kind.is_blended() {
            wgpu::BlendState::ALPHA_BLENDING
        } else {
            wgpu::BlendState::REPLACE
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(name),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Imported models wind both ways and the skybox is seen from
            // inside, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: !kind.is_blended(),
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        tracing::debug!("built {kind} pipeline {name}");

        Self {
            id,
            name: name.to_string(),
            kind,
            pipeline,
        }
    }

    pub fn id(&self) -> ShaderId {
        self.id
    }

    pub fn expect_kind(&self, expected: ShaderKind) -> Result<(), RenderError> {
        self.kind.require(expected, &self.name)
    }

    /// Make this shader current for the following draws.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_meshes_are_opaque() {
        assert!(!ShaderKind::Mesh.is_blended());
        assert!(ShaderKind::Skybox.is_blended());
        assert!(ShaderKind::Particle.is_blended());
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        assert!(ShaderKind::Mesh.require(ShaderKind::Mesh, "mesh").is_ok());
        let err = ShaderKind::Skybox.require(ShaderKind::Mesh, "skybox").unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShaderKind {
                expected: ShaderKind::Mesh,
                found: ShaderKind::Skybox,
                ..
            }
        ));
        assert_eq!(err.to_string(), "shader skybox is a skybox shader, expected mesh");
    }

    #[test]
    fn billboard_is_two_triangles_around_origin() {
        let sum = BILLBOARD_CORNERS
            .iter()
            .fold([0.0f32; 2], |acc, c| [acc[0] + c[0], acc[1] + c[1]]);
        assert_eq!(BILLBOARD_CORNERS.len(), 6);
        assert_eq!(sum, [0.0, 0.0]);
    }

    #[test]
    fn particle_instance_matches_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
    }
}
