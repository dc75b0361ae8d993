use homestead_assets::MeshData;
use wgpu::util::DeviceExt;

use crate::context::GpuContext;
use crate::frame::Geometry;
use crate::texture::GpuTexture;
use crate::uniforms::MaterialUniforms;

/// Vertex and index buffers of one mesh.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn new(ctx: &GpuContext, mesh: &MeshData) -> Self {
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn geometry(&self) -> Geometry<'_> {
        Geometry::Indexed {
            vertices: &self.vertex_buffer,
            indices: &self.index_buffer,
            index_count: self.index_count,
        }
    }
}

/// A mesh bound to one 2D texture and its material block.
#[derive(Debug)]
pub struct MeshRenderer {
    pub name: String,
    pub mesh: GpuMesh,
    pub material: wgpu::BindGroup,
}

impl MeshRenderer {
    pub fn new(ctx: &GpuContext, mesh: &MeshData, texture: &GpuTexture, uv_scale: f32) -> Self {
        let material_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material_buffer"),
            contents: bytemuck::bytes_of(&MaterialUniforms::new(mesh.base_color, uv_scale)),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        Self {
            name: mesh.name.clone(),
            mesh: GpuMesh::new(ctx, mesh),
            material: material_bind_group(ctx, texture, &material_buffer),
        }
    }
}

/// Group 2 for the mesh and particle pipelines.
pub fn material_bind_group(
    ctx: &GpuContext,
    texture: &GpuTexture,
    material: &wgpu::Buffer,
) -> wgpu::BindGroup {
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("material_bind_group"),
        layout: &ctx.layouts.material_2d,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: material.as_entire_binding(),
            },
        ],
    })
}
