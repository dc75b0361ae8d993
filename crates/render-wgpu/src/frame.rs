//! Frame recording and submission.
//!
//! Draw calls are first recorded into a [`Frame`] that borrows the GPU
//! resources it references, then [`FrameRenderer::submit`] uploads every
//! per-draw uniform in one write and replays the draws in record order
//! inside a single render pass.

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::context::GpuContext;
use crate::shader::Shader;
use crate::texture::create_depth_view;
use crate::uniforms::{GlobalUniforms, ObjectUniforms};

const INITIAL_OBJECT_SLOTS: u32 = 64;

/// Clear color behind the skyboxes.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

#[derive(Debug, Clone, Copy)]
pub enum Geometry<'a> {
    Indexed {
        vertices: &'a wgpu::Buffer,
        indices: &'a wgpu::Buffer,
        index_count: u32,
    },
    Instanced {
        vertices: &'a wgpu::Buffer,
        vertex_count: u32,
        instances: &'a wgpu::Buffer,
        instance_count: u32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub shader: &'a Shader,
    pub material: &'a wgpu::BindGroup,
    pub geometry: Geometry<'a>,
    /// Index into the frame's object uniforms.
    pub object: u32,
}

/// Draws recorded for one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    globals: GlobalUniforms,
    objects: Vec<ObjectUniforms>,
    items: Vec<DrawItem<'a>>,
}

impl<'a> Frame<'a> {
    pub fn new(globals: GlobalUniforms) -> Self {
        Self {
            globals,
            objects: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Reserve an object slot; draws that share a transform share a slot.
    pub fn push_object(&mut self, object: ObjectUniforms) -> u32 {
        self.objects.push(object);
        (self.objects.len() - 1) as u32
    }

    pub fn push(&mut self, item: DrawItem<'a>) {
        debug_assert!((item.object as usize) < self.objects.len());
        self.items.push(item);
    }

    pub fn objects(&self) -> &[ObjectUniforms] {
        &self.objects
    }

    pub fn draw_count(&self) -> usize {
        self.items.len()
    }
}

struct ObjectRing {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: u32,
}

impl ObjectRing {
    fn new(ctx: &GpuContext, capacity: u32, stride: u64) -> Self {
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_buffer"),
            size: u64::from(capacity) * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: &ctx.layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            capacity,
        }
    }
}

/// Owns the per-frame GPU state: globals, the object ring, and depth.
pub struct FrameRenderer {
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    objects: ObjectRing,
    stride: u64,
    depth_view: wgpu::TextureView,
}

impl FrameRenderer {
    pub fn new(ctx: &GpuContext, width: u32, height: u32) -> Self {
        let globals_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&GlobalUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &ctx.layouts.globals,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let stride = ctx.object_stride();
        Self {
            globals_buffer,
            globals_bind_group,
            objects: ObjectRing::new(ctx, INITIAL_OBJECT_SLOTS, stride),
            stride,
            depth_view: create_depth_view(&ctx.device, width, height),
        }
    }

    pub fn resize(&mut self, ctx: &GpuContext, width: u32, height: u32) {
        self.depth_view = create_depth_view(&ctx.device, width, height);
    }

    /// Upload the frame's uniforms and encode its draws into `target`.
    pub fn submit(&mut self, ctx: &GpuContext, frame: Frame<'_>, target: &wgpu::TextureView) {
        let needed = frame.objects.len() as u32;
        if needed > self.objects.capacity {
            let capacity = needed.next_power_of_two();
            tracing::debug!("growing object ring to {capacity} slots");
            self.objects = ObjectRing::new(ctx, capacity, self.stride);
        }

        ctx.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&frame.globals));
        if !frame.objects.is_empty() {
            let bytes = pack_objects(&frame.objects, self.stride as usize);
            ctx.queue.write_buffer(&self.objects.buffer, 0, &bytes);
        }

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for item in &frame.items {
                let offset = (u64::from(item.object) * self.stride) as u32;
                item.shader.bind(&mut pass);
                pass.set_bind_group(1, &self.objects.bind_group, &[offset]);
                pass.set_bind_group(2, item.material, &[]);
                match item.geometry {
                    Geometry::Indexed {
                        vertices,
                        indices,
                        index_count,
                    } => {
                        pass.set_vertex_buffer(0, vertices.slice(..));
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..index_count, 0, 0..1);
                    }
                    Geometry::Instanced {
                        vertices,
                        vertex_count,
                        instances,
                        instance_count,
                    } => {
                        pass.set_vertex_buffer(0, vertices.slice(..));
                        pass.set_vertex_buffer(1, instances.slice(..));
                        pass.draw(0..vertex_count, 0..instance_count);
                    }
                }
            }
        }
        ctx.queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Lay objects out `stride` bytes apart.
fn pack_objects(objects: &[ObjectUniforms], stride: usize) -> Vec<u8> {
    let size = size_of::<ObjectUniforms>();
    let mut bytes = vec![0u8; objects.len() * stride];
    for (i, object) in objects.iter().enumerate() {
        let start = i * stride;
        bytes[start..start + size].copy_from_slice(bytemuck::bytes_of(object));
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn objects_are_packed_at_stride() {
        let a = ObjectUniforms::from_matrix(Mat4::IDENTITY);
        let b = ObjectUniforms::from_matrix(Mat4::from_scale(glam::Vec3::splat(2.0)));
        let bytes = pack_objects(&[a, b], 256);
        assert_eq!(bytes.len(), 512);
        assert_eq!(&bytes[..160], bytemuck::bytes_of(&a));
        assert!(bytes[160..256].iter().all(|&x| x == 0));
        assert_eq!(&bytes[256..416], bytemuck::bytes_of(&b));
    }

    #[test]
    fn frame_hands_out_sequential_slots() {
        let mut frame = Frame::new(GlobalUniforms::zeroed());
        let first = frame.push_object(ObjectUniforms::from_matrix(Mat4::IDENTITY));
        let second = frame.push_object(ObjectUniforms::from_matrix(Mat4::IDENTITY));
        assert_eq!((first, second), (0, 1));
        assert_eq!(frame.objects().len(), 2);
        assert_eq!(frame.draw_count(), 0);
    }
}
