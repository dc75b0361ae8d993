use std::num::NonZeroU64;

use crate::error::RenderError;
use crate::uniforms::{GlobalUniforms, MaterialUniforms, ObjectUniforms};

/// Bind group layouts shared by every pipeline.
///
/// Group 0 is [`BindLayouts::globals`], group 1 [`BindLayouts::object`] and
/// group 2 one of the two material layouts.
#[derive(Debug)]
pub struct BindLayouts {
    pub globals: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub material_2d: wgpu::BindGroupLayout,
    pub material_cube: wgpu::BindGroupLayout,
}

impl BindLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let globals = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[uniform_entry(0, false, size_of::<GlobalUniforms>())],
        });
        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry(0, true, size_of::<ObjectUniforms>())],
        });
        let material_2d = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_2d_bind_group_layout"),
            entries: &[
                texture_entry(0, wgpu::TextureViewDimension::D2),
                sampler_entry(1),
                uniform_entry(2, false, size_of::<MaterialUniforms>()),
            ],
        });
        let material_cube = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_cube_bind_group_layout"),
            entries: &[
                texture_entry(0, wgpu::TextureViewDimension::Cube),
                sampler_entry(1),
            ],
        });
        Self {
            globals,
            object,
            material_2d,
            material_cube,
        }
    }
}

fn uniform_entry(binding: u32, dynamic: bool, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

fn texture_entry(
    binding: u32,
    view_dimension: wgpu::TextureViewDimension,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Device, queue, and the state every GPU resource is created against.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub layouts: BindLayouts,
}

impl GpuContext {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let layouts = BindLayouts::new(&device);
        Self {
            device,
            queue,
            surface_format,
            layouts,
        }
    }

    /// Pick an adapter that can present to `surface` and open a device on
    /// it.
    pub async fn request(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue), RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        tracing::info!("GPU adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("homestead_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok((adapter, device, queue))
    }

    /// Byte distance between object slots in the dynamic uniform buffer.
    pub fn object_stride(&self) -> u64 {
        let alignment = u64::from(self.device.limits().min_uniform_buffer_offset_alignment);
        crate::uniforms::align_to(size_of::<ObjectUniforms>() as u64, alignment)
    }
}
