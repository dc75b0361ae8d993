use homestead_assets::{CubeFaces, ImageData};

use crate::context::GpuContext;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Flat,
    Cube,
}

/// A sampled texture on the GPU: either a 2D image or a six-layer cube map.
#[derive(Debug)]
pub struct GpuTexture {
    pub name: String,
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn from_image(ctx: &GpuContext, image: &ImageData) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = create_color_texture(ctx, &image.name, size);
        write_layers(ctx, &texture, &image.pixels, image.width, image.height, 1);
        let view = texture.create_view(&Default::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_2d_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        tracing::debug!("uploaded texture {} ({}x{})", image.name, image.width, image.height);
        Self {
            name: image.name.clone(),
            kind: TextureKind::Flat,
            width: image.width,
            height: image.height,
            texture,
            view,
            sampler,
        }
    }

    pub fn from_cube(ctx: &GpuContext, name: &str, faces: &CubeFaces) -> Self {
        let size = wgpu::Extent3d {
            width: faces.size,
            height: faces.size,
            depth_or_array_layers: 6,
        };
        let texture = create_color_texture(ctx, name, size);
        write_layers(ctx, &texture, &faces.layered_pixels(), faces.size, faces.size, 6);
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("cube_view"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_cube_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        tracing::debug!("uploaded cube map {name} ({0}x{0})", faces.size);
        Self {
            name: name.to_string(),
            kind: TextureKind::Cube,
            width: faces.size,
            height: faces.size,
            texture,
            view,
            sampler,
        }
    }

    /// 1x1 white, bound wherever a mesh has no texture of its own.
    pub fn white(ctx: &GpuContext) -> Self {
        Self::from_image(ctx, &ImageData::white())
    }
}

fn create_color_texture(ctx: &GpuContext, name: &str, size: wgpu::Extent3d) -> wgpu::Texture {
    ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(name),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

/// Upload tightly packed RGBA8 layers in one write.
fn write_layers(
    ctx: &GpuContext,
    texture: &wgpu::Texture,
    pixels: &[u8],
    width: u32,
    height: u32,
    layers: u32,
) {
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: layers,
        },
    );
}

pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
