use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use homestead_common::Placement;
use homestead_scene::{Camera, DirectionalLight};

/// Phong exponent for the sun's highlight.
pub const SHININESS: f32 = 32.0;

/// Per-frame block at group 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
    pub light_direction: [f32; 4],
    pub light_color: [f32; 4],
    pub light_terms: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
}

impl GlobalUniforms {
    pub fn new(camera: &Camera, light: &DirectionalLight, day_alpha: f32) -> Self {
        let (right, up) = camera.billboard_axes();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view_pos: camera.position.extend(1.0).to_array(),
            light_direction: light.direction.extend(day_alpha).to_array(),
            light_color: light.color.extend(light.ambient).to_array(),
            light_terms: [light.diffuse, light.specular, SHININESS, 0.0],
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
        }
    }

    pub fn day_alpha(&self) -> f32 {
        self.light_direction[3]
    }
}

/// Per-draw block at group 1, addressed with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub params: [f32; 4],
}

impl ObjectUniforms {
    pub fn from_placement(placement: &Placement) -> Self {
        Self::from_matrix(placement.model_matrix())
    }

    pub fn from_matrix(model: Mat4) -> Self {
        let normal = model.inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            tint: [1.0; 4],
            params: [0.0; 4],
        }
    }

    pub fn with_tint(mut self, color: Vec3, alpha: f32) -> Self {
        self.tint = color.extend(alpha).to_array();
        self
    }

    /// 0 is fully lit, 1 ignores the light.
    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.params[0] = emissive.clamp(0.0, 1.0);
        self
    }
}

/// Per-mesh block next to the texture at group 2.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub base_color: [f32; 4],
    pub params: [f32; 4],
}

impl MaterialUniforms {
    pub fn new(base_color: [f32; 4], uv_scale: f32) -> Self {
        Self {
            base_color,
            params: [uv_scale, 0.0, 0.0, 0.0],
        }
    }
}

/// Round `size` up to a multiple of `alignment` (a power of two).
pub fn align_to(size: u64, alignment: u64) -> u64 {
    (size + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<GlobalUniforms>(), 160);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 160);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 32);
    }

    #[test]
    fn object_stride_is_aligned() {
        let size = std::mem::size_of::<ObjectUniforms>() as u64;
        assert_eq!(align_to(size, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(size, 32), 160);
    }

    #[test]
    fn globals_carry_light_and_day() {
        let camera = Camera::default();
        let light = DirectionalLight::default();
        let globals = GlobalUniforms::new(&camera, &light, 0.25);
        assert_eq!(globals.day_alpha(), 0.25);
        assert_eq!(globals.light_color[3], light.ambient);
        assert_eq!(globals.view_pos[..3], camera.position.to_array());
    }

    #[test]
    fn object_from_placement() {
        let placement = Placement::at(Vec3::new(1.0, 2.0, 3.0)).with_uniform_scale(2.0);
        let object = ObjectUniforms::from_placement(&placement)
            .with_tint(Vec3::ONE, 0.5)
            .with_emissive(3.0);
        assert_eq!(object.model[3][..3], [1.0, 2.0, 3.0]);
        assert_eq!(object.tint[3], 0.5);
        assert_eq!(object.params[0], 1.0);
        // inverse-transpose of a uniform scale by 2
        assert!((object.normal[0][0] - 0.5).abs() < 1e-6);
    }
}
