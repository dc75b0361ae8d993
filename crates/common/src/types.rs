use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Per-draw instance transform: position, scale, and a rotation given as an
/// axis plus an angle in degrees.
///
/// The default matches a plain draw call: origin, unit scale, no rotation.
/// The default axis is (1, 1, 1) so that setting only an angle still rotates
/// about a well-defined axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation_axis: Vec3,
    pub rotation_degrees: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_axis: Vec3::ONE,
            rotation_degrees: 0.0,
        }
    }
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn rotated(mut self, axis: Vec3, degrees: f32) -> Self {
        self.rotation_axis = axis;
        self.rotation_degrees = degrees;
        self
    }

    /// Rotation part only. A zero angle or a degenerate axis is the identity.
    pub fn rotation_matrix(&self) -> Mat4 {
        let axis = self.rotation_axis.normalize_or_zero();
        if axis == Vec3::ZERO || self.rotation_degrees == 0.0 {
            return Mat4::IDENTITY;
        }
        Mat4::from_axis_angle(axis, self.rotation_degrees.to_radians())
    }

    /// Translate * rotate * scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * self.rotation_matrix()
            * Mat4::from_scale(self.scale)
    }

    /// Inverse-transpose of the model matrix, for transforming normals.
    pub fn normal_matrix(&self) -> Mat4 {
        self.model_matrix().inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Placement::default().model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_rotate_scale_order() {
        let p = Placement::at(Vec3::new(7.0, 0.0, -43.0))
            .with_uniform_scale(2.0)
            .rotated(Vec3::Y, 180.0);
        let m = p.model_matrix();
        // (1, 0, 0) scaled to (2, 0, 0), turned to (-2, 0, 0), then moved.
        let out = m.transform_point3(Vec3::X);
        assert!(approx(out, Vec3::new(5.0, 0.0, -43.0)), "{out:?}");
    }

    #[test]
    fn degenerate_axis_does_not_rotate() {
        let p = Placement::default().rotated(Vec3::ZERO, 90.0);
        assert_eq!(p.rotation_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn land_rotation_turns_plane_upright() {
        // A quad in the XY plane facing -Z ends up facing +Y.
        let p = Placement::default().rotated(Vec3::X, 90.0);
        let n = p.normal_matrix().transform_vector3(Vec3::NEG_Z).normalize();
        assert!(approx(n, Vec3::Y), "{n:?}");
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let p = Placement::default().with_scale(Vec3::new(0.25, 0.15, 0.25));
        let n = p.normal_matrix().transform_vector3(Vec3::Y).normalize();
        assert!(approx(n, Vec3::Y));
    }
}
