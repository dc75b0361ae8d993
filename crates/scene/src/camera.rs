use glam::{Mat4, Vec3};

/// Upward speed at the start of a jump, units per second.
pub const JUMP_SPEED: f32 = 8.0;
/// Downward acceleration while airborne, units per second squared.
pub const GRAVITY: f32 = 20.0;

/// Walking camera with position, yaw, pitch, and projection parameters.
///
/// Keyboard motion stays in the ground plane; height only changes through
/// jumps, which always land back at the eye height the camera was created
/// with.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
    ground_height: f32,
    vertical_speed: f32,
    airborne: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_along(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::NEG_Z,
            45.0_f32.to_radians(),
            16.0 / 9.0,
            0.1,
            500.0,
        )
    }
}

impl Camera {
    /// Camera at `position` looking along `front`. Up is always +Y.
    pub fn look_along(
        position: Vec3,
        front: Vec3,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let front = front.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self {
            position,
            yaw: front.z.atan2(front.x),
            pitch: front.y.clamp(-1.0, 1.0).asin(),
            fov,
            aspect,
            near,
            far,
            sensitivity: 0.003,
            ground_height: position.y,
            vertical_speed: 0.0,
            airborne: false,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Forward direction flattened onto the ground plane.
    pub fn forward_2d(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    }

    pub fn right_2d(&self) -> Vec3 {
        self.forward_2d().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn move_forward_2d(&mut self, distance: f32) {
        self.position += self.forward_2d() * distance;
    }

    pub fn move_back_2d(&mut self, distance: f32) {
        self.position -= self.forward_2d() * distance;
    }

    pub fn move_left_2d(&mut self, distance: f32) {
        self.position -= self.right_2d() * distance;
    }

    pub fn move_right_2d(&mut self, distance: f32) {
        self.position += self.right_2d() * distance;
    }

    /// Start a jump. Ignored while already in the air.
    pub fn jump(&mut self) {
        if !self.airborne {
            self.airborne = true;
            self.vertical_speed = JUMP_SPEED;
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    /// Advance an in-progress jump by `dt` seconds.
    pub fn update_jump(&mut self, dt: f32) {
        if !self.airborne {
            return;
        }
        self.vertical_speed -= GRAVITY * dt;
        self.position.y += self.vertical_speed * dt;
        if self.position.y <= self.ground_height {
            self.position.y = self.ground_height;
            self.vertical_speed = 0.0;
            self.airborne = false;
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera right and up vectors in world space, for billboards.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 0.0));
        assert!(approx(cam.forward(), Vec3::NEG_Z));
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn planar_movement_keeps_height() {
        let mut cam = Camera::default();
        cam.pitch = -45.0_f32.to_radians();
        cam.move_forward_2d(10.0);
        assert!((cam.position.y - 5.0).abs() < 1e-6);
        assert!(approx(cam.position, Vec3::new(0.0, 5.0, -10.0)));
    }

    #[test]
    fn strafing_is_perpendicular() {
        let mut cam = Camera::default();
        cam.move_right_2d(2.0);
        assert!(approx(cam.position, Vec3::new(2.0, 5.0, 0.0)));
        cam.move_left_2d(2.0);
        cam.move_back_2d(3.0);
        assert!(approx(cam.position, Vec3::new(0.0, 5.0, 3.0)));
    }

    #[test]
    fn jump_rises_and_lands() {
        let mut cam = Camera::default();
        cam.jump();
        assert!(cam.is_airborne());
        let mut peak = cam.position.y;
        for _ in 0..40 {
            cam.update_jump(0.05);
            peak = peak.max(cam.position.y);
        }
        assert!(peak > 5.5);
        assert!(!cam.is_airborne());
        assert_eq!(cam.position.y, cam.ground_height());
    }

    #[test]
    fn jump_is_ignored_mid_air() {
        let mut cam = Camera::default();
        cam.jump();
        cam.update_jump(0.1);
        let y = cam.position.y;
        cam.jump();
        cam.update_jump(0.0);
        assert_eq!(cam.position.y, y);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.rotate(0.0, -100_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
    }

    #[test]
    fn aspect_tracks_window() {
        let mut cam = Camera::default();
        cam.set_aspect(800, 0);
        assert_eq!(cam.aspect, 800.0);
        cam.set_aspect(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
