use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec3;

/// Distance from the orbit center to the sun.
pub const ORBIT_RADIUS: f32 = 100.0;
/// Half-width of the dawn/dusk blend, in units of sun elevation (sine of the
/// day angle).
pub const TWILIGHT: f32 = 0.2;

/// A directional light that doubles as the sun of a day/night cycle.
///
/// The sun moves on a circle in the XY plane around a center point. The day
/// angle is 0 at the eastern horizon, pi/2 at noon and 3pi/2 at midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub direction: Vec3,
    /// Seconds for a full day/night cycle.
    pub day_length: f32,
    angle: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE, 0.4, 1.0, 0.5, Vec3::Z)
    }
}

impl DirectionalLight {
    pub fn new(
        position: Vec3,
        color: Vec3,
        ambient: f32,
        diffuse: f32,
        specular: f32,
        direction: Vec3,
    ) -> Self {
        Self {
            position,
            color,
            ambient,
            diffuse,
            specular,
            direction: direction.normalize_or_zero(),
            day_length: 60.0,
            angle: FRAC_PI_4,
        }
    }

    pub fn with_day_length(mut self, seconds: f32) -> Self {
        self.day_length = seconds.max(f32::EPSILON);
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.rem_euclid(TAU);
    }

    /// 1 at full day, 0 at full night, blended through twilight.
    pub fn day_alpha(&self) -> f32 {
        ((self.angle.sin() + TWILIGHT) / (2.0 * TWILIGHT)).clamp(0.0, 1.0)
    }

    pub fn is_above_horizon(&self) -> bool {
        self.angle.sin() > 0.0
    }

    /// Advance the day cycle by `dt` seconds, move the sun around `center`,
    /// aim the light at it, and return the new day alpha.
    pub fn orbit(&mut self, center: Vec3, dt: f32) -> f32 {
        self.set_angle(self.angle + TAU * dt / self.day_length);
        self.place(center);
        self.day_alpha()
    }

    fn place(&mut self, center: Vec3) {
        let offset = Vec3::new(self.angle.cos(), self.angle.sin(), 0.0) * ORBIT_RADIUS;
        self.position = center + offset;
        self.direction = (center - self.position).normalize_or_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn noon_is_full_day_and_points_down() {
        let mut light = DirectionalLight::default();
        light.set_angle(FRAC_PI_2);
        let center = Vec3::new(7.0, 0.0, -43.0);
        let alpha = light.orbit(center, 0.0);
        assert_eq!(alpha, 1.0);
        assert!(approx(light.direction, Vec3::NEG_Y));
        assert!(approx(light.position, center + Vec3::Y * ORBIT_RADIUS));
    }

    #[test]
    fn midnight_is_full_night() {
        let mut light = DirectionalLight::default();
        light.set_angle(3.0 * FRAC_PI_2);
        assert_eq!(light.day_alpha(), 0.0);
        assert!(!light.is_above_horizon());
    }

    #[test]
    fn horizon_is_half_blend() {
        let mut light = DirectionalLight::default();
        light.set_angle(PI);
        assert!((light.day_alpha() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut light = DirectionalLight::default().with_day_length(8.0);
        let start = light.angle();
        for _ in 0..16 {
            light.orbit(Vec3::ZERO, 0.5);
        }
        let diff = (light.angle() - start).rem_euclid(TAU);
        assert!(diff < 1e-3 || TAU - diff < 1e-3, "{diff}");
    }

    #[test]
    fn alpha_stays_in_unit_range() {
        let mut light = DirectionalLight::default().with_day_length(10.0);
        for _ in 0..200 {
            let a = light.orbit(Vec3::ZERO, 0.07);
            assert!((0.0..=1.0).contains(&a));
        }
    }
}
