use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::AssetError;

/// Upper bound on particles per emitter; matches the instance buffer cap.
pub const MAX_PARTICLES_LIMIT: u32 = 10_000;

/// JSON-configured particle emitter parameters.
///
/// Every field is optional in the file; absent fields take the defaults of a
/// small campfire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub max_particles: u32,
    /// Particles spawned per second.
    pub spawn_rate: f32,
    /// Seconds a particle lives.
    pub lifetime: f32,
    pub lifetime_variance: f32,
    pub velocity: [f32; 3],
    pub velocity_variance: [f32; 3],
    /// Constant acceleration. Positive Y makes smoke rise.
    pub gravity: [f32; 3],
    pub start_size: f32,
    pub end_size: f32,
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 200,
            spawn_rate: 40.0,
            lifetime: 2.0,
            lifetime_variance: 0.5,
            velocity: [0.0, 2.5, 0.0],
            velocity_variance: [0.6, 0.4, 0.6],
            gravity: [0.0, 0.6, 0.0],
            start_size: 1.2,
            end_size: 0.2,
            start_color: [1.0, 0.6, 0.2, 1.0],
            end_color: [0.3, 0.3, 0.3, 0.0],
            seed: 7,
        }
    }
}

impl ParticleConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        let config: Self = serde_json::from_str(&data).map_err(|source| AssetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!("particle config {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.max_particles == 0 || self.max_particles > MAX_PARTICLES_LIMIT {
            return Err(invalid(
                "max_particles",
                format!("must be in 1..={MAX_PARTICLES_LIMIT}, got {}", self.max_particles),
            ));
        }
        if !(self.spawn_rate >= 0.0) {
            return Err(invalid("spawn_rate", "must be non-negative"));
        }
        if !(self.lifetime > 0.0) {
            return Err(invalid("lifetime", "must be positive"));
        }
        if !(self.lifetime_variance >= 0.0 && self.lifetime_variance < self.lifetime) {
            return Err(invalid(
                "lifetime_variance",
                "must be non-negative and smaller than lifetime",
            ));
        }
        if self.velocity_variance.iter().any(|v| !(*v >= 0.0)) {
            return Err(invalid("velocity_variance", "components must be non-negative"));
        }
        if !(self.start_size >= 0.0) {
            return Err(invalid("start_size", "must be non-negative"));
        }
        if !(self.end_size >= 0.0) {
            return Err(invalid("end_size", "must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> AssetError {
    AssetError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("particle_fire.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), r#"{ "max_particles": 50, "lifetime": 3.0 }"#);
        let config = ParticleConfig::load(&path).unwrap();
        assert_eq!(config.max_particles, 50);
        assert_eq!(config.lifetime, 3.0);
        assert_eq!(config.spawn_rate, ParticleConfig::default().spawn_rate);
    }

    #[test]
    fn empty_object_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "{}");
        assert_eq!(ParticleConfig::load(&path).unwrap(), ParticleConfig::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), r#"{ "maxParticles": 50 }"#);
        assert!(matches!(
            ParticleConfig::load(&path),
            Err(AssetError::Json { .. })
        ));
    }

    #[test]
    fn invalid_values_name_the_field() {
        fn config_with(edit: impl FnOnce(&mut ParticleConfig)) -> ParticleConfig {
            let mut config = ParticleConfig::default();
            edit(&mut config);
            config
        }

        let cases = [
            (config_with(|c| c.max_particles = 0), "max_particles"),
            (config_with(|c| c.max_particles = 20_000), "max_particles"),
            (config_with(|c| c.spawn_rate = -1.0), "spawn_rate"),
            (config_with(|c| c.lifetime = 0.0), "lifetime"),
            (config_with(|c| c.lifetime_variance = 2.0), "lifetime_variance"),
            (
                config_with(|c| c.velocity_variance = [0.0, -0.1, 0.0]),
                "velocity_variance",
            ),
            (config_with(|c| c.end_size = f32::NAN), "end_size"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(AssetError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidConfig for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParticleConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn shipped_fire_config_is_the_default() {
        let path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../res/configs/particle_fire.json");
        let config = ParticleConfig::load(path).unwrap();
        assert_eq!(config, ParticleConfig::default());
    }
}
