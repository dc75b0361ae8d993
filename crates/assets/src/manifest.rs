use std::path::{Path, PathBuf};

use crate::texture::face_paths;

/// Asset paths of the homestead scene, relative to a resource root.
#[derive(Debug, Clone)]
pub struct SceneManifest {
    pub grass: PathBuf,
    pub smoke: PathBuf,
    pub day_sky: [PathBuf; 6],
    pub night_sky: [PathBuf; 6],
    pub particle_fire: PathBuf,
    pub farmhouse: PathBuf,
    pub tree: PathBuf,
    pub fence: PathBuf,
    pub sun: PathBuf,
}

impl SceneManifest {
    /// The fixed asset set, rooted at `root` (usually `res`).
    pub fn homestead(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            grass: root.join("images/grass.jpg"),
            smoke: root.join("images/smoke.png"),
            day_sky: face_paths(root, "images/skybox", "jpg"),
            night_sky: face_paths(root, "images/nightSky/Spacebox2", "png"),
            particle_fire: root.join("configs/particle_fire.json"),
            farmhouse: root.join("models/Farmhouse/farmhouse.gltf"),
            tree: root.join("models/tree/tree1.gltf"),
            fence: root.join("models/fence/Fence_White.gltf"),
            sun: root.join("models/sun/sun.gltf"),
        }
    }

    /// Every path the scene needs, in load order.
    pub fn all_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = vec![self.grass.as_path()];
        paths.extend(self.day_sky.iter().map(PathBuf::as_path));
        paths.push(self.smoke.as_path());
        paths.extend(self.night_sky.iter().map(PathBuf::as_path));
        paths.extend([
            self.particle_fire.as_path(),
            self.farmhouse.as_path(),
            self.tree.as_path(),
            self.fence.as_path(),
            self.sun.as_path(),
        ]);
        paths
    }

    /// Paths that do not exist on disk.
    pub fn missing(&self) -> Vec<&Path> {
        self.all_paths().into_iter().filter(|p| !p.exists()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted() {
        let manifest = SceneManifest::homestead("res");
        assert_eq!(manifest.grass, PathBuf::from("res/images/grass.jpg"));
        assert_eq!(
            manifest.night_sky[2],
            PathBuf::from("res/images/nightSky/Spacebox2/top.png")
        );
        assert_eq!(manifest.day_sky[5], PathBuf::from("res/images/skybox/front.jpg"));
        assert_eq!(manifest.all_paths().len(), 19);
    }

    #[test]
    fn missing_reports_only_absent_files() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = SceneManifest::homestead(dir.path());
        assert_eq!(manifest.missing().len(), 19);

        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        std::fs::write(&manifest.grass, b"").unwrap();
        let missing = manifest.missing();
        assert_eq!(missing.len(), 18);
        assert!(!missing.contains(&manifest.grass.as_path()));
    }
}
