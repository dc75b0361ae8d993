use std::collections::BTreeMap;
use std::fmt;

use crate::AssetError;

/// The kind of resource a registry holds. Used in lookup errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Shader,
    Texture,
    Light,
    Renderer,
    Model,
    Camera,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Shader => "shader",
            Self::Texture => "texture",
            Self::Light => "light",
            Self::Renderer => "renderer",
            Self::Model => "model",
            Self::Camera => "camera",
        };
        f.write_str(s)
    }
}

/// Name-keyed resource store.
///
/// Uses BTreeMap so that listings are stable across runs.
#[derive(Debug)]
pub struct Registry<T> {
    kind: ResourceKind,
    entries: BTreeMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Store `value` under `name`, returning whatever was there before.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), value);
        if previous.is_some() {
            tracing::warn!("replaced {} `{name}`", self.kind);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Result<&T, AssetError> {
        self.entries.get(name).ok_or_else(|| self.not_found(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T, AssetError> {
        let kind = self.kind;
        self.entries
            .get_mut(name)
            .ok_or_else(|| AssetError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn not_found(&self, name: &str) -> AssetError {
        AssetError::NotFound {
            kind: self.kind,
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut reg = Registry::new(ResourceKind::Texture);
        assert!(reg.insert("grass", 1u32).is_none());
        assert_eq!(*reg.get("grass").unwrap(), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn insert_replaces_previous() {
        let mut reg = Registry::new(ResourceKind::Model);
        reg.insert("tree", 1u32);
        assert_eq!(reg.insert("tree", 2), Some(1));
        assert_eq!(*reg.get("tree").unwrap(), 2);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn missing_name_reports_kind() {
        let reg: Registry<u32> = Registry::new(ResourceKind::Light);
        let err = reg.get("sun").unwrap_err();
        assert!(matches!(
            err,
            AssetError::NotFound {
                kind: ResourceKind::Light,
                ..
            }
        ));
        assert_eq!(err.to_string(), "light not found: sun");
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = Registry::new(ResourceKind::Renderer);
        reg.insert("skybox", ());
        reg.insert("land", ());
        reg.insert("nightSkybox", ());
        let names: Vec<&str> = reg.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["land", "nightSkybox", "skybox"]);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut reg = Registry::new(ResourceKind::Camera);
        reg.insert("main", 5.0f32);
        *reg.get_mut("main").unwrap() += 1.0;
        assert_eq!(*reg.get("main").unwrap(), 6.0);
        assert!(reg.get_mut("other").is_err());
    }
}
