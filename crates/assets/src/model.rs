//! Imported scene trees and their flattening into drawable meshes.
//!
//! An importer produces an [`ImportedScene`]: a node hierarchy whose nodes
//! reference meshes by index, with materials and images alongside. Rendering
//! never walks that tree. [`ImportedScene::flatten`] visits it once at load
//! time and produces a flat [`ModelData`] list, one [`MeshData`] per
//! primitive instance, with node transforms baked into the vertices.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::{AssetError, ImageData};

/// Interleaved vertex layout shared by every mesh the renderer uploads.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// One node of an imported hierarchy.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: Option<String>,
    /// Local transform relative to the parent node.
    pub transform: Mat4,
    /// Index into [`ImportedScene::meshes`].
    pub mesh: Option<usize>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(transform: Mat4, mesh: Option<usize>) -> Self {
        Self {
            name: None,
            transform,
            mesh,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }
}

/// Raw attribute streams for one primitive, as read from the importer.
#[derive(Debug, Clone, Default)]
pub struct MeshPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Option<Vec<u32>>,
    /// Index into [`ImportedScene::materials`].
    pub material: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportedMesh {
    pub name: Option<String>,
    pub primitives: Vec<MeshPrimitive>,
}

#[derive(Debug, Clone)]
pub struct ImportedMaterial {
    pub name: Option<String>,
    pub base_color: [f32; 4],
    /// Index into [`ImportedScene::images`].
    pub base_color_image: Option<usize>,
}

impl Default for ImportedMaterial {
    fn default() -> Self {
        Self {
            name: None,
            base_color: [1.0; 4],
            base_color_image: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportedScene {
    pub roots: Vec<SceneNode>,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
    pub images: Vec<ImageData>,
}

/// A flattened, world-space mesh ready for upload.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    /// Index into [`ModelData::images`].
    pub texture: Option<usize>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// The flattened form of an imported model.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub images: Vec<ImageData>,
}

impl ModelData {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }

    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len()).sum()
    }

    pub fn textured_mesh_count(&self) -> usize {
        self.meshes.iter().filter(|m| m.texture.is_some()).count()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let mut points = self
            .meshes
            .iter()
            .flat_map(|m| m.vertices.iter())
            .map(|v| Vec3::from(v.position));
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Aabb { min, max })
    }
}

impl ImportedScene {
    /// Walk every root depth-first and collect one [`MeshData`] per primitive
    /// per referencing node.
    pub fn flatten(self, name: impl Into<String>) -> Result<ModelData, AssetError> {
        let mut meshes = Vec::new();
        for root in &self.roots {
            self.visit(root, Mat4::IDENTITY, &mut meshes)?;
        }
        tracing::debug!(
            "flattened {} root node(s) into {} mesh(es)",
            self.roots.len(),
            meshes.len()
        );
        Ok(ModelData {
            name: name.into(),
            meshes,
            images: self.images,
        })
    }

    fn visit(
        &self,
        node: &SceneNode,
        parent: Mat4,
        out: &mut Vec<MeshData>,
    ) -> Result<(), AssetError> {
        let world = parent * node.transform;
        if let Some(mesh_index) = node.mesh {
            let mesh = self.meshes.get(mesh_index).ok_or_else(|| {
                AssetError::invalid_mesh(
                    node.name.clone().unwrap_or_default(),
                    format!("mesh index {mesh_index} out of range ({})", self.meshes.len()),
                )
            })?;
            let mesh_name = mesh
                .name
                .clone()
                .unwrap_or_else(|| format!("mesh_{mesh_index}"));
            for (i, primitive) in mesh.primitives.iter().enumerate() {
                let label = if mesh.primitives.len() > 1 {
                    format!("{mesh_name}.{i}")
                } else {
                    mesh_name.clone()
                };
                if primitive.positions.is_empty() {
                    tracing::warn!("skipping primitive `{label}` with no positions");
                    continue;
                }
                out.push(self.bake(primitive, world, label)?);
            }
        }
        for child in &node.children {
            self.visit(child, world, out)?;
        }
        Ok(())
    }

    fn bake(
        &self,
        primitive: &MeshPrimitive,
        world: Mat4,
        name: String,
    ) -> Result<MeshData, AssetError> {
        let count = primitive.positions.len();
        if let Some(normals) = &primitive.normals {
            if normals.len() != count {
                return Err(AssetError::invalid_mesh(
                    name,
                    format!("{} normals for {count} positions", normals.len()),
                ));
            }
        }
        if let Some(uvs) = &primitive.tex_coords {
            if uvs.len() != count {
                return Err(AssetError::invalid_mesh(
                    name,
                    format!("{} texture coordinates for {count} positions", uvs.len()),
                ));
            }
        }

        let indices = match &primitive.indices {
            Some(indices) => {
                if let Some(bad) = indices.iter().find(|&&i| i as usize >= count) {
                    return Err(AssetError::invalid_mesh(
                        name,
                        format!("vertex index {bad} out of range ({count})"),
                    ));
                }
                indices.clone()
            }
            None => (0..count as u32).collect(),
        };

        let (base_color, texture) = self.resolve_material(primitive.material, &name)?;

        let normal_matrix = world.inverse().transpose();
        let vertices = (0..count)
            .map(|i| {
                let position = world.transform_point3(Vec3::from(primitive.positions[i]));
                let normal = primitive
                    .normals
                    .as_ref()
                    .map(|n| Vec3::from(n[i]))
                    .unwrap_or(Vec3::Y);
                let normal = normal_matrix
                    .transform_vector3(normal)
                    .try_normalize()
                    .unwrap_or(Vec3::Y);
                let uv = primitive
                    .tex_coords
                    .as_ref()
                    .map(|t| t[i])
                    .unwrap_or([0.0, 0.0]);
                Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv,
                }
            })
            .collect();

        Ok(MeshData {
            name,
            vertices,
            indices,
            base_color,
            texture,
        })
    }

    fn resolve_material(
        &self,
        material: Option<usize>,
        mesh: &str,
    ) -> Result<([f32; 4], Option<usize>), AssetError> {
        let Some(index) = material else {
            return Ok(([1.0; 4], None));
        };
        let material = self.materials.get(index).ok_or_else(|| {
            AssetError::invalid_mesh(mesh, format!("material index {index} out of range"))
        })?;
        if let Some(image) = material.base_color_image {
            if image >= self.images.len() {
                return Err(AssetError::invalid_mesh(
                    mesh,
                    format!("image index {image} out of range ({})", self.images.len()),
                ));
            }
        }
        Ok((material.base_color, material.base_color_image))
    }
}
