use std::path::Path;

use glam::Mat4;
use gltf::image::Format;
use gltf::mesh::Mode;

use crate::model::{
    ImportedMaterial, ImportedMesh, ImportedScene, MeshPrimitive, ModelData, SceneNode,
};
use crate::{AssetError, ImageData};

/// Import a `.gltf`/`.glb` file and flatten it into drawable meshes.
///
/// External buffers and images are resolved relative to the file, so a model
/// directory can be moved as a unit.
pub fn import_model(path: impl AsRef<Path>) -> Result<ModelData, AssetError> {
    let path = path.as_ref();
    let scene = import_scene(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model")
        .to_string();
    let model = scene.flatten(name)?;
    tracing::info!(
        "loaded model {} ({} meshes, {} vertices, {} textures)",
        path.display(),
        model.meshes.len(),
        model.vertex_count(),
        model.images.len()
    );
    Ok(model)
}

/// Import the hierarchy without flattening it.
pub fn import_scene(path: impl AsRef<Path>) -> Result<ImportedScene, AssetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ));
    }
    let (document, buffers, images) = gltf::import(path).map_err(|source| AssetError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    let roots = match scene {
        Some(scene) => scene.nodes().map(|n| read_node(&n)).collect(),
        None => {
            tracing::warn!("{} has no scenes", path.display());
            Vec::new()
        }
    };

    let meshes = document
        .meshes()
        .map(|mesh| {
            let primitives = mesh
                .primitives()
                .filter_map(|primitive| {
                    if primitive.mode() != Mode::Triangles {
                        tracing::warn!(
                            "skipping {:?} primitive in mesh {:?}",
                            primitive.mode(),
                            mesh.name()
                        );
                        return None;
                    }
                    let reader = primitive
                        .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
                    Some(MeshPrimitive {
                        positions: reader
                            .read_positions()
                            .map(|p| p.collect())
                            .unwrap_or_default(),
                        normals: reader.read_normals().map(|n| n.collect()),
                        tex_coords: reader.read_tex_coords(0).map(|t| t.into_f32().collect()),
                        indices: reader.read_indices().map(|i| i.into_u32().collect()),
                        material: primitive.material().index(),
                    })
                })
                .collect();
            ImportedMesh {
                name: mesh.name().map(String::from),
                primitives,
            }
        })
        .collect();

    let materials = document
        .materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            ImportedMaterial {
                name: material.name().map(String::from),
                base_color: pbr.base_color_factor(),
                base_color_image: pbr
                    .base_color_texture()
                    .map(|info| info.texture().source().index()),
            }
        })
        .collect();

    let images = document
        .images()
        .zip(images)
        .map(|(info, data)| {
            let name = info
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("image_{}", info.index()));
            convert_image(name, data)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImportedScene {
        roots,
        meshes,
        materials,
        images,
    })
}

fn read_node(node: &gltf::Node<'_>) -> SceneNode {
    SceneNode {
        name: node.name().map(String::from),
        transform: Mat4::from_cols_array_2d(&node.transform().matrix()),
        mesh: node.mesh().map(|m| m.index()),
        children: node.children().map(|c| read_node(&c)).collect(),
    }
}

fn convert_image(name: String, data: gltf::image::Data) -> Result<ImageData, AssetError> {
    let channels = match data.format {
        Format::R8 => 1,
        Format::R8G8 => 2,
        Format::R8G8B8 => 3,
        Format::R8G8B8A8 => 4,
        other => {
            return Err(AssetError::UnsupportedImageFormat {
                name,
                format: format!("{other:?}"),
            });
        }
    };
    ImageData::from_channels(name, data.width, data.height, channels, &data.pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    // One triangle: positions (0,0,0), (1,0,0), (0,1,0) as little-endian f32,
    // followed by u16 indices 0, 1, 2 and two bytes of padding.
    const TRIANGLE_BUFFER: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA=";

    fn triangle_gltf() -> String {
        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [
    {{ "name": "yard", "translation": [10.0, 0.0, 0.0], "children": [1, 2] }},
    {{ "name": "post_a", "mesh": 0 }},
    {{ "name": "post_b", "mesh": 0, "translation": [0.0, 0.0, 5.0] }}
  ],
  "meshes": [{{
    "name": "post",
    "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1, "material": 0 }}]
  }}],
  "materials": [{{
    "name": "white_paint",
    "pbrMetallicRoughness": {{ "baseColorFactor": [0.9, 0.9, 0.8, 1.0] }}
  }}],
  "buffers": [{{
    "byteLength": 44,
    "uri": "data:application/octet-stream;base64,{TRIANGLE_BUFFER}"
  }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
        )
    }

    fn write_model(dir: &Path) -> std::path::PathBuf {
        write_gltf(dir, "fence.gltf", &triangle_gltf())
    }

    fn write_gltf(dir: &Path, file: &str, json: &str) -> std::path::PathBuf {
        let path = dir.join(file);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn import_reads_hierarchy() {
        let dir = tempfile::tempdir().unwrap();
        let scene = import_scene(write_model(dir.path())).unwrap();

        assert_eq!(scene.roots.len(), 1);
        assert_eq!(scene.roots[0].children.len(), 2);
        assert_eq!(scene.roots[0].name.as_deref(), Some("yard"));
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.meshes[0].primitives[0].indices, Some(vec![0, 1, 2]));
        assert!(scene.meshes[0].primitives[0].normals.is_none());
    }

    #[test]
    fn import_model_flattens_every_instance() {
        let dir = tempfile::tempdir().unwrap();
        let model = import_model(write_model(dir.path())).unwrap();

        assert_eq!(model.name, "fence");
        assert_eq!(model.meshes.len(), 2);
        assert_eq!(model.index_count(), 6);
        assert_eq!(model.meshes[0].vertices[1].position, [11.0, 0.0, 0.0]);
        assert_eq!(model.meshes[1].vertices[2].position, [10.0, 1.0, 5.0]);
        assert_eq!(model.meshes[0].base_color, [0.9, 0.9, 0.8, 1.0]);
        assert!(model.images.is_empty());
    }

    #[test]
    fn line_primitives_are_skipped() {
        let triangles = r#"{ "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }"#;
        let lines = r#"{ "attributes": { "POSITION": 0 }, "mode": 1 }"#;
        let json = triangle_gltf().replace(triangles, &format!("{triangles}, {lines}"));
        assert!(json.contains(r#""mode": 1"#));

        let dir = tempfile::tempdir().unwrap();
        let path = write_gltf(dir.path(), "wire.gltf", &json);
        let scene = import_scene(&path).unwrap();
        assert_eq!(scene.meshes[0].primitives.len(), 1);

        let model = import_model(&path).unwrap();
        // one triangle primitive under each of the two instancing nodes
        assert_eq!(model.meshes.len(), 2);
        assert_eq!(model.index_count(), 6);
    }

    #[test]
    fn first_scene_is_used_without_default() {
        let json = triangle_gltf().replace("\n  \"scene\": 0,", "");
        assert!(!json.contains(r#""scene":"#));

        let dir = tempfile::tempdir().unwrap();
        let scene = import_scene(write_gltf(dir.path(), "yard.gltf", &json)).unwrap();
        assert_eq!(scene.roots.len(), 1);
        assert_eq!(scene.roots[0].name.as_deref(), Some("yard"));
    }

    #[test]
    fn sixteen_bit_images_are_rejected() {
        let data = gltf::image::Data {
            pixels: vec![0; 8],
            format: Format::R16G16B16A16,
            width: 1,
            height: 1,
        };
        let err = convert_image("bark".into(), data).unwrap_err();
        match err {
            AssetError::UnsupportedImageFormat { name, format } => {
                assert_eq!(name, "bark");
                assert_eq!(format, "R16G16B16A16");
            }
            other => panic!("expected UnsupportedImageFormat, got {other:?}"),
        }
    }

    #[test]
    fn rgba_images_convert() {
        let data = gltf::image::Data {
            pixels: vec![10, 20, 30, 255],
            format: Format::R8G8B8A8,
            width: 1,
            height: 1,
        };
        let image = convert_image("leaf".into(), data).unwrap();
        assert_eq!((image.width, image.height), (1, 1));
        assert_eq!(image.pixels, vec![10, 20, 30, 255]);
    }

    #[test]
    fn missing_model_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_model(dir.path().join("farmhouse.gltf")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn malformed_model_is_gltf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gltf");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(import_model(&path), Err(AssetError::Gltf { .. })));
    }
}
