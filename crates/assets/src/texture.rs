use std::path::{Path, PathBuf};

use crate::AssetError;

/// Decoded RGBA8 image ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Decode an image file to RGBA8.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }
        let img = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        tracing::debug!("decoded {} ({width}x{height})", path.display());
        Ok(Self {
            name: file_name(path),
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// A 1x1 image of a single color.
    pub fn solid(name: impl Into<String>, color: [u8; 4]) -> Self {
        Self {
            name: name.into(),
            width: 1,
            height: 1,
            pixels: color.to_vec(),
        }
    }

    pub fn white() -> Self {
        Self::solid("white", [255, 255, 255, 255])
    }

    /// Build from raw pixel data in one of the 8-bit layouts glTF importers
    /// produce. `channels` is 1 (R), 2 (RG), 3 (RGB), or 4 (RGBA).
    pub fn from_channels(
        name: impl Into<String>,
        width: u32,
        height: u32,
        channels: usize,
        data: &[u8],
    ) -> Result<Self, AssetError> {
        let name = name.into();
        let expected = width as usize * height as usize * channels;
        if !(1..=4).contains(&channels) || data.len() != expected {
            return Err(AssetError::UnsupportedImageFormat {
                name,
                format: format!("{channels} channels, {} bytes", data.len()),
            });
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for texel in data.chunks_exact(channels) {
            let rgba = match *texel {
                [r] => [r, r, r, 255],
                [r, g] => [r, r, r, g],
                [r, g, b] => [r, g, b, 255],
                [r, g, b, a] => [r, g, b, a],
                _ => unreachable!("chunk size is 1..=4"),
            };
            pixels.extend_from_slice(&rgba);
        }
        Ok(Self {
            name,
            width,
            height,
            pixels,
        })
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

/// The six faces of a cube map in layer order +X, -X, +Y, -Y, +Z, -Z
/// (right, left, top, bottom, back, front).
#[derive(Debug, Clone)]
pub struct CubeFaces {
    pub size: u32,
    pub faces: [ImageData; 6],
}

impl CubeFaces {
    pub fn open<P: AsRef<Path>>(paths: &[P; 6]) -> Result<Self, AssetError> {
        let faces = [
            ImageData::open(&paths[0])?,
            ImageData::open(&paths[1])?,
            ImageData::open(&paths[2])?,
            ImageData::open(&paths[3])?,
            ImageData::open(&paths[4])?,
            ImageData::open(&paths[5])?,
        ];
        Self::from_faces(faces)
    }

    /// All faces must be square and share one size.
    pub fn from_faces(faces: [ImageData; 6]) -> Result<Self, AssetError> {
        let size = faces[0].width;
        for (face, img) in faces.iter().enumerate() {
            if img.width != size || img.height != size {
                return Err(AssetError::CubeFaceMismatch {
                    face,
                    width: img.width,
                    height: img.height,
                    expected: size,
                });
            }
        }
        Ok(Self { size, faces })
    }

    /// Faces concatenated in layer order, as one upload.
    pub fn layered_pixels(&self) -> Vec<u8> {
        self.faces
            .iter()
            .flat_map(|f| f.pixels.iter().copied())
            .collect()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

pub(crate) fn face_paths(root: &Path, dir: &str, ext: &str) -> [PathBuf; 6] {
    ["right", "left", "top", "bottom", "back", "front"]
        .map(|face| root.join(dir).join(format!("{face}.{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(w, h, image::Rgba(color))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn open_png_decodes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "smoke.png", 4, 2, [10, 20, 30, 40]);
        let img = ImageData::open(&path).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.byte_len(), 4 * 2 * 4);
        assert_eq!(&img.pixels[..4], &[10, 20, 30, 40]);
        assert_eq!(img.name, "smoke.png");
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageData::open(dir.path().join("grass.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("grass.jpg"));
    }

    #[test]
    fn rgb_expands_to_rgba() {
        let img = ImageData::from_channels("rgb", 2, 1, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.pixels, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = ImageData::from_channels("bad", 2, 2, 4, &[0; 3]).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedImageFormat { .. }));
    }

    #[test]
    fn cube_faces_load_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths = face_paths(dir.path(), "", "png");
        for (i, p) in paths.iter().enumerate() {
            let name = p.file_name().unwrap().to_str().unwrap();
            write_png(dir.path(), name, 2, 2, [i as u8, 0, 0, 255]);
        }
        let cube = CubeFaces::open(&paths).unwrap();
        assert_eq!(cube.size, 2);
        let layered = cube.layered_pixels();
        assert_eq!(layered.len(), 6 * 2 * 2 * 4);
        // First texel of each face carries its index in the red channel.
        for face in 0..6 {
            assert_eq!(layered[face * 16], face as u8);
        }
    }

    #[test]
    fn mismatched_face_is_rejected() {
        let good = ImageData::solid("a", [0; 4]);
        let mut faces = std::array::from_fn(|_| good.clone());
        faces[4] = ImageData::from_channels("b", 2, 2, 1, &[0; 4]).unwrap();
        let err = CubeFaces::from_faces(faces).unwrap_err();
        assert!(matches!(err, AssetError::CubeFaceMismatch { face: 4, .. }));
    }
}
