use homestead_assets::{MeshData, Vertex};

fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// Unit cube centered on the origin, four vertices per face.
pub fn cube_mesh() -> MeshData {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v([-p, -p,  p], [0.0, 0.0, 1.0], [0.0, 1.0]),
        v([ p, -p,  p], [0.0, 0.0, 1.0], [1.0, 1.0]),
        v([ p,  p,  p], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([-p,  p,  p], [0.0, 0.0, 1.0], [0.0, 0.0]),
        // -Z face
        v([ p, -p, -p], [0.0, 0.0, -1.0], [0.0, 1.0]),
        v([-p, -p, -p], [0.0, 0.0, -1.0], [1.0, 1.0]),
        v([-p,  p, -p], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([ p,  p, -p], [0.0, 0.0, -1.0], [0.0, 0.0]),
        // +X face
        v([ p, -p,  p], [1.0, 0.0, 0.0], [0.0, 1.0]),
        v([ p, -p, -p], [1.0, 0.0, 0.0], [1.0, 1.0]),
        v([ p,  p, -p], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([ p,  p,  p], [1.0, 0.0, 0.0], [0.0, 0.0]),
        // -X face
        v([-p, -p, -p], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        v([-p, -p,  p], [-1.0, 0.0, 0.0], [1.0, 1.0]),
        v([-p,  p,  p], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([-p,  p, -p], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        // +Y face
        v([-p,  p,  p], [0.0, 1.0, 0.0], [0.0, 1.0]),
        v([ p,  p,  p], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([ p,  p, -p], [0.0, 1.0, 0.0], [1.0, 0.0]),
        v([-p,  p, -p], [0.0, 1.0, 0.0], [0.0, 0.0]),
        // -Y face
        v([-p, -p, -p], [0.0, -1.0, 0.0], [0.0, 1.0]),
        v([ p, -p, -p], [0.0, -1.0, 0.0], [1.0, 1.0]),
        v([ p, -p,  p], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([-p, -p,  p], [0.0, -1.0, 0.0], [0.0, 0.0]),
    ];
    let indices = (0..6u32)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    MeshData {
        name: "cube".into(),
        vertices,
        indices,
        base_color: [1.0; 4],
        texture: None,
    }
}

/// Unit quad in the XY plane facing -Z.
///
/// Placed with a 90 degree turn about X it becomes a ground plane facing up.
pub fn land_mesh() -> MeshData {
    let p = 0.5_f32;
    let n = [0.0, 0.0, -1.0];
    #[rustfmt::skip]
    let vertices = vec![
        v([-p, -p, 0.0], n, [0.0, 0.0]),
        v([ p, -p, 0.0], n, [1.0, 0.0]),
        v([ p,  p, 0.0], n, [1.0, 1.0]),
        v([-p,  p, 0.0], n, [0.0, 1.0]),
    ];
    MeshData {
        name: "land".into(),
        vertices,
        indices: vec![0, 1, 2, 2, 3, 0],
        base_color: [1.0; 4],
        texture: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    #[test]
    fn cube_has_six_faces() {
        let cube = cube_mesh();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn cube_normals_point_outward() {
        for vertex in cube_mesh().vertices {
            let p = Vec3::from(vertex.position);
            let n = Vec3::from(vertex.normal);
            assert!(p.dot(n) > 0.0);
        }
    }

    #[test]
    fn land_faces_up_once_laid_down() {
        let land = land_mesh();
        let laid = Mat4::from_axis_angle(Vec3::X, 90.0_f32.to_radians());
        let normal = laid.transform_vector3(Vec3::from(land.vertices[0].normal));
        assert!((normal - Vec3::Y).length() < 1e-5);
        for vertex in &land.vertices {
            let p = laid.transform_point3(Vec3::from(vertex.position));
            assert!(p.y.abs() < 1e-6);
        }
    }
}
