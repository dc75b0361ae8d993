/// Bindings shared by every pipeline: group 0 holds per-frame globals, group
/// 1 the per-draw object block (dynamic offset).
const COMMON: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    view_pos: vec4<f32>,
    // xyz: direction the light travels, w: day alpha
    light_direction: vec4<f32>,
    // rgb: color, w: ambient strength
    light_color: vec4<f32>,
    // x: diffuse, y: specular, z: shininess
    light_terms: vec4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
};

struct DrawObject {
    model: mat4x4<f32>,
    normal: mat4x4<f32>,
    tint: vec4<f32>,
    // x: emissive blend (0 lit, 1 unlit)
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> u_globals: Globals;

@group(1) @binding(0)
var<uniform> u_object: DrawObject;
"#;

/// Textured Blinn-Phong lit by the sun.
const MESH: &str = r#"
const ALPHA_CUTOFF: f32 = 0.1;

struct Material {
    base_color: vec4<f32>,
    // x: texture coordinate scale
    params: vec4<f32>,
};

@group(2) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(2) @binding(1)
var s_diffuse: sampler;
@group(2) @binding(2)
var<uniform> u_material: Material;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = u_object.model * vec4<f32>(vertex.position, 1.0);
    var out: VertexOutput;
    out.clip_position = u_globals.view_proj * world;
    out.world_pos = world.xyz;
    out.world_normal = (u_object.normal * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv * u_material.params.x;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(t_diffuse, s_diffuse, in.uv);
    let albedo = texel * u_material.base_color * u_object.tint;
    // Cutout foliage and fence gaps.
    if albedo.a < ALPHA_CUTOFF {
        discard;
    }
    let day = u_globals.light_direction.w;
    let n = normalize(in.world_normal);
    let l = normalize(-u_globals.light_direction.xyz);
    let v = normalize(u_globals.view_pos.xyz - in.world_pos);
    let h = normalize(l + v);

    let ambient = u_globals.light_color.w * (0.25 + 0.75 * day);
    let diffuse = u_globals.light_terms.x * max(dot(n, l), 0.0) * day;
    let specular = u_globals.light_terms.y * pow(max(dot(n, h), 0.0), u_globals.light_terms.z) * day;
    let lit = u_globals.light_color.rgb * ((ambient + diffuse) * albedo.rgb + vec3<f32>(specular));

    let color = mix(lit, albedo.rgb, u_object.params.x);
    return vec4<f32>(color, albedo.a);
}
"#;

/// Cube-mapped box; the tint alpha fades it for the day/night blend.
const SKYBOX: &str = r#"
@group(2) @binding(0)
var t_sky: texture_cube<f32>;
@group(2) @binding(1)
var s_sky: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = u_globals.view_proj * u_object.model * vec4<f32>(vertex.position, 1.0);
    out.direction = vertex.position;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sky = textureSample(t_sky, s_sky, normalize(in.direction));
    return vec4<f32>(sky.rgb * u_object.tint.rgb, u_object.tint.a);
}
"#;

/// Camera-facing textured quads, one instance per particle.
const PARTICLE: &str = r#"
struct Material {
    base_color: vec4<f32>,
    params: vec4<f32>,
};

@group(2) @binding(0)
var t_sprite: texture_2d<f32>;
@group(2) @binding(1)
var s_sprite: sampler;
@group(2) @binding(2)
var<uniform> u_material: Material;

struct ParticleInput {
    @location(0) corner: vec2<f32>,
    @location(1) center: vec3<f32>,
    @location(2) size: f32,
    @location(3) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(particle: ParticleInput) -> VertexOutput {
    let center = (u_object.model * vec4<f32>(particle.center, 1.0)).xyz;
    let offset = u_globals.camera_right.xyz * particle.corner.x
        + u_globals.camera_up.xyz * particle.corner.y;
    var out: VertexOutput;
    out.clip_position = u_globals.view_proj * vec4<f32>(center + offset * particle.size, 1.0);
    out.uv = vec2<f32>(particle.corner.x + 0.5, 0.5 - particle.corner.y);
    out.color = particle.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sprite = textureSample(t_sprite, s_sprite, in.uv);
    return sprite * in.color * u_material.base_color * u_object.tint;
}
"#;

pub fn mesh_source() -> String {
    format!("{COMMON}{MESH}")
}

pub fn skybox_source() -> String {
    format!("{COMMON}{SKYBOX}")
}

pub fn particle_source() -> String {
    format!("{COMMON}{PARTICLE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_source_has_both_stages() {
        for src in [mesh_source(), skybox_source(), particle_source()] {
            assert!(src.contains("fn vs_main"));
            assert!(src.contains("fn fs_main"));
            assert!(src.contains("var<uniform> u_globals"));
        }
    }

    #[test]
    fn mesh_discards_cutout_texels() {
        let src = mesh_source();
        assert!(src.contains("const ALPHA_CUTOFF: f32 = 0.1;"));
        assert!(src.contains("if albedo.a < ALPHA_CUTOFF {\n        discard;"));
        assert!(!skybox_source().contains("discard"));
    }
}
