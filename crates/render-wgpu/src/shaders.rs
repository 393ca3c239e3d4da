/// WGSL shader for instanced spheres (orbs and particles).
///
/// Shading is ambient plus one point light, with the instance emissive
/// added after. Unlit instances put their whole color in the emissive slot
/// and leave the base color black.
pub const SPHERE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    light_pos: vec4<f32>,
    ambient: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) emissive: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) emissive: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    out.emissive = instance.emissive;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(uniforms.light_pos.xyz - in.world_pos);
    let diffuse = max(dot(in.world_normal, light_dir), 0.0);
    let lit = in.color.rgb * (uniforms.ambient.x + diffuse) + in.emissive.rgb;
    return vec4<f32>(lit, in.color.a);
}
"#;

/// WGSL shader for the procedural gradient background.
///
/// A fullscreen triangle generated from the vertex index; no vertex buffers
/// are bound. Depth writes stay off so the spheres always draw over it.
pub const BACKGROUND_SHADER: &str = r#"
struct BackgroundOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_background(@builtin(vertex_index) index: u32) -> BackgroundOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BackgroundOutput;
    out.clip_position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_background(in: BackgroundOutput) -> @location(0) vec4<f32> {
    let bottom = vec3<f32>(0.16, 0.09, 0.22);
    let top = vec3<f32>(0.02, 0.03, 0.08);
    let t = clamp(in.uv.y, 0.0, 1.0);
    return vec4<f32>(mix(bottom, top, t), 1.0);
}
"#;
