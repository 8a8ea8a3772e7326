use bytemuck::{Pod, Zeroable};

/// Instanced, lit sphere shader.
///
/// Vertex buffer 0 is the unit sphere mesh, buffer 1 the per-instance centers.
pub const SPHERE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    light_position: vec4<f32>,
    base_color: vec4<f32>,
    radius: f32,
    ambient: f32,
    light_intensity: f32,
    _padding: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) world_position: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) unit_position: vec3<f32>,
    @location(1) center: vec3<f32>,
) -> VertexOutput {
    let world = center + unit_position * uniforms.radius;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 1.0);
    out.normal = unit_position;
    out.world_position = world;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let to_light = normalize(uniforms.light_position.xyz - in.world_position);
    let diffuse = max(dot(n, to_light), 0.0) * uniforms.light_intensity;
    let shade = min(uniforms.ambient + diffuse, 1.0);
    return vec4<f32>(uniforms.base_color.rgb * shade, 1.0);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub base_color: [f32; 4],
    pub radius: f32,
    pub ambient: f32,
    pub light_intensity: f32,
    pub _padding: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_sphere_shader_validates() {
        validate_wgsl(SPHERE_SHADER).unwrap();
    }

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // mat4 + two vec4 + four scalars
        assert_eq!(std::mem::size_of::<Uniforms>(), 64 + 16 + 16 + 16);
    }
}
