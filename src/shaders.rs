pub const HELLO_VERT: &str = include_str!("gl_shaders/hello_vert.glsl");
pub const HELLO_FRAG: &str = include_str!("gl_shaders/hello_frag.glsl");

pub const SHADED_VERT: &str = include_str!("gl_shaders/shaded_vert.glsl");
pub const SHADED_FRAG: &str = include_str!("gl_shaders/shaded_frag.glsl");

/// Brightness uniform of the shaded fragment shader.
pub const PULSE_UNIFORM: &str = "uPulse";

#[cfg(test)]
mod tests {
    use super::*;
    use gl_wrapper::shader::ShaderSource;

    #[test]
    fn sources_are_accepted() {
        for src in [HELLO_VERT, SHADED_VERT] {
            assert!(ShaderSource::vertex(src).is_ok());
        }
        for src in [HELLO_FRAG, SHADED_FRAG] {
            assert!(ShaderSource::fragment(src).is_ok());
        }
    }

    #[test]
    fn shaded_stages_agree() {
        assert!(SHADED_VERT.contains("out vec3 ourColor;"));
        assert!(SHADED_FRAG.contains("in vec3 ourColor;"));
        assert!(SHADED_FRAG.contains(&format!("uniform float {PULSE_UNIFORM};")));
    }
}
