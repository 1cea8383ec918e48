//! GLSL ES 2.0 sources for the cube program.
//!
//! The names `a_position`, `u_mvp` and `u_kolor` are load-bearing: binding
//! resolution looks them up verbatim, and a rename silently yields sentinel
//! locations rather than an error.

/// Vertex stage: transform the position by the model-view-projection matrix.
pub const CUBE_VERTEX_SHADER: &str = r#"
attribute vec3 a_position;

uniform mat4 u_mvp;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
"#;

/// Fragment stage: flat constant color.
pub const CUBE_FRAGMENT_SHADER: &str = r#"
precision mediump float;

uniform vec3 u_kolor;

void main() {
    gl_FragColor = vec4(u_kolor, 1.0);
}
"#;

/// Attribute and uniform names shared between the sources above and the
/// binding lookup.
pub const ATTR_POSITION: &str = "a_position";
pub const UNIFORM_MVP: &str = "u_mvp";
pub const UNIFORM_KOLOR: &str = "u_kolor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_declare_the_binding_names() {
        assert!(CUBE_VERTEX_SHADER.contains(ATTR_POSITION));
        assert!(CUBE_VERTEX_SHADER.contains(UNIFORM_MVP));
        assert!(CUBE_FRAGMENT_SHADER.contains(UNIFORM_KOLOR));
    }
}
