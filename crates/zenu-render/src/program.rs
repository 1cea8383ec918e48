//! Shader compilation and program linking.
//!
//! # Invariants
//! - Stage objects never outlive [`compile`]: a scope guard deletes each one
//!   on every exit path, link success or not.
//! - Compile and link failures are absorbed: the driver info log is emitted
//!   through `tracing::error!`, recorded as a [`Diagnostic`], and the (then
//!   non-functional) program handle is still returned. Callers observe a
//!   garbled frame, not an error.

use std::rc::Rc;

use tracing::error;

use crate::context::{GlContext, RenderError, ShaderStage};

/// A compile or link failure, with the driver-supplied info log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("vertex shader failed to compile: {0}")]
    VertexCompile(String),
    #[error("fragment shader failed to compile: {0}")]
    FragmentCompile(String),
    #[error("program failed to link: {0}")]
    Link(String),
}

/// A linked, executable shader program. Deletes the GPU object on drop.
pub struct Program<G: GlContext> {
    gl: Rc<G>,
    raw: G::Program,
}

impl<G: GlContext> Program<G> {
    /// The underlying GPU handle, for binding and location lookups.
    pub fn raw(&self) -> G::Program {
        self.raw
    }
}

impl<G: GlContext> Drop for Program<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.raw);
    }
}

/// Result of [`compile`]: the program plus whatever went wrong on the way.
///
/// An empty `diagnostics` list means both stages compiled and the link
/// succeeded.
pub struct CompiledProgram<G: GlContext> {
    pub program: Program<G>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Deletes a stage object when the enclosing scope exits.
struct StageGuard<'a, G: GlContext> {
    gl: &'a G,
    shader: G::Shader,
}

impl<G: GlContext> Drop for StageGuard<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.shader);
    }
}

/// Compiles one stage. A failed compile yields `None` for the stage object
/// (it is deleted immediately) plus a diagnostic; the later link then fails
/// on the missing stage.
fn compile_stage<'a, G: GlContext>(
    gl: &'a G,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<StageGuard<'a, G>> {
    let shader = gl.create_shader(stage)?;
    let guard = StageGuard { gl, shader };

    gl.shader_source(shader, source);
    if gl.compile_shader(shader) {
        return Some(guard);
    }

    let log = gl.shader_info_log(shader);
    let diagnostic = match stage {
        ShaderStage::Vertex => Diagnostic::VertexCompile(log),
        ShaderStage::Fragment => Diagnostic::FragmentCompile(log),
    };
    error!("{diagnostic}");
    diagnostics.push(diagnostic);
    None
}

/// Compiles both stages and links them into one program.
///
/// Only program-object allocation can fail with an `Err`; every shader
/// pipeline failure comes back as a diagnostic alongside the handle.
pub fn compile<G: GlContext>(
    gl: &Rc<G>,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<CompiledProgram<G>, RenderError> {
    let mut diagnostics = Vec::new();

    let vertex = compile_stage(gl.as_ref(), ShaderStage::Vertex, vertex_src, &mut diagnostics);
    let fragment =
        compile_stage(gl.as_ref(), ShaderStage::Fragment, fragment_src, &mut diagnostics);

    let raw = gl.create_program().ok_or(RenderError::ProgramAlloc)?;
    let program = Program { gl: gl.clone(), raw };

    for stage in [&vertex, &fragment].into_iter().flatten() {
        gl.attach_shader(raw, stage.shader);
    }

    if !gl.link_program(raw) {
        let diagnostic = Diagnostic::Link(gl.program_info_log(raw));
        error!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    for stage in [&vertex, &fragment].into_iter().flatten() {
        gl.detach_shader(raw, stage.shader);
    }
    // Stage guards fall out of scope here and delete both stage objects.

    Ok(CompiledProgram { program, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugContext;
    use crate::shaders::{CUBE_FRAGMENT_SHADER, CUBE_VERTEX_SHADER};

    fn ctx() -> Rc<DebugContext> {
        Rc::new(DebugContext::new())
    }

    #[test]
    fn clean_compile_has_no_diagnostics() {
        let gl = ctx();
        let compiled = compile(&gl, CUBE_VERTEX_SHADER, CUBE_FRAGMENT_SHADER).unwrap();
        assert!(compiled.diagnostics.is_empty());
        assert_eq!(gl.live_shader_count(), 0);
        assert_eq!(gl.live_program_count(), 1);
    }

    #[test]
    fn compile_failure_returns_handle_and_diagnostics() {
        let gl = ctx();
        gl.fail_compile(ShaderStage::Fragment, "0:4: 'kolor' : syntax error");

        let compiled = compile(&gl, CUBE_VERTEX_SHADER, "garbage").unwrap();

        // Stage failure plus the link failure it causes, both non-empty.
        assert_eq!(compiled.diagnostics.len(), 2);
        assert!(matches!(compiled.diagnostics[0], Diagnostic::FragmentCompile(ref log) if !log.is_empty()));
        assert!(matches!(compiled.diagnostics[1], Diagnostic::Link(_)));
        assert_eq!(gl.live_program_count(), 1);
    }

    #[test]
    fn stage_objects_freed_even_when_link_fails() {
        let gl = ctx();
        gl.fail_link("attribute mismatch");

        let compiled = compile(&gl, CUBE_VERTEX_SHADER, CUBE_FRAGMENT_SHADER).unwrap();

        assert!(matches!(compiled.diagnostics[..], [Diagnostic::Link(_)]));
        assert_eq!(gl.live_shader_count(), 0);
    }

    #[test]
    fn program_deleted_exactly_once_on_drop() {
        let gl = ctx();
        let compiled = compile(&gl, CUBE_VERTEX_SHADER, CUBE_FRAGMENT_SHADER).unwrap();
        drop(compiled);
        assert_eq!(gl.live_program_count(), 0);
    }
}
