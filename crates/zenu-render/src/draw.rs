//! The indexed draw call.

use glam::Mat4;

use crate::bindings::BindingTable;
use crate::context::{BufferKind, GlContext};
use crate::mesh::Mesh;

/// Inclusive index sub-range rendered by one draw call.
///
/// Invariant: `0 <= start <= end < index element count` of the mesh being
/// drawn. Indices are 16-bit, so the GPU-side byte offset is `start * 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub start: u32,
    pub end: u32,
}

impl DrawRange {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of indices the draw covers.
    pub fn index_count(self) -> i32 {
        (self.end - self.start + 1) as i32
    }

    /// Byte offset of the first index in the bound index buffer.
    pub fn byte_offset(self) -> i32 {
        (self.start * std::mem::size_of::<u16>() as u32) as i32
    }
}

/// Everything recomputed per frame: the MVP matrix and the flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub mvp: Mat4,
    pub color: [f32; 3],
}

/// Binds program, uniforms and mesh buffers, then issues one indexed draw.
///
/// Each step is a precondition for the next; uniform uploads to sentinel
/// (`None`) locations are silently ignored. On return every bind point this
/// function touched is cleared again, so callers never have to unbind and
/// the next draw starts from clean global state. Never raises; a broken program
/// shows up as a blank or garbled frame.
pub fn draw<G: GlContext>(
    gl: &G,
    bindings: &BindingTable<G>,
    mesh: &Mesh<G>,
    range: DrawRange,
    uniforms: &FrameUniforms,
) {
    gl.use_program(Some(bindings.program));

    gl.uniform_mat4(bindings.mvp.as_ref(), &uniforms.mvp.to_cols_array());
    gl.uniform_vec3(bindings.kolor.as_ref(), uniforms.color);

    gl.bind_buffer(BufferKind::Vertex, Some(mesh.vertex_buffer()));
    if let Some(position) = bindings.position {
        gl.enable_attrib_array(position);
        gl.attrib_pointer_f32(position, 3, mesh.stride(), 0);
    }

    gl.bind_buffer(BufferKind::Index, Some(mesh.index_buffer()));
    gl.draw_elements_u16(range.index_count(), range.byte_offset());

    gl.bind_buffer(BufferKind::Index, None);
    if let Some(position) = bindings.position {
        gl.disable_attrib_array(position);
    }
    gl.bind_buffer(BufferKind::Vertex, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{DebugContext, GlCall};
    use crate::geometry::{CUBE_INDICES, CUBE_VERTICES, VERTEX_STRIDE};
    use crate::program::compile;
    use crate::shaders::{CUBE_FRAGMENT_SHADER, CUBE_VERTEX_SHADER, UNIFORM_KOLOR};
    use std::rc::Rc;

    #[test]
    fn range_arithmetic() {
        for (start, end, count, offset) in
            [(0u32, 35u32, 36, 0), (0, 0, 1, 0), (6, 11, 6, 12), (30, 35, 6, 60)]
        {
            let range = DrawRange::new(start, end);
            assert_eq!(range.index_count(), count);
            assert_eq!(range.byte_offset(), offset);
        }
    }

    fn scene(gl: &Rc<DebugContext>) -> (BindingTable<DebugContext>, Mesh<DebugContext>) {
        let compiled = compile(gl, CUBE_VERTEX_SHADER, CUBE_FRAGMENT_SHADER).unwrap();
        let bindings = BindingTable::resolve(gl.as_ref(), &compiled.program);
        let mesh = Mesh::upload(
            gl,
            bytemuck::cast_slice(&CUBE_VERTICES),
            bytemuck::cast_slice(&CUBE_INDICES),
            VERTEX_STRIDE,
        )
        .unwrap();
        // The program handle may drop here; the recorded id in the table is
        // all the draw path reads.
        (bindings, mesh)
    }

    fn uniforms() -> FrameUniforms {
        FrameUniforms { mvp: Mat4::IDENTITY, color: [1.0, 0.5, 0.2] }
    }

    #[test]
    fn issues_one_indexed_draw_with_range_geometry() {
        let gl = Rc::new(DebugContext::new());
        let (bindings, mesh) = scene(&gl);
        gl.clear_calls();

        draw(gl.as_ref(), &bindings, &mesh, DrawRange::new(6, 11), &uniforms());

        let draws: Vec<_> = gl
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::DrawElements { .. }))
            .collect();
        assert_eq!(draws, vec![GlCall::DrawElements { count: 6, byte_offset: 12 }]);
    }

    #[test]
    fn leaves_bind_state_clean() {
        let gl = Rc::new(DebugContext::new());
        let (bindings, mesh) = scene(&gl);
        gl.clear_calls();

        draw(gl.as_ref(), &bindings, &mesh, DrawRange::new(0, 35), &uniforms());

        let calls = gl.calls();
        let tail = &calls[calls.len() - 3..];
        assert_eq!(
            tail,
            &[
                GlCall::BindBuffer { kind: BufferKind::Index, buffer: None },
                GlCall::DisableAttrib(0),
                GlCall::BindBuffer { kind: BufferKind::Vertex, buffer: None },
            ]
        );
    }

    #[test]
    fn missing_kolor_location_is_a_silent_no_op() {
        let gl = Rc::new(DebugContext::new());
        gl.remove_name(UNIFORM_KOLOR);
        let (bindings, mesh) = scene(&gl);
        gl.clear_calls();

        draw(gl.as_ref(), &bindings, &mesh, DrawRange::new(0, 35), &uniforms());

        assert!(gl.calls().contains(&GlCall::UniformVec3 {
            location: None,
            value: [1.0, 0.5, 0.2],
        }));
        assert!(gl.calls().contains(&GlCall::DrawElements { count: 36, byte_offset: 0 }));
    }
}
