//! GPU mesh upload: one vertex buffer, one index buffer, a recorded stride.

use std::rc::Rc;

use crate::context::{BufferKind, GlContext, RenderError};

/// GPU-resident mesh. Releases both buffers exactly once on drop.
pub struct Mesh<G: GlContext> {
    gl: Rc<G>,
    vertex_buffer: G::Buffer,
    index_buffer: G::Buffer,
    stride: i32,
}

impl<G: GlContext> Mesh<G> {
    /// Uploads vertex and index bytes into fresh STATIC_DRAW buffers.
    ///
    /// `stride` is recorded verbatim; the uploader does not check that it
    /// divides `vertex_data.len()`. Both bind points are left cleared.
    pub fn upload(
        gl: &Rc<G>,
        vertex_data: &[u8],
        index_data: &[u8],
        stride: i32,
    ) -> Result<Self, RenderError> {
        let vertex_buffer = gl
            .create_buffer()
            .ok_or(RenderError::BufferAlloc(BufferKind::Vertex))?;
        gl.bind_buffer(BufferKind::Vertex, Some(vertex_buffer));
        gl.buffer_data(BufferKind::Vertex, vertex_data);
        gl.bind_buffer(BufferKind::Vertex, None);

        let index_buffer = match gl.create_buffer() {
            Some(buffer) => buffer,
            None => {
                gl.delete_buffer(vertex_buffer);
                return Err(RenderError::BufferAlloc(BufferKind::Index));
            }
        };
        gl.bind_buffer(BufferKind::Index, Some(index_buffer));
        gl.buffer_data(BufferKind::Index, index_data);
        gl.bind_buffer(BufferKind::Index, None);

        Ok(Self {
            gl: gl.clone(),
            vertex_buffer,
            index_buffer,
            stride,
        })
    }

    pub fn vertex_buffer(&self) -> G::Buffer {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> G::Buffer {
        self.index_buffer
    }

    /// Bytes between consecutive vertex records.
    pub fn stride(&self) -> i32 {
        self.stride
    }
}

impl<G: GlContext> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vertex_buffer);
        self.gl.delete_buffer(self.index_buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugContext;
    use crate::geometry::{CUBE_INDICES, CUBE_VERTICES, VERTEX_STRIDE};

    fn upload_cube(gl: &Rc<DebugContext>) -> Mesh<DebugContext> {
        Mesh::upload(
            gl,
            bytemuck::cast_slice(&CUBE_VERTICES),
            bytemuck::cast_slice(&CUBE_INDICES),
            VERTEX_STRIDE,
        )
        .unwrap()
    }

    #[test]
    fn cube_upload_round_trip() {
        let gl = Rc::new(DebugContext::new());
        let mesh = upload_cube(&gl);
        assert_eq!(gl.buffer_len(mesh.vertex_buffer()), Some(24 * 3 * 4));
        assert_eq!(gl.buffer_len(mesh.index_buffer()), Some(36 * 2));
        assert_eq!(mesh.stride(), 12);
    }

    #[test]
    fn stride_recorded_verbatim() {
        let gl = Rc::new(DebugContext::new());
        let mesh = Mesh::upload(&gl, &[0u8; 16], &[0u8; 4], 99).unwrap();
        assert_eq!(mesh.stride(), 99);
    }

    #[test]
    fn drop_releases_both_buffers() {
        let gl = Rc::new(DebugContext::new());
        let mesh = upload_cube(&gl);
        assert_eq!(gl.live_buffer_count(), 2);
        drop(mesh);
        assert_eq!(gl.live_buffer_count(), 0);
    }
}
