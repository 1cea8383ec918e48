use std::fmt;

/// A single shader stage, prior to linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// The two buffer bind points the renderer touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data (GL_ARRAY_BUFFER).
    Vertex,
    /// Triangle indices (GL_ELEMENT_ARRAY_BUFFER).
    Index,
}

/// Errors from GPU object allocation.
///
/// This is the fatal tier only: a context that cannot hand out a program or
/// buffer object is unusable. Compile/link failures and missing binding names
/// are NOT errors; they are logged and absorbed (see [`crate::program`] and
/// [`crate::bindings`]).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to allocate a program object")]
    ProgramAlloc,
    #[error("failed to allocate a {0:?} buffer object")]
    BufferAlloc(BufferKind),
}

/// The GLES2-class subset the renderer is written against.
///
/// All renderer logic goes through this trait so it can run against the glow
/// backend in the app and against [`crate::debug::DebugContext`] in tests.
/// Methods take `&self`: the underlying context is single-threaded and
/// interior-mutable, matching how GL itself behaves.
///
/// Sentinel conventions: a name that does not exist in a linked program
/// resolves to `None`, and uploading a uniform to a `None` location is a
/// silent no-op. Neither is an error.
pub trait GlContext {
    type Shader: Copy + PartialEq + fmt::Debug;
    type Program: Copy + PartialEq + fmt::Debug;
    type Buffer: Copy + PartialEq + fmt::Debug;
    type Location: Clone + PartialEq + fmt::Debug;

    // Shader stages
    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    /// Compiles the stage and returns the compile status flag.
    fn compile_shader(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // Programs
    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links the program and returns the link status flag.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Option<Self::Program>);
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::Location>;

    // Buffers
    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, kind: BufferKind, buffer: Option<Self::Buffer>);
    /// Uploads `data` to the buffer currently bound at `kind`, STATIC_DRAW usage.
    fn buffer_data(&self, kind: BufferKind, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    // Uniforms and attributes
    fn uniform_mat4(&self, location: Option<&Self::Location>, value: &[f32; 16]);
    fn uniform_vec3(&self, location: Option<&Self::Location>, value: [f32; 3]);
    fn enable_attrib_array(&self, index: u32);
    fn disable_attrib_array(&self, index: u32);
    /// Describes the attribute at `index` as `size` contiguous f32s per vertex.
    fn attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32);

    // Frame state
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear(&self, r: f32, g: f32, b: f32, a: f32);
    /// Indexed triangle draw: `count` u16 indices starting at `byte_offset`
    /// into the bound index buffer.
    fn draw_elements_u16(&self, count: i32, byte_offset: i32);
}
