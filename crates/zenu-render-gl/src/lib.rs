//! glow-backed implementation of the renderer's GL context trait.
//!
//! Thin translation layer: every method forwards to the corresponding GLES2
//! entry point. All GL calls are unsafe at the glow boundary; safety rests on
//! the single-threaded ownership model: the context is created on the event
//! loop thread and never leaves it.

use glow::HasContext;
use tracing::debug;
use zenu_render::{BufferKind, GlContext, ShaderStage};

/// Owns a live glow context with a current GL context behind it.
pub struct GlowContext {
    gl: glow::Context,
}

impl GlowContext {
    /// Wraps an already-current glow context.
    pub fn new(gl: glow::Context) -> Self {
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        debug!(version = %version, "GL context wrapped");
        Self { gl }
    }
}

fn stage_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn buffer_target(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Vertex => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl GlContext for GlowContext {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type Location = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<glow::Shader> {
        unsafe { self.gl.create_shader(stage_kind(stage)).ok() }
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: glow::Shader) -> bool {
        unsafe {
            self.gl.compile_shader(shader);
            self.gl.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Option<glow::Program> {
        unsafe { self.gl.create_program().ok() }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) -> bool {
        unsafe {
            self.gl.link_program(program);
            self.gl.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn attrib_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn create_buffer(&self) -> Option<glow::Buffer> {
        unsafe { self.gl.create_buffer().ok() }
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<glow::Buffer>) {
        unsafe { self.gl.bind_buffer(buffer_target(kind), buffer) }
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(kind), data, glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn uniform_mat4(&self, location: Option<&glow::UniformLocation>, value: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(location, false, value) }
    }

    fn uniform_vec3(&self, location: Option<&glow::UniformLocation>, value: [f32; 3]) {
        unsafe { self.gl.uniform_3_f32(location, value[0], value[1], value[2]) }
    }

    fn enable_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_attrib_array(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, glow::FLOAT, false, stride, offset)
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn draw_elements_u16(&self, count: i32, byte_offset: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_SHORT, byte_offset)
        }
    }
}
