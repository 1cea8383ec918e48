//! Call-recording GL context.
//!
//! Stand-in for a real GL backend, in the same spirit as a debug renderer:
//! every call is recorded, object ids are synthetic, and failure modes
//! (compile errors, missing uniforms) can be injected. Tests drive the entire
//! pipeline (compile, resolve, upload, draw) against this type.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::context::{BufferKind, GlContext, ShaderStage};

/// One recorded GL call. Only the calls tests inspect carry payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    UseProgram(Option<u32>),
    BindBuffer { kind: BufferKind, buffer: Option<u32> },
    BufferData { kind: BufferKind, len: usize },
    UniformMat4 { location: Option<u32>, value: [f32; 16] },
    UniformVec3 { location: Option<u32>, value: [f32; 3] },
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer { index: u32, size: i32, stride: i32, offset: i32 },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    Clear { r: f32, g: f32, b: f32, a: f32 },
    DrawElements { count: i32, byte_offset: i32 },
}

#[derive(Default)]
struct State {
    next_id: u32,
    calls: Vec<GlCall>,
    live_shaders: HashSet<u32>,
    live_programs: HashSet<u32>,
    live_buffers: HashSet<u32>,
    shader_stage: HashMap<u32, ShaderStage>,
    bound: HashMap<BufferKind, u32>,
    buffer_len: HashMap<u32, usize>,
    uniform_ids: HashMap<String, u32>,
    fail_compile: HashMap<ShaderStage, String>,
    fail_link: Option<String>,
    missing_names: HashSet<String>,
}

impl State {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Recording implementation of [`GlContext`].
pub struct DebugContext {
    state: RefCell<State>,
}

impl DebugContext {
    pub fn new() -> Self {
        Self { state: RefCell::new(State::default()) }
    }

    /// Make compilation of `stage` fail with the given info log.
    pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
        self.state.borrow_mut().fail_compile.insert(stage, log.to_string());
    }

    /// Make the next link fail with the given info log.
    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().fail_link = Some(log.to_string());
    }

    /// Pretend the given attribute/uniform name is absent from every program.
    pub fn remove_name(&self, name: &str) {
        self.state.borrow_mut().missing_names.insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Bytes uploaded to the given buffer, if any.
    pub fn buffer_len(&self, buffer: u32) -> Option<usize> {
        self.state.borrow().buffer_len.get(&buffer).copied()
    }

    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().live_shaders.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().live_programs.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.borrow().live_buffers.len()
    }
}

impl Default for DebugContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GlContext for DebugContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Location = u32;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.live_shaders.insert(id);
        s.shader_stage.insert(id, stage);
        Some(id)
    }

    fn shader_source(&self, _shader: u32, _source: &str) {}

    fn compile_shader(&self, shader: u32) -> bool {
        let s = self.state.borrow();
        match s.shader_stage.get(&shader) {
            Some(stage) => !s.fail_compile.contains_key(stage),
            None => false,
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let s = self.state.borrow();
        s.shader_stage
            .get(&shader)
            .and_then(|stage| s.fail_compile.get(stage))
            .cloned()
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.state.borrow_mut().live_shaders.remove(&shader);
    }

    fn create_program(&self) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.live_programs.insert(id);
        Some(id)
    }

    fn attach_shader(&self, _program: u32, _shader: u32) {}

    fn detach_shader(&self, _program: u32, _shader: u32) {}

    fn link_program(&self, _program: u32) -> bool {
        let s = self.state.borrow();
        s.fail_link.is_none() && s.fail_compile.is_empty()
    }

    fn program_info_log(&self, _program: u32) -> String {
        let s = self.state.borrow();
        if let Some(log) = &s.fail_link {
            log.clone()
        } else if !s.fail_compile.is_empty() {
            "link failed: missing shader stage".to_string()
        } else {
            String::new()
        }
    }

    fn delete_program(&self, program: u32) {
        self.state.borrow_mut().live_programs.remove(&program);
    }

    fn use_program(&self, program: Option<u32>) {
        self.state.borrow_mut().calls.push(GlCall::UseProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        let s = self.state.borrow();
        if s.missing_names.contains(name) { None } else { Some(0) }
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        if s.missing_names.contains(name) {
            return None;
        }
        if let Some(id) = s.uniform_ids.get(name) {
            return Some(*id);
        }
        let id = s.alloc();
        s.uniform_ids.insert(name.to_string(), id);
        Some(id)
    }

    fn create_buffer(&self) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.live_buffers.insert(id);
        Some(id)
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<u32>) {
        let mut s = self.state.borrow_mut();
        match buffer {
            Some(id) => {
                s.bound.insert(kind, id);
            }
            None => {
                s.bound.remove(&kind);
            }
        }
        s.calls.push(GlCall::BindBuffer { kind, buffer });
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        if let Some(id) = s.bound.get(&kind).copied() {
            s.buffer_len.insert(id, data.len());
        }
        s.calls.push(GlCall::BufferData { kind, len: data.len() });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.state.borrow_mut().live_buffers.remove(&buffer);
    }

    fn uniform_mat4(&self, location: Option<&u32>, value: &[f32; 16]) {
        self.state.borrow_mut().calls.push(GlCall::UniformMat4 {
            location: location.copied(),
            value: *value,
        });
    }

    fn uniform_vec3(&self, location: Option<&u32>, value: [f32; 3]) {
        self.state.borrow_mut().calls.push(GlCall::UniformVec3 {
            location: location.copied(),
            value,
        });
    }

    fn enable_attrib_array(&self, index: u32) {
        self.state.borrow_mut().calls.push(GlCall::EnableAttrib(index));
    }

    fn disable_attrib_array(&self, index: u32) {
        self.state.borrow_mut().calls.push(GlCall::DisableAttrib(index));
    }

    fn attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.state
            .borrow_mut()
            .calls
            .push(GlCall::AttribPointer { index, size, stride, offset });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.state.borrow_mut().calls.push(GlCall::Viewport { x, y, width, height });
    }

    fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        self.state.borrow_mut().calls.push(GlCall::Clear { r, g, b, a });
    }

    fn draw_elements_u16(&self, count: i32, byte_offset: i32) {
        self.state
            .borrow_mut()
            .calls
            .push(GlCall::DrawElements { count, byte_offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_distinct_ids() {
        let ctx = DebugContext::new();
        let a = ctx.create_buffer().unwrap();
        let b = ctx.create_buffer().unwrap();
        assert_ne!(a, b);
        assert_eq!(ctx.live_buffer_count(), 2);
    }

    #[test]
    fn tracks_upload_through_bind_point() {
        let ctx = DebugContext::new();
        let buf = ctx.create_buffer().unwrap();
        ctx.bind_buffer(BufferKind::Vertex, Some(buf));
        ctx.buffer_data(BufferKind::Vertex, &[0u8; 48]);
        assert_eq!(ctx.buffer_len(buf), Some(48));
    }

    #[test]
    fn injected_compile_failure_has_a_log() {
        let ctx = DebugContext::new();
        ctx.fail_compile(ShaderStage::Vertex, "0:1: syntax error");
        let sh = ctx.create_shader(ShaderStage::Vertex).unwrap();
        assert!(!ctx.compile_shader(sh));
        assert!(!ctx.shader_info_log(sh).is_empty());
    }
}
