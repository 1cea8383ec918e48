//! Backend-agnostic cube renderer: GPU resource lifecycle and per-frame draw.
//!
//! # Invariants
//! - GPU handles are owned values; no file-scope or process-wide GPU state.
//! - Intermediate shader-stage objects are deleted on every exit path.
//! - Global bind points are mutated only inside [`draw::draw`], which leaves
//!   them cleared on return.
//! - Shader compile/link failures are logged and absorbed, never raised.
//!
//! The [`context::GlContext`] trait is the seam between this crate and a real
//! GL backend. `zenu-render-gl` implements it over glow; [`debug::DebugContext`]
//! records every call so the whole pipeline runs in tests without a GPU.

pub mod bindings;
pub mod camera;
pub mod context;
pub mod debug;
pub mod draw;
pub mod driver;
pub mod geometry;
pub mod mesh;
pub mod program;
pub mod shaders;

pub use bindings::BindingTable;
pub use context::{BufferKind, GlContext, RenderError, ShaderStage};
pub use debug::{DebugContext, GlCall};
pub use draw::{DrawRange, FrameUniforms};
pub use driver::FrameDriver;
pub use mesh::Mesh;
pub use program::{CompiledProgram, Diagnostic, Program};

pub fn crate_info() -> &'static str {
    "zenu-render v0.1.0"
}
