//! Frame driver: resource creation at startup, one draw per tick.

use std::rc::Rc;

use glam::Vec2;
use tracing::info;

use crate::bindings::BindingTable;
use crate::camera::{self, RotationState};
use crate::context::{GlContext, RenderError};
use crate::draw::{draw, DrawRange, FrameUniforms};
use crate::geometry::{CUBE_INDICES, CUBE_VERTICES, VERTEX_STRIDE};
use crate::mesh::Mesh;
use crate::program::{compile, Program};
use crate::shaders::{CUBE_FRAGMENT_SHADER, CUBE_VERTEX_SHADER};

/// Fixed surface size, matching the window the demo opens.
pub const SURFACE_WIDTH: i32 = 320;
pub const SURFACE_HEIGHT: i32 = 240;

/// Per-frame clear color.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Flat cube color fed to `u_kolor`.
pub const CUBE_COLOR: [f32; 3] = [1.0, 0.5, 0.2];

/// Owns every GPU resource of the demo and renders one cube per tick.
///
/// Quit handling, buffer swap and frame pacing belong to the surrounding
/// event loop; the driver itself only mutates [`RotationState`] and issues
/// GL work.
pub struct FrameDriver<G: GlContext> {
    gl: Rc<G>,
    rotation: RotationState,
    // Keeps the GPU program alive for the ids recorded in `bindings`.
    _program: Program<G>,
    bindings: BindingTable<G>,
    mesh: Mesh<G>,
    range: DrawRange,
}

impl<G: GlContext> FrameDriver<G> {
    /// Compiles the cube program, resolves its bindings and uploads the cube
    /// mesh. Compile/link diagnostics have already been logged by the time
    /// this returns; only GPU object allocation failures surface as errors.
    pub fn new(gl: Rc<G>) -> Result<Self, RenderError> {
        let compiled = compile(&gl, CUBE_VERTEX_SHADER, CUBE_FRAGMENT_SHADER)?;
        let bindings = BindingTable::resolve(gl.as_ref(), &compiled.program);
        let mesh = Mesh::upload(
            &gl,
            bytemuck::cast_slice(&CUBE_VERTICES),
            bytemuck::cast_slice(&CUBE_INDICES),
            VERTEX_STRIDE,
        )?;
        info!(
            diagnostics = compiled.diagnostics.len(),
            "cube resources created"
        );

        Ok(Self {
            gl,
            rotation: RotationState::default(),
            _program: compiled.program,
            bindings,
            mesh,
            range: DrawRange::new(0, (CUBE_INDICES.len() - 1) as u32),
        })
    }

    /// Renders one frame: clear, advance rotation, draw the cube.
    pub fn tick(&mut self) {
        let [r, g, b, a] = CLEAR_COLOR;
        self.gl.viewport(0, 0, SURFACE_WIDTH, SURFACE_HEIGHT);
        self.gl.clear(r, g, b, a);

        self.rotation.advance();
        let uniforms = FrameUniforms {
            mvp: camera::camera(
                camera::TRANSLATE,
                Vec2::new(self.rotation.x, self.rotation.y),
            ),
            color: CUBE_COLOR,
        };
        draw(self.gl.as_ref(), &self.bindings, &self.mesh, self.range, &uniforms);
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BufferKind;
    use crate::debug::{DebugContext, GlCall};

    #[test]
    fn hundred_ticks_hundred_full_range_draws() {
        let gl = Rc::new(DebugContext::new());
        let mut driver = FrameDriver::new(gl.clone()).unwrap();
        gl.clear_calls();

        for _ in 0..100 {
            driver.tick();
        }

        let rotation = driver.rotation();
        assert!((rotation.x - 1.3).abs() < 1e-3);
        assert!((rotation.y - 3.0).abs() < 1e-3);

        let draws: Vec<_> = gl
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::DrawElements { .. }))
            .collect();
        assert_eq!(draws.len(), 100);
        for call in draws {
            assert_eq!(call, GlCall::DrawElements { count: 36, byte_offset: 0 });
        }
    }

    #[test]
    fn tick_clears_before_drawing() {
        let gl = Rc::new(DebugContext::new());
        let mut driver = FrameDriver::new(gl.clone()).unwrap();
        gl.clear_calls();

        driver.tick();

        let calls = gl.calls();
        let clear_at = calls
            .iter()
            .position(|c| matches!(c, GlCall::Clear { .. }))
            .unwrap();
        let draw_at = calls
            .iter()
            .position(|c| matches!(c, GlCall::DrawElements { .. }))
            .unwrap();
        assert!(clear_at < draw_at);
        assert_eq!(
            calls[clear_at],
            GlCall::Clear { r: 0.2, g: 0.3, b: 0.3, a: 1.0 }
        );
        assert!(calls.contains(&GlCall::Viewport { x: 0, y: 0, width: 320, height: 240 }));
    }

    #[test]
    fn mvp_changes_between_ticks() {
        let gl = Rc::new(DebugContext::new());
        let mut driver = FrameDriver::new(gl.clone()).unwrap();

        let mvp_of_tick = |gl: &DebugContext| {
            gl.calls()
                .into_iter()
                .find_map(|c| match c {
                    GlCall::UniformMat4 { value, .. } => Some(value),
                    _ => None,
                })
                .unwrap()
        };

        gl.clear_calls();
        driver.tick();
        let first = mvp_of_tick(&gl);
        gl.clear_calls();
        driver.tick();
        let second = mvp_of_tick(&gl);
        assert_ne!(first, second);
    }

    #[test]
    fn dropping_the_driver_frees_every_gpu_object() {
        let gl = Rc::new(DebugContext::new());
        let driver = FrameDriver::new(gl.clone()).unwrap();
        drop(driver);
        assert_eq!(gl.live_program_count(), 0);
        assert_eq!(gl.live_buffer_count(), 0);
        assert_eq!(gl.live_shader_count(), 0);
    }

    #[test]
    fn driver_startup_leaves_bind_points_clear() {
        let gl = Rc::new(DebugContext::new());
        let _driver = FrameDriver::new(gl.clone()).unwrap();
        let last_vertex_bind = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::BindBuffer { kind: BufferKind::Vertex, buffer } => Some(buffer),
                _ => None,
            })
            .last()
            .unwrap();
        assert_eq!(last_vertex_bind, None);
    }
}
