//! Per-frame transform math.
//!
//! The projection and view constants are fixed properties of the demo, not
//! configuration: 45 degree vertical FOV at 4:3, near 0.1, far 100, camera
//! pulled back 1.6 units, model scaled to half size. Visual parity depends on
//! reproducing them exactly.

use glam::{Mat4, Vec2, Vec3};

pub const FOV_Y: f32 = 45.0_f32;
pub const ASPECT: f32 = 4.0 / 3.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;
pub const TRANSLATE: f32 = 1.6;
pub const MODEL_SCALE: f32 = 0.5;

/// Accumulating rotation angles, radians. The only persistent mutable state
/// in the renderer core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub const STEP_X: f32 = 0.01;
    pub const STEP_Y: f32 = 0.03;

    /// Advance by the fixed per-frame increments. No clamping, no wraparound.
    pub fn advance(&mut self) {
        self.x += Self::STEP_X;
        self.y += Self::STEP_Y;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self { x: 0.3, y: 0.0 }
    }
}

/// Full model-view-projection matrix for one frame.
///
/// `Projection * View * Model` where the view translates backward along the
/// view axis then applies the y rotation about `(-1, 0, 0)` and the x
/// rotation about `(0, 1, 0)`, and the model is a uniform half scale.
pub fn camera(translate: f32, rotate: Vec2) -> Mat4 {
    let projection = Mat4::perspective_rh_gl(FOV_Y.to_radians(), ASPECT, NEAR, FAR);
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -translate))
        * Mat4::from_axis_angle(Vec3::new(-1.0, 0.0, 0.0), rotate.y)
        * Mat4::from_axis_angle(Vec3::Y, rotate.x);
    let model = Mat4::from_scale(Vec3::splat(MODEL_SCALE));
    projection * view * model
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat4_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn identity_rotation_reduces_to_translate_and_scale() {
        let expected = Mat4::perspective_rh_gl(45.0_f32.to_radians(), 4.0 / 3.0, 0.1, 100.0)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -1.6))
            * Mat4::from_scale(Vec3::splat(0.5));
        assert_mat4_eq(camera(1.6, Vec2::ZERO), expected);
    }

    #[test]
    fn camera_is_a_pure_function() {
        let rotate = Vec2::new(0.7, -0.2);
        assert_mat4_eq(camera(1.6, rotate), camera(1.6, rotate));
    }

    #[test]
    fn rotation_changes_the_matrix() {
        assert_ne!(camera(1.6, Vec2::ZERO), camera(1.6, Vec2::new(0.3, 0.0)));
    }

    #[test]
    fn rotation_accumulates_deterministically() {
        let mut rotation = RotationState::default();
        for _ in 0..100 {
            rotation.advance();
        }
        assert!((rotation.x - 1.3).abs() < 1e-3);
        assert!((rotation.y - 3.0).abs() < 1e-3);
    }

    #[test]
    fn rotation_starts_at_the_demo_pose() {
        let rotation = RotationState::default();
        assert_eq!(rotation.x, 0.3);
        assert_eq!(rotation.y, 0.0);
    }
}
