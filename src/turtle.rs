//! Turtle state and operations for line interpretation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rotates `v` by `theta` radians about the unit vector `axis`.
///
/// Expanded quaternion sandwich product: with `s = cos(θ/2)` and
/// `u = sin(θ/2)·axis`, the result is `2(u·v)u + (s² − u·u)v + 2s(u×v)`.
/// The length of `v` is carried through unchanged; nothing is renormalized.
pub fn rotate_about(v: Vec3, axis: Vec3, theta: f32) -> Vec3 {
    let s = (theta / 2.0).cos();
    let u = (theta / 2.0).sin() * axis;
    2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
}

/// The state of the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Direction of travel. Not kept unit length.
    pub heading: Vec3,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: Vec3::Z,
        }
    }
}

impl TurtleState {
    pub fn new(heading: Vec3) -> Self {
        Self {
            position: Vec3::ZERO,
            heading,
        }
    }

    /// Steps `distance` along the heading and returns the previous position.
    pub fn advance(&mut self, distance: f32) -> Vec3 {
        let from = self.position;
        self.position += distance * self.heading;
        from
    }

    /// Rotates the heading about a fixed world axis by `angle` radians.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.heading = rotate_about(self.heading, axis, angle);
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward and draw a segment (`F`).
    Move,
    /// Rotate about the primary axis, scaled by the sign (`+`/`-`, `\`/`/`).
    RotatePrimary(f32),
    /// Rotate about the secondary axis, scaled by the sign (`&`/`^`).
    RotateSecondary(f32),
    /// Save the turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op: symbol has no registered meaning.
    Ignore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-6), "{a} != {b}");
    }

    #[test]
    fn quarter_turn_about_x_takes_z_to_minus_y() {
        assert_close(rotate_about(Vec3::Z, Vec3::X, FRAC_PI_2), Vec3::NEG_Y);
        assert_close(rotate_about(Vec3::Z, Vec3::X, -FRAC_PI_2), Vec3::Y);
    }

    #[test]
    fn rotation_about_parallel_axis_is_identity() {
        assert_close(rotate_about(Vec3::Z, Vec3::Z, 1.234), Vec3::Z);
    }

    #[test]
    fn rotation_preserves_non_unit_length() {
        let v = Vec3::new(0.0, 0.0, 3.0);
        let r = rotate_about(v, Vec3::Y, 0.7);
        assert!((r.length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn advance_returns_previous_position() {
        let mut t = TurtleState::default();
        let from = t.advance(2.0);
        assert_eq!(from, Vec3::ZERO);
        assert_eq!(t.position, Vec3::new(0.0, 0.0, 2.0));
    }
}
