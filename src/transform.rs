//! Minimal 3D transform node (position + rotation).
//!
//! The scene only needs one level of parenting: the container node carries
//! the vehicle model and the chase camera offset, so a full scene graph
//! would be overkill.

use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// World-space forward: the local -Z axis rotated into world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Yaw around the local up axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = self.rotation * Quat::from_rotation_y(angle);
    }

    /// Map a point from this node's local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_faces_negative_z() {
        assert!(approx(Transform::IDENTITY.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn quarter_turn_left_faces_negative_x() {
        let mut node = Transform::IDENTITY;
        node.rotate_y(std::f32::consts::FRAC_PI_2);
        assert!(approx(node.forward(), Vec3::NEG_X));
    }

    #[test]
    fn transform_point_applies_rotation_then_offset() {
        let mut node = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        node.rotate_y(std::f32::consts::FRAC_PI_2);
        // Local +Z swings to world +X under a quarter turn left
        let world = node.transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(world, Vec3::new(11.0, 0.0, 0.0)));
    }
}
