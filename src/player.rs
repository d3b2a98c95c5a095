//! Player record and camera-relative motion.
//!
//! Input always means "relative to where the camera looks", not where the
//! vehicle points: driving translates the shared container along the
//! camera's horizontal forward, steering yaws the container, and each step
//! ends by re-aiming the camera at the container's eye-height anchor. The
//! vehicle model and the chase camera both hang off the container, so one
//! translation moves them in lockstep.

use glam::Vec3;
use uuid::Uuid;

use crate::camera::CameraRig;
use crate::constants::*;
use crate::transform::Transform;

/// Project a direction onto the horizontal plane and normalize it.
/// Returns zero when the direction is vertical.
pub fn horizontal_direction(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Signed angle of a horizontal direction against world +X, in (-PI, PI].
/// The Z component supplies the sign since `angle_between` is unsigned; the
/// z == 0 boundary takes the positive branch so an opposite heading reads
/// +PI, not -PI. A zero direction (vertical camera) reads 0 instead of NaN.
pub fn signed_axis_angle(direction: Vec3) -> f32 {
    if direction == Vec3::ZERO {
        return 0.0;
    }
    let unsigned = direction.angle_between(Vec3::X);
    if direction.z >= 0.0 {
        unsigned
    } else {
        -unsigned
    }
}

/// Wrap an angle into (-PI, PI] by one full-turn correction. The boundary
/// lands on +PI: exactly -PI wraps forward.
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

/// How far the object's heading is from the camera's heading, wrapped to the
/// shortest path. Computed per step and logged; steering applies a fixed
/// increment instead, so this stays informational.
pub fn camera_alignment_offset(camera_direction: Vec3, object_direction: Vec3) -> f32 {
    let camera_angle = signed_axis_angle(camera_direction);
    let object_angle = signed_axis_angle(object_direction);
    wrap_angle(object_angle - camera_angle)
}

/// The driven entity: container transform, speed scalar, camera rig.
pub struct Player {
    pub uuid: Uuid,
    pub name: String,
    /// Shared node parenting the vehicle model and the chase camera.
    pub container: Transform,
    pub speed: f32,
    /// Set once the vehicle is attached; motion is a no-op until then.
    pub loaded: bool,
    /// Seconds since the previous tick, written by the frame loop before the
    /// dispatch scan so time-scaled bindings can read it.
    pub frame_delta: f32,
    pub rig: CameraRig,
}

impl Player {
    pub fn new(name: &str, aspect: f32) -> Self {
        let mut player = Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            container: Transform::IDENTITY,
            speed: SPEED_NORMAL,
            loaded: false,
            frame_delta: 0.0,
            rig: CameraRig::new(aspect),
        };
        player.rig.update(&player.container, CAMERA_ORIGIN_OFFSET);
        player
    }

    /// Mark the vehicle as attached to the container.
    pub fn finish_loading(&mut self) {
        self.loaded = true;
    }

    /// Drive forward (+1) or backward (-1) along the camera's horizontal
    /// forward by a fixed step.
    pub fn drive(&mut self, sign: f32) {
        self.translate(sign, MOVE_STEP);
    }

    /// Drive scaled by the frame delta instead of the fixed step.
    pub fn drive_scaled(&mut self, sign: f32) {
        self.translate(sign, MOVE_UNITS_PER_SEC * self.frame_delta);
    }

    /// Steer left (+1) or right (-1) by a fixed yaw increment.
    pub fn steer(&mut self, sign: f32) {
        self.rotate(sign, STEER_STEP);
    }

    /// Steer scaled by the frame delta instead of the fixed increment.
    pub fn steer_scaled(&mut self, sign: f32) {
        self.rotate(sign, STEER_RADIANS_PER_SEC * self.frame_delta);
    }

    /// Engage the boost multiplier; idempotent while held.
    pub fn set_boost(&mut self) {
        if self.speed != SPEED_BOOST {
            self.speed = SPEED_BOOST;
        }
    }

    /// Restore the baseline multiplier; idempotent while released.
    pub fn clear_boost(&mut self) {
        if self.speed != SPEED_NORMAL {
            self.speed = SPEED_NORMAL;
        }
    }

    /// Heading of the vehicle in the horizontal plane.
    pub fn heading_angle(&self) -> f32 {
        signed_axis_angle(horizontal_direction(self.container.forward()))
    }

    /// Heading of the camera in the horizontal plane.
    pub fn camera_angle(&self) -> f32 {
        signed_axis_angle(horizontal_direction(self.rig.camera.forward()))
    }

    /// Re-place and re-aim the camera against the current container. Called
    /// after every motion step and once per frame so the orbit rig tracks
    /// the vehicle even without input.
    pub fn update_camera(&mut self) {
        self.rig.update(&self.container, CAMERA_ORIGIN_OFFSET);
    }

    fn translate(&mut self, sign: f32, step: f32) {
        if !self.loaded {
            return;
        }
        let camera_direction = horizontal_direction(self.rig.camera.forward());
        self.container.position += camera_direction * (step * self.speed * sign);
        self.point_camera();
    }

    fn rotate(&mut self, sign: f32, step: f32) {
        if !self.loaded {
            return;
        }
        self.container.rotate_y(step * self.speed * sign);
        self.point_camera();
    }

    fn point_camera(&mut self) {
        let camera_direction = horizontal_direction(self.rig.camera.forward());
        let object_direction = horizontal_direction(self.container.forward());
        let offset = camera_alignment_offset(camera_direction, object_direction);
        log::debug!("heading offset from camera: {offset:.3} rad");
        self.update_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    /// Player whose camera looks horizontally along +Z.
    fn player_facing_positive_z() -> Player {
        let mut player = Player::new("test", 1.0);
        player.finish_loading();
        player.rig.camera.position = Vec3::new(0.0, 150.0, -250.0);
        player.rig.camera.look_at(CAMERA_ORIGIN_OFFSET);
        player
    }

    #[test]
    fn aligned_directions_need_no_rotation() {
        let offset = camera_alignment_offset(Vec3::X, Vec3::X);
        assert!(offset.abs() < 1e-6);
    }

    #[test]
    fn alignment_offset_stays_in_range() {
        let cases = [
            (Vec3::Z, Vec3::NEG_X),
            (Vec3::NEG_Z, Vec3::X),
            (Vec3::NEG_X, Vec3::Z),
            (Vec3::X, Vec3::NEG_X),
            (Vec3::NEG_X, Vec3::X),
            (Vec3::new(1.0, 0.0, 1.0).normalize(), Vec3::NEG_Z),
        ];
        for (camera, object) in cases {
            let offset = camera_alignment_offset(camera, object);
            assert!(
                -PI < offset && offset <= PI,
                "offset {offset} out of range for camera {camera:?} object {object:?}"
            );
        }
    }

    #[test]
    fn opposite_heading_reads_positive_pi() {
        // The half-turn boundary belongs to +PI on both paths: the raw angle
        // of -X against +X, and the wrapped offset between opposed headings
        assert!((signed_axis_angle(Vec3::NEG_X) - PI).abs() < 1e-6);
        let offset = camera_alignment_offset(Vec3::X, Vec3::NEG_X);
        assert!((offset - PI).abs() < 1e-6);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
    }

    #[test]
    fn zero_direction_has_a_zero_angle() {
        // A vertical camera projects to the zero direction; the angle must
        // read 0.0, not NaN, so the overlay and the debug log stay finite
        assert_eq!(signed_axis_angle(Vec3::ZERO), 0.0);
        let mut player = Player::new("test", 1.0);
        player.finish_loading();
        player.rig.camera.position = Vec3::new(0.0, 500.0, 0.0);
        player.rig.camera.look_at(Vec3::ZERO);
        assert!(player.camera_angle().is_finite());
        let offset = camera_alignment_offset(
            horizontal_direction(player.rig.camera.forward()),
            horizontal_direction(player.container.forward()),
        );
        assert!(offset.is_finite());
    }

    #[test]
    fn alignment_offset_takes_the_shortest_path() {
        // Camera at +90 deg, object at -180 deg: raw difference is -3*PI/2,
        // which wraps forward to +PI/2
        let offset = camera_alignment_offset(Vec3::Z, Vec3::NEG_X);
        assert!((offset - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn drive_moves_along_camera_forward_and_reaims() {
        let mut player = player_facing_positive_z();
        player.drive(1.0);
        assert!(approx(player.container.position, Vec3::new(0.0, 0.0, MOVE_STEP)));
        assert!(approx(
            player.rig.camera.target(),
            player.container.position + CAMERA_ORIGIN_OFFSET
        ));
    }

    #[test]
    fn reverse_drive_negates_the_direction() {
        let mut player = player_facing_positive_z();
        player.drive(-1.0);
        assert!(approx(player.container.position, Vec3::new(0.0, 0.0, -MOVE_STEP)));
    }

    #[test]
    fn boost_scales_the_step() {
        let mut player = player_facing_positive_z();
        player.set_boost();
        player.drive(1.0);
        assert!(approx(
            player.container.position,
            Vec3::new(0.0, 0.0, MOVE_STEP * SPEED_BOOST)
        ));
    }

    #[test]
    fn boost_transitions_are_idempotent() {
        let mut player = player_facing_positive_z();
        player.set_boost();
        player.set_boost();
        assert_eq!(player.speed, SPEED_BOOST);
        player.clear_boost();
        player.clear_boost();
        assert_eq!(player.speed, SPEED_NORMAL);
    }

    #[test]
    fn steer_applies_a_fixed_yaw_increment() {
        let mut player = player_facing_positive_z();
        let before = player.heading_angle();
        player.steer(1.0);
        let turned = (player.heading_angle() - before).abs();
        assert!((turned - STEER_STEP).abs() < 1e-5);
    }

    #[test]
    fn motion_is_a_no_op_until_loaded() {
        let mut player = Player::new("test", 1.0);
        player.drive(1.0);
        player.steer(1.0);
        assert!(approx(player.container.position, Vec3::ZERO));
        assert_eq!(player.container, Transform::IDENTITY);
    }

    #[test]
    fn scaled_drive_uses_the_frame_delta() {
        let mut player = player_facing_positive_z();
        player.frame_delta = 0.5;
        player.drive_scaled(1.0);
        assert!(approx(
            player.container.position,
            Vec3::new(0.0, 0.0, MOVE_UNITS_PER_SEC * 0.5)
        ));
    }

    #[test]
    fn vertical_camera_produces_no_motion() {
        let mut player = Player::new("test", 1.0);
        player.finish_loading();
        player.rig.camera.position = Vec3::new(0.0, 500.0, 0.0);
        player.rig.camera.look_at(Vec3::ZERO);
        player.drive(1.0);
        assert!(approx(player.container.position, Vec3::ZERO));
    }
}
