//! Perspective camera and the rigs that drive it.
//!
//! Two rig variants share one camera: a chase rig parked at a fixed offset
//! inside the container (only its look-at is recomputed per tick), and a
//! pointer-driven orbit rig circling the same look target. The active
//! variant is swappable at runtime.

use glam::{Mat4, Vec3};

use crate::constants::*;
use crate::transform::Transform;

pub struct Camera {
    pub position: Vec3,
    target: Vec3,
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: CAMERA_LOCAL_OFFSET,
            target: CAMERA_ORIGIN_OFFSET,
            fov_y_degrees: CAMERA_FOV_DEGREES,
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    /// Re-aim at a world-space target. Position is untouched.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// World-space viewing direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

/// Which strategy positions the camera each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigMode {
    /// Fixed offset inside the container; moves in lockstep with it.
    Chase,
    /// Pointer-driven yaw/pitch/distance around the look target.
    Orbit,
}

pub struct CameraRig {
    pub camera: Camera,
    pub mode: RigMode,
    // Chase: offset in container-local space
    local_offset: Vec3,
    // Orbit: spherical placement around the look target
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        Self {
            camera: Camera::new(aspect),
            mode: RigMode::Chase,
            local_offset: CAMERA_LOCAL_OFFSET,
            yaw: 0.0,
            pitch: ORBIT_DEFAULT_PITCH,
            distance: ORBIT_DEFAULT_DISTANCE,
        }
    }

    /// Place the camera for this tick and re-aim it at the container's
    /// eye-height anchor.
    pub fn update(&mut self, container: &Transform, origin_offset: Vec3) {
        let target = container.position + origin_offset;
        match self.mode {
            RigMode::Chase => {
                self.camera.position = container.transform_point(self.local_offset);
            }
            RigMode::Orbit => {
                let offset = Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                ) * self.distance;
                self.camera.position = target + offset;
            }
        }
        self.camera.look_at(target);
    }

    /// Apply a pointer drag. Only the orbit variant consumes it.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if self.mode != RigMode::Orbit {
            return;
        }
        self.yaw -= dx * ORBIT_ROTATE_SPEED;
        self.pitch = (self.pitch + dy * ORBIT_ROTATE_SPEED).clamp(
            ORBIT_PITCH_MARGIN,
            std::f32::consts::FRAC_PI_2 - ORBIT_PITCH_MARGIN,
        );
    }

    /// Dolly the orbit distance in or out by scroll units.
    pub fn dolly(&mut self, scroll: f32) {
        if self.mode != RigMode::Orbit {
            return;
        }
        self.distance = (self.distance - scroll * ORBIT_DOLLY_STEP).clamp(
            ORBIT_DEFAULT_DISTANCE * ORBIT_MIN_DISTANCE_FACTOR,
            ORBIT_DEFAULT_DISTANCE * ORBIT_MAX_DISTANCE_FACTOR,
        );
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            RigMode::Chase => RigMode::Orbit,
            RigMode::Orbit => RigMode::Chase,
        };
    }
}
