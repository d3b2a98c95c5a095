//! Scene constants organized by category.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

use glam::Vec3;

// =============================================================================
// WINDOW
// =============================================================================

/// Default window width in pixels
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height in pixels
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;

// =============================================================================
// MOVEMENT
// =============================================================================

/// Distance the container travels per driven tick (world units)
pub const MOVE_STEP: f32 = 1.4;
/// Yaw applied to the container per steered tick (radians)
pub const STEER_STEP: f32 = 0.01;
/// Baseline speed multiplier
pub const SPEED_NORMAL: f32 = 1.0;
/// Speed multiplier while the boost modifier is held
pub const SPEED_BOOST: f32 = 2.0;
/// Travel rate for time-scaled driving (world units per second)
pub const MOVE_UNITS_PER_SEC: f32 = 200.0;
/// Yaw rate for time-scaled steering (radians per second)
pub const STEER_RADIANS_PER_SEC: f32 = std::f32::consts::FRAC_PI_2;

// =============================================================================
// CAMERA
// =============================================================================

/// Vertical field of view in degrees
pub const CAMERA_FOV_DEGREES: f32 = 50.0;
/// Near clip plane
pub const CAMERA_NEAR: f32 = 0.1;
/// Far clip plane
pub const CAMERA_FAR: f32 = 20000.0;
/// Chase camera offset inside the container (behind and above the vehicle)
pub const CAMERA_LOCAL_OFFSET: Vec3 = Vec3::new(0.0, 150.0, 250.0);
/// Look-at anchor above the container origin, keeps the aim at eye height
pub const CAMERA_ORIGIN_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

// =============================================================================
// ORBIT RIG
// =============================================================================

/// Starting distance from the look target
pub const ORBIT_DEFAULT_DISTANCE: f32 = 300.0;
/// Closest dolly distance, as a fraction of the default
pub const ORBIT_MIN_DISTANCE_FACTOR: f32 = 0.4;
/// Farthest dolly distance, as a fraction of the default
pub const ORBIT_MAX_DISTANCE_FACTOR: f32 = 1.33;
/// Radians of yaw/pitch per pixel of pointer drag
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
/// Pitch clamp away from the poles (radians)
pub const ORBIT_PITCH_MARGIN: f32 = 0.05;
/// Dolly distance per scroll unit
pub const ORBIT_DOLLY_STEP: f32 = 20.0;
/// Starting pitch above the horizon (radians)
pub const ORBIT_DEFAULT_PITCH: f32 = 0.5;

// =============================================================================
// FRAME CLOCK
// =============================================================================

/// Cap on the per-frame delta so long stalls don't teleport the vehicle
pub const MAX_FRAME_DT: f32 = 0.25;

// =============================================================================
// SCENE
// =============================================================================

/// Half extent of the square ground plane (world units)
pub const GROUND_HALF_EXTENT: f32 = 5000.0;
/// Spacing of the ground grid lines (world units)
pub const GROUND_GRID_STEP: f32 = 100.0;
/// Ground base color
pub const GROUND_COLOR: [f32; 3] = [0.55, 0.47, 0.36];
/// Car body color (0x78b14b)
pub const CAR_BODY_COLOR: [f32; 3] = [0.471, 0.694, 0.294];
/// Wheel color (0x333333)
pub const CAR_WHEEL_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
/// Cabin color
pub const CAR_CABIN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// =============================================================================
// LIGHTING
// =============================================================================

/// Direction toward the directional light
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(200.0, 500.0, 300.0);
/// Ambient light intensity
pub const AMBIENT_INTENSITY: f32 = 0.6;
/// Directional light intensity
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
