//! Scene assembly: ground plane and the procedural box car.
//!
//! The vehicle is generated from a handful of boxes rather than imported, so
//! the scene is ready the moment it is built.

use glam::Vec3;

use crate::constants::*;

/// One axis-aligned box in container-local space.
pub struct BoxInstance {
    pub size: Vec3,
    pub offset: Vec3,
    pub color: [f32; 3],
}

pub struct Scene {
    pub ground_half_extent: f32,
    pub grid_step: f32,
    /// Vehicle boxes, positioned relative to the container origin.
    pub car: Vec<BoxInstance>,
    pub light_direction: Vec3,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            ground_half_extent: GROUND_HALF_EXTENT,
            grid_step: GROUND_GRID_STEP,
            car: create_car(),
            light_direction: LIGHT_DIRECTION.normalize(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the box car: two wheel bars, a body slab, and a cabin.
pub fn create_car() -> Vec<BoxInstance> {
    vec![
        // Back wheel bar
        BoxInstance {
            size: Vec3::new(12.0, 12.0, 33.0),
            offset: Vec3::new(-18.0, 6.0, 0.0),
            color: CAR_WHEEL_COLOR,
        },
        // Front wheel bar
        BoxInstance {
            size: Vec3::new(12.0, 12.0, 33.0),
            offset: Vec3::new(18.0, 6.0, 0.0),
            color: CAR_WHEEL_COLOR,
        },
        // Body
        BoxInstance {
            size: Vec3::new(60.0, 15.0, 30.0),
            offset: Vec3::new(0.0, 12.0, 0.0),
            color: CAR_BODY_COLOR,
        },
        // Cabin, set back toward the rear
        BoxInstance {
            size: Vec3::new(33.0, 12.0, 24.0),
            offset: Vec3::new(-6.0, 25.5, 0.0),
            color: CAR_CABIN_COLOR,
        },
    ]
}
