use glam::Vec3;

use crate::constants::{CHASER_RADIUS, CHASER_SIGHT, CHASER_SPEED, DEFAULT_YAW_DEGREES, PLAYER_RADIUS, PLAYER_SPEED};

/// Position component - world coordinates (y is up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

/// Collision circle on the floor plane
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn player() -> Self {
        Self::new(PLAYER_RADIUS)
    }

    pub fn chaser() -> Self {
        Self::new(CHASER_RADIUS)
    }
}

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Walk speed and facing for the player.
#[derive(Debug, Clone, Copy)]
pub struct PlayerController {
    pub speed: f32,
    pub yaw_degrees: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            yaw_degrees: DEFAULT_YAW_DEGREES,
        }
    }
}

/// Enemy that walks straight at the player once within sight.
/// Defeated chasers stay in the world with `active` cleared.
#[derive(Debug, Clone, Copy)]
pub struct Chaser {
    pub sight: f32,
    pub speed: f32,
    pub active: bool,
}

impl Chaser {
    pub fn new(sight: f32, speed: f32) -> Self {
        Self {
            sight,
            speed,
            active: true,
        }
    }
}

impl Default for Chaser {
    fn default() -> Self {
        Self::new(CHASER_SIGHT, CHASER_SPEED)
    }
}
