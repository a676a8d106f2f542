//! Core gameplay constants (movement speeds, chase and attack tuning).

/// Player walk speed in world units per second
pub const PLAYER_SPEED: f32 = 2.5;
/// Height of the player's eye above the floor
pub const PLAYER_EYE_HEIGHT: f32 = 1.8;
/// Chaser walk speed in world units per second
pub const CHASER_SPEED: f32 = 2.0;
/// Distance at which a chaser notices the player
pub const CHASER_SIGHT: f32 = 12.0;
/// Initial facing yaw in degrees (looking down -z)
pub const DEFAULT_YAW_DEGREES: f32 = -90.0;
/// Chasers closer than this to the player are defeated by an attack
pub const PLAYER_ATTACK_DISTANCE: f32 = 4.0;
/// Chasers placed in a generated level
pub const CHASER_COUNT: usize = 4;
