//! Collision and world-scale constants.

/// World units spanned by one tile edge
pub const CELL_SIZE: f32 = 3.0;
/// Default collision radius for the player
pub const PLAYER_RADIUS: f32 = 0.5;
/// Default collision radius for chasing enemies
pub const CHASER_RADIUS: f32 = 0.5;
