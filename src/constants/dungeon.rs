//! Dungeon generation constants.

/// Room slots across the coarse layout grid
pub const LAYOUT_WIDTH: usize = 7;
/// Room slots down the coarse layout grid
pub const LAYOUT_HEIGHT: usize = 5;
/// Tiles across a single room footprint
pub const ROOM_WIDTH: usize = 5;
/// Tiles down a single room footprint
pub const ROOM_HEIGHT: usize = 3;
/// World tile grid width (LAYOUT_WIDTH * ROOM_WIDTH)
pub const WORLD_WIDTH: usize = LAYOUT_WIDTH * ROOM_WIDTH;
/// World tile grid height (LAYOUT_HEIGHT * ROOM_HEIGHT)
pub const WORLD_HEIGHT: usize = LAYOUT_HEIGHT * ROOM_HEIGHT;
/// Steps carved from the entrance along the main path
pub const PRIMARY_PATH_LENGTH: u32 = 13;
/// Side branches grown after the main path
pub const MAX_BRANCHES: u32 = 3;
/// Shortest side branch
pub const BRANCH_LENGTH_MIN: u32 = 1;
/// Longest side branch
pub const BRANCH_LENGTH_MAX: u32 = 4;
/// Marker given to the entrance slot
pub const ENTRANCE_MARKER: u32 = 1;
