//! Procedural room-and-corridor dungeon generation with tile-edge collision.
//!
//! A layout of room slots is carved by a backtracking random walk, doors are
//! derived between consecutively carved rooms, and each room is stamped from a
//! tile template into one world grid. Actors then move through that grid by
//! circle-vs-wall tests against per-tile directional wall flags.

pub mod collision;
pub mod components;
pub mod config;
pub mod constants;
pub mod doors;
pub mod dungeon_gen;
pub mod events;
pub mod grid;
pub mod layout;
pub mod level;
pub mod random;
pub mod systems;
pub mod tile;

pub use collision::is_blocked;
pub use config::{ConfigError, DungeonConfig};
pub use dungeon_gen::{DungeonGenerator, DungeonResult, GenerationError};
pub use grid::Grid;
pub use layout::{Direction, DoorMask, ProceduralLayout};
pub use level::{Level, LevelError};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use tile::{RoomTemplate, TileCode, WallFlagTable, WallFlags};
