//! Per-frame game systems.
//!
//! - `movement`: collision-resolved walking for any actor, and the player walk system
//! - `ai`: chasers that close in on the player
//! - `combat`: the player's attack and the chasers-left count

pub mod ai;
pub mod combat;
pub mod movement;

pub use ai::update_chasers;
pub use combat::{living_chasers, player_attack};
pub use movement::{move_player, resolve, MoveInput};
