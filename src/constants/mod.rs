//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Every value here is a default; `DungeonConfig` can replace the layout ones.

mod collision;
mod dungeon;
mod gameplay;

pub use collision::*;
pub use dungeon::*;
pub use gameplay::*;
