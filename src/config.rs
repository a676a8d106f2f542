//! Level-generation configuration.
//!
//! All values default to the fixed constants in `constants`; a host can
//! replace any of them from JSON. A config is validated before generation so
//! that impossible requests are rejected up front instead of mid-search.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub layout_width: usize,
    pub layout_height: usize,
    pub room_width: usize,
    pub room_height: usize,
    pub cell_size: f32,
    pub primary_path_length: u32,
    pub max_branches: u32,
    pub branch_length_min: u32,
    pub branch_length_max: u32,
    /// Fixed seed for reproducible levels; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            layout_width: LAYOUT_WIDTH,
            layout_height: LAYOUT_HEIGHT,
            room_width: ROOM_WIDTH,
            room_height: ROOM_HEIGHT,
            cell_size: CELL_SIZE,
            primary_path_length: PRIMARY_PATH_LENGTH,
            max_branches: MAX_BRANCHES,
            branch_length_min: BRANCH_LENGTH_MIN,
            branch_length_max: BRANCH_LENGTH_MAX,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("layout grid must have at least one slot, got {width}x{height}")]
    EmptyLayout { width: usize, height: usize },
    #[error("rooms must be at least 3x3 tiles, got {width}x{height}")]
    RoomTooSmall { width: usize, height: usize },
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),
    #[error("primary path of {length} steps needs {needed} slots but the layout has {available}")]
    PathTooLong {
        length: u32,
        needed: usize,
        available: usize,
    },
    #[error("branch lengths must satisfy 1 <= min <= max, got {min}..={max}")]
    InvalidBranchLengths { min: u32, max: u32 },
}

impl DungeonConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout_width == 0 || self.layout_height == 0 {
            return Err(ConfigError::EmptyLayout {
                width: self.layout_width,
                height: self.layout_height,
            });
        }
        if self.room_width < 3 || self.room_height < 3 {
            return Err(ConfigError::RoomTooSmall {
                width: self.room_width,
                height: self.room_height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }

        // The entrance occupies one slot and each step one more
        let available = self.slot_count();
        let needed = self.primary_path_length as usize + 1;
        if needed > available {
            return Err(ConfigError::PathTooLong {
                length: self.primary_path_length,
                needed,
                available,
            });
        }

        if self.branch_length_min == 0 || self.branch_length_min > self.branch_length_max {
            return Err(ConfigError::InvalidBranchLengths {
                min: self.branch_length_min,
                max: self.branch_length_max,
            });
        }
        Ok(())
    }

    /// Can a primary path start at slot `(x, y)` at all?
    ///
    /// Colour the slots like a checkerboard: each step changes colour, so a path
    /// of `n` slots needs `ceil(n/2)` of the entrance's colour and `floor(n/2)`
    /// of the other. On odd-sized layouts a near-full path only fits from the
    /// majority colour. Passing this does not guarantee the search succeeds.
    pub fn path_fits_from(&self, x: i32, y: i32) -> bool {
        let cells = self.primary_path_length as usize + 1;
        let even = self.slot_count().div_ceil(2);
        let odd = self.slot_count() / 2;
        let (same, other) = if (x + y).rem_euclid(2) == 0 { (even, odd) } else { (odd, even) };
        cells.div_ceil(2) <= same && cells / 2 <= other
    }

    pub fn slot_count(&self) -> usize {
        self.layout_width * self.layout_height
    }

    pub fn world_width(&self) -> usize {
        self.layout_width * self.room_width
    }

    pub fn world_height(&self) -> usize {
        self.layout_height * self.room_height
    }
}
