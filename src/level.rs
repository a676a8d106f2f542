//! Per-level world object.
//!
//! A `Level` owns everything collision and rendering read for the lifetime of
//! one playthrough: the assembled tile grid, the wall-flag table and the cell
//! size. It is rebuilt wholesale on restart and never edited in place.

use glam::Vec3;
use thiserror::Error;
use tracing::info;

use crate::config::DungeonConfig;
use crate::dungeon_gen::{DungeonGenerator, GenerationError};
use crate::grid::Grid;
use crate::random::RandomSource;
use crate::tile::{RoomTemplate, TemplateError, TileCode, WallFlagTable, WallFlags};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Summary of the layout a level was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSummary {
    pub rooms: usize,
    pub branches: u32,
    pub room_width: usize,
    pub room_height: usize,
}

#[derive(Debug, Clone)]
pub struct Level {
    pub grid: Grid,
    pub wall_flags: WallFlagTable,
    pub cell_size: f32,
    /// Entrance room slot
    pub entrance: (i32, i32),
    /// Exit room slot (deepest point of the primary path)
    pub exit: (i32, i32),
    /// Every occupied room slot, row-major
    pub rooms: Vec<(i32, i32)>,
    pub summary: LayoutSummary,
}

impl Level {
    /// Carve a layout, resolve doors and stamp the standard room template.
    pub fn generate<R: RandomSource + ?Sized>(config: &DungeonConfig, rng: &mut R) -> Result<Self, LevelError> {
        let template = RoomTemplate::standard(config.room_width, config.room_height)?;
        Self::generate_with(config, &template, WallFlagTable::default(), rng)
    }

    /// Same as `generate` with a caller-supplied template and wall-flag table.
    pub fn generate_with<R: RandomSource + ?Sized>(
        config: &DungeonConfig,
        template: &RoomTemplate,
        wall_flags: WallFlagTable,
        rng: &mut R,
    ) -> Result<Self, LevelError> {
        let result = DungeonGenerator::new(config).generate(rng)?;
        let grid = Grid::assemble(&result.layout, template);
        let summary = LayoutSummary {
            rooms: result.layout.occupied_count(),
            branches: result.branches,
            room_width: template.width(),
            room_height: template.height(),
        };

        info!(
            entrance_x = result.entrance.0,
            entrance_y = result.entrance.1,
            exit_x = result.exit.0,
            exit_y = result.exit.1,
            rooms = summary.rooms,
            branches = summary.branches,
            "layout_generated"
        );

        Ok(Self {
            grid,
            wall_flags,
            cell_size: config.cell_size,
            entrance: result.entrance,
            exit: result.exit,
            rooms: result.layout.occupied_cells(),
            summary,
        })
    }

    /// Wrap an existing grid (hand-authored maps, tests). Entrance and exit are slot (0, 0).
    pub fn from_parts(grid: Grid, wall_flags: WallFlagTable, cell_size: f32) -> Self {
        Self {
            grid,
            wall_flags,
            cell_size,
            entrance: (0, 0),
            exit: (0, 0),
            rooms: Vec::new(),
            summary: LayoutSummary {
                rooms: 0,
                branches: 0,
                room_width: 1,
                room_height: 1,
            },
        }
    }

    /// Wall flags for the tile at a grid cell; `None` outside the grid or on empty cells.
    pub fn flags_at(&self, col: i32, row: i32) -> Option<&WallFlags> {
        self.grid.get(col, row).and_then(|code| self.wall_flags.get(code))
    }

    /// World-space centre of a tile, on the floor plane.
    pub fn map_position(&self, col: usize, row: usize) -> Vec3 {
        let half = self.cell_size * 0.5;
        Vec3::new(col as f32 * self.cell_size + half, 0.0, row as f32 * self.cell_size + half)
    }

    /// Tile code plus world position for every non-empty cell, for the asset placer.
    pub fn tile_placements(&self) -> impl Iterator<Item = (TileCode, Vec3)> + '_ {
        self.grid
            .placements()
            .map(|(col, row, code)| (code, self.map_position(col, row)))
    }

    /// World centre of a room slot, on the floor plane.
    pub fn room_position(&self, slot: (i32, i32)) -> Vec3 {
        let col = slot.0.max(0) as usize * self.summary.room_width + self.summary.room_width / 2;
        let row = slot.1.max(0) as usize * self.summary.room_height + self.summary.room_height / 2;
        self.map_position(col, row)
    }

    pub fn entrance_position(&self) -> Vec3 {
        self.room_position(self.entrance)
    }

    pub fn exit_position(&self) -> Vec3 {
        self.room_position(self.exit)
    }
}
