//! Circle-vs-tile collision against directional wall flags.
//!
//! Broad phase enumerates the integer cells under the candidate circle's
//! bounding box; narrow phase clamps the circle centre to each cell square.
//! Walls are authored from the occupant's side: moving into an axis neighbor is
//! decided by the current cell's flag for that side. Diagonal neighbors fall
//! back to their own flags when the current cell is fully open.

use glam::Vec3;

use crate::layout::Direction;
use crate::level::Level;
use crate::tile::WallFlags;

/// Would a circle of `radius` at `candidate` (moving from `current`) touch a wall?
///
/// Only x and z are considered. An actor whose own cell has no wall-flag record
/// (outside the grid, or on an empty cell) is never blocked; any touched cell
/// outside the grid always blocks. Touching at exactly `radius` does not count.
pub fn is_blocked(level: &Level, current: Vec3, candidate: Vec3, radius: f32) -> bool {
    puffin::profile_function!();
    let cell_size = level.cell_size;
    let (cx, cz) = (candidate.x / cell_size, candidate.z / cell_size);
    let r = radius / cell_size;

    let min_col = (cx - r).floor() as i32;
    let max_col = (cx + r).ceil() as i32;
    let min_row = (cz - r).floor() as i32;
    let max_row = (cz + r).ceil() as i32;

    let current_cell = (
        (current.x / cell_size).floor() as i32,
        (current.z / cell_size).floor() as i32,
    );
    let Some(current_flags) = level.flags_at(current_cell.0, current_cell.1) else {
        return false;
    };

    let r_sq = r * r;
    for row in min_row..max_row {
        for col in min_col..max_col {
            if !level.grid.in_bounds(col, row) {
                return true;
            }

            let nearest_x = cx.clamp(col as f32, col as f32 + 1.0);
            let nearest_z = cz.clamp(row as f32, row as f32 + 1.0);
            let (dx, dz) = (cx - nearest_x, cz - nearest_z);
            if dx * dx + dz * dz >= r_sq {
                continue;
            }

            if cell_blocks(level, current_flags, current_cell, (col, row)) {
                return true;
            }
        }
    }

    false
}

fn cell_blocks(level: &Level, current_flags: &WallFlags, current: (i32, i32), cell: (i32, i32)) -> bool {
    let (dx, dz) = (cell.0 - current.0, cell.1 - current.1);

    if let Some(side) = Direction::from_offset(dx, dz) {
        return current_flags.blocks(side);
    }

    if dx.abs() == 1 && dz.abs() == 1 {
        let horizontal = if dx > 0 { Direction::Right } else { Direction::Left };
        let vertical = if dz > 0 { Direction::Down } else { Direction::Up };
        if current_flags.blocks_any() {
            return current_flags.blocks(horizontal) || current_flags.blocks(vertical);
        }
        // Open tile: only the diagonal's edges facing back at us can pinch the corner
        return level
            .flags_at(cell.0, cell.1)
            .is_some_and(|f| f.blocks(horizontal.opposite()) || f.blocks(vertical.opposite()));
    }

    // Own cell, or further than one cell away
    false
}
