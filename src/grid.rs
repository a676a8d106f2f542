use crate::layout::{Direction, ProceduralLayout};
use crate::tile::{door_code, glyph, tile_codes, RoomTemplate, TileCode};

/// Final world tile grid. Row-major, one code per 1x1 world cell; code 0 is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileCode>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile_codes::EMPTY; width * height],
        }
    }

    /// Build from row-major rows of codes (hand-authored maps and tests).
    pub fn from_rows(rows: &[&[TileCode]]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                grid.set(x as i32, y as i32, code);
            }
        }
        grid
    }

    /// Stamp every occupied slot of `layout` into a grid sized to hold it.
    pub fn assemble(layout: &ProceduralLayout, template: &RoomTemplate) -> Self {
        puffin::profile_function!();
        let mut grid = Self::new(layout.width * template.width(), layout.height * template.height());
        grid.stamp_layout(layout, template);
        grid
    }

    /// Copy the room template to each occupied slot's origin
    /// (`slot.x * room_width, slot.y * room_height`), then overwrite the midpoint
    /// of every side with a door bit with that side's door code.
    /// Tiles that land outside this grid are dropped.
    pub fn stamp_layout(&mut self, layout: &ProceduralLayout, template: &RoomTemplate) {
        for (sx, sy) in layout.occupied_cells() {
            let origin_x = sx * template.width() as i32;
            let origin_y = sy * template.height() as i32;

            for ty in 0..template.height() {
                for tx in 0..template.width() {
                    if let Some(code) = template.get(tx, ty) {
                        self.set(origin_x + tx as i32, origin_y + ty as i32, code);
                    }
                }
            }

            let doors = layout.doors(sx, sy);
            for side in Direction::ALL {
                if doors.contains(side) {
                    let (tx, ty) = template.door_position(side);
                    self.set(origin_x + tx as i32, origin_y + ty as i32, door_code(side));
                }
            }
        }
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.get_index(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileCode> {
        self.get_index(x, y).map(|idx| self.tiles[idx])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, code: TileCode) {
        if let Some(idx) = self.get_index(x, y) {
            self.tiles[idx] = code;
        }
    }

    /// `(col, row, code)` for every non-empty cell, row-major.
    pub fn placements(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, code)| **code != tile_codes::EMPTY)
            .map(|(idx, &code)| (idx % self.width, idx / self.width, code))
    }

    /// Text dump, one glyph per tile, one line per row.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|&code| glyph(code)));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DoorMask;
    use tile_codes::*;

    fn template() -> RoomTemplate {
        RoomTemplate::standard(5, 3).unwrap()
    }

    #[test]
    fn test_assembled_size() {
        let layout = ProceduralLayout::new(7, 5);
        let grid = Grid::assemble(&layout, &template());
        assert_eq!((grid.width, grid.height), (35, 15));
        assert_eq!(grid.placements().count(), 0);
    }

    #[test]
    fn test_room_corners_land_on_slot_origin() {
        let mut layout = ProceduralLayout::new(7, 5);
        layout.occupy(2, 3, 1);
        let grid = Grid::assemble(&layout, &template());

        let (cx, cy) = (2, 3);
        assert_eq!(grid.get(5 * cx, 3 * cy), Some(CORNER_TOP_LEFT));
        assert_eq!(grid.get(5 * cx + 4, 3 * cy), Some(CORNER_TOP_RIGHT));
        assert_eq!(grid.get(5 * cx, 3 * cy + 2), Some(CORNER_BOTTOM_LEFT));
        assert_eq!(grid.get(5 * cx + 4, 3 * cy + 2), Some(CORNER_BOTTOM_RIGHT));
        assert_eq!(grid.get(5 * cx + 2, 3 * cy + 1), Some(OPEN));
        assert_eq!(grid.placements().count(), 15);
    }

    #[test]
    fn test_door_tiles_replace_side_midpoints() {
        let mut layout = ProceduralLayout::new(2, 1);
        layout.occupy(0, 0, 1);
        layout.occupy(1, 0, 2);
        layout.get_mut(0, 0).unwrap().doors = DoorMask::RIGHT;
        layout.get_mut(1, 0).unwrap().doors = DoorMask::LEFT;
        let grid = Grid::assemble(&layout, &template());

        assert_eq!(grid.get(4, 1), Some(DOOR_RIGHT));
        assert_eq!(grid.get(5, 1), Some(DOOR_LEFT));
        assert_eq!(grid.get(2, 0), Some(WALL_TOP));
        assert_eq!(grid.get(7, 2), Some(WALL_BOTTOM));
    }

    #[test]
    fn test_all_four_doors() {
        let mut layout = ProceduralLayout::new(1, 1);
        layout.occupy(0, 0, 1);
        layout.get_mut(0, 0).unwrap().doors = DoorMask::from_bits(15);
        let grid = Grid::assemble(&layout, &template());
        assert_eq!(grid.get(2, 0), Some(DOOR_TOP));
        assert_eq!(grid.get(4, 1), Some(DOOR_RIGHT));
        assert_eq!(grid.get(2, 2), Some(DOOR_BOTTOM));
        assert_eq!(grid.get(0, 1), Some(DOOR_LEFT));
    }

    #[test]
    fn test_out_of_bounds_writes_dropped() {
        let mut layout = ProceduralLayout::new(2, 2);
        layout.occupy(1, 1, 1);
        // Grid only big enough for the top-left slot plus a sliver
        let mut grid = Grid::new(7, 4);
        grid.stamp_layout(&layout, &template());

        assert_eq!(grid.get(5, 3), Some(CORNER_TOP_LEFT));
        assert_eq!(grid.get(6, 3), Some(WALL_TOP));
        assert_eq!(grid.get(7, 3), None);
        assert_eq!(grid.placements().count(), 2);
    }

    #[test]
    fn test_render_ascii() {
        let mut layout = ProceduralLayout::new(1, 1);
        layout.occupy(0, 0, 1);
        layout.get_mut(0, 0).unwrap().doors = DoorMask::TOP;
        let grid = Grid::assemble(&layout, &template());
        assert_eq!(grid.render_ascii(), "+-v-+\n|...|\n+---+\n");
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[&[1, 2], &[3]]);
        assert_eq!((grid.width, grid.height), (2, 2));
        assert_eq!(grid.get(0, 1), Some(3));
        assert_eq!(grid.get(1, 1), Some(EMPTY));
        assert_eq!(grid.get(2, 0), None);
    }
}
