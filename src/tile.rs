use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout::Direction;

/// Small integer identifying a 1x1 world cell's visual/physical type.
pub type TileCode = u8;

/// Tile codes emitted by the map assembler.
///
/// Layout of the default 5x3 room (codes shown):
/// ```text
/// 6 2 2 2 7
/// 5 1 1 1 3
/// 9 4 4 4 8
/// ```
/// Door codes replace the midpoint of a side.
pub mod tile_codes {
    use super::TileCode;

    /// No tile; never has a wall-flag record
    pub const EMPTY: TileCode = 0;
    /// Room interior
    pub const OPEN: TileCode = 1;

    // Edges (wall on one side)
    pub const WALL_TOP: TileCode = 2;
    pub const WALL_RIGHT: TileCode = 3;
    pub const WALL_BOTTOM: TileCode = 4;
    pub const WALL_LEFT: TileCode = 5;

    // Corners (walls on two sides)
    pub const CORNER_TOP_LEFT: TileCode = 6;
    pub const CORNER_TOP_RIGHT: TileCode = 7;
    pub const CORNER_BOTTOM_RIGHT: TileCode = 8;
    pub const CORNER_BOTTOM_LEFT: TileCode = 9;

    // Door openings, one per side
    pub const DOOR_TOP: TileCode = 10;
    pub const DOOR_RIGHT: TileCode = 11;
    pub const DOOR_BOTTOM: TileCode = 12;
    pub const DOOR_LEFT: TileCode = 13;
}

/// Door tile code for a room side.
pub fn door_code(side: Direction) -> TileCode {
    match side {
        Direction::Up => tile_codes::DOOR_TOP,
        Direction::Right => tile_codes::DOOR_RIGHT,
        Direction::Down => tile_codes::DOOR_BOTTOM,
        Direction::Left => tile_codes::DOOR_LEFT,
    }
}

/// Debug glyph for a tile code.
pub fn glyph(code: TileCode) -> char {
    use tile_codes::*;
    match code {
        EMPTY => ' ',
        OPEN => '.',
        WALL_TOP | WALL_BOTTOM => '-',
        WALL_RIGHT | WALL_LEFT => '|',
        CORNER_TOP_LEFT | CORNER_TOP_RIGHT | CORNER_BOTTOM_RIGHT | CORNER_BOTTOM_LEFT => '+',
        DOOR_TOP | DOOR_BOTTOM => 'v',
        DOOR_RIGHT | DOOR_LEFT => '>',
        _ => '?',
    }
}

/// Fixed tile pattern stamped for every occupied room slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTemplate {
    width: usize,
    height: usize,
    tiles: Vec<TileCode>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("room template must be at least 3x3, got {width}x{height}")]
    TooSmall { width: usize, height: usize },
    #[error("room template has {actual} tiles, expected {expected}")]
    WrongTileCount { expected: usize, actual: usize },
}

impl RoomTemplate {
    /// Corners, edges and open interior for a `width` x `height` room.
    pub fn standard(width: usize, height: usize) -> Result<Self, TemplateError> {
        use tile_codes::*;
        if width < 3 || height < 3 {
            return Err(TemplateError::TooSmall { width, height });
        }

        let mut tiles = vec![OPEN; width * height];
        let (right, bottom) = (width - 1, height - 1);
        for y in 0..height {
            for x in 0..width {
                let code = match (x, y) {
                    (0, 0) => CORNER_TOP_LEFT,
                    (x, 0) if x == right => CORNER_TOP_RIGHT,
                    (x, y) if x == right && y == bottom => CORNER_BOTTOM_RIGHT,
                    (0, y) if y == bottom => CORNER_BOTTOM_LEFT,
                    (_, 0) => WALL_TOP,
                    (_, y) if y == bottom => WALL_BOTTOM,
                    (0, _) => WALL_LEFT,
                    (x, _) if x == right => WALL_RIGHT,
                    _ => OPEN,
                };
                tiles[y * width + x] = code;
            }
        }

        Ok(Self { width, height, tiles })
    }

    /// Custom pattern, row-major.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileCode>) -> Result<Self, TemplateError> {
        if width < 3 || height < 3 {
            return Err(TemplateError::TooSmall { width, height });
        }
        if tiles.len() != width * height {
            return Err(TemplateError::WrongTileCount {
                expected: width * height,
                actual: tiles.len(),
            });
        }
        Ok(Self { width, height, tiles })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileCode> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Local position of the door tile on a side (the side's midpoint).
    pub fn door_position(&self, side: Direction) -> (usize, usize) {
        let (mid_x, mid_y) = (self.width / 2, self.height / 2);
        match side {
            Direction::Up => (mid_x, 0),
            Direction::Right => (self.width - 1, mid_y),
            Direction::Down => (mid_x, self.height - 1),
            Direction::Left => (0, mid_y),
        }
    }
}

/// Which edges of a 1x1 world cell are impassable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallFlags {
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub bottom: bool,
    #[serde(default)]
    pub left: bool,
}

impl WallFlags {
    pub const OPEN: WallFlags = WallFlags::new(false, false, false, false);

    pub const fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn blocks(&self, side: Direction) -> bool {
        match side {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Summary flag: true when any edge blocks.
    pub fn blocks_any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }
}

#[derive(Debug, Deserialize)]
struct WallFlagEntry {
    code: TileCode,
    #[serde(flatten)]
    flags: WallFlags,
}

#[derive(Debug, Error)]
pub enum TileTableError {
    #[error("failed to parse wall-flag table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tile code {0} appears more than once in the wall-flag table")]
    DuplicateCode(TileCode),
    #[error("tile code 0 means \"no tile\" and cannot carry wall flags")]
    ReservedCode,
}

/// Per-tile-code wall-flag lookup, independent of position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallFlagTable {
    flags: HashMap<TileCode, WallFlags>,
}

impl WallFlagTable {
    pub fn empty() -> Self {
        Self { flags: HashMap::new() }
    }

    /// Parse `[{"code": 2, "top": true}, ...]`. Missing edges default to open.
    pub fn from_json_str(json: &str) -> Result<Self, TileTableError> {
        let entries: Vec<WallFlagEntry> = serde_json::from_str(json)?;
        let mut table = Self::empty();
        for entry in entries {
            if entry.code == tile_codes::EMPTY {
                return Err(TileTableError::ReservedCode);
            }
            if table.flags.insert(entry.code, entry.flags).is_some() {
                return Err(TileTableError::DuplicateCode(entry.code));
            }
        }
        debug!(entries = table.len(), "wall_flag_table_loaded");
        Ok(table)
    }

    /// Insert or replace the record for a code. Code 0 is ignored.
    pub fn insert(&mut self, code: TileCode, flags: WallFlags) {
        if code != tile_codes::EMPTY {
            self.flags.insert(code, flags);
        }
    }

    pub fn get(&self, code: TileCode) -> Option<&WallFlags> {
        self.flags.get(&code)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl Default for WallFlagTable {
    /// Records for every code the assembler emits. Doors are open on all sides.
    fn default() -> Self {
        use tile_codes::*;
        let mut table = Self::empty();
        table.insert(OPEN, WallFlags::OPEN);
        table.insert(WALL_TOP, WallFlags::new(true, false, false, false));
        table.insert(WALL_RIGHT, WallFlags::new(false, true, false, false));
        table.insert(WALL_BOTTOM, WallFlags::new(false, false, true, false));
        table.insert(WALL_LEFT, WallFlags::new(false, false, false, true));
        table.insert(CORNER_TOP_LEFT, WallFlags::new(true, false, false, true));
        table.insert(CORNER_TOP_RIGHT, WallFlags::new(true, true, false, false));
        table.insert(CORNER_BOTTOM_RIGHT, WallFlags::new(false, true, true, false));
        table.insert(CORNER_BOTTOM_LEFT, WallFlags::new(false, false, true, true));
        for door in [DOOR_TOP, DOOR_RIGHT, DOOR_BOTTOM, DOOR_LEFT] {
            table.insert(door, WallFlags::OPEN);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_codes::*;

    #[test]
    fn test_standard_template_layout() {
        let t = RoomTemplate::standard(5, 3).unwrap();
        let rows: Vec<Vec<TileCode>> = (0..3)
            .map(|y| (0..5).map(|x| t.get(x, y).unwrap()).collect())
            .collect();
        assert_eq!(rows[0], vec![6, 2, 2, 2, 7]);
        assert_eq!(rows[1], vec![5, 1, 1, 1, 3]);
        assert_eq!(rows[2], vec![9, 4, 4, 4, 8]);
        assert_eq!(t.get(5, 0), None);
    }

    #[test]
    fn test_template_too_small() {
        assert_eq!(
            RoomTemplate::standard(2, 3),
            Err(TemplateError::TooSmall { width: 2, height: 3 })
        );
        assert!(matches!(
            RoomTemplate::from_tiles(3, 3, vec![1; 8]),
            Err(TemplateError::WrongTileCount { expected: 9, actual: 8 })
        ));
    }

    #[test]
    fn test_door_positions_are_side_midpoints() {
        let t = RoomTemplate::standard(5, 3).unwrap();
        assert_eq!(t.door_position(Direction::Up), (2, 0));
        assert_eq!(t.door_position(Direction::Right), (4, 1));
        assert_eq!(t.door_position(Direction::Down), (2, 2));
        assert_eq!(t.door_position(Direction::Left), (0, 1));
    }

    #[test]
    fn test_default_table_covers_assembler_codes() {
        let table = WallFlagTable::default();
        for code in OPEN..=DOOR_LEFT {
            assert!(table.get(code).is_some(), "missing code {code}");
        }
        assert!(table.get(EMPTY).is_none());
        assert!(!table.get(OPEN).unwrap().blocks_any());
        assert!(table.get(WALL_RIGHT).unwrap().blocks(Direction::Right));
        let corner = table.get(CORNER_BOTTOM_LEFT).unwrap();
        assert!(corner.bottom && corner.left && !corner.top && !corner.right);
    }

    #[test]
    fn test_table_from_json() {
        let table = WallFlagTable::from_json_str(
            r#"[{"code": 1}, {"code": 2, "top": true}, {"code": 7, "top": true, "right": true}]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some(&WallFlags::OPEN));
        assert!(table.get(2).unwrap().blocks(Direction::Up));
        assert!(table.get(7).unwrap().blocks_any());
    }

    #[test]
    fn test_table_rejects_duplicates_and_zero() {
        assert!(matches!(
            WallFlagTable::from_json_str(r#"[{"code": 3}, {"code": 3, "left": true}]"#),
            Err(TileTableError::DuplicateCode(3))
        ));
        assert!(matches!(
            WallFlagTable::from_json_str(r#"[{"code": 0}]"#),
            Err(TileTableError::ReservedCode)
        ));
        assert!(matches!(
            WallFlagTable::from_json_str("not json"),
            Err(TileTableError::Parse(_))
        ));
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(EMPTY), ' ');
        assert_eq!(glyph(OPEN), '.');
        assert_eq!(glyph(door_code(Direction::Left)), '>');
        assert_eq!(glyph(200), '?');
    }
}
