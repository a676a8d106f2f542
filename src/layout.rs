//! Coarse room-slot grid that the path carver works on.

/// One of the four axis-aligned neighbor directions.
/// `Up` is toward row 0 (negative y / negative world z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Direction for a unit axis step, if it is one.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Four door bits, one per side: top=1, right=2, bottom=4, left=8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DoorMask(u8);

impl DoorMask {
    pub const NONE: DoorMask = DoorMask(0);
    pub const TOP: DoorMask = DoorMask(1);
    pub const RIGHT: DoorMask = DoorMask(2);
    pub const BOTTOM: DoorMask = DoorMask(4);
    pub const LEFT: DoorMask = DoorMask(8);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Up => Self::TOP.0,
            Direction::Right => Self::RIGHT.0,
            Direction::Down => Self::BOTTOM.0,
            Direction::Left => Self::LEFT.0,
        }
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= Self::bit(direction);
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Per-slot state. `marker == 0` means the slot is unused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    pub marker: u32,
    pub doors: DoorMask,
    pub recompute: bool,
}

impl Slot {
    pub fn is_occupied(&self) -> bool {
        self.marker > 0
    }
}

/// Room-slot grid for one level. Created fresh per generation and dropped
/// once the world tile grid has been assembled from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProceduralLayout {
    pub width: usize,
    pub height: usize,
    slots: Vec<Slot>,
}

impl ProceduralLayout {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![Slot::default(); width * height],
        }
    }

    /// Build a layout from row-major marker rows, with no doors and nothing dirty.
    /// Rows shorter than the widest one are padded with unused slots.
    pub fn from_markers(rows: &[&[u32]]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut layout = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &marker) in row.iter().enumerate() {
                layout.slots[y * width + x].marker = marker;
            }
        }
        layout
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

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Slot> {
        self.get_index(x, y).map(|idx| &self.slots[idx])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Slot> {
        self.get_index(x, y).map(|idx| &mut self.slots[idx])
    }

    /// Marker at a slot; 0 for unused or out-of-bounds slots.
    pub fn marker(&self, x: i32, y: i32) -> u32 {
        self.get(x, y).map_or(0, |s| s.marker)
    }

    pub fn doors(&self, x: i32, y: i32) -> DoorMask {
        self.get(x, y).map_or(DoorMask::NONE, |s| s.doors)
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.marker(x, y) > 0
    }

    pub fn is_dirty(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|s| s.recompute)
    }

    /// Occupy a slot with a marker and flag it for door recomputation.
    pub fn occupy(&mut self, x: i32, y: i32, marker: u32) {
        if let Some(slot) = self.get_mut(x, y) {
            slot.marker = marker;
            slot.recompute = true;
        }
    }

    /// Undo `occupy`.
    pub fn vacate(&mut self, x: i32, y: i32) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = Slot::default();
        }
    }

    pub fn set_dirty(&mut self, x: i32, y: i32, dirty: bool) {
        if let Some(slot) = self.get_mut(x, y) {
            slot.recompute = dirty;
        }
    }

    /// Slots currently flagged for door recomputation, in row-major order.
    pub fn dirty_cells(&self) -> Vec<(i32, i32)> {
        self.cells_where(|s| s.recompute)
    }

    /// Occupied slots in row-major order.
    pub fn occupied_cells(&self) -> Vec<(i32, i32)> {
        self.cells_where(Slot::is_occupied)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    fn cells_where(&self, pred: impl Fn(&Slot) -> bool) -> Vec<(i32, i32)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| pred(slot))
            .map(|(idx, _)| ((idx % self.width) as i32, (idx / self.width) as i32))
            .collect()
    }

    /// Occupied slot with the highest marker (ties go to the first in row-major order).
    pub fn highest_marker_cell(&self) -> Option<(i32, i32)> {
        let mut best: Option<((i32, i32), u32)> = None;
        for (x, y) in self.occupied_cells() {
            let marker = self.marker(x, y);
            if best.map_or(true, |(_, m)| marker > m) {
                best = Some(((x, y), marker));
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Row-major copy of every marker.
    pub fn marker_rows(&self) -> Vec<Vec<u32>> {
        self.slots
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|s| s.marker).collect())
            .collect()
    }

    /// Row-major copy of every door mask as raw bits.
    pub fn door_rows(&self) -> Vec<Vec<u8>> {
        self.slots
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|s| s.doors.bits()).collect())
            .collect()
    }
}
