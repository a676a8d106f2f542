use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, DungeonConfig};
use crate::constants::ENTRANCE_MARKER;
use crate::doors::recompute_dirty;
use crate::layout::{Direction, ProceduralLayout};
use crate::random::RandomSource;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("entrance slot ({x}, {y}) lies outside the layout grid")]
    EntranceOutOfBounds { x: i32, y: i32 },
    #[error("a primary path of {length} steps cannot start at ({x}, {y}): too few slots of alternating colour")]
    EntranceParity { x: i32, y: i32, length: u32 },
    #[error("could not carve a primary path of {length} steps from ({x}, {y})")]
    PrimaryPathFailed { x: i32, y: i32, length: u32 },
}

/// Extend a path of `length` steps from `start`, which must already hold `marker`.
///
/// Neighbors are tried in an order drawn from `rng`. Each free in-bounds
/// neighbor is occupied with `marker + 1` and flagged dirty before recursing;
/// on failure it is vacated again and the next direction is tried. A neighbor
/// taken while more than one step remains is pushed to `candidates` as a
/// future branch point (and removed again if its subtree fails).
///
/// Reaching `length == 0` resolves doors over every dirty slot and succeeds.
pub fn carve<R: RandomSource + ?Sized>(
    layout: &mut ProceduralLayout,
    start: (i32, i32),
    length: u32,
    marker: u32,
    candidates: &mut Vec<(i32, i32)>,
    rng: &mut R,
) -> bool {
    if length == 0 {
        recompute_dirty(layout);
        return true;
    }

    let mut directions = Direction::ALL;
    rng.shuffle_directions(&mut directions);

    for dir in directions {
        let (dx, dy) = dir.offset();
        let next = (start.0 + dx, start.1 + dy);
        if !layout.in_bounds(next.0, next.1) || layout.is_occupied(next.0, next.1) {
            continue;
        }

        layout.occupy(next.0, next.1, marker + 1);
        let has_path_left = length > 1;
        if has_path_left {
            candidates.push(next);
        }

        if carve(layout, next, length - 1, marker + 1, candidates, rng) {
            return true;
        }

        layout.vacate(next.0, next.1);
        if has_path_left {
            if let Some(idx) = candidates.iter().rposition(|&c| c == next) {
                candidates.remove(idx);
            }
        }
    }

    false
}

/// Result of layout generation
#[derive(Debug, Clone)]
pub struct DungeonResult {
    pub layout: ProceduralLayout,
    pub entrance: (i32, i32),
    /// Slot with the highest marker on the primary path
    pub exit: (i32, i32),
    pub branches: u32,
}

pub struct DungeonGenerator<'a> {
    config: &'a DungeonConfig,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(config: &'a DungeonConfig) -> Self {
        Self { config }
    }

    /// Slots a primary path can start from, row-major.
    pub fn entrance_slots(&self) -> Vec<(i32, i32)> {
        let (width, height) = (self.config.layout_width as i32, self.config.layout_height as i32);
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.config.path_fits_from(x, y))
            .collect()
    }

    /// Generate a layout from an entrance drawn uniformly from `entrance_slots`.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<DungeonResult, GenerationError> {
        self.config.validate()?;
        let slots = self.entrance_slots();
        if slots.is_empty() {
            return Err(GenerationError::EntranceParity {
                x: 0,
                y: 0,
                length: self.config.primary_path_length,
            });
        }
        let entrance = slots[rng.pick_index(slots.len())];
        self.generate_from(entrance, rng)
    }

    /// Generate a layout from a fixed entrance slot.
    pub fn generate_from<R: RandomSource + ?Sized>(
        &self,
        entrance: (i32, i32),
        rng: &mut R,
    ) -> Result<DungeonResult, GenerationError> {
        puffin::profile_function!();
        self.config.validate()?;

        let mut layout = ProceduralLayout::new(self.config.layout_width, self.config.layout_height);
        if !layout.in_bounds(entrance.0, entrance.1) {
            return Err(GenerationError::EntranceOutOfBounds {
                x: entrance.0,
                y: entrance.1,
            });
        }

        let length = self.config.primary_path_length;
        if !self.config.path_fits_from(entrance.0, entrance.1) {
            return Err(GenerationError::EntranceParity {
                x: entrance.0,
                y: entrance.1,
                length,
            });
        }

        layout.occupy(entrance.0, entrance.1, ENTRANCE_MARKER);
        let mut candidates = Vec::new();
        if !carve(&mut layout, entrance, length, ENTRANCE_MARKER, &mut candidates, rng) {
            warn!(x = entrance.0, y = entrance.1, length, "primary_path_failed");
            return Err(GenerationError::PrimaryPathFailed {
                x: entrance.0,
                y: entrance.1,
                length,
            });
        }

        let exit = layout.highest_marker_cell().unwrap_or(entrance);
        let branches = self.grow_branches(&mut layout, &mut candidates, rng);

        Ok(DungeonResult {
            layout,
            entrance,
            exit,
            branches,
        })
    }

    /// Grow up to `max_branches` side paths from random branch candidates.
    /// A candidate that cannot hold a branch is dropped from the list; running
    /// out of candidates simply ends the search early.
    fn grow_branches<R: RandomSource + ?Sized>(
        &self,
        layout: &mut ProceduralLayout,
        candidates: &mut Vec<(i32, i32)>,
        rng: &mut R,
    ) -> u32 {
        let mut branches = 0;
        while branches < self.config.max_branches && !candidates.is_empty() {
            let idx = rng.pick_index(candidates.len());
            let start = candidates[idx];
            let length = rng.range_inclusive(self.config.branch_length_min, self.config.branch_length_max);
            let marker = layout.marker(start.0, start.1);

            // The branch point joins this pass so its door to the first new slot resolves
            layout.set_dirty(start.0, start.1, true);
            if carve(layout, start, length, marker, candidates, rng) {
                branches += 1;
                debug!(x = start.0, y = start.1, length, branches, "branch_grown");
            } else {
                layout.set_dirty(start.0, start.1, false);
                candidates.remove(idx);
                debug!(x = start.0, y = start.1, length, remaining = candidates.len(), "branch_candidate_discarded");
            }
        }
        branches
    }
}
