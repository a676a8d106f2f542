//! Door placement between path-consecutive room slots.
//!
//! Two occupied slots get a door between them only when both were touched in
//! the same carving pass and their markers differ by exactly one. Slots that
//! merely happen to sit next to each other stay sealed.

use crate::layout::{Direction, ProceduralLayout};

/// Set door bits on every dirty, occupied cell in `dirty_cells`, then clear the
/// dirty flag on all of them. Bits are only ever added, so doors found by an
/// earlier pass survive later ones.
pub fn recompute_doors(layout: &mut ProceduralLayout, dirty_cells: &[(i32, i32)]) {
    let mut found = Vec::new();

    for &(x, y) in dirty_cells {
        let marker = layout.marker(x, y);
        if marker == 0 || !layout.is_dirty(x, y) {
            continue;
        }
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (nx, ny) = (x + dx, y + dy);
            let neighbor = layout.marker(nx, ny);
            if neighbor > 0 && layout.is_dirty(nx, ny) && neighbor.abs_diff(marker) == 1 {
                found.push((x, y, dir));
            }
        }
    }

    // Flags are read above and cleared only once every cell has been examined.
    for (x, y, dir) in found {
        if let Some(slot) = layout.get_mut(x, y) {
            slot.doors.insert(dir);
        }
    }
    for &(x, y) in dirty_cells {
        layout.set_dirty(x, y, false);
    }
}

/// Recompute doors over every slot currently flagged dirty.
pub fn recompute_dirty(layout: &mut ProceduralLayout) {
    let dirty = layout.dirty_cells();
    recompute_doors(layout, &dirty);
}
