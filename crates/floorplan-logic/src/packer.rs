//! Room packing using greedy shelf (row) placement.
//!
//! Rooms are sorted largest-first and laid left to right along rows whose
//! width is `sqrt(total_area * slack)`. When the next room would cross that
//! width a new row starts above the tallest room of the current one. This
//! is not optimal bin packing; it favors a regular grid that keeps most
//! rooms touching a neighbour.
//!
//! Cost is O(n log n) for the sort plus O(n) placement.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::room::RoomSpec;

/// Packed rooms of one floor. No two room rectangles overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub floor: u32,
    pub rooms: Vec<RoomSpec>,
}

impl Layout {
    pub fn empty(floor: u32) -> Self {
        Self {
            floor,
            rooms: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Width and depth of the bounding box anchored at the origin.
    pub fn bounds(&self) -> (f32, f32) {
        self.rooms.iter().fold((0.0_f32, 0.0_f32), |(w, h), r| {
            (w.max(r.right()), h.max(r.top()))
        })
    }

    /// Sum of room areas.
    pub fn total_area(&self) -> f32 {
        self.rooms.iter().map(RoomSpec::area).sum()
    }

    /// Area of the bounding box.
    pub fn footprint_area(&self) -> f32 {
        let (w, h) = self.bounds();
        w * h
    }

    /// Fraction of the bounding box covered by rooms, 0.0 for an empty layout.
    pub fn utilization(&self) -> f32 {
        let footprint = self.footprint_area();
        if footprint > 0.0 {
            self.total_area() / footprint
        } else {
            0.0
        }
    }
}

/// Row width for a set of rooms, or `None` when there is nothing to pack.
pub fn target_width(rooms: &[RoomSpec], slack: f32) -> Option<f32> {
    let total_area: f32 = rooms.iter().map(RoomSpec::area).sum();
    if rooms.is_empty() || total_area <= 0.0 {
        return None;
    }
    Some((total_area * slack).sqrt())
}

/// Shelf placement. Returns one `(x, y)` per input room, in input order.
pub fn shelf_positions(rooms: &[RoomSpec], slack: f32) -> Result<Vec<(f32, f32)>, LayoutError> {
    let width = target_width(rooms, slack).ok_or(LayoutError::PackingDegenerate)?;

    // Largest first; sort_by is stable so equal areas keep input order
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.sort_by(|&a, &b| rooms[b].area().total_cmp(&rooms[a].area()));

    let mut positions = vec![(0.0, 0.0); rooms.len()];
    let mut current_x = 0.0_f32;
    let mut current_y = 0.0_f32;
    let mut row_height = 0.0_f32;

    for idx in order {
        let room = &rooms[idx];
        // A room wider than the row still goes at the row start
        if current_x > 0.0 && current_x + room.dx > width {
            current_x = 0.0;
            current_y += row_height;
            row_height = 0.0;
        }
        positions[idx] = (current_x, current_y);
        current_x += room.dx;
        row_height = row_height.max(room.dy);
    }

    Ok(positions)
}

/// Pack rooms into a new layout. The input slice is left untouched.
pub fn try_pack(rooms: &[RoomSpec], floor: u32, slack: f32) -> Result<Layout, LayoutError> {
    let positions = shelf_positions(rooms, slack)?;
    let rooms = rooms
        .iter()
        .zip(positions)
        .map(|(room, (x, y))| room.placed_at(x, y))
        .collect();
    Ok(Layout { floor, rooms })
}

/// Like [`try_pack`], but a degenerate input yields an empty layout.
pub fn pack_rooms(rooms: &[RoomSpec], floor: u32, slack: f32) -> Layout {
    try_pack(rooms, floor, slack).unwrap_or_else(|_| Layout::empty(floor))
}
