//! Door and window inference for packed rooms.
//!
//! Doors go between every pair of rooms that pass a coarse proximity test;
//! windows go on room edges that lie on the footprint perimeter. Both are
//! placed with a midpoint heuristic rather than exact wall intersection,
//! which is close enough for the grid-aligned output of the packer.
//!
//! `compute_adjacencies` scans all unordered pairs, O(n²). That is fine for
//! house-sized inputs (well under 100 rooms per floor); larger inputs would
//! want a grid or R-tree behind the same signature.

use serde::{Deserialize, Serialize};

use crate::constants::footprint::EDGE_EPSILON;
use crate::constants::heights::WINDOW_SILL;
use crate::constants::openings::OPENING_WIDTH;
use crate::room::RoomSpec;

/// A flat rectangular opening: one of `dx`/`dy` is zero, the other is the
/// width along the wall. Height is implied by the kind of opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub dx: f32,
    pub dy: f32,
}

/// Door between two rooms of the same floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub floor: u32,
    /// Indices into the floor's room list, lower first.
    pub rooms: (usize, usize),
    pub opening: Opening,
}

/// Which side of a room a window sits on. West is `x = 0`, South is `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    West,
    East,
    South,
    North,
}

/// Window on an exterior edge of a room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub floor: u32,
    /// Index into the floor's room list.
    pub room: usize,
    pub side: WallSide,
    pub opening: Opening,
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EDGE_EPSILON
}

/// Coarse proximity test: the rooms' origins are no further apart on each
/// axis than the sum of their extents. Permissive on purpose, so rooms
/// separated by packing slack still get a door. Symmetric.
pub fn are_adjacent(a: &RoomSpec, b: &RoomSpec) -> bool {
    (a.x - b.x).abs() <= a.dx + b.dx && (a.y - b.y).abs() <= a.dy + b.dy
}

/// Door position for an adjacent pair.
///
/// Side-by-side rooms (one's right edge on the other's left edge) get a
/// door in the shared vertical wall; anything else is treated as stacked
/// and gets a door in a horizontal wall.
pub fn door_between(a: &RoomSpec, b: &RoomSpec) -> Opening {
    let side_by_side = approx_eq(a.right(), b.x) || approx_eq(b.right(), a.x);
    if side_by_side {
        Opening {
            x: a.x.max(b.x),
            y: a.y.max(b.y) + a.dy.min(b.dy) / 2.0,
            z: 0.0,
            dx: 0.0,
            dy: OPENING_WIDTH,
        }
    } else {
        Opening {
            x: a.x.max(b.x) + a.dx.min(b.dx) / 2.0,
            y: a.y.max(b.y),
            z: 0.0,
            dx: OPENING_WIDTH,
            dy: 0.0,
        }
    }
}

/// One door per adjacent unordered pair, in pair scan order.
pub fn compute_adjacencies(rooms: &[RoomSpec]) -> Vec<Door> {
    let mut doors = Vec::new();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let (a, b) = (&rooms[i], &rooms[j]);
            if a.floor == b.floor && are_adjacent(a, b) {
                doors.push(Door {
                    floor: a.floor,
                    rooms: (i, j),
                    opening: door_between(a, b),
                });
            }
        }
    }
    doors
}

/// Windows on the perimeter edges of one room: at most one on a vertical
/// edge and one on a horizontal edge, each centered on its edge.
pub fn exterior_windows(room: &RoomSpec, max_dimension: f32) -> Vec<(WallSide, Opening)> {
    let mut windows = Vec::with_capacity(2);

    let vertical = if approx_eq(room.x, 0.0) {
        Some((WallSide::West, room.x))
    } else if approx_eq(room.right(), max_dimension) {
        Some((WallSide::East, room.right()))
    } else {
        None
    };
    if let Some((side, x)) = vertical {
        windows.push((
            side,
            Opening {
                x,
                y: room.y + room.dy / 2.0 - OPENING_WIDTH / 2.0,
                z: WINDOW_SILL,
                dx: 0.0,
                dy: OPENING_WIDTH,
            },
        ));
    }

    let horizontal = if approx_eq(room.y, 0.0) {
        Some((WallSide::South, room.y))
    } else if approx_eq(room.top(), max_dimension) {
        Some((WallSide::North, room.top()))
    } else {
        None
    };
    if let Some((side, y)) = horizontal {
        windows.push((
            side,
            Opening {
                x: room.x + room.dx / 2.0 - OPENING_WIDTH / 2.0,
                y,
                z: WINDOW_SILL,
                dx: OPENING_WIDTH,
                dy: 0.0,
            },
        ));
    }

    windows
}

/// Windows for every room, independent of adjacency.
pub fn compute_windows(rooms: &[RoomSpec], max_dimension: f32) -> Vec<Window> {
    rooms
        .iter()
        .enumerate()
        .flat_map(|(idx, room)| {
            exterior_windows(room, max_dimension)
                .into_iter()
                .map(move |(side, opening)| Window {
                    floor: room.floor,
                    room: idx,
                    side,
                    opening,
                })
        })
        .collect()
}
