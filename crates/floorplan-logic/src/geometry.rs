//! Geometry validation for planned buildings.
//!
//! Pure functions that take rooms/doors/windows and return validation
//! errors. Used by the test suite and the headless harness to confirm a
//! plan is physically consistent.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::adjacency::{Door, Window};
use crate::building::Building;
use crate::packer::Layout;
use crate::room::RoomSpec;

/// A geometry validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Room geometry (per-room) ─────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(rooms: &[RoomSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in rooms {
        if r.dx <= 0.0 || r.dy <= 0.0 {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room '{}' has non-positive dimensions: {}×{}",
                    r.name, r.dx, r.dy
                ),
            });
        }
    }
    errors
}

/// Check rooms stay inside the `[0, max_dimension]` square.
///
/// The packer does not know about the footprint, so a large program can
/// spill past it; that is reported as a warning, not an error.
pub fn check_rooms_within_footprint(
    rooms: &[RoomSpec],
    max_dimension: f32,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in rooms {
        if r.x < 0.0 || r.y < 0.0 || r.right() > max_dimension || r.top() > max_dimension {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Room '{}' extends outside footprint: ({:.1},{:.1})→({:.1},{:.1}) vs {}",
                    r.name,
                    r.x,
                    r.y,
                    r.right(),
                    r.top(),
                    max_dimension
                ),
            });
        }
    }
    errors
}

// ── B. Room-to-room (pairwise) ──────────────────────────────────────────

/// AABB overlap test: no two rooms on the same floor may share area.
pub fn check_room_overlaps(layout: &Layout) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let rooms = &layout.rooms;
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if rooms[i].overlaps(&rooms[j]) {
                errors.push(ValidationError {
                    category: "room_overlap",
                    severity: Severity::Error,
                    message: format!(
                        "Rooms '{}' and '{}' overlap on floor {}",
                        rooms[i].name, rooms[j].name, layout.floor
                    ),
                });
            }
        }
    }
    errors
}

// ── C. Openings ─────────────────────────────────────────────────────────

/// Check every door and window points at a room on its own floor.
pub fn check_opening_rooms_exist(
    building: &Building,
    doors: &[Door],
    windows: &[Window],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let room_count = |floor: u32| building.layout(floor).map_or(0, |l| l.rooms.len());

    for d in doors {
        let (a, b) = d.rooms;
        let n = room_count(d.floor);
        if a >= n || b >= n || a == b {
            errors.push(ValidationError {
                category: "door_validity",
                severity: Severity::Error,
                message: format!(
                    "Door on floor {} references rooms ({}, {}) but floor has {}",
                    d.floor, a, b, n
                ),
            });
        }
    }
    for w in windows {
        if w.room >= room_count(w.floor) {
            errors.push(ValidationError {
                category: "window_validity",
                severity: Severity::Error,
                message: format!(
                    "Window on floor {} references missing room {}",
                    w.floor, w.room
                ),
            });
        }
    }
    errors
}

/// Check that no room carries more than two windows.
pub fn check_window_counts(windows: &[Window]) -> Vec<ValidationError> {
    let mut per_room: HashMap<(u32, usize), usize> = HashMap::new();
    for w in windows {
        *per_room.entry((w.floor, w.room)).or_default() += 1;
    }

    let mut errors = Vec::new();
    for ((floor, room), count) in per_room {
        if count > 2 {
            errors.push(ValidationError {
                category: "window_validity",
                severity: Severity::Error,
                message: format!("Room {} on floor {} has {} windows", room, floor, count),
            });
        }
    }
    errors
}

// ── D. Connectivity (graph-level) ───────────────────────────────────────

/// Check that every room on each floor is reachable via doors (BFS).
pub fn check_floor_connectivity(building: &Building) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (floor, layout) in &building.layouts {
        if layout.rooms.len() <= 1 {
            continue;
        }

        let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
        for d in building.doors.iter().filter(|d| d.floor == *floor) {
            adj.entry(d.rooms.0).or_default().push(d.rooms.1);
            adj.entry(d.rooms.1).or_default().push(d.rooms.0);
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(0usize);
        queue.push_back(0usize);

        while let Some(current) = queue.pop_front() {
            if let Some(neighbors) = adj.get(&current) {
                for &next in neighbors {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        let unreached: Vec<&str> = layout
            .rooms
            .iter()
            .enumerate()
            .filter(|(i, _)| !visited.contains(i))
            .map(|(_, r)| r.name.as_str())
            .collect();

        if !unreached.is_empty() {
            errors.push(ValidationError {
                category: "connectivity",
                severity: Severity::Warning,
                message: format!(
                    "Floor {}: {} of {} rooms unreachable (e.g. '{}')",
                    floor,
                    unreached.len(),
                    layout.rooms.len(),
                    unreached[0]
                ),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all geometry validations and return combined results.
pub fn validate_building(building: &Building, max_dimension: f32) -> Vec<ValidationError> {
    let mut all = Vec::new();
    for layout in building.layouts.values() {
        all.extend(check_room_dimensions(&layout.rooms));
        all.extend(check_rooms_within_footprint(&layout.rooms, max_dimension));
        all.extend(check_room_overlaps(layout));
    }
    all.extend(check_opening_rooms_exist(
        building,
        &building.doors,
        &building.windows,
    ));
    all.extend(check_window_counts(&building.windows));
    all.extend(check_floor_connectivity(building));
    all
}

/// Only the `Severity::Error` entries.
pub fn errors_only(results: &[ValidationError]) -> Vec<&ValidationError> {
    results
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::{Opening, WallSide};
    use std::collections::BTreeMap;

    fn make_room(name: &str, floor: u32, x: f32, y: f32, dx: f32, dy: f32) -> RoomSpec {
        RoomSpec {
            name: name.to_string(),
            x,
            y,
            dx,
            dy,
            color: "plum".to_string(),
            floor,
        }
    }

    fn make_door(floor: u32, a: usize, b: usize) -> Door {
        Door {
            floor,
            rooms: (a, b),
            opening: Opening {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                dx: 1.0,
                dy: 0.0,
            },
        }
    }

    fn make_window(floor: u32, room: usize) -> Window {
        Window {
            floor,
            room,
            side: WallSide::West,
            opening: Opening {
                x: 0.0,
                y: 0.0,
                z: 1.5,
                dx: 0.0,
                dy: 1.0,
            },
        }
    }

    fn building_of(rooms: Vec<RoomSpec>, doors: Vec<Door>, windows: Vec<Window>) -> Building {
        let mut layouts: BTreeMap<u32, Layout> = BTreeMap::new();
        for r in rooms {
            let floor = r.floor;
            layouts
                .entry(floor)
                .or_insert_with(|| Layout::empty(floor))
                .rooms
                .push(r);
        }
        Building {
            layouts,
            doors,
            windows,
        }
    }

    #[test]
    fn test_zero_width_room() {
        let rooms = vec![make_room("Slot", 0, 0.0, 0.0, 0.0, 10.0)];
        let errs = check_room_dimensions(&rooms);
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("non-positive"));
    }

    #[test]
    fn test_room_outside_footprint() {
        let rooms = vec![make_room("Wing", 0, 45.0, 0.0, 10.0, 10.0)];
        let errs = check_rooms_within_footprint(&rooms, 50.0);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].severity, Severity::Warning);
    }

    #[test]
    fn test_overlapping_rooms() {
        let layout = Layout {
            floor: 0,
            rooms: vec![
                make_room("A", 0, 0.0, 0.0, 10.0, 10.0),
                make_room("B", 0, 5.0, 5.0, 10.0, 10.0),
            ],
        };
        assert_eq!(check_room_overlaps(&layout).len(), 1);
    }

    #[test]
    fn test_no_overlap_adjacent() {
        let layout = Layout {
            floor: 0,
            rooms: vec![
                make_room("A", 0, 0.0, 0.0, 10.0, 10.0),
                make_room("B", 0, 10.0, 0.0, 10.0, 10.0),
            ],
        };
        assert!(check_room_overlaps(&layout).is_empty());
    }

    #[test]
    fn test_door_missing_room() {
        let building = building_of(
            vec![make_room("A", 0, 0.0, 0.0, 10.0, 10.0)],
            vec![make_door(0, 0, 5)],
            vec![],
        );
        let errs = check_opening_rooms_exist(&building, &building.doors, &building.windows);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].category, "door_validity");
    }

    #[test]
    fn test_window_on_wrong_floor() {
        let building = building_of(
            vec![make_room("A", 0, 0.0, 0.0, 10.0, 10.0)],
            vec![],
            vec![make_window(1, 0)],
        );
        let errs = check_opening_rooms_exist(&building, &building.doors, &building.windows);
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_too_many_windows() {
        let windows = vec![make_window(0, 0), make_window(0, 0), make_window(0, 0)];
        assert_eq!(check_window_counts(&windows).len(), 1);
        assert!(check_window_counts(&windows[..2]).is_empty());
    }

    #[test]
    fn test_floor_connectivity() {
        let building = building_of(
            vec![
                make_room("A", 0, 0.0, 0.0, 10.0, 10.0),
                make_room("B", 0, 10.0, 0.0, 10.0, 10.0),
                make_room("C", 0, 40.0, 40.0, 5.0, 5.0),
            ],
            vec![make_door(0, 0, 1)],
            vec![],
        );
        let errs = check_floor_connectivity(&building);
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("'C'"));
    }

    #[test]
    fn test_validate_building_clean() {
        let building = building_of(
            vec![
                make_room("A", 0, 0.0, 0.0, 10.0, 10.0),
                make_room("B", 0, 10.0, 0.0, 10.0, 10.0),
            ],
            vec![make_door(0, 0, 1)],
            vec![make_window(0, 0)],
        );
        let errs = validate_building(&building, 50.0);
        assert!(errs.is_empty(), "Expected no errors, got: {:?}", errs);
        assert!(errors_only(&errs).is_empty());
    }
}
