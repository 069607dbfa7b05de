//! Building assembly: validated rooms → per-floor layouts → doors and
//! windows → scene.
//!
//! Every stage returns fresh values; the caller's room list is never
//! touched. Doors and windows are kept as building-wide sets tagged with
//! the floor that produced them, and `render_scene` decides (via
//! `OpeningReplay`) whether each floor draws all of them or only its own.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::adjacency::{compute_adjacencies, compute_windows, Door, Window};
use crate::config::{FloorPacking, OpeningReplay, PlannerConfig};
use crate::error::LayoutError;
use crate::extract::parse_room_text;
use crate::packer::{pack_rooms, Layout};
use crate::room::{validate_rooms, RawRoom, RoomSpec};
use crate::scene::{emit_floor, emit_top_view, scene_title, Scene};

/// All floors of one generated plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub layouts: BTreeMap<u32, Layout>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
}

impl Building {
    /// `max(floor) + 1` over all rooms, 0 for an empty building.
    pub fn floor_count(&self) -> u32 {
        self.rooms()
            .map(|r| r.floor.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomSpec> {
        self.layouts.values().flat_map(|l| l.rooms.iter())
    }

    pub fn room_count(&self) -> usize {
        self.layouts.values().map(|l| l.rooms.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.room_count() == 0
    }

    pub fn layout(&self, floor: u32) -> Option<&Layout> {
        self.layouts.get(&floor)
    }
}

/// Group rooms by floor, keeping input order within each floor.
pub fn partition_by_floor(rooms: &[RoomSpec]) -> BTreeMap<u32, Vec<RoomSpec>> {
    let mut by_floor: BTreeMap<u32, Vec<RoomSpec>> = BTreeMap::new();
    for room in rooms {
        by_floor.entry(room.floor).or_default().push(room.clone());
    }
    by_floor
}

/// Pack validated rooms and infer their doors and windows.
pub fn plan_building(rooms: &[RoomSpec], config: &PlannerConfig) -> Building {
    let layouts: BTreeMap<u32, Layout> = match config.floor_packing {
        FloorPacking::PerFloor => partition_by_floor(rooms)
            .into_iter()
            .map(|(floor, floor_rooms)| {
                let layout = pack_rooms(&floor_rooms, floor, config.packing_slack);
                if layout.is_empty() {
                    log::warn!("Floor {} has nothing to pack, leaving it empty", floor);
                }
                (floor, layout)
            })
            .collect(),
        FloorPacking::Shared => {
            let shared = pack_rooms(rooms, 0, config.packing_slack);
            partition_by_floor(&shared.rooms)
                .into_iter()
                .map(|(floor, rooms)| (floor, Layout { floor, rooms }))
                .collect()
        }
    };

    let mut building = Building {
        layouts,
        ..Default::default()
    };
    for layout in building.layouts.values() {
        building.doors.extend(compute_adjacencies(&layout.rooms));
        building
            .windows
            .extend(compute_windows(&layout.rooms, config.max_dimension));
    }

    log::info!(
        "Planned {} rooms on {} floors: {} doors, {} windows",
        building.room_count(),
        building.floor_count(),
        building.doors.len(),
        building.windows.len()
    );
    building
}

/// Validate raw rooms, then plan.
pub fn plan_from_raw(raw: &[RawRoom], config: &PlannerConfig, rng: &mut impl Rng) -> Building {
    let rooms = validate_rooms(raw, config, rng);
    plan_building(&rooms, config)
}

/// Extract a room list from upstream text, validate and plan.
pub fn plan_from_text(
    text: &str,
    config: &PlannerConfig,
    rng: &mut impl Rng,
) -> Result<Building, LayoutError> {
    let raw = parse_room_text(text)?;
    log::info!("Parsed {} rooms from upstream text", raw.len());
    Ok(plan_from_raw(&raw, config, rng))
}

/// Build the render description. Floors without rooms still get an
/// (empty) entry so floor indices line up with stacking height.
pub fn render_scene(building: &Building, config: &PlannerConfig) -> Scene {
    let floor_count = building.floor_count();
    let floors = (0..floor_count)
        .map(|floor| {
            let empty = Layout::empty(floor);
            let layout = building.layout(floor).unwrap_or(&empty);
            let on_floor = |source: u32| match config.opening_replay {
                OpeningReplay::AllFloors => true,
                OpeningReplay::OwnFloor => source == floor,
            };
            let doors: Vec<&Door> = building.doors.iter().filter(|d| on_floor(d.floor)).collect();
            let windows: Vec<&Window> = building
                .windows
                .iter()
                .filter(|w| on_floor(w.floor))
                .collect();
            emit_floor(layout, floor, &doors, &windows, config)
        })
        .collect();

    Scene {
        title: scene_title(floor_count),
        floor_count,
        floors,
        top_view: emit_top_view(building.rooms(), config),
    }
}
