//! Render-ready scene geometry.
//!
//! Projects packed rooms, doors and windows into 3D mesh descriptions a
//! downstream renderer can draw directly: extruded boxes for rooms, flat
//! panels for openings, and text labels at room centroids. Each floor is
//! lifted by `floor_index * floor_height`. The top view is the same boxes
//! with every z pinned to 0.

use serde::{Deserialize, Serialize};

use crate::adjacency::{Door, Opening, Window};
use crate::config::PlannerConfig;
use crate::constants::heights::{DOOR_HEIGHT, LABEL_Z, WINDOW_HEIGHT};
use crate::constants::openings::{
    DOOR_COLOR, DOOR_OPACITY, ROOM_OPACITY, WINDOW_COLOR, WINDOW_OPACITY,
};
use crate::packer::Layout;
use crate::room::RoomSpec;

/// Extruded box as an 8-vertex triangle mesh.
///
/// Vertices 0–3 are the base ring, 4–7 the top ring. `i`/`j`/`k` index
/// the triangle corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMesh {
    pub x: [f32; 8],
    pub y: [f32; 8],
    pub z: [f32; 8],
    pub i: [u32; 8],
    pub j: [u32; 8],
    pub k: [u32; 8],
    pub color: String,
    pub opacity: f32,
}

impl BoxMesh {
    pub fn extrude(room: &RoomSpec, base_z: f32, height: f32) -> Self {
        let (x, y, dx, dy) = (room.x, room.y, room.dx, room.dy);
        let top = base_z + height;
        Self {
            x: [x, x, x + dx, x + dx, x, x, x + dx, x + dx],
            y: [y, y + dy, y + dy, y, y, y + dy, y + dy, y],
            z: [base_z, base_z, base_z, base_z, top, top, top, top],
            i: [0, 0, 0, 1, 4, 4, 4, 5],
            j: [1, 2, 4, 2, 5, 6, 1, 6],
            k: [2, 3, 7, 3, 6, 7, 5, 7],
            color: room.color.clone(),
            opacity: ROOM_OPACITY,
        }
    }

    /// Copy with every vertex on the z = 0 plane.
    pub fn flattened(&self) -> Self {
        Self {
            z: [0.0; 8],
            ..self.clone()
        }
    }
}

/// Vertical rectangle for a door or window: 4 vertices, 2 triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelMesh {
    pub x: [f32; 4],
    pub y: [f32; 4],
    pub z: [f32; 4],
    pub i: [u32; 2],
    pub j: [u32; 2],
    pub k: [u32; 2],
    pub color: String,
    pub opacity: f32,
}

impl PanelMesh {
    fn raise(opening: &Opening, base_z: f32, height: f32, color: &str, opacity: f32) -> Self {
        let Opening { x, y, z, dx, dy } = *opening;
        let bottom = base_z + z;
        Self {
            x: [x, x + dx, x + dx, x],
            y: [y, y, y + dy, y + dy],
            z: [bottom, bottom, bottom + height, bottom + height],
            i: [0, 0],
            j: [1, 2],
            k: [2, 3],
            color: color.to_string(),
            opacity,
        }
    }

    pub fn door(door: &Door, base_z: f32) -> Self {
        Self::raise(&door.opening, base_z, DOOR_HEIGHT, DOOR_COLOR, DOOR_OPACITY)
    }

    pub fn window(window: &Window, base_z: f32) -> Self {
        Self::raise(
            &window.opening,
            base_z,
            WINDOW_HEIGHT,
            WINDOW_COLOR,
            WINDOW_OPACITY,
        )
    }
}

/// Room name and size, drawn at the room centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub text: String,
}

impl Label {
    pub fn for_room(room: &RoomSpec, base_z: f32) -> Self {
        let (x, y) = room.centroid();
        Self {
            x,
            y,
            z: base_z + LABEL_Z,
            text: format!("{}\n{}m x {}m", room.name, room.dx, room.dy),
        }
    }
}

/// Everything drawn for one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorScene {
    pub floor: u32,
    pub base_z: f32,
    pub rooms: Vec<BoxMesh>,
    pub labels: Vec<Label>,
    pub doors: Vec<PanelMesh>,
    pub windows: Vec<PanelMesh>,
}

/// Orthographic plan: all rooms, all z flattened to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopView {
    pub rooms: Vec<BoxMesh>,
    pub labels: Vec<Label>,
}

/// Complete render description for a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub floor_count: u32,
    pub floors: Vec<FloorScene>,
    pub top_view: TopView,
}

/// Emit one floor. `doors` and `windows` are drawn as given; the caller
/// decides which openings belong on this floor.
pub fn emit_floor(
    layout: &Layout,
    floor_index: u32,
    doors: &[&Door],
    windows: &[&Window],
    config: &PlannerConfig,
) -> FloorScene {
    let base_z = floor_index as f32 * config.floor_height;
    FloorScene {
        floor: floor_index,
        base_z,
        rooms: layout
            .rooms
            .iter()
            .map(|r| BoxMesh::extrude(r, base_z, config.room_height))
            .collect(),
        labels: layout
            .rooms
            .iter()
            .map(|r| Label::for_room(r, base_z))
            .collect(),
        doors: doors.iter().map(|d| PanelMesh::door(d, base_z)).collect(),
        windows: windows
            .iter()
            .map(|w| PanelMesh::window(w, base_z))
            .collect(),
    }
}

/// Top view of the given rooms.
pub fn emit_top_view<'a>(
    rooms: impl IntoIterator<Item = &'a RoomSpec>,
    config: &PlannerConfig,
) -> TopView {
    let mut view = TopView::default();
    for room in rooms {
        view.rooms
            .push(BoxMesh::extrude(room, 0.0, config.room_height).flattened());
        let mut label = Label::for_room(room, 0.0);
        label.z = 0.0;
        view.labels.push(label);
    }
    view
}

/// Title shown above the scene.
pub fn scene_title(floor_count: u32) -> String {
    format!("{}-Story Floor Plan", floor_count)
}
