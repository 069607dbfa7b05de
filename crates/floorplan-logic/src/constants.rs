//! Floor plan constants — footprint bounds, heights, opening sizes.
//!
//! Plain `f32` values in meters, no runtime dependency. `PlannerConfig`
//! defaults are built from these; the scene emitter uses the opening
//! sizes directly.

pub mod footprint {
    /// Largest allowed coordinate or room extent.
    pub const MAX_DIMENSION: f32 = 50.0;
    /// Smallest allowed room extent.
    pub const MIN_DIMENSION: f32 = 1.0;
    /// Multiplier on total room area when picking the packing row width.
    /// The extra 10% is circulation space.
    pub const PACKING_SLACK: f32 = 1.1;
    /// Tolerance for edge coincidence tests.
    pub const EDGE_EPSILON: f32 = 1e-4;
    /// Highest floor index a room may carry; larger values are clamped.
    pub const MAX_FLOOR: u32 = 99;
}

pub mod heights {
    /// Vertical distance between consecutive floors.
    pub const FLOOR_HEIGHT: f32 = 3.1;
    /// Extruded height of a room box.
    pub const ROOM_HEIGHT: f32 = 3.0;
    /// Label height above the floor base.
    pub const LABEL_Z: f32 = 1.5;
    pub const DOOR_HEIGHT: f32 = 2.0;
    pub const WINDOW_HEIGHT: f32 = 1.0;
    /// Window sill height above the floor base.
    pub const WINDOW_SILL: f32 = 1.5;
}

pub mod openings {
    /// Width of a door or window along its wall.
    pub const OPENING_WIDTH: f32 = 1.0;

    pub const ROOM_OPACITY: f32 = 0.7;
    pub const DOOR_COLOR: &str = "brown";
    pub const DOOR_OPACITY: f32 = 0.7;
    pub const WINDOW_COLOR: &str = "lightblue";
    pub const WINDOW_OPACITY: f32 = 0.5;
}
