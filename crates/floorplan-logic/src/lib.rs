//! Pure floor plan logic.
//!
//! This crate turns a list of room descriptions into a packed,
//! non-overlapping floor layout with doors and windows, and projects it
//! into render-ready geometry. Functions take plain data and return new
//! values; there is no I/O, so everything is unit-testable and the
//! upstream room source can be anything that produces text.
//!
//! # Pipeline
//!
//! `extract` → `room` (validate) → `packer` → `adjacency` → `scene`,
//! wired together by `building`.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Door inference between rooms, windows on perimeter edges |
//! | [`building`] | Per-floor planning and scene rendering entry points |
//! | [`config`] | `PlannerConfig` and its validation |
//! | [`constants`] | Footprint bounds, heights, opening sizes |
//! | [`error`] | `LayoutError` |
//! | [`extract`] | Best-effort JSON array extraction from free text |
//! | [`geometry`] | Plan validation (overlaps, bounds, openings, connectivity) |
//! | [`packer`] | Greedy shelf packing into a `Layout` |
//! | [`palette`] | Named color palette and random fallback |
//! | [`room`] | `RawRoom` / `RoomSpec` and the validation boundary |
//! | [`scene`] | Box/panel/label meshes, per-floor and top-view scenes |

pub mod adjacency;
pub mod building;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod packer;
pub mod palette;
pub mod room;
pub mod scene;

pub use building::{plan_building, plan_from_raw, plan_from_text, render_scene, Building};
pub use config::PlannerConfig;
pub use error::LayoutError;
pub use room::{RawRoom, RoomSpec};
