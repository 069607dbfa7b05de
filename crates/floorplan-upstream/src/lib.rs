//! Room specification sources for the floor plan pipeline.
//!
//! The planner itself is pure (`floorplan-logic`). This crate supplies the
//! text it starts from: a blocking messages-API client with a bounded
//! timeout, a fixed-text source for tests and offline runs, and
//! [`generate`], which runs source → planner and turns any failure into an
//! errored, empty result instead of a panic.

pub mod client;
pub mod error;
pub mod generate;
pub mod prompt;
pub mod source;

pub use client::{MessagesClient, UpstreamConfig};
pub use error::{GenerationError, UpstreamError};
pub use generate::{generate, try_generate, GenerationReport, GenerationStatus};
pub use source::{FixedSource, RoomSource};
