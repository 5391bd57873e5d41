//! Level geometry for the rill water-flow puzzle.
//!
//! This crate defines the static world model the simulation runs against —
//! dimensions, walls, emitters, sinks — and the text format levels are
//! written in. It knows nothing about water: the simulation owns all moving
//! state and treats a [`GridWorld`] as read-only apart from the wall
//! mutation primitives the interactive surfaces use.

/// Error types used throughout the crate.
pub mod error;
/// Coordinates and directions.
pub mod geom;
/// The world model: emitters, walls, sinks.
pub mod grid;
/// Level text parsing and the built-in level registry.
pub mod level;
/// Recursive-division map generation.
pub mod maze;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export geometry primitives.
pub use geom::{Coord, Direction};
/// Re-export world model types.
pub use grid::{Emitter, EmitterId, GridWorld};
/// Re-export level loading entry points.
pub use level::{get_level, level_names, load_level, parse_level};
/// Re-export the split-map generator.
pub use maze::split_map;
