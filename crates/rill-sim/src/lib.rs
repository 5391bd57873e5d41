//! Discrete-time water-flow simulation for rill.
//!
//! The engine advances a [`SimulationState`] one tick at a time against a
//! read-only [`rill_core::GridWorld`]: emitters spawn water, every cell
//! proposes a move, collisions are resolved against a single pre-tick
//! snapshot (including rotating closed loops and exclusive sink claims),
//! stationary water ages and evaporates, and fragments cut off from their
//! emitter are pruned. Each tick commits atomically; readers never observe
//! a half-applied tick.

/// ASCII rendering of world plus water.
pub mod ascii;
/// Timing configuration.
pub mod config;
/// The tick orchestrator.
pub mod engine;
/// Water cells and the mutable simulation state.
pub mod state;

mod pruner;
mod resolver;

/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`engine::SimulationEngine`].
pub use engine::SimulationEngine;
/// Re-exports of [`state::SimulationState`] and [`state::WaterCell`].
pub use state::{SimulationState, WaterCell};
