use std::collections::HashMap;

use rill_core::{Coord, Direction, EmitterId};

/// One unit of flowing water occupying a single tile.
///
/// Cells are value types: each tick computes a fresh cell from the old one
/// rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterCell {
    /// Current heading.
    pub dir: Direction,
    /// Ticks since the cell last moved or was refreshed by foreign inflow.
    /// Always below the configured decay threshold.
    pub age: u32,
    /// The emitter this cell belongs to.
    pub owner: EmitterId,
    /// Which perpendicular direction to try first when blocked. Flips each
    /// time a turn is actually taken, so a cell boxed in against a dead end
    /// alternates instead of grinding into the same corner.
    pub prefer_left: bool,
}

impl WaterCell {
    /// A freshly spawned cell: age zero, preferring left turns.
    pub fn spawned(dir: Direction, owner: EmitterId) -> Self {
        Self {
            dir,
            age: 0,
            owner,
            prefer_left: true,
        }
    }
}

/// All mutable simulation state: the water map and the sink-claim map.
///
/// This is the only state the engine carries across ticks. Invariants upheld
/// by the engine: water coordinates are in bounds and never on a wall,
/// emitter, or sink tile; claim keys are a subset of the world's sinks; the
/// claim map is cleared exactly when the water map is empty at the start of
/// a tick.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    /// Water cells by coordinate.
    pub water: HashMap<Coord, WaterCell>,
    /// For each contested sink, the emitter currently privileged to enter it.
    pub sink_claims: HashMap<Coord, EmitterId>,
}

impl SimulationState {
    /// An empty state: no water, no claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all water.
    pub fn clear_water(&mut self) {
        self.water.clear();
    }

    /// Forget all sink claims, making every sink re-contestable.
    pub fn clear_sink_claims(&mut self) {
        self.sink_claims.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_cell_defaults() {
        let cell = WaterCell::spawned(Direction::Down, EmitterId(3));
        assert_eq!(cell.age, 0);
        assert_eq!(cell.owner, EmitterId(3));
        assert!(cell.prefer_left);
    }

    #[test]
    fn clearing_state() {
        let mut state = SimulationState::new();
        state
            .water
            .insert(Coord::new(1, 1), WaterCell::spawned(Direction::Up, EmitterId(0)));
        state.sink_claims.insert(Coord::new(2, 2), EmitterId(0));

        state.clear_water();
        assert!(state.water.is_empty());
        assert!(!state.sink_claims.is_empty());

        state.clear_sink_claims();
        assert!(state.sink_claims.is_empty());
    }
}
