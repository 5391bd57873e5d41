use rill_core::GridWorld;

use crate::config::SimConfig;
use crate::pruner::prune;
use crate::resolver::MovementResolver;
use crate::state::SimulationState;

/// The top-level simulation orchestrator.
///
/// A tick is a pure function of `(world, state)`: reset sink claims if the
/// board starts empty, spawn from emitters, resolve all movement against one
/// consistent snapshot, age and evaporate, prune disconnected fragments, and
/// commit the new water map atomically. No state survives a tick outside the
/// [`SimulationState`] passed in, so independent states can be advanced on
/// separate threads; a single tick is never parallelized internally.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimConfig,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulationEngine {
    /// Create an engine with the given timing configuration.
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// The engine's timing configuration.
    pub fn config(&self) -> SimConfig {
        self.config
    }

    /// Advance the simulation by one tick.
    pub fn tick(&self, world: &GridWorld, state: &mut SimulationState) {
        if state.water.is_empty() {
            // The board has fully drained: every sink is re-contestable.
            state.clear_sink_claims();
        }

        let resolver = MovementResolver::new(world, state, self.config.decay_steps());
        resolver.spawn(state);
        let next = resolver.resolve(state);
        state.water = prune(next, world.emitters());
    }

    /// Advance the simulation by `ticks` ticks.
    pub fn run(&self, world: &GridWorld, state: &mut SimulationState, ticks: u64) {
        for _ in 0..ticks {
            self.tick(world, state);
        }
    }
}
