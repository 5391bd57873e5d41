use rill_core::{GridWorld, load_level};
use rill_sim::{SimConfig, SimulationEngine, SimulationState, ascii};

use crate::command::Command;
use crate::error::ScriptResult;
use crate::parser::parse;

/// Executes parsed scripts against a world and a simulation state.
///
/// The runner owns no simulation logic: commands only call the engine's
/// `tick` and the world's wall primitives. Wall commands silently ignore
/// out-of-bounds coordinates and refuse emitter and sink tiles, and always
/// clear any water standing on the changed tile.
#[derive(Debug)]
pub struct ScriptRunner {
    engine: SimulationEngine,
    world: GridWorld,
    state: SimulationState,
}

impl ScriptRunner {
    /// Create a runner on the named built-in level.
    pub fn new(level: &str, config: SimConfig) -> ScriptResult<Self> {
        Ok(Self {
            engine: SimulationEngine::new(config),
            world: load_level(level)?,
            state: SimulationState::new(),
        })
    }

    /// Parse and execute a whole script, stopping at the first error.
    pub fn run_script(&mut self, source: &str) -> ScriptResult<()> {
        for spanned in parse(source)? {
            self.execute(&spanned.command)?;
        }
        Ok(())
    }

    /// Execute a single command.
    pub fn execute(&mut self, command: &Command) -> ScriptResult<()> {
        match command {
            Command::Level(name) => {
                self.world = load_level(name)?;
                self.state = SimulationState::new();
            }
            Command::Wait(ticks) => self.advance(*ticks),
            Command::WaitMs(ms) => self.advance(self.engine.config().steps_for_ms(*ms)),
            Command::AddWall(pos) => {
                if self.world.add_wall(*pos) {
                    self.state.water.remove(pos);
                }
            }
            Command::RemoveWall(pos) => {
                if self.world.remove_wall(*pos) {
                    self.state.water.remove(pos);
                }
            }
        }
        Ok(())
    }

    fn advance(&mut self, ticks: u64) {
        self.engine.run(&self.world, &mut self.state, ticks);
    }

    /// The current world geometry.
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// The current simulation state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The board rendered with coordinate labels, as the headless surfaces
    /// print it when a script finishes.
    pub fn render_labeled(&self) -> String {
        ascii::render_with_coords(&self.world, &self.state)
    }
}
