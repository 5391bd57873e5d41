pub mod export;
pub mod levels;
pub mod maze;
pub mod play;
pub mod run;
pub mod script;
pub mod show;

use rill_core::GridWorld;

/// Load a built-in level, mapping configuration errors to CLI errors.
fn load(name: &str) -> Result<GridWorld, String> {
    rill_core::load_level(name).map_err(|e| e.to_string())
}
