use std::ops::Range;

use rill_core::Coord;

/// A single script command.
///
/// The script language owns no simulation logic: every command maps onto
/// the engine's `tick` or the world's wall-mutation primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a built-in level and clear all water and claims.
    Level(String),
    /// Advance the given number of ticks.
    Wait(u64),
    /// Advance for a wall-clock duration, converted to whole ticks by
    /// ceiling division against the tick length.
    WaitMs(u64),
    /// Place a wall, clearing any water on that tile.
    AddWall(Coord),
    /// Remove a wall, clearing any water on that tile.
    RemoveWall(Coord),
}

/// A command together with its source span, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedCommand {
    /// The parsed command.
    pub command: Command,
    /// Byte range of the statement in the script source.
    pub span: Range<usize>,
}
