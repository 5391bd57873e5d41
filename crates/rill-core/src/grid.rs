use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::geom::{Coord, Direction};

/// Identifier of an emitter, dense and stable: assigned in parse order,
/// starting at zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EmitterId(pub u32);

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed source tile that spawns water in the direction it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emitter {
    /// Stable identifier.
    pub id: EmitterId,
    /// Tile the emitter occupies. Water never enters this tile.
    pub pos: Coord,
    /// Direction spawned water initially flows.
    pub dir: Direction,
}

/// Static level geometry: dimensions, walls, emitters, and sinks.
///
/// Immutable during a tick; the only mutations the runtime surfaces perform
/// are [`GridWorld::add_wall`] and [`GridWorld::remove_wall`]. Wall, sink,
/// and emitter tile sets are validated pairwise disjoint at construction —
/// the simulation relies on that precondition and never re-checks it.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: i32,
    height: i32,
    walls: HashSet<Coord>,
    emitters: Vec<Emitter>,
    sinks: HashSet<Coord>,
    emitter_tiles: HashSet<Coord>,
}

impl GridWorld {
    /// Build a world from its parts, validating bounds and disjointness.
    pub fn new(
        width: i32,
        height: i32,
        walls: HashSet<Coord>,
        emitters: Vec<Emitter>,
        sinks: HashSet<Coord>,
    ) -> CoreResult<Self> {
        let emitter_tiles: HashSet<Coord> = emitters.iter().map(|e| e.pos).collect();

        for &tile in walls.iter().chain(sinks.iter()).chain(emitter_tiles.iter()) {
            if !(0..width).contains(&tile.x) || !(0..height).contains(&tile.y) {
                return Err(CoreError::OutOfBounds {
                    x: tile.x,
                    y: tile.y,
                    width,
                    height,
                });
            }
        }

        if emitter_tiles.len() != emitters.len() {
            // Two emitters on one tile: report the first duplicate.
            let mut seen = HashSet::new();
            for e in &emitters {
                if !seen.insert(e.pos) {
                    return Err(CoreError::TileConflict {
                        x: e.pos.x,
                        y: e.pos.y,
                    });
                }
            }
        }
        for &tile in &emitter_tiles {
            if walls.contains(&tile) || sinks.contains(&tile) {
                return Err(CoreError::TileConflict {
                    x: tile.x,
                    y: tile.y,
                });
            }
        }
        if let Some(&tile) = walls.intersection(&sinks).next() {
            return Err(CoreError::TileConflict {
                x: tile.x,
                y: tile.y,
            });
        }

        Ok(Self {
            width,
            height,
            walls,
            emitters,
            sinks,
            emitter_tiles,
        })
    }

    /// Grid width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `tile` lies inside the grid.
    pub fn in_bounds(&self, tile: Coord) -> bool {
        (0..self.width).contains(&tile.x) && (0..self.height).contains(&tile.y)
    }

    /// Whether `tile` is a wall.
    pub fn is_wall(&self, tile: Coord) -> bool {
        self.walls.contains(&tile)
    }

    /// Whether `tile` is a sink.
    pub fn is_sink(&self, tile: Coord) -> bool {
        self.sinks.contains(&tile)
    }

    /// Whether `tile` is occupied by an emitter.
    pub fn is_emitter_tile(&self, tile: Coord) -> bool {
        self.emitter_tiles.contains(&tile)
    }

    /// All walls.
    pub fn walls(&self) -> &HashSet<Coord> {
        &self.walls
    }

    /// All emitters, in id order.
    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// All sinks.
    pub fn sinks(&self) -> &HashSet<Coord> {
        &self.sinks
    }

    /// Place a wall. Returns `true` if `tile` is a wall afterwards; refused
    /// (returning `false`) out of bounds and on emitter or sink tiles.
    pub fn add_wall(&mut self, tile: Coord) -> bool {
        if !self.in_bounds(tile) || self.is_emitter_tile(tile) || self.is_sink(tile) {
            return false;
        }
        self.walls.insert(tile);
        true
    }

    /// Remove a wall. Returns `true` if the tile is in bounds (whether or not
    /// a wall was actually there).
    pub fn remove_wall(&mut self, tile: Coord) -> bool {
        if !self.in_bounds(tile) {
            return false;
        }
        self.walls.remove(&tile);
        true
    }
}
