/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Configuration errors raised while loading level geometry.
///
/// All of these abort the load; the engine never sees a half-built world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested level name is not in the built-in registry.
    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    /// The level text contained no tiles.
    #[error("level '{0}' is empty")]
    EmptyLevel(String),

    /// The level text contained a glyph outside the tile alphabet.
    #[error("level '{level}': unknown glyph '{glyph}' at {x},{y}")]
    UnknownGlyph {
        /// The level being parsed.
        level: String,
        /// The offending character.
        glyph: char,
        /// Column of the glyph.
        x: i32,
        /// Row of the glyph.
        y: i32,
    },

    /// Two of the wall/sink/emitter sets claim the same tile.
    #[error("conflicting tiles at {x},{y}: wall, sink, and emitter sets must be disjoint")]
    TileConflict {
        /// Column of the contested tile.
        x: i32,
        /// Row of the contested tile.
        y: i32,
    },

    /// Split-map generation needs odd dimensions of at least 3x3.
    #[error("maze dimensions must be odd and at least 3x3, got {width}x{height}")]
    BadMazeDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A wall, sink, or emitter lies outside the grid.
    #[error("tile {x},{y} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column of the stray tile.
        x: i32,
        /// Row of the stray tile.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },
}
