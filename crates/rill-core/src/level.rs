use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::geom::{Coord, Direction};
use crate::grid::{Emitter, EmitterId, GridWorld};

/// Wall glyph.
pub const WALL: char = '#';
/// Sink glyph.
pub const SINK: char = 'S';
/// Empty-tile glyph.
pub const EMPTY: char = '.';

const LEVEL_EMPTY: &str = r"
########################
#......................#
#......................#
#......................#
#......................#
#......................#
#......................#
#......................#
#......................#
########################
";

const LEVEL_CORRIDOR: &str = r"
##########
#>......S#
##########
";

const LEVEL_TURN: &str = r"
############################
#>........................S#
#..........................#
#..........................#
#S.........................#
#..........................#
#.........^................#
############################
";

const LEVEL_DUEL: &str = r"
###########
#>...S...<#
###########
";

const LEVEL_RING: &str = r"
########
#>.....#
#.####.#
#.####.#
#......#
########
";

/// Built-in levels, in menu order.
const LEVELS: [(&str, &str); 5] = [
    ("empty", LEVEL_EMPTY),
    ("corridor", LEVEL_CORRIDOR),
    ("turn", LEVEL_TURN),
    ("duel", LEVEL_DUEL),
    ("ring", LEVEL_RING),
];

/// Names of the built-in levels, in menu order.
pub fn level_names() -> Vec<&'static str> {
    LEVELS.iter().map(|&(name, _)| name).collect()
}

/// Look up a built-in level's text by name.
pub fn get_level(name: &str) -> CoreResult<&'static str> {
    LEVELS
        .iter()
        .find(|&&(n, _)| n == name)
        .map(|&(_, text)| text)
        .ok_or_else(|| CoreError::UnknownLevel(name.to_string()))
}

/// Load and parse a built-in level.
pub fn load_level(name: &str) -> CoreResult<GridWorld> {
    parse_level(name, get_level(name)?)
}

/// Parse level text into a [`GridWorld`].
///
/// `#` is a wall, `.` (or a space) an empty tile, `S` a sink, and one of
/// `^ > v <` an emitter facing that way. Emitter ids are assigned in
/// first-seen order, row-major. Blank lines at the top and bottom are
/// ignored; short rows are padded with empty tiles on the right.
pub fn parse_level(name: &str, text: &str) -> CoreResult<GridWorld> {
    let lines: Vec<&str> = {
        let all: Vec<&str> = text.lines().collect();
        let start = all.iter().take_while(|l| l.trim().is_empty()).count();
        let end = all.len() - all.iter().rev().take_while(|l| l.trim().is_empty()).count();
        if start < end {
            all[start..end].to_vec()
        } else {
            Vec::new()
        }
    };

    let height = i32::try_from(lines.len()).unwrap_or(i32::MAX);
    let width = lines
        .iter()
        .map(|l| i32::try_from(l.chars().count()).unwrap_or(i32::MAX))
        .max()
        .unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(CoreError::EmptyLevel(name.to_string()));
    }

    let mut walls = HashSet::new();
    let mut sinks = HashSet::new();
    let mut emitters = Vec::new();

    for (y, line) in lines.iter().enumerate() {
        for (x, glyph) in line.chars().enumerate() {
            let pos = Coord::new(x as i32, y as i32);
            match glyph {
                WALL => {
                    walls.insert(pos);
                }
                SINK => {
                    sinks.insert(pos);
                }
                EMPTY | ' ' => {}
                _ => {
                    let Some(dir) = Direction::from_glyph(glyph) else {
                        return Err(CoreError::UnknownGlyph {
                            level: name.to_string(),
                            glyph,
                            x: pos.x,
                            y: pos.y,
                        });
                    };
                    emitters.push(Emitter {
                        id: EmitterId(emitters.len() as u32),
                        pos,
                        dir,
                    });
                }
            }
        }
    }

    GridWorld::new(width, height, walls, emitters, sinks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyphs_and_assigns_ids_in_order() {
        let world = parse_level(
            "test",
            r"
#####
#>.S#
#.v.#
#####
",
        )
        .unwrap();

        assert_eq!(world.width(), 5);
        assert_eq!(world.height(), 4);
        assert!(world.is_wall(Coord::new(0, 0)));
        assert!(world.is_sink(Coord::new(3, 1)));

        let emitters = world.emitters();
        assert_eq!(emitters.len(), 2);
        assert_eq!(emitters[0].id, EmitterId(0));
        assert_eq!(emitters[0].pos, Coord::new(1, 1));
        assert_eq!(emitters[0].dir, Direction::Right);
        assert_eq!(emitters[1].id, EmitterId(1));
        assert_eq!(emitters[1].pos, Coord::new(2, 2));
        assert_eq!(emitters[1].dir, Direction::Down);
    }

    #[test]
    fn short_rows_are_padded_with_empty_tiles() {
        let world = parse_level("test", "####\n#>\n####").unwrap();
        assert_eq!(world.width(), 4);
        assert_eq!(world.height(), 3);
        assert!(!world.is_wall(Coord::new(2, 1)));
        assert!(!world.is_wall(Coord::new(3, 1)));
    }

    #[test]
    fn unknown_glyph_is_reported_with_position() {
        let err = parse_level("test", "###\n#?#\n###").unwrap_err();
        insta::assert_snapshot!(err, @"level 'test': unknown glyph '?' at 1,1");
    }

    #[test]
    fn empty_text_is_an_error() {
        let err = parse_level("test", "\n   \n").unwrap_err();
        assert!(matches!(err, CoreError::EmptyLevel(_)));
    }

    #[test]
    fn registry_knows_every_builtin() {
        for name in level_names() {
            let world = load_level(name).unwrap();
            assert!(world.width() > 0 && world.height() > 0);
        }
    }

    #[test]
    fn registry_rejects_unknown_names() {
        let err = get_level("nope").unwrap_err();
        insta::assert_snapshot!(err, @"unknown level 'nope'");
    }

    #[test]
    fn corridor_layout() {
        let world = load_level("corridor").unwrap();
        assert_eq!((world.width(), world.height()), (10, 3));
        assert_eq!(world.emitters().len(), 1);
        assert_eq!(world.emitters()[0].pos, Coord::new(1, 1));
        assert!(world.is_sink(Coord::new(8, 1)));
    }
}
