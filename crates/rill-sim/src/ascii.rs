use rill_core::GridWorld;
use rill_core::level::{EMPTY, SINK, WALL};

use crate::state::SimulationState;

/// Render the board as a character grid.
///
/// Tile priority is wall > sink > emitter > water > empty. Emitters and
/// water both draw as direction arrows; water never occupies a wall, sink,
/// or emitter tile, so the priority only matters for malformed states.
pub fn render(world: &GridWorld, state: &SimulationState) -> String {
    rows(world, state).join("\n")
}

/// Render the board with a column-index header (`x % 10`) and left-hand
/// row labels, the way the headless runners print it.
pub fn render_with_coords(world: &GridWorld, state: &SimulationState) -> String {
    let label_width = usize::max(2, (world.height() - 1).max(0).to_string().len());
    let mut header = " ".repeat(label_width + 1);
    for x in 0..world.width() {
        header.push_str(&(x % 10).to_string());
    }

    let mut lines = vec![header];
    for (y, row) in rows(world, state).iter().enumerate() {
        lines.push(format!("{y:>label_width$} {row}"));
    }
    lines.join("\n")
}

fn rows(world: &GridWorld, state: &SimulationState) -> Vec<String> {
    let width = world.width().max(0) as usize;
    let height = world.height().max(0) as usize;
    let mut grid = vec![vec![EMPTY; width]; height];

    for wall in world.walls() {
        grid[wall.y as usize][wall.x as usize] = WALL;
    }
    for sink in world.sinks() {
        grid[sink.y as usize][sink.x as usize] = SINK;
    }
    for emitter in world.emitters() {
        grid[emitter.pos.y as usize][emitter.pos.x as usize] = emitter.dir.glyph();
    }
    for (pos, cell) in &state.water {
        let tile = &mut grid[pos.y as usize][pos.x as usize];
        if *tile == EMPTY {
            *tile = cell.dir.glyph();
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use rill_core::{Coord, Direction, EmitterId, load_level, parse_level};

    use super::*;
    use crate::state::WaterCell;

    #[test]
    fn renders_static_geometry() {
        let world = load_level("corridor").unwrap();
        let state = SimulationState::new();
        assert_eq!(render(&world, &state), "##########\n#>......S#\n##########");
    }

    #[test]
    fn water_draws_as_direction_arrows() {
        let world = parse_level("test", "#####\n#...#\n#####").unwrap();
        let mut state = SimulationState::new();
        state
            .water
            .insert(Coord::new(1, 1), WaterCell::spawned(Direction::Right, EmitterId(0)));
        state
            .water
            .insert(Coord::new(3, 1), WaterCell::spawned(Direction::Up, EmitterId(0)));

        assert_eq!(render(&world, &state), "#####\n#>.^#\n#####");
    }

    #[test]
    fn coordinate_labels_wrap_at_ten() {
        let world = load_level("corridor").unwrap();
        let state = SimulationState::new();
        let labeled = render_with_coords(&world, &state);
        assert_eq!(
            labeled,
            "   0123456789\n 0 ##########\n 1 #>......S#\n 2 ##########"
        );
    }
}
