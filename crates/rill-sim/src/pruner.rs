use std::collections::{HashMap, HashSet};

use rill_core::{Coord, Emitter, EmitterId};

use crate::state::WaterCell;

/// Drop water fragments that are no longer attached to their emitter.
///
/// For each emitter, the cells it owns that sit at the minimum Manhattan
/// distance from the emitter tile are the attachment points; a 4-neighbor
/// flood through same-owner cells from those seeds marks everything still
/// connected. The rest — a stream severed by a freshly placed wall, or
/// cells whose emitter no longer exists — vanishes immediately instead of
/// lingering as an inert island.
pub(crate) fn prune(
    water: HashMap<Coord, WaterCell>,
    emitters: &[Emitter],
) -> HashMap<Coord, WaterCell> {
    let mut by_owner: HashMap<EmitterId, HashSet<Coord>> = HashMap::new();
    for (&pos, cell) in &water {
        by_owner.entry(cell.owner).or_default().insert(pos);
    }

    let mut kept: HashSet<Coord> = HashSet::new();
    for emitter in emitters {
        let Some(positions) = by_owner.get(&emitter.id) else {
            continue;
        };
        let Some(min_dist) = positions.iter().map(|p| p.manhattan(emitter.pos)).min() else {
            continue;
        };

        let mut stack: Vec<Coord> = positions
            .iter()
            .copied()
            .filter(|p| p.manhattan(emitter.pos) == min_dist)
            .collect();
        let mut seen: HashSet<Coord> = HashSet::new();
        while let Some(pos) = stack.pop() {
            if !seen.insert(pos) {
                continue;
            }
            for neighbor in pos.neighbors4() {
                if positions.contains(&neighbor) && !seen.contains(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        kept.extend(seen);
    }

    water
        .into_iter()
        .filter(|(pos, _)| kept.contains(pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::Direction;

    fn emitter(id: u32, x: i32, y: i32) -> Emitter {
        Emitter {
            id: EmitterId(id),
            pos: Coord::new(x, y),
            dir: Direction::Right,
        }
    }

    fn cell(owner: u32) -> WaterCell {
        WaterCell::spawned(Direction::Right, EmitterId(owner))
    }

    fn water(cells: &[(i32, i32, u32)]) -> HashMap<Coord, WaterCell> {
        cells
            .iter()
            .map(|&(x, y, owner)| (Coord::new(x, y), cell(owner)))
            .collect()
    }

    #[test]
    fn connected_stream_survives() {
        let emitters = [emitter(0, 1, 1)];
        let pruned = prune(water(&[(2, 1, 0), (3, 1, 0), (4, 1, 0)]), &emitters);
        assert_eq!(pruned.len(), 3);
    }

    #[test]
    fn fragment_beyond_a_gap_is_dropped() {
        let emitters = [emitter(0, 1, 1)];
        let pruned = prune(
            water(&[(2, 1, 0), (3, 1, 0), (5, 1, 0), (6, 1, 0)]),
            &emitters,
        );
        assert_eq!(pruned.len(), 2);
        assert!(pruned.contains_key(&Coord::new(2, 1)));
        assert!(pruned.contains_key(&Coord::new(3, 1)));
    }

    #[test]
    fn nearest_fragment_need_not_touch_the_emitter() {
        // The attachment point is the closest cell, wherever it is.
        let emitters = [emitter(0, 1, 1)];
        let pruned = prune(water(&[(4, 1, 0), (5, 1, 0)]), &emitters);
        assert_eq!(pruned.len(), 2);
    }

    #[test]
    fn orphaned_owner_is_dropped_entirely() {
        let emitters = [emitter(0, 1, 1)];
        let pruned = prune(water(&[(2, 1, 0), (2, 3, 9)]), &emitters);
        assert_eq!(pruned.len(), 1);
        assert!(pruned.contains_key(&Coord::new(2, 1)));
    }

    #[test]
    fn owners_flood_independently() {
        // Owner 1's cell is adjacent to owner 0's stream but not to its own
        // attachment point, so it is pruned while owner 0's stream survives.
        let emitters = [emitter(0, 1, 1), emitter(1, 8, 1)];
        let pruned = prune(
            water(&[(2, 1, 0), (3, 1, 0), (3, 2, 1), (7, 1, 1)]),
            &emitters,
        );
        assert_eq!(pruned.len(), 3);
        assert!(!pruned.contains_key(&Coord::new(3, 2)));
    }
}
