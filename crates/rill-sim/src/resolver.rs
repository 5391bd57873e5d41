use std::collections::{HashMap, HashSet};

use rill_core::{Coord, Direction, EmitterId, GridWorld};

use crate::state::{SimulationState, WaterCell};

/// A cell's proposed move for the current tick.
#[derive(Debug, Clone, Copy)]
struct Proposal {
    target: Coord,
    dir: Direction,
    prefer_left: bool,
}

/// One contender for a target tile.
#[derive(Debug, Clone, Copy)]
struct Mover {
    src: Coord,
    dir: Direction,
    owner: EmitterId,
    prefer_left: bool,
}

/// The move selected for a source cell after collision resolution.
#[derive(Debug, Clone, Copy)]
struct Edge {
    target: Coord,
    dir: Direction,
    prefer_left: bool,
}

/// Computes one tick's worth of movement: spawning, per-cell proposals,
/// collision resolution, cycle-safe validation, and aging.
///
/// All decisions are made against the pre-tick snapshot of the water and
/// claim maps; nothing observes a partially committed tick.
pub(crate) struct MovementResolver<'a> {
    world: &'a GridWorld,
    decay_steps: u32,
    /// Who occupied each tile at the start of the tick, captured before
    /// spawning. The non-sink tie-break reads this snapshot only; it is
    /// never updated as resolution proceeds.
    prev_owner: HashMap<Coord, EmitterId>,
}

impl<'a> MovementResolver<'a> {
    pub(crate) fn new(world: &'a GridWorld, state: &SimulationState, decay_steps: u32) -> Self {
        let prev_owner = state
            .water
            .iter()
            .map(|(&pos, cell)| (pos, cell.owner))
            .collect();
        Self {
            world,
            decay_steps,
            prev_owner,
        }
    }

    /// Spawn new water on each emitter's forward tile, in emitter id order.
    ///
    /// A spawn is skipped if the tile is out of bounds, a wall, already
    /// occupied (including by an earlier spawn this tick), an emitter tile,
    /// or a sink. Spawned cells take part in this tick's movement.
    pub(crate) fn spawn(&self, state: &mut SimulationState) {
        for emitter in self.world.emitters() {
            let target = emitter.pos.offset(emitter.dir);
            if !self.world.in_bounds(target) {
                continue;
            }
            if self.world.is_wall(target)
                || state.water.contains_key(&target)
                || self.world.is_emitter_tile(target)
            {
                continue;
            }
            if self.world.is_sink(target) {
                continue;
            }
            state
                .water
                .insert(target, WaterCell::spawned(emitter.dir, emitter.id));
        }
    }

    /// Resolve one tick of movement, returning the next water map
    /// (pre-pruning). Updates sink claims for every contested sink.
    pub(crate) fn resolve(&self, state: &mut SimulationState) -> HashMap<Coord, WaterCell> {
        let proposals = self.build_proposals(&state.water, &state.sink_claims);
        let targets = group_targets(&proposals, &state.water);
        let inflow = build_inflow(&targets);
        let edges = self.select_edges(&targets, &state.water, &mut state.sink_claims);
        self.advance(&state.water, &edges, &inflow)
    }

    /// Whether `tile` may be proposed as a move target for a cell of
    /// `owner`: in bounds, not a wall or emitter tile, and — if a sink —
    /// not claimed by a different emitter. Occupancy by other water is
    /// resolved later, against the full proposal set.
    fn enterable(
        &self,
        tile: Coord,
        owner: EmitterId,
        claims: &HashMap<Coord, EmitterId>,
    ) -> bool {
        self.world.in_bounds(tile)
            && !self.world.is_wall(tile)
            && !self.world.is_emitter_tile(tile)
            && !(self.world.is_sink(tile)
                && claims.get(&tile).is_some_and(|&claimant| claimant != owner))
    }

    /// Propose a move for the cell at `pos`: forward if open, otherwise the
    /// perpendicular turns in preference order, otherwise stay put.
    /// `prefer_left` flips only when a turn is actually taken.
    fn propose(
        &self,
        pos: Coord,
        cell: WaterCell,
        claims: &HashMap<Coord, EmitterId>,
    ) -> Proposal {
        let forward = pos.offset(cell.dir);
        if self.enterable(forward, cell.owner, claims) {
            return Proposal {
                target: forward,
                dir: cell.dir,
                prefer_left: cell.prefer_left,
            };
        }

        let turns = if cell.prefer_left {
            [cell.dir.turned_left(), cell.dir.turned_right()]
        } else {
            [cell.dir.turned_right(), cell.dir.turned_left()]
        };
        for dir in turns {
            let target = pos.offset(dir);
            if self.enterable(target, cell.owner, claims) {
                return Proposal {
                    target,
                    dir,
                    prefer_left: !cell.prefer_left,
                };
            }
        }

        Proposal {
            target: pos,
            dir: cell.dir,
            prefer_left: cell.prefer_left,
        }
    }

    fn build_proposals(
        &self,
        water: &HashMap<Coord, WaterCell>,
        claims: &HashMap<Coord, EmitterId>,
    ) -> HashMap<Coord, Proposal> {
        water
            .iter()
            .map(|(&pos, &cell)| (pos, self.propose(pos, cell, claims)))
            .collect()
    }

    /// Pick a single winner per contested target and record sink claims.
    ///
    /// Sinks: the claim holder's mover wins if present, then ascending
    /// (row, column) of source; the winner's owner becomes the new claim.
    /// Other tiles: the pre-tick occupant's owner wins, then straight
    /// movers over turning ones, then ascending (row, column) of source.
    /// Losers get no edge and behave as non-movers this tick.
    fn select_edges(
        &self,
        targets: &HashMap<Coord, Vec<Mover>>,
        water: &HashMap<Coord, WaterCell>,
        claims: &mut HashMap<Coord, EmitterId>,
    ) -> HashMap<Coord, Edge> {
        let mut edges = HashMap::new();
        for (&target, movers) in targets {
            let winner = if self.world.is_sink(target) {
                let claim = claims.get(&target).copied();
                let winner = movers
                    .iter()
                    .copied()
                    .min_by_key(|m| (u32::from(claim != Some(m.owner)), m.src.y, m.src.x));
                if let Some(w) = winner {
                    claims.insert(target, w.owner);
                }
                winner
            } else {
                movers.iter().copied().min_by_key(|m| {
                    let held_target = self.prev_owner.get(&target) == Some(&m.owner);
                    let straight = water.get(&m.src).is_some_and(|cell| cell.dir == m.dir);
                    (
                        u32::from(!held_target),
                        u32::from(!straight),
                        m.src.y,
                        m.src.x,
                    )
                })
            };
            if let Some(w) = winner {
                edges.insert(
                    w.src,
                    Edge {
                        target,
                        dir: w.dir,
                        prefer_left: w.prefer_left,
                    },
                );
            }
        }
        edges
    }

    /// Decide whether the move out of `start` can actually be realized.
    ///
    /// Walks the chain of occupants with an explicit path instead of
    /// call-stack recursion. A move succeeds if it enters a sink, a tile
    /// free at the start of the tick, or its own tile (a stay); if the
    /// chain reaches a tile already on the active path, the chain has
    /// closed into a loop and the whole loop rotates in lock-step. A cell
    /// without an edge blocks everything queued behind it. The outcome is
    /// memoized for every source on the walked chain.
    fn move_succeeds(
        &self,
        start: Coord,
        edges: &HashMap<Coord, Edge>,
        occupied: &HashSet<Coord>,
        memo: &mut HashMap<Coord, bool>,
    ) -> bool {
        if let Some(&known) = memo.get(&start) {
            return known;
        }

        let mut chain = Vec::new();
        let mut visiting: HashSet<Coord> = HashSet::new();
        let mut src = start;
        let outcome = loop {
            chain.push(src);
            let Some(edge) = edges.get(&src) else {
                break false;
            };
            let target = edge.target;
            if self.world.is_sink(target) || !occupied.contains(&target) || target == src {
                break true;
            }
            if visiting.contains(&target) {
                break true;
            }
            if let Some(&known) = memo.get(&target) {
                break known;
            }
            visiting.insert(target);
            src = target;
        };

        for tile in chain {
            memo.insert(tile, outcome);
        }
        outcome
    }

    /// Apply the selected edges, aging every cell and dropping those that
    /// reach the decay threshold. Cells entering a sink are consumed.
    fn advance(
        &self,
        water: &HashMap<Coord, WaterCell>,
        edges: &HashMap<Coord, Edge>,
        inflow: &HashMap<Coord, HashSet<EmitterId>>,
    ) -> HashMap<Coord, WaterCell> {
        let occupied: HashSet<Coord> = water.keys().copied().collect();
        let mut memo: HashMap<Coord, bool> = HashMap::new();
        let mut next = HashMap::with_capacity(water.len());

        for (&pos, cell) in water {
            let realized = match edges.get(&pos) {
                Some(&edge) => self
                    .move_succeeds(pos, edges, &occupied, &mut memo)
                    .then_some(edge),
                None => None,
            };

            if let Some(edge) = realized {
                if self.world.is_sink(edge.target) {
                    // Consumed.
                    continue;
                }
                let age = if edge.target != pos {
                    0
                } else if refreshed_by_contact(pos, cell.owner, inflow) {
                    0
                } else {
                    cell.age + 1
                };
                if age < self.decay_steps {
                    next.insert(
                        edge.target,
                        WaterCell {
                            dir: edge.dir,
                            age,
                            owner: cell.owner,
                            prefer_left: edge.prefer_left,
                        },
                    );
                }
            } else {
                let age = if refreshed_by_contact(pos, cell.owner, inflow) {
                    0
                } else {
                    cell.age + 1
                };
                if age < self.decay_steps {
                    next.insert(pos, WaterCell { age, ..*cell });
                }
            }
        }
        next
    }
}

/// Group proposals by their target tile.
fn group_targets(
    proposals: &HashMap<Coord, Proposal>,
    water: &HashMap<Coord, WaterCell>,
) -> HashMap<Coord, Vec<Mover>> {
    let mut targets: HashMap<Coord, Vec<Mover>> = HashMap::new();
    for (&src, proposal) in proposals {
        let Some(cell) = water.get(&src) else {
            continue;
        };
        targets.entry(proposal.target).or_default().push(Mover {
            src,
            dir: proposal.dir,
            owner: cell.owner,
            prefer_left: proposal.prefer_left,
        });
    }
    targets
}

/// For each target, the owners proposing to move into it from elsewhere.
/// Used for the contact-refresh rule when aging stationary cells.
fn build_inflow(targets: &HashMap<Coord, Vec<Mover>>) -> HashMap<Coord, HashSet<EmitterId>> {
    let mut inflow = HashMap::new();
    for (&target, movers) in targets {
        let incoming: HashSet<EmitterId> = movers
            .iter()
            .filter(|m| m.src != target)
            .map(|m| m.owner)
            .collect();
        if !incoming.is_empty() {
            inflow.insert(target, incoming);
        }
    }
    inflow
}

/// A stationary cell is refreshed only by inflow proposed from a different
/// emitter than its own; backpressure from its own stream does not keep it
/// from evaporating.
fn refreshed_by_contact(
    tile: Coord,
    owner: EmitterId,
    inflow: &HashMap<Coord, HashSet<EmitterId>>,
) -> bool {
    inflow
        .get(&tile)
        .is_some_and(|ids| ids.iter().any(|&id| id != owner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::parse_level;

    fn world(text: &str) -> GridWorld {
        parse_level("test", text).unwrap()
    }

    fn cell(dir: Direction, owner: u32) -> WaterCell {
        WaterCell {
            dir,
            age: 0,
            owner: EmitterId(owner),
            prefer_left: true,
        }
    }

    fn resolve_once(world: &GridWorld, state: &mut SimulationState) -> HashMap<Coord, WaterCell> {
        MovementResolver::new(world, state, 3).resolve(state)
    }

    #[test]
    fn open_forward_tile_moves_the_cell() {
        let world = world("#####\n#...#\n#####");
        let mut state = SimulationState::new();
        state.water.insert(Coord::new(1, 1), cell(Direction::Right, 0));

        let next = resolve_once(&world, &mut state);

        assert_eq!(next.len(), 1);
        let moved = next[&Coord::new(2, 1)];
        assert_eq!(moved.dir, Direction::Right);
        assert_eq!(moved.age, 0);
        assert!(moved.prefer_left);
    }

    #[test]
    fn blocked_cell_turns_left_first_and_flips_preference() {
        let text = "\
#####
#...#
#..##
#...#
#####";
        let world = world(text);
        let mut state = SimulationState::new();
        state.water.insert(Coord::new(2, 2), cell(Direction::Right, 0));

        let next = resolve_once(&world, &mut state);
        let turned = next[&Coord::new(2, 1)];
        assert_eq!(turned.dir, Direction::Up);
        assert!(!turned.prefer_left);

        // Blocked again; the flipped preference now tries the right turn first.
        state.water = next;
        let next = resolve_once(&world, &mut state);
        let turned = next[&Coord::new(3, 1)];
        assert_eq!(turned.dir, Direction::Right);
        assert!(turned.prefer_left);
    }

    #[test]
    fn boxed_in_cell_stays_ages_and_evaporates() {
        let world = world("#>.#");
        let mut state = SimulationState::new();
        state.water.insert(Coord::new(2, 0), cell(Direction::Right, 0));

        let next = resolve_once(&world, &mut state);
        let stuck = next[&Coord::new(2, 0)];
        assert_eq!(stuck.age, 1);
        assert!(stuck.prefer_left);

        state.water = next;
        let next = resolve_once(&world, &mut state);
        assert_eq!(next[&Coord::new(2, 0)].age, 2);

        // Third stationary tick reaches decay_steps = 3: evaporated.
        state.water = next;
        let next = resolve_once(&world, &mut state);
        assert!(next.is_empty());
    }

    #[test]
    fn collision_tiebreak_is_row_then_column() {
        let world = world("#####\n#...#\n#...#\n#...#\n#####");
        let mut state = SimulationState::new();
        // Both head straight into (2,2); the source with the smaller row wins.
        state.water.insert(Coord::new(2, 1), cell(Direction::Down, 0));
        state.water.insert(Coord::new(1, 2), cell(Direction::Right, 1));

        let next = resolve_once(&world, &mut state);

        assert_eq!(next[&Coord::new(2, 2)].owner, EmitterId(0));
        let loser = next[&Coord::new(1, 2)];
        assert_eq!(loser.owner, EmitterId(1));
        assert_eq!(loser.age, 1);
    }

    #[test]
    fn straight_mover_beats_turning_mover() {
        let text = "\
#####
####.
#...#
#...#
#####";
        let world = world(text);
        let mut state = SimulationState::new();
        // (1,2) is walled in ahead and to its left, so it turns right into
        // (2,2). (2,3) heads straight into (2,2) and wins despite the larger
        // row.
        state.water.insert(Coord::new(1, 2), cell(Direction::Up, 0));
        state.water.insert(Coord::new(2, 3), cell(Direction::Up, 1));

        let next = resolve_once(&world, &mut state);

        assert_eq!(next[&Coord::new(2, 2)].owner, EmitterId(1));
        let loser = next[&Coord::new(1, 2)];
        assert_eq!(loser.owner, EmitterId(0));
        // A losing proposal is not a taken turn: the preference must not flip.
        assert!(loser.prefer_left);
        assert_eq!(loser.age, 1);
    }

    #[test]
    fn previous_owner_of_target_wins_the_contest() {
        let world = world("#####\n#...#\n#...#\n#...#\n#####");
        let mut state = SimulationState::new();
        // Owner 1 holds (2,2) and vacates it downward this tick; the incoming
        // owner-1 mover inherits the tile over the lower-row owner-0 mover.
        state.water.insert(Coord::new(2, 2), cell(Direction::Down, 1));
        state.water.insert(Coord::new(2, 1), cell(Direction::Down, 0));
        state.water.insert(Coord::new(1, 2), cell(Direction::Right, 1));

        let next = resolve_once(&world, &mut state);

        assert_eq!(next[&Coord::new(2, 3)].owner, EmitterId(1));
        assert_eq!(next[&Coord::new(2, 2)].owner, EmitterId(1));
        let loser = next[&Coord::new(2, 1)];
        assert_eq!(loser.owner, EmitterId(0));
        assert_eq!(loser.age, 1);
    }

    #[test]
    fn closed_loop_rotates_in_lockstep() {
        let world = world("####\n#..#\n#..#\n####");
        let mut state = SimulationState::new();
        state.water.insert(Coord::new(1, 1), cell(Direction::Right, 0));
        state.water.insert(Coord::new(2, 1), cell(Direction::Down, 0));
        state.water.insert(Coord::new(2, 2), cell(Direction::Left, 0));
        state.water.insert(Coord::new(1, 2), cell(Direction::Up, 0));

        let next = resolve_once(&world, &mut state);

        assert_eq!(next.len(), 4);
        assert_eq!(next[&Coord::new(2, 1)].dir, Direction::Right);
        assert_eq!(next[&Coord::new(2, 2)].dir, Direction::Down);
        assert_eq!(next[&Coord::new(1, 2)].dir, Direction::Left);
        assert_eq!(next[&Coord::new(1, 1)].dir, Direction::Up);
        assert!(next.values().all(|c| c.age == 0));
    }

    #[test]
    fn train_behind_a_blocked_head_goes_nowhere() {
        let world = world("#####\n#...#\n#####");
        let mut state = SimulationState::new();
        for x in 1..=3 {
            state.water.insert(Coord::new(x, 1), cell(Direction::Right, 0));
        }

        let next = resolve_once(&world, &mut state);

        for x in 1..=3 {
            let stuck = next[&Coord::new(x, 1)];
            assert_eq!(stuck.age, 1, "cell at column {x} should have aged");
        }

        // Same-owner backpressure is not contact refresh: the whole train
        // evaporates once every cell hits the decay threshold.
        state.water = next;
        let next = resolve_once(&world, &mut state);
        state.water = next;
        let next = resolve_once(&world, &mut state);
        assert!(next.is_empty());
    }

    #[test]
    fn foreign_inflow_refreshes_a_stationary_cell() {
        let world = world("#####\n#...#\n#####");
        let mut state = SimulationState::new();
        let mut old = cell(Direction::Right, 0);
        old.age = 2;
        state.water.insert(Coord::new(3, 1), old);
        state.water.insert(Coord::new(2, 1), cell(Direction::Right, 1));

        let next = resolve_once(&world, &mut state);

        // The boxed-in owner-0 cell was a tick from evaporating; contact from
        // the owner-1 stream resets its age.
        assert_eq!(next[&Coord::new(3, 1)].age, 0);
        assert_eq!(next[&Coord::new(2, 1)].age, 1);
    }

    #[test]
    fn sole_mover_into_a_sink_is_consumed_and_claims_it() {
        let world = world("#####\n#.S.#\n#####");
        let mut state = SimulationState::new();
        state.water.insert(Coord::new(1, 1), cell(Direction::Right, 0));

        let next = resolve_once(&world, &mut state);

        assert!(next.is_empty());
        assert_eq!(state.sink_claims[&Coord::new(2, 1)], EmitterId(0));
    }

    #[test]
    fn first_sink_contact_breaks_ties_row_major_and_claims() {
        let world = world("#####\n#.S.#\n#####");
        let mut state = SimulationState::new();
        state.water.insert(Coord::new(1, 1), cell(Direction::Right, 0));
        state.water.insert(Coord::new(3, 1), cell(Direction::Left, 1));

        let next = resolve_once(&world, &mut state);

        // Same row; column 1 beats column 3. The loser is left in place.
        assert_eq!(state.sink_claims[&Coord::new(2, 1)], EmitterId(0));
        assert_eq!(next.len(), 1);
        assert_eq!(next[&Coord::new(3, 1)].age, 1);
    }

    #[test]
    fn claimed_sink_blocks_foreign_water() {
        let world = world("#####\n#.S.#\n#####");
        let mut state = SimulationState::new();
        state.sink_claims.insert(Coord::new(2, 1), EmitterId(7));
        state.water.insert(Coord::new(1, 1), cell(Direction::Right, 0));
        state.water.insert(Coord::new(3, 1), cell(Direction::Left, 7));

        let next = resolve_once(&world, &mut state);

        // The claim holder drains; the foreign cell cannot even propose the
        // sink and is boxed in by the surrounding walls.
        assert_eq!(next.len(), 1);
        assert_eq!(next[&Coord::new(1, 1)].age, 1);
        assert_eq!(state.sink_claims[&Coord::new(2, 1)], EmitterId(7));
    }

    #[test]
    fn spawn_skips_walls_sinks_occupied_and_emitter_tiles() {
        // Forward tile is a wall.
        let walled = world("####\n#>##\n####");
        let mut state = SimulationState::new();
        MovementResolver::new(&walled, &state, 3).spawn(&mut state);
        assert!(state.water.is_empty());

        // Forward tile is a sink: spawning never targets sinks directly.
        let sink = world("#>S#");
        MovementResolver::new(&sink, &state, 3).spawn(&mut state);
        assert!(state.water.is_empty());

        // Two emitters facing each other block each other's spawn tile.
        let facing = world("#><#");
        MovementResolver::new(&facing, &state, 3).spawn(&mut state);
        assert!(state.water.is_empty());

        // Occupied forward tile.
        let open = world("#>.#");
        let mut occupied_state = SimulationState::new();
        let existing = cell(Direction::Left, 5);
        occupied_state.water.insert(Coord::new(2, 0), existing);
        MovementResolver::new(&open, &occupied_state, 3).spawn(&mut occupied_state);
        assert_eq!(occupied_state.water.len(), 1);
        assert_eq!(occupied_state.water[&Coord::new(2, 0)], existing);

        // And the plain open case spawns with the emitter's direction.
        let mut fresh = SimulationState::new();
        MovementResolver::new(&open, &fresh, 3).spawn(&mut fresh);
        let spawned = fresh.water[&Coord::new(2, 0)];
        assert_eq!(spawned.dir, Direction::Right);
        assert_eq!(spawned.owner, EmitterId(0));
        assert_eq!(spawned.age, 0);
        assert!(spawned.prefer_left);
    }
}
