use std::path::Path;

use rill_core::Coord;
use rill_sim::{SimulationEngine, SimulationState};

pub fn run(name: &str, ticks: u64, output: Option<&Path>) -> Result<(), String> {
    let world = super::load(name)?;
    let engine = SimulationEngine::default();
    let mut state = SimulationState::new();
    engine.run(&world, &mut state, ticks);

    let mut walls: Vec<Coord> = world.walls().iter().copied().collect();
    walls.sort();
    let mut sinks: Vec<Coord> = world.sinks().iter().copied().collect();
    sinks.sort();

    let mut water: Vec<_> = state.water.iter().collect();
    water.sort_by_key(|&(&pos, _)| pos);
    let water: Vec<_> = water
        .into_iter()
        .map(|(pos, cell)| {
            serde_json::json!({
                "pos": pos,
                "dir": cell.dir,
                "age": cell.age,
                "owner": cell.owner.0,
                "prefer_left": cell.prefer_left,
            })
        })
        .collect();

    let mut claims: Vec<_> = state.sink_claims.iter().collect();
    claims.sort_by_key(|&(&sink, _)| sink);
    let claims: Vec<_> = claims
        .into_iter()
        .map(|(sink, owner)| serde_json::json!({ "sink": sink, "owner": owner.0 }))
        .collect();

    let export = serde_json::json!({
        "level": name,
        "ticks": ticks,
        "width": world.width(),
        "height": world.height(),
        "walls": walls,
        "emitters": world.emitters(),
        "sinks": sinks,
        "water": water,
        "claims": claims,
    });
    let content = serde_json::to_string_pretty(&export)
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}
