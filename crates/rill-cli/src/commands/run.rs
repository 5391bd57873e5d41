use rill_sim::{SimulationEngine, SimulationState, ascii};

pub fn run(name: &str, duration_ms: u64) -> Result<(), String> {
    let world = super::load(name)?;
    let engine = SimulationEngine::default();
    let steps = engine.config().steps_for_ms(duration_ms);

    let mut state = SimulationState::new();
    engine.run(&world, &mut state, steps);

    println!("Simulated {steps} steps (~{duration_ms} ms)");
    println!("{}", ascii::render_with_coords(&world, &state));
    Ok(())
}
