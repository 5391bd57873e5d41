use rill_sim::{SimulationState, ascii};

pub fn run(name: &str, coords: bool) -> Result<(), String> {
    let world = super::load(name)?;
    let state = SimulationState::new();
    let board = if coords {
        ascii::render_with_coords(&world, &state)
    } else {
        ascii::render(&world, &state)
    };
    println!("{board}");
    Ok(())
}
