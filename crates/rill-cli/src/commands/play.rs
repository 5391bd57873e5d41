use crate::tui;

pub fn run(name: &str) -> Result<(), String> {
    let world = super::load(name)?;
    tui::run(name, world)
}
