use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rill_core::level_names;

pub fn run() -> Result<(), String> {
    println!("  {}", "Built-in Levels".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "Size", "Emitters", "Sinks"]);

    for name in level_names() {
        let world = super::load(name)?;
        table.add_row(vec![
            name.to_string(),
            format!("{}x{}", world.width(), world.height()),
            world.emitters().len().to_string(),
            world.sinks().len().to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
