//! CLI frontend for the rill water-flow puzzle.

mod commands;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rill",
    about = "rill — a tile-grid water-flow puzzle sandbox",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in levels
    Levels,

    /// Print a level's board without water
    Show {
        /// Level name
        name: String,

        /// Prefix coordinate labels
        #[arg(short, long)]
        coords: bool,
    },

    /// Simulate a level headless for a duration and print the final board
    Run {
        /// Level name
        name: String,

        /// Duration to simulate, in milliseconds
        #[arg(long, default_value = "5000")]
        duration_ms: u64,
    },

    /// Execute a run-script headless
    Script {
        /// Script file path
        file: Option<PathBuf>,

        /// Inline script text (takes precedence over the file)
        #[arg(short, long)]
        eval: Option<String>,

        /// Level to start on before the script runs
        #[arg(short, long, default_value = "turn")]
        level: String,
    },

    /// Export level geometry and simulated state as JSON
    Export {
        /// Level name
        name: String,

        /// Ticks to simulate before exporting
        #[arg(short, long, default_value = "0")]
        ticks: u64,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a maze-like board via recursive division
    Maze {
        /// Board width (odd, at least 3)
        #[arg(long, default_value = "45")]
        width: i32,

        /// Board height (odd, at least 3)
        #[arg(long, default_value = "21")]
        height: i32,
    },

    /// Watch a level run interactively in the terminal
    Play {
        /// Level name
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Levels => commands::levels::run(),
        Commands::Show { name, coords } => commands::show::run(&name, coords),
        Commands::Run { name, duration_ms } => commands::run::run(&name, duration_ms),
        Commands::Script { file, eval, level } => {
            commands::script::run(file.as_deref(), eval.as_deref(), &level)
        }
        Commands::Export {
            name,
            ticks,
            output,
        } => commands::export::run(&name, ticks, output.as_deref()),
        Commands::Maze { width, height } => commands::maze::run(width, height),
        Commands::Play { name } => commands::play::run(&name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
