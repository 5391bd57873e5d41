use std::fs;
use std::path::Path;

use rill_script::{ScriptRunner, render_script_error};
use rill_sim::SimConfig;

pub fn run(file: Option<&Path>, eval: Option<&str>, level: &str) -> Result<(), String> {
    let (source, filename) = match (eval, file) {
        (Some(text), _) => (text.to_string(), "<eval>".to_string()),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            (text, path.display().to_string())
        }
        (None, None) => return Err("provide a script file or --eval".into()),
    };

    let mut runner =
        ScriptRunner::new(level, SimConfig::default()).map_err(|e| e.to_string())?;
    if let Err(error) = runner.run_script(&source) {
        eprint!("{}", render_script_error(&source, &filename, &error));
        return Err("script failed".into());
    }

    println!("Script complete");
    println!("{}", runner.render_labeled());
    Ok(())
}
