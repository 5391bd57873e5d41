use rill_core::split_map;

pub fn run(width: i32, height: i32) -> Result<(), String> {
    let map = split_map(width, height).map_err(|e| e.to_string())?;
    for line in map {
        println!("{line}");
    }
    Ok(())
}
