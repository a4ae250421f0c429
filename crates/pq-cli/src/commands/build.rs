use std::path::Path;

pub fn run(dir: &Path, verbose: bool) -> Result<(), String> {
    let world = super::compile_dir(dir, verbose)?;

    let name = world.map_name.as_deref().unwrap_or("(unnamed)");
    println!("  Compiled '{name}' successfully.");
    println!();
    println!("{}", super::summarize(&world));

    Ok(())
}
