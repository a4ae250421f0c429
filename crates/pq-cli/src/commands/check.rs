use std::path::Path;

pub fn run(dir: &Path) -> Result<(), String> {
    let world = super::compile_dir(dir, false)?;

    println!("  All checks passed.");
    println!("{}", super::summarize(&world));

    Ok(())
}
