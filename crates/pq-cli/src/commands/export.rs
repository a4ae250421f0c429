use std::path::Path;

pub fn run(dir: &Path, output: Option<&Path>) -> Result<(), String> {
    let world = super::compile_dir(dir, false)?;

    let json = serde_json::to_string_pretty(&world)
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, &json)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}
