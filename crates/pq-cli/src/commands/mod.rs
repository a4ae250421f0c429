pub mod build;
pub mod check;
pub mod export;

use std::path::Path;

use colored::Colorize;
use pq_compiler::{CompileResult, Severity, WorldCompiler};
use pq_core::World;

use crate::dir_source::DirSource;

/// Compile a wiki page directory and print diagnostics.
/// Returns the compiled world if there are no errors.
fn compile_dir(dir: &Path, verbose: bool) -> Result<World, String> {
    if !dir.is_dir() {
        return Err(format!("not a directory: {}", dir.display()));
    }
    let result = WorldCompiler::new(DirSource::new(dir)).compile();
    print_diagnostics(&result, verbose);

    if result.has_errors() {
        Err("compilation failed with errors".into())
    } else {
        Ok(result.world)
    }
}

/// Print the diagnostic trail to stderr, colored by severity.
fn print_diagnostics(result: &CompileResult, verbose: bool) {
    for diag in result.diagnostics.iter() {
        if diag.severity == Severity::Debug && !verbose {
            continue;
        }
        let line = diag.to_string();
        let line = match diag.severity {
            Severity::Error => line.red().to_string(),
            Severity::Warning => line.yellow().to_string(),
            Severity::Debug => line.dimmed().to_string(),
            Severity::Info => line,
        };
        eprintln!("{line}");
    }

    let errors = result.diagnostics.count(Severity::Error);
    let warnings = result.diagnostics.count(Severity::Warning);
    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}

/// One-line entity summary shared by build and check.
fn summarize(world: &World) -> String {
    format!(
        "  {} scenes, {} characters, {} items, {} images",
        world.scenes.len(),
        world.characters.len(),
        world.items.len(),
        world.image_refs.len(),
    )
}
