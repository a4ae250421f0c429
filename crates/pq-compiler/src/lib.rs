//! Template-to-world compiler for Pagequest.
//!
//! Takes raw wiki pages from a [`ContentSource`], extracts their templates,
//! and compiles them into a [`pq_core::World`]: map metadata, scenes with
//! conditional interactions, characters with dialogue trees, and items.
//! A final pass resolves every referenced image name to a URL through one
//! batched lookup.
//!
//! Compilation is a single synchronous best-effort pass. Malformed
//! fragments are skipped with a diagnostic; a structural error loses only
//! the enclosing entity; an unhandled failure in a whole category is caught
//! once at the orchestrator and still returns whatever was built before it.

mod action;
/// The orchestrator and per-page entity compilers.
pub mod compiler;
/// The diagnostic event log.
pub mod diagnostics;
mod dialogue;
/// Compiler error types.
pub mod error;
/// Scene interaction and state compilation, including region derivation.
pub mod interaction;
mod resolver;
/// The content-source abstraction over page and image lookups.
pub mod source;

/// Re-export the compiler entry points.
pub use compiler::{CompileResult, WorldCompiler};
/// Re-export diagnostics types.
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
/// Re-export error types.
pub use error::{CompileError, SourceError};
/// Re-export region derivation.
pub use interaction::{RegionError, derive_region};
/// Re-export content-source types.
pub use source::{ContentSource, ImageRecord, Page};
