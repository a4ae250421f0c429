//! Wiki markup template extraction for Pagequest.
//!
//! The compiler's only view of a wiki page is the sequence of templates it
//! contains. [`extract_templates`] walks raw markup and yields every
//! top-level template in document order; templates nested inside a
//! parameter value are kept verbatim in the raw value and extracted on
//! demand by whichever consumer owns that parameter.
//!
//! Extraction is a pure function of the input text and never fails:
//! unbalanced markup simply yields fewer templates.

/// Tokenization of raw markup.
pub mod lexer;
/// Token-stream parsing into templates.
pub mod parser;
/// Template and parameter map types.
pub mod template;

/// Re-export the extraction entry points.
pub use parser::extract_templates;
/// Re-export template types.
pub use template::{NotExactlyOne, ParamMap, Template, single_template};
