/// A failure of the external content source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The requested page does not exist.
    #[error("page not found: \"{0}\"")]
    PageNotFound(String),

    /// The requested category does not exist.
    #[error("category not found: \"{0}\"")]
    CategoryNotFound(String),

    /// Transport-level failure (I/O, malformed payload, ...).
    #[error("content source failure: {0}")]
    Transport(String),
}

/// A structural compile error.
///
/// Raised where a specific template shape is required and the source
/// violates it. Aborts compilation of the immediately enclosing entity
/// (one dialogue, one action) but never its siblings; the orchestrator is
/// the only place a `CompileError` stops a whole category.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    /// A specific template name was required.
    #[error("expected \"{expected}\" template, got \"{found}\"")]
    UnexpectedTemplate {
        /// The required template name.
        expected: &'static str,
        /// The name actually found.
        found: String,
    },

    /// A template carried the wrong number of arguments.
    #[error("\"{template}\" template must have exactly {expected} argument(s), got {found}")]
    WrongArgCount {
        /// The offending template name.
        template: &'static str,
        /// Required argument count.
        expected: usize,
        /// Actual argument count.
        found: usize,
    },

    /// A parameter value had to hold exactly one nested template.
    #[error("expected exactly 1 \"{expected}\" template in parameter value, found {found}")]
    NotExactlyOne {
        /// What the single template should have been.
        expected: &'static str,
        /// How many top-level templates the value held.
        found: usize,
    },

    /// A required named parameter was absent.
    #[error("\"{template}\" template is missing its \"{param}\" parameter")]
    MissingParameter {
        /// The template requiring the parameter.
        template: &'static str,
        /// The absent parameter key.
        param: &'static str,
    },

    /// The content source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
