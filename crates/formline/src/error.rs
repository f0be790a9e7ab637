//! Error types for the form model layer.

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a form.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A validation pattern failed to compile.
    ///
    /// This is a configuration error: the pattern is caller-supplied at
    /// setup time, and a validator without its pattern would silently
    /// accept invalid input. Setup must abort instead.
    #[error("Invalid validation pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    /// Create a pattern-compilation error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
