//! Input validation for text fields.
//!
//! [`TextInputValidator`] constrains the string value of an input field:
//! optional length bounds plus an optional regular-expression pattern.
//! Validation is a plain boolean outcome: a failing check is how the
//! caller blocks submission or styles the field, not an error.
//!
//! # Check Order
//!
//! Checks short-circuit on the first failure, in a fixed order:
//!
//! 1. minimum length (when set)
//! 2. maximum length (when set)
//! 3. pattern match (when set)
//!
//! Lengths count Unicode scalar values. The pattern check is an unanchored
//! search: the pattern must match somewhere in the value unless it anchors
//! itself (`^...$`).
//!
//! # Example
//!
//! ```
//! use formline::form::TextInputValidator;
//!
//! let validator = TextInputValidator::new()
//!     .with_min_length(3)
//!     .with_pattern(r"^\S+$")
//!     .unwrap();
//!
//! assert!(validator.check("abc"));
//! assert!(!validator.check("ab"));    // too short
//! assert!(!validator.check("a b c")); // whitespace rejected by pattern
//! ```

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Length and pattern constraints for an input field's text value.
///
/// A default-constructed validator has no constraints and accepts any
/// value. Bounds and the pattern are layered on with the `with_*` builder
/// methods; the pattern is compiled exactly once, at configuration time.
///
/// # Configuration Errors
///
/// [`with_pattern`](Self::with_pattern) returns an error for a malformed
/// pattern. There is no partially-configured state: a validator either
/// compiles its pattern or the setup call fails with `?`.
#[derive(Debug, Clone, Default)]
pub struct TextInputValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl TextInputValidator {
    /// Create a validator with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `min` characters.
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Allow at most `max` characters.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require the value to match `pattern`.
    ///
    /// The pattern is compiled case-insensitively, with `^`/`$` matching
    /// at line boundaries and `.` matching newlines. Matching is a search,
    /// not an implicit full-string anchor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| Error::invalid_pattern(pattern, source))?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    /// Get the minimum length, if set.
    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    /// Get the maximum length, if set.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Get the pattern string, if a pattern is set.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(|re| re.as_str())
    }

    /// Check a value against every configured constraint.
    ///
    /// Returns `false` on the first failing check. A validator with no
    /// constraints accepts everything.
    ///
    /// Note: a validator configured with `min_length > max_length` can
    /// never accept a value; the bounds are not cross-validated at
    /// configuration time and whichever bound fails first reports the
    /// failure.
    pub fn check(&self, value: &str) -> bool {
        let length = value.chars().count();

        if let Some(min) = self.min_length
            && length < min
        {
            return false;
        }

        if let Some(max) = self.max_length
            && length > max
        {
            return false;
        }

        if let Some(ref pattern) = self.pattern
            && !pattern.is_match(value)
        {
            return false;
        }

        true
    }
}
