// File: src/error.rs
// Purpose: Errors reported by a validation call

use crate::date::DateFormatError;
use thiserror::Error;

/// Caller mistakes detected while validating.
///
/// A failing rule is not an error: it produces [`Verdict::Invalid`](crate::Verdict).
/// These variants describe rule sets that cannot be evaluated at all.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The argument given to a registered rule has the wrong shape
    #[error("rule `{rule}` expects {expected}, got {found}")]
    MalformedArgument {
        rule: String,
        expected: &'static str,
        found: String,
    },

    /// A verbatim `format` pattern failed to compile
    #[error("invalid format pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A `moment` format the injected date parser cannot interpret
    #[error("unsupported date format `{format}`")]
    UnsupportedDateFormat {
        format: String,
        #[source]
        source: DateFormatError,
    },
}

impl ValidationError {
    pub(crate) fn malformed(
        rule: &str,
        expected: &'static str,
        found: impl std::fmt::Display,
    ) -> Self {
        Self::MalformedArgument {
            rule: rule.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}
