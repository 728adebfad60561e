// File: src/date.rs
// Purpose: Optional date parsing capability used by the `moment` rule

use thiserror::Error;

/// Outcome of parsing a value against a date format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParse {
    pub valid: bool,
}

/// A date format a parser cannot interpret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("`{token}` is not a supported date token")]
    UnsupportedToken { token: String },
}

/// Parses a value under a moment.js style format string (`YYYY-MM-DD`).
///
/// Injected into a [`Validator`](crate::Validator); when none is injected the
/// `moment` rule is skipped instead of failed.
pub trait DateParser: Send + Sync {
    fn parse(&self, value: &str, format: &str) -> DateParse;

    /// Reject formats this parser cannot interpret.
    ///
    /// Called while a rule set's arguments are checked, before any rule runs.
    fn check_format(&self, _format: &str) -> Result<(), DateFormatError> {
        Ok(())
    }
}

impl<F> DateParser for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn parse(&self, value: &str, format: &str) -> DateParse {
        DateParse {
            valid: self(value, format),
        }
    }
}

#[cfg(feature = "chrono")]
mod moment;

#[cfg(feature = "chrono")]
pub use self::moment::ChronoDateParser;
