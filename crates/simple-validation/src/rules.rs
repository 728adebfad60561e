// File: src/rules.rs
// Purpose: Rule trait and the built-in rule set

use crate::argument::RuleArgument;
use crate::date::DateParser;
use crate::error::ValidationError;
use crate::fields::FieldSource;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

// Distinct verbatim patterns kept compiled per `Format`
const PATTERN_CACHE_LIMIT: usize = 256;

// US zip codes, optionally ZIP+4
static ZIPCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zipcode pattern compiles"));

// Any 2 to 100 characters
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.{2,100}$").expect("name pattern compiles"));

// Local part, then a domain with a known TLD or a dotted quad, then an optional port
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^[-a-z0-9~!$%^&*_=+\}\{'?]+(\.[-a-z0-9~!$%^&*_=+\}\{'?]+)*",
        r"@([a-z0-9_][-a-z0-9_]*(\.[-a-z0-9_]+)*",
        r"\.(aero|arpa|biz|com|coop|edu|gov|info|int|mil|museum|name|net|org|pro|travel|mobi|[a-z][a-z])",
        r"|([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}))",
        r"(:[0-9]{1,5})?$",
    ))
    .expect("email pattern compiles")
});

/// Everything a rule may consult besides the value and its argument
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    fields: &'a dyn FieldSource,
    date_parser: Option<&'a dyn DateParser>,
}

impl<'a> RuleContext<'a> {
    pub fn new(fields: &'a dyn FieldSource, date_parser: Option<&'a dyn DateParser>) -> Self {
        Self {
            fields,
            date_parser,
        }
    }

    /// Current value of another field, read now
    pub fn field_value(&self, reference: &str) -> Option<String> {
        self.fields.field_value(reference)
    }

    pub fn date_parser(&self) -> Option<&'a dyn DateParser> {
        self.date_parser
    }
}

/// A named, parameterized predicate over a field value
///
/// Plain closures `Fn(&str, &RuleArgument) -> bool` implement this trait,
/// so most custom rules never need a dedicated type.
pub trait Rule: Send + Sync {
    /// Reject argument shapes this rule cannot evaluate.
    ///
    /// Called for every registered rule of a rule set before any rule runs.
    fn check(&self, _name: &str, _argument: &RuleArgument) -> Result<(), ValidationError> {
        Ok(())
    }

    /// [`check`](Self::check) with the call's collaborators in reach
    fn check_with(
        &self,
        name: &str,
        argument: &RuleArgument,
        _ctx: &RuleContext<'_>,
    ) -> Result<(), ValidationError> {
        self.check(name, argument)
    }

    fn evaluate(&self, value: &str, argument: &RuleArgument, ctx: &RuleContext<'_>) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&str, &RuleArgument) -> bool + Send + Sync,
{
    fn evaluate(&self, value: &str, argument: &RuleArgument, _ctx: &RuleContext<'_>) -> bool {
        self(value, argument)
    }
}

/// `required`: value must be non-empty. The argument is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn evaluate(&self, value: &str, _argument: &RuleArgument, _ctx: &RuleContext<'_>) -> bool {
        !value.is_empty()
    }
}

/// `format`: value must match a regex or a named alias
#[derive(Debug)]
pub struct Format {
    aliases: HashMap<String, Regex>,
    // compiled verbatim patterns, cleared when full
    compiled: RwLock<HashMap<String, Regex>>,
}

impl Default for Format {
    fn default() -> Self {
        let mut aliases = HashMap::new();
        aliases.insert("zipcode".to_string(), ZIPCODE_REGEX.clone());
        aliases.insert("name".to_string(), NAME_REGEX.clone());
        aliases.insert("email".to_string(), EMAIL_REGEX.clone());
        Self {
            aliases,
            compiled: RwLock::new(HashMap::new()),
        }
    }
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an alias
    pub fn with_alias(mut self, name: impl Into<String>, pattern: &str) -> Result<Self, ValidationError> {
        let regex = compile(pattern)?;
        self.aliases.insert(name.into(), regex);
        Ok(self)
    }

    pub fn alias(&self, name: &str) -> Option<&Regex> {
        self.aliases.get(name)
    }

    fn resolve(&self, argument: &str) -> Result<Regex, ValidationError> {
        if let Some(regex) = self.aliases.get(argument) {
            return Ok(regex.clone());
        }

        let cached = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(argument)
            .cloned();
        if let Some(regex) = cached {
            return Ok(regex);
        }

        let regex = compile(argument)?;
        let mut compiled = self.compiled.write().unwrap_or_else(PoisonError::into_inner);
        if compiled.len() >= PATTERN_CACHE_LIMIT {
            compiled.clear();
        }
        compiled.insert(argument.to_string(), regex.clone());
        Ok(regex)
    }
}

fn compile(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(pattern).map_err(|source| ValidationError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl Rule for Format {
    fn check(&self, name: &str, argument: &RuleArgument) -> Result<(), ValidationError> {
        let pattern = argument
            .as_text()
            .ok_or_else(|| ValidationError::malformed(name, "a pattern or alias", argument))?;
        self.resolve(pattern).map(|_| ())
    }

    fn evaluate(&self, value: &str, argument: &RuleArgument, _ctx: &RuleContext<'_>) -> bool {
        argument
            .as_text()
            .and_then(|pattern| self.resolve(pattern).ok())
            .is_some_and(|regex| regex.is_match(value))
    }
}

fn check_length(name: &str, argument: &RuleArgument) -> Result<usize, ValidationError> {
    argument
        .as_length()
        .ok_or_else(|| ValidationError::malformed(name, "a non-negative integer", argument))
}

/// `max`: at most `n` characters
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl Rule for Max {
    fn check(&self, name: &str, argument: &RuleArgument) -> Result<(), ValidationError> {
        check_length(name, argument).map(|_| ())
    }

    fn evaluate(&self, value: &str, argument: &RuleArgument, _ctx: &RuleContext<'_>) -> bool {
        argument
            .as_length()
            .is_some_and(|max| value.chars().count() <= max)
    }
}

/// `min`: at least `n` characters
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl Rule for Min {
    fn check(&self, name: &str, argument: &RuleArgument) -> Result<(), ValidationError> {
        check_length(name, argument).map(|_| ())
    }

    fn evaluate(&self, value: &str, argument: &RuleArgument, _ctx: &RuleContext<'_>) -> bool {
        argument
            .as_length()
            .is_some_and(|min| value.chars().count() >= min)
    }
}

/// `matches`: value must equal another field's current value
#[derive(Debug, Clone, Copy, Default)]
pub struct Matches;

impl Rule for Matches {
    fn check(&self, name: &str, argument: &RuleArgument) -> Result<(), ValidationError> {
        argument
            .as_text()
            .map(|_| ())
            .ok_or_else(|| ValidationError::malformed(name, "a field reference", argument))
    }

    fn evaluate(&self, value: &str, argument: &RuleArgument, ctx: &RuleContext<'_>) -> bool {
        argument
            .as_text()
            .and_then(|reference| ctx.field_value(reference))
            .is_some_and(|other| other == value)
    }
}

/// `moment`: value must parse as a date under the given format.
///
/// Passes with a warning when no date parser is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct Moment;

impl Rule for Moment {
    fn check(&self, name: &str, argument: &RuleArgument) -> Result<(), ValidationError> {
        argument
            .as_text()
            .map(|_| ())
            .ok_or_else(|| ValidationError::malformed(name, "a date format", argument))
    }

    fn check_with(
        &self,
        name: &str,
        argument: &RuleArgument,
        ctx: &RuleContext<'_>,
    ) -> Result<(), ValidationError> {
        self.check(name, argument)?;
        match (ctx.date_parser(), argument.as_text()) {
            (Some(parser), Some(format)) => {
                parser
                    .check_format(format)
                    .map_err(|source| ValidationError::UnsupportedDateFormat {
                        format: format.to_string(),
                        source,
                    })
            }
            _ => Ok(()),
        }
    }

    fn evaluate(&self, value: &str, argument: &RuleArgument, ctx: &RuleContext<'_>) -> bool {
        let Some(parser) = ctx.date_parser() else {
            tracing::warn!("date parser not available --- skipping `moment` validation");
            return true;
        };
        argument
            .as_text()
            .is_some_and(|format| parser.parse(value, format).valid)
    }
}
