// File: src/validator.rs
// Purpose: Short-circuiting evaluation of a rule set against one value

use crate::argument::{RuleArgument, RuleSet};
use crate::date::DateParser;
use crate::error::ValidationError;
use crate::fields::{FieldSource, NoFields};
use crate::registry::Registry;
use crate::rules::{Rule, RuleContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Outcome of a validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        self == Verdict::Valid
    }

    pub fn is_invalid(self) -> bool {
        self == Verdict::Invalid
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid"),
            Verdict::Invalid => write!(f, "invalid"),
        }
    }
}

/// Evaluates rule sets against a shared, read-only [`Registry`]
///
/// Each call is independent. Rules run in rule set order and evaluation
/// stops at the first failing rule; names missing from the registry are
/// skipped.
#[derive(Clone)]
pub struct Validator {
    registry: Arc<Registry>,
    fields: Arc<dyn FieldSource>,
    date_parser: Option<Arc<dyn DateParser>>,
}

impl Validator {
    /// Validator with no field source and no date parser
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            fields: Arc::new(NoFields),
            date_parser: None,
        }
    }

    /// Field source consulted by `matches` when calling [`validate`](Self::validate)
    pub fn with_fields(mut self, fields: impl FieldSource + 'static) -> Self {
        self.fields = Arc::new(fields);
        self
    }

    pub fn with_date_parser(mut self, parser: impl DateParser + 'static) -> Self {
        self.date_parser = Some(Arc::new(parser));
        self
    }

    pub fn with_shared_date_parser(mut self, parser: Option<Arc<dyn DateParser>>) -> Self {
        self.date_parser = parser;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn has_date_parser(&self) -> bool {
        self.date_parser.is_some()
    }

    /// Validate `value` using the validator's own field source
    pub fn validate(&self, value: &str, rules: &RuleSet) -> Result<Verdict, ValidationError> {
        self.validate_with(value, rules, self.fields.as_ref())
    }

    /// Validate `value`, reading other fields from `fields`.
    ///
    /// Arguments of every registered rule in the set are checked before any
    /// rule runs, so a malformed rule set is reported even when an earlier
    /// rule would have failed.
    pub fn validate_with(
        &self,
        value: &str,
        rules: &RuleSet,
        fields: &dyn FieldSource,
    ) -> Result<Verdict, ValidationError> {
        let applicable = self.resolve(rules);

        let ctx = RuleContext::new(fields, self.date_parser.as_deref());
        for (name, argument, rule) in &applicable {
            rule.check_with(name, argument, &ctx)?;
        }

        for (name, argument, rule) in applicable {
            if !rule.evaluate(value, argument, &ctx) {
                tracing::debug!("rule `{}` failed", name);
                return Ok(Verdict::Invalid);
            }
        }

        Ok(Verdict::Valid)
    }

    fn resolve<'r>(&'r self, rules: &'r RuleSet) -> Vec<(&'r str, &'r RuleArgument, &'r dyn Rule)> {
        rules
            .iter()
            .filter_map(|(name, argument)| match self.registry.lookup(name) {
                Some(rule) => Some((name, argument, rule)),
                None => {
                    tracing::trace!("no rule registered for `{}`, skipping", name);
                    None
                }
            })
            .collect()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .field("date_parser", &self.date_parser.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Extension;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn validator() -> Validator {
        Validator::new(Arc::new(Registry::with_defaults()))
    }

    #[test]
    fn test_empty_rule_set_is_valid() {
        assert_eq!(validator().validate("", &RuleSet::new()).unwrap(), Verdict::Valid);
    }

    #[test]
    fn test_unregistered_rules_are_skipped() {
        let rules = RuleSet::new().with("label", "Email").with("tooltip", false);
        assert_eq!(validator().validate("", &rules).unwrap(), Verdict::Valid);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut registry = Registry::with_defaults();
        registry.extend(Extension::new().rule_fn("count", move |_: &str, _: &RuleArgument| {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        }));
        let validator = Validator::new(Arc::new(registry));

        let failing_first = RuleSet::new().with("required", true).with("count", true);
        assert_eq!(validator.validate("", &failing_first).unwrap(), Verdict::Invalid);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let counting_first = RuleSet::new().with("count", true).with("required", true);
        assert_eq!(validator.validate("", &counting_first).unwrap(), Verdict::Invalid);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_malformed_argument_reported_before_evaluation() {
        let rules = RuleSet::new().with("required", true).with("max", "lots");
        let err = validator().validate("", &rules).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedArgument { ref rule, .. } if rule == "max"
        ));
    }

    #[test]
    fn test_malformed_argument_of_unregistered_rule_is_ignored() {
        let mut registry = Registry::new();
        registry.register_fn("always", |_: &str, _: &RuleArgument| true);
        let validator = Validator::new(Arc::new(registry));

        let rules = RuleSet::new().with("max", "lots").with("always", true);
        assert_eq!(validator.validate("x", &rules).unwrap(), Verdict::Valid);
    }

    #[test]
    fn test_date_parser_injection() {
        let rules = RuleSet::new().with("moment", "YYYY-MM-DD");
        let strict = validator().with_date_parser(|value: &str, _: &str| value == "2024-01-01");

        assert!(strict.has_date_parser());
        assert_eq!(strict.validate("2024-01-01", &rules).unwrap(), Verdict::Valid);
        assert_eq!(strict.validate("soon", &rules).unwrap(), Verdict::Invalid);
        assert_eq!(
            strict.with_shared_date_parser(None).validate("soon", &rules).unwrap(),
            Verdict::Valid
        );
    }

    #[test]
    fn test_verdict_conversions() {
        assert_eq!(Verdict::from(true), Verdict::Valid);
        assert!(Verdict::from(false).is_invalid());
        assert_eq!(Verdict::Invalid.to_string(), "invalid");
        assert_eq!(serde_json::to_string(&Verdict::Valid).unwrap(), r#""valid""#);
    }
}
