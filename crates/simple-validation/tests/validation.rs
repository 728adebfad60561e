/// End-to-end behaviour of the validator over the built-in registry
///
/// Covers the guarantees callers rely on: empty and unknown rule sets pass,
/// evaluation stops at the first failure, the built-in rules behave as
/// documented, and extensions only affect later calls.

use rstest::rstest;
use simple_validation::{
    Extension, FieldStore, Registry, RuleArgument, RuleSet, ValidationError, Validator, Verdict,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn validator() -> Validator {
    Validator::new(Arc::new(Registry::with_defaults()))
}

fn rules(json: &str) -> RuleSet {
    RuleSet::from_json(json).unwrap()
}

#[rstest]
#[case("")]
#[case("anything")]
#[case("   ")]
fn test_empty_rule_set_always_valid(#[case] value: &str) {
    assert_eq!(validator().validate(value, &RuleSet::new()).unwrap(), Verdict::Valid);
}

#[test]
fn test_unregistered_names_always_valid() {
    let rules = rules(r#"{"label": "Email", "hint": 3, "placeholder": null}"#);
    assert_eq!(validator().validate("", &rules).unwrap(), Verdict::Valid);
}

#[test]
fn test_repeated_calls_agree() {
    let validator = validator();
    let rules = rules(r#"{"required": true, "format": "email"}"#);
    for value in ["user@example.com", "not-an-email", ""] {
        let first = validator.validate(value, &rules).unwrap();
        let second = validator.validate(value, &rules).unwrap();
        assert_eq!(first, second, "verdict for {:?} changed between calls", value);
    }
}

#[test]
fn test_rules_after_failure_never_run() {
    let touched = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&touched);

    let mut registry = Registry::with_defaults();
    registry.register_fn("observe", move |_: &str, _: &RuleArgument| {
        flag.store(true, Ordering::SeqCst);
        true
    });
    let validator = Validator::new(Arc::new(registry));

    let verdict = validator
        .validate("", &rules(r#"{"required": true, "observe": true}"#))
        .unwrap();
    assert_eq!(verdict, Verdict::Invalid);
    assert!(!touched.load(Ordering::SeqCst));
}

#[test]
fn test_required() {
    let required = rules(r#"{"required": true}"#);
    assert_eq!(validator().validate("", &required).unwrap(), Verdict::Invalid);
    assert_eq!(validator().validate("x", &required).unwrap(), Verdict::Valid);
}

#[rstest]
#[case("12345", Verdict::Valid)]
#[case("1234", Verdict::Invalid)]
#[case("12345-6789", Verdict::Valid)]
fn test_zipcode(#[case] value: &str, #[case] expected: Verdict) {
    let zip = rules(r#"{"format": "zipcode"}"#);
    assert_eq!(validator().validate(value, &zip).unwrap(), expected);
}

#[test]
fn test_length_bounds() {
    let v = validator();
    assert_eq!(v.validate("abc", &rules(r#"{"min": 2, "max": 5}"#)).unwrap(), Verdict::Valid);
    assert_eq!(v.validate("a", &rules(r#"{"min": 2}"#)).unwrap(), Verdict::Invalid);
    assert_eq!(v.validate("abcdef", &rules(r#"{"max": 5}"#)).unwrap(), Verdict::Invalid);
}

#[test]
fn test_matches_reads_current_value() {
    let store = FieldStore::new();
    let validator = validator().with_fields(store.clone());
    let confirm = rules(r##"{"matches": "#password"}"##);

    store.set("#password", "foo");
    assert_eq!(validator.validate("foo", &confirm).unwrap(), Verdict::Valid);
    assert_eq!(validator.validate("bar", &confirm).unwrap(), Verdict::Invalid);

    store.set("#password", "bar");
    assert_eq!(validator.validate("bar", &confirm).unwrap(), Verdict::Valid);
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_moment_without_date_parser_passes_with_warning() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let date = rules(r#"{"moment": "YYYY-MM-DD"}"#);
    tracing::subscriber::with_default(subscriber, || {
        for value in ["anything", "", "2024-13-45"] {
            assert_eq!(validator().validate(value, &date).unwrap(), Verdict::Valid);
        }
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("WARN"), "no warning logged: {}", output);
    assert!(output.contains("date parser not available"));
}

#[cfg(feature = "chrono")]
#[test]
fn test_moment_with_chrono_parser() {
    let validator = validator().with_date_parser(simple_validation::ChronoDateParser::new());
    let date = rules(r#"{"required": true, "moment": "DD/MM/YYYY"}"#);
    assert_eq!(validator.validate("29/02/2024", &date).unwrap(), Verdict::Valid);
    assert_eq!(validator.validate("29/02/2023", &date).unwrap(), Verdict::Invalid);
    assert_eq!(validator.validate("", &date).unwrap(), Verdict::Invalid);
}

#[cfg(feature = "chrono")]
#[rstest]
#[case("2024/01/01", r#"{"moment": "YYYY-MM-DD"}"#)]
#[case("2024-01-01 extra", r#"{"moment": "YYYY-MM-DD"}"#)]
#[case("04/01/1990", r#"{"moment": "L"}"#)]
#[case("1st", r#"{"moment": "Do"}"#)]
fn test_moment_parses_forgivingly(#[case] value: &str, #[case] json: &str) {
    let validator = validator().with_date_parser(simple_validation::ChronoDateParser::new());
    assert_eq!(validator.validate(value, &rules(json)).unwrap(), Verdict::Valid);
}

#[cfg(feature = "chrono")]
#[test]
fn test_moment_unsupported_format_is_reported() {
    let validator = validator().with_date_parser(simple_validation::ChronoDateParser::new());
    let err = validator
        .validate("2024", &rules(r#"{"required": true, "moment": "NNNN YYYY"}"#))
        .unwrap_err();
    assert!(matches!(err, ValidationError::UnsupportedDateFormat { .. }));
    assert_eq!(err.to_string(), "unsupported date format `NNNN YYYY`");

    // without a parser nothing can judge the format
    let skipped = self::validator().validate("2024", &rules(r#"{"moment": "NNNN YYYY"}"#));
    assert_eq!(skipped.unwrap(), Verdict::Valid);
}

#[test]
fn test_extension_applies_to_later_calls() {
    let empty_required = rules(r#"{"required": true}"#);

    let mut registry = Registry::with_defaults();
    let before = Validator::new(Arc::new(registry.clone()));

    registry.extend(Extension::new().rule_fn("required", |_: &str, _: &RuleArgument| true));
    let after = Validator::new(Arc::new(registry));

    assert_eq!(before.validate("", &empty_required).unwrap(), Verdict::Invalid);
    assert_eq!(after.validate("", &empty_required).unwrap(), Verdict::Valid);
}

#[test]
fn test_malformed_arguments() {
    let v = validator();

    let err = v.validate("abc", &rules(r#"{"max": true}"#)).unwrap_err();
    assert_eq!(err.to_string(), "rule `max` expects a non-negative integer, got true");

    let err = v.validate("abc", &rules(r#"{"format": "[a-"}"#)).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidPattern { .. }));

    let err = v.validate("abc", &rules(r#"{"matches": 4}"#)).unwrap_err();
    assert!(matches!(err, ValidationError::MalformedArgument { .. }));

    let err = v.validate("abc", &rules(r#"{"moment": null}"#)).unwrap_err();
    assert!(matches!(err, ValidationError::MalformedArgument { .. }));
}

#[test]
fn test_validators_share_registry_across_threads() {
    let validator = validator();
    let email = rules(r#"{"required": true, "format": "email"}"#);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validator = validator.clone();
            let email = email.clone();
            std::thread::spawn(move || {
                let value = format!("user{}@example.com", i);
                validator.validate(&value, &email).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Verdict::Valid);
    }
}
