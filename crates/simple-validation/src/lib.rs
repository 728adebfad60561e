//! # simple-validation
//!
//! Declarative field validation. A value is checked against an ordered set of
//! named rules; every rule name is looked up in a [`Registry`] and the
//! [`Validator`] stops at the first rule that fails.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use simple_validation::{Registry, RuleSet, Validator, Verdict};
//!
//! let validator = Validator::new(Arc::new(Registry::with_defaults()));
//!
//! let rules = RuleSet::from_json(r#"{"required": true, "format": "zipcode"}"#).unwrap();
//! assert_eq!(validator.validate("12345", &rules).unwrap(), Verdict::Valid);
//! assert_eq!(validator.validate("1234", &rules).unwrap(), Verdict::Invalid);
//! ```
//!
//! ## Extending
//!
//! Rules are plain `(value, argument) -> bool` closures or types implementing
//! [`Rule`]. Registering a name that already exists replaces the old rule:
//!
//! ```rust
//! use simple_validation::{Extension, Registry, RuleArgument};
//!
//! let mut registry = Registry::with_defaults();
//! registry.extend(
//!     Extension::new().rule_fn("lowercase", |value: &str, _: &RuleArgument| {
//!         value.chars().all(|c| !c.is_uppercase())
//!     }),
//! );
//! assert!(registry.lookup("lowercase").is_some());
//! ```
//!
//! ## Features
//!
//! - **`chrono`** (default) - [`ChronoDateParser`] for the `moment` rule. Without
//!   a date parser the `moment` rule logs a warning and passes.

pub mod argument;
pub mod config;
pub mod date;
pub mod error;
pub mod fields;
pub mod host;
pub mod registry;
pub mod rules;
pub mod settings;
pub mod validator;

pub use argument::{RuleArgument, RuleSet};
pub use config::{Config, FieldConfig};
pub use date::{DateFormatError, DateParse, DateParser};
#[cfg(feature = "chrono")]
pub use date::ChronoDateParser;
pub use error::ValidationError;
pub use fields::{FieldSource, FieldStore};
pub use host::{ClassList, FieldChange, Form, Host, Presenter};
pub use registry::{Extension, Registry};
pub use rules::{Rule, RuleContext};
pub use settings::{Settings, SettingsPatch};
pub use validator::{Validator, Verdict};
