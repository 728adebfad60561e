// File: src/host.rs
// Purpose: Bridge between field change events, the validator and presentation

//! The validator only returns a [`Verdict`]. Reacting to it is the host's job:
//! this module turns a field change into reset, validate, then valid or
//! invalid callbacks on a [`Presenter`], and keeps a live [`FieldStore`] so
//! `matches` sees the other fields' current input.

use crate::argument::RuleSet;
use crate::error::ValidationError;
use crate::fields::FieldStore;
use crate::registry::Registry;
use crate::settings::Settings;
use crate::validator::{Validator, Verdict};
use std::collections::HashMap;
use std::sync::Arc;

/// Presentation side effects driven by a verdict
pub trait Presenter {
    /// Clear any previous verdict
    fn on_reset(&mut self);
    fn on_valid(&mut self);
    fn on_invalid(&mut self);
}

/// Class list of a field's container element.
///
/// Applies the registry's `valid_class` / `invalid_class` the way a
/// stylesheet-driven page expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
    settings: Settings,
}

impl ClassList {
    pub fn new(settings: Settings) -> Self {
        Self {
            classes: Vec::new(),
            settings,
        }
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space separated, as in a `class` attribute
    pub fn render(&self) -> String {
        self.classes.join(" ")
    }
}

impl Presenter for ClassList {
    fn on_reset(&mut self) {
        let Settings {
            valid_class,
            invalid_class,
        } = &self.settings;
        self.classes.retain(|c| c != valid_class && c != invalid_class);
    }

    fn on_valid(&mut self) {
        let class = self.settings.valid_class.clone();
        self.add(&class);
    }

    fn on_invalid(&mut self) {
        let class = self.settings.invalid_class.clone();
        self.add(&class);
    }
}

/// A field's new value together with the rules declared on it
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub value: String,
    pub rules: RuleSet,
}

impl FieldChange {
    pub fn new(value: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            value: value.into(),
            rules,
        }
    }

    /// Build from a raw `data-validate` attribute; a missing attribute means no rules
    pub fn from_attribute(
        value: impl Into<String>,
        data_validate: Option<&str>,
    ) -> Result<Self, serde_json::Error> {
        let rules = match data_validate {
            Some(json) if !json.trim().is_empty() => RuleSet::from_json(json)?,
            _ => RuleSet::new(),
        };
        Ok(Self::new(value, rules))
    }
}

/// Runs one validation per change and drives a presenter with the result
#[derive(Debug, Clone)]
pub struct Host {
    validator: Validator,
}

impl Host {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Presenter using the registry's current class names
    pub fn class_list(&self) -> ClassList {
        ClassList::new(self.validator.registry().settings().clone())
    }

    /// Reset the presenter, validate, then report the verdict to it.
    ///
    /// On error the presenter is left in its reset state.
    pub fn on_change(
        &self,
        change: &FieldChange,
        presenter: &mut dyn Presenter,
    ) -> Result<Verdict, ValidationError> {
        presenter.on_reset();
        let verdict = self.validator.validate(&change.value, &change.rules)?;
        match verdict {
            Verdict::Valid => presenter.on_valid(),
            Verdict::Invalid => presenter.on_invalid(),
        }
        Ok(verdict)
    }
}

/// A set of named fields validated against each other's live values
#[derive(Debug)]
pub struct Form {
    host: Host,
    store: FieldStore,
    fields: Vec<(String, RuleSet)>,
    presenters: HashMap<String, ClassList>,
}

impl Form {
    /// Form whose `matches` rules read from its own field store
    pub fn new(validator: Validator) -> Self {
        let store = FieldStore::new();
        let host = Host::new(validator.with_fields(store.clone()));
        Self {
            host,
            store,
            fields: Vec::new(),
            presenters: HashMap::new(),
        }
    }

    /// Form over a registry, without a date parser
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self::new(Validator::new(registry))
    }

    /// Declare a field. Re-declaring a field replaces its rules.
    pub fn add_field(&mut self, name: impl Into<String>, rules: RuleSet) {
        let name = name.into();
        if !self.presenters.contains_key(&name) {
            self.presenters.insert(name.clone(), self.host.class_list());
        }
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(field) => field.1 = rules,
            None => self.fields.push((name, rules)),
        }
    }

    /// Update a field's value without validating it
    pub fn set_value(&self, name: impl Into<String>, value: impl Into<String>) {
        self.store.set(name, value);
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.store.get(name)
    }

    /// Handle user input on a field: store the value, then validate the field.
    ///
    /// Returns `Ok(None)` for fields that were never declared.
    pub fn change(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<Verdict>, ValidationError> {
        self.store.set(name, value);
        self.validate_field(name)
    }

    /// Validate one declared field against its current value
    pub fn validate_field(&mut self, name: &str) -> Result<Option<Verdict>, ValidationError> {
        let Some((_, rules)) = self.fields.iter().find(|(n, _)| n == name) else {
            return Ok(None);
        };
        let change = FieldChange::new(self.store.get(name).unwrap_or_default(), rules.clone());

        let host = &self.host;
        let presenter = self
            .presenters
            .entry(name.to_string())
            .or_insert_with(|| host.class_list());
        host.on_change(&change, presenter).map(Some)
    }

    /// Validate every declared field, in declaration order
    pub fn validate_all(&mut self) -> Result<Vec<(String, Verdict)>, ValidationError> {
        let names: Vec<String> = self.fields.iter().map(|(n, _)| n.clone()).collect();
        let mut verdicts = Vec::with_capacity(names.len());
        for name in names {
            if let Some(verdict) = self.validate_field(&name)? {
                verdicts.push((name, verdict));
            }
        }
        Ok(verdicts)
    }

    pub fn classes(&self, name: &str) -> Option<&ClassList> {
        self.presenters.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Handle on the live values, shared with the validator
    pub fn store(&self) -> &FieldStore {
        &self.store
    }
}
