// File: src/registry.rs
// Purpose: Rule registry with built-in defaults and extension

use crate::argument::RuleArgument;
use crate::rules::{Format, Matches, Max, Min, Moment, Required, Rule};
use crate::settings::{Settings, SettingsPatch};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Mapping from rule name to rule, plus presentation settings.
///
/// A registry is configured through `&mut` methods, then shared read-only
/// (usually as `Arc<Registry>`) with one or more [`Validator`](crate::Validator)s.
/// There is no removal: a name can only be re-bound.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, Arc<dyn Rule>>,
    settings: Settings,
}

impl Registry {
    /// Empty registry with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in rules:
    /// `required`, `format`, `max`, `min`, `matches` and `moment`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("required", Required);
        registry.register("format", Format::new());
        registry.register("max", Max);
        registry.register("min", Min);
        registry.register("matches", Matches);
        registry.register("moment", Moment);
        registry
    }

    /// Bind `name` to `rule`, returning the rule it replaced
    pub fn register(
        &mut self,
        name: impl Into<String>,
        rule: impl Rule + 'static,
    ) -> Option<Arc<dyn Rule>> {
        self.register_shared(name, Arc::new(rule))
    }

    /// Bind `name` to a plain `(value, argument) -> bool` closure
    pub fn register_fn<F>(&mut self, name: impl Into<String>, rule: F) -> Option<Arc<dyn Rule>>
    where
        F: Fn(&str, &RuleArgument) -> bool + Send + Sync + 'static,
    {
        self.register(name, rule)
    }

    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        rule: Arc<dyn Rule>,
    ) -> Option<Arc<dyn Rule>> {
        let name = name.into();
        let previous = self.rules.insert(name.clone(), rule);
        if previous.is_some() {
            tracing::debug!("rule `{}` overridden", name);
        }
        previous
    }

    /// Merge rules and settings; later rules replace same-named ones
    pub fn extend(&mut self, extension: Extension) {
        let Extension { rules, settings } = extension;
        for (name, rule) in rules {
            self.register_shared(name, rule);
        }
        if !settings.is_empty() {
            tracing::debug!("settings extended: {:?}", settings);
            self.settings.apply(settings);
        }
    }

    /// Rule bound to `name`. `None` means the rule does not apply.
    pub fn lookup(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| &**rule)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Rules and settings to merge into a [`Registry`]
#[derive(Clone, Default)]
pub struct Extension {
    rules: Vec<(String, Arc<dyn Rule>)>,
    settings: SettingsPatch,
}

impl Extension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.rules.push((name.into(), Arc::new(rule)));
        self
    }

    pub fn rule_fn<F>(self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&str, &RuleArgument) -> bool + Send + Sync + 'static,
    {
        self.rule(name, rule)
    }

    pub fn settings(mut self, settings: SettingsPatch) -> Self {
        self.settings = settings;
        self
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("Extension")
            .field("rules", &names)
            .field("settings", &self.settings)
            .finish()
    }
}
