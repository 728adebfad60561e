// File: src/argument.rs
// Purpose: Rule arguments and ordered rule sets

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Argument attached to a rule name in a [`RuleSet`]
///
/// Mirrors the shapes a `data-validate` attribute can carry: `true` for
/// flag rules, numbers for length bounds, strings for patterns, aliases,
/// field references and date formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleArgument {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RuleArgument {
    /// Borrow the argument as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleArgument::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the argument as a character count.
    ///
    /// Accepts non-negative whole numbers and numeric text (`"5"`), since
    /// HTML attributes frequently carry numbers as strings.
    pub fn as_length(&self) -> Option<usize> {
        match self {
            RuleArgument::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Some(*n as usize)
            }
            RuleArgument::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Short description of the argument shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            RuleArgument::Null => "null",
            RuleArgument::Bool(_) => "boolean",
            RuleArgument::Number(_) => "number",
            RuleArgument::Text(_) => "text",
        }
    }
}

impl fmt::Display for RuleArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleArgument::Null => write!(f, "null"),
            RuleArgument::Bool(b) => write!(f, "{}", b),
            RuleArgument::Number(n) => write!(f, "{}", n),
            RuleArgument::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for RuleArgument {
    fn from(b: bool) -> Self {
        RuleArgument::Bool(b)
    }
}

impl From<f64> for RuleArgument {
    fn from(n: f64) -> Self {
        RuleArgument::Number(n)
    }
}

impl From<i32> for RuleArgument {
    fn from(n: i32) -> Self {
        RuleArgument::Number(n as f64)
    }
}

impl From<String> for RuleArgument {
    fn from(s: String) -> Self {
        RuleArgument::Text(s)
    }
}

impl From<&str> for RuleArgument {
    fn from(s: &str) -> Self {
        RuleArgument::Text(s.to_string())
    }
}

/// Ordered rule name to argument mapping applied to one value.
///
/// Iteration follows insertion order. Inserting a name that is already
/// present replaces its argument but keeps its original position, the same
/// way a repeated key behaves in a JSON object literal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    entries: IndexMap<String, RuleArgument>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, argument: impl Into<RuleArgument>) -> Self {
        self.insert(name, argument);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, argument: impl Into<RuleArgument>) {
        self.entries.insert(name.into(), argument.into());
    }

    pub fn get(&self, name: &str) -> Option<&RuleArgument> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleArgument)> {
        self.entries.iter().map(|(n, arg)| (n.as_str(), arg))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the JSON object found in a `data-validate` attribute
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render back to the `data-validate` JSON form
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K, V> FromIterator<(K, V)> for RuleSet
where
    K: Into<String>,
    V: Into<RuleArgument>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (name, argument) in iter {
            set.insert(name, argument);
        }
        set
    }
}

// Order matters: rules run in sequence
impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.iter().eq(other.iter())
    }
}
