use anyhow::{Context, Result};
use colored::Colorize;
use simple_validation::{Config, RuleSet, Verdict};
use std::collections::HashMap;
use std::path::Path;

/// Validate a single value. Returns whether it passed.
pub fn run(
    config_path: &Path,
    value: &str,
    rules: &str,
    fields: Vec<(String, String)>,
    no_date_parser: bool,
) -> Result<bool> {
    let mut config = Config::load(config_path)?;
    if no_date_parser {
        config.date_parser = false;
    }

    let rules = RuleSet::from_json(rules).context("Failed to parse --rules as a JSON object")?;
    let fields: HashMap<String, String> = fields.into_iter().collect();

    tracing::debug!("checking {:?} against {}", value, rules.to_json());
    let validator = config.validator()?.with_fields(fields);
    let verdict = validator.validate(value, &rules)?;

    match verdict {
        Verdict::Valid => println!("{}", verdict.to_string().green()),
        Verdict::Invalid => println!("{}", verdict.to_string().red()),
    }

    Ok(verdict.is_valid())
}
