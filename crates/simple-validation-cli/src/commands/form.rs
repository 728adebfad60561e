use anyhow::{bail, Result};
use colored::Colorize;
use simple_validation::{Config, Verdict};
use std::path::Path;

/// Validate every configured field. Returns whether all of them passed.
pub fn run(config_path: &Path, values: Vec<(String, String)>) -> Result<bool> {
    let config = Config::load(config_path)?;
    if config.fields.is_empty() {
        bail!("No fields declared in {:?}", config_path);
    }

    let mut form = config.form()?;
    for (name, value) in values {
        form.set_value(name, value);
    }

    let verdicts = form.validate_all()?;
    for (name, verdict) in &verdicts {
        let classes = form
            .classes(name)
            .map(|c| c.render())
            .unwrap_or_default();
        let label = match verdict {
            Verdict::Valid => verdict.to_string().green(),
            Verdict::Invalid => verdict.to_string().red(),
        };
        println!("{:<20} {:<8} {}", name.bold(), label, classes.dimmed());
    }

    Ok(verdicts.iter().all(|(_, v)| v.is_valid()))
}
