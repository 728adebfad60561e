use anyhow::Result;
use colored::Colorize;
use simple_validation::Config;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let registry = config.registry()?;

    println!("{}", "Rules:".green().bold());
    for name in registry.names() {
        println!("  {}", name.cyan());
    }

    if !config.aliases.is_empty() {
        println!();
        println!("{}", "Format aliases:".green().bold());
        for (name, pattern) in &config.aliases {
            println!("  {:<12} {}", name.cyan(), pattern);
        }
    }

    let settings = registry.settings();
    println!();
    println!("{}", "Settings:".green().bold());
    println!("  valid_class   {}", settings.valid_class);
    println!("  invalid_class {}", settings.invalid_class);

    Ok(())
}
