mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sv")]
#[command(version, about = "Simple Validation - check values against declarative rules", long_about = None)]
struct Cli {
    /// Configuration file (settings, aliases, fields)
    #[arg(short, long, global = true, default_value = simple_validation::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log rule evaluation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one value against a rule set
    Check {
        /// Value under test
        value: String,

        /// Rules as a data-validate JSON object, e.g. '{"required":true,"max":20}'
        #[arg(short, long)]
        rules: String,

        /// Other field values visible to `matches` (name=value)
        #[arg(short, long = "field", value_parser = commands::parse_key_value)]
        fields: Vec<(String, String)>,

        /// Validate without a date parser (`moment` rules are skipped)
        #[arg(long)]
        no_date_parser: bool,
    },

    /// Validate every field declared in the configuration
    Form {
        /// Field values to set before validating (name=value)
        #[arg(short, long = "set", value_parser = commands::parse_key_value)]
        values: Vec<(String, String)>,
    },

    /// List registered rules and presentation settings
    Rules,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("simple_validation=debug,sv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            value,
            rules,
            fields,
            no_date_parser,
        } => commands::check::run(&cli.config, &value, &rules, fields, no_date_parser),
        Commands::Form { values } => commands::form::run(&cli.config, values),
        Commands::Rules => commands::rules::run(&cli.config).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}
