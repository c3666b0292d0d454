use clap::{Args, Subcommand, ValueEnum};

use super::{print_json, CommandError};
use sloto_client::config::Config;

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Manage configuration
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), CommandError> {
        match &self.command {
            ConfigSubcommand::Show { format } => match format {
                OutputFormat::Json => print_json(config),
                OutputFormat::Text => {
                    show_text(config);
                    Ok(())
                }
            },
        }
    }
}

fn show_text(config: &Config) {
    println!("Configuration");
    println!("=============\n");

    if let Some(path) = &config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!(
            "Config file: {} (not found)",
            Config::default_config_path().display()
        );
    }
    println!();

    match config.base_url() {
        Ok(base_url) => println!("effective base URL: {}", base_url),
        Err(e) => println!("effective base URL: invalid ({})", e),
    }
    println!();

    println!(
        "base_url: {}",
        config.base_url.value.as_deref().unwrap_or("(derived)")
    );
    println!("  source: {}", config.base_url.source);
    println!();

    let location = &config.location.value;
    println!(
        "location: {}//{}{}",
        location.protocol,
        location.hostname,
        location
            .port
            .map(|port| format!(":{}", port))
            .unwrap_or_default()
    );
    println!("  source: {}", config.location.source);
    println!();

    println!("api_port: {}", config.api_port.value);
    println!("  source: {}", config.api_port.source);
    println!();

    println!(
        "auth_token: {}",
        if config.auth_token.value.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("  source: {}", config.auth_token.source);
}
