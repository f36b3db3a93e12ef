//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path`
//! for viewing and changing settings from the command line.

use clap::Subcommand;
use routelab::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., routing.costing)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., routing.costing)
        key: String,

        /// Value to set (empty clears optional settings)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'routelab config list' to see available keys.",
            key
        ))
    })
}

/// Get a configuration value.
fn run_get(key: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load()?;
    let value = config_key.get(&config);

    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Set a configuration value.
fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load()?;
    config_key.set(&mut config, value)?;
    config.save()?;

    println!("Set {} = {}", config_key.name(), config_key.get(&config));

    Ok(())
}

/// Lines printed by `config list`, grouped by section.
fn list_lines(config: &ConfigFile) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                lines.push(String::new());
            }
            lines.push(format!("[{}]", section));
            current_section = section;
        }

        let value = key.get(config);
        if value.is_empty() {
            lines.push(format!("  {} = (not set)", key.key_name()));
        } else {
            lines.push(format!("  {} = {}", key.key_name(), value));
        }
    }

    lines
}

/// List all configuration settings.
fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    println!();
    for line in list_lines(&config) {
        println!("{}", line);
    }

    Ok(())
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_groups_sections() {
        let lines = list_lines(&ConfigFile::default());

        assert_eq!(lines[0], "[search]");
        assert!(lines.contains(&"[routing]".to_string()));
        assert!(lines.contains(&"  costing = auto".to_string()));
        assert!(lines.contains(&"  api_key = (not set)".to_string()));

        let headers = lines.iter().filter(|l| l.starts_with('[')).count();
        assert_eq!(headers, 6);
    }

    #[test]
    fn test_unknown_key_message() {
        let err = parse_key("routing.speed").unwrap_err();
        assert!(err.to_string().contains("routelab config list"));
    }
}
