//! Init command - create or update the configuration file.

use console::Term;
use dialoguer::Input;
use routelab::config::{config_file_path, ConfigFile};
use routelab::coord::Coordinate;

use crate::error::CliError;

/// Answers collected from the init prompts.
#[derive(Debug, Default)]
struct InitAnswers {
    api_key: Option<String>,
    origin: Option<Coordinate>,
}

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let mut config = ConfigFile::load()?;

    if Term::stdout().is_term() {
        let answers = prompt(&config)?;
        apply(&mut config, answers);
    } else {
        println!("Not a terminal, writing current settings without prompting.");
    }

    config.save()?;

    let path = config_file_path();
    println!();
    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize RouteLab settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

fn prompt(config: &ConfigFile) -> Result<InitAnswers, CliError> {
    let api_key: String = Input::new()
        .with_prompt("Search API key (Enter to skip)")
        .with_initial_text(config.search.api_key.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CliError::Config(format!("Prompt failed: {}", e)))?;

    let current_origin = config
        .origin
        .coordinate()
        .map(|c| format!("{},{}", c.lat, c.lon))
        .unwrap_or_default();
    let origin: String = Input::new()
        .with_prompt("Default origin as lat,lon (Enter to use IP lookup)")
        .with_initial_text(current_origin)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            input
                .parse::<Coordinate>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| CliError::Config(format!("Prompt failed: {}", e)))?;

    Ok(InitAnswers {
        api_key: Some(api_key.trim().to_string()).filter(|k| !k.is_empty()),
        origin: origin.trim().parse().ok(),
    })
}

fn apply(config: &mut ConfigFile, answers: InitAnswers) {
    if answers.api_key.is_some() {
        config.search.api_key = answers.api_key.clone();
        if config.routing.api_key.is_none() {
            config.routing.api_key = answers.api_key;
        }
    }
    if let Some(origin) = answers.origin {
        config.origin.latitude = Some(origin.lat);
        config.origin.longitude = Some(origin.lon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_answers() {
        let mut config = ConfigFile::default();
        apply(
            &mut config,
            InitAnswers {
                api_key: Some("ge-123".to_string()),
                origin: Some(Coordinate::new(47.61, -122.33)),
            },
        );

        assert_eq!(config.search.api_key.as_deref(), Some("ge-123"));
        assert_eq!(config.routing.api_key.as_deref(), Some("ge-123"));
        assert_eq!(
            config.origin.coordinate(),
            Some(Coordinate::new(47.61, -122.33))
        );
    }

    #[test]
    fn test_skipped_answers_keep_existing() {
        let mut config = ConfigFile::default();
        config.search.api_key = Some("existing".to_string());
        config.routing.api_key = Some("routing".to_string());

        apply(&mut config, InitAnswers::default());

        assert_eq!(config.search.api_key.as_deref(), Some("existing"));
        assert_eq!(config.routing.api_key.as_deref(), Some("routing"));
        assert!(config.origin.coordinate().is_none());
    }
}
