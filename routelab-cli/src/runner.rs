//! Shared setup for commands that talk to the network.

use routelab::config::ConfigFile;
use routelab::logging::{init_logging, LoggingGuard};
use routelab::provider::AsyncReqwestClient;
use tracing::info;

use crate::error::CliError;

/// Loads configuration and installs logging for the lifetime of a command.
pub struct CliRunner {
    config: ConfigFile,
    logging: LoggingGuard,
}

impl CliRunner {
    /// Loads the config file and starts logging.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging = init_logging(&config.logging.directory, &config.logging.level)?;
        Ok(Self {
            config,
            logging,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Records the command and version at the top of the log.
    pub fn log_startup(&self, command: &str) {
        info!(
            command,
            version = routelab::VERSION,
            log_file = %self.logging.log_file().display(),
            "RouteLab starting"
        );
    }

    /// HTTP client with the configured timeout.
    pub fn http_client(&self) -> Result<AsyncReqwestClient, CliError> {
        Ok(AsyncReqwestClient::with_timeout(self.config.http.timeout)?)
    }
}
