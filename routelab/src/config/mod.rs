//! Persistent configuration.
//!
//! Settings live in an INI file at `<config dir>/routelab/config.ini`
//! (`~/.config/routelab/config.ini` on Linux). A missing file yields the
//! defaults, and every key is optional.
//!
//! ```ini
//! [search]
//! url = https://api.geocode.earth/v1/search
//! api_key = ge-xxxxxxxx
//! size = 1
//!
//! [routing]
//! url = https://valhalla1.openstreetmap.de/optimized_route
//! costing = auto
//! units = miles
//! shape_precision = 6
//!
//! [origin]
//! latitude = 47.61
//! longitude = -122.33
//!
//! [geolocation]
//! url = https://ipapi.co/json/
//! timeout = 10
//!
//! [http]
//! timeout = 30
//!
//! [logging]
//! directory = /home/user/.cache/routelab
//! level = info
//! ```
//!
//! [`ConfigKey`] names each setting as `section.key` for the `config get`
//! and `config set` commands.

mod file;
mod keys;

use std::path::PathBuf;

pub use file::{
    ConfigFile, ConfigFileError, GeolocationSettings, HttpSettings, LoggingSettings,
    OriginSettings, RoutingSettings, SearchSettings, DEFAULT_GEOLOCATION_TIMEOUT_SECS,
    DEFAULT_LOG_LEVEL,
};
pub use keys::{ConfigKey, ConfigKeyError};

/// Application directory name under the platform config and cache dirs.
pub const APP_DIR_NAME: &str = "routelab";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Directory holding the configuration file.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Full path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Default directory for log files.
pub fn default_log_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_path_layout() {
        let path = config_file_path();
        assert!(path.ends_with("routelab/config.ini"));
    }

    #[test]
    fn test_default_log_directory_is_app_specific() {
        assert!(default_log_directory().ends_with(APP_DIR_NAME));
    }
}
