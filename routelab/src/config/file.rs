//! The on-disk configuration file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use super::{config_file_path, default_log_directory};
use crate::coord::Coordinate;
use crate::polyline::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::provider::{
    Costing, RoutingConfig, SearchConfig, Units, DEFAULT_GEOLOCATION_URL, DEFAULT_ROUTE_URL,
    DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS,
};

/// Default time allowed for a position fix, in seconds.
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value '{value}' for {section}.{key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            api_key: None,
            size: 1,
        }
    }
}

/// `[routing]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub costing: Costing,
    pub units: Units,
    pub shape_precision: u32,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ROUTE_URL.to_string(),
            api_key: None,
            costing: Costing::default(),
            units: Units::default(),
            shape_precision: DEFAULT_PRECISION,
        }
    }
}

/// `[origin]` section. Both fields must be set for a usable origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OriginSettings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl OriginSettings {
    /// The configured origin, if both coordinates are present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

/// `[geolocation]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct GeolocationSettings {
    /// IP lookup endpoint. `None` disables the lookup.
    pub url: Option<String>,
    /// Seconds allowed for a position fix.
    pub timeout: u64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_GEOLOCATION_URL.to_string()),
            timeout: DEFAULT_GEOLOCATION_TIMEOUT_SECS,
        }
    }
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub search: SearchSettings,
    pub routing: RoutingSettings,
    pub origin: OriginSettings,
    pub geolocation: GeolocationSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Loads from the default location, or defaults if the file is missing.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Loads from `path`, or defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(io) => ConfigFileError::Io(io),
            ini::Error::Parse(parse) => ConfigFileError::Parse {
                path: path.to_path_buf(),
                message: parse.to_string(),
            },
        })?;

        Self::from_ini(&ini)
    }

    /// Parses configuration text.
    pub fn parse(text: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigFileError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Writes to the default location, creating its directory.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Writes to `path`, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        debug!(path = %path.display(), "Config file saved");
        Ok(())
    }

    /// Search endpoint settings for the geocoder.
    pub fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default()
            .with_url(self.search.url.clone())
            .with_size(self.search.size);
        if let Some(key) = &self.search.api_key {
            config = config.with_api_key(key.clone());
        }
        config
    }

    /// Routing endpoint settings for the router.
    pub fn routing_config(&self) -> RoutingConfig {
        let mut config = RoutingConfig::default()
            .with_url(self.routing.url.clone())
            .with_costing(self.routing.costing)
            .with_units(self.routing.units)
            .with_shape_precision(self.routing.shape_precision);
        if let Some(key) = &self.routing.api_key {
            config = config.with_api_key(key.clone());
        }
        config
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();

        if let Some(v) = get(ini, "search", "url") {
            config.search.url = v.to_string();
        }
        config.search.api_key = get(ini, "search", "api_key").map(str::to_string);
        if let Some(v) = get(ini, "search", "size") {
            config.search.size = parse_value("search", "size", v)?;
        }

        if let Some(v) = get(ini, "routing", "url") {
            config.routing.url = v.to_string();
        }
        config.routing.api_key = get(ini, "routing", "api_key").map(str::to_string);
        if let Some(v) = get(ini, "routing", "costing") {
            config.routing.costing = parse_value("routing", "costing", v)?;
        }
        if let Some(v) = get(ini, "routing", "units") {
            config.routing.units = parse_value("routing", "units", v)?;
        }
        if let Some(v) = get(ini, "routing", "shape_precision") {
            config.routing.shape_precision = parse_precision(v)?;
        }

        if let Some(v) = get(ini, "origin", "latitude") {
            config.origin.latitude = Some(parse_value("origin", "latitude", v)?);
        }
        if let Some(v) = get(ini, "origin", "longitude") {
            config.origin.longitude = Some(parse_value("origin", "longitude", v)?);
        }

        if let Some(v) = ini.get_from(Some("geolocation"), "url") {
            // Present but empty disables the lookup
            config.geolocation.url = non_empty(v).map(str::to_string);
        }
        if let Some(v) = get(ini, "geolocation", "timeout") {
            config.geolocation.timeout = parse_timeout("geolocation", v)?;
        }

        if let Some(v) = get(ini, "http", "timeout") {
            config.http.timeout = parse_timeout("http", v)?;
        }

        if let Some(v) = get(ini, "logging", "directory") {
            config.logging.directory = PathBuf::from(v);
        }
        if let Some(v) = get(ini, "logging", "level") {
            config.logging.level = v.to_string();
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        {
            let mut section = ini.with_section(Some("search"));
            section
                .set("url", self.search.url.as_str())
                .set("size", self.search.size.to_string());
            if let Some(key) = &self.search.api_key {
                section.set("api_key", key.as_str());
            }
        }

        {
            let mut section = ini.with_section(Some("routing"));
            section
                .set("url", self.routing.url.as_str())
                .set("costing", self.routing.costing.as_str())
                .set("units", self.routing.units.as_str())
                .set("shape_precision", self.routing.shape_precision.to_string());
            if let Some(key) = &self.routing.api_key {
                section.set("api_key", key.as_str());
            }
        }

        if self.origin.latitude.is_some() || self.origin.longitude.is_some() {
            let mut section = ini.with_section(Some("origin"));
            if let Some(lat) = self.origin.latitude {
                section.set("latitude", lat.to_string());
            }
            if let Some(lon) = self.origin.longitude {
                section.set("longitude", lon.to_string());
            }
        }

        ini.with_section(Some("geolocation"))
            .set("url", self.geolocation.url.clone().unwrap_or_default())
            .set("timeout", self.geolocation.timeout.to_string());

        ini.with_section(Some("http"))
            .set("timeout", self.http.timeout.to_string());

        ini.with_section(Some("logging"))
            .set("directory", self.logging.directory.display().to_string())
            .set("level", self.logging.level.as_str());

        ini
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// A non-empty value for `section.key`.
fn get<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.get_from(Some(section), key).and_then(non_empty)
}

fn parse_value<T>(section: &'static str, key: &'static str, value: &str) -> Result<T, ConfigFileError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| ConfigFileError::InvalidValue {
            section,
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_precision(value: &str) -> Result<u32, ConfigFileError> {
    let precision: u32 = parse_value("routing", "shape_precision", value)?;
    if precision > MAX_PRECISION {
        return Err(ConfigFileError::InvalidValue {
            section: "routing",
            key: "shape_precision",
            value: value.to_string(),
            reason: format!("must be at most {}", MAX_PRECISION),
        });
    }
    Ok(precision)
}

/// Timeouts are whole seconds, at least one.
fn parse_timeout(section: &'static str, value: &str) -> Result<u64, ConfigFileError> {
    let secs: u64 = parse_value(section, "timeout", value)?;
    if secs == 0 {
        return Err(ConfigFileError::InvalidValue {
            section,
            key: "timeout",
            value: value.to_string(),
            reason: "must be at least 1 second".to_string(),
        });
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("config.ini")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.routing.shape_precision, 6);
        assert_eq!(config.routing.costing, Costing::Auto);
        assert_eq!(config.routing.units, Units::Miles);
        assert!(config.origin.coordinate().is_none());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = ConfigFile::parse(
            r#"
[search]
url = https://search.example.com/v1/search
api_key = search-key
size = 3

[routing]
url = https://route.example.com/optimized_route
api_key = route-key
costing = bicycle
units = km
shape_precision = 5

[origin]
latitude = 47.61
longitude = -122.33

[geolocation]
url =
timeout = 4

[http]
timeout = 12

[logging]
directory = /tmp/routelab-logs
level = debug
"#,
        )
        .unwrap();

        assert_eq!(config.search.url, "https://search.example.com/v1/search");
        assert_eq!(config.search.api_key.as_deref(), Some("search-key"));
        assert_eq!(config.search.size, 3);
        assert_eq!(config.routing.costing, Costing::Bicycle);
        assert_eq!(config.routing.units, Units::Kilometers);
        assert_eq!(config.routing.shape_precision, 5);
        assert_eq!(
            config.origin.coordinate(),
            Some(Coordinate::new(47.61, -122.33))
        );
        assert_eq!(config.geolocation.url, None);
        assert_eq!(config.geolocation.timeout, 4);
        assert_eq!(config.http.timeout, 12);
        assert_eq!(config.logging.directory, PathBuf::from("/tmp/routelab-logs"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_origin_is_not_usable() {
        let config = ConfigFile::parse("[origin]\nlatitude = 47.61\n").unwrap();
        assert_eq!(config.origin.latitude, Some(47.61));
        assert!(config.origin.coordinate().is_none());
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = ConfigFile::parse("[http]\ntimeout = soon\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section, key, value, ..
            } => {
                assert_eq!((section, key, value.as_str()), ("http", "timeout", "soon"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        for section in ["geolocation", "http"] {
            let err = ConfigFile::parse(&format!("[{section}]\ntimeout = 0\n")).unwrap_err();
            match err {
                ConfigFileError::InvalidValue {
                    section: s, key, ..
                } => assert_eq!((s, key), (section, "timeout")),
                other => panic!("unexpected error: {other}"),
            }
        }

        let config = ConfigFile::parse("[geolocation]\ntimeout = 1\n[http]\ntimeout = 1\n").unwrap();
        assert_eq!(config.geolocation.timeout, 1);
        assert_eq!(config.http.timeout, 1);
    }

    #[test]
    fn test_invalid_costing_is_reported() {
        let err = ConfigFile::parse("[routing]\ncosting = hovercraft\n").unwrap_err();
        assert!(err.to_string().contains("routing.costing"));
    }

    #[test]
    fn test_precision_above_maximum_is_rejected() {
        let err = ConfigFile::parse("[routing]\nshape_precision = 16\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.search.api_key = Some("abc".to_string());
        config.routing.costing = Costing::Pedestrian;
        config.routing.units = Units::Kilometers;
        config.origin.latitude = Some(51.5);
        config.origin.longitude = Some(-0.12);
        config.geolocation.url = None;
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_runtime_configs() {
        let mut config = ConfigFile::default();
        config.routing.api_key = Some("key".to_string());
        config.routing.costing = Costing::Truck;
        config.routing.shape_precision = 5;
        config.search.size = 2;

        let routing = config.routing_config();
        assert_eq!(routing.costing, Costing::Truck);
        assert_eq!(routing.shape_precision, 5);
        assert_eq!(routing.api_key.as_deref(), Some("key"));

        let search = config.search_config();
        assert_eq!(search.size, 2);
        assert_eq!(search.api_key, None);
    }
}
