//! Addressable configuration keys.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::ConfigFile;
use crate::coord::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::polyline::MAX_PRECISION;

/// Errors from [`ConfigKey`] parsing and assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigKeyError {
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// A single setting, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    SearchUrl,
    SearchApiKey,
    SearchSize,
    RoutingUrl,
    RoutingApiKey,
    RoutingCosting,
    RoutingUnits,
    RoutingShapePrecision,
    OriginLatitude,
    OriginLongitude,
    GeolocationUrl,
    GeolocationTimeout,
    HttpTimeout,
    LoggingDirectory,
    LoggingLevel,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::SearchUrl,
            ConfigKey::SearchApiKey,
            ConfigKey::SearchSize,
            ConfigKey::RoutingUrl,
            ConfigKey::RoutingApiKey,
            ConfigKey::RoutingCosting,
            ConfigKey::RoutingUnits,
            ConfigKey::RoutingShapePrecision,
            ConfigKey::OriginLatitude,
            ConfigKey::OriginLongitude,
            ConfigKey::GeolocationUrl,
            ConfigKey::GeolocationTimeout,
            ConfigKey::HttpTimeout,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingLevel,
        ]
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::SearchUrl | ConfigKey::SearchApiKey | ConfigKey::SearchSize => "search",
            ConfigKey::RoutingUrl
            | ConfigKey::RoutingApiKey
            | ConfigKey::RoutingCosting
            | ConfigKey::RoutingUnits
            | ConfigKey::RoutingShapePrecision => "routing",
            ConfigKey::OriginLatitude | ConfigKey::OriginLongitude => "origin",
            ConfigKey::GeolocationUrl | ConfigKey::GeolocationTimeout => "geolocation",
            ConfigKey::HttpTimeout => "http",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::SearchUrl | ConfigKey::RoutingUrl | ConfigKey::GeolocationUrl => "url",
            ConfigKey::SearchApiKey | ConfigKey::RoutingApiKey => "api_key",
            ConfigKey::SearchSize => "size",
            ConfigKey::RoutingCosting => "costing",
            ConfigKey::RoutingUnits => "units",
            ConfigKey::RoutingShapePrecision => "shape_precision",
            ConfigKey::OriginLatitude => "latitude",
            ConfigKey::OriginLongitude => "longitude",
            ConfigKey::GeolocationTimeout | ConfigKey::HttpTimeout => "timeout",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        fn opt<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_default()
        }

        match self {
            ConfigKey::SearchUrl => config.search.url.clone(),
            ConfigKey::SearchApiKey => opt(&config.search.api_key),
            ConfigKey::SearchSize => config.search.size.to_string(),
            ConfigKey::RoutingUrl => config.routing.url.clone(),
            ConfigKey::RoutingApiKey => opt(&config.routing.api_key),
            ConfigKey::RoutingCosting => config.routing.costing.to_string(),
            ConfigKey::RoutingUnits => config.routing.units.to_string(),
            ConfigKey::RoutingShapePrecision => config.routing.shape_precision.to_string(),
            ConfigKey::OriginLatitude => opt(&config.origin.latitude),
            ConfigKey::OriginLongitude => opt(&config.origin.longitude),
            ConfigKey::GeolocationUrl => opt(&config.geolocation.url),
            ConfigKey::GeolocationTimeout => config.geolocation.timeout.to_string(),
            ConfigKey::HttpTimeout => config.http.timeout.to_string(),
            ConfigKey::LoggingDirectory => config.logging.directory.display().to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validates and assigns `value`.
    ///
    /// An empty value clears optional settings (API keys, origin, IP lookup).
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        let optional = (!value.is_empty()).then(|| value.to_string());

        match self {
            ConfigKey::SearchUrl => config.search.url = self.url(value)?,
            ConfigKey::SearchApiKey => config.search.api_key = optional,
            ConfigKey::SearchSize => {
                let size: u32 = self.parse(value)?;
                if size == 0 {
                    return Err(self.invalid("must be at least 1"));
                }
                config.search.size = size;
            }
            ConfigKey::RoutingUrl => config.routing.url = self.url(value)?,
            ConfigKey::RoutingApiKey => config.routing.api_key = optional,
            ConfigKey::RoutingCosting => config.routing.costing = self.parse(value)?,
            ConfigKey::RoutingUnits => config.routing.units = self.parse(value)?,
            ConfigKey::RoutingShapePrecision => {
                let precision: u32 = self.parse(value)?;
                if precision > MAX_PRECISION {
                    return Err(self.invalid(format!("must be at most {}", MAX_PRECISION)));
                }
                config.routing.shape_precision = precision;
            }
            ConfigKey::OriginLatitude => {
                config.origin.latitude = self.parse_degrees(optional, MIN_LAT, MAX_LAT)?
            }
            ConfigKey::OriginLongitude => {
                config.origin.longitude = self.parse_degrees(optional, MIN_LON, MAX_LON)?
            }
            ConfigKey::GeolocationUrl => {
                config.geolocation.url = match optional {
                    Some(url) => Some(self.url(&url)?),
                    None => None,
                }
            }
            ConfigKey::GeolocationTimeout => config.geolocation.timeout = self.parse_timeout(value)?,
            ConfigKey::HttpTimeout => config.http.timeout = self.parse_timeout(value)?,
            ConfigKey::LoggingDirectory => {
                if value.is_empty() {
                    return Err(self.invalid("must not be empty"));
                }
                config.logging.directory = PathBuf::from(value);
            }
            ConfigKey::LoggingLevel => {
                if value.is_empty() {
                    return Err(self.invalid("must not be empty"));
                }
                config.logging.level = value.to_string();
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> ConfigKeyError {
        ConfigKeyError::InvalidValue {
            key: self.name(),
            reason: reason.into(),
        }
    }

    fn parse<T>(&self, value: &str) -> Result<T, ConfigKeyError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .parse()
            .map_err(|e: T::Err| self.invalid(format!("'{}': {}", value, e)))
    }

    fn parse_timeout(&self, value: &str) -> Result<u64, ConfigKeyError> {
        let secs: u64 = self.parse(value)?;
        if secs == 0 {
            return Err(self.invalid("must be at least 1 second"));
        }
        Ok(secs)
    }

    fn parse_degrees(
        &self,
        value: Option<String>,
        min: f64,
        max: f64,
    ) -> Result<Option<f64>, ConfigKeyError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let degrees: f64 = self.parse(&value)?;
        if !(min..=max).contains(&degrees) {
            return Err(self.invalid(format!("{} is outside {}..={}", degrees, min, max)));
        }
        Ok(Some(degrees))
    }

    fn url(&self, value: &str) -> Result<String, ConfigKeyError> {
        reqwest::Url::parse(value).map_err(|e| self.invalid(format!("'{}': {}", value, e)))?;
        Ok(value.to_string())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Costing, Units};

    #[test]
    fn test_every_key_parses_from_its_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<String> = ConfigKey::all().iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ConfigKey::all().len());
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            "routing.speed".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey("routing.speed".to_string()))
        );
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!(
            "Routing.Costing".parse::<ConfigKey>().unwrap(),
            ConfigKey::RoutingCosting
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut config = ConfigFile::default();

        ConfigKey::RoutingCosting.set(&mut config, "bicycle").unwrap();
        ConfigKey::RoutingUnits.set(&mut config, "km").unwrap();
        ConfigKey::OriginLatitude.set(&mut config, "47.61").unwrap();
        ConfigKey::SearchApiKey.set(&mut config, " secret ").unwrap();

        assert_eq!(config.routing.costing, Costing::Bicycle);
        assert_eq!(config.routing.units, Units::Kilometers);
        assert_eq!(ConfigKey::RoutingUnits.get(&config), "kilometers");
        assert_eq!(ConfigKey::OriginLatitude.get(&config), "47.61");
        assert_eq!(ConfigKey::SearchApiKey.get(&config), "secret");
        assert_eq!(ConfigKey::OriginLongitude.get(&config), "");
    }

    #[test]
    fn test_empty_value_clears_optional() {
        let mut config = ConfigFile::default();
        ConfigKey::GeolocationUrl.set(&mut config, "").unwrap();
        ConfigKey::RoutingApiKey.set(&mut config, "").unwrap();

        assert_eq!(config.geolocation.url, None);
        assert_eq!(config.routing.api_key, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = ConfigFile::default();

        assert!(ConfigKey::OriginLatitude.set(&mut config, "91").is_err());
        assert!(ConfigKey::OriginLongitude.set(&mut config, "east").is_err());
        assert!(ConfigKey::RoutingShapePrecision.set(&mut config, "16").is_err());
        assert!(ConfigKey::RoutingCosting.set(&mut config, "rocket").is_err());
        assert!(ConfigKey::SearchSize.set(&mut config, "0").is_err());
        assert!(ConfigKey::HttpTimeout.set(&mut config, "0").is_err());
        assert!(ConfigKey::SearchUrl.set(&mut config, "not a url").is_err());
        assert!(ConfigKey::LoggingLevel.set(&mut config, "  ").is_err());

        // Nothing changed
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_invalid_value_message_names_key() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::RoutingShapePrecision
            .set(&mut config, "20")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for routing.shape_precision: must be at most 15"
        );
    }
}
