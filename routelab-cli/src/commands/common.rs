//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use routelab::config::ConfigFile;
use routelab::coord::Coordinate;
use routelab::polyline::MAX_PRECISION;
use routelab::provider::{Costing, RoutingConfig, Units};

use crate::error::CliError;

/// Travel mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum CostingArg {
    /// Car
    Auto,
    /// Bicycle
    Bicycle,
    /// Walking
    Pedestrian,
    /// Bus
    Bus,
    /// Truck
    Truck,
    /// Motor scooter
    MotorScooter,
}

impl From<CostingArg> for Costing {
    fn from(arg: CostingArg) -> Self {
        match arg {
            CostingArg::Auto => Costing::Auto,
            CostingArg::Bicycle => Costing::Bicycle,
            CostingArg::Pedestrian => Costing::Pedestrian,
            CostingArg::Bus => Costing::Bus,
            CostingArg::Truck => Costing::Truck,
            CostingArg::MotorScooter => Costing::MotorScooter,
        }
    }
}

/// Distance units selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum UnitsArg {
    /// Miles
    #[value(alias = "mi")]
    Miles,
    /// Kilometers
    #[value(alias = "km")]
    Kilometers,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Miles => Units::Miles,
            UnitsArg::Kilometers => Units::Kilometers,
        }
    }
}

/// Resolve routing settings from CLI args and config.
pub fn resolve_routing(
    cli_costing: Option<CostingArg>,
    cli_units: Option<UnitsArg>,
    config: &ConfigFile,
) -> RoutingConfig {
    // CLI takes precedence, then config
    let mut routing = config.routing_config();
    if let Some(costing) = cli_costing {
        routing = routing.with_costing(costing.into());
    }
    if let Some(units) = cli_units {
        routing = routing.with_units(units.into());
    }
    routing
}

/// Resolve the fixed origin from CLI args and config, if any.
pub fn resolve_origin(cli_origin: Option<Coordinate>, config: &ConfigFile) -> Option<Coordinate> {
    cli_origin.or_else(|| config.origin.coordinate())
}

/// Clap parser for precision arguments.
pub fn parse_precision(s: &str) -> Result<u32, String> {
    let precision: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", s))?;
    if precision > MAX_PRECISION {
        return Err(format!("precision must be at most {}", MAX_PRECISION));
    }
    Ok(precision)
}

/// Parses every `lat,lon` argument, reporting the first bad one.
pub fn parse_points(values: &[String]) -> Result<Vec<Coordinate>, CliError> {
    values
        .iter()
        .map(|value| {
            value
                .parse::<Coordinate>()
                .map_err(|e| CliError::InvalidArgument(format!("'{}': {}", value, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let mut config = ConfigFile::default();
        config.routing.costing = Costing::Truck;
        config.routing.units = Units::Kilometers;

        let routing = resolve_routing(Some(CostingArg::Bicycle), None, &config);
        assert_eq!(routing.costing, Costing::Bicycle);
        assert_eq!(routing.units, Units::Kilometers);
    }

    #[test]
    fn test_origin_falls_back_to_config() {
        let mut config = ConfigFile::default();
        assert_eq!(resolve_origin(None, &config), None);

        config.origin.latitude = Some(47.61);
        config.origin.longitude = Some(-122.33);
        assert_eq!(
            resolve_origin(None, &config),
            Some(Coordinate::new(47.61, -122.33))
        );

        let cli = Coordinate::new(51.5, -0.12);
        assert_eq!(resolve_origin(Some(cli), &config), Some(cli));
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision("5"), Ok(5));
        assert!(parse_precision("16").is_err());
        assert!(parse_precision("six").is_err());
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points(&["38.5,-120.2".to_string(), "40.7, -120.95".to_string()]).unwrap();
        assert_eq!(points[1], Coordinate::new(40.7, -120.95));

        assert!(parse_points(&["38.5".to_string()]).is_err());
    }
}
