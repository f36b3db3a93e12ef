//! RouteLab CLI - Command-line interface
//!
//! Routes from the user's position to a searched destination and works with
//! encoded polylines directly.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use routelab::coord::Coordinate;
use routelab::polyline::DEFAULT_PRECISION;

use commands::common::{parse_precision, CostingArg, UnitsArg};
use commands::config::ConfigCommands;
use commands::{config, decode, encode, init, route};
use error::CliError;

/// RouteLab: geocode a destination, route to it and draw the result.
#[derive(Debug, Parser)]
#[command(name = "routelab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Route from your position to a destination and print the directions.
    ///
    /// The map (origin, destination and route line) is written as GeoJSON
    /// to --output, or to stdout when no file is given.
    Route {
        /// Free-text destination, e.g. "Pike Place Market, Seattle"
        destination: String,

        /// Origin as lat,lon (default: config origin, then IP lookup)
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<Coordinate>,

        /// Travel mode (default: routing.costing from config)
        #[arg(long, value_enum)]
        costing: Option<CostingArg>,

        /// Distance units (default: routing.units from config)
        #[arg(long, value_enum)]
        units: Option<UnitsArg>,

        /// Write the GeoJSON document to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode an encoded polyline into lat,lon lines.
    Decode {
        /// Encoded polyline string
        polyline: String,

        /// Decimal precision of the encoding
        #[arg(short, long, default_value_t = DEFAULT_PRECISION, value_parser = parse_precision)]
        precision: u32,

        /// Print a GeoJSON LineString instead
        #[arg(long)]
        geojson: bool,
    },

    /// Encode lat,lon points into a polyline.
    Encode {
        /// Points as lat,lon
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,

        /// Decimal precision of the encoding
        #[arg(short, long, default_value_t = DEFAULT_PRECISION, value_parser = parse_precision)]
        precision: u32,
    },

    /// View and change configuration settings.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Create the configuration file, prompting for common settings.
    Init,
}

async fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Route {
            destination,
            origin,
            costing,
            units,
            output,
        } => {
            route::run(route::RouteArgs {
                destination,
                origin,
                costing,
                units,
                output,
            })
            .await
        }
        Commands::Decode {
            polyline,
            precision,
            geojson,
        } => decode::run(decode::DecodeArgs {
            polyline,
            precision,
            geojson,
        }),
        Commands::Encode { points, precision } => {
            encode::run(encode::EncodeArgs { points, precision })
        }
        Commands::Config(command) => config::run(command),
        Commands::Init => init::run(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
