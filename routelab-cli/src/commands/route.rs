//! Route command - geocode a destination and route to it from the origin.

use std::path::PathBuf;
use std::time::Duration;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use routelab::app::{AppError, RouteController, RouteOutcome};
use routelab::coord::Coordinate;
use routelab::map::GeoJsonMap;
use routelab::provider::{
    AsyncReqwestClient, FixedLocation, IpGeolocation, NoGeolocation, PeliasGeocoder, Units,
    ValhallaRouter,
};
use tracing::info;

use super::common::{resolve_origin, resolve_routing, CostingArg, UnitsArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the route command.
pub struct RouteArgs {
    pub destination: String,
    pub origin: Option<Coordinate>,
    pub costing: Option<CostingArg>,
    pub units: Option<UnitsArg>,
    pub output: Option<PathBuf>,
}

/// Run the route command.
pub async fn run(args: RouteArgs) -> Result<(), CliError> {
    if args.destination.trim().is_empty() {
        return Err(AppError::EmptyDestination.into());
    }

    let runner = CliRunner::new()?;
    runner.log_startup("route");
    let config = runner.config();

    let routing = resolve_routing(args.costing, args.units, config);
    let units = routing.units;
    let http = runner.http_client()?;

    let geocoder = PeliasGeocoder::new(http.clone(), config.search_config());
    let router = ValhallaRouter::new(http.clone(), routing);
    let mut controller = RouteController::new(geocoder, router, GeoJsonMap::new());

    let spinner = spinner();

    spinner.set_message("Locating origin...");
    let timeout = Duration::from_secs(config.geolocation.timeout);
    let located = match (resolve_origin(args.origin, config), &config.geolocation.url) {
        (Some(origin), _) => controller.locate(&FixedLocation::new(origin), timeout).await,
        (None, Some(url)) => {
            let provider: IpGeolocation<AsyncReqwestClient> = IpGeolocation::new(http, url.clone());
            controller.locate(&provider, timeout).await
        }
        (None, None) => controller.locate(&NoGeolocation, timeout).await,
    };
    if let Err(e) = located {
        spinner.finish_and_clear();
        return Err(e.into());
    }

    spinner.set_message(format!("Routing to {}...", args.destination.trim()));
    let outcome = controller.calculate(&args.destination).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    let document = controller.into_map().to_feature_collection().to_json_pretty()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, document + "\n")?;
            print_summary(&Term::stdout(), &outcome, units)?;
            Term::stdout().write_line(&format!(
                "GeoJSON written to {}",
                style(path.display()).cyan()
            ))?;
            info!(path = %path.display(), "GeoJSON written");
        }
        None => {
            // Keep stdout clean for the document
            print_summary(&Term::stderr(), &outcome, units)?;
            println!("{}", document);
        }
    }

    Ok(())
}

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_summary(term: &Term, outcome: &RouteOutcome, units: Units) -> Result<(), CliError> {
    let destination = outcome
        .destination
        .label
        .clone()
        .unwrap_or_else(|| outcome.destination.coordinate.to_string());

    term.write_line(&format!(
        "{} {} {} {}",
        style("Route").bold(),
        outcome.origin,
        style("→").dim(),
        style(destination).bold()
    ))?;

    if let Some(summary) = outcome.summary {
        term.write_line(&format!(
            "{:.1} {}, about {} min",
            summary.length,
            units.abbreviation(),
            (summary.time / 60.0).round()
        ))?;
    }

    term.write_line("")?;
    for step in &outcome.steps {
        term.write_line(step)?;
    }
    term.write_line("")?;

    Ok(())
}
