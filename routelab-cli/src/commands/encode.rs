//! Encode command - compress coordinates into a polyline string.

use routelab::polyline;

use super::common::parse_points;
use crate::error::CliError;

/// Arguments for the encode command.
pub struct EncodeArgs {
    pub points: Vec<String>,
    pub precision: u32,
}

/// Run the encode command.
pub fn run(args: EncodeArgs) -> Result<(), CliError> {
    println!("{}", render(&args)?);
    Ok(())
}

fn render(args: &EncodeArgs) -> Result<String, CliError> {
    let points = parse_points(&args.points)?;
    Ok(polyline::encode(&points, args.precision)?)
}
