//! Decode command - expand an encoded polyline into coordinates.

use routelab::coord::Bounds;
use routelab::map::route_feature_collection;
use routelab::polyline;

use crate::error::CliError;

/// Arguments for the decode command.
pub struct DecodeArgs {
    pub polyline: String,
    pub precision: u32,
    pub geojson: bool,
}

/// Run the decode command.
pub fn run(args: DecodeArgs) -> Result<(), CliError> {
    print!("{}", render(&args)?);
    Ok(())
}

/// Formats the decoded points: one `lat,lon` line each, or a GeoJSON
/// `LineString` document in `[lon, lat]` order bounded by its `bbox`.
fn render(args: &DecodeArgs) -> Result<String, CliError> {
    let points = polyline::decode(args.polyline.trim(), args.precision)?;

    if args.geojson {
        let mut collection = route_feature_collection(&points);
        collection.bbox = Bounds::from_points(&points).map(|bounds| bounds.to_bbox());
        return Ok(collection.to_json_pretty()? + "\n");
    }

    Ok(points
        .iter()
        .map(|p| {
            let [lat, lon] = p.to_lat_lon();
            format!("{},{}\n", lat, lon)
        })
        .collect())
}
