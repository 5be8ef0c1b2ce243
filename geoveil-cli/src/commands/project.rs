//! `project` command: place a point inside a map viewport.

use clap::Args;
use serde::Serialize;

use geoveil::config::ConfigFile;
use geoveil::projection::{project_to_screen, OverlayMarker, Region, ScreenFraction};
use geoveil::GeoPoint;

use super::common::print_json;
use crate::error::CliError;

/// Arguments for `geoveil project`.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Viewport center latitude
    #[arg(long, allow_negative_numbers = true)]
    pub center_lat: f64,

    /// Viewport center longitude
    #[arg(long, allow_negative_numbers = true)]
    pub center_lng: f64,

    /// Latitude span of the viewport in degrees
    #[arg(long)]
    pub lat_delta: f64,

    /// Longitude span of the viewport in degrees
    #[arg(long)]
    pub lng_delta: f64,

    /// Point latitude
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Point longitude
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Viewport width in pixels; with --height, also prints pixel placement
    #[arg(long, requires = "height")]
    pub width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long, requires = "width")]
    pub height: Option<f64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// JSON shape of a projection result.
#[derive(Debug, Serialize)]
pub struct ProjectOutput {
    pub x_fraction: f64,
    pub y_fraction: f64,
    /// Present when a viewport size was given and the point was not culled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<OverlayMarker>,
    pub culled: bool,
}

/// Compute the projection for the given arguments.
pub fn compute(args: &ProjectArgs, config: &ConfigFile) -> ProjectOutput {
    let region = Region::from_center(
        args.center_lat,
        args.center_lng,
        args.lat_delta,
        args.lng_delta,
    );
    let ScreenFraction { x, y } = project_to_screen(&region, args.latitude, args.longitude);

    let marker = match (args.width, args.height) {
        (Some(width), Some(height)) => config
            .projector(region, width, height)
            .place(&GeoPoint::sanitized(args.latitude, args.longitude)),
        _ => None,
    };

    let culled = args.width.is_some() && marker.is_none();

    ProjectOutput {
        x_fraction: x,
        y_fraction: y,
        marker,
        culled,
    }
}

/// Run the project command.
pub fn run(args: ProjectArgs, config: &ConfigFile) -> Result<(), CliError> {
    let output = compute(&args, config);

    if args.json {
        return print_json(&output);
    }

    println!("Fraction: x = {:.4}, y = {:.4}", output.x_fraction, output.y_fraction);
    if let Some(marker) = output.marker {
        let edge = if marker.pinned_to_edge {
            " (pinned to edge)"
        } else {
            ""
        };
        println!(
            "Pixels:   x = {:.1}, y = {:.1}{}",
            marker.position.x, marker.position.y, edge
        );
    } else if output.culled {
        println!("Pixels:   off-screen (culled)");
    }
    Ok(())
}
