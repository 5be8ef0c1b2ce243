//! `mask` command: compute the masked position for one entity.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use geoveil::config::ConfigFile;
use geoveil::mask::{Masker, RadiusBounds};
use geoveil::GeoPoint;

use super::common::{format_coords, print_json};
use crate::error::CliError;

/// Arguments for `geoveil mask`.
#[derive(Debug, Args)]
pub struct MaskArgs {
    /// Entity identifier used as the seed (e.g. pet-42)
    pub id: String,

    /// True latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// True longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Inner radius of the masking ring in meters (overrides config)
    #[arg(long)]
    pub min_radius: Option<f64>,

    /// Outer radius of the masking ring in meters (overrides config)
    #[arg(long)]
    pub max_radius: Option<f64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// JSON shape of a masking result.
#[derive(Debug, Serialize)]
struct MaskOutput<'a> {
    id: &'a str,
    latitude: f64,
    longitude: f64,
    privacy_radius_m: f64,
}

/// Build the masker for this invocation: config values with CLI overrides.
pub fn masker_for(args: &MaskArgs, config: &ConfigFile) -> Masker {
    let bounds = RadiusBounds::new(
        args.min_radius.unwrap_or(config.masking.min_radius_m),
        args.max_radius.unwrap_or(config.masking.max_radius_m),
    );
    Masker::new(bounds).with_disclosure_floor(config.masking.disclosure_floor_m)
}

/// Run the mask command.
pub fn run(args: MaskArgs, config: &ConfigFile) -> Result<(), CliError> {
    let masker = masker_for(&args, config);
    let point = GeoPoint::sanitized(args.latitude, args.longitude);
    debug!(
        min_radius_m = masker.bounds().min_m(),
        max_radius_m = masker.bounds().max_m(),
        "Masking location"
    );

    let masked = masker.mask(&args.id, point);

    if args.json {
        return print_json(&MaskOutput {
            id: &args.id,
            latitude: masked.latitude(),
            longitude: masked.longitude(),
            privacy_radius_m: masked.privacy_radius_m,
        });
    }

    println!("Entity:         {}", args.id);
    println!("Masked:         {}", format_coords(masked.latitude(), masked.longitude()));
    println!("Privacy radius: {:.1} m", masked.privacy_radius_m);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(min: Option<f64>, max: Option<f64>) -> MaskArgs {
        MaskArgs {
            id: "pet-42".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
            min_radius: min,
            max_radius: max,
            json: false,
        }
    }

    #[test]
    fn test_masker_uses_config_defaults() {
        let config = ConfigFile::default();
        let masker = masker_for(&args(None, None), &config);
        assert_eq!(masker.bounds().min_m(), 100.0);
        assert_eq!(masker.bounds().max_m(), 300.0);
    }

    #[test]
    fn test_masker_cli_overrides_config() {
        let config = ConfigFile::default();
        let masker = masker_for(&args(Some(50.0), Some(75.0)), &config);
        assert_eq!(masker.bounds().min_m(), 50.0);
        assert_eq!(masker.bounds().max_m(), 75.0);
    }

    #[test]
    fn test_masker_keeps_config_floor() {
        let mut config = ConfigFile::default();
        config.masking.disclosure_floor_m = 10.0;
        let masker = masker_for(&args(None, None), &config);
        assert_eq!(masker.disclosure_floor_m(), 10.0);
    }
}
