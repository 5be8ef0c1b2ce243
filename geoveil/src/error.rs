//! Error types for geoveil.
//!
//! The masking and projection operations themselves never fail: malformed
//! input is clamped and reported through `tracing`. `GeoError` is returned by
//! the strict constructors, by configuration loading and by the CLI.

use thiserror::Error;

/// Result type for fallible geoveil operations.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors that can occur when validating input or loading configuration.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude is non-finite or outside [-90, 90].
    #[error("invalid latitude: {0} (must be within -90..=90)")]
    InvalidLatitude(f64),

    /// Longitude is non-finite or outside [-180, 180].
    #[error("invalid longitude: {0} (must be within -180..=180)")]
    InvalidLongitude(f64),

    /// Radius bounds are non-finite, non-positive or inverted.
    #[error("invalid radius bounds: min {min} m, max {max} m")]
    InvalidRadius { min: f64, max: f64 },

    /// A viewport with a zero or non-finite angular span.
    #[error("degenerate viewport: latitude delta {latitude_delta}, longitude delta {longitude_delta}")]
    DegenerateViewport {
        latitude_delta: f64,
        longitude_delta: f64,
    },

    /// Configuration value could not be parsed or applied.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading or writing configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// INI parse error.
    #[error("failed to parse configuration file: {0}")]
    Ini(#[from] ini::Error),
}
