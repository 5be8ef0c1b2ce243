//! Core geographic types.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GeoError;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// A WGS-84 coordinate in degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180]
/// when built through [`GeoPoint::try_new`] or [`GeoPoint::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point, correcting malformed input instead of failing.
    ///
    /// Non-finite components become `0.0`, latitude is clamped to the poles
    /// and longitude is wrapped around the antimeridian. Each correction is
    /// logged at `warn` level.
    pub fn sanitized(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: sanitize_latitude(latitude),
            longitude: sanitize_longitude(longitude),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

fn sanitize_latitude(raw: f64) -> f64 {
    let fixed = if raw.is_finite() {
        raw.clamp(MIN_LAT, MAX_LAT)
    } else {
        0.0
    };
    if fixed != raw {
        warn!(field = "latitude", raw = %raw, clamped = %fixed, "Invalid input clamped");
    }
    fixed
}

fn sanitize_longitude(raw: f64) -> f64 {
    let fixed = if raw.is_finite() {
        wrap_longitude(raw)
    } else {
        0.0
    };
    if fixed != raw {
        warn!(field = "longitude", raw = %raw, clamped = %fixed, "Invalid input clamped");
    }
    fixed
}

/// Wrap a finite longitude into [-180, 180].
///
/// Values already in range are returned untouched, so both -180 and 180
/// survive; anything else lands in [-180, 180).
#[inline]
pub fn wrap_longitude(lon: f64) -> f64 {
    if (MIN_LON..=MAX_LON).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_bounds() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::try_new(90.5, 0.0),
            Err(GeoError::InvalidLatitude(_))
        ));
        assert!(matches!(
            GeoPoint::try_new(0.0, -181.0),
            Err(GeoError::InvalidLongitude(_))
        ));
        assert!(matches!(
            GeoPoint::try_new(f64::NAN, 0.0),
            Err(GeoError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_sanitized_clamps_latitude() {
        let p = GeoPoint::sanitized(123.0, 10.0);
        assert_eq!(p.latitude, 90.0);
        assert_eq!(p.longitude, 10.0);

        let p = GeoPoint::sanitized(-95.0, 10.0);
        assert_eq!(p.latitude, -90.0);
    }

    #[test]
    fn test_sanitized_wraps_longitude() {
        let p = GeoPoint::sanitized(0.0, 190.0);
        assert!((p.longitude - (-170.0)).abs() < 1e-9);

        let p = GeoPoint::sanitized(0.0, -540.0);
        assert!((p.longitude - (-180.0)).abs() < 1e-9);
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let p = GeoPoint::sanitized(f64::NAN, f64::INFINITY);
        assert_eq!(p, GeoPoint { latitude: 0.0, longitude: 0.0 });
    }

    #[test]
    fn test_wrap_longitude_keeps_valid_values() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(2.3522), 2.3522);
    }

    #[test]
    fn test_display_format() {
        let p = GeoPoint {
            latitude: 48.8566,
            longitude: 2.3522,
        };
        assert_eq!(p.to_string(), "(48.856600, 2.352200)");
    }
}
