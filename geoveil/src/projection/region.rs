//! Map viewport regions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coord::{meters_to_degrees, GeoPoint, METERS_PER_DEGREE_LAT};
use crate::error::GeoError;

/// Smallest angular span a region may have, in degrees.
///
/// Substituted for zero spans (a fully zoomed-in viewport) so projection
/// never divides by zero.
pub const MIN_SPAN_DEGREES: f64 = 1e-6;

/// A map viewport: a center point and its angular extent.
///
/// Spans are always finite and at least [`MIN_SPAN_DEGREES`]; deserialized
/// regions pass through [`Region::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRegion")]
pub struct Region {
    center: GeoPoint,
    latitude_delta: f64,
    longitude_delta: f64,
}

#[derive(Deserialize)]
struct RawRegion {
    center: GeoPoint,
    latitude_delta: f64,
    longitude_delta: f64,
}

impl From<RawRegion> for Region {
    fn from(raw: RawRegion) -> Self {
        Self::from_center(
            raw.center.latitude,
            raw.center.longitude,
            raw.latitude_delta,
            raw.longitude_delta,
        )
    }
}

impl Region {
    /// Create a region, substituting [`MIN_SPAN_DEGREES`] for degenerate spans.
    ///
    /// Negative spans are taken by magnitude and the center is sanitized.
    pub fn new(center: GeoPoint, latitude_delta: f64, longitude_delta: f64) -> Self {
        let center = GeoPoint::sanitized(center.latitude, center.longitude);
        let lat = sanitize_span(latitude_delta);
        let lon = sanitize_span(longitude_delta);

        if lat != latitude_delta.abs() || lon != longitude_delta.abs() {
            let err = GeoError::DegenerateViewport {
                latitude_delta,
                longitude_delta,
            };
            warn!(error = %err, substituted = MIN_SPAN_DEGREES, "Degenerate viewport");
        }

        Self {
            center,
            latitude_delta: lat,
            longitude_delta: lon,
        }
    }

    /// Create a region from raw center coordinates, sanitizing everything.
    pub fn from_center(
        center_latitude: f64,
        center_longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Self {
        Self::new(
            GeoPoint {
                latitude: center_latitude,
                longitude: center_longitude,
            },
            latitude_delta,
            longitude_delta,
        )
    }

    /// Create a region, rejecting degenerate spans.
    pub fn try_new(
        center: GeoPoint,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<Self, GeoError> {
        let usable = |d: f64| d.is_finite() && d >= MIN_SPAN_DEGREES;
        if !usable(latitude_delta) || !usable(longitude_delta) {
            return Err(GeoError::DegenerateViewport {
                latitude_delta,
                longitude_delta,
            });
        }
        Ok(Self {
            center: GeoPoint::try_new(center.latitude, center.longitude)?,
            latitude_delta,
            longitude_delta,
        })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Latitude covered by the full viewport height, in degrees.
    pub fn latitude_delta(&self) -> f64 {
        self.latitude_delta
    }

    /// Longitude covered by the full viewport width, in degrees.
    pub fn longitude_delta(&self) -> f64 {
        self.longitude_delta
    }

    /// A region just large enough to show a circle of `radius_m` around `center`.
    pub fn around(center: GeoPoint, radius_m: f64) -> Self {
        let (lat, lon) = meters_to_degrees(radius_m, radius_m, center.latitude);
        Self::new(center, 2.0 * lat, 2.0 * lon)
    }

    /// Whether a point falls inside the visible extent.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.latitude_delta / 2.0
            && (point.longitude - self.center.longitude).abs() <= self.longitude_delta / 2.0
    }

    /// Convert a north-south distance to a pixel length for a viewport
    /// `height_px` tall.
    pub fn meters_to_pixels(&self, meters: f64, height_px: f64) -> f64 {
        meters / METERS_PER_DEGREE_LAT / self.latitude_delta * height_px
    }
}

fn sanitize_span(raw: f64) -> f64 {
    if raw.is_finite() && raw.abs() >= MIN_SPAN_DEGREES {
        raw.abs()
    } else {
        MIN_SPAN_DEGREES
    }
}
