//! Deterministic location masking.
//!
//! Hides an entity's exact coordinates by displacing them to a point on a
//! ring around the true location. The displacement is derived only from the
//! entity identifier, so the same entity always masks to the same apparent
//! position across restarts and devices, without any stored state.
//!
//! # Pipeline
//!
//! ```text
//! identifier ──► fnv1a_32 ──► [0,1] seed ──► LcgStream ──► (r1, r2)
//!                                                           │
//!             radius = min + r1·(max−min), angle = r2·2π ◄──┘
//!                                   │
//! true point ──► offset_by_meters(radius·cos, radius·sin) ──► masked point
//! ```
//!
//! # Privacy
//!
//! This is obfuscation for display, not a security control. Anyone who
//! knows the identifier can recompute the offset and recover the true point.
//!
//! # Example
//!
//! ```
//! use geoveil::mask::mask_location;
//!
//! let masked = mask_location("pet-42", 48.8566, 2.3522, Some(100.0), Some(300.0));
//! let again = mask_location("pet-42", 48.8566, 2.3522, Some(100.0), Some(300.0));
//! assert_eq!(masked, again);
//! ```

mod bounds;
mod hash;
mod lcg;

pub use bounds::{RadiusBounds, DEFAULT_MAX_RADIUS_M, DEFAULT_MIN_RADIUS_M, MIN_OFFSET_M};
pub use hash::{fnv1a_32, hash_to_unit_interval, FNV_OFFSET_BASIS, FNV_PRIME};
pub use lcg::{LcgStream, LCG_INCREMENT, LCG_MULTIPLIER};

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::coord::GeoPoint;

/// Default lower bound for the disclosed uncertainty radius, in meters.
pub const DEFAULT_DISCLOSURE_FLOOR_M: f64 = 120.0;

/// A displacement in polar form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarOffset {
    /// Distance from the true point, in meters.
    pub radius_m: f64,
    /// Bearing from north, clockwise, in radians within [0, 2π).
    pub angle_rad: f64,
}

impl PolarOffset {
    /// North component in meters.
    pub fn north_m(&self) -> f64 {
        self.radius_m * self.angle_rad.cos()
    }

    /// East component in meters.
    pub fn east_m(&self) -> f64 {
        self.radius_m * self.angle_rad.sin()
    }
}

/// A masked position plus the uncertainty radius to draw around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskedLocation {
    pub point: GeoPoint,
    pub privacy_radius_m: f64,
}

impl MaskedLocation {
    pub fn latitude(&self) -> f64 {
        self.point.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.point.longitude
    }
}

/// Masking parameters.
///
/// Cheap to copy; build one from configuration and share it freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Masker {
    bounds: RadiusBounds,
    disclosure_floor_m: f64,
}

impl Default for Masker {
    fn default() -> Self {
        Self::new(RadiusBounds::default())
    }
}

impl Masker {
    /// Create a masker with the default disclosure floor.
    pub fn new(bounds: RadiusBounds) -> Self {
        Self {
            bounds,
            disclosure_floor_m: DEFAULT_DISCLOSURE_FLOOR_M,
        }
    }

    /// Set the disclosure floor.
    ///
    /// Negative or non-finite values are replaced by zero (no floor).
    pub fn with_disclosure_floor(mut self, floor_m: f64) -> Self {
        self.disclosure_floor_m = if floor_m.is_finite() && floor_m >= 0.0 {
            floor_m
        } else {
            warn!(raw = %floor_m, "Invalid disclosure floor, disabling floor");
            0.0
        };
        self
    }

    pub fn bounds(&self) -> RadiusBounds {
        self.bounds
    }

    pub fn disclosure_floor_m(&self) -> f64 {
        self.disclosure_floor_m
    }

    /// Derive the offset for an identifier.
    pub fn offset(&self, id: &str) -> PolarOffset {
        let mut stream = LcgStream::from_seed(hash_to_unit_interval(id));
        let r1 = stream.next_unit();
        let r2 = stream.next_unit();

        PolarOffset {
            radius_m: self.bounds.lerp(r1),
            angle_rad: r2 * TAU,
        }
    }

    /// Mask a true point for the given identifier.
    ///
    /// Out-of-range or non-finite coordinates are corrected and logged first.
    pub fn mask(&self, id: &str, point: GeoPoint) -> MaskedLocation {
        let point = GeoPoint::sanitized(point.latitude, point.longitude);
        let offset = self.offset(id);
        trace!(
            radius_m = offset.radius_m,
            angle_rad = offset.angle_rad,
            "Computed mask offset"
        );

        MaskedLocation {
            point: point.offset_by_meters(offset.north_m(), offset.east_m()),
            privacy_radius_m: self.disclosure_radius(offset.radius_m),
        }
    }

    /// Radius of the uncertainty circle for an applied offset.
    ///
    /// Never smaller than the offset itself, so the true point always lies
    /// inside the circle. The floor is capped at the outer bound, keeping
    /// the result within `[max(floor, min), max]` whenever `max >= floor`.
    pub fn disclosure_radius(&self, radius_m: f64) -> f64 {
        radius_m.max(self.disclosure_floor_m.min(self.bounds.max_m()))
    }
}

/// Mask a location, correcting malformed input instead of failing.
///
/// `None` radius bounds use the defaults (100 m and 300 m).
pub fn mask_location(
    id: &str,
    true_latitude: f64,
    true_longitude: f64,
    min_radius_m: Option<f64>,
    max_radius_m: Option<f64>,
) -> MaskedLocation {
    let bounds = RadiusBounds::new(
        min_radius_m.unwrap_or(DEFAULT_MIN_RADIUS_M),
        max_radius_m.unwrap_or(DEFAULT_MAX_RADIUS_M),
    );
    let point = GeoPoint {
        latitude: true_latitude,
        longitude: true_longitude,
    };
    Masker::new(bounds).mask(id, point)
}

/// Mask a batch of entities with the same parameters.
pub fn mask_many<'a, I>(masker: &Masker, entities: I) -> Vec<(&'a str, MaskedLocation)>
where
    I: IntoIterator<Item = (&'a str, GeoPoint)>,
{
    entities
        .into_iter()
        .map(|(id, point)| (id, masker.mask(id, point)))
        .collect()
}
