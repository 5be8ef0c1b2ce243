//! Radius bounds for the masking annulus.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GeoError;

/// Default inner radius of the masking annulus, in meters.
pub const DEFAULT_MIN_RADIUS_M: f64 = 100.0;

/// Default outer radius of the masking annulus, in meters.
pub const DEFAULT_MAX_RADIUS_M: f64 = 300.0;

/// Smallest radius the engine will ever apply.
///
/// Keeps a masked point from coinciding with the true point.
pub const MIN_OFFSET_M: f64 = 1.0;

/// Inner and outer radius of the ring a masked point is placed in.
///
/// Invariant: `MIN_OFFSET_M <= min_m <= max_m`, both finite.
/// Deserialized values pass through [`RadiusBounds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRadiusBounds")]
pub struct RadiusBounds {
    min_m: f64,
    max_m: f64,
}

#[derive(Deserialize)]
struct RawRadiusBounds {
    min_m: f64,
    max_m: f64,
}

impl From<RawRadiusBounds> for RadiusBounds {
    fn from(raw: RawRadiusBounds) -> Self {
        Self::new(raw.min_m, raw.max_m)
    }
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self {
            min_m: DEFAULT_MIN_RADIUS_M,
            max_m: DEFAULT_MAX_RADIUS_M,
        }
    }
}

impl RadiusBounds {
    /// Build bounds, correcting invalid values instead of failing.
    ///
    /// - Non-finite values fall back to the defaults.
    /// - Values at or below zero are raised to [`MIN_OFFSET_M`].
    /// - Inverted bounds are swapped; equal bounds give a fixed radius.
    pub fn new(min_m: f64, max_m: f64) -> Self {
        let min = sanitize_radius("min_radius_m", min_m, DEFAULT_MIN_RADIUS_M);
        let max = sanitize_radius("max_radius_m", max_m, DEFAULT_MAX_RADIUS_M);

        if min > max {
            warn!(min_m = %min, max_m = %max, "Radius bounds inverted, swapping");
            Self {
                min_m: max,
                max_m: min,
            }
        } else {
            Self {
                min_m: min,
                max_m: max,
            }
        }
    }

    /// Build bounds, rejecting anything [`RadiusBounds::new`] would correct.
    pub fn try_new(min_m: f64, max_m: f64) -> Result<Self, GeoError> {
        let valid = min_m.is_finite()
            && max_m.is_finite()
            && min_m >= MIN_OFFSET_M
            && min_m <= max_m;
        if !valid {
            return Err(GeoError::InvalidRadius {
                min: min_m,
                max: max_m,
            });
        }
        Ok(Self { min_m, max_m })
    }

    /// Inner radius in meters.
    pub fn min_m(&self) -> f64 {
        self.min_m
    }

    /// Outer radius in meters.
    pub fn max_m(&self) -> f64 {
        self.max_m
    }

    /// Interpolate between the bounds; `t` in [0, 1).
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        (self.min_m + t * (self.max_m - self.min_m)).min(self.max_m)
    }
}

fn sanitize_radius(field: &'static str, raw: f64, fallback: f64) -> f64 {
    if !raw.is_finite() {
        warn!(field, raw = %raw, clamped = %fallback, "Non-finite radius replaced");
        fallback
    } else if raw < MIN_OFFSET_M {
        warn!(field, raw = %raw, clamped = %MIN_OFFSET_M, "Radius below minimum raised");
        MIN_OFFSET_M
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let b = RadiusBounds::default();
        assert_eq!(b.min_m(), 100.0);
        assert_eq!(b.max_m(), 300.0);
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let b = RadiusBounds::new(300.0, 100.0);
        assert_eq!(b.min_m(), 100.0);
        assert_eq!(b.max_m(), 300.0);
    }

    #[test]
    fn test_equal_bounds_give_fixed_radius() {
        let b = RadiusBounds::new(150.0, 150.0);
        assert_eq!(b.lerp(0.0), 150.0);
        assert_eq!(b.lerp(0.99), 150.0);
    }

    #[test]
    fn test_non_positive_raised_to_minimum() {
        let b = RadiusBounds::new(0.0, -5.0);
        assert_eq!(b.min_m(), MIN_OFFSET_M);
        assert_eq!(b.max_m(), MIN_OFFSET_M);
    }

    #[test]
    fn test_non_finite_uses_defaults() {
        let b = RadiusBounds::new(f64::NAN, f64::INFINITY);
        assert_eq!(b, RadiusBounds::default());
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        assert!(RadiusBounds::try_new(300.0, 100.0).is_err());
        assert!(RadiusBounds::try_new(0.0, 100.0).is_err());
        assert!(RadiusBounds::try_new(f64::NAN, 100.0).is_err());
        assert!(RadiusBounds::try_new(100.0, 300.0).is_ok());
    }

    #[test]
    fn test_deserialize_corrects_zero_bounds() {
        let b: RadiusBounds = serde_json::from_str(r#"{"min_m":0.0,"max_m":0.0}"#).unwrap();
        assert_eq!(b.min_m(), MIN_OFFSET_M);
        assert_eq!(b.max_m(), MIN_OFFSET_M);
    }

    #[test]
    fn test_deserialize_swaps_inverted_bounds() {
        let b: RadiusBounds = serde_json::from_str(r#"{"min_m":300.0,"max_m":100.0}"#).unwrap();
        assert_eq!(b, RadiusBounds::default());

        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<RadiusBounds>(&json).unwrap(), b);
    }

    #[test]
    fn test_lerp_endpoints() {
        let b = RadiusBounds::new(100.0, 300.0);
        assert_eq!(b.lerp(0.0), 100.0);
        assert_eq!(b.lerp(0.5), 200.0);
    }
}
