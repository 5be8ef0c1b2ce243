//! Geographic coordinate primitives.
//!
//! Provides the [`GeoPoint`] type plus the small-angle conversions between
//! metric offsets and degree deltas used by the masking engine.

mod types;

pub use types::{wrap_longitude, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Meters per degree of latitude (small-angle approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Mean Earth radius in meters, used for great-circle distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Lower bound for cos(latitude) when scaling longitude offsets.
///
/// cos(latitude) approaches zero at the poles, which would make the
/// longitude delta of any metric offset unbounded.
pub const MIN_COS_LATITUDE: f64 = 1e-3;

impl GeoPoint {
    /// Haversine great-circle distance to `other`, in meters.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_M * c
    }

    /// Displace this point by a metric offset.
    ///
    /// Uses [`METERS_PER_DEGREE_LAT`] for the north component and scales the
    /// east component by cos(latitude), floored at [`MIN_COS_LATITUDE`].
    /// An offset that carries the latitude past a pole is reflected back
    /// onto the far meridian, and longitude is wrapped into [-180, 180].
    pub fn offset_by_meters(&self, north_m: f64, east_m: f64) -> GeoPoint {
        let (d_lat, d_lon) = meters_to_degrees(north_m, east_m, self.latitude);

        let mut latitude = self.latitude + d_lat;
        let mut longitude = self.longitude + d_lon;

        if latitude > MAX_LAT {
            latitude = 2.0 * MAX_LAT - latitude;
            longitude += 180.0;
        } else if latitude < MIN_LAT {
            latitude = 2.0 * MIN_LAT - latitude;
            longitude += 180.0;
        }

        GeoPoint {
            latitude,
            longitude: wrap_longitude(longitude),
        }
    }
}

/// Convert a metric offset at `reference_lat` into (Δlatitude, Δlongitude).
#[inline]
pub fn meters_to_degrees(north_m: f64, east_m: f64, reference_lat: f64) -> (f64, f64) {
    let cos_lat = reference_lat.to_radians().cos().max(MIN_COS_LATITUDE);
    let d_lat = north_m / METERS_PER_DEGREE_LAT;
    let d_lon = east_m / (METERS_PER_DEGREE_LAT * cos_lat);
    (d_lat, d_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: GeoPoint = GeoPoint {
        latitude: 48.8566,
        longitude: 2.3522,
    };

    #[test]
    fn test_distance_paris_to_london() {
        let london = GeoPoint {
            latitude: 51.5074,
            longitude: -0.1278,
        };
        let d = PARIS.distance_m(&london);
        // Roughly 344 km
        assert!((d - 344_000.0).abs() < 5_000.0, "got {}", d);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(PARIS.distance_m(&PARIS), 0.0);
    }

    #[test]
    fn test_meters_to_degrees_at_equator() {
        let (d_lat, d_lon) = meters_to_degrees(111_320.0, 111_320.0, 0.0);
        assert!((d_lat - 1.0).abs() < 1e-12);
        assert!((d_lon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_meters_to_degrees_scales_longitude_by_latitude() {
        let (_, d_lon) = meters_to_degrees(0.0, 111_320.0, 60.0);
        // cos(60°) = 0.5, so one equatorial degree of distance spans two degrees
        assert!((d_lon - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_meters_to_degrees_bounded_at_pole() {
        let (_, d_lon) = meters_to_degrees(0.0, 300.0, 90.0);
        assert!(d_lon.is_finite());
        assert!((d_lon - 300.0 / (METERS_PER_DEGREE_LAT * MIN_COS_LATITUDE)).abs() < 1e-9);
    }

    #[test]
    fn test_offset_north_matches_distance() {
        let moved = PARIS.offset_by_meters(200.0, 0.0);
        assert!(moved.latitude > PARIS.latitude);
        assert_eq!(moved.longitude, PARIS.longitude);
        let d = PARIS.distance_m(&moved);
        assert!((d - 200.0).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_offset_reflects_across_north_pole() {
        let pole = GeoPoint {
            latitude: 90.0,
            longitude: 0.0,
        };
        let moved = pole.offset_by_meters(150.0, 0.0);
        assert!(moved.latitude < 90.0);
        assert_eq!(moved.longitude, 180.0);
        assert!(pole.distance_m(&moved) > 0.0);
    }

    #[test]
    fn test_offset_reflects_across_south_pole() {
        let pole = GeoPoint {
            latitude: -89.9999,
            longitude: 10.0,
        };
        let moved = pole.offset_by_meters(-150.0, 0.0);
        assert!(moved.latitude >= MIN_LAT && moved.latitude <= MAX_LAT);
        assert!((moved.longitude - (-170.0)).abs() < 1e-9);
    }

    #[test]
    fn test_offset_wraps_antimeridian() {
        let p = GeoPoint {
            latitude: 0.0,
            longitude: 179.9999,
        };
        let moved = p.offset_by_meters(0.0, 300.0);
        assert!(moved.longitude < 0.0);
        assert!(moved.longitude >= MIN_LON);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_offset_stays_in_bounds(
                lat in -90.0..=90.0_f64,
                lon in -180.0..=180.0_f64,
                north in -500.0..500.0_f64,
                east in -500.0..500.0_f64,
            ) {
                let moved = GeoPoint { latitude: lat, longitude: lon }.offset_by_meters(north, east);
                prop_assert!((MIN_LAT..=MAX_LAT).contains(&moved.latitude));
                prop_assert!((MIN_LON..=MAX_LON).contains(&moved.longitude));
            }

            #[test]
            fn test_offset_distance_close_to_requested(
                lat in -70.0..70.0_f64,
                lon in -170.0..170.0_f64,
                north in -300.0..300.0_f64,
                east in -300.0..300.0_f64,
            ) {
                let origin = GeoPoint { latitude: lat, longitude: lon };
                let moved = origin.offset_by_meters(north, east);
                let requested = (north * north + east * east).sqrt();
                let actual = origin.distance_m(&moved);
                // 111 320 m/deg vs. the haversine mean radius differ by ~0.11%
                prop_assert!(
                    (actual - requested).abs() <= requested * 0.01 + 1e-6,
                    "requested {} got {}", requested, actual
                );
            }
        }
    }
}
