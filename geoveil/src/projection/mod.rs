//! Geo-to-screen projection for custom marker overlays.
//!
//! Maps geographic points into a map viewport using a linear
//! (equirectangular) approximation around the viewport center. This is what
//! an overlay renderer needs on platforms whose native map view exposes no
//! pin layer: given the region the map currently shows, where on screen does
//! a marker go?
//!
//! ```text
//!  (0,0) ┌────────────────────┐
//!        │          N         │   x = (lng − center.lng) / lng_delta + 0.5
//!        │      W   +   E     │   y = (center.lat − lat) / lat_delta + 0.5
//!        │          S         │
//!        └────────────────────┘ (1,1)
//! ```
//!
//! The projector never clips: points outside the region yield fractions
//! outside [0, 1]. [`Projector`] adds culling and pixel clamping on top.

mod region;
mod viewport;

pub use region::{Region, MIN_SPAN_DEGREES};
pub use viewport::{PixelPoint, Viewport, DEFAULT_MARKER_INSET_PX};

use serde::{Deserialize, Serialize};

use crate::coord::GeoPoint;
use crate::mask::MaskedLocation;

/// Default culling margin, as a fraction of the viewport size.
pub const DEFAULT_CULL_MARGIN: f64 = 0.25;

/// Position relative to the viewport: (0,0) top-left, (1,1) bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenFraction {
    pub x: f64,
    pub y: f64,
}

impl ScreenFraction {
    /// Whether both components lie within `[-margin, 1 + margin]`.
    pub fn is_within(&self, margin: f64) -> bool {
        let range = -margin..=1.0 + margin;
        range.contains(&self.x) && range.contains(&self.y)
    }
}

/// Project a point into the region's screen space.
///
/// Malformed point coordinates are sanitized the same way as elsewhere in
/// the crate. [`Region`] keeps its spans non-zero, so the result is finite.
pub fn project_to_screen(
    region: &Region,
    point_latitude: f64,
    point_longitude: f64,
) -> ScreenFraction {
    let point = GeoPoint::sanitized(point_latitude, point_longitude);
    project_point(region, &point)
}

/// Project an already validated point.
#[inline]
pub fn project_point(region: &Region, point: &GeoPoint) -> ScreenFraction {
    ScreenFraction {
        x: (point.longitude - region.center().longitude) / region.longitude_delta() + 0.5,
        y: (region.center().latitude - point.latitude) / region.latitude_delta() + 0.5,
    }
}

/// A marker ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayMarker {
    /// Unclamped projected position.
    pub fraction: ScreenFraction,
    /// Pixel position after inset clamping.
    pub position: PixelPoint,
    /// True when clamping moved the marker onto the inset border.
    pub pinned_to_edge: bool,
    /// Radius of the uncertainty circle in pixels; zero for plain points.
    pub radius_px: f64,
}

/// Projects points for one region shown in one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    region: Region,
    viewport: Viewport,
    cull_margin: f64,
}

impl Projector {
    pub fn new(region: Region, viewport: Viewport) -> Self {
        Self {
            region,
            viewport,
            cull_margin: DEFAULT_CULL_MARGIN,
        }
    }

    /// Set how far outside the viewport (as a fraction) points are still placed.
    pub fn with_cull_margin(mut self, margin: f64) -> Self {
        self.cull_margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
        self
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Place a point, or `None` if it is far enough off-screen to cull.
    pub fn place(&self, point: &GeoPoint) -> Option<OverlayMarker> {
        let fraction = project_point(&self.region, point);
        if !fraction.is_within(self.cull_margin) {
            return None;
        }

        let raw = self.viewport.to_pixels(fraction);
        let position = self.viewport.clamp(raw);

        Some(OverlayMarker {
            fraction,
            position,
            pinned_to_edge: position != raw,
            radius_px: 0.0,
        })
    }

    /// Place a masked location along with its uncertainty circle.
    pub fn place_masked(&self, masked: &MaskedLocation) -> Option<OverlayMarker> {
        self.place(&masked.point).map(|marker| OverlayMarker {
            radius_px: self
                .region
                .meters_to_pixels(masked.privacy_radius_m, self.viewport.height_px),
            ..marker
        })
    }

    /// Place many points, dropping the culled ones.
    pub fn place_all<'a, I>(&self, points: I) -> Vec<OverlayMarker>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        points.into_iter().filter_map(|p| self.place(p)).collect()
    }
}
