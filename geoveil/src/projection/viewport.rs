//! Pixel-space viewport handling.

use serde::{Deserialize, Serialize};

use super::ScreenFraction;

/// Default distance markers are kept from the viewport edge, in pixels.
pub const DEFAULT_MARKER_INSET_PX: f64 = 8.0;

/// A position in viewport pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// The on-screen area markers are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    /// Markers are clamped at least this far inside each edge.
    pub inset_px: f64,
}

impl Viewport {
    /// Create a viewport with the default marker inset.
    ///
    /// Negative or non-finite dimensions are treated as zero.
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px: non_negative(width_px),
            height_px: non_negative(height_px),
            inset_px: DEFAULT_MARKER_INSET_PX,
        }
    }

    /// Set the marker inset.
    pub fn with_inset(mut self, inset_px: f64) -> Self {
        self.inset_px = non_negative(inset_px);
        self
    }

    /// Scale a screen fraction to pixels. No clamping.
    #[inline]
    pub fn to_pixels(&self, fraction: ScreenFraction) -> PixelPoint {
        PixelPoint {
            x: fraction.x * self.width_px,
            y: fraction.y * self.height_px,
        }
    }

    /// Pull a pixel position inside the inset border.
    ///
    /// On an axis narrower than twice the inset the position snaps to the
    /// middle of that axis.
    pub fn clamp(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: clamp_axis(point.x, self.width_px, self.inset_px),
            y: clamp_axis(point.y, self.height_px, self.inset_px),
        }
    }
}

fn clamp_axis(value: f64, extent: f64, inset: f64) -> f64 {
    if extent < 2.0 * inset {
        extent / 2.0
    } else {
        value.clamp(inset, extent - inset)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_scales() {
        let vp = Viewport::new(400.0, 800.0);
        let p = vp.to_pixels(ScreenFraction { x: 0.5, y: 0.25 });
        assert_eq!(p, PixelPoint { x: 200.0, y: 200.0 });
    }

    #[test]
    fn test_clamp_keeps_inset() {
        let vp = Viewport::new(400.0, 800.0);
        let p = vp.clamp(PixelPoint { x: -50.0, y: 900.0 });
        assert_eq!(p, PixelPoint { x: 8.0, y: 792.0 });
    }

    #[test]
    fn test_clamp_leaves_interior_points() {
        let vp = Viewport::new(400.0, 800.0);
        let p = PixelPoint { x: 120.0, y: 300.0 };
        assert_eq!(vp.clamp(p), p);
    }

    #[test]
    fn test_clamp_tiny_viewport_centers() {
        let vp = Viewport::new(10.0, 400.0);
        let p = vp.clamp(PixelPoint { x: 0.0, y: 0.0 });
        assert_eq!(p.x, 5.0);
        assert_eq!(p.y, 8.0);
    }

    #[test]
    fn test_invalid_dimensions_zeroed() {
        let vp = Viewport::new(-1.0, f64::NAN).with_inset(-3.0);
        assert_eq!(vp.width_px, 0.0);
        assert_eq!(vp.height_px, 0.0);
        assert_eq!(vp.inset_px, 0.0);
    }
}
