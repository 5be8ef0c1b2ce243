//! Geoveil - location privacy masking and map overlay projection
//!
//! This library hides the exact coordinates of pets and people on a map and
//! places their markers on screen:
//!
//! - [`mask`] derives a stable, per-entity offset from an identifier and
//!   moves the true point onto a ring 100–300 m away (configurable), with an
//!   uncertainty radius to draw around it.
//! - [`projection`] maps geographic points into a viewport for overlay
//!   renderers that cannot use native map pins.
//!
//! Both are pure functions with no shared state and are safe to call from
//! any thread. Malformed input is clamped and logged rather than rejected.
//!
//! The masking is a display nicety, not a security boundary: anyone who
//! knows an entity's identifier can recompute its offset.
//!
//! # Example
//!
//! ```
//! use geoveil::mask::mask_location;
//! use geoveil::projection::{project_to_screen, Region};
//!
//! let masked = mask_location("pet-42", 48.8566, 2.3522, None, None);
//! let region = Region::from_center(48.8566, 2.3522, 0.02, 0.02);
//! let on_screen = project_to_screen(&region, masked.latitude(), masked.longitude());
//! assert!(on_screen.is_within(0.0));
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod error;
pub mod logging;
pub mod mask;
pub mod projection;

pub use coord::GeoPoint;
pub use error::{GeoError, GeoResult};
pub use mask::{mask_location, MaskedLocation, Masker};
pub use projection::{project_to_screen, Region, ScreenFraction};
