//! Memoization of masked locations.
//!
//! Masking is cheap, but a marker layer re-renders every frame and may hold
//! thousands of entities. `MaskCache` keeps recent results keyed by
//! everything that influences the output, backed by `moka::sync::Cache`
//! for bounded, thread-safe storage.
//!
//! # Example
//!
//! ```
//! use geoveil::cache::MaskCache;
//! use geoveil::coord::GeoPoint;
//! use geoveil::mask::Masker;
//!
//! let cache = MaskCache::new(1_000);
//! let masker = Masker::default();
//! let paris = GeoPoint { latitude: 48.8566, longitude: 2.3522 };
//!
//! let first = cache.get_or_mask(&masker, "pet-42", paris);
//! let second = cache.get_or_mask(&masker, "pet-42", paris);
//! assert_eq!(first, second);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use crate::coord::GeoPoint;
use crate::mask::{MaskedLocation, Masker};

/// Default number of cached entries.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Everything a masked result depends on.
///
/// Floats are keyed by bit pattern, so two points are the same key only if
/// they are bit-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MaskKey {
    id: String,
    latitude: u64,
    longitude: u64,
    min_radius: u64,
    max_radius: u64,
    disclosure_floor: u64,
}

impl MaskKey {
    fn new(masker: &Masker, id: &str, point: &GeoPoint) -> Self {
        let bounds = masker.bounds();
        Self {
            id: id.to_string(),
            latitude: point.latitude.to_bits(),
            longitude: point.longitude.to_bits(),
            min_radius: bounds.min_m().to_bits(),
            max_radius: bounds.max_m().to_bits(),
            disclosure_floor: masker.disclosure_floor_m().to_bits(),
        }
    }
}

/// Hit/miss counters for a [`MaskCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Approximate; moka updates its entry count lazily.
    pub entries: u64,
}

impl CacheStats {
    /// Fraction of lookups served from cache, or 0 with no lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded, thread-safe memo of masked locations.
pub struct MaskCache {
    cache: Cache<MaskKey, MaskedLocation>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MaskCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MaskCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::new(capacity),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached mask for this entity, computing it on a miss.
    pub fn get_or_mask(&self, masker: &Masker, id: &str, point: GeoPoint) -> MaskedLocation {
        let key = MaskKey::new(masker, id, &point);

        if let Some(hit) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let masked = masker.mask(id, point);
        self.cache.insert(key, masked);
        masked
    }

    /// Drop every cached entry. Counters are kept.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::RadiusBounds;

    const PARIS: GeoPoint = GeoPoint {
        latitude: 48.8566,
        longitude: 2.3522,
    };

    #[test]
    fn test_miss_then_hit() {
        let cache = MaskCache::new(16);
        let masker = Masker::default();

        let a = cache.get_or_mask(&masker, "pet-1", PARIS);
        let b = cache.get_or_mask(&masker, "pet-1", PARIS);

        assert_eq!(a, b);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cached_value_matches_direct_mask() {
        let cache = MaskCache::default();
        let masker = Masker::default();
        assert_eq!(
            cache.get_or_mask(&masker, "pet-42", PARIS),
            masker.mask("pet-42", PARIS)
        );
    }

    #[test]
    fn test_parameters_are_part_of_key() {
        let cache = MaskCache::new(16);
        let narrow = Masker::new(RadiusBounds::new(10.0, 20.0));
        let wide = Masker::new(RadiusBounds::new(500.0, 900.0));

        let a = cache.get_or_mask(&narrow, "pet-1", PARIS);
        let b = cache.get_or_mask(&wide, "pet-1", PARIS);

        assert_ne!(a, b);
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_moved_entity_recomputed() {
        let cache = MaskCache::new(16);
        let masker = Masker::default();
        let moved = PARIS.offset_by_meters(10.0, 0.0);

        cache.get_or_mask(&masker, "pet-1", PARIS);
        let after = cache.get_or_mask(&masker, "pet-1", moved);

        assert_eq!(after, masker.mask("pet-1", moved));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let cache = MaskCache::new(16);
        let masker = Masker::default();

        cache.get_or_mask(&masker, "pet-1", PARIS);
        cache.clear();
        cache.get_or_mask(&masker, "pet-1", PARIS);

        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
