//! Identifier hashing.
//!
//! Folds an entity identifier into a 32-bit FNV-1a hash and normalizes it
//! to the unit interval. The hash walks UTF-16 code units so that an
//! identifier masks to the same place regardless of which client computed it.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Hash an identifier with 32-bit FNV-1a over its UTF-16 code units.
///
/// The empty string hashes to [`FNV_OFFSET_BASIS`].
#[inline]
pub fn fnv1a_32(id: &str) -> u32 {
    id.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Hash an identifier and scale the result into [0, 1].
///
/// The hash is divided by `u32::MAX`, so only an identifier hashing to
/// exactly `u32::MAX` reaches 1.0.
#[inline]
pub fn hash_to_unit_interval(id: &str) -> f64 {
    f64::from(fnv1a_32(id)) / f64::from(u32::MAX)
}
