//! Deterministic pseudo-random stream.
//!
//! A 32-bit linear congruential generator with the Numerical Recipes
//! constants. It carries no global state; two streams built from the same
//! seed yield identical sequences. Not suitable for anything security
//! related.

/// LCG multiplier.
pub const LCG_MULTIPLIER: u32 = 1_664_525;

/// LCG increment.
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// LCG modulus (2^32), as a float for normalization.
const LCG_MODULUS: f64 = 4_294_967_296.0;

/// An endless stream of uniform values in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcgStream {
    state: u32,
}

impl LcgStream {
    /// Start a stream from a raw 32-bit state.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Start a stream from a seed in [0, 1].
    ///
    /// The initial state is `floor(seed * 2^32) mod 2^32`. Seeds outside
    /// [0, 1] are reduced the same way; non-finite seeds start from zero.
    pub fn from_seed(seed: f64) -> Self {
        let scaled = (seed * LCG_MODULUS).floor();
        let state = if scaled.is_finite() {
            scaled.rem_euclid(LCG_MODULUS) as u64 as u32
        } else {
            0
        };
        Self { state }
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the generator and return the next value in [0, 1).
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / LCG_MODULUS
    }
}

impl Iterator for LcgStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
