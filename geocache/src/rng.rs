//! Deterministic pseudo-random values keyed by an integer seed.
//!
//! World generation never owns RNG state. Every decision (does this cell hold
//! a cache, how many coins does it start with) is a pure function of a seed
//! derived from the cell, so a cell visited today and again after a restart
//! yields exactly the same answer.
//!
//! The construction is a trigonometric hash: `|sin(seed) * K| mod 1`. It has
//! no cryptographic value, but `K` is large enough that adjacent seeds land
//! far apart in `[0, 1)`.

/// Multiplier applied to `sin(seed)` before taking the fractional part.
pub const HASH_MULTIPLIER: f64 = 10_000.0;

/// Map an integer seed to a reproducible value in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use geocache::rng::deterministic;
///
/// let a = deterministic(42);
/// assert_eq!(a, deterministic(42));
/// assert!((0.0..1.0).contains(&a));
/// ```
#[inline]
pub fn deterministic(seed: i64) -> f64 {
    let value = ((seed as f64).sin() * HASH_MULTIPLIER).abs() % 1.0;
    // `x % 1.0` is already < 1.0 for finite x; guard against a NaN sneaking
    // through from an enormous seed.
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
