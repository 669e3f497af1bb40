//! Xorshift32 pseudo-random generator.
//!
//! Small, allocation-free and deterministic for a given seed, which is all a
//! patch randomizer needs. Not suitable for anything security related.

/// Seed used when a caller passes 0 (xorshift never leaves the zero state).
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// Marsaglia xorshift32 generator.
///
/// ```rust
/// use mutant_core::Xorshift32;
///
/// let mut a = Xorshift32::new(7);
/// let mut b = Xorshift32::new(7);
/// assert_eq!(a.next_u32(), b.next_u32());
///
/// let v = a.range_inclusive(3, 239);
/// assert!((3..=239).contains(&v));
/// ```
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Xorshift32 {
    /// Create a generator. A zero seed is replaced by [`DEFAULT_SEED`].
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in `0..bound`. Returns 0 when `bound` is 0.
    ///
    /// Uses the multiply-shift reduction, so there is no modulo bias worth
    /// caring about for small bounds.
    #[inline]
    pub fn below(&mut self, bound: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }

    /// Uniform value in `[min, max]`. Arguments are swapped if reversed.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        if span > u64::from(u32::MAX) {
            return self.next_u32() as i32;
        }
        (i64::from(lo) + i64::from(self.below(span as u32))) as i32
    }

    /// Current internal state, for reproducing a sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}
