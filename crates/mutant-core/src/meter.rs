//! Running min/max meter for integer signals.
//!
//! Used to check how much headroom a fixed-point stage actually uses. The
//! meter is owned by whatever stage it watches and read/reset explicitly;
//! there is no shared state.

/// Tracks minimum, maximum, sample count and clip count of a signal.
///
/// ```rust
/// use mutant_core::RangeMeter;
///
/// let mut meter = RangeMeter::new();
/// for v in [-3, 10, 4] {
///     meter.observe(v);
/// }
/// assert_eq!(meter.min(), Some(-3));
/// assert_eq!(meter.max(), Some(10));
/// assert_eq!(meter.peak(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeMeter {
    min: i32,
    max: i32,
    count: u64,
    clipped: u64,
}

impl RangeMeter {
    /// Create an empty meter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one value.
    #[inline]
    pub fn observe(&mut self, value: i32) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
    }

    /// Record one value and whether it had to be clipped downstream.
    #[inline]
    pub fn observe_clipped(&mut self, value: i32, clipped: bool) {
        self.observe(value);
        if clipped {
            self.clipped += 1;
        }
    }

    /// Smallest value seen, `None` before the first observation.
    pub fn min(&self) -> Option<i32> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest value seen, `None` before the first observation.
    pub fn max(&self) -> Option<i32> {
        (self.count > 0).then_some(self.max)
    }

    /// Largest magnitude seen (0 when empty).
    pub fn peak(&self) -> u32 {
        if self.count == 0 {
            0
        } else {
            self.min.unsigned_abs().max(self.max.unsigned_abs())
        }
    }

    /// Number of observations.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of observations flagged as clipped.
    pub fn clipped(&self) -> u64 {
        self.clipped
    }

    /// Whether nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
