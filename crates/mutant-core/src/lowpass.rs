//! Resonant two-pole low-pass filter in 8-bit fixed point.
//!
//! Two cascaded one-pole sections with feedback from the difference between
//! them, all coefficients expressed in 1/256 units:
//!
//! ```text
//! f    = cutoff
//! fb   = q + ((q * (256 - f)) >> 8)
//! buf0 += (((in - buf0) + ((fb * (buf0 - buf1)) >> 8)) * f) >> 8
//! buf1 += ((buf0 - buf1) * f) >> 8
//! out  = buf1
//! ```
//!
//! The feedback term grows as the cutoff falls, which keeps the resonance
//! peak roughly constant across the sweep. Above a cutoff of
//! [`MAX_STABLE_CUTOFF`] or a resonance of [`MAX_STABLE_RESONANCE`] the loop
//! can ring up without bound, so callers keep their controls below those
//! values and the history is saturated to 16 bits regardless.
//!
//! # Usage
//!
//! ```rust
//! use mutant_core::ResonantLowPass;
//!
//! let mut lpf = ResonantLowPass::new();
//! lpf.set_cutoff_and_resonance(100, 0);
//! let mut out = 0;
//! for _ in 0..200 {
//!     out = lpf.process(100);
//! }
//! assert!(out > 90 && out <= 100); // passes DC
//! ```

/// Exclusive upper bound for a cutoff that keeps the filter stable.
pub const MAX_STABLE_CUTOFF: u8 = 240;

/// Exclusive upper bound for a resonance that keeps the filter stable.
pub const MAX_STABLE_RESONANCE: u8 = 100;

const HISTORY_MIN: i32 = i16::MIN as i32;
const HISTORY_MAX: i32 = i16::MAX as i32;

/// Integer resonant low-pass.
///
/// # Invariants
///
/// - `buf0`/`buf1` stay inside the `i16` range
/// - `f` and `fb` only change through [`set_cutoff_and_resonance`](Self::set_cutoff_and_resonance)
#[derive(Debug, Clone)]
pub struct ResonantLowPass {
    buf0: i32,
    buf1: i32,
    f: i32,
    fb: i32,
    cutoff: u8,
    resonance: u8,
}

impl Default for ResonantLowPass {
    fn default() -> Self {
        Self::new()
    }
}

impl ResonantLowPass {
    /// Create a fully closed filter (cutoff 0, no resonance).
    pub fn new() -> Self {
        Self {
            buf0: 0,
            buf1: 0,
            f: 0,
            fb: 0,
            cutoff: 0,
            resonance: 0,
        }
    }

    /// Set cutoff and resonance, both in 1/256 units.
    pub fn set_cutoff_and_resonance(&mut self, cutoff: u8, resonance: u8) {
        self.cutoff = cutoff;
        self.resonance = resonance;
        self.f = i32::from(cutoff);
        let q = i32::from(resonance);
        self.fb = q + ((q * (256 - self.f)) >> 8);
    }

    /// Get current cutoff.
    pub fn cutoff(&self) -> u8 {
        self.cutoff
    }

    /// Get current resonance.
    pub fn resonance(&self) -> u8 {
        self.resonance
    }

    /// Feedback amount derived from the last coefficient update.
    pub fn feedback(&self) -> i32 {
        self.fb
    }

    /// Process one sample.
    ///
    /// Input is nominally 8-bit signed; the output has the same scale.
    #[inline]
    pub fn process(&mut self, input: i32) -> i32 {
        let resonant = (self.fb * (self.buf0 - self.buf1)) >> 8;
        let delta0 = (((input - self.buf0) + resonant) * self.f) >> 8;
        self.buf0 = (self.buf0 + delta0).clamp(HISTORY_MIN, HISTORY_MAX);
        let delta1 = ((self.buf0 - self.buf1) * self.f) >> 8;
        self.buf1 = (self.buf1 + delta1).clamp(HISTORY_MIN, HISTORY_MAX);
        self.buf1
    }

    /// Clear the filter history.
    pub fn reset(&mut self) {
        self.buf0 = 0;
        self.buf1 = 0;
    }
}
