//! 32-bit phase accumulator oscillator.
//!
//! A phasor is a ramp that wraps once per period. The accumulator is a `u32`
//! that overflows naturally, so one full cycle spans the whole integer range
//! and the top byte of the phase doubles as an 8-bit sawtooth.

/// Full-scale phase span (one cycle) as `f64`.
const PHASE_SPAN: f64 = 4_294_967_296.0;

/// Integer phase accumulator.
///
/// # Invariants
///
/// - `step` is `frequency / sample_rate` of a cycle, saturated to `u32::MAX`
/// - a frequency of 0 (or below) freezes the phase
///
/// # Example
///
/// ```rust
/// use mutant_core::Phasor;
///
/// let mut osc = Phasor::new(16384.0);
/// osc.set_frequency(256.0);
/// // 64 samples per cycle at this rate
/// assert_eq!(osc.next_sample(), 4);
/// assert_eq!(osc.next_sample(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Phasor {
    phase: u32,
    step: u32,
    sample_rate: f32,
    frequency: f32,
}

impl Default for Phasor {
    fn default() -> Self {
        Self::new(16384.0)
    }
}

impl Phasor {
    /// Create a stopped phasor at phase 0.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0,
            step: 0,
            sample_rate,
            frequency: 0.0,
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
        self.step = Self::step_for(self.frequency, self.sample_rate);
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set sample rate and recalculate the phase increment.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.step = Self::step_for(self.frequency, self.sample_rate);
    }

    /// Get current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Phase increment per sample.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Current raw phase.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Advance one sample and return the new raw phase.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        self.phase = self.phase.wrapping_add(self.step);
        self.phase
    }

    /// Advance one sample and return the top 8 bits as a signed byte.
    ///
    /// The unsigned ramp 0..=255 is reinterpreted as two's complement, so the
    /// output runs 0..=127 then jumps to -128..=-1.
    #[inline]
    pub fn next_sample(&mut self) -> i8 {
        (self.advance() >> 24) as u8 as i8
    }

    fn step_for(frequency: f32, sample_rate: f32) -> u32 {
        if sample_rate <= 0.0 {
            return 0;
        }
        let step = f64::from(frequency) / f64::from(sample_rate) * PHASE_SPAN;
        // float-to-int casts saturate
        step as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_matches_frequency() {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(1024.0);
        assert_eq!(osc.step(), 1 << 28);
    }

    #[test]
    fn test_wraps_once_per_period() {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(256.0);
        let mut wraps = 0;
        let mut prev = osc.phase();
        for _ in 0..64 * 4 {
            let p = osc.advance();
            if p < prev {
                wraps += 1;
            }
            prev = p;
        }
        assert_eq!(wraps, 4, "expected 4 cycles, got {}", wraps);
    }

    #[test]
    fn test_zero_frequency_freezes() {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(0.0);
        for _ in 0..100 {
            assert_eq!(osc.next_sample(), 0);
        }
    }

    #[test]
    fn test_negative_frequency_clamped() {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(-50.0);
        assert_eq!(osc.frequency(), 0.0);
        assert_eq!(osc.step(), 0);
    }

    #[test]
    fn test_step_saturates() {
        let mut osc = Phasor::new(1000.0);
        osc.set_frequency(5000.0);
        assert_eq!(osc.step(), u32::MAX);
    }

    #[test]
    fn test_signed_byte_covers_full_range() {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(64.0); // 256 samples per cycle, one byte step each
        let mut min = i8::MAX;
        let mut max = i8::MIN;
        for _ in 0..256 {
            let s = osc.next_sample();
            min = min.min(s);
            max = max.max(s);
        }
        assert_eq!(min, -128);
        assert_eq!(max, 127);
    }

    #[test]
    fn test_sample_rate_change_rescales_step() {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(1024.0);
        osc.set_sample_rate(32768.0);
        assert_eq!(osc.step(), 1 << 27);
    }
}
