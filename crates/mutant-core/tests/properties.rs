//! Property-based tests for mutant-core primitives.
//!
//! Filter stability inside the documented control range, phase accumulator
//! arithmetic, and bit-width conversions, using proptest for randomized input.

use proptest::prelude::*;
use mutant_core::{
    MAX_STABLE_CUTOFF, MAX_STABLE_RESONANCE, Phasor, RangeMeter, ResonantLowPass, Xorshift32,
    rescale_bits, saturate_i16,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Below the stability bounds the filter never comes near its saturation
    /// rails for full-scale 8-bit input.
    #[test]
    fn lowpass_stability(
        cutoff in 0u8..MAX_STABLE_CUTOFF,
        resonance in 0u8..MAX_STABLE_RESONANCE,
        input in prop::collection::vec(-128i32..=127, 64..512),
    ) {
        let mut lpf = ResonantLowPass::new();
        lpf.set_cutoff_and_resonance(cutoff, resonance);

        for &sample in &input {
            let out = lpf.process(sample);
            prop_assert!(
                out.abs() <= 4096,
                "cutoff={} resonance={} produced {} for input {}",
                cutoff, resonance, out, sample
            );
        }
    }

    /// Coefficient updates between samples (as the control path does) do not
    /// destabilize the filter either.
    #[test]
    fn lowpass_swept_stability(
        cutoffs in prop::collection::vec(3u8..MAX_STABLE_CUTOFF, 16..64),
        resonance in 0u8..MAX_STABLE_RESONANCE,
    ) {
        let mut lpf = ResonantLowPass::new();
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(110.0);
        for &cutoff in &cutoffs {
            lpf.set_cutoff_and_resonance(cutoff, resonance);
            for _ in 0..128 {
                let out = lpf.process(i32::from(osc.next_sample()));
                prop_assert!(out.abs() <= 4096, "cutoff={} resonance={} out={}", cutoff, resonance, out);
            }
        }
    }

    /// The accumulator is exactly `n * step` modulo 2^32.
    #[test]
    fn phasor_accumulates_exactly(freq in 0.0f32..8000.0f32, n in 1u32..5000) {
        let mut osc = Phasor::new(16384.0);
        osc.set_frequency(freq);
        let step = osc.step();
        let mut phase = 0;
        for _ in 0..n {
            phase = osc.advance();
        }
        prop_assert_eq!(phase, step.wrapping_mul(n));
    }

    /// A 9-bit oscillator difference always fits the 8-bit filter input.
    #[test]
    fn nine_bit_mix_fits_eight_bits(a in any::<i8>(), b in any::<i8>()) {
        let mixed = i32::from(a) - i32::from(b);
        let narrowed = rescale_bits(mixed, 9, 8);
        prop_assert!((-128..=127).contains(&narrowed), "{} - {} -> {}", a, b, narrowed);
    }

    /// Saturation is the identity inside the i16 range and clamps outside.
    #[test]
    fn saturate_matches_clamp(v in any::<i32>()) {
        let s = i32::from(saturate_i16(v));
        prop_assert_eq!(s, v.clamp(-32768, 32767));
    }

    /// Random draws never leave the requested interval.
    #[test]
    fn rng_range_inclusive(seed in any::<u32>(), lo in -5000i32..5000, width in 0i32..5000) {
        let mut rng = Xorshift32::new(seed);
        for _ in 0..32 {
            let v = rng.range_inclusive(lo, lo + width);
            prop_assert!(v >= lo && v <= lo + width);
        }
    }

    /// The meter's bounds enclose every observed value.
    #[test]
    fn meter_encloses_observations(values in prop::collection::vec(any::<i16>(), 1..256)) {
        let mut meter = RangeMeter::new();
        for &v in &values {
            meter.observe(i32::from(v));
        }
        let min = meter.min().unwrap();
        let max = meter.max().unwrap();
        for &v in &values {
            let v = i32::from(v);
            prop_assert!(min <= v && v <= max);
        }
        prop_assert_eq!(meter.count(), values.len() as u64);
    }
}
