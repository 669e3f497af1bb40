//! Property-based tests for mutant-synth.
//!
//! Mapping curves, parameter-table invariants, and envelope bounds, using
//! proptest for randomized input.

use proptest::prelude::*;
use mutant_synth::{
    ControlEnvelope, MutatingSource, Note, ParamKey, ParameterInfo, PhasorVoice, VoiceConfig,
    detune_line, map_detune, map_filter_shape,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The deadzone is exactly zero for every code in 485..515.
    #[test]
    fn detune_deadzone_is_zero(code in 485i32..515) {
        prop_assert_eq!(map_detune(code).ratio, 0.0);
    }

    /// Inside both interpolation bands consecutive codes are 1/3000 apart.
    #[test]
    fn detune_fine_bands_are_smooth(code in prop_oneof![400i32..484, 515i32..599]) {
        let a = map_detune(code).ratio;
        let b = map_detune(code + 1).ratio;
        prop_assert!(
            ((b - a) - 1.0 / 3000.0).abs() < 1e-6,
            "code {}: {} -> {}", code, a, b
        );
        prop_assert_eq!(a, detune_line(code));
    }

    /// Any input code maps to a ratio from the table.
    #[test]
    fn detune_clamps_any_input(code in any::<i32>()) {
        let d = map_detune(code);
        prop_assert!(d.ratio == 0.0 || (0.5..=2.996614).contains(&d.ratio));
        prop_assert_eq!(d.semitones, 0);
    }

    /// Every shape code yields decay >= 40 and a sustain in 0..=255.
    #[test]
    fn shape_outputs_in_range(code in 0i32..1023) {
        let s = map_filter_shape(code);
        prop_assert!(s.decay >= 40);
        prop_assert!(s.decay < 4096);
        prop_assert!(s.attack < 4096);
        prop_assert!(s.sustain_level >= 128 || code < 512);
    }

    /// Writing the same value twice leaves the same state as writing it once,
    /// and no write ever pushes a slot out of range.
    #[test]
    fn set_param_idempotent(index in 0usize..9, value in -2000i32..6000) {
        let mut once = PhasorVoice::default();
        let mut twice = PhasorVoice::default();
        once.set_param(index, value);
        twice.set_param(index, value);
        twice.set_param(index, value);
        prop_assert_eq!(once.params(), twice.params());
        prop_assert!(twice.params().is_valid());
    }

    /// Random write sequences never leave the legal ranges.
    #[test]
    fn random_writes_stay_in_range(
        writes in prop::collection::vec((0usize..7, any::<i16>()), 1..64),
    ) {
        let mut voice = PhasorVoice::default();
        for (index, value) in writes {
            voice.set_param(index, i32::from(value));
            for key in ParamKey::ALL {
                let desc = key.descriptor();
                prop_assert!(desc.contains(voice.get(key)), "{} = {}", key.name(), voice.get(key));
            }
        }
    }

    /// mutate() keeps every slot in range for any seed.
    #[test]
    fn mutate_stays_in_range(seed in any::<u32>(), rounds in 1usize..20) {
        let mut voice = PhasorVoice::new(&VoiceConfig::default().with_seed(seed));
        for _ in 0..rounds {
            voice.mutate();
            for i in 0..voice.param_count() {
                let desc = voice.param_info(i).unwrap();
                prop_assert!(desc.contains(voice.get_param(i)));
            }
        }
    }

    /// Envelope levels stay in 0..=255 and a released envelope reaches 0
    /// within its release time.
    #[test]
    fn envelope_bounded(
        attack in 0u32..300,
        decay in 0u32..300,
        sustain in 0u32..300,
        release in 0u32..300,
        attack_level in any::<u8>(),
        decay_level in any::<u8>(),
        off_at in 0u32..600,
    ) {
        let mut env = ControlEnvelope::new();
        env.set_times(attack, decay, sustain, release);
        env.set_levels(attack_level, decay_level);
        env.gate_on();
        prop_assert_eq!(env.level(), 0);
        for _ in 0..off_at {
            env.advance();
        }
        env.gate_off();
        for _ in 0..release.max(1) {
            env.advance();
        }
        prop_assert_eq!(env.level(), 0);
        prop_assert!(!env.is_active());
    }

    /// Any note through the full audio path never panics and obeys the
    /// master gain of 0.
    #[test]
    fn silent_at_zero_master_gain(pitch in 0u8..128, length in 0u32..500, detune in 0i32..=1000) {
        let mut voice = PhasorVoice::new(&VoiceConfig::default().with_master_gain(0));
        voice.set_oscillator_detune(detune);
        voice.note_on(Note::new(pitch, 100, length));
        let mut clock = VoiceConfig::default().clock();
        let mut block = vec![0i16; 128 * 20];
        voice.render(&mut clock, &mut block);
        prop_assert!(block.iter().all(|&s| s == 0));
    }
}
