//! Two-phasor monophonic voice.
//!
//! Signal path, per audio sample:
//!
//! ```text
//! phasor 1 ──► top byte ─┐
//!                        ├─ (osc1 - osc2) ─► >>1 ─► resonant LPF ─► × gain ─► i16
//! phasor 2 ──► top byte ─┘      9 bit        8 bit
//! ```
//!
//! Per control tick the amplitude envelope sets the gain and the filter
//! envelope sets the cutoff. Oscillator 2 runs at oscillator 1's pitch times
//! the detune ratio, or stops entirely in the detune deadzone.

use mutant_core::{
    ParamDescriptor, ParameterInfo, Phasor, ResonantLowPass, Xorshift32, midi_to_freq,
    rescale_bits, saturate_i16,
};

use crate::config::VoiceConfig;
use crate::diagnostics::{VoiceDiagnostics, VoiceStats};
use crate::envelope::ControlEnvelope;
use crate::mapping::{Detune, map_detune, map_filter_shape};
use crate::params::{MAX_FILTER_CUTOFF, PARAM_COUNT, ParamKey, PhasorParams};
use crate::source::{MutatingSource, Note};

/// Pitch the voice is tuned to before the first note.
pub const POWER_ON_NOTE: u8 = 30;

/// Amplitude envelope attack on note-on (ticks).
pub const AMP_ATTACK_TICKS: u32 = 5;
/// Amplitude envelope decay on note-on (ticks).
pub const AMP_DECAY_TICKS: u32 = 60;
/// Amplitude envelope peak level.
pub const AMP_ATTACK_LEVEL: u8 = 255;
/// Amplitude envelope sustain level.
pub const AMP_SUSTAIN_LEVEL: u8 = 200;
/// Filter envelope release on note-on (ticks).
pub const FILTER_RELEASE_TICKS: u32 = 50;

/// Bit width of the oscillator difference.
const MIX_BITS: u32 = 9;
/// Bit width the filter expects.
const FILTER_INPUT_BITS: u32 = 8;

/// Largest cutoff ever handed to the filter.
const LIVE_CUTOFF_MAX: u8 = (MAX_FILTER_CUTOFF - 1) as u8;

/// Monophonic two-oscillator voice with a resonant low-pass.
///
/// # Parameters
///
/// Seven integer slots addressed by [`ParamKey`] (or wire index through
/// [`ParameterInfo`]). Writes outside a slot's range, writes equal to the
/// stored value, and writes to the read-only sustain slot are dropped. The
/// detune code is clamped into range instead.
///
/// # Example
///
/// ```rust
/// use mutant_synth::{MutatingSource, Note, PhasorVoice, VoiceConfig};
///
/// let mut voice = PhasorVoice::new(&VoiceConfig::default());
/// voice.set_filter_cutoff(180);
/// voice.set_oscillator_detune(530);
/// voice.note_on(Note::new(48, 100, 256));
///
/// voice.update_control();
/// let sample = voice.update_audio();
/// # let _ = sample;
/// ```
#[derive(Debug, Clone)]
pub struct PhasorVoice {
    osc1: Phasor,
    osc2: Phasor,
    filter: ResonantLowPass,
    amp_env: ControlEnvelope,
    filter_env: ControlEnvelope,
    params: PhasorParams,
    detune: Detune,
    last_note: u8,
    note_length: u32,
    current_gain: u8,
    master_gain: u8,
    rng: Xorshift32,
    stats: VoiceStats,
    diagnostics: Option<VoiceDiagnostics>,
}

impl Default for PhasorVoice {
    fn default() -> Self {
        Self::new(&VoiceConfig::default())
    }
}

impl PhasorVoice {
    /// Create a silent voice tuned to [`POWER_ON_NOTE`].
    pub fn new(config: &VoiceConfig) -> Self {
        let params = PhasorParams::default();
        let power_on_freq = midi_to_freq(f32::from(POWER_ON_NOTE));

        let mut osc1 = Phasor::new(config.sample_rate);
        osc1.set_frequency(power_on_freq);
        let mut osc2 = Phasor::new(config.sample_rate);
        osc2.set_frequency(power_on_freq);

        // Fully open until the first control tick takes over.
        let mut filter = ResonantLowPass::new();
        filter.set_cutoff_and_resonance(255, 0);

        let mut amp_env = ControlEnvelope::new();
        amp_env.set_times(0, 50, 100, 100);
        amp_env.set_levels(255, 200);

        let mut filter_env = ControlEnvelope::new();
        filter_env.set_times(5, 60, 100, 20);
        filter_env.set_levels(255, 50);

        Self {
            osc1,
            osc2,
            filter,
            amp_env,
            filter_env,
            detune: map_detune(params.oscillator_detune),
            params,
            last_note: POWER_ON_NOTE,
            note_length: 0,
            current_gain: 0,
            master_gain: config.master_gain,
            rng: Xorshift32::new(config.seed),
            stats: VoiceStats::default(),
            diagnostics: config.diagnostics.then(VoiceDiagnostics::new),
        }
    }

    // -- parameter setters ------------------------------------------------

    /// Set the oscillator-2 detune code, clamped to 0–1000.
    ///
    /// Retunes oscillator 2 on the last note immediately.
    pub fn set_oscillator_detune(&mut self, code: i32) -> bool {
        let key = ParamKey::OscillatorDetune;
        if !self.store(key, key.descriptor().clamp(code)) {
            return false;
        }
        self.detune = map_detune(self.params.oscillator_detune);
        self.retune_oscillator2();
        true
    }

    /// Set the filter cutoff (3–239).
    pub fn set_filter_cutoff(&mut self, cutoff: i32) -> bool {
        if !self.store(ParamKey::FilterCutoff, cutoff) {
            return false;
        }
        self.filter
            .set_cutoff_and_resonance(cutoff as u8, self.params.filter_resonance as u8);
        self.push_filter_env_levels();
        true
    }

    /// Set the filter resonance (0–99).
    pub fn set_filter_resonance(&mut self, resonance: i32) -> bool {
        if !self.store(ParamKey::FilterResonance, resonance) {
            return false;
        }
        let live_cutoff = self.filter.cutoff().min(LIVE_CUTOFF_MAX);
        self.filter
            .set_cutoff_and_resonance(live_cutoff, resonance as u8);
        true
    }

    /// Set the filter-envelope attack time in ticks (0–4095).
    pub fn set_filter_attack(&mut self, ticks: i32) -> bool {
        if !self.store(ParamKey::FilterAttack, ticks) {
            return false;
        }
        self.filter_env.set_attack_time(ticks as u32);
        true
    }

    /// Set the filter-envelope decay time in ticks (0–4095).
    pub fn set_filter_decay(&mut self, ticks: i32) -> bool {
        if !self.store(ParamKey::FilterDecay, ticks) {
            return false;
        }
        self.filter_env.set_decay_time(ticks as u32);
        true
    }

    /// Set the filter-envelope shape (0–1022).
    ///
    /// Overwrites attack, decay and the sustain level with the values from
    /// [`map_filter_shape`].
    pub fn set_filter_shape(&mut self, code: i32) -> bool {
        if !self.store(ParamKey::FilterShape, code) {
            return false;
        }
        let shape = map_filter_shape(code);
        self.params.filter_attack = i32::from(shape.attack);
        self.params.filter_decay = i32::from(shape.decay);
        self.params.filter_sustain = i32::from(shape.sustain_level);
        self.filter_env.set_attack_time(u32::from(shape.attack));
        self.filter_env.set_decay_time(u32::from(shape.decay));
        self.push_filter_env_levels();
        true
    }

    /// Write a slot by key. Returns whether the value was accepted.
    pub fn set(&mut self, key: ParamKey, value: i32) -> bool {
        match key {
            ParamKey::OscillatorDetune => self.set_oscillator_detune(value),
            ParamKey::FilterCutoff => self.set_filter_cutoff(value),
            ParamKey::FilterResonance => self.set_filter_resonance(value),
            ParamKey::FilterAttack => self.set_filter_attack(value),
            ParamKey::FilterDecay => self.set_filter_decay(value),
            ParamKey::FilterShape => self.set_filter_shape(value),
            ParamKey::FilterSustain => {
                self.reject(key, value);
                false
            }
        }
    }

    /// Read a slot by key.
    pub fn get(&self, key: ParamKey) -> i32 {
        self.params.get(key)
    }

    // -- parameter getters ------------------------------------------------

    /// Get the oscillator-2 detune code.
    pub fn oscillator_detune(&self) -> i32 {
        self.params.oscillator_detune
    }

    /// Get the filter cutoff parameter.
    pub fn filter_cutoff(&self) -> i32 {
        self.params.filter_cutoff
    }

    /// Get the filter resonance parameter.
    pub fn filter_resonance(&self) -> i32 {
        self.params.filter_resonance
    }

    /// Get the filter-envelope attack time.
    pub fn filter_attack(&self) -> i32 {
        self.params.filter_attack
    }

    /// Get the filter-envelope decay time.
    pub fn filter_decay(&self) -> i32 {
        self.params.filter_decay
    }

    /// Get the filter-envelope shape code.
    pub fn filter_shape(&self) -> i32 {
        self.params.filter_shape
    }

    /// Get the filter-envelope sustain level.
    pub fn filter_sustain(&self) -> i32 {
        self.params.filter_sustain
    }

    /// All parameter values.
    pub fn params(&self) -> &PhasorParams {
        &self.params
    }

    // -- runtime state ----------------------------------------------------

    /// Current detune ratio and semitone offset.
    pub fn detune(&self) -> Detune {
        self.detune
    }

    /// Gain applied to the filter output (0–255), updated per control tick.
    pub fn current_gain(&self) -> u8 {
        self.current_gain
    }

    /// Master gain (255 = unity).
    pub fn master_gain(&self) -> u8 {
        self.master_gain
    }

    /// Pitch of the most recent note.
    pub fn last_note(&self) -> u8 {
        self.last_note
    }

    /// Length of the most recent note in ticks.
    pub fn note_length(&self) -> u32 {
        self.note_length
    }

    /// Oscillator frequencies in Hz.
    pub fn oscillator_frequencies(&self) -> (f32, f32) {
        (self.osc1.frequency(), self.osc2.frequency())
    }

    /// Amplitude envelope.
    pub fn amp_envelope(&self) -> &ControlEnvelope {
        &self.amp_env
    }

    /// Filter envelope.
    pub fn filter_envelope(&self) -> &ControlEnvelope {
        &self.filter_env
    }

    /// Filter with its live coefficients.
    pub fn filter(&self) -> &ResonantLowPass {
        &self.filter
    }

    /// Whether the amplitude envelope is running.
    pub fn is_active(&self) -> bool {
        self.amp_env.is_active()
    }

    /// Parameter write counters.
    pub fn stats(&self) -> VoiceStats {
        self.stats
    }

    /// Clear the parameter write counters.
    pub fn reset_stats(&mut self) {
        self.stats = VoiceStats::default();
    }

    /// Signal meters, `None` unless enabled in the config.
    pub fn diagnostics(&self) -> Option<&VoiceDiagnostics> {
        self.diagnostics.as_ref()
    }

    /// Clear the signal meters.
    pub fn reset_diagnostics(&mut self) {
        if let Some(diag) = self.diagnostics.as_mut() {
            diag.reset();
        }
    }

    // -- internals --------------------------------------------------------

    /// Validate and store; counts the outcome.
    fn store(&mut self, key: ParamKey, value: i32) -> bool {
        let desc = key.descriptor();
        if !desc.contains(value) {
            self.reject(key, value);
            return false;
        }
        if self.params.get(key) == value {
            self.stats.unchanged = self.stats.unchanged.saturating_add(1);
            return false;
        }
        *self.params.slot_mut(key) = value;
        self.stats.accepted = self.stats.accepted.saturating_add(1);
        #[cfg(feature = "tracing")]
        tracing::debug!(param = desc.string_id, value, "parameter set");
        true
    }

    fn reject(&mut self, key: ParamKey, value: i32) {
        self.stats.rejected = self.stats.rejected.saturating_add(1);
        #[cfg(feature = "tracing")]
        {
            let desc = key.descriptor();
            tracing::trace!(
                param = desc.string_id,
                value,
                min = desc.min,
                max = desc.max,
                writable = desc.is_writable(),
                "parameter write dropped"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = (key, value);
    }

    fn push_filter_env_levels(&mut self) {
        let cutoff = self.params.filter_cutoff;
        let sustain = self.params.filter_sustain.min(cutoff);
        self.filter_env.set_levels(cutoff as u8, sustain as u8);
    }

    fn retune_oscillator2(&mut self) {
        let note = f32::from(self.last_note) + f32::from(self.detune.semitones);
        self.osc2
            .set_frequency(midi_to_freq(note) * self.detune.ratio);
    }
}

impl ParameterInfo for PhasorVoice {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        ParamKey::from_index(index).map(ParamKey::descriptor)
    }

    fn get_param(&self, index: usize) -> i32 {
        ParamKey::from_index(index).map_or(0, |key| self.params.get(key))
    }

    fn set_param(&mut self, index: usize, value: i32) {
        if let Some(key) = ParamKey::from_index(index) {
            self.set(key, value);
        } else {
            self.stats.rejected = self.stats.rejected.saturating_add(1);
            #[cfg(feature = "tracing")]
            tracing::trace!(index, value, "unknown parameter index");
        }
    }
}

impl MutatingSource for PhasorVoice {
    fn note_on(&mut self, note: Note) {
        let length = note.length;

        self.amp_env
            .set_times(AMP_ATTACK_TICKS, AMP_DECAY_TICKS, length / 2, length / 2);
        self.amp_env.set_levels(AMP_ATTACK_LEVEL, AMP_SUSTAIN_LEVEL);
        self.amp_env.gate_on();

        self.push_filter_env_levels();
        self.filter_env.set_times(
            self.params.filter_attack as u32,
            self.params.filter_decay as u32,
            length,
            FILTER_RELEASE_TICKS,
        );
        self.filter_env.gate_on();

        self.last_note = note.pitch;
        self.note_length = length;
        self.detune = map_detune(self.params.oscillator_detune);
        self.osc1.set_frequency(midi_to_freq(f32::from(note.pitch)));
        self.retune_oscillator2();
    }

    fn note_off(&mut self) {
        self.amp_env.gate_off();
    }

    fn update_control(&mut self) {
        let amp = self.amp_env.advance();
        let cutoff = self.filter_env.advance().min(LIVE_CUTOFF_MAX);
        self.filter
            .set_cutoff_and_resonance(cutoff, self.params.filter_resonance as u8);

        self.current_gain = if self.master_gain < 255 {
            ((u16::from(amp) * u16::from(self.master_gain)) >> 8) as u8
        } else {
            amp
        };
    }

    #[inline]
    fn update_audio(&mut self) -> i16 {
        let mix = i32::from(self.osc1.next_sample()) - i32::from(self.osc2.next_sample());
        let filtered = self
            .filter
            .process(rescale_bits(mix, MIX_BITS, FILTER_INPUT_BITS));
        let gained = i32::from(self.current_gain) * filtered;
        let out = saturate_i16(gained);

        if let Some(diag) = self.diagnostics.as_mut() {
            diag.observe(mix, filtered, gained, i32::from(out) != gained);
        }
        out
    }

    fn set_gain(&mut self, gain: u8) {
        self.master_gain = gain;
    }

    fn mutate(&mut self) {
        for key in ParamKey::ALL {
            let desc = key.descriptor();
            if !desc.is_writable() {
                continue;
            }
            let value = self.rng.range_inclusive(desc.min, desc.max);
            self.set_param(key.index(), value);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(params = ?self.params, "patch mutated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnvelopeState;

    fn run_ticks(voice: &mut PhasorVoice, ticks: u32) {
        for _ in 0..ticks {
            voice.update_control();
        }
    }

    #[test]
    fn test_power_on_state() {
        let voice = PhasorVoice::default();
        assert_eq!(voice.last_note(), POWER_ON_NOTE);
        assert_eq!(voice.master_gain(), 255);
        assert_eq!(voice.current_gain(), 0);
        assert_eq!(voice.filter().cutoff(), 255);
        let (f1, f2) = voice.oscillator_frequencies();
        assert_eq!(f1, f2);
        assert!((f1 - 46.249).abs() < 0.01);
        assert!(!voice.is_active());
    }

    #[test]
    fn test_silent_before_first_note() {
        let mut voice = PhasorVoice::default();
        for _ in 0..10 {
            voice.update_control();
            for _ in 0..128 {
                assert_eq!(voice.update_audio(), 0);
            }
        }
    }

    #[test]
    fn test_note_on_tunes_oscillators() {
        let mut voice = PhasorVoice::default();
        voice.set_oscillator_detune(900);
        voice.note_on(Note::new(57, 100, 100));
        let (f1, f2) = voice.oscillator_frequencies();
        assert!((f1 - 220.0).abs() < 0.01);
        assert!((f2 - 440.0).abs() < 0.02);
    }

    #[test]
    fn test_deadzone_stops_oscillator2() {
        let mut voice = PhasorVoice::default();
        voice.note_on(Note::new(60, 100, 100));
        assert_eq!(voice.oscillator_frequencies().1, 0.0);
    }

    #[test]
    fn test_detune_retunes_last_note() {
        let mut voice = PhasorVoice::default();
        voice.note_on(Note::new(60, 100, 100));
        assert!(voice.set_oscillator_detune(100));
        let (f1, f2) = voice.oscillator_frequencies();
        assert!((f2 - f1 * 0.5).abs() < 0.01);
    }

    #[test]
    fn test_detune_clamps() {
        let mut voice = PhasorVoice::default();
        assert!(voice.set_oscillator_detune(5000));
        assert_eq!(voice.oscillator_detune(), 1000);
        assert!(voice.set_oscillator_detune(-3));
        assert_eq!(voice.oscillator_detune(), 0);
        assert!(!voice.set_oscillator_detune(-100));
        assert_eq!(voice.stats().unchanged, 1);
    }

    #[test]
    fn test_cutoff_rejects_out_of_range() {
        let mut voice = PhasorVoice::default();
        assert!(voice.set_filter_cutoff(100));
        assert!(!voice.set_filter_cutoff(240));
        assert!(!voice.set_filter_cutoff(2));
        assert_eq!(voice.filter_cutoff(), 100);
        assert_eq!(voice.stats().rejected, 2);
        assert_eq!(voice.stats().accepted, 1);
    }

    #[test]
    fn test_cutoff_pushes_coefficients() {
        let mut voice = PhasorVoice::default();
        voice.set_filter_resonance(50);
        voice.set_filter_cutoff(120);
        assert_eq!(voice.filter().cutoff(), 120);
        assert_eq!(voice.filter().resonance(), 50);
        assert_eq!(voice.filter_envelope().attack_level(), 120);
    }

    #[test]
    fn test_resonance_keeps_live_cutoff_stable() {
        let mut voice = PhasorVoice::default();
        // power-on cutoff is fully open; adding resonance must pull it in range
        voice.set_filter_resonance(99);
        assert!(voice.filter().cutoff() < 240);
        assert_eq!(voice.filter().resonance(), 99);
    }

    #[test]
    fn test_attack_and_decay_are_independent() {
        let mut voice = PhasorVoice::default();
        assert!(voice.set_filter_attack(30));
        assert_eq!(voice.filter_attack(), 30);
        assert_eq!(voice.filter_decay(), 40);
        assert!(voice.set_filter_decay(300));
        assert_eq!(voice.filter_attack(), 30);
        assert_eq!(voice.filter_decay(), 300);
        assert_eq!(voice.filter_envelope().times().attack, 30);
        assert_eq!(voice.filter_envelope().times().decay, 300);
        assert!(!voice.set_filter_attack(4096));
        assert!(!voice.set_filter_decay(-1));
    }

    #[test]
    fn test_shape_derives_envelope() {
        let mut voice = PhasorVoice::default();
        voice.set_filter_cutoff(200);
        assert!(voice.set_filter_shape(900));
        assert_eq!(voice.filter_attack(), 600);
        assert_eq!(voice.filter_decay(), 940);
        assert_eq!(voice.filter_sustain(), 255 + (768 - 900) / 2);
        assert_eq!(voice.filter_envelope().decay_level(), 189);
        assert!(!voice.set_filter_shape(1023));
    }

    #[test]
    fn test_filter_sustain_never_exceeds_cutoff() {
        let mut voice = PhasorVoice::default();
        voice.set_filter_shape(600); // sustain 255
        voice.set_filter_cutoff(90);
        assert_eq!(voice.filter_envelope().decay_level(), 90);
    }

    #[test]
    fn test_sustain_slot_read_only() {
        let mut voice = PhasorVoice::default();
        let before = voice.get_param(6);
        voice.set_param(6, 99);
        assert_eq!(voice.get_param(6), before);
        assert_eq!(voice.stats().rejected, 1);
    }

    #[test]
    fn test_index_dispatch_one_setter_each() {
        let mut voice = PhasorVoice::default();
        voice.set_param(3, 17);
        assert_eq!(voice.filter_attack(), 17);
        assert_eq!(voice.filter_decay(), 40);
        voice.set_param(4, 23);
        assert_eq!(voice.filter_attack(), 17);
        assert_eq!(voice.filter_decay(), 23);
        voice.set_param(1, 150);
        assert_eq!(voice.filter_cutoff(), 150);
        assert_eq!(voice.filter_resonance(), 0);
        voice.set_param(0, 700);
        assert_eq!(voice.get_param(0), 700);
    }

    #[test]
    fn test_unknown_index() {
        let mut voice = PhasorVoice::default();
        voice.set_param(7, 1);
        voice.set_param(usize::MAX, 1);
        assert_eq!(voice.get_param(7), 0);
        assert_eq!(voice.stats().rejected, 2);
        assert!(voice.params().is_valid());
    }

    #[test]
    fn test_gain_scaling() {
        let mut voice = PhasorVoice::default();
        voice.note_on(Note::new(60, 100, 200));
        run_ticks(&mut voice, 5);
        assert_eq!(voice.current_gain(), 255);
        voice.set_gain(128);
        voice.note_on(Note::new(60, 100, 200));
        run_ticks(&mut voice, 5);
        assert_eq!(voice.current_gain(), 127);
        voice.set_gain(0);
        voice.update_control();
        assert_eq!(voice.current_gain(), 0);
    }

    #[test]
    fn test_note_off_releases_amp_only() {
        let mut voice = PhasorVoice::default();
        voice.note_on(Note::new(60, 100, 400));
        run_ticks(&mut voice, 20);
        voice.note_off();
        assert_eq!(voice.amp_envelope().state(), EnvelopeState::Release);
        assert_ne!(voice.filter_envelope().state(), EnvelopeState::Release);
        assert_eq!(voice.last_note(), 60);
    }

    #[test]
    fn test_live_cutoff_follows_filter_envelope() {
        let mut voice = PhasorVoice::default();
        voice.set_filter_cutoff(160);
        voice.set_filter_attack(4);
        voice.note_on(Note::new(60, 100, 200));
        run_ticks(&mut voice, 4);
        assert_eq!(voice.filter().cutoff(), 160);
    }

    #[test]
    fn test_mutate_stays_in_range() {
        let mut voice = PhasorVoice::new(&VoiceConfig::default().with_seed(42));
        for _ in 0..200 {
            voice.mutate();
            assert!(voice.params().is_valid(), "{:?}", voice.params());
        }
        assert_eq!(voice.stats().rejected, 0);
    }

    #[test]
    fn test_mutate_is_seeded() {
        let config = VoiceConfig::default().with_seed(7);
        let mut a = PhasorVoice::new(&config);
        let mut b = PhasorVoice::new(&config);
        a.mutate();
        b.mutate();
        assert_eq!(a.params(), b.params());
    }

    #[test]
    fn test_diagnostics_track_ranges() {
        let mut voice = PhasorVoice::new(&VoiceConfig::default().with_diagnostics(true));
        voice.note_on(Note::new(48, 100, 300));
        for _ in 0..50 {
            voice.update_control();
            for _ in 0..128 {
                voice.update_audio();
            }
        }
        let diag = voice.diagnostics().unwrap();
        assert_eq!(diag.mix().count(), 50 * 128);
        let mix_min = diag.mix().min().unwrap();
        let mix_max = diag.mix().max().unwrap();
        assert!(mix_min >= -256 && mix_max <= 255, "mix {}..{}", mix_min, mix_max);
        voice.reset_diagnostics();
        assert!(voice.diagnostics().unwrap().mix().is_empty());
    }

    #[test]
    fn test_diagnostics_off_by_default() {
        let voice = PhasorVoice::default();
        assert!(voice.diagnostics().is_none());
    }
}
