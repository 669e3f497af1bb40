//! Construction-time settings for a voice.

use mutant_core::DEFAULT_SEED;

use crate::clock::{ControlClock, samples_per_tick};

/// Default audio rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f32 = 16384.0;

/// Default control rate in Hz.
pub const DEFAULT_CONTROL_RATE: f32 = 128.0;

/// Settings a voice is built from.
///
/// ```rust
/// use mutant_synth::VoiceConfig;
///
/// let config = VoiceConfig::new(32768.0)
///     .with_control_rate(256.0)
///     .with_master_gain(200)
///     .with_diagnostics(true);
/// assert_eq!(config.samples_per_tick(), 128);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    /// Audio rate in Hz.
    pub sample_rate: f32,
    /// Control rate in Hz.
    pub control_rate: f32,
    /// Initial master gain (255 = unity).
    pub master_gain: u8,
    /// Seed for the parameter randomizer.
    pub seed: u32,
    /// Whether the voice tracks signal ranges on the audio path.
    pub diagnostics: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl VoiceConfig {
    /// Default settings at the given audio rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            control_rate: DEFAULT_CONTROL_RATE,
            master_gain: 255,
            seed: DEFAULT_SEED,
            diagnostics: false,
        }
    }

    /// Set the control rate in Hz.
    pub fn with_control_rate(mut self, control_rate: f32) -> Self {
        self.control_rate = control_rate;
        self
    }

    /// Set the initial master gain.
    pub fn with_master_gain(mut self, gain: u8) -> Self {
        self.master_gain = gain;
        self
    }

    /// Set the randomizer seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable range tracking.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Whole audio samples per control tick.
    pub fn samples_per_tick(&self) -> u32 {
        samples_per_tick(self.sample_rate, self.control_rate)
    }

    /// Clock matching these rates.
    pub fn clock(&self) -> ControlClock {
        ControlClock::new(self.samples_per_tick())
    }

    /// Whether both rates are positive and finite with the control rate not
    /// above the audio rate.
    pub fn is_valid(&self) -> bool {
        self.sample_rate.is_finite()
            && self.control_rate.is_finite()
            && self.sample_rate > 0.0
            && self.control_rate > 0.0
            && self.control_rate <= self.sample_rate
    }
}
