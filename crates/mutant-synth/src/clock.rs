//! Audio-rate to control-rate divider.
//!
//! The voice has two entry points running at different cadences: one call per
//! output sample and one per control tick. [`ControlClock`] tells a host loop
//! when a control tick is due; the tick always lands *before* the sample it
//! shares a boundary with, so the first sample of a block already sees fresh
//! envelope values.

/// Counts audio samples and signals every `samples_per_tick`-th one.
///
/// ```rust
/// use mutant_synth::ControlClock;
///
/// let mut clock = ControlClock::new(4);
/// let ticks: Vec<bool> = (0..9).map(|_| clock.tick()).collect();
/// assert_eq!(
///     ticks,
///     [true, false, false, false, true, false, false, false, true]
/// );
/// assert_eq!(clock.ticks_elapsed(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ControlClock {
    samples_per_tick: u32,
    countdown: u32,
    ticks: u64,
}

impl Default for ControlClock {
    fn default() -> Self {
        Self::new(128)
    }
}

impl ControlClock {
    /// Create a clock firing every `samples_per_tick` samples (at least 1).
    pub fn new(samples_per_tick: u32) -> Self {
        Self {
            samples_per_tick: samples_per_tick.max(1),
            countdown: 0,
            ticks: 0,
        }
    }

    /// Create a clock from an audio rate and a control rate, both in Hz.
    ///
    /// The ratio is rounded to the nearest whole sample; a control rate at or
    /// above the audio rate ticks every sample.
    pub fn from_rates(sample_rate: f32, control_rate: f32) -> Self {
        Self::new(samples_per_tick(sample_rate, control_rate))
    }

    /// Advance one audio sample. Returns `true` when a control tick is due
    /// before this sample is produced.
    #[inline]
    pub fn tick(&mut self) -> bool {
        let due = self.countdown == 0;
        if due {
            self.countdown = self.samples_per_tick;
            self.ticks += 1;
        }
        self.countdown -= 1;
        due
    }

    /// Samples between control ticks.
    pub fn samples_per_tick(&self) -> u32 {
        self.samples_per_tick
    }

    /// Control ticks signalled so far.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }

    /// Samples left until the next tick fires (0 means the next call ticks).
    pub fn samples_until_tick(&self) -> u32 {
        self.countdown
    }

    /// Start over; the next call ticks.
    pub fn reset(&mut self) {
        self.countdown = 0;
        self.ticks = 0;
    }
}

/// Whole audio samples per control tick, rounded, at least 1.
pub fn samples_per_tick(sample_rate: f32, control_rate: f32) -> u32 {
    if control_rate <= 0.0 || sample_rate <= 0.0 {
        return 1;
    }
    ((sample_rate / control_rate + 0.5) as u32).max(1)
}
