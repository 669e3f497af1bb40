//! Control-rate ADSR envelope with linear segments.
//!
//! Times are counted in control ticks, not seconds: the envelope advances
//! exactly one step per [`ControlEnvelope::advance`] call. Levels are 8-bit
//! (0–255) and the running level is kept in 16.16 fixed point so slow
//! segments still move smoothly.
//!
//! Unlike a gate-held ADSR, the sustain stage has a duration. When it runs
//! out the envelope releases by itself, so a note with a known length can be
//! played without a matching note-off.

/// Envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Inactive, level 0.
    #[default]
    Idle,
    /// Ramping from the level at gate-on (0) to the attack level.
    Attack,
    /// Ramping from the attack level to the decay level.
    Decay,
    /// Holding the decay level for the sustain time.
    Sustain,
    /// Ramping to 0.
    Release,
}

const FRAC_BITS: u32 = 16;
const MAX_LEVEL_Q: i32 = 255 << FRAC_BITS;

/// Stage durations in control ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnvelopeTimes {
    /// Attack duration.
    pub attack: u32,
    /// Decay duration.
    pub decay: u32,
    /// Sustain hold duration.
    pub sustain: u32,
    /// Release duration.
    pub release: u32,
}

impl EnvelopeTimes {
    /// Bundle four durations.
    pub const fn new(attack: u32, decay: u32, sustain: u32, release: u32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

/// Linear ADSR envelope ticked at control rate.
///
/// # Example
///
/// ```rust
/// use mutant_synth::{ControlEnvelope, EnvelopeState};
///
/// let mut env = ControlEnvelope::new();
/// env.set_times(5, 60, 100, 100);
/// env.set_levels(255, 200);
/// env.gate_on();
/// assert_eq!(env.level(), 0);
///
/// for _ in 0..5 {
///     env.advance();
/// }
/// assert_eq!(env.level(), 255);
/// assert_eq!(env.state(), EnvelopeState::Decay);
/// ```
#[derive(Debug, Clone)]
pub struct ControlEnvelope {
    state: EnvelopeState,
    /// Running level, 16.16 fixed point
    level: i32,
    /// Per-tick increment for the active stage
    step: i32,
    /// Stage target, 16.16 fixed point
    target: i32,
    /// Ticks left in the active stage
    remaining: u32,
    times: EnvelopeTimes,
    attack_level: u8,
    decay_level: u8,
}

impl Default for ControlEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlEnvelope {
    /// Create an idle envelope with all times 0 and levels (255, 255).
    pub fn new() -> Self {
        Self {
            state: EnvelopeState::Idle,
            level: 0,
            step: 0,
            target: 0,
            remaining: 0,
            times: EnvelopeTimes::default(),
            attack_level: 255,
            decay_level: 255,
        }
    }

    /// Set all four stage durations in ticks.
    ///
    /// Takes effect at the next stage entry; the active stage keeps its slope.
    pub fn set_times(&mut self, attack: u32, decay: u32, sustain: u32, release: u32) {
        self.times = EnvelopeTimes::new(attack, decay, sustain, release);
    }

    /// Set the attack duration in ticks.
    pub fn set_attack_time(&mut self, ticks: u32) {
        self.times.attack = ticks;
    }

    /// Set the decay duration in ticks.
    pub fn set_decay_time(&mut self, ticks: u32) {
        self.times.decay = ticks;
    }

    /// Set the sustain hold duration in ticks.
    pub fn set_sustain_time(&mut self, ticks: u32) {
        self.times.sustain = ticks;
    }

    /// Set the release duration in ticks.
    pub fn set_release_time(&mut self, ticks: u32) {
        self.times.release = ticks;
    }

    /// Get the configured stage durations.
    pub fn times(&self) -> EnvelopeTimes {
        self.times
    }

    /// Set the attack (peak) level and the decay/sustain level.
    pub fn set_levels(&mut self, attack_level: u8, decay_level: u8) {
        self.attack_level = attack_level;
        self.decay_level = decay_level;
    }

    /// Get the attack (peak) level.
    pub fn attack_level(&self) -> u8 {
        self.attack_level
    }

    /// Get the decay/sustain level.
    pub fn decay_level(&self) -> u8 {
        self.decay_level
    }

    /// Restart from level 0 in the attack stage, whatever the current stage.
    pub fn gate_on(&mut self) {
        self.level = 0;
        self.enter(EnvelopeState::Attack);
    }

    /// Release toward 0 from the current level. No effect when idle.
    pub fn gate_off(&mut self) {
        if self.state != EnvelopeState::Idle {
            self.enter(EnvelopeState::Release);
        }
    }

    /// Advance one control tick and return the new level.
    ///
    /// A stage whose duration is 0 lands on its target and hands over to the
    /// next stage within the same tick.
    pub fn advance(&mut self) -> u8 {
        // Idle plus four timed stages bound the number of hand-overs per tick.
        for _ in 0..5 {
            if self.state == EnvelopeState::Idle {
                self.level = 0;
                break;
            }
            if self.remaining == 0 {
                self.finish_stage();
                continue;
            }
            self.level = (self.level + self.step).clamp(0, MAX_LEVEL_Q);
            self.remaining -= 1;
            if self.remaining == 0 {
                self.finish_stage();
            }
            break;
        }
        self.level()
    }

    /// Current level (0–255).
    #[inline]
    pub fn level(&self) -> u8 {
        (self.level >> FRAC_BITS).clamp(0, 255) as u8
    }

    /// Current stage.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Whether the envelope is in any stage other than idle.
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Ticks left in the active stage.
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining
    }

    /// Force idle at level 0.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0;
        self.step = 0;
        self.target = 0;
        self.remaining = 0;
    }

    fn finish_stage(&mut self) {
        self.level = self.target;
        let next = match self.state {
            EnvelopeState::Attack => EnvelopeState::Decay,
            EnvelopeState::Decay => EnvelopeState::Sustain,
            EnvelopeState::Sustain => EnvelopeState::Release,
            EnvelopeState::Release | EnvelopeState::Idle => EnvelopeState::Idle,
        };
        self.enter(next);
    }

    fn enter(&mut self, state: EnvelopeState) {
        self.state = state;
        let (target, ticks) = match state {
            EnvelopeState::Idle => {
                self.level = 0;
                self.step = 0;
                self.target = 0;
                self.remaining = 0;
                return;
            }
            EnvelopeState::Attack => (self.attack_level, self.times.attack),
            EnvelopeState::Decay => (self.decay_level, self.times.decay),
            EnvelopeState::Sustain => (self.decay_level, self.times.sustain),
            EnvelopeState::Release => (0, self.times.release),
        };
        self.target = i32::from(target) << FRAC_BITS;
        self.remaining = ticks;
        self.step = if ticks == 0 {
            0
        } else {
            // truncation toward zero never overshoots the target
            (self.target - self.level) / ticks.min(i32::MAX as u32) as i32
        };
    }
}
