//! Sound-source capability trait.
//!
//! A [`MutatingSource`] is anything a host can play notes on, tick at two
//! rates, and randomize. Parameter access comes from the
//! [`ParameterInfo`] supertrait, so any source can be driven by the same
//! index-based controller code.

use mutant_core::ParameterInfo;

use crate::clock::ControlClock;

/// A note event.
///
/// `length` is in control ticks and shapes the envelopes; it does not
/// schedule a note-off by itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Note {
    /// MIDI pitch (0–127).
    pub pitch: u8,
    /// MIDI velocity (0–127).
    pub velocity: u8,
    /// Duration in control ticks.
    pub length: u32,
}

impl Note {
    /// Highest MIDI pitch or velocity.
    pub const MAX_MIDI: u8 = 127;

    /// Create a note, clamping pitch and velocity to 0–127.
    pub const fn new(pitch: u8, velocity: u8, length: u32) -> Self {
        Self {
            pitch: clamp_midi(pitch),
            velocity: clamp_midi(velocity),
            length,
        }
    }
}

const fn clamp_midi(value: u8) -> u8 {
    if value > Note::MAX_MIDI {
        Note::MAX_MIDI
    } else {
        value
    }
}

/// Monophonic source with audio-rate and control-rate entry points.
///
/// Nothing here may panic or allocate: invalid input is clamped or dropped.
///
/// # Call order
///
/// Hosts call [`update_control`](Self::update_control) once per control tick
/// and [`update_audio`](Self::update_audio) once per output sample, with the
/// control tick first when both fall on the same sample.
/// [`render`](Self::render) does exactly that against a [`ControlClock`].
///
/// # Example
///
/// ```rust
/// use mutant_synth::{ControlClock, MutatingSource, Note, PhasorVoice};
///
/// let mut voice = PhasorVoice::default();
/// let mut clock = ControlClock::new(128);
/// voice.note_on(Note::new(60, 100, 200));
///
/// let mut block = [0i16; 1024];
/// voice.render(&mut clock, &mut block);
/// assert!(block.iter().any(|&s| s != 0));
/// ```
pub trait MutatingSource: ParameterInfo {
    /// Start a note, restarting both envelopes.
    fn note_on(&mut self, note: Note);

    /// Release the current note.
    fn note_off(&mut self);

    /// Advance envelopes and re-derive control-rate state.
    fn update_control(&mut self);

    /// Produce the next output sample.
    fn update_audio(&mut self) -> i16;

    /// Set the master gain (255 = unity).
    fn set_gain(&mut self, gain: u8);

    /// Randomize every writable parameter within its legal range.
    fn mutate(&mut self);

    /// Fill `output`, ticking the control path whenever `clock` says so.
    fn render(&mut self, clock: &mut ControlClock, output: &mut [i16]) {
        for sample in output.iter_mut() {
            if clock.tick() {
                self.update_control();
            }
            *sample = self.update_audio();
        }
    }
}
