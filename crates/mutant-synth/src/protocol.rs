//! Legacy note-on convention.
//!
//! Older hosts send a note-on with pitch 0 or velocity 0 to mean note-off.
//! The voice itself keeps the two events distinct; this adapter is where the
//! convention is translated.

use crate::source::{MutatingSource, Note};

/// What a legacy note-on actually asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteCommand {
    /// Start a note.
    On(Note),
    /// Release the current note.
    Off,
}

/// Note-on as received from a legacy host.
///
/// ```rust
/// use mutant_synth::{LegacyNoteOn, NoteCommand};
///
/// assert_eq!(LegacyNoteOn::new(60, 0, 100).command(), NoteCommand::Off);
/// assert_eq!(LegacyNoteOn::new(0, 90, 100).command(), NoteCommand::Off);
/// assert!(matches!(LegacyNoteOn::new(60, 90, 100).command(), NoteCommand::On(_)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacyNoteOn {
    /// MIDI pitch; 0 means note-off.
    pub pitch: u8,
    /// MIDI velocity; 0 means note-off.
    pub velocity: u8,
    /// Duration in control ticks.
    pub length: u32,
}

impl LegacyNoteOn {
    /// Wrap raw note-on fields.
    pub const fn new(pitch: u8, velocity: u8, length: u32) -> Self {
        Self {
            pitch,
            velocity,
            length,
        }
    }

    /// Translate into a note-on or a note-off.
    ///
    /// Pitch and velocity are clamped to 0–127 before the zero check.
    pub fn command(self) -> NoteCommand {
        let note = Note::new(self.pitch, self.velocity, self.length);
        if note.pitch == 0 || note.velocity == 0 {
            NoteCommand::Off
        } else {
            NoteCommand::On(note)
        }
    }

    /// Translate and deliver to `source`.
    pub fn dispatch<S: MutatingSource + ?Sized>(self, source: &mut S) -> NoteCommand {
        let command = self.command();
        match command {
            NoteCommand::On(note) => source.note_on(note),
            NoteCommand::Off => source.note_off(),
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::PhasorVoice;
    use crate::EnvelopeState;

    #[test]
    fn test_zero_velocity_releases_sounding_note() {
        let mut voice = PhasorVoice::default();
        LegacyNoteOn::new(60, 100, 200).dispatch(&mut voice);
        for _ in 0..10 {
            voice.update_control();
        }
        let cmd = LegacyNoteOn::new(60, 0, 200).dispatch(&mut voice);
        assert_eq!(cmd, NoteCommand::Off);
        assert_eq!(voice.amp_envelope().state(), EnvelopeState::Release);
    }

    #[test]
    fn test_normal_note_on_passes_through() {
        let mut voice = PhasorVoice::default();
        let cmd = LegacyNoteOn::new(72, 64, 50).dispatch(&mut voice);
        assert_eq!(cmd, NoteCommand::On(Note::new(72, 64, 50)));
        assert_eq!(voice.last_note(), 72);
        assert_eq!(voice.note_length(), 50);
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut voice = PhasorVoice::default();
        let source: &mut dyn MutatingSource = &mut voice;
        LegacyNoteOn::new(0, 0, 0).dispatch(source);
        assert_eq!(voice.amp_envelope().state(), EnvelopeState::Idle);
    }

    #[test]
    fn test_out_of_range_fields_clamp_instead_of_wrapping() {
        assert_eq!(
            LegacyNoteOn::new(128, 100, 10).command(),
            NoteCommand::On(Note::new(127, 100, 10))
        );
        assert_eq!(
            LegacyNoteOn::new(60, 128, 10).command(),
            NoteCommand::On(Note::new(60, 127, 10))
        );
        for (pitch, velocity) in [(128, 100), (60, 128), (255, 255), (200, 1)] {
            if let NoteCommand::On(note) = LegacyNoteOn::new(pitch, velocity, 10).command() {
                assert!(note.pitch > 0 && note.pitch <= 127);
                assert!(note.velocity > 0 && note.velocity <= 127);
            } else {
                panic!("non-zero fields ({pitch}, {velocity}) became a note-off");
            }
        }
    }
}
