//! Offline host: plays a [`RenderConfig`] timeline into a sample buffer.
//!
//! Notes are applied on control-tick boundaries, before that tick's control
//! update. Each note schedules its own note-off `length` ticks later; a newer
//! note cancels the pending note-off of the previous one, the way a
//! monophonic keyboard handles overlapping keys.

use mutant_synth::{
    ControlClock, LegacyNoteOn, MutatingSource, NoteCommand, ParamKey, PhasorVoice,
};

use crate::Result;
use crate::config::{NoteEvent, RenderConfig};

/// Drives a [`MutatingSource`] through a render timeline.
///
/// # Example
///
/// ```rust
/// use mutant_io::{OfflineHost, RenderConfig};
/// use mutant_synth::PhasorVoice;
///
/// let config = RenderConfig::single_note(45, 100, 32);
/// let mut host = OfflineHost::new(&config)?;
/// let mut voice = PhasorVoice::new(&config.voice_config());
/// let samples = host.run(&mut voice);
/// assert_eq!(samples.len(), host.total_samples());
/// # Ok::<(), mutant_io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct OfflineHost {
    clock: ControlClock,
    notes: Vec<NoteEvent>,
    params: Vec<(ParamKey, i32)>,
    mutate: bool,
    master_gain: u8,
    total_ticks: u32,
}

impl OfflineHost {
    /// Validate `config` and prepare a host for it.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clock: config.voice_config().clock(),
            notes: config.sorted_notes(),
            params: config.resolved_params()?,
            mutate: config.mutate,
            master_gain: config.master_gain,
            total_ticks: config.total_ticks(),
        })
    }

    /// Control ticks in the whole render.
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Audio samples per control tick.
    pub fn samples_per_tick(&self) -> usize {
        self.clock.samples_per_tick() as usize
    }

    /// Audio samples in the whole render.
    pub fn total_samples(&self) -> usize {
        self.total_ticks as usize * self.samples_per_tick()
    }

    /// Apply gain, optional mutation and explicit parameters to `source`.
    pub fn prepare<S: MutatingSource + ?Sized>(&self, source: &mut S) {
        source.set_gain(self.master_gain);
        if self.mutate {
            source.mutate();
        }
        for &(key, value) in &self.params {
            source.set_param(key.index(), value);
        }
    }

    /// Prepare `source` and render the whole timeline.
    pub fn run<S: MutatingSource + ?Sized>(&mut self, source: &mut S) -> Vec<i16> {
        self.prepare(source);
        self.clock.reset();

        let samples_per_tick = self.samples_per_tick();
        let mut output = vec![0i16; self.total_samples()];
        let mut next_note = 0;
        let mut pending_off: Option<u32> = None;

        tracing::info!(
            ticks = self.total_ticks,
            samples = output.len(),
            notes = self.notes.len(),
            "rendering"
        );

        for (tick, block) in output.chunks_mut(samples_per_tick).enumerate() {
            let tick = tick as u32;

            while let Some(note) = self.notes.get(next_note).copied().filter(|n| n.at <= tick) {
                next_note += 1;
                let command = LegacyNoteOn::new(note.pitch, note.velocity, note.length).dispatch(source);
                match command {
                    NoteCommand::On(_) => {
                        tracing::debug!(tick, pitch = note.pitch, length = note.length, "note on");
                        pending_off = Some(note.end());
                    }
                    NoteCommand::Off => {
                        tracing::debug!(tick, "note off (legacy)");
                        pending_off = None;
                    }
                }
            }

            if pending_off.is_some_and(|off| off <= tick) {
                tracing::debug!(tick, "note off");
                source.note_off();
                pending_off = None;
            }

            source.render(&mut self.clock, block);
        }

        tracing::info!(samples = output.len(), "render complete");
        output
    }
}

/// Render `config` with a fresh [`PhasorVoice`], returning the samples and
/// the voice for inspection.
pub fn render_phasor_voice(config: &RenderConfig, diagnostics: bool) -> Result<(Vec<i16>, PhasorVoice)> {
    let mut host = OfflineHost::new(config)?;
    let mut voice = PhasorVoice::new(&config.voice_config().with_diagnostics(diagnostics));
    let samples = host.run(&mut voice);
    Ok((samples, voice))
}
