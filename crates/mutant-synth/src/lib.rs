//! Mutant Synth - a monophonic two-phasor voice
//!
//! One voice: two detunable 8-bit phasors, their difference through a
//! resonant low-pass, shaped by an amplitude envelope and a filter envelope.
//! The host drives it at two rates, once per audio sample and once per
//! control tick, and talks to it through note events and seven integer
//! parameters.
//!
//! # Core Components
//!
//! ## Voice
//!
//! - [`PhasorVoice`] - the voice itself
//! - [`MutatingSource`] - trait hosts program against
//! - [`Note`] - note event (pitch, velocity, length in ticks)
//! - [`VoiceConfig`] - sample/control rate, master gain, seed, diagnostics
//!
//! ```rust
//! use mutant_synth::{MutatingSource, Note, PhasorVoice, VoiceConfig};
//!
//! let config = VoiceConfig::default();
//! let mut voice = PhasorVoice::new(&config);
//! let mut clock = config.clock();
//!
//! voice.note_on(Note::new(45, 100, 128));
//! let mut block = vec![0i16; config.samples_per_tick() as usize * 64];
//! voice.render(&mut clock, &mut block);
//! ```
//!
//! ## Envelopes
//!
//! - [`ControlEnvelope`] - linear ADSR counted in control ticks
//! - [`EnvelopeState`] - stage tracking
//!
//! ## Parameters
//!
//! - [`ParamKey`] - slot identifiers with stable wire indices 0–6
//! - [`PhasorParams`] - named storage for the slots
//! - [`map_detune`] / [`map_filter_shape`] - control-code curves
//!
//! ## Host Helpers
//!
//! - [`ControlClock`] - tells a sample loop when to tick the control path
//! - [`LegacyNoteOn`] - note-on where pitch or velocity 0 means note-off
//! - [`VoiceStats`] / [`VoiceDiagnostics`] - write counters and signal meters
//!
//! # Features
//!
//! - `std` (default) - links the standard library
//! - `tracing` - logs accepted parameter writes at `debug` and dropped ones
//!   at `trace`; the audio path never logs
//!
//! # no_std Support
//!
//! ```toml
//! [dependencies]
//! mutant-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod envelope;
pub mod mapping;
pub mod params;
pub mod protocol;
pub mod source;
pub mod voice;

pub use clock::{ControlClock, samples_per_tick};
pub use config::{DEFAULT_CONTROL_RATE, DEFAULT_SAMPLE_RATE, VoiceConfig};
pub use diagnostics::{VoiceDiagnostics, VoiceStats};
pub use envelope::{ControlEnvelope, EnvelopeState, EnvelopeTimes};
pub use mapping::{
    DETUNE_CENTER, Detune, FilterShape, MAX_DETUNE, MAX_FILTER_ENV_ATTACK, MAX_FILTER_ENV_DECAY,
    MAX_FILTER_SHAPE, MIN_FILTER_ENV_DECAY, detune_line, map_detune, map_filter_shape,
};
pub use params::{
    MAX_FILTER_CUTOFF, MAX_FILTER_RESONANCE, MIN_FILTER_CUTOFF, PARAM_COUNT, ParamKey,
    PhasorParams,
};
pub use protocol::{LegacyNoteOn, NoteCommand};
pub use source::{MutatingSource, Note};
pub use voice::PhasorVoice;

// Re-export the parameter trait so hosts need only this crate.
pub use mutant_core::{ParamDescriptor, ParameterInfo};
