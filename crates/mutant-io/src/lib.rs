//! Offline rendering and file I/O for mutant voices.
//!
//! This crate provides:
//!
//! - **Render configs**: [`RenderConfig`] describes a session (rates, gain,
//!   parameters, a note timeline) and loads from TOML
//! - **Offline host**: [`OfflineHost`] plays a config through any
//!   [`MutatingSource`](mutant_synth::MutatingSource)
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for 16-bit mono files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mutant_io::{RenderConfig, WavSpec, render_phasor_voice, write_wav};
//!
//! let mut config = RenderConfig::single_note(45, 100, 256);
//! config.set_param("filter_resonance", 80);
//!
//! let (samples, _voice) = render_phasor_voice(&config, false)?;
//! write_wav("voice.wav", &samples, WavSpec::mono_i16(config.sample_rate))?;
//! # Ok::<(), mutant_io::Error>(())
//! ```

mod config;
mod error;
mod host;
mod wav;

pub use config::{
    DEFAULT_TAIL_TICKS, MAX_RENDER_SECONDS, NoteEvent, RenderConfig, resolve_param,
};
pub use error::{Error, Result};
pub use host::{OfflineHost, render_phasor_voice};
pub use wav::{WavInfo, WavSpec, read_wav, read_wav_info, write_wav};
