//! Render session settings, loadable from TOML.
//!
//! ```toml
//! sample_rate = 16384
//! control_rate = 128
//! master_gain = 255
//! tail_ticks = 64
//!
//! [params]
//! filter_cutoff = 120
//! filter_resonance = 80
//! 0 = 530            # wire indices work too
//!
//! [[notes]]
//! at = 0
//! pitch = 45
//! velocity = 100
//! length = 96
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use mutant_core::DEFAULT_SEED;
use mutant_synth::{DEFAULT_CONTROL_RATE, DEFAULT_SAMPLE_RATE, ParamKey, VoiceConfig};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ticks rendered after the last note ends, by default.
pub const DEFAULT_TAIL_TICKS: u32 = 64;

/// Longest render accepted, in seconds of audio.
pub const MAX_RENDER_SECONDS: u32 = 600;

fn default_velocity() -> u8 {
    100
}

/// One scheduled note. Times are in control ticks from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Tick the note starts on.
    pub at: u32,
    /// MIDI pitch; 0 releases the current note instead.
    pub pitch: u8,
    /// MIDI velocity; 0 releases the current note instead.
    #[serde(default = "default_velocity")]
    pub velocity: u8,
    /// Length in ticks; a note-off is issued when it runs out.
    pub length: u32,
}

impl NoteEvent {
    /// Create a note event.
    pub fn new(at: u32, pitch: u8, velocity: u8, length: u32) -> Self {
        Self {
            at,
            pitch,
            velocity,
            length,
        }
    }

    /// Tick the automatic note-off falls on.
    pub fn end(&self) -> u32 {
        self.at.saturating_add(self.length)
    }
}

/// Settings for one offline render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Audio rate in Hz.
    pub sample_rate: u32,
    /// Control rate in Hz.
    pub control_rate: u32,
    /// Master gain (255 = unity).
    pub master_gain: u8,
    /// Seed for `mutate`.
    pub seed: u32,
    /// Randomize the patch before applying `params`.
    pub mutate: bool,
    /// Ticks rendered after the last note-off.
    pub tail_ticks: u32,
    /// Parameter values keyed by name (`filter_cutoff`) or wire index (`1`).
    pub params: BTreeMap<String, i32>,
    /// Notes to play.
    pub notes: Vec<NoteEvent>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE as u32,
            control_rate: DEFAULT_CONTROL_RATE as u32,
            master_gain: 255,
            seed: DEFAULT_SEED,
            mutate: false,
            tail_ticks: DEFAULT_TAIL_TICKS,
            params: BTreeMap::new(),
            notes: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// A config playing a single note at tick 0.
    pub fn single_note(pitch: u8, velocity: u8, length: u32) -> Self {
        Self {
            notes: vec![NoteEvent::new(0, pitch, velocity, length)],
            ..Self::default()
        }
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::write_file(parent, e))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| Error::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Set a parameter by name or wire index.
    pub fn set_param(&mut self, key: impl Into<String>, value: i32) {
        self.params.insert(key.into(), value);
    }

    /// Voice construction settings matching this session.
    pub fn voice_config(&self) -> VoiceConfig {
        VoiceConfig::new(self.sample_rate as f32)
            .with_control_rate(self.control_rate as f32)
            .with_master_gain(self.master_gain)
            .with_seed(self.seed)
    }

    /// Resolve `params` into keys, in wire-index order.
    pub fn resolved_params(&self) -> Result<Vec<(ParamKey, i32)>> {
        let mut resolved = self
            .params
            .iter()
            .map(|(name, &value)| {
                let key = resolve_param(name)?;
                if !key.descriptor().is_writable() {
                    return Err(Error::invalid(format!("parameter '{}' is read-only", key.name())));
                }
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;
        resolved.sort_by_key(|(key, _)| key.index());
        Ok(resolved)
    }

    /// Notes ordered by start tick (stable for equal ticks).
    pub fn sorted_notes(&self) -> Vec<NoteEvent> {
        let mut notes = self.notes.clone();
        notes.sort_by_key(|n| n.at);
        notes
    }

    /// Ticks from the start to the end of the tail.
    pub fn total_ticks(&self) -> u32 {
        let last = self.notes.iter().map(NoteEvent::end).max().unwrap_or(0);
        last.saturating_add(self.tail_ticks)
    }

    /// Audio samples from the start to the end of the tail.
    pub fn total_samples(&self) -> u64 {
        u64::from(self.total_ticks()) * u64::from(self.voice_config().samples_per_tick())
    }

    /// Check rates, render length, parameters and notes.
    pub fn validate(&self) -> Result<()> {
        if !self.voice_config().is_valid() {
            return Err(Error::invalid(format!(
                "sample_rate must be positive and control_rate between 1 and sample_rate, got {} / {}",
                self.sample_rate, self.control_rate
            )));
        }
        let max_samples = u64::from(self.sample_rate) * u64::from(MAX_RENDER_SECONDS);
        if self.total_samples() > max_samples {
            return Err(Error::invalid(format!(
                "render of {} ticks exceeds the {} s limit",
                self.total_ticks(),
                MAX_RENDER_SECONDS
            )));
        }
        self.resolved_params()?;
        if let Some(note) = self.notes.iter().find(|n| n.pitch > 127 || n.velocity > 127) {
            return Err(Error::invalid(format!(
                "note at tick {} has pitch {} / velocity {} (max 127)",
                note.at, note.pitch, note.velocity
            )));
        }
        Ok(())
    }
}

/// Resolve a parameter by snake_case name or decimal wire index.
pub fn resolve_param(name: &str) -> Result<ParamKey> {
    let key = match name.trim().parse::<usize>() {
        Ok(index) => ParamKey::from_index(index),
        Err(_) => ParamKey::from_name(name.trim()),
    };
    key.ok_or_else(|| Error::UnknownParameter(name.to_string()))
}
