//! Offline render command.

use super::common::parse_key_val;
use clap::Args;
use mutant_io::{RenderConfig, WavSpec, render_phasor_voice, write_wav};
use mutant_synth::{ParamKey, ParameterInfo, PhasorVoice};
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Render session file (TOML); its notes replace --note/--velocity/--length
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MIDI note to play
    #[arg(short, long, default_value = "45")]
    note: u8,

    /// MIDI velocity (0 plays nothing, the note is treated as a note-off)
    #[arg(long, default_value = "100")]
    velocity: u8,

    /// Note length in control ticks
    #[arg(short, long, default_value = "256")]
    length: u32,

    /// Ticks rendered after the last note ends
    #[arg(long)]
    tail: Option<u32>,

    /// Parameter override by name or index (e.g. filter_cutoff=120, 2=80)
    #[arg(short, long = "param", value_parser = parse_key_val)]
    params: Vec<(String, i32)>,

    /// Randomize the patch before applying --param overrides
    #[arg(short, long)]
    mutate: bool,

    /// Seed for --mutate
    #[arg(long)]
    seed: Option<u32>,

    /// Master gain (255 = unity)
    #[arg(short, long)]
    gain: Option<u8>,

    /// Audio sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Control rate in Hz
    #[arg(long)]
    control_rate: Option<u32>,

    /// Also write the effective session to this TOML file
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
}

impl RenderArgs {
    /// Session described by the file (if any) with command-line overrides applied.
    fn session(&self) -> anyhow::Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::single_note(self.note, self.velocity, self.length),
        };

        if let Some(tail) = self.tail {
            config.tail_ticks = tail;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(gain) = self.gain {
            config.master_gain = gain;
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(rate) = self.control_rate {
            config.control_rate = rate;
        }
        config.mutate |= self.mutate;
        for (key, value) in &self.params {
            config.set_param(key.clone(), *value);
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = args.session()?;

    if let Some(path) = &args.save_config {
        config.save(path)?;
        tracing::info!(path = %path.display(), "saved session");
    }

    let (samples, voice) = render_phasor_voice(&config, true)?;
    write_wav(&args.output, &samples, WavSpec::mono_i16(config.sample_rate))?;

    let seconds = samples.len() as f64 / f64::from(config.sample_rate);
    println!(
        "Rendered {} samples ({:.2}s, {} ticks) to {}",
        samples.len(),
        seconds,
        config.total_ticks(),
        args.output.display()
    );
    println!();
    print_patch(&voice);
    println!();
    print_levels(&voice);

    Ok(())
}

fn print_patch(voice: &PhasorVoice) {
    println!("Patch:");
    for key in ParamKey::ALL {
        let desc = key.descriptor();
        println!(
            "  {:18} {:>5}{}",
            key.name(),
            voice.get_param(key.index()),
            desc.unit.suffix()
        );
    }

    let stats = voice.stats();
    println!(
        "  writes: {} accepted, {} rejected, {} unchanged",
        stats.accepted, stats.rejected, stats.unchanged
    );
}

fn print_levels(voice: &PhasorVoice) {
    let Some(diag) = voice.diagnostics() else {
        return;
    };

    println!("Levels:");
    for (label, meter) in [
        ("mix", diag.mix()),
        ("filtered", diag.filtered()),
        ("output", diag.output()),
    ] {
        match (meter.min(), meter.max()) {
            (Some(min), Some(max)) => println!("  {:10} {:>7} .. {:<7} peak {}", label, min, max, meter.peak()),
            _ => println!("  {:10} (no samples)", label),
        }
    }
    println!("  clipped    {}", diag.clipped());
}
