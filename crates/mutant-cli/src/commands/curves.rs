//! Control-curve tabulation command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::{Args, Subcommand};
use mutant_synth::{MAX_DETUNE, MAX_FILTER_SHAPE, map_detune, map_filter_shape};

#[derive(Args)]
pub struct CurvesArgs {
    #[command(subcommand)]
    command: CurveCommand,
}

#[derive(Subcommand)]
enum CurveCommand {
    /// Oscillator-2 detune code to frequency ratio
    Detune {
        /// Code increment between rows
        #[arg(long, default_value = "25", value_parser = clap::value_parser!(u16).range(1..))]
        step: u16,
    },

    /// Filter-envelope shape code to attack, decay and sustain
    Shape {
        /// Code increment between rows
        #[arg(long, default_value = "32", value_parser = clap::value_parser!(u16).range(1..))]
        step: u16,
    },
}

pub fn run(args: CurvesArgs) -> anyhow::Result<()> {
    match args.command {
        CurveCommand::Detune { step } => print_detune(step),
        CurveCommand::Shape { step } => print_shape(step),
    }
    Ok(())
}

/// Codes from 0 to `last` inclusive, always ending on `last`.
fn codes(last: i32, step: u16) -> Vec<i32> {
    let mut codes: Vec<i32> = (0..=last).step_by(usize::from(step)).collect();
    if codes.last() != Some(&last) {
        codes.push(last);
    }
    codes
}

fn print_detune(step: u16) {
    println!("  {:>5}  {:>9}  {}", "Code", "Ratio", "Semitones");
    println!("  {:>5}  {:>9}  {}", "----", "-----", "---------");
    for code in codes(MAX_DETUNE, step) {
        let detune = map_detune(code);
        let note = if detune.is_disabled() { "  (off)" } else { "" };
        println!("  {:>5}  {:>9.6}  {}{}", code, detune.ratio, detune.semitones, note);
    }
}

fn print_shape(step: u16) {
    println!("  {:>5}  {:>6}  {:>6}  {}", "Code", "Attack", "Decay", "Sustain");
    println!("  {:>5}  {:>6}  {:>6}  {}", "----", "------", "-----", "-------");
    for code in codes(MAX_FILTER_SHAPE - 1, step) {
        let shape = map_filter_shape(code);
        println!(
            "  {:>5}  {:>6}  {:>6}  {}",
            code, shape.attack, shape.decay, shape.sustain_level
        );
    }
}
