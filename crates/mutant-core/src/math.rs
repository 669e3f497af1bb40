//! Pitch conversion and fixed-point helpers.
//!
//! The voice path works on small signed integers (8-bit oscillator bytes,
//! a 9-bit mix, 16-bit output), so most helpers here deal with moving values
//! between bit widths and keeping them inside their target range.
//!
//! - [`midi_to_freq`] - MIDI note number to Hz (fractional notes allowed)
//! - [`rescale_bits`] - shift a signed value from one bit width to another
//! - [`saturate_i16`] - clamp an `i32` into the 16-bit output range
//! - [`saturate_bits`] - clamp an `i32` into an arbitrary signed bit width

use libm::powf;

/// Convert a MIDI note number to frequency in Hz.
///
/// A4 (note 69) = 440 Hz. Fractional notes are accepted so callers can add
/// semitone offsets before converting.
///
/// # Example
/// ```rust
/// use mutant_core::midi_to_freq;
///
/// assert!((midi_to_freq(69.0) - 440.0).abs() < 0.01);
/// assert!((midi_to_freq(57.0) - 220.0).abs() < 0.01);
/// ```
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    440.0 * powf(2.0, (note - 69.0) / 12.0)
}

/// Re-express a signed `from_bits`-wide value at `to_bits` width.
///
/// Narrowing is an arithmetic right shift (floor), widening a left shift.
///
/// ```rust
/// use mutant_core::rescale_bits;
///
/// // 9-bit mix into an 8-bit filter input
/// assert_eq!(rescale_bits(255, 9, 8), 127);
/// assert_eq!(rescale_bits(-256, 9, 8), -128);
/// assert_eq!(rescale_bits(-128, 8, 16), -32768);
/// ```
#[inline]
pub fn rescale_bits(value: i32, from_bits: u32, to_bits: u32) -> i32 {
    if from_bits > to_bits {
        value >> (from_bits - to_bits)
    } else {
        value << (to_bits - from_bits)
    }
}

/// Clamp into the signed range representable in `bits` bits.
#[inline]
pub fn saturate_bits(value: i32, bits: u32) -> i32 {
    let max = (1_i32 << (bits - 1)) - 1;
    value.clamp(-max - 1, max)
}

/// Clamp into `i16`.
#[inline]
pub fn saturate_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
