//! Control-code curves.
//!
//! Pure functions turning the compact integer controls of the voice into
//! internal units: the oscillator-2 detune code into a frequency ratio, and
//! the filter "shape" macro into filter-envelope attack, decay and sustain.

/// Largest detune code; inputs above are clamped.
pub const MAX_DETUNE: i32 = 1000;

/// Exclusive upper bound of the filter-shape code.
pub const MAX_FILTER_SHAPE: i32 = 1023;

/// Exclusive upper bound of the filter-envelope attack time (ticks).
pub const MAX_FILTER_ENV_ATTACK: i32 = 4096;

/// Exclusive upper bound of the filter-envelope decay time (ticks).
pub const MAX_FILTER_ENV_DECAY: i32 = 4096;

/// Shortest decay the shape curve produces (ticks).
pub const MIN_FILTER_ENV_DECAY: i32 = 40;

/// Detune code with a ratio of exactly 1 on the interpolation line.
pub const DETUNE_CENTER: i32 = 500;

/// Codes per unit of ratio on the interpolation line.
const DETUNE_SLOPE_DIV: f32 = 3000.0;

/// Ratio for an octave down.
pub const RATIO_OCTAVE_DOWN: f32 = 0.5;
/// Ratio for a fourth down.
pub const RATIO_FOURTH_DOWN: f32 = 0.75;
/// Ratio for a fifth up.
pub const RATIO_FIFTH_UP: f32 = 1.498307;
/// Ratio for an octave up.
pub const RATIO_OCTAVE_UP: f32 = 2.0;
/// Ratio for an octave and a fifth up.
pub const RATIO_TWELFTH_UP: f32 = 2.996614;

/// Detune bands, each `[lo, hi)`; the last band also includes [`MAX_DETUNE`].
const DETUNE_BANDS: [(i32, i32, DetuneBand); 8] = [
    (0, 200, DetuneBand::Fixed(RATIO_OCTAVE_DOWN)),
    (200, 400, DetuneBand::Fixed(RATIO_FOURTH_DOWN)),
    (400, 485, DetuneBand::Linear),
    (485, 515, DetuneBand::Fixed(0.0)),
    (515, 600, DetuneBand::Linear),
    (600, 800, DetuneBand::Fixed(RATIO_FIFTH_UP)),
    (800, 950, DetuneBand::Fixed(RATIO_OCTAVE_UP)),
    (950, MAX_DETUNE + 1, DetuneBand::Fixed(RATIO_TWELFTH_UP)),
];

#[derive(Clone, Copy, Debug, PartialEq)]
enum DetuneBand {
    Fixed(f32),
    Linear,
}

/// Oscillator-2 tuning relative to oscillator 1.
///
/// A ratio of 0 silences oscillator 2 (its phase stops advancing).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detune {
    /// Frequency multiplier applied after pitch conversion.
    pub ratio: f32,
    /// Semitone offset added to the note before pitch conversion.
    pub semitones: i8,
}

impl Default for Detune {
    fn default() -> Self {
        map_detune(DETUNE_CENTER)
    }
}

impl Detune {
    /// Whether oscillator 2 is switched off.
    pub fn is_disabled(&self) -> bool {
        self.ratio == 0.0
    }
}

/// Interpolation line shared by the two fine-detune bands.
///
/// ```rust
/// use mutant_synth::detune_line;
///
/// assert_eq!(detune_line(500), 1.0);
/// assert!((detune_line(530) - 1.01).abs() < 1e-6);
/// ```
#[inline]
pub fn detune_line(code: i32) -> f32 {
    1.0 + (code - DETUNE_CENTER) as f32 / DETUNE_SLOPE_DIV
}

/// Map a detune code to an oscillator-2 ratio.
///
/// | code | ratio |
/// |---|---|
/// | 0–199 | 0.5 |
/// | 200–399 | 0.75 |
/// | 400–484 | `1 + (code - 500) / 3000` |
/// | 485–514 | 0 (off) |
/// | 515–599 | `1 + (code - 500) / 3000` |
/// | 600–799 | 1.498307 |
/// | 800–949 | 2.0 |
/// | 950–1000 | 2.996614 |
///
/// Codes outside 0–1000 are clamped first.
///
/// ```rust
/// use mutant_synth::map_detune;
///
/// assert_eq!(map_detune(-20).ratio, 0.5);
/// assert_eq!(map_detune(500).ratio, 0.0);
/// assert_eq!(map_detune(5000).ratio, 2.996614);
/// ```
pub fn map_detune(code: i32) -> Detune {
    let code = code.clamp(0, MAX_DETUNE);
    let band = DETUNE_BANDS
        .iter()
        .find(|(lo, hi, _)| (*lo..*hi).contains(&code))
        .map_or(DetuneBand::Fixed(RATIO_TWELFTH_UP), |(_, _, band)| *band);
    let ratio = match band {
        DetuneBand::Fixed(ratio) => ratio,
        DetuneBand::Linear => detune_line(code),
    };
    Detune {
        ratio,
        semitones: 0,
    }
}

/// Filter-envelope settings derived from one shape code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterShape {
    /// Attack time in ticks.
    pub attack: u16,
    /// Decay time in ticks.
    pub decay: u16,
    /// Sustain level (0–255).
    pub sustain_level: u8,
}

/// Map a filter-shape code in `0..1023` to attack, decay and sustain.
///
/// Low codes give a plucky envelope (instant attack, short decay, nothing
/// sustained), the middle holds the filter fully open, and high codes add a
/// slow attack while the sustain tapers back toward half.
///
/// - attack: 0 below 600, then `(code - 600) * 2`
/// - decay: `code + 40`
/// - sustain: `code³ / 262144` capped at 255 below 512, 255 up to 767,
///   then `255 + (768 - code) / 2`
///
/// Codes outside the range are clamped first.
///
/// ```rust
/// use mutant_synth::map_filter_shape;
///
/// let s = map_filter_shape(700);
/// assert_eq!((s.attack, s.decay, s.sustain_level), (200, 740, 255));
/// assert_eq!(map_filter_shape(1022).sustain_level, 128);
/// ```
pub fn map_filter_shape(code: i32) -> FilterShape {
    let code = code.clamp(0, MAX_FILTER_SHAPE - 1);

    let attack = if code < 600 { 0 } else { (code - 600) * 2 };
    let decay = code + MIN_FILTER_ENV_DECAY;
    let sustain = if code < 512 {
        (code * code * code / 262_144).min(255)
    } else if code < 768 {
        255
    } else {
        255 + (768 - code) / 2
    };

    FilterShape {
        attack: attack.clamp(0, MAX_FILTER_ENV_ATTACK - 1) as u16,
        decay: decay.clamp(MIN_FILTER_ENV_DECAY, MAX_FILTER_ENV_DECAY - 1) as u16,
        sustain_level: sustain.clamp(0, 255) as u8,
    }
}
