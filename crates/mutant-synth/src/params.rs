//! Parameter table of the phasor voice.
//!
//! Seven integer slots with stable wire indices. Code inside the crate goes
//! through [`ParamKey`] and the named fields of [`PhasorParams`]; raw indices
//! only appear at the host boundary ([`ParamKey::from_index`]).
//!
//! | index | key | range |
//! |---|---|---|
//! | 0 | [`ParamKey::OscillatorDetune`] | 0–1000 |
//! | 1 | [`ParamKey::FilterCutoff`] | 3–239 |
//! | 2 | [`ParamKey::FilterResonance`] | 0–99 |
//! | 3 | [`ParamKey::FilterAttack`] | 0–4095 ticks |
//! | 4 | [`ParamKey::FilterDecay`] | 0–4095 ticks |
//! | 5 | [`ParamKey::FilterShape`] | 0–1022 |
//! | 6 | [`ParamKey::FilterSustain`] | 0–255, read-only |

use mutant_core::{
    MAX_STABLE_CUTOFF, MAX_STABLE_RESONANCE, ParamDescriptor, ParamFlags, ParamId, ParamUnit,
};

use crate::mapping::{
    DETUNE_CENTER, FilterShape, MAX_DETUNE, MAX_FILTER_ENV_ATTACK, MAX_FILTER_ENV_DECAY,
    MAX_FILTER_SHAPE, MIN_FILTER_ENV_DECAY,
};

/// Number of parameter slots.
pub const PARAM_COUNT: usize = 7;

/// Lowest accepted cutoff; 0–2 close the filter completely.
pub const MIN_FILTER_CUTOFF: i32 = 3;

/// Exclusive upper bound of the cutoff parameter.
pub const MAX_FILTER_CUTOFF: i32 = MAX_STABLE_CUTOFF as i32;

/// Exclusive upper bound of the resonance parameter.
pub const MAX_FILTER_RESONANCE: i32 = MAX_STABLE_RESONANCE as i32;

/// Base of the stable parameter IDs.
const PARAM_ID_BASE: u32 = 3000;

/// Shape code the default patch starts from.
const DEFAULT_SHAPE: i32 = 0;

/// `map_filter_shape(DEFAULT_SHAPE)`, spelled out for use in descriptors.
const DEFAULT_FILTER_SHAPE: FilterShape = FilterShape {
    attack: 0,
    decay: (DEFAULT_SHAPE + MIN_FILTER_ENV_DECAY) as u16,
    sustain_level: 0,
};

/// Parameter slot identifiers with their wire indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Oscillator-2 detune code.
    OscillatorDetune = 0,
    /// Filter cutoff.
    FilterCutoff = 1,
    /// Filter resonance.
    FilterResonance = 2,
    /// Filter-envelope attack time.
    FilterAttack = 3,
    /// Filter-envelope decay time.
    FilterDecay = 4,
    /// Filter-envelope shape macro.
    FilterShape = 5,
    /// Filter-envelope sustain level, derived from the shape.
    FilterSustain = 6,
}

impl ParamKey {
    /// All keys in wire-index order.
    pub const ALL: [ParamKey; PARAM_COUNT] = [
        ParamKey::OscillatorDetune,
        ParamKey::FilterCutoff,
        ParamKey::FilterResonance,
        ParamKey::FilterAttack,
        ParamKey::FilterDecay,
        ParamKey::FilterShape,
        ParamKey::FilterSustain,
    ];

    /// Key for a wire index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key for a snake_case name as used in config files.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(name))
    }

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Descriptor with the legal range and default.
    pub fn descriptor(self) -> ParamDescriptor {
        let id = ParamId(PARAM_ID_BASE + self as u32);
        match self {
            ParamKey::OscillatorDetune => {
                ParamDescriptor::new("Oscillator Detune", "Detune", 0, MAX_DETUNE, DETUNE_CENTER)
                    .with_id(id, "oscillator_detune")
                    .with_group("oscillator")
            }
            ParamKey::FilterCutoff => ParamDescriptor::new(
                "Filter Cutoff",
                "Cutoff",
                MIN_FILTER_CUTOFF,
                MAX_FILTER_CUTOFF - 1,
                MAX_FILTER_CUTOFF - 1,
            )
            .with_id(id, "filter_cutoff")
            .with_group("filter"),
            ParamKey::FilterResonance => {
                ParamDescriptor::new("Filter Resonance", "Reso", 0, MAX_FILTER_RESONANCE - 1, 0)
                    .with_id(id, "filter_resonance")
                    .with_group("filter")
            }
            ParamKey::FilterAttack => ParamDescriptor::new(
                "Filter Env Attack",
                "FAttack",
                0,
                MAX_FILTER_ENV_ATTACK - 1,
                i32::from(DEFAULT_FILTER_SHAPE.attack),
            )
            .with_unit(ParamUnit::Ticks)
            .with_id(id, "filter_attack")
            .with_group("filter_env"),
            ParamKey::FilterDecay => ParamDescriptor::new(
                "Filter Env Decay",
                "FDecay",
                0,
                MAX_FILTER_ENV_DECAY - 1,
                i32::from(DEFAULT_FILTER_SHAPE.decay),
            )
            .with_unit(ParamUnit::Ticks)
            .with_id(id, "filter_decay")
            .with_group("filter_env"),
            ParamKey::FilterShape => {
                ParamDescriptor::new("Filter Env Shape", "FShape", 0, MAX_FILTER_SHAPE - 1, DEFAULT_SHAPE)
                    .with_id(id, "filter_shape")
                    .with_group("filter_env")
            }
            ParamKey::FilterSustain => ParamDescriptor::new(
                "Filter Env Sustain",
                "FSustain",
                0,
                255,
                i32::from(DEFAULT_FILTER_SHAPE.sustain_level),
            )
            .with_unit(ParamUnit::Level)
            .with_flags(ParamFlags::READ_ONLY)
            .with_id(id, "filter_sustain")
            .with_group("filter_env"),
        }
    }
}

/// Stored parameter values, one named field per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhasorParams {
    /// Oscillator-2 detune code (0–1000).
    pub oscillator_detune: i32,
    /// Filter cutoff (3–239).
    pub filter_cutoff: i32,
    /// Filter resonance (0–99).
    pub filter_resonance: i32,
    /// Filter-envelope attack in ticks (0–4095).
    pub filter_attack: i32,
    /// Filter-envelope decay in ticks (0–4095).
    pub filter_decay: i32,
    /// Filter-envelope shape code (0–1022).
    pub filter_shape: i32,
    /// Filter-envelope sustain level (0–255).
    pub filter_sustain: i32,
}

impl Default for PhasorParams {
    fn default() -> Self {
        let shape = DEFAULT_FILTER_SHAPE;
        Self {
            oscillator_detune: DETUNE_CENTER,
            filter_cutoff: MAX_FILTER_CUTOFF - 1,
            filter_resonance: 0,
            filter_attack: i32::from(shape.attack),
            filter_decay: i32::from(shape.decay),
            filter_shape: DEFAULT_SHAPE,
            filter_sustain: i32::from(shape.sustain_level),
        }
    }
}

impl PhasorParams {
    /// Read a slot.
    pub fn get(&self, key: ParamKey) -> i32 {
        match key {
            ParamKey::OscillatorDetune => self.oscillator_detune,
            ParamKey::FilterCutoff => self.filter_cutoff,
            ParamKey::FilterResonance => self.filter_resonance,
            ParamKey::FilterAttack => self.filter_attack,
            ParamKey::FilterDecay => self.filter_decay,
            ParamKey::FilterShape => self.filter_shape,
            ParamKey::FilterSustain => self.filter_sustain,
        }
    }

    pub(crate) fn slot_mut(&mut self, key: ParamKey) -> &mut i32 {
        match key {
            ParamKey::OscillatorDetune => &mut self.oscillator_detune,
            ParamKey::FilterCutoff => &mut self.filter_cutoff,
            ParamKey::FilterResonance => &mut self.filter_resonance,
            ParamKey::FilterAttack => &mut self.filter_attack,
            ParamKey::FilterDecay => &mut self.filter_decay,
            ParamKey::FilterShape => &mut self.filter_shape,
            ParamKey::FilterSustain => &mut self.filter_sustain,
        }
    }

    /// Whether every slot lies inside its descriptor range.
    pub fn is_valid(&self) -> bool {
        ParamKey::ALL
            .iter()
            .all(|&key| key.descriptor().contains(self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::map_filter_shape;

    #[test]
    fn test_index_roundtrip() {
        for (i, key) in ParamKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(ParamKey::from_index(i), Some(*key));
        }
        assert_eq!(ParamKey::from_index(PARAM_COUNT), None);
    }

    #[test]
    fn test_names_unique_and_resolvable() {
        for key in ParamKey::ALL {
            assert_eq!(ParamKey::from_name(key.name()), Some(key));
            assert!(key.descriptor().short_name.len() <= 8, "{}", key.name());
        }
        assert_eq!(ParamKey::from_name("FILTER_CUTOFF"), Some(ParamKey::FilterCutoff));
        assert_eq!(ParamKey::from_name("volume"), None);
    }

    #[test]
    fn test_ranges() {
        let cutoff = ParamKey::FilterCutoff.descriptor();
        assert_eq!((cutoff.min, cutoff.max), (3, 239));
        let res = ParamKey::FilterResonance.descriptor();
        assert_eq!((res.min, res.max), (0, 99));
        let shape = ParamKey::FilterShape.descriptor();
        assert_eq!((shape.min, shape.max), (0, 1022));
        assert!(!ParamKey::FilterSustain.descriptor().is_writable());
        assert!(ParamKey::FilterAttack.descriptor().is_writable());
    }

    #[test]
    fn test_defaults_valid_and_match_descriptors() {
        let params = PhasorParams::default();
        assert!(params.is_valid());
        for key in ParamKey::ALL {
            assert_eq!(params.get(key), key.descriptor().default, "{}", key.name());
        }
    }

    #[test]
    fn test_default_shape_constant_matches_curve() {
        assert_eq!(DEFAULT_FILTER_SHAPE, map_filter_shape(DEFAULT_SHAPE));
    }
}
