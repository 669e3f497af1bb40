//! Parameter introspection for integer-controlled sound sources.
//!
//! Sound sources expose a small table of integer parameters addressed by a
//! stable zero-based index (the "wire index" used by hosts and controllers).
//! Each slot is described by a [`ParamDescriptor`] carrying its legal range,
//! its default, a stable [`ParamId`], and [`ParamFlags`].
//!
//! Writes outside a slot's range are not clamped here; the implementor decides
//! whether to clamp or drop them. [`ParamDescriptor::contains`] and
//! [`ParamDescriptor::clamp`] cover both policies.
//!
//! # Example
//!
//! ```rust
//! use mutant_core::{ParameterInfo, ParamDescriptor, ParamId, ParamUnit};
//!
//! struct Tone {
//!     brightness: i32,
//! }
//!
//! impl ParameterInfo for Tone {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::new("Brightness", "Bright", 0, 255, 128)
//!                 .with_unit(ParamUnit::Level)
//!                 .with_id(ParamId(10), "tone_bright")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> i32 {
//!         match index {
//!             0 => self.brightness,
//!             _ => 0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: i32) {
//!         if index == 0 {
//!             self.brightness = value.clamp(0, 255);
//!         }
//!     }
//! }
//!
//! let mut tone = Tone { brightness: 0 };
//! tone.set_param(0, 999);
//! assert_eq!(tone.get_param(0), 255);
//! assert_eq!(tone.find_param_by_name("bright"), Some(0));
//! ```

/// Stable parameter identifier.
///
/// Survives reordering of the parameter table; used for preset files and
/// host automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Unit of a parameter value, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Unitless control code.
    #[default]
    Code,
    /// Control-rate ticks.
    Ticks,
    /// 8-bit level (0–255).
    Level,
}

impl ParamUnit {
    /// Short suffix for formatting, empty for unitless codes.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Code => "",
            Self::Ticks => " ticks",
            Self::Level => "",
        }
    }
}

/// Parameter capability flags.
///
/// ```rust
/// use mutant_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::READ_ONLY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate or randomize this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps.
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter is derived from others and cannot be written.
    pub const READ_ONLY: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Metadata for one integer parameter slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Smallest legal value (inclusive).
    pub min: i32,
    /// Largest legal value (inclusive).
    pub max: i32,
    /// Value on construction.
    pub default: i32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable snake_case ID used in config files and on the command line.
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Group name for display (e.g. `"filter"`), empty for top level.
    pub group: &'static str,
}

impl ParamDescriptor {
    /// Create an automatable, stepped descriptor with the given inclusive range.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        min: i32,
        max: i32,
        default: i32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Code,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            group: "",
        }
    }

    /// Set the stable ID pair.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Set the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Replace the flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the group name.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Whether `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Number of legal values.
    pub fn span(&self) -> u32 {
        (self.max - self.min) as u32 + 1
    }

    /// Whether hosts may write this slot.
    pub fn is_writable(&self) -> bool {
        !self.flags.contains(ParamFlags::READ_ONLY)
    }
}

/// Index-addressed integer parameter access.
///
/// Indices are stable for the lifetime of the implementor; valid indices are
/// `0..param_count()`. Out-of-range indices read as 0 and writes to them are
/// ignored.
pub trait ParameterInfo {
    /// Number of parameter slots.
    fn param_count(&self) -> usize;

    /// Descriptor for the slot at `index`, `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the slot at `index`, 0 past the end.
    fn get_param(&self, index: usize) -> i32;

    /// Write the slot at `index`.
    ///
    /// Implementations decide whether out-of-range values are clamped or
    /// dropped, but must never store a value outside the descriptor range.
    fn set_param(&mut self, index: usize, value: i32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches the full name, the short name, and the string ID.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: i32,
        b: i32,
    }

    impl ParameterInfo for Pair {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(ParamDescriptor::new("Alpha", "A", 0, 10, 5).with_id(ParamId(1), "pair_a")),
                1 => Some(
                    ParamDescriptor::new("Beta", "B", -4, 4, 0)
                        .with_id(ParamId(2), "pair_b")
                        .with_flags(ParamFlags::READ_ONLY),
                ),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> i32 {
            match index {
                0 => self.a,
                1 => self.b,
                _ => 0,
            }
        }

        fn set_param(&mut self, index: usize, value: i32) {
            if index == 0 {
                self.a = value.clamp(0, 10);
            }
        }
    }

    #[test]
    fn test_descriptor_range() {
        let d = ParamDescriptor::new("Cutoff", "Cut", 3, 239, 239);
        assert!(d.contains(3));
        assert!(d.contains(239));
        assert!(!d.contains(2));
        assert!(!d.contains(240));
        assert_eq!(d.clamp(500), 239);
        assert_eq!(d.clamp(-1), 3);
        assert_eq!(d.span(), 237);
    }

    #[test]
    fn test_default_flags() {
        let d = ParamDescriptor::new("X", "X", 0, 1, 0);
        assert!(d.flags.contains(ParamFlags::AUTOMATABLE));
        assert!(d.flags.contains(ParamFlags::STEPPED));
        assert!(d.is_writable());
        assert!(!d.with_flags(ParamFlags::READ_ONLY).is_writable());
    }

    #[test]
    fn test_find_by_name_and_id() {
        let p = Pair { a: 0, b: 0 };
        assert_eq!(p.find_param_by_name("alpha"), Some(0));
        assert_eq!(p.find_param_by_name("B"), Some(1));
        assert_eq!(p.find_param_by_name("pair_b"), Some(1));
        assert_eq!(p.find_param_by_name("gamma"), None);
        assert_eq!(p.param_index_by_id(ParamId(2)), Some(1));
        assert_eq!(p.param_index_by_id(ParamId(9)), None);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut p = Pair { a: 3, b: 1 };
        p.set_param(7, 100);
        assert_eq!(p.get_param(7), 0);
        assert!(p.param_info(2).is_none());
        assert_eq!(p.get_param(0), 3);
    }
}
