//! Per-voice counters and signal meters.
//!
//! Owned by the voice, read through accessors, cleared explicitly. Signal
//! meters only run when enabled in [`VoiceConfig`](crate::VoiceConfig).

use mutant_core::RangeMeter;

/// Outcome counts of parameter writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceStats {
    /// Writes that changed a slot.
    pub accepted: u32,
    /// Writes dropped as out of range, read-only, or for an unknown index.
    pub rejected: u32,
    /// In-range writes equal to the stored value.
    pub unchanged: u32,
}

impl VoiceStats {
    /// Total writes seen.
    pub fn total(&self) -> u32 {
        self.accepted
            .saturating_add(self.rejected)
            .saturating_add(self.unchanged)
    }
}

/// Signal ranges at three points of the audio path.
#[derive(Debug, Clone, Default)]
pub struct VoiceDiagnostics {
    mix: RangeMeter,
    filtered: RangeMeter,
    output: RangeMeter,
}

impl VoiceDiagnostics {
    /// Create empty meters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample's worth of intermediate values.
    ///
    /// `output` is the pre-saturation product; `clipped` tells whether it was
    /// outside the 16-bit range.
    #[inline]
    pub fn observe(&mut self, mix: i32, filtered: i32, output: i32, clipped: bool) {
        self.mix.observe(mix);
        self.filtered.observe(filtered);
        self.output.observe_clipped(output, clipped);
    }

    /// Oscillator difference before narrowing (9-bit).
    pub fn mix(&self) -> &RangeMeter {
        &self.mix
    }

    /// Filter output.
    pub fn filtered(&self) -> &RangeMeter {
        &self.filtered
    }

    /// Gain-scaled output before saturation.
    pub fn output(&self) -> &RangeMeter {
        &self.output
    }

    /// Samples that hit the 16-bit rails.
    pub fn clipped(&self) -> u64 {
        self.output.clipped()
    }

    /// Clear all meters.
    pub fn reset(&mut self) {
        self.mix.reset();
        self.filtered.reset();
        self.output.reset();
    }
}
