//! Stall detection from externally sampled encoder positions.

/// Flags a stall when commanded motion produces no encoder movement.
///
/// Feed it every new encoder sample. Detection only: what to do about a stall
/// is up to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StallDetector {
    last_sample: Option<u32>,
}

impl StallDetector {
    /// Creates a detector with no previous sample.
    pub const fn new() -> Self {
        Self { last_sample: None }
    }

    /// Compares `sample` with the previous one.
    ///
    /// Returns true when the axis is enabled, commanded to move and the
    /// encoder has not changed since the last call. The first call never
    /// reports a stall. The sample is always recorded.
    pub fn check(&mut self, enabled: bool, velocity: f32, sample: u32) -> bool {
        let unchanged = self.last_sample == Some(sample);
        self.last_sample = Some(sample);

        enabled && velocity != 0.0 && unchanged
    }

    /// Last recorded sample.
    pub fn last_sample(&self) -> Option<u32> {
        self.last_sample
    }

    /// Forgets the previous sample.
    pub fn reset(&mut self) {
        self.last_sample = None;
    }
}
