//! Discrete control blocks for closed loops around an axis or a heater.
//!
//! All blocks are sampled: call `compute` once per control period with the
//! latest measurement. Gains are in per-sample units.

mod lead_lag;
mod lqr;
mod pid;

pub use lead_lag::LeadLag;
pub use lqr::Lqr;
pub use pid::Pid;

/// Saturation bounds of a controller output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputLimits {
    pub min: f32,
    pub max: f32,
}

impl OutputLimits {
    /// Creates limits. `min` should not exceed `max`.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps `value` and reports whether it hit a bound.
    ///
    /// Reaching a bound exactly counts as saturated.
    pub fn clamp(&self, value: f32) -> (f32, bool) {
        if value >= self.max {
            (self.max, true)
        } else if value <= self.min {
            (self.min, true)
        } else {
            (value, false)
        }
    }
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

/// Single-input single-output controller.
pub trait Controller {
    /// Computes the next output for `measurement`.
    fn compute(&mut self, measurement: f32) -> f32;

    /// Clears the internal history.
    fn reset(&mut self);

    /// Sets the value the loop drives the measurement toward.
    fn set_reference(&mut self, reference: f32);

    /// Returns the current reference.
    fn reference(&self) -> f32;
}

/// Errors of the state-feedback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// State index beyond the number of states.
    IndexOutOfRange { index: usize, len: usize },
}

impl core::fmt::Display for ControlError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControlError::IndexOutOfRange { index, len } => {
                write!(f, "state index {} out of range for {} states", index, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControlError {}
