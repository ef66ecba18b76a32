//! Tick-wise velocity ramp.
//!
//! [`VelocityRamp`] holds the ramp parameters set by a move command and
//! computes the velocity to apply on each tick. It is pure arithmetic; the
//! axis controller owns the state and applies the result.

use crate::types::RampMode;

/// Whether the ramp tick is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampState {
    /// No tick running. Current velocity equals the target.
    #[default]
    Idle,

    /// Tick running until the current velocity reaches the target.
    Ramping,
}

/// Velocity to apply on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampStep {
    /// Signed velocity in m/s.
    pub velocity: f32,

    /// Direction line must follow the target sign before the velocity is applied.
    pub redirect: bool,
}

/// Ramp parameters of the active move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VelocityRamp {
    mode: Option<RampMode>,
    step: f32,
}

impl VelocityRamp {
    /// No move active: the velocity stays where it is.
    pub const HOLD: Self = Self {
        mode: None,
        step: 0.0,
    };

    /// Creates the ramp for `mode` ticking at `update_frequency` Hz.
    pub fn new(mode: RampMode, update_frequency: u16) -> Self {
        let step = match mode {
            RampMode::Instant => 0.0,
            RampMode::Linear(rate) => rate / update_frequency as f32,
        };

        Self {
            mode: Some(mode),
            step,
        }
    }

    /// Active ramp mode, `None` while holding.
    #[inline]
    pub fn mode(&self) -> Option<RampMode> {
        self.mode
    }

    /// Velocity change per tick in m/s.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Computes the velocity for the next tick.
    ///
    /// A stopped axis (`enabled == false`) with a linear ramp starts at
    /// `min_velocity`, the slowest rate the pulse generator can produce,
    /// limited to the target magnitude. Otherwise the velocity moves toward
    /// `target` by one step and lands exactly on it when less than a step
    /// remains.
    pub fn next(&self, current: f32, target: f32, enabled: bool, min_velocity: f32) -> RampStep {
        let velocity = match self.mode {
            None => current,
            Some(RampMode::Instant) => target,
            Some(RampMode::Linear(_)) => {
                if !enabled {
                    kick_start(target, min_velocity)
                } else if (current - target).abs() < self.step {
                    target
                } else if current < target {
                    current + self.step
                } else {
                    current - self.step
                }
            }
        };

        let redirect = sign_changed(velocity, current)
            || !enabled
            || self.mode == Some(RampMode::Instant);

        RampStep { velocity, redirect }
    }
}

/// First velocity of a ramp leaving standstill.
fn kick_start(target: f32, min_velocity: f32) -> f32 {
    let magnitude = min_velocity.min(target.abs());
    if target < 0.0 { -magnitude } else { magnitude }
}

#[inline]
fn sign_changed(a: f32, b: f32) -> bool {
    a.is_sign_negative() != b.is_sign_negative()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const VEL_MIN: f32 = 0.02;

    #[test]
    fn hold_keeps_current_velocity() {
        let step = VelocityRamp::HOLD.next(0.3, 0.5, true, VEL_MIN);
        assert_eq!(step.velocity, 0.3);
        assert!(!step.redirect);
    }

    #[test]
    fn linear_ramp_step_is_acceleration_over_rate() {
        let ramp = VelocityRamp::new(RampMode::Linear(2.0), 100);
        assert_abs_diff_eq!(ramp.step(), 0.02);
        assert_eq!(ramp.mode(), Some(RampMode::Linear(2.0)));
    }

    #[test]
    fn stopped_axis_starts_at_minimum_velocity() {
        let ramp = VelocityRamp::new(RampMode::Linear(1.0), 100);

        let forward = ramp.next(0.0, 0.5, false, VEL_MIN);
        assert_eq!(forward.velocity, VEL_MIN);
        assert!(forward.redirect);

        let backward = ramp.next(0.0, -0.5, false, VEL_MIN);
        assert_eq!(backward.velocity, -VEL_MIN);
        assert!(backward.redirect);
    }

    #[test]
    fn kick_start_never_exceeds_small_target() {
        let ramp = VelocityRamp::new(RampMode::Linear(1.0), 100);
        let step = ramp.next(0.0, 0.005, false, VEL_MIN);
        assert_eq!(step.velocity, 0.005);
    }

    #[test]
    fn running_axis_steps_toward_target() {
        let ramp = VelocityRamp::new(RampMode::Linear(1.0), 100);

        let up = ramp.next(0.1, 0.5, true, VEL_MIN);
        assert_abs_diff_eq!(up.velocity, 0.11);
        assert!(!up.redirect);

        let down = ramp.next(0.5, 0.1, true, VEL_MIN);
        assert_abs_diff_eq!(down.velocity, 0.49);
        assert!(!down.redirect);
    }

    #[test]
    fn final_step_lands_on_target() {
        let ramp = VelocityRamp::new(RampMode::Linear(1.0), 100);
        let step = ramp.next(0.495, 0.5, true, VEL_MIN);
        assert_eq!(step.velocity, 0.5);
    }

    #[test]
    fn instant_mode_jumps_and_redirects() {
        let ramp = VelocityRamp::new(RampMode::Instant, 100);
        let step = ramp.next(0.4, -0.3, true, VEL_MIN);
        assert_eq!(step.velocity, -0.3);
        assert!(step.redirect);
    }

    #[test]
    fn zero_crossing_requests_direction_change() {
        let ramp = VelocityRamp::new(RampMode::Linear(1.0), 100);

        let step = ramp.next(0.005, -0.5, true, VEL_MIN);
        assert!(step.velocity < 0.0);
        assert!(step.redirect);

        let step = ramp.next(0.05, -0.5, true, VEL_MIN);
        assert!(step.velocity > 0.0);
        assert!(!step.redirect);
    }

    #[test]
    fn ramp_converges_without_overshoot() {
        let ramp = VelocityRamp::new(RampMode::Linear(2.0), 100);
        let target = 0.5;
        let mut velocity = ramp.next(0.0, target, false, VEL_MIN).velocity;
        let mut ticks = 0;

        while velocity != target {
            let next = ramp.next(velocity, target, true, VEL_MIN).velocity;
            assert!(next > velocity);
            assert!(next <= target);
            velocity = next;
            ticks += 1;
            assert!(ticks < 100);
        }

        // (0.5 - 0.02) / 0.02 = 24 full steps
        assert!((23..=25).contains(&ticks));
    }
}
