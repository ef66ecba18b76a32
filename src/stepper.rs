//! Stepper axis controller with ramped velocity, limit interlock and stall check.
//!
//! Provides [`Stepper`], which owns the peripherals of one axis and is the only
//! writer of its motion state. It is driven from three places:
//!
//! - foreground code calling [`Stepper::move_at`], [`Stepper::stop`] and
//!   [`Stepper::check_for_stall`],
//! - the ramp timer interrupt calling [`Stepper::on_tick`],
//! - the limit switch interrupt calling [`Stepper::on_limit_edge`].
//!
//! Every operation is bounded and non-blocking. When those contexts can
//! preempt each other, wrap the stepper in a
//! [`SharedStepper`](crate::shared::SharedStepper).

use crate::clock::PwmTiming;
use crate::command::StepperAction;
use crate::config::StepperConfig;
use crate::hardware::{LimitInput, OutputLine, PulseGenerator, RampTimer, StepperHardware};
use crate::ramp::{RampState, VelocityRamp};
use crate::stall::StallDetector;
use crate::types::{Direction, Limit, RampMode, TickOutcome};
use micromath::F32Ext;

/// Snapshot of an axis' motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperStatus {
    /// Axis enabled by a move. Stays true while the output is only muted by the dead zone.
    pub enabled: bool,

    /// Current direction line state.
    pub direction: Direction,

    /// Commanded velocity in m/s.
    pub target_velocity: f32,

    /// Velocity currently applied to the pulse generator, in m/s.
    pub current_velocity: f32,

    /// Ramp of the active move, `None` when stopped.
    pub ramp: Option<RampMode>,

    /// Requested pulse frequency in Hz, 0 when stopped.
    pub pulse_frequency: u32,
}

impl StepperStatus {
    /// State of an axis that has never moved or was just stopped.
    pub const STOPPED: Self = Self {
        enabled: false,
        direction: Direction::Backward,
        target_velocity: 0.0,
        current_velocity: 0.0,
        ramp: None,
        pulse_frequency: 0,
    };

    /// Acceleration of the active move in m/s², 0 for instant moves or when stopped.
    pub fn current_acceleration(&self) -> f32 {
        match self.ramp {
            Some(RampMode::Linear(rate)) => rate,
            _ => 0.0,
        }
    }

    /// Returns true while the axis is enabled with a non-zero velocity.
    pub fn is_moving(&self) -> bool {
        self.enabled && self.current_velocity != 0.0
    }
}

impl Default for StepperStatus {
    fn default() -> Self {
        Self::STOPPED
    }
}

/// Controls one stepper axis through a pulse generator.
///
/// # Type Parameters
/// * `P` - Pulse generator implementation
/// * `T` - Ramp timer implementation
/// * `O` - Output line implementation (direction and enable)
/// * `L` - Limit switch input implementation
pub struct Stepper<P, T, O, L> {
    hw: StepperHardware<P, T, O, L>,
    config: StepperConfig,
    timing: PwmTiming,
    status: StepperStatus,
    ramp: VelocityRamp,
    ramp_state: RampState,
    stall: StallDetector,
}

impl<P, T, O, L> Stepper<P, T, O, L>
where
    P: PulseGenerator,
    T: RampTimer,
    O: OutputLine,
    L: LimitInput,
{
    /// Sets up the axis peripherals and returns a stopped axis.
    ///
    /// The driver is left disabled, the ramp timer is programmed but not
    /// started, and the pulse generator clock is chosen for full speed.
    pub fn new(config: StepperConfig, mut hw: StepperHardware<P, T, O, L>) -> Self {
        let status = StepperStatus::STOPPED;

        hw.direction.set(status.direction.is_forward());
        hw.enable.set(status.enabled);
        hw.pulse.set_clock_divider(config.initial_divider);
        hw.timer.set_frequency(config.update_frequency);

        let mut stepper = Self {
            hw,
            config,
            timing: PwmTiming::new(config.base_clock_hz, config.initial_divider, config.kv),
            status,
            ramp: VelocityRamp::HOLD,
            ramp_state: RampState::Idle,
            stall: StallDetector::new(),
        };

        stepper.set_pulse_frequency(frequency_for(config.max_velocity, config.kv));
        stepper.status.pulse_frequency = 0;
        stepper
    }

    /// Handles a command action by dispatching to the matching method.
    ///
    /// Returns whether the axis is enabled afterwards.
    pub fn handle_action(&mut self, action: StepperAction) -> bool {
        match action {
            StepperAction::Move {
                velocity,
                acceleration,
            } => self.move_velocity(velocity, acceleration),
            StepperAction::Stop => {
                self.stop();
                false
            }
        }
    }

    /// Moves toward `velocity` (m/s, signed) using `ramp`.
    ///
    /// The velocity magnitude is clamped to the configured maximum and a linear
    /// rate to the maximum acceleration. A stopped axis is only started if the
    /// limit switch in the direction of travel is released.
    ///
    /// # Returns
    /// * `true` - The axis is enabled
    /// * `false` - The axis is stopped, either because zero was requested or a limit blocks the move
    pub fn move_at(&mut self, velocity: f32, ramp: RampMode) -> bool {
        let magnitude = if velocity.is_nan() {
            0.0
        } else {
            velocity.abs().min(self.config.max_velocity)
        };
        let target = if velocity < 0.0 { -magnitude } else { magnitude };

        let mode = match ramp {
            RampMode::Instant => RampMode::Instant,
            RampMode::Linear(rate) => RampMode::from_acceleration(rate, self.config.max_acceleration),
        };

        self.status.target_velocity = target;
        self.status.ramp = Some(mode);
        self.ramp = VelocityRamp::new(mode, self.config.update_frequency);

        if !self.status.enabled && magnitude != 0.0 {
            // Seeds direction and the first velocity
            self.advance();

            if self.can_move(self.status.direction) {
                self.set_enable(true);
                self.hw.pulse.start();
                // Re-evaluate the dead zone now that the axis counts as enabled
                self.set_pulse_frequency(self.status.pulse_frequency);
            } else {
                #[cfg(feature = "defmt")]
                defmt::warn!("move refused: limit asserted toward {}", self.status.direction);
                self.stop();
            }
        }

        if self.status.current_velocity != self.status.target_velocity {
            self.start_ramp();
        }

        self.status.enabled
    }

    /// Moves toward `velocity` with a raw acceleration value.
    ///
    /// Positive accelerations ramp linearly (clamped to the maximum); zero or
    /// negative values change velocity on the next tick.
    pub fn move_velocity(&mut self, velocity: f32, acceleration: f32) -> bool {
        let mode = RampMode::from_acceleration(acceleration, self.config.max_acceleration);
        self.move_at(velocity, mode)
    }

    /// Stops the axis immediately.
    ///
    /// Disables the driver and the pulse output, halts the ramp and clears
    /// velocities. Safe to call from any state, any number of times.
    pub fn stop(&mut self) {
        self.set_enable(false);
        self.hw.pulse.stop();

        self.status.pulse_frequency = 0;
        self.status.current_velocity = 0.0;
        self.status.target_velocity = 0.0;
        self.status.ramp = None;
        self.ramp = VelocityRamp::HOLD;

        self.halt_ramp();
    }

    /// Ramp timer handler. Call on every tick of the ramp timer.
    ///
    /// Advances the velocity by one step and turns the timer off on the tick
    /// the target is reached.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.status.current_velocity != self.status.target_velocity {
            self.advance();
        }

        if self.status.current_velocity == self.status.target_velocity {
            self.halt_ramp();
            TickOutcome::Settled
        } else {
            TickOutcome::Pending
        }
    }

    /// Limit switch handler. Call on the rising edge of either switch.
    ///
    /// Stops the axis only if it is moving into the switch that fired.
    pub fn on_limit_edge(&mut self, limit: Limit) {
        if self.status.enabled && self.status.direction == limit.blocked_direction() {
            #[cfg(feature = "defmt")]
            defmt::warn!("limit {} reached, stopping axis", limit);
            self.stop();
        }
    }

    /// Returns true if the switch in `direction` of travel is released.
    pub fn can_move(&self, direction: Direction) -> bool {
        let switch = match direction {
            Direction::Backward => &self.hw.limit_start,
            Direction::Forward => &self.hw.limit_end,
        };
        !switch.is_asserted()
    }

    /// Feeds a new encoder sample to the stall detector.
    ///
    /// Returns true if the axis is commanded to move but the encoder has not
    /// changed since the previous sample.
    pub fn check_for_stall(&mut self, encoder_value: u32) -> bool {
        let stalled = self.stall.check(
            self.status.enabled,
            self.status.current_velocity,
            encoder_value,
        );

        #[cfg(feature = "defmt")]
        if stalled {
            defmt::warn!("possible stall at encoder value {}", encoder_value);
        }

        stalled
    }

    /// Requests a pulse frequency in Hz.
    ///
    /// Switches the clock divider when the policy asks for it. Below the dead
    /// zone an enabled axis has its driver muted while staying logically
    /// enabled; otherwise the driver is energized and the period register is
    /// rewritten only if it changes. The duty cycle is fixed at 50%.
    fn set_pulse_frequency(&mut self, frequency: u32) {
        if let Some(divider) = self.config.clock_policy.select(frequency, self.timing.divider) {
            self.hw.pulse.set_clock_divider(divider);
            self.timing = PwmTiming::new(self.config.base_clock_hz, divider, self.config.kv);

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "pulse clock {} Hz, dead zone {} Hz",
                self.timing.clock_hz,
                self.timing.dead_zone_hz
            );
        }

        self.status.pulse_frequency = frequency;

        if self.timing.in_dead_zone(frequency) {
            if self.status.enabled {
                self.hw.enable.set(false);
            }
            return;
        }

        if self.status.enabled {
            self.hw.enable.set(true);
        }

        let period = self.timing.period_for(frequency);
        if period != self.hw.pulse.period() {
            self.hw.pulse.set_period(period, period >> 1);
        }
    }

    /// Returns a snapshot of the motion state.
    pub fn status(&self) -> StepperStatus {
        self.status
    }

    /// Returns true if the axis is enabled.
    pub fn is_enabled(&self) -> bool {
        self.status.enabled
    }

    /// Returns the current direction.
    pub fn direction(&self) -> Direction {
        self.status.direction
    }

    /// Returns the commanded velocity in m/s.
    pub fn target_velocity(&self) -> f32 {
        self.status.target_velocity
    }

    /// Returns the applied velocity in m/s.
    pub fn current_velocity(&self) -> f32 {
        self.status.current_velocity
    }

    /// Returns the ramp of the active move.
    pub fn ramp(&self) -> Option<RampMode> {
        self.status.ramp
    }

    /// Returns the acceleration of the active move in m/s².
    pub fn current_acceleration(&self) -> f32 {
        self.status.current_acceleration()
    }

    /// Returns the requested pulse frequency in Hz.
    pub fn pulse_frequency(&self) -> u32 {
        self.status.pulse_frequency
    }

    /// Returns whether the ramp timer is running.
    pub fn ramp_state(&self) -> RampState {
        self.ramp_state
    }

    /// Returns the parameters derived from the active clock divider.
    pub fn timing(&self) -> PwmTiming {
        self.timing
    }

    /// Returns the axis configuration.
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Returns the axis peripherals.
    pub fn hardware(&self) -> &StepperHardware<P, T, O, L> {
        &self.hw
    }

    /// Stops the axis and gives the peripherals back.
    pub fn release(mut self) -> StepperHardware<P, T, O, L> {
        self.stop();
        self.hw
    }

    fn advance(&mut self) {
        let step = self.ramp.next(
            self.status.current_velocity,
            self.status.target_velocity,
            self.status.enabled,
            self.timing.min_velocity,
        );

        if step.redirect {
            let direction = Direction::of(self.status.target_velocity);

            // A switch pressed behind a running axis fires no new edge
            if self.status.enabled && !self.can_move(direction) {
                #[cfg(feature = "defmt")]
                defmt::warn!("reversal blocked: limit asserted toward {}", direction);
                self.stop();
                return;
            }

            self.set_direction(direction);
        }

        self.set_velocity(step.velocity);
    }

    fn set_velocity(&mut self, velocity: f32) {
        let target = self.status.target_velocity;

        // Within one pulse per second of the target counts as arrived
        let applied = if (velocity - target).abs() * self.config.kv < 1.0 {
            target
        } else {
            velocity
        };

        if applied == 0.0 && target == 0.0 {
            self.stop();
            return;
        }

        self.status.current_velocity = applied;
        self.set_pulse_frequency(frequency_for(applied, self.config.kv));
    }

    fn set_direction(&mut self, direction: Direction) {
        self.status.direction = direction;
        self.hw.direction.set(direction.is_forward());
    }

    fn set_enable(&mut self, enabled: bool) {
        self.status.enabled = enabled;
        self.hw.enable.set(enabled);
    }

    fn start_ramp(&mut self) {
        if self.ramp_state == RampState::Idle {
            self.hw.timer.start();
            self.ramp_state = RampState::Ramping;
        }
    }

    fn halt_ramp(&mut self) {
        if self.ramp_state == RampState::Ramping {
            self.hw.timer.stop();
            self.ramp_state = RampState::Idle;
        }
    }
}

/// Pulse frequency in Hz for a velocity in m/s.
#[inline]
fn frequency_for(velocity: f32, kv: f32) -> u32 {
    (kv * velocity.abs()).round() as u32
}
