//! Hardware abstraction traits for the axis controller.
//!
//! Implement these for your board's timer, PWM and GPIO peripherals. All
//! methods are infallible: handle hardware errors inside the implementation.

use crate::clock::ClockDivider;

/// A PWM channel producing the step pulse train.
pub trait PulseGenerator {
    /// Switches the generator's clock divider.
    fn set_clock_divider(&mut self, divider: ClockDivider);

    /// Returns the currently programmed period register value.
    fn period(&self) -> u32;

    /// Programs the period register and the pulse width (both in clock ticks).
    fn set_period(&mut self, period: u32, pulse_width: u32);

    /// Connects the output pin and starts the generator.
    fn start(&mut self);

    /// Stops the generator and disconnects the output pin.
    fn stop(&mut self);
}

/// Periodic interrupt source driving the velocity ramp.
pub trait RampTimer {
    /// Sets the tick rate. Called once while the axis is set up.
    fn set_frequency(&mut self, hz: u16);

    /// Starts periodic ticks.
    fn start(&mut self);

    /// Stops periodic ticks.
    fn stop(&mut self);
}

/// A digital output line.
///
/// `active` is the logical state; an active-low pin inverts it internally.
pub trait OutputLine {
    /// Drives the line.
    fn set(&mut self, active: bool);
}

/// A limit switch input.
pub trait LimitInput {
    /// Returns true while the switch is pressed.
    fn is_asserted(&self) -> bool;
}

/// The peripherals owned by one axis.
///
/// # Type Parameters
/// * `P` - Pulse generator
/// * `T` - Ramp tick timer
/// * `O` - Direction and enable output lines
/// * `L` - Limit switch inputs
pub struct StepperHardware<P, T, O, L> {
    /// Step pulse output.
    pub pulse: P,

    /// Ramp tick source.
    pub timer: T,

    /// Direction line, active = forward.
    pub direction: O,

    /// Driver enable line, active = energized.
    pub enable: O,

    /// Switch at the start of travel.
    pub limit_start: L,

    /// Switch at the end of travel.
    pub limit_end: L,
}

impl<P, T, O, L> StepperHardware<P, T, O, L>
where
    P: PulseGenerator,
    T: RampTimer,
    O: OutputLine,
    L: LimitInput,
{
    /// Bundles the axis peripherals.
    pub fn new(pulse: P, timer: T, direction: O, enable: O, limit_start: L, limit_end: L) -> Self {
        Self {
            pulse,
            timer,
            direction,
            enable,
            limit_start,
            limit_end,
        }
    }
}
