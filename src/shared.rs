//! Interrupt-safe home for one axis.
//!
//! The ramp tick, the limit switch edges and foreground commands all mutate
//! the same motion state. [`SharedStepper`] keeps the axis behind a
//! `critical_section::Mutex` so every operation runs to completion without
//! being preempted by another one, whatever the interrupt priorities are.
//!
//! ```ignore
//! static AXIS: SharedStepper<Pwm, Tim, Pin, Input> = SharedStepper::new();
//!
//! #[interrupt]
//! fn TIM6() {
//!     AXIS.on_tick();
//! }
//! ```

use core::cell::RefCell;
use critical_section::Mutex;

use crate::hardware::{LimitInput, OutputLine, PulseGenerator, RampTimer};
use crate::stepper::{Stepper, StepperStatus};
use crate::types::{Limit, TickOutcome};

/// An axis shared between interrupt handlers and foreground code.
pub struct SharedStepper<P, T, O, L> {
    inner: Mutex<RefCell<Option<Stepper<P, T, O, L>>>>,
}

impl<P, T, O, L> SharedStepper<P, T, O, L> {
    /// Creates an empty slot, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }
}

impl<P, T, O, L> SharedStepper<P, T, O, L>
where
    P: PulseGenerator,
    T: RampTimer,
    O: OutputLine,
    L: LimitInput,
{
    /// Places `stepper` in the slot, returning the one it replaces.
    pub fn install(&self, stepper: Stepper<P, T, O, L>) -> Option<Stepper<P, T, O, L>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(stepper))
    }

    /// Removes the stepper from the slot.
    pub fn take(&self) -> Option<Stepper<P, T, O, L>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Runs `f` on the installed stepper inside one critical section.
    ///
    /// Returns `None` when nothing is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut Stepper<P, T, O, L>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }

    /// Ramp timer handler.
    pub fn on_tick(&self) -> Option<TickOutcome> {
        self.with(Stepper::on_tick)
    }

    /// Limit switch handler.
    pub fn on_limit_edge(&self, limit: Limit) {
        self.with(|stepper| stepper.on_limit_edge(limit));
    }

    /// See [`Stepper::move_velocity`]. Returns false when nothing is installed.
    pub fn move_velocity(&self, velocity: f32, acceleration: f32) -> bool {
        self.with(|stepper| stepper.move_velocity(velocity, acceleration))
            .unwrap_or(false)
    }

    /// See [`Stepper::stop`].
    pub fn stop(&self) {
        self.with(Stepper::stop);
    }

    /// Snapshot of the motion state.
    pub fn status(&self) -> Option<StepperStatus> {
        self.with(|stepper| stepper.status())
    }

    /// See [`Stepper::check_for_stall`]. Returns false when nothing is installed.
    pub fn check_for_stall(&self, encoder_value: u32) -> bool {
        self.with(|stepper| stepper.check_for_stall(encoder_value))
            .unwrap_or(false)
    }
}

impl<P, T, O, L> Default for SharedStepper<P, T, O, L> {
    fn default() -> Self {
        Self::new()
    }
}
