#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Stepper`**: Drives one axis toward a signed target velocity with a trapezoidal ramp
//! - **`RampMode`**: How the target is reached (`Instant` or `Linear(acceleration)`)
//! - **`StepperConfig`**: Velocity/acceleration limits, `kv` and clocking, built with a validating builder
//! - **`ClockPolicy`**: Hysteresis between the fast and slow pulse generator clock dividers
//! - **`PwmTiming`**: Pulse clock, dead zone and minimum velocity derived from the active divider
//! - **`PulseGenerator`**, **`RampTimer`**, **`OutputLine`**, **`LimitInput`**: Traits to implement for your hardware
//! - **`SharedStepper`**: Interrupt-safe wrapper for sharing an axis between handlers
//! - **`AxisCollection`**: Fixed-capacity set of axes addressed by `AxisId`
//! - **`StepperAction`**: Commands that can be sent to an axis
//! - **`RgbFader`**, **`Button`**, **`Pid`**, **`LeadLag`**, **`Lqr`**: Companion blocks for the same boards
//!
//! Velocities are in m/s, accelerations in m/s² and frequencies in Hz.
//! `kv` converts velocity into step pulses per second.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod clock;
pub mod collection;
pub mod colors;
pub mod command;
pub mod config;
pub mod control;
pub mod fader;
pub mod hardware;
pub mod math;
pub mod ramp;
pub mod shared;
pub mod stall;
pub mod stepper;
pub mod time;
pub mod types;

pub use button::{Button, ButtonConfig, ButtonEvent, ButtonState};
pub use clock::{ClockDivider, ClockPolicy, PwmTiming};
pub use collection::{AxisCollection, AxisId, CollectionError};
pub use command::{StepperAction, StepperCommand};
pub use config::{ConfigError, StepperConfig, StepperConfigBuilder};
pub use control::{ControlError, Controller, LeadLag, Lqr, OutputLimits, Pid};
pub use fader::{RgbFader, RgbLed, duty_cycle};
pub use hardware::{LimitInput, OutputLine, PulseGenerator, RampTimer, StepperHardware};
pub use math::map_range;
pub use ramp::{RampState, VelocityRamp};
pub use shared::SharedStepper;
pub use stall::StallDetector;
pub use stepper::{Stepper, StepperStatus};
pub use time::{Millis, TimeDuration};
pub use types::{Direction, Limit, RampMode, TickOutcome};
