//! Axis configuration and its validating builder.

use crate::clock::{ClockDivider, ClockPolicy};

/// Motion limits and timing constants of one axis.
///
/// Built through [`StepperConfig::builder`], which rejects values that would
/// make the ramp arithmetic meaningless (zero update rate, non-positive
/// limits). Once built, the controller treats the configuration as trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperConfig {
    /// Maximum velocity magnitude in m/s.
    pub max_velocity: f32,

    /// Maximum acceleration in m/s².
    pub max_acceleration: f32,

    /// Pulses per second per m/s.
    pub kv: f32,

    /// Rate of the velocity ramp tick in Hz.
    pub update_frequency: u16,

    /// System clock feeding the pulse generator divider, in Hz.
    pub base_clock_hz: u32,

    /// Divider switching policy.
    pub clock_policy: ClockPolicy,

    /// Divider active at power-up.
    pub initial_divider: ClockDivider,
}

impl StepperConfig {
    /// Creates a builder with no limits set.
    pub fn builder() -> StepperConfigBuilder {
        StepperConfigBuilder::new()
    }

    /// Velocity change applied per ramp tick for `acceleration`.
    #[inline]
    pub fn velocity_step(&self, acceleration: f32) -> f32 {
        acceleration / self.update_frequency as f32
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Maximum velocity missing, non-positive or not finite.
    InvalidMaxVelocity,

    /// Maximum acceleration missing, non-positive or not finite.
    InvalidMaxAcceleration,

    /// Velocity-to-frequency constant missing, non-positive or not finite.
    InvalidKv,

    /// Ramp update frequency is zero.
    ZeroUpdateFrequency,

    /// Base clock is zero.
    ZeroBaseClock,

    /// Slow threshold above the fast threshold leaves no hysteresis band.
    InvertedClockThresholds,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidMaxVelocity => {
                write!(f, "maximum velocity must be a positive finite value")
            }
            ConfigError::InvalidMaxAcceleration => {
                write!(f, "maximum acceleration must be a positive finite value")
            }
            ConfigError::InvalidKv => {
                write!(f, "kv must be a positive finite value")
            }
            ConfigError::ZeroUpdateFrequency => {
                write!(f, "velocity update frequency must be non-zero")
            }
            ConfigError::ZeroBaseClock => {
                write!(f, "base clock must be non-zero")
            }
            ConfigError::InvertedClockThresholds => {
                write!(
                    f,
                    "slow clock threshold must not exceed the fast clock threshold"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Builder for [`StepperConfig`].
#[derive(Debug, Clone, Copy)]
pub struct StepperConfigBuilder {
    max_velocity: f32,
    max_acceleration: f32,
    kv: f32,
    update_frequency: u16,
    base_clock_hz: u32,
    clock_policy: ClockPolicy,
    initial_divider: ClockDivider,
}

impl StepperConfigBuilder {
    /// Creates a builder with an 80 MHz base clock and the default clock policy.
    pub fn new() -> Self {
        Self {
            max_velocity: 0.0,
            max_acceleration: 0.0,
            kv: 0.0,
            update_frequency: 0,
            base_clock_hz: 80_000_000,
            clock_policy: ClockPolicy::default(),
            initial_divider: ClockDivider::Div1,
        }
    }

    /// Sets the maximum velocity in m/s.
    pub fn max_velocity(mut self, velocity: f32) -> Self {
        self.max_velocity = velocity;
        self
    }

    /// Sets the maximum acceleration in m/s².
    pub fn max_acceleration(mut self, acceleration: f32) -> Self {
        self.max_acceleration = acceleration;
        self
    }

    /// Sets the pulses-per-second per m/s constant.
    pub fn kv(mut self, kv: f32) -> Self {
        self.kv = kv;
        self
    }

    /// Sets the ramp tick rate in Hz.
    pub fn update_frequency(mut self, hz: u16) -> Self {
        self.update_frequency = hz;
        self
    }

    /// Sets the system clock feeding the pulse generator.
    pub fn base_clock_hz(mut self, hz: u32) -> Self {
        self.base_clock_hz = hz;
        self
    }

    /// Sets the divider switching policy.
    pub fn clock_policy(mut self, policy: ClockPolicy) -> Self {
        self.clock_policy = policy;
        self
    }

    /// Sets the divider active at power-up.
    pub fn initial_divider(mut self, divider: ClockDivider) -> Self {
        self.initial_divider = divider;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    /// * `InvalidMaxVelocity`, `InvalidMaxAcceleration`, `InvalidKv` - limit not positive and finite
    /// * `ZeroUpdateFrequency` - ramp tick rate is zero
    /// * `ZeroBaseClock` - base clock is zero
    /// * `InvertedClockThresholds` - `slow_below_hz` above `fast_above_hz`
    pub fn build(self) -> Result<StepperConfig, ConfigError> {
        if !is_positive(self.max_velocity) {
            return Err(ConfigError::InvalidMaxVelocity);
        }
        if !is_positive(self.max_acceleration) {
            return Err(ConfigError::InvalidMaxAcceleration);
        }
        if !is_positive(self.kv) {
            return Err(ConfigError::InvalidKv);
        }
        if self.update_frequency == 0 {
            return Err(ConfigError::ZeroUpdateFrequency);
        }
        if self.base_clock_hz == 0 {
            return Err(ConfigError::ZeroBaseClock);
        }
        if self.clock_policy.slow_below_hz > self.clock_policy.fast_above_hz {
            return Err(ConfigError::InvertedClockThresholds);
        }

        Ok(StepperConfig {
            max_velocity: self.max_velocity,
            max_acceleration: self.max_acceleration,
            kv: self.kv,
            update_frequency: self.update_frequency,
            base_clock_hz: self.base_clock_hz,
            clock_policy: self.clock_policy,
            initial_divider: self.initial_divider,
        })
    }
}

impl Default for StepperConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
