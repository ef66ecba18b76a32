//! Pulse generator clock selection and dead-zone derivation.
//!
//! The pulse generator counts down a 16-bit period register clocked from the
//! system clock through a power-of-two divider. A fast clock gives fine
//! frequency resolution at high step rates but cannot reach low rates; a slow
//! clock reaches low rates at the cost of resolution. [`ClockPolicy`] picks
//! between the two with hysteresis and [`PwmTiming`] carries the parameters
//! that depend on the current choice.

/// Power-of-two divider between the system clock and the pulse generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDivider {
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
}

impl ClockDivider {
    /// Right shift applied to the base clock.
    #[inline]
    pub fn shift(self) -> u32 {
        match self {
            ClockDivider::Div1 => 0,
            ClockDivider::Div2 => 1,
            ClockDivider::Div4 => 2,
            ClockDivider::Div8 => 3,
            ClockDivider::Div16 => 4,
            ClockDivider::Div32 => 5,
            ClockDivider::Div64 => 6,
        }
    }

    /// Division ratio.
    #[inline]
    pub fn ratio(self) -> u32 {
        1 << self.shift()
    }
}

/// Hysteresis policy for switching the pulse generator clock.
///
/// Above `fast_above_hz` the fast divider is selected; below `slow_below_hz`
/// the slow one. Between the two thresholds the current divider is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockPolicy {
    pub fast_divider: ClockDivider,
    pub slow_divider: ClockDivider,
    pub fast_above_hz: u32,
    pub slow_below_hz: u32,
}

impl Default for ClockPolicy {
    fn default() -> Self {
        Self {
            fast_divider: ClockDivider::Div1,
            slow_divider: ClockDivider::Div64,
            fast_above_hz: 3000,
            slow_below_hz: 2000,
        }
    }
}

impl ClockPolicy {
    /// Returns the divider to switch to for `frequency`, or `None` when the
    /// current divider should stay.
    ///
    /// Never returns the divider that is already active, so callers can treat
    /// `None` as "touch nothing".
    pub fn select(&self, frequency: u32, current: ClockDivider) -> Option<ClockDivider> {
        if frequency > self.fast_above_hz && current != self.fast_divider {
            Some(self.fast_divider)
        } else if frequency < self.slow_below_hz && current == self.fast_divider {
            Some(self.slow_divider)
        } else {
            None
        }
    }
}

/// Parameters derived from the active clock divider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Active divider.
    pub divider: ClockDivider,

    /// Pulse generator clock in Hz.
    pub clock_hz: u32,

    /// Lowest frequency the 16-bit period register can produce, in Hz.
    pub dead_zone_hz: u32,

    /// Velocity matching `dead_zone_hz`, in m/s.
    pub min_velocity: f32,
}

impl PwmTiming {
    /// Derives the timing for `divider` from the system clock and the
    /// velocity-to-frequency constant `kv`.
    pub fn new(base_clock_hz: u32, divider: ClockDivider, kv: f32) -> Self {
        let clock_hz = base_clock_hz >> divider.shift();
        let dead_zone_hz = (clock_hz >> 16) + 1;

        Self {
            divider,
            clock_hz,
            dead_zone_hz,
            min_velocity: dead_zone_hz as f32 / kv,
        }
    }

    /// Period register value for `frequency` (clock ticks minus one).
    ///
    /// `frequency` must be non-zero.
    #[inline]
    pub fn period_for(&self, frequency: u32) -> u32 {
        (self.clock_hz / frequency).saturating_sub(1)
    }

    /// Returns true when `frequency` is below the dead zone.
    #[inline]
    pub fn in_dead_zone(&self, frequency: u32) -> bool {
        frequency < self.dead_zone_hz
    }
}
