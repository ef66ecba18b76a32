//! Core types shared by the axis controller and the tick-driven helpers.

/// Travel direction of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward the start of travel (negative velocity).
    #[default]
    Backward,

    /// Toward the end of travel (positive or zero velocity).
    Forward,
}

impl Direction {
    /// Returns the direction implied by the sign of `velocity`.
    ///
    /// Zero maps to `Forward`.
    #[inline]
    pub fn of(velocity: f32) -> Self {
        if velocity < 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// Returns the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Backward => Direction::Forward,
            Direction::Forward => Direction::Backward,
        }
    }

    /// Level of the direction line for this direction.
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// How the commanded velocity is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampMode {
    /// Jump to the target velocity on the next tick.
    Instant,

    /// Constant acceleration in m/s², always positive.
    Linear(f32),
}

impl RampMode {
    /// Builds a ramp mode from a raw acceleration request.
    ///
    /// Positive values are clamped to `max_acceleration`; zero and negative
    /// values select `Instant`. NaN falls back to the maximum acceleration.
    pub fn from_acceleration(acceleration: f32, max_acceleration: f32) -> Self {
        if acceleration.is_nan() {
            RampMode::Linear(max_acceleration)
        } else if acceleration > 0.0 {
            RampMode::Linear(acceleration.min(max_acceleration))
        } else {
            RampMode::Instant
        }
    }

    /// Acceleration in m/s², `None` for instant changes.
    #[inline]
    pub fn acceleration(&self) -> Option<f32> {
        match self {
            RampMode::Instant => None,
            RampMode::Linear(rate) => Some(*rate),
        }
    }
}

/// One of the two end-of-travel switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limit {
    /// Switch at the start of travel. Blocks backward motion.
    Start,

    /// Switch at the end of travel. Blocks forward motion.
    End,
}

impl Limit {
    /// Direction of motion that runs into this switch.
    #[inline]
    pub fn blocked_direction(self) -> Direction {
        match self {
            Limit::Start => Direction::Backward,
            Limit::End => Direction::Forward,
        }
    }
}

/// Result of one periodic tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// More ticks are needed to reach the target.
    Pending,

    /// Target reached; the tick source can be left off.
    Settled,
}

impl TickOutcome {
    /// Returns true when more ticks are required.
    #[inline]
    pub fn is_pending(self) -> bool {
        self == TickOutcome::Pending
    }
}
