//! Command-based control for axes.

/// Actions for controlling an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperAction {
    /// Move toward `velocity` (m/s, signed). `acceleration` in m/s², zero or
    /// negative for an instant change.
    Move { velocity: f32, acceleration: f32 },
    /// Stop immediately.
    Stop,
}

/// Command targeting a specific axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperCommand<Id> {
    pub axis_id: Id,
    pub action: StepperAction,
}

impl<Id> StepperCommand<Id> {
    /// Creates command.
    pub fn new(axis_id: Id, action: StepperAction) -> Self {
        Self { axis_id, action }
    }

    /// Creates a move command.
    pub fn move_to(axis_id: Id, velocity: f32, acceleration: f32) -> Self {
        Self::new(
            axis_id,
            StepperAction::Move {
                velocity,
                acceleration,
            },
        )
    }

    /// Creates a stop command.
    pub fn stop(axis_id: Id) -> Self {
        Self::new(axis_id, StepperAction::Stop)
    }
}
