use crate::command::StepperAction;
use crate::config::StepperConfig;
use crate::hardware::{LimitInput, OutputLine, PulseGenerator, RampTimer, StepperHardware};
use crate::ramp::RampState;
use crate::stepper::{Stepper, StepperStatus};
use crate::types::{Limit, TickOutcome};

/// An identifier for an axis within a collection.
///
/// This is a simple wrapper around `usize` that provides type safety for axis
/// identifiers. The id is also the slot index, so interrupt handlers can route
/// to their axis without a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisId(pub usize);

impl From<usize> for AxisId {
    fn from(id: usize) -> Self {
        AxisId(id)
    }
}

impl From<AxisId> for usize {
    fn from(id: AxisId) -> Self {
        id.0
    }
}

/// Errors that can occur during collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionError {
    /// The specified axis ID does not exist in the collection.
    InvalidAxisId(AxisId),

    /// Attempted to add an axis with an ID that already exists.
    DuplicateAxisId(AxisId),

    /// The collection is full and cannot accept more axes.
    CollectionFull,

    /// The axis ID exceeds the collection's capacity.
    AxisIdOutOfBounds { id: AxisId, capacity: usize },
}

impl core::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CollectionError::InvalidAxisId(id) => {
                write!(f, "axis ID {} does not exist in collection", id.0)
            }
            CollectionError::DuplicateAxisId(id) => {
                write!(f, "axis ID {} already exists in collection", id.0)
            }
            CollectionError::CollectionFull => {
                write!(f, "collection is full, cannot add more axes")
            }
            CollectionError::AxisIdOutOfBounds { id, capacity } => {
                write!(
                    f,
                    "axis ID {} exceeds collection capacity of {}",
                    id.0, capacity
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollectionError {}

/// Fixed-capacity set of independent axes addressed by [`AxisId`].
///
/// Each axis owns its own peripherals and ramps on its own. The collection
/// only routes commands and interrupt callbacks; it does not coordinate
/// motion between axes.
///
/// # Type Parameters
/// * `P`, `T`, `O`, `L` - Hardware implementation types (same for all axes)
/// * `MAX_AXES` - Maximum number of axes this collection can hold
pub struct AxisCollection<P, T, O, L, const MAX_AXES: usize> {
    axes: [Option<Stepper<P, T, O, L>>; MAX_AXES],
}

impl<P, T, O, L, const MAX_AXES: usize> AxisCollection<P, T, O, L, MAX_AXES>
where
    P: PulseGenerator,
    T: RampTimer,
    O: OutputLine,
    L: LimitInput,
{
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self {
            axes: core::array::from_fn(|_| None),
        }
    }

    /// Sets up an axis and stores it under `id`.
    ///
    /// # Errors
    /// * `DuplicateAxisId` - An axis with this ID already exists
    /// * `AxisIdOutOfBounds` - The ID exceeds the collection's capacity
    pub fn add_axis(
        &mut self,
        id: AxisId,
        config: StepperConfig,
        hardware: StepperHardware<P, T, O, L>,
    ) -> Result<(), CollectionError> {
        let idx = id.0;

        if idx >= MAX_AXES {
            return Err(CollectionError::AxisIdOutOfBounds {
                id,
                capacity: MAX_AXES,
            });
        }

        if self.axes[idx].is_some() {
            return Err(CollectionError::DuplicateAxisId(id));
        }

        self.axes[idx] = Some(Stepper::new(config, hardware));
        Ok(())
    }

    /// Stores an axis in the first free slot and returns its ID.
    ///
    /// # Errors
    /// * `CollectionFull` - Every slot is taken
    pub fn push_axis(
        &mut self,
        config: StepperConfig,
        hardware: StepperHardware<P, T, O, L>,
    ) -> Result<AxisId, CollectionError> {
        let idx = self
            .axes
            .iter()
            .position(Option::is_none)
            .ok_or(CollectionError::CollectionFull)?;

        self.axes[idx] = Some(Stepper::new(config, hardware));
        Ok(AxisId(idx))
    }

    /// Routes a command to the specified axis.
    ///
    /// # Returns
    /// * `Ok(enabled)` - Whether the axis is enabled after the action
    /// * `Err` - Invalid axis ID
    pub fn handle_command(
        &mut self,
        id: AxisId,
        action: StepperAction,
    ) -> Result<bool, CollectionError> {
        Ok(self.axis_mut(id)?.handle_action(action))
    }

    /// Ramp tick for one axis.
    pub fn on_tick(&mut self, id: AxisId) -> Result<TickOutcome, CollectionError> {
        Ok(self.axis_mut(id)?.on_tick())
    }

    /// Ticks every ramping axis, for boards that share one tick source.
    ///
    /// # Returns
    /// * `TickOutcome::Pending` - At least one axis is still ramping
    /// * `TickOutcome::Settled` - Every axis reached its target
    pub fn tick_all(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::Settled;

        for stepper in self.axes.iter_mut().flatten() {
            if stepper.ramp_state() == RampState::Ramping && stepper.on_tick().is_pending() {
                outcome = TickOutcome::Pending;
            }
        }

        outcome
    }

    /// Limit switch edge for one axis.
    pub fn on_limit_edge(&mut self, id: AxisId, limit: Limit) -> Result<(), CollectionError> {
        self.axis_mut(id)?.on_limit_edge(limit);
        Ok(())
    }

    /// Feeds an encoder sample to one axis' stall detector.
    pub fn check_for_stall(&mut self, id: AxisId, encoder_value: u32) -> Result<bool, CollectionError> {
        Ok(self.axis_mut(id)?.check_for_stall(encoder_value))
    }

    /// Stops every axis.
    pub fn stop_all(&mut self) {
        for stepper in self.axes.iter_mut().flatten() {
            stepper.stop();
        }
    }

    /// Returns the motion state of the specified axis.
    ///
    /// # Errors
    /// Returns `InvalidAxisId` if the axis does not exist in the collection.
    pub fn status(&self, id: AxisId) -> Result<StepperStatus, CollectionError> {
        Ok(self.axis(id)?.status())
    }

    /// Returns the specified axis.
    pub fn axis(&self, id: AxisId) -> Result<&Stepper<P, T, O, L>, CollectionError> {
        self.axes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(CollectionError::InvalidAxisId(id))
    }

    /// Returns the specified axis mutably.
    pub fn axis_mut(&mut self, id: AxisId) -> Result<&mut Stepper<P, T, O, L>, CollectionError> {
        self.axes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CollectionError::InvalidAxisId(id))
    }

    /// Returns the number of axes currently in the collection.
    pub fn len(&self) -> usize {
        self.axes.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if the collection contains no axes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the collection contains an axis with the given ID.
    pub fn contains(&self, id: AxisId) -> bool {
        let idx = id.0;
        idx < MAX_AXES && self.axes[idx].is_some()
    }
}

impl<P, T, O, L, const MAX_AXES: usize> Default for AxisCollection<P, T, O, L, MAX_AXES>
where
    P: PulseGenerator,
    T: RampTimer,
    O: OutputLine,
    L: LimitInput,
{
    fn default() -> Self {
        Self::new()
    }
}
