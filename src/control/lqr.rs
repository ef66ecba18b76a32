use super::{ControlError, OutputLimits};

/// Full state-feedback controller with `N` states.
///
/// Computes `u = Σ k[i]·(reference[i] - state[i])`, clamped to the limits.
/// States are written by the caller before each [`Lqr::compute`].
#[derive(Debug, Clone)]
pub struct Lqr<const N: usize> {
    gains: [f32; N],
    references: [f32; N],
    states: [f32; N],
    limits: OutputLimits,
}

impl<const N: usize> Lqr<N> {
    /// Creates a controller with zero references and states.
    pub fn new(gains: [f32; N], limits: OutputLimits) -> Self {
        Self {
            gains,
            references: [0.0; N],
            states: [0.0; N],
            limits,
        }
    }

    /// Sets all references.
    pub fn with_references(mut self, references: [f32; N]) -> Self {
        self.references = references;
        self
    }

    /// Computes the clamped control action from the stored states.
    pub fn compute(&self) -> f32 {
        let output: f32 = self
            .gains
            .iter()
            .zip(self.references.iter().zip(self.states.iter()))
            .map(|(k, (reference, state))| k * (reference - state))
            .sum();

        self.limits.clamp(output).0
    }

    /// Stores all states at once and computes the control action.
    pub fn compute_with(&mut self, states: [f32; N]) -> f32 {
        self.states = states;
        self.compute()
    }

    pub fn set_gain(&mut self, index: usize, gain: f32) -> Result<(), ControlError> {
        *slot(&mut self.gains, index)? = gain;
        Ok(())
    }

    pub fn gain(&self, index: usize) -> Result<f32, ControlError> {
        self.gains.get(index).copied().ok_or(out_of_range::<N>(index))
    }

    pub fn set_reference(&mut self, index: usize, reference: f32) -> Result<(), ControlError> {
        *slot(&mut self.references, index)? = reference;
        Ok(())
    }

    pub fn reference(&self, index: usize) -> Result<f32, ControlError> {
        self.references.get(index).copied().ok_or(out_of_range::<N>(index))
    }

    pub fn set_state(&mut self, index: usize, state: f32) -> Result<(), ControlError> {
        *slot(&mut self.states, index)? = state;
        Ok(())
    }

    pub fn state(&self, index: usize) -> Result<f32, ControlError> {
        self.states.get(index).copied().ok_or(out_of_range::<N>(index))
    }

    pub fn set_limits(&mut self, limits: OutputLimits) {
        self.limits = limits;
    }

    pub fn limits(&self) -> OutputLimits {
        self.limits
    }
}

fn slot<const N: usize>(values: &mut [f32; N], index: usize) -> Result<&mut f32, ControlError> {
    values.get_mut(index).ok_or(out_of_range::<N>(index))
}

fn out_of_range<const N: usize>(index: usize) -> ControlError {
    ControlError::IndexOutOfRange { index, len: N }
}
