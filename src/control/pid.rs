use super::{Controller, OutputLimits};

/// PID controller with conditional integration and derivative on measurement.
///
/// The integrator only accumulates while the previous output was inside the
/// limits, which keeps it from winding up during saturation. The derivative
/// acts on the measurement instead of the error so reference steps do not
/// kick the output.
#[derive(Debug, Clone)]
pub struct Pid {
    kp: f32,
    ki: f32,
    kd: f32,
    reference: f32,
    limits: OutputLimits,

    error_sum: f32,
    prev_measurement: Option<f32>,
    saturated: bool,
}

impl Pid {
    /// Creates a controller with a zero reference and output limits of ±1.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            reference: 0.0,
            limits: OutputLimits::default(),
            error_sum: 0.0,
            prev_measurement: None,
            saturated: false,
        }
    }

    /// Sets output limits.
    pub fn with_limits(mut self, limits: OutputLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the reference.
    pub fn with_reference(mut self, reference: f32) -> Self {
        self.reference = reference;
        self
    }

    pub fn set_gains(&mut self, kp: f32, ki: f32, kd: f32) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    /// Returns `(kp, ki, kd)`.
    pub fn gains(&self) -> (f32, f32, f32) {
        (self.kp, self.ki, self.kd)
    }

    pub fn set_limits(&mut self, limits: OutputLimits) {
        self.limits = limits;
    }

    pub fn limits(&self) -> OutputLimits {
        self.limits
    }

    /// Returns true if the last output was clamped.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }
}

impl Controller for Pid {
    fn compute(&mut self, measurement: f32) -> f32 {
        let error = self.reference - measurement;

        if !self.saturated {
            self.error_sum += error;
        }

        // No derivative on the first sample
        let derivative = self
            .prev_measurement
            .map_or(0.0, |prev| prev - measurement);
        self.prev_measurement = Some(measurement);

        let output = self.kp * error + self.ki * self.error_sum + self.kd * derivative;
        let (output, saturated) = self.limits.clamp(output);
        self.saturated = saturated;

        output
    }

    fn reset(&mut self) {
        self.error_sum = 0.0;
        self.prev_measurement = None;
        self.saturated = false;
    }

    fn set_reference(&mut self, reference: f32) {
        self.reference = reference;
    }

    fn reference(&self) -> f32 {
        self.reference
    }
}
