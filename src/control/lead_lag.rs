use super::{Controller, OutputLimits};

/// First-order lead/lag compensator.
///
/// Implements `u[k] = a·u[k-1] + b·e[k] + c·e[k-1]` with `e = reference - y`.
/// The unclamped output is fed back so the difference equation is not
/// distorted by saturation; only the returned value is clamped.
#[derive(Debug, Clone)]
pub struct LeadLag {
    a: f32,
    b: f32,
    c: f32,
    reference: f32,
    limits: OutputLimits,

    prev_output: f32,
    prev_error: f32,
}

impl LeadLag {
    /// Creates a compensator from the difference equation coefficients.
    pub fn new(a: f32, b: f32, c: f32) -> Self {
        Self {
            a,
            b,
            c,
            reference: 0.0,
            limits: OutputLimits::default(),
            prev_output: 0.0,
            prev_error: 0.0,
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

    pub fn set_coefficients(&mut self, a: f32, b: f32, c: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
    }

    /// Returns `(a, b, c)`.
    pub fn coefficients(&self) -> (f32, f32, f32) {
        (self.a, self.b, self.c)
    }

    pub fn set_limits(&mut self, limits: OutputLimits) {
        self.limits = limits;
    }

    pub fn limits(&self) -> OutputLimits {
        self.limits
    }
}

impl Controller for LeadLag {
    fn compute(&mut self, measurement: f32) -> f32 {
        let error = self.reference - measurement;
        let output = self.a * self.prev_output + self.b * error + self.c * self.prev_error;

        self.prev_output = output;
        self.prev_error = error;

        self.limits.clamp(output).0
    }

    fn reset(&mut self) {
        self.prev_output = 0.0;
        self.prev_error = 0.0;
    }

    fn set_reference(&mut self, reference: f32) {
        self.reference = reference;
    }

    fn reference(&self) -> f32 {
        self.reference
    }
}
