//! Shared test infrastructure for ramp-drive integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use palette::Srgb;
use ramp_drive::{
    ClockDivider, LimitInput, OutputLine, PulseGenerator, RampTimer, RgbLed, Stepper,
    StepperConfig, StepperHardware, TickOutcome,
};

// ============================================================================
// Mock Stepper Hardware
// ============================================================================

/// Mock pulse generator that records divider switches and period writes
pub struct MockPulse {
    pub divider: Option<ClockDivider>,
    pub divider_history: heapless::Vec<ClockDivider, 16>,
    pub period: u32,
    pub pulse_width: u32,
    pub period_writes: usize,
    pub running: bool,
}

impl MockPulse {
    pub fn new() -> Self {
        Self {
            divider: None,
            divider_history: heapless::Vec::new(),
            period: 0,
            pulse_width: 0,
            period_writes: 0,
            running: false,
        }
    }
}

impl PulseGenerator for MockPulse {
    fn set_clock_divider(&mut self, divider: ClockDivider) {
        self.divider = Some(divider);
        let _ = self.divider_history.push(divider);
    }

    fn period(&self) -> u32 {
        self.period
    }

    fn set_period(&mut self, period: u32, pulse_width: u32) {
        self.period = period;
        self.pulse_width = pulse_width;
        self.period_writes += 1;
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

/// Mock ramp timer counting start/stop calls
pub struct MockTimer {
    pub frequency: u16,
    pub running: bool,
    pub starts: usize,
    pub stops: usize,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            frequency: 0,
            running: false,
            starts: 0,
            stops: 0,
        }
    }
}

impl RampTimer for MockTimer {
    fn set_frequency(&mut self, hz: u16) {
        self.frequency = hz;
    }

    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}

/// Mock output line that records every write
pub struct MockLine {
    pub active: bool,
    pub history: heapless::Vec<bool, 256>,
}

impl MockLine {
    pub fn new() -> Self {
        Self {
            active: false,
            history: heapless::Vec::new(),
        }
    }

    /// Number of level changes seen by the line
    pub fn transitions(&self) -> usize {
        self.history.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

impl OutputLine for MockLine {
    fn set(&mut self, active: bool) {
        self.active = active;
        let _ = self.history.push(active);
    }
}

/// Mock limit switch reading a cell the test can flip
pub struct MockLimit<'a> {
    pub state: &'a Cell<bool>,
}

impl LimitInput for MockLimit<'_> {
    fn is_asserted(&self) -> bool {
        self.state.get()
    }
}

/// Limit switch levels shared between a test and its stepper
pub struct Switches {
    pub start: Cell<bool>,
    pub end: Cell<bool>,
}

impl Switches {
    pub fn released() -> Self {
        Self {
            start: Cell::new(false),
            end: Cell::new(false),
        }
    }
}

pub type TestStepper<'a> = Stepper<MockPulse, MockTimer, MockLine, MockLimit<'a>>;

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb<u8>,
    color_history: heapless::Vec<Srgb<u8>, 256>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0, 0, 0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb<u8> {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb<u8>] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb<u8>) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// 0.5 m/s, 2 m/s², 1000 pulses per m/s, 100 Hz ramp.
///
/// Full speed is 500 Hz, so the axis settles on the slow clock
/// (dead zone 20 Hz, minimum velocity 0.02 m/s).
pub fn slow_config() -> StepperConfig {
    StepperConfig::builder()
        .max_velocity(0.5)
        .max_acceleration(2.0)
        .kv(1000.0)
        .update_frequency(100)
        .build()
        .unwrap()
}

/// 10 m/s, 100 m/s², 1000 pulses per m/s, 100 Hz ramp. Starts on the fast clock.
pub fn fast_config() -> StepperConfig {
    StepperConfig::builder()
        .max_velocity(10.0)
        .max_acceleration(100.0)
        .kv(1000.0)
        .update_frequency(100)
        .build()
        .unwrap()
}

pub fn new_stepper(config: StepperConfig, switches: &Switches) -> TestStepper<'_> {
    let hardware = StepperHardware::new(
        MockPulse::new(),
        MockTimer::new(),
        MockLine::new(),
        MockLine::new(),
        MockLimit {
            state: &switches.start,
        },
        MockLimit {
            state: &switches.end,
        },
    );
    Stepper::new(config, hardware)
}

/// Ticks until the ramp settles and returns the number of ticks taken
pub fn run_ramp(stepper: &mut TestStepper<'_>) -> usize {
    let mut ticks = 0;
    loop {
        ticks += 1;
        if stepper.on_tick() == TickOutcome::Settled {
            return ticks;
        }
        assert!(ticks < 10_000, "ramp did not converge");
    }
}
