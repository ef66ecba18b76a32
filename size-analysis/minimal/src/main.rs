#![no_std]
#![no_main]

use cortex_m_rt::entry;
use palette::Srgb;
use panic_halt as _;
use ramp_drive::{
    Button, ButtonConfig, ClockDivider, Controller, Limit, LimitInput, Millis, OutputLimits,
    OutputLine, Pid, PulseGenerator, RampTimer, RgbFader, RgbLed, SharedStepper, Stepper,
    StepperConfig, StepperHardware,
};

// ============================================================================
// Minimal Hardware Implementations
// ============================================================================

/// Zero-size pulse generator for measuring library overhead
pub struct MinimalPulse;

impl PulseGenerator for MinimalPulse {
    fn set_clock_divider(&mut self, _divider: ClockDivider) {
        core::hint::black_box(());
    }

    fn period(&self) -> u32 {
        0
    }

    fn set_period(&mut self, period: u32, pulse_width: u32) {
        core::hint::black_box((period, pulse_width));
    }

    fn start(&mut self) {}

    fn stop(&mut self) {}
}

pub struct MinimalTimer;

impl RampTimer for MinimalTimer {
    fn set_frequency(&mut self, hz: u16) {
        core::hint::black_box(hz);
    }

    fn start(&mut self) {}

    fn stop(&mut self) {}
}

pub struct MinimalLine;

impl OutputLine for MinimalLine {
    fn set(&mut self, active: bool) {
        core::hint::black_box(active);
    }
}

pub struct MinimalLimit;

impl LimitInput for MinimalLimit {
    fn is_asserted(&self) -> bool {
        false
    }
}

pub struct MinimalLed;

impl RgbLed for MinimalLed {
    fn set_color(&mut self, _color: Srgb<u8>) {
        core::hint::black_box(());
    }
}

static AXIS: SharedStepper<MinimalPulse, MinimalTimer, MinimalLine, MinimalLimit> =
    SharedStepper::new();

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_library() {
    let config = StepperConfig::builder()
        .max_velocity(0.5)
        .max_acceleration(2.0)
        .kv(1000.0)
        .update_frequency(1000)
        .build();

    if let Ok(config) = config {
        let hardware = StepperHardware::new(
            MinimalPulse,
            MinimalTimer,
            MinimalLine,
            MinimalLine,
            MinimalLimit,
            MinimalLimit,
        );
        AXIS.install(Stepper::new(config, hardware));

        AXIS.move_velocity(0.3, 1.0);
        while let Some(outcome) = AXIS.on_tick() {
            if !outcome.is_pending() {
                break;
            }
        }
        AXIS.on_limit_edge(Limit::End);
        let _ = AXIS.check_for_stall(42);
        AXIS.stop();
        core::hint::black_box(AXIS.status());
    }

    let mut fader = RgbFader::new(MinimalLed, 1000);
    fader.set_color(Srgb::new(255, 64, 0), Millis(500));
    while fader.on_period().is_pending() {}
    core::hint::black_box(fader.current_color());

    let mut button = Button::new(ButtonConfig::default());
    core::hint::black_box(button.scan(true));

    let mut pid = Pid::new(1.0, 0.1, 0.01).with_limits(OutputLimits::new(-1.0, 1.0));
    core::hint::black_box(pid.compute(0.5));
}

#[entry]
fn main() -> ! {
    exercise_library();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
