//! Tick-driven colour fader for an 8-bit RGB LED.
//!
//! [`RgbFader`] follows the same pattern as the stepper ramp: a command sets
//! the target, and a periodic tick (here the LED's own PWM period interrupt)
//! moves the output toward it one bounded step at a time.

use palette::Srgb;

use crate::math::map_range;
use crate::time::TimeDuration;
use crate::types::TickOutcome;

/// Trait for abstracting RGB LED hardware.
pub trait RgbLed {
    /// Sets the LED to the specified 8-bit RGB color.
    ///
    /// Use [`duty_cycle`] to convert each component to a PWM compare value.
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_color(&mut self, color: Srgb<u8>);
}

/// Maps a color component onto a PWM pulse width in `1..=period`.
///
/// The minimum is one tick rather than zero so the channel never loses its
/// compare event.
#[inline]
pub fn duty_cycle(component: u8, period: u32) -> u32 {
    map_range(component as f32, 0.0, 255.0, 1.0, period as f32) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FadeProgress {
    counter: u32,
    skip: [u32; 3],
}

/// Fades an RGB LED between colors from the PWM period interrupt.
pub struct RgbFader<L: RgbLed> {
    led: L,
    pwm_frequency: u32,
    current: Srgb<u8>,
    target: Srgb<u8>,
    fade_steps: u32,
    progress: Option<FadeProgress>,
}

impl<L: RgbLed> RgbFader<L> {
    /// Creates a fader for `led` ticking at `pwm_frequency` Hz and turns the LED off.
    pub fn new(mut led: L, pwm_frequency: u32) -> Self {
        let off = Srgb::new(0, 0, 0);
        led.set_color(off);

        Self {
            led,
            pwm_frequency,
            current: off,
            target: off,
            fade_steps: 0,
            progress: None,
        }
    }

    /// Sets a new target color reached over `fade`.
    ///
    /// A zero fade applies the color on the next period. Setting a color
    /// while fading restarts the fade from the current color.
    pub fn set_color(&mut self, color: Srgb<u8>, fade: impl TimeDuration) {
        let steps = fade.as_millis().saturating_mul(self.pwm_frequency as u64) / 1000;

        self.target = color;
        self.fade_steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.progress = None;
    }

    /// PWM period handler.
    ///
    /// Moves each channel at most one count toward the target and pushes the
    /// color to the LED only when it changed.
    pub fn on_period(&mut self) -> TickOutcome {
        let previous = self.current;

        if self.fade_steps != 0 && self.current != self.target {
            let progress = match self.progress {
                Some(progress) => progress,
                None => FadeProgress {
                    counter: 0,
                    skip: [
                        step_skip(self.target.red, self.current.red, self.fade_steps),
                        step_skip(self.target.green, self.current.green, self.fade_steps),
                        step_skip(self.target.blue, self.current.blue, self.fade_steps),
                    ],
                },
            };

            let counter = progress.counter + 1;
            let [skip_r, skip_g, skip_b] = progress.skip;

            self.current.red = approach(self.current.red, self.target.red, skip_r, counter);
            self.current.green = approach(self.current.green, self.target.green, skip_g, counter);
            self.current.blue = approach(self.current.blue, self.target.blue, skip_b, counter);

            if counter >= self.fade_steps {
                self.current = self.target;
                self.progress = None;
            } else {
                self.progress = Some(FadeProgress { counter, ..progress });
            }
        } else {
            self.current = self.target;
            self.progress = None;
        }

        if self.current != previous {
            self.led.set_color(self.current);
        }

        if self.current == self.target {
            TickOutcome::Settled
        } else {
            TickOutcome::Pending
        }
    }

    /// Color currently shown.
    pub fn current_color(&self) -> Srgb<u8> {
        self.current
    }

    /// Color being faded to.
    pub fn target_color(&self) -> Srgb<u8> {
        self.target
    }

    /// Returns true while the shown color differs from the target.
    pub fn is_fading(&self) -> bool {
        self.current != self.target
    }

    /// Number of periods the active fade spans.
    pub fn fade_steps(&self) -> u32 {
        self.fade_steps
    }

    /// PWM frequency in Hz.
    pub fn pwm_frequency(&self) -> u32 {
        self.pwm_frequency
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the fader and returns the LED.
    pub fn into_led(self) -> L {
        self.led
    }
}

/// Periods between one-count changes of a channel.
///
/// Zero means the channel is already at its target.
fn step_skip(target: u8, current: u8, steps: u32) -> u32 {
    let diff = target.abs_diff(current) as u32;

    if diff == 0 {
        0
    } else if diff >= steps {
        1
    } else {
        (steps + diff / 2) / diff
    }
}

#[inline]
fn approach(value: u8, target: u8, skip: u32, counter: u32) -> u8 {
    if skip == 0 || value == target || counter % skip != 0 {
        value
    } else if target > value {
        value + 1
    } else {
        value - 1
    }
}
