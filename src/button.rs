//! Polled push-button debouncer with multi-click and long-press detection.

/// Button timing parameters, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Time between two [`Button::scan`] calls.
    pub interval_ms: u16,

    /// Debounce dead time after an edge.
    pub dead_time_ms: u16,

    /// Window after a release in which another press extends the click count.
    pub window_ms: u16,

    /// Hold time that turns a press into a long click.
    pub long_click_ms: u16,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            interval_ms: 10,
            dead_time_ms: 30,
            window_ms: 250,
            long_click_ms: 1000,
        }
    }
}

/// Debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Waiting for a press.
    #[default]
    Init,
    /// Pressed, waiting for release or long-click timeout.
    Down,
    /// Released, waiting out the dead time.
    Up,
    /// Counting further clicks inside the window.
    Count,
    /// Held past the long-click timeout.
    Held,
}

/// Events reported by [`Button::scan`]. The payload is the click count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// One or more short clicks, reported once the window closes.
    ShortClick(u8),
    /// Release after one or more long-click timeouts.
    LongClick(u8),
    /// Every long-click timeout while the button stays down.
    LongClickTick(u8),
}

/// Push-button debouncer.
#[derive(Debug, Clone)]
pub struct Button {
    config: ButtonConfig,
    state: ButtonState,
    elapsed_ms: u16,
    short_count: u8,
    long_count: u8,
}

impl Button {
    /// Creates a debouncer waiting for the first press.
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            state: ButtonState::Init,
            elapsed_ms: 0,
            short_count: 0,
            long_count: 0,
        }
    }

    /// Advances the state machine by one interval.
    ///
    /// Call every `interval_ms` with the current (raw) pin level.
    pub fn scan(&mut self, pressed: bool) -> Option<ButtonEvent> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.config.interval_ms);

        match self.state {
            ButtonState::Init => {
                if pressed {
                    self.state = ButtonState::Down;
                    self.reset_counters();
                }
                None
            }
            ButtonState::Down => {
                if !pressed && self.elapsed_ms > self.config.dead_time_ms {
                    self.state = ButtonState::Up;
                    self.elapsed_ms = 0;
                    None
                } else if pressed && self.elapsed_ms > self.config.long_click_ms {
                    self.state = ButtonState::Held;
                    Some(self.long_click_tick())
                } else {
                    None
                }
            }
            ButtonState::Up => {
                if self.elapsed_ms >= self.config.dead_time_ms {
                    self.short_count = self.short_count.wrapping_add(1);
                    self.state = ButtonState::Count;
                }
                None
            }
            ButtonState::Count => {
                if pressed {
                    self.state = ButtonState::Down;
                    self.elapsed_ms = 0;
                    None
                } else if self.elapsed_ms > self.config.window_ms {
                    let clicks = self.short_count;
                    self.state = ButtonState::Init;
                    self.reset_counters();
                    Some(ButtonEvent::ShortClick(clicks))
                } else {
                    None
                }
            }
            ButtonState::Held => {
                if !pressed {
                    let clicks = self.long_count;
                    self.state = ButtonState::Init;
                    self.reset_counters();
                    Some(ButtonEvent::LongClick(clicks))
                } else if self.elapsed_ms > self.config.long_click_ms {
                    Some(self.long_click_tick())
                } else {
                    None
                }
            }
        }
    }

    /// Current debouncer state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Forgets any click in progress.
    pub fn reset(&mut self) {
        self.state = ButtonState::Init;
        self.reset_counters();
    }

    fn long_click_tick(&mut self) -> ButtonEvent {
        self.long_count = self.long_count.wrapping_add(1);
        self.elapsed_ms = 0;
        ButtonEvent::LongClickTick(self.long_count)
    }

    fn reset_counters(&mut self) {
        self.elapsed_ms = 0;
        self.short_count = 0;
        self.long_count = 0;
    }
}
