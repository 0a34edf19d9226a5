// Per-input press/trigger/repeat/release state with timed auto-repeat

use std::time::Duration;

/// Auto-repeat timing shared by every digital input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatTiming {
    /// Pause after the first trigger before sustained repeats begin
    pub initial_delay: Duration,
    /// Spacing between sustained repeats
    pub interval: Duration,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            interval: Duration::from_millis(100),
        }
    }
}

/// State of a single digital input across poll ticks
///
/// Timestamps are measured on the caller's monotonic clock. A fresh state
/// reads as released with both timers at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonState {
    /// Whether the input is down this tick
    pub pressed: bool,
    /// Whether the input was down on the previous tick
    pub previous: bool,
    /// Went down this tick
    pub just_pressed: bool,
    /// Went up this tick
    pub just_released: bool,
    /// Trigger pulse or sustained repeat pulse this tick
    pub repeating: bool,
    /// When the current press started
    pub triggered_at: Duration,
    /// When the last repeat pulse fired
    pub last_repeat_at: Duration,
}

impl ButtonState {
    /// Create a released state
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one poll tick with the input's current level
    pub fn step(&mut self, down: bool, now: Duration, timing: &RepeatTiming) {
        self.previous = self.pressed;
        self.pressed = down;
        self.just_pressed = self.pressed && !self.previous;
        self.just_released = !self.pressed && self.previous;

        if self.just_pressed {
            self.triggered_at = now;
        }

        self.repeating = self.just_pressed
            || (self.pressed
                && now >= self.triggered_at + timing.initial_delay
                && now >= self.last_repeat_at + timing.interval);

        if self.repeating {
            self.last_repeat_at = now;
        }
    }

    /// Forget everything, as if the input had never been touched
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
