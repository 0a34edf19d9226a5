// Analog axis digitizer: sticks and triggers as press/trigger/repeat/release inputs

use super::frame::RawInputSource;
use super::state::{ButtonState, RepeatTiming};
use std::time::Duration;

/// Default reading above which an axis counts as pressed
pub const AXIS_THRESHOLD: f32 = 0.5;

/// Raw analog channels read from the gamepad
///
/// Stick Y channels are positive when pushed down. Triggers read `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

/// One bindable axis: a single stick direction or a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    LeftStickLeft,
    LeftStickRight,
    LeftStickUp,
    LeftStickDown,
    RightStickLeft,
    RightStickRight,
    RightStickUp,
    RightStickDown,
    LeftTrigger,
    RightTrigger,
}

impl AxisId {
    /// Number of bindable axes
    pub const COUNT: usize = 10;

    /// All axes in capture scan order
    pub const ALL: [AxisId; AxisId::COUNT] = [
        AxisId::LeftStickLeft,
        AxisId::LeftStickRight,
        AxisId::LeftStickUp,
        AxisId::LeftStickDown,
        AxisId::RightStickLeft,
        AxisId::RightStickRight,
        AxisId::RightStickUp,
        AxisId::RightStickDown,
        AxisId::LeftTrigger,
        AxisId::RightTrigger,
    ];

    /// Index inside the axis code range
    ///
    /// Triggers sit at 9 and 11 so saved codes stay stable.
    pub fn index(self) -> u8 {
        match self {
            AxisId::LeftStickLeft => 0x00,
            AxisId::LeftStickRight => 0x01,
            AxisId::LeftStickUp => 0x02,
            AxisId::LeftStickDown => 0x03,
            AxisId::RightStickLeft => 0x04,
            AxisId::RightStickRight => 0x05,
            AxisId::RightStickUp => 0x06,
            AxisId::RightStickDown => 0x07,
            AxisId::LeftTrigger => 0x09,
            AxisId::RightTrigger => 0x0B,
        }
    }

    /// Inverse of [`AxisId::index`]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.index() == index)
    }

    /// Position in [`AxisId::ALL`], used for state storage
    fn slot(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            AxisId::LeftStickLeft => "L-Stick Left",
            AxisId::LeftStickRight => "L-Stick Right",
            AxisId::LeftStickUp => "L-Stick Up",
            AxisId::LeftStickDown => "L-Stick Down",
            AxisId::RightStickLeft => "R-Stick Left",
            AxisId::RightStickRight => "R-Stick Right",
            AxisId::RightStickUp => "R-Stick Up",
            AxisId::RightStickDown => "R-Stick Down",
            AxisId::LeftTrigger => "Left Trigger",
            AxisId::RightTrigger => "Right Trigger",
        }
    }

    /// Raw channel this axis reads and whether the sign is flipped
    fn channel(self) -> (RawAxis, bool) {
        match self {
            AxisId::LeftStickLeft => (RawAxis::LeftStickX, true),
            AxisId::LeftStickRight => (RawAxis::LeftStickX, false),
            AxisId::LeftStickUp => (RawAxis::LeftStickY, true),
            AxisId::LeftStickDown => (RawAxis::LeftStickY, false),
            AxisId::RightStickLeft => (RawAxis::RightStickX, true),
            AxisId::RightStickRight => (RawAxis::RightStickX, false),
            AxisId::RightStickUp => (RawAxis::RightStickY, true),
            AxisId::RightStickDown => (RawAxis::RightStickY, false),
            AxisId::LeftTrigger => (RawAxis::LeftTrigger, false),
            AxisId::RightTrigger => (RawAxis::RightTrigger, false),
        }
    }

    /// Directional reading of this axis, positive toward its direction
    pub fn reading<S: RawInputSource + ?Sized>(self, source: &S) -> f32 {
        let (channel, negate) = self.channel();
        let value = source.axis_value(channel);
        if negate {
            -value
        } else {
            value
        }
    }
}

/// Converts every axis reading into digital state once per tick
#[derive(Debug, Clone)]
pub struct AxisDigitizer {
    threshold: f32,
    states: [ButtonState; AxisId::COUNT],
}

impl AxisDigitizer {
    /// Create a digitizer with the given press threshold
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            states: [ButtonState::default(); AxisId::COUNT],
        }
    }

    /// Read every axis from the source and advance its state
    ///
    /// Call exactly once per tick, after the raw device refresh.
    pub fn update<S: RawInputSource + ?Sized>(
        &mut self,
        source: &S,
        now: Duration,
        timing: &RepeatTiming,
    ) {
        for axis in AxisId::ALL {
            let down = source.has_gamepad() && axis.reading(source) > self.threshold;
            self.states[axis.slot()].step(down, now, timing);
        }
    }

    /// State of one axis for the current tick
    pub fn state(&self, axis: AxisId) -> &ButtonState {
        &self.states[axis.slot()]
    }

    /// Check if an axis is past the threshold
    pub fn is_pressed(&self, axis: AxisId) -> bool {
        self.state(axis).pressed
    }

    /// Check if an axis crossed the threshold this tick
    pub fn just_pressed(&self, axis: AxisId) -> bool {
        self.state(axis).just_pressed
    }

    /// Check if an axis fired a trigger or repeat pulse this tick
    pub fn repeating(&self, axis: AxisId) -> bool {
        self.state(axis).repeating
    }

    /// Check if an axis fell back under the threshold this tick
    pub fn just_released(&self, axis: AxisId) -> bool {
        self.state(axis).just_released
    }

    /// Clear all axis state
    pub fn reset(&mut self) {
        for state in &mut self.states {
            state.reset();
        }
    }
}

impl Default for AxisDigitizer {
    fn default() -> Self {
        Self::new(AXIS_THRESHOLD)
    }
}
