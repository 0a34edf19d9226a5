// Per-tick snapshot of every physical input

use super::axis::{AxisDigitizer, AxisId, RawAxis};
use super::code::{InputCode, PhysicalCode, GAMEPAD_BUTTON_SLOTS};
use super::state::{ButtonState, RepeatTiming};
use std::time::Duration;

/// Number of keyboard virtual-key slots
const KEYBOARD_SLOTS: usize = 256;

/// Raw device queries provided by the host
pub trait RawInputSource {
    /// Is the keyboard key with this virtual-key code down
    fn is_key_down(&self, key: u8) -> bool;

    /// Is the gamepad button with this index down
    fn is_button_down(&self, button: u8) -> bool;

    /// Current reading of an analog channel
    fn axis_value(&self, axis: RawAxis) -> f32;

    /// Whether a gamepad is connected
    fn has_gamepad(&self) -> bool;
}

/// Input state for every key, button and axis, refreshed once per tick
///
/// All queries during a tick read the same snapshot.
#[derive(Debug, Clone)]
pub struct InputFrameState {
    keys: Vec<ButtonState>,
    buttons: Vec<ButtonState>,
    axes: AxisDigitizer,
    timing: RepeatTiming,
    has_gamepad: bool,
    now: Duration,
    tick: u64,
}

impl InputFrameState {
    /// Create an empty frame state
    pub fn new(axis_threshold: f32, timing: RepeatTiming) -> Self {
        Self {
            keys: vec![ButtonState::default(); KEYBOARD_SLOTS],
            buttons: vec![ButtonState::default(); GAMEPAD_BUTTON_SLOTS],
            axes: AxisDigitizer::new(axis_threshold),
            timing,
            has_gamepad: false,
            now: Duration::ZERO,
            tick: 0,
        }
    }

    /// Read the raw source and advance every input by one tick
    ///
    /// Keys and buttons are refreshed first, then the axis digitizer.
    pub fn update<S: RawInputSource + ?Sized>(&mut self, source: &S, now: Duration) {
        self.now = now;
        self.tick += 1;
        self.has_gamepad = source.has_gamepad();

        for (key, state) in self.keys.iter_mut().enumerate() {
            state.step(source.is_key_down(key as u8), now, &self.timing);
        }

        for (button, state) in self.buttons.iter_mut().enumerate() {
            let down = self.has_gamepad && source.is_button_down(button as u8);
            state.step(down, now, &self.timing);
        }

        self.axes.update(source, now, &self.timing);
    }

    /// State for a physical code, `None` for unbound or unknown codes
    pub fn state(&self, code: PhysicalCode) -> Option<&ButtonState> {
        match code.decode()? {
            InputCode::Keyboard(key) => self.keys.get(key as usize),
            InputCode::Button(button) => self.buttons.get(button as usize),
            InputCode::Axis(axis) => Some(self.axes.state(axis)),
        }
    }

    /// State of one axis
    pub fn axis(&self, axis: AxisId) -> &ButtonState {
        self.axes.state(axis)
    }

    /// Whether a gamepad was connected during the last update
    pub fn has_gamepad(&self) -> bool {
        self.has_gamepad
    }

    /// Clock value of the last update
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of updates so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Forget all held inputs
    ///
    /// Inputs still held afterwards register as new presses on the next update.
    pub fn reset(&mut self) {
        for state in self.keys.iter_mut().chain(self.buttons.iter_mut()) {
            state.reset();
        }
        self.axes.reset();
    }
}

impl Default for InputFrameState {
    fn default() -> Self {
        Self::new(super::axis::AXIS_THRESHOLD, RepeatTiming::default())
    }
}
