// Scripted raw input for deterministic tests

use super::axis::RawAxis;
use super::frame::RawInputSource;
use std::collections::{HashMap, HashSet};

/// Raw input source with fixed device state
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    keys: HashSet<u8>,
    buttons: HashSet<u8>,
    axes: HashMap<RawAxis, f32>,
    gamepad: bool,
}

impl ScriptedInput {
    /// Nothing held, gamepad connected
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
            buttons: HashSet::new(),
            axes: HashMap::new(),
            gamepad: true,
        }
    }

    pub fn with_key(mut self, key: u8) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn with_button(mut self, button: u8) -> Self {
        self.buttons.insert(button);
        self
    }

    pub fn with_axis(mut self, axis: RawAxis, value: f32) -> Self {
        self.axes.insert(axis, value);
        self
    }

    pub fn without_gamepad(mut self) -> Self {
        self.gamepad = false;
        self
    }
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInputSource for ScriptedInput {
    fn is_key_down(&self, key: u8) -> bool {
        self.keys.contains(&key)
    }

    fn is_button_down(&self, button: u8) -> bool {
        self.buttons.contains(&button)
    }

    fn axis_value(&self, axis: RawAxis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    fn has_gamepad(&self) -> bool {
        self.gamepad
    }
}
