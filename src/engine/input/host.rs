// Host input: window keyboard plus gamepad, as one raw input source

use super::axis::RawAxis;
use super::frame::RawInputSource;
use super::gamepad::GamepadInput;
use super::keyboard::KeyboardState;
use winit::event::KeyEvent;

/// Raw device state gathered from winit and gilrs
pub struct HostInput {
    keyboard: KeyboardState,
    gamepad: GamepadInput,
}

impl HostInput {
    /// Create a host source around an opened gamepad adapter
    pub fn new(gamepad: GamepadInput) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            gamepad,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.keyboard.process_event(event);
    }

    /// Drain gamepad events; call once per frame before updating input
    pub fn pump(&mut self) {
        self.gamepad.pump();
    }

    /// Release all keys, e.g. when the window loses focus
    pub fn release_keys(&mut self) {
        self.keyboard.clear();
    }

    /// Held-key tracker, for feeding keys directly
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }
}

impl RawInputSource for HostInput {
    fn is_key_down(&self, key: u8) -> bool {
        self.keyboard.is_down(key)
    }

    fn is_button_down(&self, button: u8) -> bool {
        self.gamepad.is_button_down(button)
    }

    fn axis_value(&self, axis: RawAxis) -> f32 {
        self.gamepad.axis_value(axis)
    }

    fn has_gamepad(&self) -> bool {
        self.gamepad.is_connected()
    }
}
