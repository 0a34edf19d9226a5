// Gamepad adapter: gilrs devices to indexed buttons and raw axes

use super::axis::RawAxis;
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use log::{info, warn};

/// gilrs button for each bindable button index
///
/// Index order is Button A, B, X, Y, Back, Guide, Start, Left Stick,
/// Right Stick, Left Shoulder, Right Shoulder, then the D-Pad.
const BUTTON_MAP: [Button; 15] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::Select,
    Button::Mode,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

/// gilrs button behind a bindable button index
pub fn gilrs_button(index: u8) -> Option<Button> {
    BUTTON_MAP.get(usize::from(index)).copied()
}

/// Tracks connected gamepads and which one drives the game
///
/// The most recently used gamepad is the active one.
pub struct GamepadInput {
    gilrs: Option<Gilrs>,
    active: Option<GamepadId>,
}

impl GamepadInput {
    /// Open the gamepad backend; without one, no gamepad is ever reported
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                warn!("Gamepad support unavailable: {}", e);
                None
            }
        };
        let active = gilrs.as_ref().and_then(|gilrs| {
            gilrs
                .gamepads()
                .find(|(_, gamepad)| gamepad.is_connected())
                .map(|(id, gamepad)| {
                    info!("Using gamepad {}", gamepad.name());
                    id
                })
        });
        Self { gilrs, active }
    }

    /// Adapter that never reports a gamepad
    pub fn disabled() -> Self {
        Self {
            gilrs: None,
            active: None,
        }
    }

    /// Drain pending gamepad events
    /// Call this once per frame before reading state
    pub fn pump(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("Gamepad {} connected", gilrs.gamepad(id).name());
                    self.active.get_or_insert(id);
                }
                EventType::Disconnected => {
                    info!("Gamepad {} disconnected", id);
                    if self.active == Some(id) {
                        self.active = gilrs
                            .gamepads()
                            .find(|(other, gamepad)| *other != id && gamepad.is_connected())
                            .map(|(other, _)| other);
                    }
                }
                EventType::ButtonPressed(..) | EventType::AxisChanged(..) => {
                    self.active = Some(id);
                }
                _ => {}
            }
        }
    }

    /// Whether a gamepad is connected
    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    /// Check if the button with this index is down on the active gamepad
    pub fn is_button_down(&self, index: u8) -> bool {
        let Some(button) = gilrs_button(index) else {
            return false;
        };
        self.with_active(|gamepad| gamepad.is_pressed(button))
            .unwrap_or(false)
    }

    /// Reading of a raw analog channel on the active gamepad
    ///
    /// Stick Y is flipped so down reads positive. Triggers read their
    /// analog pressure.
    pub fn axis_value(&self, axis: RawAxis) -> f32 {
        self.with_active(|gamepad| match axis {
            RawAxis::LeftStickX => gamepad.value(Axis::LeftStickX),
            RawAxis::LeftStickY => -gamepad.value(Axis::LeftStickY),
            RawAxis::RightStickX => gamepad.value(Axis::RightStickX),
            RawAxis::RightStickY => -gamepad.value(Axis::RightStickY),
            RawAxis::LeftTrigger => trigger_value(gamepad, Button::LeftTrigger2),
            RawAxis::RightTrigger => trigger_value(gamepad, Button::RightTrigger2),
        })
        .unwrap_or(0.0)
    }

    fn with_active<T>(&self, read: impl FnOnce(&gilrs::Gamepad<'_>) -> T) -> Option<T> {
        let gilrs = self.gilrs.as_ref()?;
        let id = self.active?;
        let gamepad = gilrs.connected_gamepad(id)?;
        Some(read(&gamepad))
    }
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new()
    }
}

fn trigger_value(gamepad: &gilrs::Gamepad<'_>, button: Button) -> f32 {
    gamepad
        .button_data(button)
        .map(|data| data.value())
        .unwrap_or(0.0)
}
