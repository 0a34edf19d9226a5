// Unified code space for keyboard keys, gamepad buttons and gamepad axes

use super::axis::AxisId;
use super::BindingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Added to a gamepad button index to get its code
pub const GAMEPAD_OFFSET: u16 = 500;

/// Added to an axis index to get its code (100 above the button range)
pub const AXIS_OFFSET: u16 = GAMEPAD_OFFSET + 100;

/// Highest code in the gamepad button range
const GAMEPAD_LIMIT: u16 = AXIS_OFFSET - 1;

/// Highest code in the axis range
const AXIS_LIMIT: u16 = AXIS_OFFSET + 99;

/// Highest keyboard code (virtual-key codes fit in one byte)
const KEYBOARD_LIMIT: u16 = 0xFF;

/// Number of addressable gamepad buttons (the whole button range)
pub const GAMEPAD_BUTTON_SLOTS: usize = (AXIS_OFFSET - GAMEPAD_OFFSET) as usize;

/// Opaque tag identifying one physical input
///
/// `0` means "unbound". The source of a code is derived from its numeric
/// range only; use [`PhysicalCode::decode`] to get the tagged form.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhysicalCode(pub u16);

/// A decoded physical code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    /// Keyboard virtual-key code
    Keyboard(u8),
    /// Gamepad button index
    Button(u8),
    /// Stick direction or trigger
    Axis(AxisId),
}

impl PhysicalCode {
    /// The unbound code
    pub const NONE: PhysicalCode = PhysicalCode(0);

    /// Check if this is the unbound code
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Decode the numeric range into the source it belongs to
    ///
    /// Returns `None` for the unbound code and for values outside every range.
    pub fn decode(self) -> Option<InputCode> {
        match self.0 {
            0 => None,
            code @ 1..=KEYBOARD_LIMIT => Some(InputCode::Keyboard(code as u8)),
            code @ GAMEPAD_OFFSET..=GAMEPAD_LIMIT => {
                Some(InputCode::Button((code - GAMEPAD_OFFSET) as u8))
            }
            code @ AXIS_OFFSET..=AXIS_LIMIT => {
                AxisId::from_index((code - AXIS_OFFSET) as u8).map(InputCode::Axis)
            }
            _ => None,
        }
    }

    /// Registered display name, `"None"` when unbound, `"?"` when unknown
    pub fn name(self) -> &'static str {
        code_to_name(self)
    }
}

impl InputCode {
    /// Encode back into the shared code space
    pub fn code(self) -> PhysicalCode {
        match self {
            InputCode::Keyboard(key) => PhysicalCode(key as u16),
            InputCode::Button(button) => PhysicalCode(button as u16 + GAMEPAD_OFFSET),
            InputCode::Axis(axis) => PhysicalCode(axis.index() as u16 + AXIS_OFFSET),
        }
    }
}

impl From<InputCode> for PhysicalCode {
    fn from(input: InputCode) -> Self {
        input.code()
    }
}

impl fmt::Display for PhysicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboard keys available for binding, as (name, virtual-key code)
///
/// Declaration order is the capture scan order.
pub const KEYBOARD_KEYS: &[(&str, u8)] = &[
    ("Backspace", 0x08),
    ("Tab", 0x09),
    ("Clear", 0x0C),
    ("Enter", 0x0D),
    ("Shift", 0x10),
    ("Ctrl", 0x11),
    ("Alt", 0x12),
    ("Pause", 0x13),
    ("Caps Lock", 0x14),
    ("Esc", 0x1B),
    ("Space", 0x20),
    ("Page Up", 0x21),
    ("Page Down", 0x22),
    ("End", 0x23),
    ("Home", 0x24),
    ("Left", 0x25),
    ("Up", 0x26),
    ("Right", 0x27),
    ("Down", 0x28),
    ("Select", 0x29),
    ("Print", 0x2A),
    ("Execute", 0x2B),
    ("Print Screen", 0x2C),
    ("Insert", 0x2D),
    ("Delete", 0x2E),
    ("Help", 0x2F),
    ("0", 0x30),
    ("1", 0x31),
    ("2", 0x32),
    ("3", 0x33),
    ("4", 0x34),
    ("5", 0x35),
    ("6", 0x36),
    ("7", 0x37),
    ("8", 0x38),
    ("9", 0x39),
    ("A", 0x41),
    ("B", 0x42),
    ("C", 0x43),
    ("D", 0x44),
    ("E", 0x45),
    ("F", 0x46),
    ("G", 0x47),
    ("H", 0x48),
    ("I", 0x49),
    ("J", 0x4A),
    ("K", 0x4B),
    ("L", 0x4C),
    ("M", 0x4D),
    ("N", 0x4E),
    ("O", 0x4F),
    ("P", 0x50),
    ("Q", 0x51),
    ("R", 0x52),
    ("S", 0x53),
    ("T", 0x54),
    ("U", 0x55),
    ("V", 0x56),
    ("W", 0x57),
    ("X", 0x58),
    ("Y", 0x59),
    ("Z", 0x5A),
    ("Numpad 0", 0x60),
    ("Numpad 1", 0x61),
    ("Numpad 2", 0x62),
    ("Numpad 3", 0x63),
    ("Numpad 4", 0x64),
    ("Numpad 5", 0x65),
    ("Numpad 6", 0x66),
    ("Numpad 7", 0x67),
    ("Numpad 8", 0x68),
    ("Numpad 9", 0x69),
    ("Multiply", 0x6A),
    ("Add", 0x6B),
    ("Separator", 0x6C),
    ("Subtract", 0x6D),
    ("Decimal", 0x6E),
    ("Divide", 0x6F),
    ("F1", 0x70),
    ("F2", 0x71),
    ("F3", 0x72),
    ("F4", 0x73),
    ("F5", 0x74),
    ("F6", 0x75),
    ("F7", 0x76),
    ("F8", 0x77),
    ("F9", 0x78),
    ("F10", 0x79),
    ("F11", 0x7A),
    ("F12", 0x7B),
    ("F13", 0x7C),
    ("F14", 0x7D),
    ("F15", 0x7E),
    ("F16", 0x7F),
    ("F17", 0x80),
    ("F18", 0x81),
    ("F19", 0x82),
    ("F20", 0x83),
    ("F21", 0x84),
    ("F22", 0x85),
    ("F23", 0x86),
    ("F24", 0x87),
    ("Num Lock", 0x90),
    ("Scroll Lock", 0x91),
    (";:", 0xBA),
    ("+", 0xBB),
    (",", 0xBC),
    ("-", 0xBD),
    (".", 0xBE),
    ("/?", 0xBF),
    ("`~", 0xC0),
    ("{", 0xDB),
    ("\\|", 0xDC),
    ("}", 0xDD),
    ("'\"", 0xDE),
    ("AX", 0xE1), // Japanese keyboards only
];

/// Gamepad buttons available for binding, as (name, button index)
pub const GAMEPAD_BUTTONS: &[(&str, u8)] = &[
    ("Button A", 0x00),
    ("Button B", 0x01),
    ("Button X", 0x02),
    ("Button Y", 0x03),
    ("Button Back", 0x04),
    ("Button Guide", 0x05),
    ("Button Start", 0x06),
    ("Left Stick", 0x07),
    ("Right Stick", 0x08),
    ("Left Shoulder", 0x09),
    ("Right Shoulder", 0x0A),
    ("D-Pad Up", 0x0B),
    ("D-Pad Down", 0x0C),
    ("D-Pad Left", 0x0D),
    ("D-Pad Right", 0x0E),
];

/// Look up the code registered under a display name
///
/// Searches the keyboard table, then gamepad buttons, then axes.
pub fn name_to_code(name: &str) -> Result<PhysicalCode, BindingError> {
    if let Some(&(_, key)) = KEYBOARD_KEYS.iter().find(|(n, _)| *n == name) {
        return Ok(InputCode::Keyboard(key).code());
    }
    if let Some(&(_, button)) = GAMEPAD_BUTTONS.iter().find(|(n, _)| *n == name) {
        return Ok(InputCode::Button(button).code());
    }
    AxisId::ALL
        .iter()
        .find(|axis| axis.name() == name)
        .map(|&axis| InputCode::Axis(axis).code())
        .ok_or_else(|| BindingError::UnknownInputName(name.to_string()))
}

/// Display name of a code
pub fn code_to_name(code: PhysicalCode) -> &'static str {
    if code.is_none() {
        return "None";
    }
    let name = match code.decode() {
        Some(InputCode::Keyboard(key)) => KEYBOARD_KEYS
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(name, _)| *name),
        Some(InputCode::Button(button)) => GAMEPAD_BUTTONS
            .iter()
            .find(|(_, b)| *b == button)
            .map(|(name, _)| *name),
        Some(InputCode::Axis(axis)) => Some(axis.name()),
        None => None,
    };
    name.unwrap_or("?")
}

/// Every bindable code in capture scan order: keyboard, buttons, axes
pub fn all_codes() -> impl Iterator<Item = PhysicalCode> {
    KEYBOARD_KEYS
        .iter()
        .map(|&(_, key)| InputCode::Keyboard(key).code())
        .chain(
            GAMEPAD_BUTTONS
                .iter()
                .map(|&(_, button)| InputCode::Button(button).code()),
        )
        .chain(AxisId::ALL.iter().map(|&axis| InputCode::Axis(axis).code()))
}
