// Game action definitions and default bindings

use super::BindingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents all rebindable in-game actions
///
/// The declaration order is the order actions are listed in the controls
/// screen and in saved bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // Movement
    Down,
    Left,
    Right,
    Up,

    // Confirm / back
    #[serde(rename = "Action")]
    Confirm,
    Cancel,

    // Menus
    Menu,
    #[serde(rename = "Scroll Up")]
    ScrollUp,
    #[serde(rename = "Scroll Down")]
    ScrollDown,
    #[serde(rename = "Ready Menu")]
    ReadyMenu,
}

impl Action {
    /// Every action, in display order
    pub const ALL: [Action; 10] = [
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Confirm,
        Action::Cancel,
        Action::Menu,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::ReadyMenu,
    ];

    /// Stable display name, also used in saved controls
    pub fn name(self) -> &'static str {
        match self {
            Action::Down => "Down",
            Action::Left => "Left",
            Action::Right => "Right",
            Action::Up => "Up",
            Action::Confirm => "Action",
            Action::Cancel => "Cancel",
            Action::Menu => "Menu",
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::ReadyMenu => "Ready Menu",
        }
    }

    /// Help line shown while the action is highlighted
    pub fn description(self) -> &'static str {
        match self {
            Action::Down | Action::Left | Action::Right | Action::Up => {
                "Moves the character. Select entries and navigate menus."
            }
            Action::Confirm => {
                "Confirm a choice, check things, talk to people, and move through text."
            }
            Action::Cancel => {
                "Exit, cancel a choice or mode, and move at field in a different speed."
            }
            Action::Menu => "Open the menu. Also has various functions depending on context.",
            Action::ScrollUp | Action::ScrollDown => "Advance quickly in menus.",
            Action::ReadyMenu => {
                "Open Ready Menu, with registered items and available field moves."
            }
        }
    }

    /// Position in [`Action::ALL`]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| BindingError::UnknownAction(s.to_string()))
    }
}

/// Default controls when a gamepad is available, as (action, input name)
pub fn default_gamepad_bindings() -> Vec<(Action, &'static str)> {
    vec![
        (Action::Down, "Down"),
        (Action::Down, "D-Pad Down"),
        (Action::Down, "L-Stick Down"),
        (Action::Left, "Left"),
        (Action::Left, "D-Pad Left"),
        (Action::Left, "L-Stick Left"),
        (Action::Right, "Right"),
        (Action::Right, "D-Pad Right"),
        (Action::Right, "L-Stick Right"),
        (Action::Up, "Up"),
        (Action::Up, "D-Pad Up"),
        (Action::Up, "L-Stick Up"),
        (Action::Confirm, "C"),
        (Action::Confirm, "Enter"),
        (Action::Confirm, "Space"),
        (Action::Confirm, "Button A"),
        (Action::Cancel, "X"),
        (Action::Cancel, "Esc"),
        (Action::Cancel, "Numpad 0"),
        (Action::Cancel, "Button B"),
        (Action::Menu, "Z"),
        (Action::Menu, "Shift"),
        (Action::Menu, "Button X"),
        (Action::ScrollUp, "A"),
        (Action::ScrollUp, "Left Shoulder"),
        (Action::ScrollDown, "S"),
        (Action::ScrollDown, "Right Shoulder"),
        (Action::ReadyMenu, "D"),
        (Action::ReadyMenu, "Button Y"),
    ]
}

/// Default controls for keyboard-only play
pub fn default_keyboard_bindings() -> Vec<(Action, &'static str)> {
    vec![
        (Action::Down, "Down"),
        (Action::Left, "Left"),
        (Action::Right, "Right"),
        (Action::Up, "Up"),
        (Action::Confirm, "C"),
        (Action::Confirm, "Enter"),
        (Action::Confirm, "Space"),
        (Action::Cancel, "X"),
        (Action::Cancel, "Esc"),
        (Action::Menu, "Z"),
        (Action::Menu, "Shift"),
        (Action::ScrollUp, "A"),
        (Action::ScrollDown, "S"),
        (Action::ReadyMenu, "D"),
    ]
}

/// Default controls for the available input hardware
pub fn default_bindings(gamepad_available: bool) -> Vec<(Action, &'static str)> {
    if gamepad_available {
        default_gamepad_bindings()
    } else {
        default_keyboard_bindings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::code::name_to_code;
    use std::collections::HashSet;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Cancel, Action::Cancel);
        assert_ne!(Action::Cancel, Action::Confirm);
    }

    #[test]
    fn test_all_matches_index() {
        for (position, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), position);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
        assert!("Jump".parse::<Action>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Action::ScrollUp).unwrap();
        assert_eq!(json, "\"Scroll Up\"");
        let action: Action = serde_json::from_str("\"Action\"").unwrap();
        assert_eq!(action, Action::Confirm);
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        for gamepad in [true, false] {
            let bound: HashSet<Action> = default_bindings(gamepad)
                .into_iter()
                .map(|(action, _)| action)
                .collect();
            assert_eq!(bound.len(), Action::ALL.len());
        }
    }

    #[test]
    fn test_default_binding_names_resolve() {
        for (_, name) in default_gamepad_bindings()
            .into_iter()
            .chain(default_keyboard_bindings())
        {
            assert!(name_to_code(name).is_ok(), "unknown default input {}", name);
        }
    }

    #[test]
    fn test_no_duplicate_inputs_in_defaults() {
        for gamepad in [true, false] {
            let mut seen = HashSet::new();
            for (_, name) in default_bindings(gamepad) {
                assert!(seen.insert(name), "Duplicate input {} in defaults", name);
            }
        }
    }

    #[test]
    fn test_keyboard_defaults_have_no_gamepad_inputs() {
        for (_, name) in default_keyboard_bindings() {
            assert!(name_to_code(name).unwrap().0 < 500);
        }
    }
}
