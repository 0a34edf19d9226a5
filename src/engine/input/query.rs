// Per-action queries: OR over every bound code, plus 4/8-way directions

use super::action::Action;
use super::binding::BindingSet;
use super::code::PhysicalCode;
use super::frame::InputFrameState;
use super::state::ButtonState;

/// What to ask about an input this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Pressed,
    JustPressed,
    /// Trigger pulse or auto-repeat pulse
    Repeating,
    JustReleased,
}

impl Query {
    fn matches(self, state: &ButtonState) -> bool {
        match self {
            Query::Pressed => state.pressed,
            Query::JustPressed => state.just_pressed,
            // A trigger always counts as a repeat pulse too
            Query::Repeating => state.repeating || state.just_pressed,
            Query::JustReleased => state.just_released,
        }
    }
}

/// Direction in numpad layout (2 = down, 4 = left, 6 = right, 8 = up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None = 0,
    DownLeft = 1,
    Down = 2,
    DownRight = 3,
    Left = 4,
    Right = 6,
    UpLeft = 7,
    Up = 8,
    UpRight = 9,
}

impl Direction {
    /// Numpad value, 0 for none
    pub fn numpad(self) -> u8 {
        self as u8
    }

    /// Unit vector (x right, y up)
    pub fn vector(self) -> (f32, f32) {
        match self {
            Direction::None => (0.0, 0.0),
            Direction::DownLeft => (-1.0, -1.0),
            Direction::Down => (0.0, -1.0),
            Direction::DownRight => (1.0, -1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::UpLeft => (-1.0, 1.0),
            Direction::Up => (0.0, 1.0),
            Direction::UpRight => (1.0, 1.0),
        }
    }
}

/// True if any code satisfies the query this tick
pub fn query_codes(frame: &InputFrameState, codes: &[PhysicalCode], query: Query) -> bool {
    codes
        .iter()
        .any(|&code| frame.state(code).is_some_and(|state| query.matches(state)))
}

/// Answers action queries for one tick
///
/// Borrows the frame snapshot and the action -> codes table to consult.
#[derive(Debug, Clone, Copy)]
pub struct ActionQuery<'a> {
    frame: &'a InputFrameState,
    bindings: &'a BindingSet,
}

impl<'a> ActionQuery<'a> {
    /// Query `frame` through `bindings`
    pub fn new(frame: &'a InputFrameState, bindings: &'a BindingSet) -> Self {
        Self { frame, bindings }
    }

    /// Run a query against every code bound to `action`
    pub fn query(&self, action: Action, query: Query) -> bool {
        query_codes(self.frame, self.bindings.codes(action), query)
    }

    /// Check if an action is held
    pub fn pressed(&self, action: Action) -> bool {
        self.query(action, Query::Pressed)
    }

    /// Check if an action went down this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.query(action, Query::JustPressed)
    }

    /// Check if an action fired a trigger or repeat pulse this tick
    pub fn repeating(&self, action: Action) -> bool {
        self.query(action, Query::Repeating)
    }

    /// Check if an action went up this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.query(action, Query::JustReleased)
    }

    /// Names of the inputs bound to an action
    pub fn codes_for_action(&self, action: Action) -> Vec<&'static str> {
        self.bindings.key_names(action)
    }

    /// All inputs bound to an action as one line, like "X, Esc"
    pub fn keys_text(&self, action: Action) -> String {
        self.bindings.get(action).keys_text()
    }

    /// Four-way direction
    ///
    /// Opposing directions held together cancel out entirely. Otherwise the
    /// first held of down, left, right, up wins.
    pub fn directional4(&self) -> Direction {
        let down = self.pressed(Action::Down);
        let up = self.pressed(Action::Up);
        let left = self.pressed(Action::Left);
        let right = self.pressed(Action::Right);

        if (down && up) || (left && right) {
            return Direction::None;
        }
        [
            (down, Direction::Down),
            (left, Direction::Left),
            (right, Direction::Right),
            (up, Direction::Up),
        ]
        .into_iter()
        .find(|(held, _)| *held)
        .map_or(Direction::None, |(_, direction)| direction)
    }

    /// Eight-way direction
    ///
    /// Each opposing pair held together drops that axis, leaving the
    /// perpendicular one (or none).
    pub fn directional8(&self) -> Direction {
        let vertical = axis_sign(self.pressed(Action::Up), self.pressed(Action::Down));
        let horizontal = axis_sign(self.pressed(Action::Right), self.pressed(Action::Left));

        match (vertical, horizontal) {
            (-1, -1) => Direction::DownLeft,
            (-1, 0) => Direction::Down,
            (-1, 1) => Direction::DownRight,
            (0, -1) => Direction::Left,
            (0, 1) => Direction::Right,
            (1, -1) => Direction::UpLeft,
            (1, 0) => Direction::Up,
            (1, 1) => Direction::UpRight,
            _ => Direction::None,
        }
    }
}

fn axis_sign(positive: bool, negative: bool) -> i8 {
    positive as i8 - negative as i8
}
