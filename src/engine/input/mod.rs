// Input handling system
//
// Unifies keyboard keys, gamepad buttons and analog axes into one code space,
// digitizes every input once per tick, and resolves queries against a
// rebindable action table.
//
// ## Architecture
//
// - `code`: Physical input codes and the name tables
// - `state`: Press/trigger/repeat/release state machine for one input
// - `axis`: Analog axes digitized into button-like states
// - `frame`: Per-tick snapshot of every input, fed by a `RawInputSource`
// - `action`: Game actions and their default bindings
// - `binding`: The action -> codes table and its mutation rules
// - `query`: Action queries and 4/8-way directions
// - `capture`: Waiting for the next pressed input while rebinding
// - `editor`: Edit session over a working copy of the bindings
// - `config`: Tunables and persisted controls
// - `manager`: Owns the frame and the committed bindings
// - `keyboard`, `gamepad`, `host`: Adapters from winit and gilrs
//
// ## Usage Example
//
// ```rust
// use engine::input::config::CONTROLS_FILE;
// use engine::input::{Action, InputManager};
//
// let mut input = InputManager::load(CONTROLS_FILE, host.has_gamepad())?;
//
// // Once per tick, after pumping window and gamepad events
// input.update(&host, clock.now());
//
// if input.repeating(Action::Down) {
//     // Move the cursor down, repeating while held
// }
// ```

pub mod action;
pub mod axis;
pub mod binding;
pub mod capture;
pub mod code;
pub mod config;
pub mod editor;
pub mod frame;
pub mod gamepad;
pub mod host;
pub mod keyboard;
pub mod manager;
pub mod query;
pub mod state;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use action::Action;
pub use axis::{AxisDigitizer, AxisId, RawAxis};
pub use binding::{Binding, BindingPolicy, BindingSet};
pub use capture::{scan, wait_for_input, FramePump};
pub use code::{code_to_name, name_to_code, InputCode, PhysicalCode};
pub use config::{ControlsConfig, InputSettings};
pub use editor::{ControlsEditor, RebindOutcome, RebindState};
pub use frame::{InputFrameState, RawInputSource};
pub use host::HostInput;
pub use manager::InputManager;
pub use query::{ActionQuery, Direction, Query};
pub use state::{ButtonState, RepeatTiming};

/// Binding and rebinding errors
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Unknown input name: {0}")]
    UnknownInputName(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("'{action}' already has the maximum of {max} keys")]
    CapacityExceeded { action: Action, max: usize },

    #[error("'{0}' must keep at least one key")]
    WouldEmptyAction(Action),

    #[error("'{0}' has no key assigned")]
    IncompleteMapping(Action),

    #[error("'{action}' has no key in slot {slot}")]
    SlotOutOfRange { action: Action, slot: usize },
}
