// Input manager - owns the per-tick frame and the committed bindings

use super::action::Action;
use super::binding::BindingSet;
use super::config::{ControlsConfig, InputSettings};
use super::editor::ControlsEditor;
use super::frame::{InputFrameState, RawInputSource};
use super::query::{ActionQuery, Direction};
use super::state::RepeatTiming;
use super::BindingError;
use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main input manager that answers action queries for the game
///
/// Edits go through a [`ControlsEditor`]; queries keep reading the committed
/// bindings until the editor is committed back.
pub struct InputManager {
    /// Tunables and saved controls
    config: ControlsConfig,

    /// Where `save` writes, if anywhere
    controls_path: Option<PathBuf>,

    /// Snapshot of every input for the current tick
    frame: InputFrameState,

    /// Bindings the game reads
    bindings: BindingSet,
}

impl InputManager {
    /// Create an input manager from loaded configuration
    pub fn new(config: ControlsConfig, gamepad_available: bool) -> Self {
        let settings = &config.settings;
        let timing = settings.repeat_timing().unwrap_or_else(|e| {
            warn!("Invalid repeat timing ({}), using defaults", e);
            RepeatTiming::default()
        });
        let frame = InputFrameState::new(settings.axis_threshold, timing);
        let bindings = config.bindings(gamepad_available);
        Self {
            config,
            controls_path: None,
            frame,
            bindings,
        }
    }

    /// Load configuration from `path` (defaults if missing) and save back there
    pub fn load<P: AsRef<Path>>(path: P, gamepad_available: bool) -> Result<Self> {
        let path = path.as_ref();
        let config = ControlsConfig::load_or_default(path)?;
        let mut manager = Self::new(config, gamepad_available);
        manager.controls_path = Some(path.to_path_buf());
        Ok(manager)
    }

    /// Advance every input by one tick
    /// Call this once per frame after pumping all events
    pub fn update<S: RawInputSource + ?Sized>(&mut self, source: &S, now: Duration) {
        self.frame.update(source, now);
    }

    /// Queries against the current tick and the committed bindings
    pub fn actions(&self) -> ActionQuery<'_> {
        ActionQuery::new(&self.frame, &self.bindings)
    }

    /// Check if an action is held
    pub fn pressed(&self, action: Action) -> bool {
        self.actions().pressed(action)
    }

    /// Check if an action went down this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.actions().just_pressed(action)
    }

    /// Check if an action fired a trigger or repeat pulse this tick
    pub fn repeating(&self, action: Action) -> bool {
        self.actions().repeating(action)
    }

    /// Check if an action went up this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.actions().just_released(action)
    }

    /// Four-way direction from the movement actions
    pub fn directional4(&self) -> Direction {
        self.actions().directional4()
    }

    /// Eight-way direction from the movement actions
    pub fn directional8(&self) -> Direction {
        self.actions().directional8()
    }

    /// Names of the inputs bound to an action
    pub fn codes_for_action(&self, action: Action) -> Vec<&'static str> {
        self.bindings.key_names(action)
    }

    /// The current tick's snapshot
    pub fn frame(&self) -> &InputFrameState {
        &self.frame
    }

    /// The committed bindings
    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    /// Tunables in effect
    pub fn settings(&self) -> &InputSettings {
        &self.config.settings
    }

    /// Configuration as it will be saved
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Start an edit session over a copy of the committed bindings
    pub fn begin_edit(&self) -> ControlsEditor {
        ControlsEditor::new(&self.bindings)
    }

    /// Replace the committed bindings with the editor's working copy
    ///
    /// Rejected when any action is left without a key; the committed bindings
    /// are untouched in that case.
    pub fn commit(&mut self, editor: &ControlsEditor) -> Result<(), BindingError> {
        let committed = editor.commit()?;
        self.config.store(&committed);
        self.bindings = committed;
        info!("Controls updated");
        Ok(())
    }

    /// Write the configuration to the path it was loaded from
    ///
    /// Does nothing for a manager created without a path.
    pub fn save(&self) -> Result<()> {
        match &self.controls_path {
            Some(path) => self.config.save_to(path),
            None => Ok(()),
        }
    }

    /// Forget input state, e.g. after the window loses focus
    pub fn reset(&mut self) {
        self.frame.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::code::name_to_code;
    use crate::engine::input::testing::ScriptedInput;
    use tempfile::tempdir;

    const VK_X: u8 = 0x58;
    const VK_ESC: u8 = 0x1B;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn keyboard_manager() -> InputManager {
        InputManager::new(ControlsConfig::default(), false)
    }

    #[test]
    fn test_query_through_committed_bindings() {
        let mut input = keyboard_manager();
        input.update(&ScriptedInput::new().with_key(VK_X), ms(0));

        assert!(input.just_pressed(Action::Cancel));
        assert!(input.pressed(Action::Cancel));
        assert!(!input.pressed(Action::Confirm));
    }

    #[test]
    fn test_edits_invisible_until_commit() {
        let mut input = keyboard_manager();
        let mut editor = input.begin_edit();
        editor.begin_add(Action::Confirm).unwrap();
        editor.apply_input(name_to_code("X").unwrap()).unwrap();

        input.update(&ScriptedInput::new().with_key(VK_X), ms(0));
        assert!(input.pressed(Action::Cancel));
        assert!(!input.pressed(Action::Confirm));

        input.commit(&editor).unwrap();
        assert!(input.pressed(Action::Confirm));
        assert!(!input.pressed(Action::Cancel));
        assert_eq!(input.codes_for_action(Action::Cancel), vec!["Esc"]);
    }

    #[test]
    fn test_rejected_commit_keeps_bindings() {
        let mut input = keyboard_manager();
        let before = input.bindings().clone();

        let mut editor = input.begin_edit();
        editor.begin_replace(Action::Confirm, 0).unwrap();
        editor.apply_input(name_to_code("D").unwrap()).unwrap();

        assert!(matches!(
            input.commit(&editor),
            Err(BindingError::IncompleteMapping(Action::ReadyMenu))
        ));
        assert_eq!(input.bindings(), &before);
        assert!(input.config().game_controls.is_none());
    }

    #[test]
    fn test_repeat_through_manager() {
        let mut input = keyboard_manager();
        let held = ScriptedInput::new().with_key(VK_ESC);

        input.update(&held, ms(0));
        assert!(input.repeating(Action::Cancel));
        input.update(&held, ms(250));
        assert!(!input.repeating(Action::Cancel));
        input.update(&held, ms(500));
        assert!(input.repeating(Action::Cancel));

        input.update(&ScriptedInput::new(), ms(516));
        assert!(input.just_released(Action::Cancel));
    }

    #[test]
    fn test_default_settings_repeat_cadence() {
        let mut input = InputManager::new(ControlsConfig::default(), false);
        let held = ScriptedInput::new().with_key(VK_ESC);

        let mut pulses = Vec::new();
        for step in 0..=8u64 {
            input.update(&held, ms(step * 100));
            if input.repeating(Action::Cancel) {
                pulses.push(step * 100);
            }
        }
        assert_eq!(pulses, vec![0, 500, 600, 700, 800]);
    }

    #[test]
    fn test_invalid_timing_falls_back_to_defaults() {
        let mut config = ControlsConfig::default();
        config.settings.repeat_initial_delay = f64::NAN;
        let mut input = InputManager::new(config, false);
        let held = ScriptedInput::new().with_key(VK_ESC);

        input.update(&held, ms(0));
        input.update(&held, ms(500));
        assert!(input.repeating(Action::Cancel));
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut input = keyboard_manager();
        input.update(&ScriptedInput::new().with_key(VK_ESC), ms(0));
        input.reset();
        assert!(!input.pressed(Action::Cancel));
    }

    #[test]
    fn test_commit_then_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("controls.json");

        let mut input = InputManager::load(&path, true).unwrap();
        let mut editor = input.begin_edit();
        editor.begin_replace(Action::Menu, 0).unwrap();
        editor.apply_input(name_to_code("Q").unwrap()).unwrap();
        input.commit(&editor).unwrap();
        input.save().unwrap();

        let reloaded = InputManager::load(&path, true).unwrap();
        assert_eq!(reloaded.bindings(), input.bindings());
        assert!(reloaded.codes_for_action(Action::Menu).contains(&"Q"));
    }

    #[test]
    fn test_save_without_path_is_noop() {
        assert!(keyboard_manager().save().is_ok());
    }
}
