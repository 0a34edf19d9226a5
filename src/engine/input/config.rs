// Input settings and saved controls

use super::axis::AXIS_THRESHOLD;
use super::binding::{Binding, BindingPolicy, BindingSet, MAX_KEYS_PER_ACTION};
use super::state::RepeatTiming;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, TryFromFloatSecsError};

/// Default file the controls are saved to
pub const CONTROLS_FILE: &str = "controls.json";

/// Tunables for digitizing and rebinding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Axis reading above which a stick direction or trigger counts as pressed
    pub axis_threshold: f32,
    /// Seconds between the first trigger and sustained repeats
    pub repeat_initial_delay: f64,
    /// Seconds between sustained repeats
    pub repeat_interval: f64,
    /// Keep each action's keys sorted (keyboard, then buttons, then axes)
    pub auto_sort: bool,
    /// Most keys a single action may hold
    pub max_keys_per_action: usize,
}

impl InputSettings {
    /// Repeat timing as durations
    ///
    /// Fails for negative, non-finite or out-of-range delays.
    pub fn repeat_timing(&self) -> Result<RepeatTiming, TryFromFloatSecsError> {
        Ok(RepeatTiming {
            initial_delay: Duration::try_from_secs_f64(self.repeat_initial_delay)?,
            interval: Duration::try_from_secs_f64(self.repeat_interval)?,
        })
    }

    /// Rules for binding mutations
    pub fn policy(&self) -> BindingPolicy {
        BindingPolicy {
            auto_sort: self.auto_sort,
            max_keys_per_action: self.max_keys_per_action.max(1),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            axis_threshold: AXIS_THRESHOLD,
            repeat_initial_delay: 0.5,
            repeat_interval: 0.1,
            auto_sort: true,
            max_keys_per_action: MAX_KEYS_PER_ACTION,
        }
    }
}

/// Everything persisted about the controls
///
/// `game_controls` is `None` until the player first confirms a mapping;
/// reading a `None` yields the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub settings: InputSettings,
    pub game_controls: Option<Vec<Binding>>,
}

impl ControlsConfig {
    /// Load configuration from the default file
    pub fn load() -> Result<Self> {
        Self::load_or_default(CONTROLS_FILE)
    }

    /// Load configuration from a path, falling back to defaults if it is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No controls at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read controls from {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid controls file {}", path.display()))?;
        config
            .settings
            .repeat_timing()
            .with_context(|| format!("Invalid repeat timing in {}", path.display()))?;
        info!("Loaded controls from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to(CONTROLS_FILE)
    }

    /// Save configuration to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write controls to {}", path.display()))?;
        info!("Saved controls to {}", path.display());
        Ok(())
    }

    /// The binding set to play with: saved controls, or defaults
    pub fn bindings(&self, gamepad_available: bool) -> BindingSet {
        let policy = self.settings.policy();
        match &self.game_controls {
            Some(saved) => BindingSet::from_bindings(saved, gamepad_available, policy),
            None => BindingSet::defaults(gamepad_available, policy),
        }
    }

    /// Remember a committed binding set
    pub fn store(&mut self, bindings: &BindingSet) {
        self.game_controls = Some(bindings.to_bindings());
    }

    /// Forget saved controls so the next read yields defaults
    pub fn reset_controls(&mut self) {
        self.game_controls = None;
    }
}
