// Controls edit session: a working copy plus the rebinding state machine

use super::action::Action;
use super::binding::BindingSet;
use super::code::PhysicalCode;
use super::BindingError;
use log::debug;

/// Where the rebinding interaction stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebindState {
    #[default]
    Idle,
    /// Waiting for the player to press the input for `action`'s `slot`
    AwaitingInput { action: Action, slot: usize },
}

/// Result of feeding a captured input to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindOutcome {
    /// Nothing was awaited
    Ignored,
    /// The slot already held that input; nothing changed
    Cancelled,
    /// The input was bound
    Bound { action: Action, slot: usize },
}

/// Edits a private copy of the committed bindings
///
/// Nothing is visible to the game until [`ControlsEditor::commit`] hands the
/// working copy back.
#[derive(Debug, Clone)]
pub struct ControlsEditor {
    working: BindingSet,
    state: RebindState,
    changed: bool,
}

impl ControlsEditor {
    /// Start editing a clone of `committed`
    pub fn new(committed: &BindingSet) -> Self {
        Self {
            working: committed.clone(),
            state: RebindState::Idle,
            changed: false,
        }
    }

    /// The working copy
    pub fn bindings(&self) -> &BindingSet {
        &self.working
    }

    /// Current rebinding state
    pub fn state(&self) -> RebindState {
        self.state
    }

    /// Check if the session waits for an input
    pub fn is_reading_input(&self) -> bool {
        matches!(self.state, RebindState::AwaitingInput { .. })
    }

    /// Check if the working copy differs from what was committed
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Wait for a replacement for the key at `slot`
    pub fn begin_replace(&mut self, action: Action, slot: usize) -> Result<(), BindingError> {
        if slot >= self.working.get(action).len() {
            return Err(BindingError::SlotOutOfRange { action, slot });
        }
        self.await_input(action, slot);
        Ok(())
    }

    /// Wait for an additional key, refusing when the action is full
    pub fn begin_add(&mut self, action: Action) -> Result<(), BindingError> {
        let entry = self.working.get(action);
        let max = self.working.policy().max_keys_per_action;
        if entry.len() >= max {
            return Err(BindingError::CapacityExceeded { action, max });
        }
        self.await_input(action, entry.len());
        Ok(())
    }

    /// Start editing an action that has no key yet
    ///
    /// Returns `false` when the action already has keys, in which case the
    /// caller should offer replace/add/remove instead.
    pub fn begin_edit(&mut self, action: Action) -> bool {
        if self.working.has_any_key(action) {
            return false;
        }
        self.await_input(action, 0);
        true
    }

    /// Stop waiting without touching the bindings
    pub fn cancel_capture(&mut self) {
        self.state = RebindState::Idle;
    }

    /// Feed the captured input to the awaited slot
    ///
    /// Pressing the input the slot already holds cancels the edit.
    pub fn apply_input(&mut self, code: PhysicalCode) -> Result<RebindOutcome, BindingError> {
        let RebindState::AwaitingInput { action, slot } = self.state else {
            return Ok(RebindOutcome::Ignored);
        };

        if self.working.binding_equals(action, slot, code) {
            debug!("'{}' slot {} already holds {}, nothing to do", action, slot, code);
            self.state = RebindState::Idle;
            return Ok(RebindOutcome::Cancelled);
        }

        // Leave the session waiting if the bind is rejected, so the caller can retry
        self.working.set_key(action, slot, code)?;
        self.state = RebindState::Idle;
        self.changed = true;
        Ok(RebindOutcome::Bound { action, slot })
    }

    /// Remove one key from an action
    pub fn remove_key(&mut self, action: Action, slot: usize) -> Result<(), BindingError> {
        self.working.remove_key_at(action, slot)?;
        self.changed = true;
        Ok(())
    }

    /// Replace the working copy with the built-in defaults
    pub fn restore_defaults(&mut self, gamepad_available: bool) {
        self.working.reset_to_default(gamepad_available);
        self.state = RebindState::Idle;
        self.changed = true;
    }

    /// Hand back the working copy if every slot is bound
    ///
    /// On error the session is kept so the player can fill the gaps.
    pub fn commit(&self) -> Result<BindingSet, BindingError> {
        match self.working.first_unbound() {
            Some(action) => Err(BindingError::IncompleteMapping(action)),
            None => Ok(self.working.clone()),
        }
    }

    fn await_input(&mut self, action: Action, slot: usize) {
        debug!("Waiting for a new input for '{}' slot {}", action, slot);
        self.state = RebindState::AwaitingInput { action, slot };
    }
}
