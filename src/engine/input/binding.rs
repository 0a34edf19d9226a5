// Action bindings: which physical inputs trigger which action
//
// A `BindingSet` holds one `ActionBinding` per action. Every mutation keeps
// these invariants:
// - an action always has between 1 and `max_keys_per_action` codes, with a
//   single `PhysicalCode::NONE` standing for "no key"
// - a non-zero code belongs to at most one (action, slot) pair
// - with auto-sort on, each action's codes are in ascending order
// Failed mutations leave the set untouched.

use super::action::{default_bindings, Action};
use super::code::{name_to_code, PhysicalCode};
use super::BindingError;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

/// Most keys/buttons a single action may hold
pub const MAX_KEYS_PER_ACTION: usize = 9;

/// One action bound to one physical input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub action: Action,
    pub code: PhysicalCode,
}

impl Binding {
    /// Pair an action with an input
    pub fn new(action: Action, code: PhysicalCode) -> Self {
        Self { action, code }
    }
}

/// Rules applied by every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPolicy {
    /// Keep each action's codes sorted, which groups keyboard, buttons, then axes
    pub auto_sort: bool,
    /// Capacity of a single action
    pub max_keys_per_action: usize,
}

impl Default for BindingPolicy {
    fn default() -> Self {
        Self {
            auto_sort: true,
            max_keys_per_action: MAX_KEYS_PER_ACTION,
        }
    }
}

/// All codes bound to one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    action: Action,
    codes: Vec<PhysicalCode>,
}

impl ActionBinding {
    fn new(action: Action, mut codes: Vec<PhysicalCode>) -> Self {
        if codes.is_empty() {
            codes.push(PhysicalCode::NONE);
        }
        Self { action, codes }
    }

    /// The action these codes trigger
    pub fn action(&self) -> Action {
        self.action
    }

    /// Bound codes in slot order
    pub fn codes(&self) -> &[PhysicalCode] {
        &self.codes
    }

    /// Number of slots (never zero)
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// False only when the action's single slot is unbound
    pub fn has_any_key(&self) -> bool {
        self.codes.len() > 1 || !self.codes[0].is_none()
    }

    /// Check if `slot` exists and holds `code`
    pub fn code_equals(&self, slot: usize, code: PhysicalCode) -> bool {
        self.codes.get(slot) == Some(&code)
    }

    /// Display names of the bound inputs
    pub fn key_names(&self) -> Vec<&'static str> {
        self.codes.iter().map(|code| code.name()).collect()
    }

    /// All key names joined for display, like "C, Enter"
    pub fn keys_text(&self) -> String {
        self.key_names().join(", ")
    }

    fn sort_keys(&mut self) {
        self.codes.sort_unstable();
    }

    /// Remove or unbind every occurrence of `code` except the kept slot
    ///
    /// Returns how many slots were touched.
    fn clear_input(&mut self, code: PhysicalCode, keep: Option<usize>) -> usize {
        let mut keep = keep;
        let mut cleared = 0;
        let mut slot = 0;
        while slot < self.codes.len() {
            if Some(slot) != keep && self.codes[slot] == code {
                cleared += 1;
                if self.codes.len() > 1 {
                    self.codes.remove(slot);
                    keep = keep.map(|k| if k > slot { k - 1 } else { k });
                    continue;
                }
                self.codes[slot] = PhysicalCode::NONE;
            }
            slot += 1;
        }
        cleared
    }
}

/// The full action -> codes relation, one entry per [`Action`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSet {
    actions: Vec<ActionBinding>,
    policy: BindingPolicy,
}

impl BindingSet {
    /// Built-in defaults for the available hardware
    pub fn defaults(gamepad_available: bool, policy: BindingPolicy) -> Self {
        let codes = default_codes(gamepad_available);
        let actions = Action::ALL
            .into_iter()
            .map(|action| ActionBinding::new(action, codes[action.index()].clone()))
            .collect();
        let mut set = Self { actions, policy };
        set.sort_all();
        set
    }

    /// Build from saved pairs
    ///
    /// Pairs keep their relative order per action. Actions without any saved
    /// pair get their default codes; codes past the capacity are dropped.
    pub fn from_bindings(
        bindings: &[Binding],
        gamepad_available: bool,
        policy: BindingPolicy,
    ) -> Self {
        let mut grouped: Vec<Vec<PhysicalCode>> = vec![Vec::new(); Action::ALL.len()];
        for binding in bindings {
            grouped[binding.action.index()].push(binding.code);
        }

        let defaults = default_codes(gamepad_available);
        let actions = Action::ALL
            .into_iter()
            .map(|action| {
                let mut codes = std::mem::take(&mut grouped[action.index()]);
                if codes.is_empty() {
                    warn!("No saved controls for '{}', using defaults", action);
                    codes = defaults[action.index()].clone();
                } else if codes.len() > policy.max_keys_per_action {
                    warn!(
                        "'{}' has {} saved keys, keeping the first {}",
                        action,
                        codes.len(),
                        policy.max_keys_per_action
                    );
                    codes.truncate(policy.max_keys_per_action);
                }
                ActionBinding::new(action, codes)
            })
            .collect();

        let mut set = Self { actions, policy };
        set.sort_all();
        set
    }

    /// Flatten into saved pairs, grouped by action in display order
    pub fn to_bindings(&self) -> Vec<Binding> {
        self.actions
            .iter()
            .flat_map(|entry| {
                entry
                    .codes
                    .iter()
                    .map(move |&code| Binding::new(entry.action, code))
            })
            .collect()
    }

    /// Get the rules this set enforces
    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// Bindings for one action
    pub fn get(&self, action: Action) -> &ActionBinding {
        &self.actions[action.index()]
    }

    /// Codes bound to an action, in slot order
    pub fn codes(&self, action: Action) -> &[PhysicalCode] {
        self.get(action).codes()
    }

    /// Iterate all actions in display order
    pub fn iter(&self) -> impl Iterator<Item = &ActionBinding> {
        self.actions.iter()
    }

    /// The action currently owning a code, if any
    pub fn owner_of(&self, code: PhysicalCode) -> Option<Action> {
        if code.is_none() {
            return None;
        }
        self.actions
            .iter()
            .find(|entry| entry.codes.contains(&code))
            .map(|entry| entry.action)
    }

    /// Bind `code` to `action` at `slot`, taking it away from any other owner
    ///
    /// A slot past the end appends a new key (subject to capacity). Every
    /// other slot holding the same non-zero code is removed, or reset to
    /// `NONE` when it is its action's only key.
    pub fn set_key(
        &mut self,
        action: Action,
        slot: usize,
        code: PhysicalCode,
    ) -> Result<(), BindingError> {
        let max = self.policy.max_keys_per_action;
        let entry = &mut self.actions[action.index()];

        let kept_slot = if slot < entry.len() {
            entry.codes[slot] = code;
            slot
        } else {
            if entry.len() >= max {
                return Err(BindingError::CapacityExceeded { action, max });
            }
            entry.codes.push(code);
            entry.len() - 1
        };
        debug!("Bound {} to '{}' slot {}", code, action, kept_slot);

        if !code.is_none() {
            for other in &mut self.actions {
                let keep = (other.action == action).then_some(kept_slot);
                let cleared = other.clear_input(code, keep);
                if cleared > 0 {
                    debug!("Took {} away from '{}'", code, other.action);
                }
            }
        }

        if self.policy.auto_sort {
            self.actions[action.index()].sort_keys();
        }
        Ok(())
    }

    /// Append a key to an action
    pub fn add_key(&mut self, action: Action, code: PhysicalCode) -> Result<(), BindingError> {
        let len = self.get(action).len();
        self.set_key(action, len, code)
    }

    /// Remove the key at `slot`; the last key of an action cannot be removed
    pub fn remove_key_at(&mut self, action: Action, slot: usize) -> Result<(), BindingError> {
        let entry = &mut self.actions[action.index()];
        if entry.len() == 1 {
            return Err(BindingError::WouldEmptyAction(action));
        }
        if slot >= entry.len() {
            return Err(BindingError::SlotOutOfRange { action, slot });
        }
        let removed = entry.codes.remove(slot);
        debug!("Removed {} from '{}'", removed, action);
        Ok(())
    }

    /// Replace everything with the built-in defaults
    pub fn reset_to_default(&mut self, gamepad_available: bool) {
        *self = Self::defaults(gamepad_available, self.policy);
    }

    /// True when no slot anywhere is unbound
    pub fn validate_complete(&self) -> bool {
        self.first_unbound().is_none()
    }

    /// First action with an unbound slot
    pub fn first_unbound(&self) -> Option<Action> {
        self.actions
            .iter()
            .find(|entry| entry.codes.iter().any(|code| code.is_none()))
            .map(|entry| entry.action)
    }

    /// Check if `action`'s `slot` already holds `code`
    pub fn binding_equals(&self, action: Action, slot: usize, code: PhysicalCode) -> bool {
        self.get(action).code_equals(slot, code)
    }

    /// False only when the action's single slot is unbound
    pub fn has_any_key(&self, action: Action) -> bool {
        self.get(action).has_any_key()
    }

    /// Display names of an action's inputs
    pub fn key_names(&self, action: Action) -> Vec<&'static str> {
        self.get(action).key_names()
    }

    fn sort_all(&mut self) {
        if self.policy.auto_sort {
            for entry in &mut self.actions {
                entry.sort_keys();
            }
        }
    }
}

impl Default for BindingSet {
    fn default() -> Self {
        Self::defaults(true, BindingPolicy::default())
    }
}

/// Default codes per action, indexed like [`Action::ALL`]
fn default_codes(gamepad_available: bool) -> Vec<Vec<PhysicalCode>> {
    let mut codes = vec![Vec::new(); Action::ALL.len()];
    for (action, name) in default_bindings(gamepad_available) {
        match name_to_code(name) {
            Ok(code) => codes[action.index()].push(code),
            Err(err) => error!("Skipping default control for '{}': {}", action, err),
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::code::all_codes;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn code(name: &str) -> PhysicalCode {
        name_to_code(name).unwrap()
    }

    fn keyboard_defaults() -> BindingSet {
        BindingSet::defaults(false, BindingPolicy::default())
    }

    fn assert_unique(set: &BindingSet) {
        let mut seen = HashSet::new();
        for binding in set.to_bindings() {
            if !binding.code.is_none() {
                assert!(
                    seen.insert(binding.code),
                    "{} bound twice",
                    binding.code
                );
            }
        }
    }

    #[test]
    fn test_defaults_are_sorted_and_unique() {
        let set = BindingSet::default();
        for entry in set.iter() {
            assert!(entry.codes().windows(2).all(|w| w[0] <= w[1]));
        }
        assert_unique(&set);
        assert!(set.validate_complete());
    }

    #[test]
    fn test_defaults_group_keyboard_before_gamepad() {
        let set = BindingSet::default();
        assert_eq!(
            set.key_names(Action::Down),
            vec!["Down", "D-Pad Down", "L-Stick Down"]
        );
    }

    #[test]
    fn test_rebinding_takes_key_from_previous_owner() {
        let mut set = keyboard_defaults();
        assert_eq!(set.key_names(Action::Cancel), vec!["Esc", "X"]);

        set.add_key(Action::Confirm, code("X")).unwrap();

        assert_eq!(set.key_names(Action::Cancel), vec!["Esc"]);
        assert_eq!(
            set.key_names(Action::Confirm),
            vec!["Enter", "Space", "C", "X"]
        );
        assert_eq!(set.owner_of(code("X")), Some(Action::Confirm));
    }

    #[test]
    fn test_rebinding_only_key_leaves_unbound_slot() {
        let mut set = keyboard_defaults();
        set.set_key(Action::Confirm, 0, code("D")).unwrap();

        assert_eq!(set.codes(Action::ReadyMenu), &[PhysicalCode::NONE]);
        assert!(!set.has_any_key(Action::ReadyMenu));
        assert!(!set.validate_complete());
        assert_eq!(set.first_unbound(), Some(Action::ReadyMenu));
    }

    #[test]
    fn test_set_key_overwrites_slot() {
        let mut set = keyboard_defaults();
        set.set_key(Action::Up, 0, code("W")).unwrap();
        assert_eq!(set.key_names(Action::Up), vec!["W"]);
    }

    #[test]
    fn test_set_key_past_end_appends() {
        let mut set = keyboard_defaults();
        set.set_key(Action::Up, 5, code("W")).unwrap();
        assert_eq!(set.key_names(Action::Up), vec!["Up", "W"]);
    }

    #[test]
    fn test_set_key_duplicate_within_same_action_collapses() {
        let mut set = keyboard_defaults();
        // Confirm is [Enter, Space, C]; put Enter into the C slot
        set.set_key(Action::Confirm, 2, code("Enter")).unwrap();
        assert_eq!(set.key_names(Action::Confirm), vec!["Enter", "Space"]);
    }

    #[test]
    fn test_set_key_to_none_skips_conflict_clearing() {
        let mut set = keyboard_defaults();
        set.set_key(Action::Up, 0, PhysicalCode::NONE).unwrap();
        set.set_key(Action::Down, 0, PhysicalCode::NONE).unwrap();
        assert_eq!(set.codes(Action::Up), &[PhysicalCode::NONE]);
        assert_eq!(set.codes(Action::Down), &[PhysicalCode::NONE]);
    }

    #[test]
    fn test_no_sort_when_disabled() {
        let policy = BindingPolicy {
            auto_sort: false,
            ..BindingPolicy::default()
        };
        let mut set = BindingSet::defaults(false, policy);
        set.add_key(Action::Up, code("Backspace")).unwrap();
        assert_eq!(set.key_names(Action::Up), vec!["Up", "Backspace"]);
    }

    #[test]
    fn test_add_key_capacity() {
        let mut set = keyboard_defaults();
        let initial = set.get(Action::Cancel).len();
        let spare: Vec<PhysicalCode> = ["F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9"]
            .iter()
            .map(|name| code(name))
            .collect();

        let mut successes = 0;
        for &key in spare.iter().take(MAX_KEYS_PER_ACTION - initial) {
            set.add_key(Action::Cancel, key).unwrap();
            successes += 1;
        }
        assert_eq!(successes, MAX_KEYS_PER_ACTION - initial);

        let before = set.clone();
        let err = set.add_key(Action::Cancel, spare[8]).unwrap_err();
        assert!(matches!(
            err,
            BindingError::CapacityExceeded {
                action: Action::Cancel,
                max: MAX_KEYS_PER_ACTION
            }
        ));
        assert_eq!(set, before);
    }

    #[test]
    fn test_capacity_rejection_does_not_steal_key() {
        let policy = BindingPolicy {
            max_keys_per_action: 1,
            ..BindingPolicy::default()
        };
        let mut set = BindingSet::defaults(false, policy);
        let before = set.clone();

        assert!(set.add_key(Action::Up, code("Down")).is_err());
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_last_key_fails() {
        let mut set = keyboard_defaults();
        let before = set.clone();

        let err = set.remove_key_at(Action::Up, 0).unwrap_err();
        assert!(matches!(err, BindingError::WouldEmptyAction(Action::Up)));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_key_at() {
        let mut set = keyboard_defaults();
        set.remove_key_at(Action::Confirm, 0).unwrap();
        assert_eq!(set.key_names(Action::Confirm), vec!["Space", "C"]);

        let err = set.remove_key_at(Action::Confirm, 7).unwrap_err();
        assert!(matches!(err, BindingError::SlotOutOfRange { slot: 7, .. }));
    }

    #[test]
    fn test_reset_to_default() {
        let mut set = keyboard_defaults();
        set.set_key(Action::Menu, 0, code("Q")).unwrap();
        set.reset_to_default(true);
        assert_eq!(set, BindingSet::default());
    }

    #[test]
    fn test_binding_equals() {
        let set = keyboard_defaults();
        assert!(set.binding_equals(Action::Cancel, 1, code("X")));
        assert!(!set.binding_equals(Action::Cancel, 0, code("X")));
        assert!(!set.binding_equals(Action::Cancel, 2, code("X")));
    }

    #[test]
    fn test_keys_text() {
        let set = keyboard_defaults();
        assert_eq!(set.get(Action::Menu).keys_text(), "Shift, Z");
    }

    #[test]
    fn test_bindings_round_trip() {
        let mut set = BindingSet::default();
        set.add_key(Action::Menu, code("Right Trigger")).unwrap();
        set.set_key(Action::Up, 0, code("W")).unwrap();

        let saved = set.to_bindings();
        let loaded = BindingSet::from_bindings(&saved, true, BindingPolicy::default());
        assert_eq!(loaded.to_bindings(), saved);
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_from_bindings_fills_missing_actions() {
        let saved = vec![Binding::new(Action::Cancel, code("Q"))];
        let set = BindingSet::from_bindings(&saved, false, BindingPolicy::default());

        assert_eq!(set.key_names(Action::Cancel), vec!["Q"]);
        assert_eq!(set.key_names(Action::Up), vec!["Up"]);
    }

    #[test]
    fn test_from_bindings_keeps_saved_unbound_slot() {
        let saved = vec![Binding::new(Action::Up, PhysicalCode::NONE)];
        let set = BindingSet::from_bindings(&saved, false, BindingPolicy::default());
        assert!(!set.validate_complete());
    }

    #[test]
    fn test_from_bindings_truncates_past_capacity() {
        let saved: Vec<Binding> = all_codes()
            .take(MAX_KEYS_PER_ACTION + 3)
            .map(|c| Binding::new(Action::Menu, c))
            .collect();
        let set = BindingSet::from_bindings(&saved, false, BindingPolicy::default());
        assert_eq!(set.get(Action::Menu).len(), MAX_KEYS_PER_ACTION);
    }

    proptest! {
        #[test]
        fn prop_set_key_keeps_invariants(
            edits in prop::collection::vec((0usize..10, 0usize..12, 0usize..150), 1..60)
        ) {
            let codes: Vec<PhysicalCode> = all_codes().collect();
            let mut set = BindingSet::default();

            for (action_index, slot, code_index) in edits {
                let action = Action::ALL[action_index];
                let code = codes[code_index % codes.len()];
                let before = set.clone();
                if set.set_key(action, slot, code).is_err() {
                    prop_assert_eq!(&set, &before);
                }

                let mut seen = HashSet::new();
                for entry in set.iter() {
                    prop_assert!(!entry.is_empty());
                    prop_assert!(entry.len() <= MAX_KEYS_PER_ACTION);
                    prop_assert!(entry.codes().windows(2).all(|w| w[0] <= w[1]));
                    for &c in entry.codes() {
                        if !c.is_none() {
                            prop_assert!(seen.insert(c), "{} bound twice", c);
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_remove_on_single_key_always_fails(slot in 0usize..20) {
            let mut set = BindingSet::defaults(false, BindingPolicy::default());
            let before = set.clone();
            let result = set.remove_key_at(Action::Left, slot);
            prop_assert!(matches!(result, Err(BindingError::WouldEmptyAction(Action::Left))));
            prop_assert_eq!(set, before);
        }
    }
}
