//! Shortcut value types shared by the catalog, the resolver and the remote client.
//!
//! Responsibilities:
//! - Define `Shortcut`, the persisted action -> keys binding.
//! - Define `OverrideSet`, a user's list of replacement bindings.
//!
//! Does NOT handle:
//! - Validation (see `validate` at crate root).
//! - Merging overrides with defaults (see the keymap crate's resolver).
//!
//! Invariants:
//! - `Shortcut` serializes with camelCase field names (`preventDefault`).
//! - After `upsert` or `dedup` there is at most one entry per action, and it
//!   agrees with what `get` returned for the last duplicate.

use serde::{Deserialize, Serialize};

use super::action::{Scope, ShortcutAction};

/// A binding of an action to an ordered key token sequence within a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    /// Wire name of the action, unique within its scope
    pub action: String,
    /// Key tokens in authored order, e.g. `["mod", "k"]`
    pub keys: Vec<String>,
    /// Wire name of the scope
    pub scope: String,
    /// Suppress the host's default handling when this shortcut fires
    #[serde(default)]
    pub prevent_default: bool,
}

impl Shortcut {
    /// Build a shortcut for a known action.
    pub fn new<A, K>(action: A, keys: &[K]) -> Self
    where
        A: Into<ShortcutAction>,
        K: AsRef<str>,
    {
        let action = action.into();
        Self {
            action: action.name().to_string(),
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
            scope: action.scope().as_str().to_string(),
            prevent_default: false,
        }
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    /// The typed scope, if the wire name is known.
    pub fn scope_kind(&self) -> Option<Scope> {
        self.scope.parse().ok()
    }

    /// The typed action, if both scope and action name are known.
    pub fn typed_action(&self) -> Option<ShortcutAction> {
        ShortcutAction::parse(self.scope_kind()?, &self.action)
    }
}

/// A user's replacement bindings, keyed by action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet {
    shortcuts: Vec<Shortcut>,
}

impl OverrideSet {
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        Self { shortcuts }
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn as_slice(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shortcut> {
        self.shortcuts.iter()
    }

    /// The override for an action. With duplicate entries the last one wins.
    pub fn get(&self, action: &str) -> Option<&Shortcut> {
        self.shortcuts.iter().rev().find(|s| s.action == action)
    }

    /// Insert or replace the override for `shortcut.action`.
    ///
    /// A replaced entry keeps the position of the first entry for that
    /// action and any later duplicates are dropped; a new entry is appended.
    /// Returns the override that was in effect before, if any.
    pub fn upsert(&mut self, shortcut: Shortcut) -> Option<Shortcut> {
        let Some(first) = self
            .shortcuts
            .iter()
            .position(|s| s.action == shortcut.action)
        else {
            self.shortcuts.push(shortcut);
            return None;
        };

        let mut previous = std::mem::replace(&mut self.shortcuts[first], shortcut);
        let mut index = first + 1;
        while index < self.shortcuts.len() {
            if self.shortcuts[index].action == self.shortcuts[first].action {
                previous = self.shortcuts.remove(index);
            } else {
                index += 1;
            }
        }
        Some(previous)
    }

    /// Collapse duplicate actions into one entry each.
    ///
    /// The last entry for an action wins, as with [`OverrideSet::get`], and
    /// takes the position of the first. Returns how many entries were dropped.
    pub fn dedup(&mut self) -> usize {
        let before = self.shortcuts.len();
        let mut kept: Vec<Shortcut> = Vec::with_capacity(before);
        for shortcut in std::mem::take(&mut self.shortcuts) {
            match kept.iter_mut().find(|s| s.action == shortcut.action) {
                Some(existing) => *existing = shortcut,
                None => kept.push(shortcut),
            }
        }
        self.shortcuts = kept;
        before - self.shortcuts.len()
    }

    /// Remove the override for an action, returning it.
    pub fn remove(&mut self, action: &str) -> Option<Shortcut> {
        let index = self.shortcuts.iter().position(|s| s.action == action)?;
        Some(self.shortcuts.remove(index))
    }
}

impl From<Vec<Shortcut>> for OverrideSet {
    fn from(shortcuts: Vec<Shortcut>) -> Self {
        Self::new(shortcuts)
    }
}

impl<'a> IntoIterator for &'a OverrideSet {
    type Item = &'a Shortcut;
    type IntoIter = std::slice::Iter<'a, Shortcut>;

    fn into_iter(self) -> Self::IntoIter {
        self.shortcuts.iter()
    }
}
