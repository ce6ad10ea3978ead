//! Validation of shortcut records before they are persisted.
//!
//! Responsibilities:
//! - Reject malformed `Shortcut` records (empty action, empty keys, unknown scope).
//! - Reject override sets that bind the same action twice.
//! - Report combinations shared by several actions in one scope.
//!
//! Does NOT handle:
//! - Server-side validation (the remote applies its own schema).
//! - Merging overrides with defaults (see the keymap crate's resolver).
//!
//! Invariants:
//! - Validation is pure; nothing here touches the network or the cache.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::notation::KeyNotation;
use crate::types::{OverrideSet, Scope, Shortcut, ShortcutAction};

/// Errors that make a shortcut unfit for persistence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("shortcut action must not be empty")]
    EmptyAction,

    #[error("shortcut '{action}' has no keys")]
    EmptyKeys { action: String },

    #[error("shortcut '{action}' contains an empty key token")]
    EmptyKey { action: String },

    #[error("unknown scope '{scope}' for shortcut '{action}'")]
    UnknownScope { action: String, scope: String },

    #[error("unknown action '{action}' in scope '{scope}'")]
    UnknownAction { action: String, scope: Scope },

    #[error("action '{action}' appears more than once")]
    DuplicateAction { action: String },
}

/// Structural checks on a single shortcut.
///
/// Does not require the action to be one this build knows about; see
/// [`validate_known_action`] for that.
pub fn validate_shortcut(shortcut: &Shortcut) -> Result<(), ValidationError> {
    if shortcut.action.trim().is_empty() {
        return Err(ValidationError::EmptyAction);
    }
    if shortcut.keys.is_empty() {
        return Err(ValidationError::EmptyKeys {
            action: shortcut.action.clone(),
        });
    }
    if shortcut.keys.iter().any(|k| k.trim().is_empty()) {
        return Err(ValidationError::EmptyKey {
            action: shortcut.action.clone(),
        });
    }
    if shortcut.scope_kind().is_none() {
        return Err(ValidationError::UnknownScope {
            action: shortcut.action.clone(),
            scope: shortcut.scope.clone(),
        });
    }
    Ok(())
}

/// Structural checks plus: the action must exist in the shortcut's scope.
pub fn validate_known_action(shortcut: &Shortcut) -> Result<ShortcutAction, ValidationError> {
    validate_shortcut(shortcut)?;
    let scope = shortcut
        .scope_kind()
        .ok_or_else(|| ValidationError::UnknownScope {
            action: shortcut.action.clone(),
            scope: shortcut.scope.clone(),
        })?;
    ShortcutAction::parse(scope, &shortcut.action).ok_or_else(|| ValidationError::UnknownAction {
        action: shortcut.action.clone(),
        scope,
    })
}

/// Validate every entry and reject duplicate actions.
pub fn validate_override_set(overrides: &OverrideSet) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for shortcut in overrides {
        validate_shortcut(shortcut)?;
        if !seen.insert(shortcut.action.as_str()) {
            return Err(ValidationError::DuplicateAction {
                action: shortcut.action.clone(),
            });
        }
    }
    Ok(())
}

/// A canonical combination bound to more than one action in the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub scope: String,
    pub combination: String,
    pub actions: Vec<String>,
}

/// Find combinations shared by several actions within a scope.
///
/// Conflicts are not errors: the dispatcher picks the first handler in
/// declaration order. Callers surface them as warnings.
pub fn find_conflicts(shortcuts: &[Shortcut], notation: &KeyNotation) -> Vec<Conflict> {
    let mut by_combination: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();

    for shortcut in shortcuts {
        let combination = notation.normalize(&shortcut.keys);
        by_combination
            .entry((shortcut.scope.clone(), combination))
            .or_default()
            .push(shortcut.action.clone());
    }

    by_combination
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .map(|((scope, combination), actions)| Conflict {
            scope,
            combination,
            actions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Host, HostPlatform, KeyboardLayout};
    use crate::types::{GlobalAction, NavigationAction};

    fn pc() -> KeyNotation {
        KeyNotation::new(Host::new(HostPlatform::Other, KeyboardLayout::Standard))
    }

    #[test]
    fn test_valid_shortcut() {
        let shortcut = Shortcut::new(NavigationAction::Inbox, &["mod", "i"]);
        assert!(validate_shortcut(&shortcut).is_ok());
        assert_eq!(
            validate_known_action(&shortcut),
            Ok(ShortcutAction::Navigation(NavigationAction::Inbox))
        );
    }

    #[test]
    fn test_rejects_empty_action_and_keys() {
        let mut shortcut = Shortcut::new(GlobalAction::NewEmail, &["c"]);
        shortcut.action = "  ".to_string();
        assert_eq!(validate_shortcut(&shortcut), Err(ValidationError::EmptyAction));

        let shortcut = Shortcut::new(GlobalAction::NewEmail, &[] as &[&str]);
        assert!(matches!(
            validate_shortcut(&shortcut),
            Err(ValidationError::EmptyKeys { .. })
        ));

        let shortcut = Shortcut::new(GlobalAction::NewEmail, &["mod", ""]);
        assert!(matches!(
            validate_shortcut(&shortcut),
            Err(ValidationError::EmptyKey { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_scope() {
        let mut shortcut = Shortcut::new(GlobalAction::NewEmail, &["c"]);
        shortcut.scope = "sidebar".to_string();
        assert!(matches!(
            validate_shortcut(&shortcut),
            Err(ValidationError::UnknownScope { .. })
        ));
    }

    #[test]
    fn test_rejects_action_outside_scope() {
        let mut shortcut = Shortcut::new(GlobalAction::NewEmail, &["c"]);
        shortcut.scope = "navigation".to_string();
        assert!(validate_shortcut(&shortcut).is_ok());
        assert_eq!(
            validate_known_action(&shortcut),
            Err(ValidationError::UnknownAction {
                action: "newEmail".to_string(),
                scope: Scope::Navigation,
            })
        );
    }

    #[test]
    fn test_rejects_duplicate_actions() {
        let set = OverrideSet::new(vec![
            Shortcut::new(GlobalAction::NewEmail, &["c"]),
            Shortcut::new(GlobalAction::NewEmail, &["n"]),
        ]);
        assert_eq!(
            validate_override_set(&set),
            Err(ValidationError::DuplicateAction {
                action: "newEmail".to_string()
            })
        );
    }

    #[test]
    fn test_find_conflicts_uses_canonical_form() {
        let shortcuts = vec![
            Shortcut::new(GlobalAction::CommandPalette, &["mod", "k"]),
            Shortcut::new(GlobalAction::NewEmail, &["Control", "K"]),
            Shortcut::new(NavigationAction::Inbox, &["mod", "k"]),
        ];

        let conflicts = find_conflicts(&shortcuts, &pc());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].scope, "global");
        assert_eq!(conflicts[0].combination, "control+k");
        assert_eq!(conflicts[0].actions, vec!["commandPalette", "newEmail"]);
    }

    #[test]
    fn test_no_conflicts() {
        let shortcuts = vec![
            Shortcut::new(GlobalAction::CommandPalette, &["mod", "k"]),
            Shortcut::new(GlobalAction::NewEmail, &["c"]),
        ];
        assert!(find_conflicts(&shortcuts, &pc()).is_empty());
    }
}
