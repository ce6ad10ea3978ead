//! Compiled-in default shortcut catalog.
//!
//! Responsibilities:
//! - Define the default key binding and description of every known action.
//! - Expose the defaults as `Shortcut` records for the resolver.
//! - Partition shortcuts by scope (`ScopeSet`).
//!
//! Does NOT handle:
//! - Applying user overrides (see `resolver`).
//! - Matching key events (see `dispatcher`).
//!
//! Invariants:
//! - The catalog is built once, lazily, and never mutated.
//! - Every action in `ShortcutAction::all()` has exactly one default binding.
//! - Binding order is stable for deterministic listing output.

mod compose;
mod global;
mod navigation;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use mailkeys_config::{Scope, Shortcut, ShortcutAction};

/// A default binding as authored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBinding {
    pub action: ShortcutAction,
    pub keys: &'static [&'static str],
    pub description: &'static str,
    pub prevent_default: bool,
}

impl DefaultBinding {
    pub fn to_shortcut(&self) -> Shortcut {
        Shortcut::new(self.action, self.keys).with_prevent_default(self.prevent_default)
    }
}

struct Catalog {
    bindings: Vec<DefaultBinding>,
    shortcuts: Vec<Shortcut>,
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let mut bindings = Vec::new();
        bindings.extend(global::bindings());
        bindings.extend(compose::bindings());
        bindings.extend(navigation::bindings());
        let shortcuts = bindings.iter().map(DefaultBinding::to_shortcut).collect();
        Catalog {
            bindings,
            shortcuts,
        }
    })
}

/// Default shortcuts for every known action, grouped by scope.
pub fn defaults() -> &'static [Shortcut] {
    &catalog().shortcuts
}

/// Default bindings with their descriptions.
pub fn bindings() -> &'static [DefaultBinding] {
    &catalog().bindings
}

/// The default binding for an action.
pub fn default_for(action: ShortcutAction) -> Option<&'static DefaultBinding> {
    bindings().iter().find(|b| b.action == action)
}

/// Human-readable description of an action.
pub fn describe(action: ShortcutAction) -> &'static str {
    default_for(action).map_or("", |b| b.description)
}

/// Shortcuts partitioned by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    by_scope: BTreeMap<String, Vec<Shortcut>>,
}

impl ScopeSet {
    /// Partition shortcuts by their `scope` field, keeping relative order.
    pub fn partition(shortcuts: &[Shortcut]) -> Self {
        let mut by_scope: BTreeMap<String, Vec<Shortcut>> = BTreeMap::new();
        for shortcut in shortcuts {
            by_scope
                .entry(shortcut.scope.clone())
                .or_default()
                .push(shortcut.clone());
        }
        Self { by_scope }
    }

    pub fn get(&self, scope: Scope) -> &[Shortcut] {
        self.by_scope
            .get(scope.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Scope names present, including any this build does not know.
    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.by_scope.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailkeys_config::{GlobalAction, NavigationAction};

    #[test]
    fn every_action_has_one_default() {
        for action in ShortcutAction::all() {
            let count = bindings().iter().filter(|b| b.action == action).count();
            assert_eq!(count, 1, "{action} should have exactly one default");
        }
        assert_eq!(defaults().len(), ShortcutAction::all().count());
    }

    #[test]
    fn defaults_are_valid_records() {
        for shortcut in defaults() {
            assert!(mailkeys_config::validate::validate_known_action(shortcut).is_ok());
        }
    }

    #[test]
    fn defaults_have_no_conflicts() {
        use mailkeys_config::{Host, HostPlatform, KeyNotation, KeyboardLayout};
        for platform in [HostPlatform::Apple, HostPlatform::Other] {
            for layout in [KeyboardLayout::Standard, KeyboardLayout::Dvorak] {
                let notation = KeyNotation::new(Host::new(platform, layout));
                let conflicts = mailkeys_config::validate::find_conflicts(defaults(), &notation);
                assert!(conflicts.is_empty(), "{platform}/{layout}: {conflicts:?}");
            }
        }
    }

    #[test]
    fn catalog_is_shared() {
        assert!(std::ptr::eq(defaults(), defaults()));
    }

    #[test]
    fn lookup_and_describe() {
        let binding = default_for(GlobalAction::CommandPalette.into()).unwrap();
        assert_eq!(binding.keys, ["mod", "k"]);
        assert_eq!(describe(NavigationAction::Inbox.into()), "Go to inbox");
    }

    #[test]
    fn partition_by_scope() {
        let set = ScopeSet::partition(defaults());
        assert_eq!(set.get(Scope::Compose).len(), 1);
        assert_eq!(set.get(Scope::Global).len(), 4);
        assert_eq!(set.get(Scope::Navigation).len(), 7);
        assert_eq!(
            set.scope_names().collect::<Vec<_>>(),
            vec!["compose", "global", "navigation"]
        );
    }
}
