//! Override resolution: defaults plus a user's overrides.
//!
//! Responsibilities:
//! - Substitute overrides for the defaults of the same action.
//! - Filter a binding list down to one scope.
//! - Report overrides whose action has no default.
//!
//! Does NOT handle:
//! - Fetching overrides (see the client crate's gateway).
//! - Validation of override records (see `mailkeys_config::validate`).
//!
//! Invariants:
//! - `resolve` substitutes only; it never inserts an action absent from the defaults.
//! - Output order follows the defaults.
//! - With duplicate overrides for one action, the last one wins.

use mailkeys_config::{OverrideSet, Scope, Shortcut};

/// Merge overrides onto defaults, producing the effective bindings.
pub fn resolve(defaults: &[Shortcut], overrides: &OverrideSet) -> Vec<Shortcut> {
    let orphans = orphaned_overrides(defaults, overrides);
    if !orphans.is_empty() {
        tracing::debug!(
            count = orphans.len(),
            actions = ?orphans.iter().map(|s| s.action.as_str()).collect::<Vec<_>>(),
            "Ignoring overrides with no default binding"
        );
    }

    defaults
        .iter()
        .map(|default| {
            overrides
                .get(&default.action)
                .unwrap_or(default)
                .clone()
        })
        .collect()
}

/// Entries whose scope matches, in their original relative order.
pub fn filter_by_scope(all: &[Shortcut], scope: Scope) -> Vec<Shortcut> {
    all.iter()
        .filter(|s| s.scope == scope.as_str())
        .cloned()
        .collect()
}

/// Overrides that `resolve` drops because no default shares their action.
pub fn orphaned_overrides<'a>(
    defaults: &[Shortcut],
    overrides: &'a OverrideSet,
) -> Vec<&'a Shortcut> {
    overrides
        .iter()
        .filter(|o| !defaults.iter().any(|d| d.action == o.action))
        .collect()
}
