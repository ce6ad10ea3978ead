//! Scoped shortcut dispatch.
//!
//! Responsibilities:
//! - Build the working set of (action, combination) pairs for one scope.
//! - Match key-down events against it and run the handler of the first match.
//!
//! Does NOT handle:
//! - Choosing the active scope (see `router`).
//! - Merging overrides (see `resolver`).
//!
//! Invariants:
//! - At most one handler runs per event.
//! - Ties between actions bound to the same combination go to the action declared first.
//! - Key-up events, click pseudo-keys and events from other scopes never match.

use std::collections::BTreeMap;
use std::fmt;

use mailkeys_config::{KeyNotation, Scope, ScopedAction, Shortcut, ShortcutAction};
use thiserror::Error;

use crate::event::{KeyPhase, KeyPress};

/// Callback run when an action fires.
pub type Handler = Box<dyn FnMut() + Send>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("dispatcher options name scope '{options}' but its actions belong to '{actions}'")]
    ScopeMismatch { options: Scope, actions: Scope },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    pub scope: Scope,
    /// Suppress host default handling for every match, regardless of the shortcut's own flag
    pub prevent_default: bool,
}

impl DispatchOptions {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            prevent_default: false,
        }
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<A> {
    action: A,
    combination: String,
    prevent_default: bool,
}

/// Matches key events for the actions of one scope.
pub struct ShortcutDispatcher<A: ScopedAction> {
    notation: KeyNotation,
    options: DispatchOptions,
    handlers: BTreeMap<A, Handler>,
    entries: Vec<Entry<A>>,
}

impl<A: ScopedAction> fmt::Debug for ShortcutDispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDispatcher")
            .field("options", &self.options)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("entries", &self.entries)
            .finish()
    }
}

impl<A: ScopedAction> ShortcutDispatcher<A> {
    /// Create a dispatcher over resolved shortcuts.
    ///
    /// Shortcuts from other scopes, with unknown action names, or without a
    /// handler are left out of the working set.
    pub fn new(
        shortcuts: &[Shortcut],
        handlers: BTreeMap<A, Handler>,
        options: DispatchOptions,
        notation: KeyNotation,
    ) -> Result<Self, DispatchError> {
        if options.scope != A::SCOPE {
            return Err(DispatchError::ScopeMismatch {
                options: options.scope,
                actions: A::SCOPE,
            });
        }

        let mut dispatcher = Self {
            notation,
            options,
            handlers,
            entries: Vec::new(),
        };
        dispatcher.rebind(shortcuts);
        Ok(dispatcher)
    }

    /// Recompute the working set, e.g. after the override set changed.
    pub fn rebind(&mut self, shortcuts: &[Shortcut]) {
        let scope = self.options.scope.as_str();
        let notation = self.notation;

        self.entries = self
            .handlers
            .keys()
            .filter_map(|action| {
                let shortcut = shortcuts
                    .iter()
                    .find(|s| s.scope == scope && s.action == action.name())?;
                Some(Entry {
                    action: *action,
                    combination: notation.normalize(&shortcut.keys),
                    prevent_default: shortcut.prevent_default,
                })
            })
            .collect();

        tracing::debug!(
            scope,
            bound = self.entries.len(),
            handlers = self.handlers.len(),
            "Rebuilt shortcut dispatcher"
        );
    }

    pub fn scope(&self) -> Scope {
        self.options.scope
    }

    /// The working set as (action, canonical combination), in dispatch order.
    pub fn bindings(&self) -> impl Iterator<Item = (A, &str)> {
        self.entries
            .iter()
            .map(|e| (e.action, e.combination.as_str()))
    }

    /// Match an event and run the first matching handler.
    ///
    /// Returns the action that fired.
    pub fn dispatch(&mut self, event: &mut KeyPress) -> Option<A> {
        if event.phase != KeyPhase::Down || event.is_click() {
            return None;
        }
        if event.scope.is_some_and(|s| s != self.options.scope) {
            return None;
        }

        let pressed = event.combination();
        let entry = self.entries.iter().find(|e| e.combination == pressed)?;
        let action = entry.action;

        if entry.prevent_default || self.options.prevent_default {
            event.prevent_default();
        }

        if let Some(handler) = self.handlers.get_mut(&action) {
            tracing::trace!(%action, combination = %pressed, "Dispatching shortcut");
            handler();
        }
        Some(action)
    }
}

/// Object-safe view of a dispatcher, used by the router to hold dispatchers
/// of different action types.
pub trait ScopeDispatch: Send {
    fn scope(&self) -> Scope;

    fn dispatch(&mut self, event: &mut KeyPress) -> Option<ShortcutAction>;

    fn rebind(&mut self, shortcuts: &[Shortcut]);
}

impl<A> ScopeDispatch for ShortcutDispatcher<A>
where
    A: ScopedAction + Into<ShortcutAction>,
{
    fn scope(&self) -> Scope {
        ShortcutDispatcher::scope(self)
    }

    fn dispatch(&mut self, event: &mut KeyPress) -> Option<ShortcutAction> {
        ShortcutDispatcher::dispatch(self, event).map(Into::into)
    }

    fn rebind(&mut self, shortcuts: &[Shortcut]) {
        ShortcutDispatcher::rebind(self, shortcuts)
    }
}

/// Handlers that do nothing, for every action of a scope.
///
/// Useful when the caller only cares about which action matched.
pub fn noop_handlers<A: ScopedAction>() -> BTreeMap<A, Handler> {
    A::all()
        .iter()
        .map(|action| (*action, Box::new(|| {}) as Handler))
        .collect()
}
