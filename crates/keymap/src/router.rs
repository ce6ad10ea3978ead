//! Scope routing across several dispatchers.
//!
//! Responsibilities:
//! - Hold one dispatcher per scope.
//! - Track which scope is active through a stack.
//! - Stamp incoming events with the active scope and forward them.
//!
//! Does NOT handle:
//! - Precedence between scopes beyond "top of stack is active".
//!
//! Invariants:
//! - At most one dispatcher is registered per scope.
//! - An event reaches at most one dispatcher.

use std::collections::BTreeMap;

use mailkeys_config::{Scope, Shortcut, ShortcutAction};

use crate::dispatcher::ScopeDispatch;
use crate::event::KeyPress;
use crate::resolver::filter_by_scope;

/// Routes key events to the dispatcher of the active scope.
#[derive(Default)]
pub struct ScopeRouter {
    dispatchers: BTreeMap<Scope, Box<dyn ScopeDispatch>>,
    stack: Vec<Scope>,
}

impl std::fmt::Debug for ScopeRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRouter")
            .field("scopes", &self.dispatchers.keys().collect::<Vec<_>>())
            .field("stack", &self.stack)
            .finish()
    }
}

impl ScopeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dispatcher, replacing any previous one for the same scope.
    pub fn register<D>(&mut self, dispatcher: D) -> Option<Box<dyn ScopeDispatch>>
    where
        D: ScopeDispatch + 'static,
    {
        self.dispatchers
            .insert(dispatcher.scope(), Box::new(dispatcher))
    }

    pub fn push_scope(&mut self, scope: Scope) {
        if !self.dispatchers.contains_key(&scope) {
            tracing::warn!(%scope, "Activating a scope with no registered dispatcher");
        }
        self.stack.push(scope);
    }

    pub fn pop_scope(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    pub fn active_scope(&self) -> Option<Scope> {
        self.stack.last().copied()
    }

    /// Stamp the event with the active scope and dispatch it there.
    pub fn route(&mut self, event: &mut KeyPress) -> Option<ShortcutAction> {
        let scope = self.active_scope()?;
        event.scope = Some(scope);
        self.dispatchers.get_mut(&scope)?.dispatch(event)
    }

    /// Rebind every dispatcher to a new effective binding set.
    pub fn rebind_all(&mut self, effective: &[Shortcut]) {
        for (scope, dispatcher) in &mut self.dispatchers {
            dispatcher.rebind(&filter_by_scope(effective, *scope));
        }
    }
}
