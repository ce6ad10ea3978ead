//! Shortcut catalog, override resolution and scoped dispatch for mailkeys.
//!
//! Responsibilities:
//! - Own the compiled-in default bindings (`catalog`).
//! - Merge user overrides onto them (`resolver`).
//! - Match key events to actions within an activation scope (`dispatcher`, `router`).
//!
//! Does NOT handle:
//! - Fetching or persisting overrides (see `mailkeys-client`).
//! - Reading terminal input; callers convert their events into `KeyPress`.

pub mod catalog;
pub mod dispatcher;
pub mod event;
pub mod resolver;
pub mod router;

pub use catalog::{DefaultBinding, ScopeSet};
pub use dispatcher::{
    DispatchError, DispatchOptions, Handler, ScopeDispatch, ShortcutDispatcher, noop_handlers,
};
pub use event::{KeyPhase, KeyPress};
pub use resolver::{filter_by_scope, orphaned_overrides, resolve};
pub use router::ScopeRouter;
