//! Configuration, shortcut types and key notation for mailkeys.
//!
//! This crate provides the leaf layer of the workspace: the typed action set,
//! the persisted `Shortcut` record, key token normalization for matching and
//! display, host detection, and the environment-driven `ConfigLoader`.

pub mod constants;
pub mod host;
mod loader;
pub mod notation;
pub mod types;
pub mod validate;

pub use host::{Host, HostPlatform, HostSignals, KeyboardLayout};
pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use notation::{
    KeyCombination, KeyNotation, KeybindError, parse_combination, unshifted_symbol,
};
pub use types::{
    AuthStrategy, ComposeAction, Config, ConnectionConfig, GlobalAction, NavigationAction,
    OverrideSet, Scope, ScopedAction, Shortcut, ShortcutAction,
};
pub use validate::{Conflict, ValidationError};
