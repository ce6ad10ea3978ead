//! Configuration and shortcut type definitions.
//!
//! Responsibilities:
//! - Define the scopes and actions shortcuts can be bound to.
//! - Define the persisted `Shortcut` record and the user's `OverrideSet`.
//! - Define connection and authentication settings.
//!
//! Does NOT handle:
//! - Configuration loading from environment variables (see `loader` module).
//! - Key token normalization (see `notation` module at crate root).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

pub mod action;
mod auth;
mod connection;
pub mod shortcut;

pub use action::{
    ComposeAction, GlobalAction, NavigationAction, Scope, ScopedAction, ShortcutAction,
};
pub use auth::AuthStrategy;
pub use connection::{Config, ConnectionConfig};
pub use shortcut::{OverrideSet, Shortcut};
