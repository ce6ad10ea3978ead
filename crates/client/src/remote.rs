//! Abstraction over where shortcut overrides are stored.

use async_trait::async_trait;

use mailkeys_config::Shortcut;

use crate::error::Result;
use crate::models::UserHotkeys;

/// Remote storage for a user's shortcut overrides.
///
/// Implemented by [`crate::ShortcutClient`]; the gateway only depends on
/// this trait so it can run against an in-memory store.
#[async_trait]
pub trait ShortcutRemote: Send + Sync {
    /// `shortcut.get`: the stored row, or `None` if there is none.
    async fn get(&self) -> Result<Option<UserHotkeys>>;

    /// `shortcut.update`: store `shortcuts` as the complete override set.
    async fn update(&self, shortcuts: &[Shortcut]) -> Result<()>;

    /// `shortcut.prune`: delete all stored overrides.
    async fn prune(&self) -> Result<()>;
}
