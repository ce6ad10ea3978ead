//! Shortcut settings methods for [`ShortcutClient`].

use async_trait::async_trait;

use mailkeys_config::Shortcut;

use crate::client::ShortcutClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::UserHotkeys;
use crate::remote::ShortcutRemote;

impl ShortcutClient {
    /// Fetch the stored override row; `None` when the user never saved any.
    pub async fn get_shortcuts(&self) -> Result<Option<UserHotkeys>> {
        endpoints::get_shortcuts(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }

    /// Replace the stored overrides with `shortcuts`.
    pub async fn update_shortcuts(&self, shortcuts: &[Shortcut]) -> Result<()> {
        endpoints::update_shortcuts(
            &self.http,
            &self.base_url,
            &self.auth,
            shortcuts,
            self.max_retries,
        )
        .await
    }

    /// Delete every stored override.
    pub async fn prune_shortcuts(&self) -> Result<()> {
        endpoints::prune_shortcuts(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }
}

#[async_trait]
impl ShortcutRemote for ShortcutClient {
    async fn get(&self) -> Result<Option<UserHotkeys>> {
        self.get_shortcuts().await
    }

    async fn update(&self, shortcuts: &[Shortcut]) -> Result<()> {
        self.update_shortcuts(shortcuts).await
    }

    async fn prune(&self) -> Result<()> {
        self.prune_shortcuts().await
    }
}
