//! The `shortcut.get`, `shortcut.update` and `shortcut.prune` procedures.

use reqwest::Client;
use tracing::debug;

use mailkeys_config::{AuthStrategy, Shortcut};

use crate::auth::authorize;
use crate::endpoints::{procedure_url, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::{GetShortcutsData, TrpcResponse, UpdateShortcutsInput, UserHotkeys};

/// Fetch the stored override row; `None` when the user never saved any.
pub async fn get_shortcuts(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<Option<UserHotkeys>> {
    let url = procedure_url(base_url, "shortcut.get");
    let builder = authorize(client.get(&url), auth);
    let response = send_request_with_retry(builder, max_retries).await?;

    let body: TrpcResponse<GetShortcutsData> = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse shortcut.get response: {}", e))
    })?;

    let row = body.result.data.shortcuts;
    debug!(
        count = row.as_ref().map_or(0, |r| r.shortcuts.len()),
        "Fetched shortcut overrides"
    );
    Ok(row)
}

/// Replace the stored overrides with `shortcuts`.
pub async fn update_shortcuts(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    shortcuts: &[Shortcut],
    max_retries: usize,
) -> Result<()> {
    let url = procedure_url(base_url, "shortcut.update");
    let builder = authorize(client.post(&url), auth).json(&UpdateShortcutsInput { shortcuts });
    send_request_with_retry(builder, max_retries).await?;

    debug!(count = shortcuts.len(), "Stored shortcut overrides");
    Ok(())
}

/// Delete every stored override for the user.
pub async fn prune_shortcuts(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<()> {
    let url = procedure_url(base_url, "shortcut.prune");
    let builder = authorize(client.post(&url), auth);
    send_request_with_retry(builder, max_retries).await?;

    debug!("Pruned shortcut overrides");
    Ok(())
}
