//! Cached, optimistically updated view of a user's shortcut overrides.
//!
//! Responsibilities:
//! - Serve the override set from an in-memory cache, loading it on a miss.
//! - Apply single-shortcut edits speculatively and roll them back if the
//!   remote write fails.
//! - Reset all overrides and drop the cached copy.
//!
//! Does NOT handle:
//! - Transport, auth or retries (see [`crate::ShortcutClient`]).
//! - Matching keys to actions (see `mailkeys-keymap`).
//!
//! Invariants:
//! - After a failed `replace` the cache holds exactly what it held before
//!   the call, or nothing if nothing was cached.
//! - `replace` and `reset` never interleave; they share one async mutex.
//! - Sets read from the remote hold at most one entry per action; duplicates
//!   collapse with the last one winning.

use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use mailkeys_config::validate::{validate_override_set, validate_shortcut};
use mailkeys_config::{OverrideSet, Shortcut};
use mailkeys_keymap::resolve;

use crate::error::Result;
use crate::remote::ShortcutRemote;

/// Cache key of the override set, named after the query it mirrors.
const OVERRIDES_KEY: &str = "shortcut.get";

/// Front door for reading and writing shortcut overrides.
pub struct SettingsGateway<R> {
    remote: R,
    cache: Cache<&'static str, OverrideSet>,
    write_lock: Mutex<()>,
}

impl<R> std::fmt::Debug for SettingsGateway<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsGateway")
            .field("cached_entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl<R: ShortcutRemote> SettingsGateway<R> {
    /// Create a gateway whose cached set expires `cache_ttl` after it was written.
    pub fn new(remote: R, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl)
            .build();
        Self {
            remote,
            cache,
            write_lock: Mutex::new(()),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// The cached override set, without touching the remote.
    pub async fn cached(&self) -> Option<OverrideSet> {
        self.cache.get(OVERRIDES_KEY).await
    }

    /// Drop the cached set so the next `fetch` reads from the remote.
    pub async fn invalidate(&self) {
        self.cache.invalidate(OVERRIDES_KEY).await;
    }

    /// The user's overrides, from cache or from `shortcut.get`.
    ///
    /// A user with no stored row has an empty override set.
    pub async fn fetch(&self) -> Result<OverrideSet> {
        if let Some(cached) = self.cached().await {
            debug!(count = cached.len(), "Override cache hit");
            return Ok(cached);
        }

        let overrides = self.load().await?;
        self.cache.insert(OVERRIDES_KEY, overrides.clone()).await;
        Ok(overrides)
    }

    /// Bind `shortcut.action` to `shortcut`, replacing any existing override
    /// for that action, and persist the complete set.
    ///
    /// The cache shows the new set while the write is in flight. If the
    /// write fails the previous cache contents are restored and the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a malformed shortcut without
    /// contacting the remote, and for a stored set that would be written back
    /// with a malformed entry.
    pub async fn replace(&self, shortcut: Shortcut) -> Result<OverrideSet> {
        validate_shortcut(&shortcut)?;

        let _guard = self.write_lock.lock().await;

        let snapshot = self.cached().await;
        let mut next = match &snapshot {
            Some(current) => current.clone(),
            None => self.load().await?,
        };
        let action = shortcut.action.clone();
        let replaced = next.upsert(shortcut);
        validate_override_set(&next)?;

        self.cache.insert(OVERRIDES_KEY, next.clone()).await;

        match self.remote.update(next.as_slice()).await {
            Ok(()) => {
                info!(%action, replaced = replaced.is_some(), "Saved shortcut override");
                Ok(next)
            }
            Err(err) => {
                match snapshot {
                    Some(previous) => self.cache.insert(OVERRIDES_KEY, previous).await,
                    None => self.cache.invalidate(OVERRIDES_KEY).await,
                }
                error!(%action, error = %err, "Failed to save shortcut override, rolled back");
                Err(err)
            }
        }
    }

    /// Delete every stored override and forget the cached set.
    pub async fn reset(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Err(err) = self.remote.prune().await {
            error!(error = %err, "Failed to reset shortcut overrides");
            return Err(err);
        }
        self.cache.invalidate(OVERRIDES_KEY).await;
        info!("Reset shortcut overrides");
        Ok(())
    }

    /// `catalog` with the user's overrides applied.
    pub async fn effective_bindings(&self, catalog: &[Shortcut]) -> Result<Vec<Shortcut>> {
        let overrides = self.fetch().await?;
        Ok(resolve(catalog, &overrides))
    }

    async fn load(&self) -> Result<OverrideSet> {
        let mut overrides = self
            .remote
            .get()
            .await?
            .map(|row| row.shortcuts)
            .unwrap_or_default();

        let dropped = overrides.dedup();
        if dropped > 0 {
            warn!(dropped, "Stored overrides repeat an action, keeping the last of each");
        }
        Ok(overrides)
    }
}
