//! Wire types for the `shortcut.*` procedures.
//!
//! Responsibilities:
//! - Model the stored hotkey row (`UserHotkeys`).
//! - Model the tRPC success and error envelopes.
//!
//! Does NOT handle:
//! - Deciding what an error status means (see `endpoints::request`).
//!
//! Invariants:
//! - Field names on the wire are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mailkeys_config::{OverrideSet, Shortcut};

/// The stored override row for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHotkeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub shortcuts: OverrideSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `{"result":{"data": T}}`
#[derive(Debug, Deserialize)]
pub struct TrpcResponse<T> {
    pub result: TrpcResult<T>,
}

#[derive(Debug, Deserialize)]
pub struct TrpcResult<T> {
    pub data: T,
}

/// Payload of `shortcut.get`; `shortcuts` is null when the user never saved any.
#[derive(Debug, Deserialize)]
pub struct GetShortcutsData {
    pub shortcuts: Option<UserHotkeys>,
}

/// Input of `shortcut.update`.
#[derive(Debug, Serialize)]
pub struct UpdateShortcutsInput<'a> {
    pub shortcuts: &'a [Shortcut],
}

/// `{"error":{"message":…,"data":{"code":…,"httpStatus":…}}}`
#[derive(Debug, Deserialize)]
pub struct TrpcErrorEnvelope {
    pub error: TrpcError,
}

#[derive(Debug, Deserialize)]
pub struct TrpcError {
    pub message: String,
    #[serde(default)]
    pub data: Option<TrpcErrorData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrpcErrorData {
    pub code: Option<String>,
    pub http_status: Option<u16>,
}
