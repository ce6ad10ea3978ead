//! Remote shortcut settings for mailkeys.
//!
//! This crate talks to the mail server's `shortcut.*` procedures and keeps a
//! cached, optimistically updated copy of the user's override set. Requests
//! authenticate with a bearer token or a session cookie and are retried with
//! exponential backoff on throttling and gateway errors.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod models;
mod remote;

pub use client::ShortcutClient;
pub use client::builder::ShortcutClientBuilder;
pub use error::{ClientError, Result};
pub use gateway::SettingsGateway;
pub use models::UserHotkeys;
pub use remote::ShortcutRemote;
