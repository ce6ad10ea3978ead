//! Authentication types for the mail server connection.
//!
//! Responsibilities:
//! - Define how requests authenticate (bearer token or browser session cookie).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Attaching credentials to requests (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SESSION_COOKIE_NAME;

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

fn default_cookie_name() -> String {
    DEFAULT_SESSION_COOKIE_NAME.to_string()
}

/// Strategy for authenticating with the mail server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// `Authorization: Bearer <token>`
    #[serde(rename = "bearer")]
    Bearer {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
    /// A browser session cookie, sent as `Cookie: <name>=<value>`
    #[serde(rename = "cookie")]
    Cookie {
        #[serde(default = "default_cookie_name")]
        name: String,
        #[serde(with = "secret_string")]
        value: SecretString,
    },
}

impl AuthStrategy {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::new(token.into().into()),
        }
    }

    /// A session cookie under the default cookie name.
    pub fn session_cookie(value: impl Into<String>) -> Self {
        Self::Cookie {
            name: default_cookie_name(),
            value: SecretString::new(value.into().into()),
        }
    }

    /// Short label for logs; never includes the secret.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bearer { .. } => "bearer",
            Self::Cookie { .. } => "cookie",
        }
    }
}
