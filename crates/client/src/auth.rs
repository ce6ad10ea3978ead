//! Attaching credentials to outgoing requests.

use reqwest::RequestBuilder;
use reqwest::header::COOKIE;
use secrecy::ExposeSecret;

use mailkeys_config::AuthStrategy;

/// Add the credentials for `auth` to a request.
pub(crate) fn authorize(builder: RequestBuilder, auth: &AuthStrategy) -> RequestBuilder {
    match auth {
        AuthStrategy::Bearer { token } => builder.bearer_auth(token.expose_secret()),
        AuthStrategy::Cookie { name, value } => {
            builder.header(COOKIE, format!("{name}={}", value.expose_secret()))
        }
    }
}
