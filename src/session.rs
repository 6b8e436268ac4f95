//! Session credentials and the certificate login exchange.
//!
//! Login: https://docs.developer.betfair.com/display/1smk3cen4v3lu3yomq5qye0ni/Non-Interactive+%28bot%29+login
//!
//! The identity endpoint takes a form-encoded `username`/`password` pair over
//! a TLS connection that presents the account's client certificate, and
//! answers with `{"sessionToken": "...", "loginStatus": "SUCCESS"}`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;

use crate::config::Credentials;
use crate::error::{BetfairError, Result};
use crate::transport::{HttpRequest, Transport, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};

pub const HEADER_APP_KEY: &str = "X-Application";
pub const HEADER_SESSION: &str = "X-Authentication";

/// Login response from the identity endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    session_token: Option<String>,
    #[serde(default)]
    login_status: Option<String>,
}

/// Application key plus session token. Fixed for the lifetime of a client.
#[derive(Debug)]
pub struct Session {
    app_key: String,
    token: SecretString,
}

impl Session {
    pub fn new(app_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            token: SecretString::new(token.into()),
        }
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Attach the authentication headers every betting call carries.
    pub fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request
            .header(HEADER_APP_KEY, self.app_key.as_str())
            .header(HEADER_SESSION, self.token())
            .header("content-type", CONTENT_TYPE_JSON)
    }
}

/// Exchange credentials for a session token at `identity_url`.
///
/// No retry: any transport failure, non-2xx status, undecodable body or
/// missing token is returned as is.
pub async fn login(
    transport: &dyn Transport,
    credentials: &Credentials,
    identity_url: &str,
) -> Result<Session> {
    info!(username = %credentials.username, "Authenticating with Betfair...");

    let body = format!(
        "username={}&password={}",
        urlencoding::encode(&credentials.username),
        urlencoding::encode(credentials.password.expose_secret()),
    );
    let request = HttpRequest::post(identity_url, body)
        .header(HEADER_APP_KEY, credentials.app_key.as_str())
        .header("Content-Type", CONTENT_TYPE_FORM)
        .header("Accept", CONTENT_TYPE_JSON);

    let resp = transport.post(request).await?.error_for_status()?;
    let login: LoginResponse = resp.json()?;

    let token = login.session_token.filter(|t| !t.is_empty()).ok_or_else(|| {
        BetfairError::Login(
            login
                .login_status
                .unwrap_or_else(|| "no session token returned".to_string()),
        )
    })?;

    info!("Betfair authentication successful");
    Ok(Session::new(credentials.app_key.clone(), token))
}
