//! HTTP transport.
//!
//! The client never touches `reqwest` directly; it hands a fully built
//! [`HttpRequest`] to a [`Transport`] and gets the status and body back.
//! [`HttpTransport`] is the real implementation. For the identity endpoint
//! it must be built with the account's client certificate.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Identity};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::EndpointsConfig;
use crate::error::{BetfairError, Result};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// An outbound POST.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header matching `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`BetfairError::Status`] unless the status is 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(BetfairError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Something that can execute a POST.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// A transport without a client certificate. Enough for the betting
    /// endpoint, which authenticates by session token alone.
    pub fn new(endpoints: &EndpointsConfig) -> Result<Self> {
        let http = Self::builder(endpoints).build()?;
        Ok(Self { http })
    }

    /// A transport presenting the PEM certificate and private key at the
    /// given paths, as the certificate login endpoint requires.
    pub fn with_client_cert(
        endpoints: &EndpointsConfig,
        cert_path: &Path,
        key_path: &Path,
    ) -> Result<Self> {
        let identity = load_identity(cert_path, key_path)?;
        let http = Self::builder(endpoints).identity(identity).build()?;
        Ok(Self { http })
    }

    fn builder(endpoints: &EndpointsConfig) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(Duration::from_secs(endpoints.timeout_secs))
            .user_agent(endpoints.user_agent.clone())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, bytes = request.body.len(), "POST");

        let mut builder = self.http.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.body(request.body).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        debug!(status, bytes = body.len(), "Response received");
        Ok(HttpResponse { status, body })
    }
}

/// Concatenate certificate and key PEM files into a single identity.
fn load_identity(cert_path: &Path, key_path: &Path) -> Result<Identity> {
    let mut pem = read_pem(cert_path)?;
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend(read_pem(key_path)?);
    Ok(Identity::from_pem(&pem)?)
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| BetfairError::Certificate {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoints() -> EndpointsConfig {
        EndpointsConfig {
            timeout_secs: 5,
            ..EndpointsConfig::default()
        }
    }

    // -- Value types --

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::post("http://x", "{}").header("X-Application", "key");
        assert_eq!(req.header_value("x-application"), Some("key"));
        assert_eq!(req.header_value("X-Authentication"), None);
    }

    #[test]
    fn test_error_for_status() {
        assert!(HttpResponse::new(200, "{}").error_for_status().is_ok());

        let err = HttpResponse::new(503, "down").error_for_status().unwrap_err();
        assert!(matches!(err, BetfairError::Status { status: 503, ref body } if body == "down"));
    }

    #[test]
    fn test_json_decode_error() {
        let err = HttpResponse::new(200, "<html>").json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, BetfairError::Json(_)));
    }

    // -- Certificates --

    #[test]
    fn test_missing_certificate_file() {
        let err = HttpTransport::with_client_cert(
            &endpoints(),
            Path::new("/no/such/client.crt"),
            Path::new("/no/such/client.key"),
        )
        .err()
        .unwrap();

        match err {
            BetfairError::Certificate { path, .. } => {
                assert_eq!(path, Path::new("/no/such/client.crt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // -- Wire tests --

    #[tokio::test]
    async fn test_post_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(header("X-Application", "app-key"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"hello":"world"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&endpoints()).unwrap();
        let req = HttpRequest::post(format!("{}/rpc", server.uri()), r#"{"hello":"world"}"#)
            .header("X-Application", "app-key")
            .header("content-type", CONTENT_TYPE_JSON);

        let resp = transport.post(req).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_post_returns_error_status_without_failing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&endpoints()).unwrap();
        let resp = transport
            .post(HttpRequest::post(server.uri(), ""))
            .await
            .unwrap();

        assert_eq!(resp.status, 400);
        assert!(!resp.is_success());
    }
}
