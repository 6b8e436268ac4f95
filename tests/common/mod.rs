//! Shared test fixtures.
//!
//! `RecordingTransport` is a deterministic `Transport` that replays canned
//! responses in order and records every request it sees, with no network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use betfair_rpc::config::{AppConfig, CredentialsConfig};
use betfair_rpc::transport::{HttpRequest, HttpResponse, Transport};
use betfair_rpc::{BetfairError, Result};

pub struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next unanswered request.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BetfairError::Config("RecordingTransport ran out of responses".into()))
    }
}

/// Config whose credential variables are unique to one test, so tests in
/// the same binary never race on the process environment.
pub fn config_with_env_prefix(prefix: &str) -> AppConfig {
    AppConfig {
        credentials: CredentialsConfig {
            username_env: format!("{prefix}_USERNAME"),
            password_env: format!("{prefix}_PASSWORD"),
            app_key_env: format!("{prefix}_APP_KEY"),
            cert_path_env: format!("{prefix}_CERT_PATH"),
            cert_key_path_env: format!("{prefix}_CERT_KEY_PATH"),
        },
        ..AppConfig::default()
    }
}

/// Set every credential variable for `cfg` except those listed in `skip`.
pub fn set_credentials_env(cfg: &AppConfig, skip: &[&str]) {
    let names = &cfg.credentials;
    let values = [
        (&names.username_env, "punter"),
        (&names.password_env, "secret"),
        (&names.app_key_env, "app-key"),
        (&names.cert_path_env, "/certs/client.crt"),
        (&names.cert_key_path_env, "/certs/client.key"),
    ];
    for (name, value) in values {
        if skip.contains(&name.as_str()) {
            std::env::remove_var(name);
        } else {
            std::env::set_var(name, value);
        }
    }
}

pub const LOGIN_OK: &str = r#"{"sessionToken":"session-abc","loginStatus":"SUCCESS"}"#;
