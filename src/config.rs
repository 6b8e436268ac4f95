//! Configuration loading from TOML with environment variable resolution.
//!
//! `config.toml` carries endpoints, HTTP settings and the *names* of the
//! environment variables holding credentials. Every section is optional;
//! missing values fall back to Betfair's production endpoints. Secrets are
//! only ever read from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{BetfairError, Result};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitysso-cert.betfair.com/api/certlogin";
pub const DEFAULT_BETTING_URL: &str = "https://api.betfair.com/exchange/betting/json-rpc/v1";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub betfair: EndpointsConfig,
    pub credentials: CredentialsConfig,
}

/// Where and how to talk to Betfair.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointsConfig {
    pub identity_url: String,
    pub betting_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            betting_url: DEFAULT_BETTING_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("betfair-rpc/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Names of the environment variables that hold credentials.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username_env: String,
    pub password_env: String,
    pub app_key_env: String,
    pub cert_path_env: String,
    pub cert_key_path_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username_env: "BETFAIR_USERNAME".to_string(),
            password_env: "BETFAIR_PASSWORD".to_string(),
            app_key_env: "BETFAIR_APP_KEY".to_string(),
            cert_path_env: "BETFAIR_CERT_PATH".to_string(),
            cert_key_path_env: "BETFAIR_CERT_KEY_PATH".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BetfairError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
            .map_err(|e| BetfairError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve an environment variable name to its value.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        resolve(env_name, |name| std::env::var(name).ok())
    }
}

/// Account credentials for the certificate login.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub app_key: String,
    pub cert_path: PathBuf,
    pub cert_key_path: PathBuf,
}

impl Credentials {
    /// Read all five credentials from the process environment.
    pub fn from_env(names: &CredentialsConfig) -> Result<Self> {
        Self::from_lookup(names, |name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup. Fails on the first
    /// variable that is missing or empty.
    pub fn from_lookup<F>(names: &CredentialsConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            username: resolve(&names.username_env, &lookup)?,
            password: SecretString::new(resolve(&names.password_env, &lookup)?),
            app_key: resolve(&names.app_key_env, &lookup)?,
            cert_path: PathBuf::from(resolve(&names.cert_path_env, &lookup)?),
            cert_key_path: PathBuf::from(resolve(&names.cert_key_path_env, &lookup)?),
        })
    }
}

fn resolve<F>(name: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| BetfairError::MissingEnv(name.to_string()))
}
