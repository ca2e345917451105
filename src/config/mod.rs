//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults.
//! A missing API key is not an error here; translation calls fail with
//! `MissingCredential` instead, so the server can still start and report
//! its state on `/healthz`.

use std::env;

use thiserror::Error;
use url::Url;

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::languages::{DEFAULT_MODEL, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};
use crate::translator::gemini::DEFAULT_ENDPOINT;
use crate::translator::{Credential, TranslationSettings};

/// Environment variable names.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_ENDPOINT: &str = "GEMINI_ENDPOINT";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_SOURCE_LANG: &str = "SOURCE_LANG";
pub const ENV_TARGET_LANG: &str = "TARGET_LANG";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_HISTORY_LIMIT: &str = "HISTORY_LIMIT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Application runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    credential: Option<Credential>,
    endpoint: Url,
    defaults: TranslationSettings,
    bind_addr: String,
    history_limit: usize,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credential = env::var(ENV_GEMINI_API_KEY).ok().and_then(Credential::new);

        let endpoint_raw =
            env::var(ENV_GEMINI_ENDPOINT).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|e| ConfigError::InvalidValue {
            field: ENV_GEMINI_ENDPOINT,
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: ENV_GEMINI_ENDPOINT,
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let defaults = TranslationSettings::new(
            non_empty_var(ENV_SOURCE_LANG).unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string()),
            non_empty_var(ENV_TARGET_LANG).unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string()),
            non_empty_var(ENV_GEMINI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        );

        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let history_limit = match non_empty_var(ENV_HISTORY_LIMIT) {
            None => DEFAULT_HISTORY_LIMIT,
            Some(raw) => match raw.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_HISTORY_LIMIT,
                        reason: format!("expected a positive integer, got '{raw}'"),
                    });
                }
            },
        };

        Ok(Self {
            credential,
            endpoint,
            defaults,
            bind_addr,
            history_limit,
        })
    }

    /// API key for the completion service, if one is configured.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
    /// Base URL of the Gemini REST API.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
    /// Languages and model used when a request leaves them out.
    pub fn defaults(&self) -> &TranslationSettings {
        &self.defaults
    }
    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
