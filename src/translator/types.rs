use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API key for the translation service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank keys so callers fail before any network call.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Language pair and model chosen for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslationSettings {
    pub source_lang: String,
    pub target_lang: String,
    pub model_id: String,
}

impl TranslationSettings {
    pub fn new(
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            model_id: model_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub units: Vec<String>,
    pub source_lang: String,
    pub target_lang: String,
    pub model_id: String,
}

impl TranslationRequest {
    pub fn new(units: Vec<String>, settings: &TranslationSettings) -> Self {
        Self {
            units,
            source_lang: settings.source_lang.clone(),
            target_lang: settings.target_lang.clone(),
            model_id: settings.model_id.clone(),
        }
    }
}

/// Values in the same order as the request's units, same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub values: Vec<String>,
}

/// What the opaque completion service receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model_id: String,
    pub credential: Credential,
    pub prompt: String,
}
