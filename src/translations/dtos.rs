use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    history::HistoryEntry,
    languages::{self, Language, Model},
    pipeline::{TranslationMode, TranslationOutcome},
    translator::TranslationSettings,
};

/// Upper bound on request input, counted in characters.
pub const MAX_INPUT_CHARS: usize = 50_000;
const MAX_MODEL_ID_LEN: usize = 128;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslateRequest {
    /// HTML fragment or plain text, depending on the endpoint.
    pub input: String,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub model: Option<String>,
}

impl TranslateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.input.trim().is_empty() {
            return Err("Input cannot be empty".to_string());
        }
        if self.input.chars().count() > MAX_INPUT_CHARS {
            return Err(format!("Input exceeds {MAX_INPUT_CHARS} characters"));
        }
        if let Some(source) = &self.source_lang
            && !languages::is_known_language(source)
        {
            return Err(format!("Unsupported source language '{source}'"));
        }
        if let Some(target) = &self.target_lang
            && !languages::is_valid_target(target)
        {
            return Err(format!("Unsupported target language '{target}'"));
        }
        if let Some(model) = &self.model
            && !is_valid_model_id(model)
        {
            return Err("Invalid model identifier".to_string());
        }
        Ok(())
    }

    /// Fill unset fields from `defaults`.
    pub fn settings(&self, defaults: &TranslationSettings) -> TranslationSettings {
        TranslationSettings::new(
            self.source_lang
                .clone()
                .unwrap_or_else(|| defaults.source_lang.clone()),
            self.target_lang
                .clone()
                .unwrap_or_else(|| defaults.target_lang.clone()),
            self.model.clone().unwrap_or_else(|| defaults.model_id.clone()),
        )
    }
}

fn is_valid_model_id(model: &str) -> bool {
    !model.is_empty()
        && model.len() <= MAX_MODEL_ID_LEN
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslateResponse {
    /// Sanitized HTML, safe to insert into a page.
    pub html: String,
    pub mode: TranslationMode,
    /// Number of text units sent in the batched request.
    pub units: usize,
    pub source_lang: String,
    pub target_lang: String,
    pub model: String,
}

impl TranslateResponse {
    pub fn new(outcome: TranslationOutcome, settings: TranslationSettings) -> Self {
        Self {
            html: outcome.html,
            mode: outcome.mode,
            units: outcome.units,
            source_lang: settings.source_lang,
            target_lang: settings.target_lang,
            model: settings.model_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguageResponse {
    pub code: String,
    pub name: String,
}

impl From<&Language> for LanguageResponse {
    fn from(lang: &Language) -> Self {
        Self {
            code: lang.code.to_string(),
            name: lang.name.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguageListResponse {
    pub languages: Vec<LanguageResponse>,
    pub default_source: String,
    pub default_target: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelResponse {
    pub id: String,
    pub name: String,
}

impl From<&Model> for ModelResponse {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelListResponse {
    pub models: Vec<ModelResponse>,
    pub default_model: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryListResponse {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
