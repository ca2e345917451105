use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{
    dom::parse_fragment,
    extractor::{extract, unit_values},
    markdown,
    reassembler::reassemble,
    sanitizer::{SanitizationPolicy, sanitize},
    translator::{TranslateError, TranslationRequest, TranslationSettings, Translator},
};

/// How an HTML fragment was sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMode {
    /// Text leaves batched into one JSON array request.
    Chunked,
    /// The fragment had no extractable text and was sent whole.
    WholeDocument,
    /// Plain text rendered from the service's Markdown answer.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub html: String,
    pub mode: TranslationMode,
    pub units: usize,
}

/// Glue between the extractor, the translator and the sanitizer.
#[derive(Clone)]
pub struct Pipeline {
    translator: Translator,
    policy: Arc<SanitizationPolicy>,
}

impl Pipeline {
    pub fn new(translator: Translator, policy: Arc<SanitizationPolicy>) -> Self {
        Self { translator, policy }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn policy(&self) -> &SanitizationPolicy {
        &self.policy
    }

    #[instrument(skip_all, fields(chars = html.len(), target = %settings.target_lang))]
    pub async fn translate_html(
        &self,
        html: &str,
        settings: &TranslationSettings,
    ) -> Result<TranslationOutcome, TranslateError> {
        let fragment = parse_fragment(html);
        let units = extract(&fragment);

        if units.is_empty() {
            let raw = self.translator.translate_html(html, settings).await?;
            info!(mode = "whole_document", "translated fragment");
            return Ok(TranslationOutcome {
                html: sanitize(&raw, &self.policy),
                mode: TranslationMode::WholeDocument,
                units: 0,
            });
        }

        let request = TranslationRequest::new(unit_values(&units), settings);
        let response = self.translator.translate_units(&request).await?;
        let output = reassemble(&fragment, &units, &response.values, &self.policy)?;
        info!(mode = "chunked", units = units.len(), "translated fragment");

        Ok(TranslationOutcome {
            html: output,
            mode: TranslationMode::Chunked,
            units: units.len(),
        })
    }

    #[instrument(skip_all, fields(chars = text.len(), target = %settings.target_lang))]
    pub async fn translate_text(
        &self,
        text: &str,
        settings: &TranslationSettings,
    ) -> Result<TranslationOutcome, TranslateError> {
        let answer = self.translator.translate_text(text, settings).await?;
        info!(mode = "text", "translated passage");
        Ok(TranslationOutcome {
            html: markdown::render(&answer, &self.policy),
            mode: TranslationMode::Text,
            units: 0,
        })
    }
}
