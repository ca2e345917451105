use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::translator::{
    errors::TranslateError,
    prompts,
    service::TranslationService,
    types::{CompletionRequest, Credential, TranslationRequest, TranslationResponse, TranslationSettings},
};

/// Builds prompts, calls the injected service once per invocation and
/// validates what comes back. Holds no per-call state.
#[derive(Clone)]
pub struct Translator {
    service: Arc<dyn TranslationService>,
    credential: Option<Credential>,
}

impl Translator {
    pub fn new(service: Arc<dyn TranslationService>, credential: Option<Credential>) -> Self {
        Self {
            service,
            credential,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    fn credential(&self) -> Result<Credential, TranslateError> {
        self.credential
            .clone()
            .ok_or(TranslateError::MissingCredential)
    }

    /// Translate an ordered batch of strings in a single round trip.
    #[instrument(skip_all, fields(units = request.units.len(), model = %request.model_id))]
    pub async fn translate_units(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        let credential = self.credential()?;
        if request.units.is_empty() {
            return Ok(TranslationResponse { values: Vec::new() });
        }

        let prompt = prompts::chunk_prompt(&request.units, &request.source_lang, &request.target_lang);
        let raw = self
            .service
            .complete(CompletionRequest {
                model_id: request.model_id.clone(),
                credential,
                prompt,
            })
            .await?;

        let values = parse_units_response(&raw, request.units.len()).inspect_err(|err| {
            warn!(error = %err, "rejected batched translation response");
        })?;
        Ok(TranslationResponse { values })
    }

    /// Ask the service to translate a whole HTML fragment. The result is
    /// untrusted and must be sanitized by the caller.
    #[instrument(skip_all, fields(chars = html.len(), model = %settings.model_id))]
    pub async fn translate_html(
        &self,
        html: &str,
        settings: &TranslationSettings,
    ) -> Result<String, TranslateError> {
        let prompt = prompts::html_prompt(html, &settings.source_lang, &settings.target_lang);
        let answer = self.complete_text(prompt, settings).await?;
        let html = strip_code_fence(&answer);
        if html.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(html.to_string())
    }

    /// Translate a plain-text passage; the answer may contain Markdown.
    #[instrument(skip_all, fields(chars = text.len(), model = %settings.model_id))]
    pub async fn translate_text(
        &self,
        text: &str,
        settings: &TranslationSettings,
    ) -> Result<String, TranslateError> {
        let prompt = prompts::text_prompt(text, &settings.source_lang, &settings.target_lang);
        self.complete_text(prompt, settings).await
    }

    async fn complete_text(
        &self,
        prompt: String,
        settings: &TranslationSettings,
    ) -> Result<String, TranslateError> {
        let credential = self.credential()?;
        let raw = self
            .service
            .complete(CompletionRequest {
                model_id: settings.model_id.clone(),
                credential,
                prompt,
            })
            .await?;

        let answer = raw.trim();
        if answer.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(answer.to_string())
    }
}

/// Models sometimes wrap HTML in a fenced block despite being told not to.
fn strip_code_fence(answer: &str) -> &str {
    let Some(body) = answer
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return answer;
    };
    match body.split_once('\n') {
        Some((info, inner)) if !info.contains(char::is_whitespace) => inner.trim(),
        _ => body.trim(),
    }
}

/// Parse the service's answer to a batched request.
///
/// Strict JSON first, then the first balanced `[...]` found in the text.
/// Anything else is an error; cardinality must match `expected` exactly.
pub fn parse_units_response(raw: &str, expected: usize) -> Result<Vec<String>, TranslateError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyResponse);
    }

    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => {
            let candidate = first_json_array(text).ok_or_else(|| {
                TranslateError::MalformedResponse("no JSON array found in response".to_string())
            })?;
            debug!("recovered JSON array from free-form response");
            serde_json::from_str::<Value>(candidate)
                .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?
        }
    };

    let Value::Array(items) = value else {
        return Err(TranslateError::MalformedResponse(
            "response is not a JSON array".to_string(),
        ));
    };

    if items.len() != expected {
        return Err(TranslateError::MismatchedResponse {
            expected,
            got: items.len(),
        });
    }

    Ok(items.into_iter().map(coerce_to_string).collect())
}

fn coerce_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Slice of the first top-level `[...]`, honouring JSON string escapes.
fn first_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
