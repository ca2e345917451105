use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use url::Url;

use crate::translator::{
    errors::TranslateError, service::TranslationService, types::CompletionRequest,
};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const USER_AGENT: &str = "verso/0.1";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
});

pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// `generateContent` client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

impl GeminiClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: get_client().clone(),
            endpoint,
        }
    }

    fn generate_url(&self, model_id: &str) -> Result<Url, TranslateError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| TranslateError::Service {
                status: None,
                body: format!("endpoint cannot carry a path: {}", self.endpoint),
            })?
            .pop_if_empty()
            .push("models")
            .push(&format!("{model_id}:generateContent"));
        Ok(url)
    }
}

#[async_trait]
impl TranslationService for GeminiClient {
    #[instrument(skip_all, fields(model = %request.model_id, prompt_chars = request.prompt.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, TranslateError> {
        let url = self.generate_url(&request.model_id)?;
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, request.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(TranslateError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(status = status.as_u16(), "Gemini API error: {}", body);
            return Err(TranslateError::Service {
                status: Some(status.as_u16()),
                body,
            });
        }

        let payload = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        payload.first_text().ok_or(TranslateError::EmptyResponse)
    }
}
