use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, warn};

use crate::{
    app_state::AppState,
    dom::{Element, Fragment, Node, parse_fragment},
    history::HistoryEntry,
    languages::{LANGUAGES, MODELS},
    translations::dtos::{
        ErrorResponse, HistoryListResponse, LanguageListResponse, ModelListResponse,
        TranslateRequest, TranslateResponse,
    },
    translator::{TranslateError, TranslationSettings},
};

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

fn translate_error_response(err: &TranslateError) -> Response {
    let status = match err {
        TranslateError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        TranslateError::Service { .. }
        | TranslateError::EmptyResponse
        | TranslateError::MismatchedResponse { .. }
        | TranslateError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    };
    if err.is_response_error() {
        warn!(error = %err, "translation rejected");
    } else {
        error!(error = %err, "translation failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Markup-free input is treated as a single paragraph. Entities are already
/// decoded by the parse, so the paragraph holds the parsed text.
fn as_fragment_html(input: &str) -> String {
    let parsed = parse_fragment(input);
    let has_markup = parsed
        .children
        .iter()
        .any(|node| matches!(node, Node::Element(_)));
    if has_markup {
        input.to_string()
    } else {
        Fragment::new(vec![Node::Element(Element::new(
            "p",
            vec![Node::text(parsed.text_content().trim())],
        ))])
        .to_html()
    }
}

fn record_history(state: &AppState, settings: &TranslationSettings, input: String, output: &str) {
    state.history.record(HistoryEntry {
        timestamp: Utc::now(),
        source_lang: settings.source_lang.clone(),
        target_lang: settings.target_lang.clone(),
        model: settings.model_id.clone(),
        input_html: input,
        output_html: output.to_string(),
    });
}

#[utoipa::path(
    post,
    path = "/v1/translate/html",
    tag = "translations",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated, sanitized HTML", body = TranslateResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Translation service failed or replied unusably", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    )
)]
pub async fn translate_html(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let settings = payload.settings(&state.defaults);
    let input = as_fragment_html(&payload.input);
    match state.pipeline.translate_html(&input, &settings).await {
        Ok(outcome) => {
            record_history(&state, &settings, input, &outcome.html);
            (
                StatusCode::OK,
                Json(TranslateResponse::new(outcome, settings)),
            )
                .into_response()
        }
        Err(err) => translate_error_response(&err),
    }
}

#[utoipa::path(
    post,
    path = "/v1/translate/text",
    tag = "translations",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translation rendered from Markdown to sanitized HTML", body = TranslateResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Translation service failed or replied unusably", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    )
)]
pub async fn translate_text(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let settings = payload.settings(&state.defaults);
    let text = payload.input.trim();
    match state.pipeline.translate_text(text, &settings).await {
        Ok(outcome) => {
            let input = Fragment::new(vec![Node::Element(Element::new(
                "p",
                vec![Node::text(text)],
            ))])
            .to_html();
            record_history(&state, &settings, input, &outcome.html);
            (
                StatusCode::OK,
                Json(TranslateResponse::new(outcome, settings)),
            )
                .into_response()
        }
        Err(err) => translate_error_response(&err),
    }
}

#[utoipa::path(
    get,
    path = "/v1/history",
    tag = "history",
    responses(
        (status = 200, description = "Recent translations, newest first", body = HistoryListResponse)
    )
)]
pub async fn list_history(State(state): State<AppState>) -> Json<HistoryListResponse> {
    Json(HistoryListResponse {
        entries: state.history.list(state.pipeline.policy()),
    })
}

#[utoipa::path(
    delete,
    path = "/v1/history",
    tag = "history",
    responses(
        (status = 204, description = "History cleared")
    )
)]
pub async fn clear_history(State(state): State<AppState>) -> StatusCode {
    state.history.clear();
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/v1/languages",
    tag = "catalog",
    responses(
        (status = 200, description = "Supported languages", body = LanguageListResponse)
    )
)]
pub async fn list_languages(State(state): State<AppState>) -> Json<LanguageListResponse> {
    Json(LanguageListResponse {
        languages: LANGUAGES.iter().map(Into::into).collect(),
        default_source: state.defaults.source_lang.clone(),
        default_target: state.defaults.target_lang.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/models",
    tag = "catalog",
    responses(
        (status = 200, description = "Supported models", body = ModelListResponse)
    )
)]
pub async fn list_models(State(state): State<AppState>) -> Json<ModelListResponse> {
    Json(ModelListResponse {
        models: MODELS.iter().map(Into::into).collect(),
        default_model: state.defaults.model_id.clone(),
    })
}
