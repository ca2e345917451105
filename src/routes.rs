use axum::{
    Json, Router,
    http::HeaderName,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    app_state::AppState,
    health::{self, HealthResponse},
    history::HistoryEntry,
    pipeline::TranslationMode,
    translations::{dtos, handlers},
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        handlers::translate_html,
        handlers::translate_text,
        handlers::list_history,
        handlers::clear_history,
        handlers::list_languages,
        handlers::list_models,
    ),
    components(schemas(
        HealthResponse,
        HistoryEntry,
        TranslationMode,
        dtos::TranslateRequest,
        dtos::TranslateResponse,
        dtos::LanguageResponse,
        dtos::LanguageListResponse,
        dtos::ModelResponse,
        dtos::ModelListResponse,
        dtos::HistoryListResponse,
        dtos::ErrorResponse,
    )),
    tags(
        (name = "translations", description = "Structure-preserving HTML and text translation"),
        (name = "history", description = "Recent translations"),
        (name = "catalog", description = "Supported languages and models"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/v1/translate/html", post(handlers::translate_html))
        .route("/v1/translate/text", post(handlers::translate_text))
        .route(
            "/v1/history",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        .route("/v1/languages", get(handlers::list_languages))
        .route("/v1/models", get(handlers::list_models))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        history::HistoryStore,
        pipeline::Pipeline,
        sanitizer::SanitizationPolicy,
        translator::{Credential, TranslationSettings, Translator, service::MockTranslationService},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_app(credential: Option<&str>) -> Router {
        let translator = Translator::new(
            Arc::new(MockTranslationService::new()),
            credential.and_then(Credential::new),
        );
        router(AppState::new(
            Pipeline::new(translator, Arc::new(SanitizationPolicy::standard())),
            HistoryStore::default(),
            TranslationSettings::new("auto", "vi", "gemini-2.0-flash"),
        ))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_credential_state() {
        let (status, body) = get_json(create_test_app(Some("key")), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["credential"], "configured");

        let (_, body) = get_json(create_test_app(None), "/healthz").await;
        assert_eq!(body["credential"], "missing");
    }

    #[tokio::test]
    async fn test_request_id_is_set_and_propagated() {
        let app = create_test_app(None);

        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let request = Request::builder()
            .uri("/healthz")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let (status, body) = get_json(create_test_app(None), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        for path in [
            "/healthz",
            "/v1/translate/html",
            "/v1/translate/text",
            "/v1/history",
            "/v1/languages",
            "/v1/models",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_test_app(None);
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
