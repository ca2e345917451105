use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use verso::{
    pipeline::{Pipeline, TranslationMode},
    sanitizer::SanitizationPolicy,
    translator::{
        CompletionRequest, Credential, TranslateError, TranslationService, TranslationSettings,
        Translator,
    },
};

/// Replays canned answers in order and keeps every prompt it was sent.
#[derive(Default)]
struct ScriptedService {
    answers: Mutex<VecDeque<Result<String, TranslateError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedService {
    fn new(answers: Vec<Result<String, TranslateError>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            prompts: Mutex::default(),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationService for ScriptedService {
    async fn complete(&self, request: CompletionRequest) -> Result<String, TranslateError> {
        self.prompts.lock().unwrap().push(request.prompt);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TranslateError::EmptyResponse))
    }
}

fn pipeline(service: Arc<ScriptedService>) -> Pipeline {
    Pipeline::new(
        Translator::new(service, Credential::new("key")),
        Arc::new(SanitizationPolicy::standard()),
    )
}

fn settings() -> TranslationSettings {
    TranslationSettings::new("auto", "vi", "gemini-2.0-flash")
}

#[tokio::test]
async fn test_article_keeps_structure_and_code() {
    let service = ScriptedService::new(vec![Ok(
        r#"Sure! ["Bắt đầu","Cài đặt bằng "," rồi chạy.","Đọc tài liệu"]"#.to_string(),
    )]);
    let input = concat!(
        r#"<h2 class="title">Getting started</h2>"#,
        "<p>Install with <code>cargo install verso</code> and run.</p>",
        r#"<p><a href="https://docs.example.com" onclick="track()">Read the docs</a></p>"#,
        "<script>track()</script>",
    );

    let outcome = pipeline(service.clone())
        .translate_html(input, &settings())
        .await
        .unwrap();

    assert_eq!(outcome.mode, TranslationMode::Chunked);
    assert_eq!(outcome.units, 4);
    assert_eq!(
        outcome.html,
        concat!(
            "<h2>Bắt đầu</h2>",
            "<p>Cài đặt bằng <code>cargo install verso</code> rồi chạy.</p>",
            r#"<p><a href="https://docs.example.com" target="_blank" rel="noreferrer noopener">Đọc tài liệu</a></p>"#,
            "track()",
        )
    );

    let prompts = service.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Detect the source language from the entire set."));
    assert!(!prompts[0].contains("cargo install"));
}

#[tokio::test]
async fn test_translated_markup_stays_inert() {
    let service = ScriptedService::new(vec![Ok(
        r#"["<script>alert(1)</script>"]"#.to_string(),
    )]);

    let outcome = pipeline(service)
        .translate_html("<p>Hello</p>", &settings())
        .await
        .unwrap();
    assert_eq!(outcome.html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
}

#[tokio::test]
async fn test_code_only_fragment_uses_whole_document_prompt() {
    let service = ScriptedService::new(vec![Ok(
        "```html\n<pre>fn main() {}</pre>\n```".to_string(),
    )]);

    let outcome = pipeline(service.clone())
        .translate_html("<pre>fn main() {}</pre>", &settings())
        .await
        .unwrap();

    assert_eq!(outcome.mode, TranslationMode::WholeDocument);
    assert!(service.prompts()[0].contains("HTML:\n<pre>fn main() {}</pre>"));
    assert_eq!(outcome.html, "<pre>fn main() {}</pre>");
}

#[tokio::test]
async fn test_service_errors_are_terminal() {
    let service = ScriptedService::new(vec![Err(TranslateError::Service {
        status: Some(500),
        body: "boom".to_string(),
    })]);

    let err = pipeline(service.clone())
        .translate_html("<p>a</p>", &settings())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Service { status: Some(500), .. }));
    assert_eq!(service.prompts().len(), 1);
}

#[tokio::test]
async fn test_text_path_renders_sanitized_markdown() {
    let service = ScriptedService::new(vec![Ok(
        "# Tiêu đề\n\nXem [tài liệu](https://example.com) và `mã`.\n\n[xấu](javascript:alert(1))"
            .to_string(),
    )]);

    let outcome = pipeline(service)
        .translate_text("# Title", &settings())
        .await
        .unwrap();

    assert_eq!(outcome.mode, TranslationMode::Text);
    assert_eq!(
        outcome.html,
        concat!(
            "<h1>Tiêu đề</h1>\n",
            r#"<p>Xem <a href="https://example.com" target="_blank" rel="noreferrer noopener">tài liệu</a> và <code>mã</code>.</p>"#,
            "\n<p>[xấu](javascript:alert(1))</p>",
        )
    );
}
