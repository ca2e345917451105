use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("missing API credential")]
    MissingCredential,

    #[error("translation service error ({}): {body}", status_label(.status))]
    Service { status: Option<u16>, body: String },

    #[error("no translation returned")]
    EmptyResponse,

    #[error("mismatched translation array length: expected {expected}, got {got}")]
    MismatchedResponse { expected: usize, got: usize },

    #[error("unexpected response format: {0}")]
    MalformedResponse(String),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "transport failure".to_string(),
    }
}

impl TranslateError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        let body = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };

        Self::Service {
            status: err.status().map(|status| status.as_u16()),
            body,
        }
    }

    /// Errors caused by the service's answer rather than by the request.
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyResponse | Self::MismatchedResponse { .. } | Self::MalformedResponse(_)
        )
    }
}
