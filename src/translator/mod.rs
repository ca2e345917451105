pub mod errors;
pub mod gemini;
pub mod prompts;
pub mod protocol;
pub mod service;
pub mod types;

pub use errors::TranslateError;
pub use gemini::GeminiClient;
pub use protocol::{Translator, parse_units_response};
pub use service::TranslationService;
pub use types::{
    CompletionRequest, Credential, TranslationRequest, TranslationResponse, TranslationSettings,
};
