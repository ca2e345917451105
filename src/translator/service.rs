use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::translator::{errors::TranslateError, types::CompletionRequest};

/// Opaque text-completion service: one prompt in, one text blob out.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, TranslateError>;
}
