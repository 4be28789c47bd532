use biztone_common::Result;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;

/// Common trait for chat completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one non-streaming chat completion
    async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse>;

    /// Provider name for logs
    fn name(&self) -> &str;
}
