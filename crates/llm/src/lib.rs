//! BizTone LLM Integration
//!
//! Groq chat completion client and business tone conversion

mod client;
mod convert;
mod llm_trait;
mod normalize;
mod prompts;
mod types;

pub use client::GroqClient;
pub use convert::{ConversionOptions, Converter, MAX_KEYWORDS_CHARS};
pub use llm_trait::CompletionProvider;
pub use normalize::normalize_completion;
pub use prompts::{user_message, Persona, BASE_INSTRUCTION, OUTPUT_INSTRUCTION};
pub use types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, Choice,
    ChoiceMessage, ConversionRequest, ConversionResult, Usage,
};
