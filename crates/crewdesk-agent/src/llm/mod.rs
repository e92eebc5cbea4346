//! LLM provider boundary

pub mod cerebras;
pub mod client;
pub mod factory;
pub mod mock;

pub use cerebras::{CerebrasClient, CEREBRAS_BASE_URL};
pub use client::{
    CompletionRequest, CompletionResponse, FinishReason, LlmClient, Message, Role, TokenUsage,
    ToolCall,
};
pub use factory::{CerebrasFactory, LlmClientFactory};
