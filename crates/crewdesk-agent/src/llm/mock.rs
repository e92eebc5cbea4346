//! Deterministic scripted LLM client for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AgentError, Result};
use crate::llm::client::{
    CompletionRequest, CompletionResponse, FinishReason, LlmClient, ToolCall,
};

/// Scripted completion step.
#[derive(Debug, Clone)]
pub enum MockStep {
    /// Return a plain assistant message.
    Text(String),
    /// Return a tool call response.
    ToolCall {
        id: String,
        name: String,
        arguments: serde_json::Value,
    },
    /// Return an inference error with this message.
    Error(String),
    /// Return a typed authentication error.
    AuthError(String),
}

/// Mock client that replays scripted steps and counts invocations.
pub struct MockClient {
    steps: Mutex<VecDeque<MockStep>>,
    calls: AtomicUsize,
}

impl MockClient {
    pub fn new(steps: Vec<MockStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(vec![MockStep::Text(content.into())])
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .steps
            .lock()
            .expect("mock step queue poisoned")
            .pop_front()
            .unwrap_or(MockStep::Text(String::new()));

        match step {
            MockStep::Text(content) => Ok(CompletionResponse {
                content: Some(content),
                tool_calls: vec![],
                finish_reason: FinishReason::Stop,
                usage: None,
            }),
            MockStep::ToolCall {
                id,
                name,
                arguments,
            } => Ok(CompletionResponse {
                content: None,
                tool_calls: vec![ToolCall {
                    id,
                    name,
                    arguments,
                }],
                finish_reason: FinishReason::ToolCalls,
                usage: None,
            }),
            MockStep::Error(message) => Err(AgentError::Inference(message)),
            MockStep::AuthError(message) => Err(AgentError::Auth(message)),
        }
    }
}
