//! LLM client factory
//!
//! The controller creates one client per submission (model and credential
//! are chosen per run). The factory trait is the seam tests use to inject
//! a scripted client.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Model;
use crate::llm::cerebras::{CerebrasClient, CEREBRAS_BASE_URL};
use crate::llm::client::LlmClient;

pub trait LlmClientFactory: Send + Sync {
    fn create_client(&self, model: Model, api_key: &str) -> Arc<dyn LlmClient>;
}

/// Production factory for the hosted Cerebras endpoint.
pub struct CerebrasFactory {
    base_url: String,
    timeout: Duration,
}

impl CerebrasFactory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl Default for CerebrasFactory {
    fn default() -> Self {
        Self::new(CEREBRAS_BASE_URL, Duration::from_secs(120))
    }
}

impl LlmClientFactory for CerebrasFactory {
    fn create_client(&self, model: Model, api_key: &str) -> Arc<dyn LlmClient> {
        Arc::new(
            CerebrasClient::with_timeout(api_key, model.api_name(), self.timeout)
                .with_base_url(self.base_url.clone()),
        )
    }
}
