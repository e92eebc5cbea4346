//! Server configuration, resolved once from the environment at startup.

use std::env;
use std::time::Duration;

use crewdesk_agent::EngineSettings;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Required for runs; its absence is reported per submission, not at boot.
    pub cerebras_api_key: Option<String>,
    /// Optional; absence only disables the web search tool.
    pub serper_api_key: Option<String>,
    pub llm_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env::var("CREWDESK_HOST").unwrap_or_else(|_| default_host());
        let port = env::var("CREWDESK_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let llm_timeout = env::var("CREWDESK_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS));

        Self {
            host,
            port,
            cerebras_api_key: non_empty_env("CEREBRAS_API_KEY"),
            serper_api_key: non_empty_env("SERPER_API_KEY"),
            llm_timeout,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            cerebras_api_key: self.cerebras_api_key.clone(),
            serper_api_key: self.serper_api_key.clone(),
            timeout: self.llm_timeout,
            ..EngineSettings::default()
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
