//! Web search tool backed by the SerperDev API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AgentError, Result};
use crate::tools::{Tool, ToolOutput};

const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";
const DEFAULT_NUM_RESULTS: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchInput {
    query: String,
    num_results: Option<usize>,
}

/// Web search over the SerperDev API. Requires an API key at construction;
/// a run that cannot construct this tool simply proceeds without it.
pub struct SerperSearchTool {
    client: Client,
    api_key: String,
}

impl SerperSearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    fn parse_results(data: &Value, num: usize) -> Vec<Value> {
        data["organic"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .take(num)
                    .map(|r| {
                        json!({
                            "title": r["title"].as_str().unwrap_or(""),
                            "url": r["link"].as_str().unwrap_or(""),
                            "snippet": r["snippet"].as_str().unwrap_or("")
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    }

    async fn search(&self, query: &str, num: usize) -> Result<Value> {
        let body = json!({ "q": query, "num": num });
        let response = self
            .client
            .post(SERPER_SEARCH_URL)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Tool(format!(
                "SerperDev API error ({}): {}",
                status, body
            )));
        }

        let data: Value = response.json().await?;
        let results = Self::parse_results(&data, num);
        Ok(json!({ "provider": "serper", "results": results }))
    }
}

#[async_trait]
impl Tool for SerperSearchTool {
    fn name(&self) -> &str {
        "serper_search"
    }

    fn description(&self) -> &str {
        "Search the web for recent information and developments"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to return (default 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput> {
        let input: SearchInput = match serde_json::from_value(input) {
            Ok(input) => input,
            Err(e) => return Ok(ToolOutput::error(format!("Invalid search input: {}", e))),
        };

        let num = input.num_results.unwrap_or(DEFAULT_NUM_RESULTS);
        tracing::debug!(query = %input.query, num, "Running web search");

        match self.search(&input.query, num).await {
            Ok(results) => Ok(ToolOutput::success(results)),
            Err(e) => Ok(ToolOutput::error(format!("Web search failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_the_query_parameter() {
        let tool = SerperSearchTool::new("test-key");
        let schema = tool.schema();
        assert_eq!(schema.name, "serper_search");
        assert_eq!(schema.parameters["required"][0], "query");
    }

    #[test]
    fn parses_organic_results() {
        let body = json!({
            "organic": [
                { "title": "Rust", "link": "https://rust-lang.org", "snippet": "A language" },
                { "title": "Crates", "link": "https://crates.io", "snippet": "Registry" },
                { "title": "Docs", "link": "https://docs.rs", "snippet": "Docs" }
            ]
        });

        let results = SerperSearchTool::parse_results(&body, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "Rust");
        assert_eq!(results[0]["url"], "https://rust-lang.org");
    }

    #[test]
    fn missing_organic_section_yields_no_results() {
        let results = SerperSearchTool::parse_results(&json!({}), 5);
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn malformed_input_is_a_tool_error_not_a_failure() {
        let tool = SerperSearchTool::new("test-key");
        let output = tool.execute(json!({ "nope": true })).await.unwrap();
        assert!(!output.success);
        assert!(output.error.unwrap().contains("Invalid search input"));
    }
}
