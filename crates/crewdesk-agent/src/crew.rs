//! Sequential execution of one agent and one task.

use crate::agent::AgentSpec;
use crate::error::{AgentError, Result};
use crate::llm::client::{CompletionRequest, LlmClient, Message, ToolCall};
use crate::tools::ToolSchema;

/// Execution process. Every run is one agent with one task, so the
/// sequential process is the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Process {
    Sequential,
}

/// A task description bound to an expected-output template.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
}

impl TaskSpec {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// User prompt for the task.
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nExpected output: {}",
            self.description, self.expected_output
        )
    }
}

/// One agent, one task, executed to a single text artifact.
pub struct Crew {
    pub agent: AgentSpec,
    pub task: TaskSpec,
    pub process: Process,
}

impl Crew {
    pub fn sequential(agent: AgentSpec, task: TaskSpec) -> Self {
        Self {
            agent,
            task,
            process: Process::Sequential,
        }
    }

    /// Run the task to completion against the given client.
    ///
    /// Tool rounds are capped by the agent's `max_iter`; when the cap is
    /// reached a final completion is requested without tools so the model
    /// must produce a text answer.
    pub async fn kickoff(&self, llm: &dyn LlmClient) -> Result<String> {
        let mut messages = vec![
            Message::system(self.agent.preamble()),
            Message::user(self.task.prompt()),
        ];

        let schemas: Vec<ToolSchema> = self.agent.tools.iter().map(|t| t.schema()).collect();

        if !schemas.is_empty() {
            for round in 0..self.agent.max_iter {
                let request = CompletionRequest::new(messages.clone())
                    .with_tools(schemas.clone())
                    .with_temperature(self.agent.temperature);
                let response = llm.complete(request).await?;

                if response.tool_calls.is_empty() {
                    return extract_content(response.content);
                }

                if self.agent.verbose {
                    tracing::info!(round, calls = response.tool_calls.len(), "Tool round");
                }

                messages.push(Message::assistant_with_tool_calls(
                    response.content,
                    response.tool_calls.clone(),
                ));
                for call in &response.tool_calls {
                    let result = self.run_tool(call).await;
                    messages.push(Message::tool_result(&call.id, result));
                }
            }
        }

        let request =
            CompletionRequest::new(messages).with_temperature(self.agent.temperature);
        let response = llm.complete(request).await?;
        extract_content(response.content)
    }

    /// Execute one tool call. Failures are reported back to the model as
    /// tool results, never as run errors.
    async fn run_tool(&self, call: &ToolCall) -> String {
        let Some(tool) = self.agent.tools.iter().find(|t| t.name() == call.name) else {
            tracing::warn!(tool = %call.name, "Model requested an unknown tool");
            return format!("Tool '{}' is not available", call.name);
        };

        match tool.execute(call.arguments.clone()).await {
            Ok(output) if output.success => output.result.to_string(),
            Ok(output) => format!(
                "Tool error: {}",
                output.error.unwrap_or_else(|| "unknown".to_string())
            ),
            Err(e) => format!("Tool error: {}", e),
        }
    }
}

fn extract_content(content: Option<String>) -> Result<String> {
    content
        .filter(|c| !c.trim().is_empty())
        .ok_or(AgentError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{code_analyst, researcher};
    use crate::llm::mock::{MockClient, MockStep};
    use crate::tools::{Tool, ToolOutput};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn parameters_schema(&self) -> Value {
            json!({ "type": "object", "properties": {} })
        }

        async fn execute(&self, input: Value) -> crate::error::Result<ToolOutput> {
            Ok(ToolOutput::success(input))
        }
    }

    #[tokio::test]
    async fn tool_less_agent_resolves_in_one_call() {
        let crew = Crew::sequential(code_analyst(), TaskSpec::new("Analyze", "Report"));
        let client = MockClient::text("analysis done");

        let output = crew.kickoff(&client).await.unwrap();
        assert_eq!(output, "analysis done");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn tool_round_feeds_result_back_and_returns_final_answer() {
        let agent = researcher(vec![Arc::new(EchoTool)]);
        let crew = Crew::sequential(agent, TaskSpec::new("Find trends", "Executive Summary"));
        let client = MockClient::new(vec![
            MockStep::ToolCall {
                id: "call_1".to_string(),
                name: "echo".to_string(),
                arguments: json!({"q": "trends"}),
            },
            MockStep::Text("final answer".to_string()),
        ]);

        let output = crew.kickoff(&client).await.unwrap();
        assert_eq!(output, "final answer");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn iteration_cap_forces_a_final_answer() {
        // The model keeps asking for tools; after max_iter rounds the crew
        // requests a completion without tools.
        let agent = researcher(vec![Arc::new(EchoTool)]);
        let max_iter = agent.max_iter;
        let crew = Crew::sequential(agent, TaskSpec::new("Find trends", "Executive Summary"));

        let mut steps = Vec::new();
        for i in 0..max_iter {
            steps.push(MockStep::ToolCall {
                id: format!("call_{}", i),
                name: "echo".to_string(),
                arguments: json!({}),
            });
        }
        steps.push(MockStep::Text("forced answer".to_string()));
        let client = MockClient::new(steps);

        let output = crew.kickoff(&client).await.unwrap();
        assert_eq!(output, "forced answer");
        assert_eq!(client.call_count(), max_iter + 1);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_back_to_the_model() {
        let agent = researcher(vec![Arc::new(EchoTool)]);
        let crew = Crew::sequential(agent, TaskSpec::new("Find trends", "Bullet Points"));
        let client = MockClient::new(vec![
            MockStep::ToolCall {
                id: "call_1".to_string(),
                name: "does_not_exist".to_string(),
                arguments: json!({}),
            },
            MockStep::Text("recovered".to_string()),
        ]);

        let output = crew.kickoff(&client).await.unwrap();
        assert_eq!(output, "recovered");
    }

    #[tokio::test]
    async fn empty_completion_is_an_error() {
        let crew = Crew::sequential(code_analyst(), TaskSpec::new("Analyze", "Report"));
        let client = MockClient::text("   ");

        let err = crew.kickoff(&client).await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyCompletion));
    }

    #[test]
    fn task_prompt_appends_expected_output() {
        let task = TaskSpec::new("Do the thing", "Detailed Report");
        assert_eq!(
            task.prompt(),
            "Do the thing\n\nExpected output: Detailed Report"
        );
    }
}
