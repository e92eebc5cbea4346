//! Run controller: validates a submission, builds the crew and executes it.
//!
//! Each submission moves Idle -> Validating -> Running -> Done/Failed and
//! is independent of every other submission; nothing is cached or shared
//! across runs.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::agent;
use crate::catalog::{Model, OutputFormat, TaskType, ToolKind};
use crate::crew::{Crew, TaskSpec};
use crate::error::AgentError;
use crate::llm::cerebras::CEREBRAS_BASE_URL;
use crate::llm::factory::{CerebrasFactory, LlmClientFactory};
use crate::tools::{SerperSearchTool, Tool};

/// Expected-output template for code-analysis tasks.
pub const CODE_ANALYSIS_EXPECTED_OUTPUT: &str =
    "Analysis report with code quality assessment and recommendations";

/// One user submission.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub model: Model,
    pub task_type: TaskType,
    pub input: String,
    /// Only meaningful for research runs.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Enabled tool identifiers. Only meaningful for research runs.
    #[serde(default)]
    pub tools: Vec<ToolKind>,
}

/// Phase a run was in when it finished or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Validating,
    Running,
    Done,
}

/// Why a run failed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Please provide the {0}.")]
    MissingInput(&'static str),

    #[error("Cerebras API key not found. Please set CEREBRAS_API_KEY in the environment.")]
    MissingCredential,

    #[error(transparent)]
    Engine(#[from] AgentError),
}

impl RunError {
    /// Stable identifier for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::MissingInput(_) => "missing_input",
            RunError::MissingCredential => "missing_credential",
            RunError::Engine(_) => "external",
        }
    }

    /// Phase the run failed in.
    pub fn phase(&self) -> RunPhase {
        match self {
            RunError::MissingInput(_) | RunError::MissingCredential => RunPhase::Validating,
            RunError::Engine(_) => RunPhase::Running,
        }
    }

    /// Remediation hint shown next to the error, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunError::MissingInput(_) => None,
            RunError::MissingCredential => {
                Some("Please add CEREBRAS_API_KEY to your environment.")
            }
            RunError::Engine(e) if e.is_credential_related() => {
                Some("Please check your API key configuration.")
            }
            RunError::Engine(_) => {
                Some("Try narrowing the scope or selecting a briefer output format.")
            }
        }
    }
}

/// The completed run's text artifact.
#[derive(Debug, Clone, Serialize)]
pub struct RunArtifact {
    pub id: Uuid,
    pub output: String,
    pub completed_at: DateTime<Utc>,
}

/// Credentials and endpoint configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub cerebras_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cerebras_api_key: None,
            serper_api_key: None,
            base_url: CEREBRAS_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Builds and executes exactly one crew per submission.
pub struct RunCoordinator {
    settings: EngineSettings,
    factory: Arc<dyn LlmClientFactory>,
}

impl RunCoordinator {
    pub fn new(settings: EngineSettings) -> Self {
        let factory = Arc::new(CerebrasFactory::new(
            settings.base_url.clone(),
            settings.timeout,
        ));
        Self { settings, factory }
    }

    /// Substitute the client factory. Used by tests to script completions.
    pub fn with_factory(settings: EngineSettings, factory: Arc<dyn LlmClientFactory>) -> Self {
        Self { settings, factory }
    }

    /// Validate the request and build the crew, without contacting anything.
    pub fn assemble(&self, request: &RunRequest) -> Result<Crew, RunError> {
        let input = request.input.trim();
        if input.is_empty() {
            return Err(RunError::MissingInput(request.task_type.input_label()));
        }
        if self.resolved_api_key().is_none() {
            return Err(RunError::MissingCredential);
        }

        let crew = match request.task_type {
            TaskType::Code => Crew::sequential(
                agent::code_analyst(),
                TaskSpec::new(
                    format!("Analyze this Python code:\n{}", input),
                    CODE_ANALYSIS_EXPECTED_OUTPUT,
                ),
            ),
            TaskType::Research => Crew::sequential(
                agent::researcher(self.build_tools(&request.tools)),
                TaskSpec::new(input, request.output_format.display_name()),
            ),
        };

        Ok(crew)
    }

    /// Run one submission to completion.
    pub async fn execute(&self, request: &RunRequest) -> Result<RunArtifact, RunError> {
        let crew = self.assemble(request)?;
        let api_key = self.resolved_api_key().ok_or(RunError::MissingCredential)?;

        tracing::info!(
            model = request.model.id(),
            task_type = request.task_type.id(),
            agent = %crew.agent.role,
            "Starting run"
        );

        let client = self.factory.create_client(request.model, &api_key);
        let output = crew.kickoff(client.as_ref()).await?;

        tracing::info!(task_type = request.task_type.id(), "Run completed");

        Ok(RunArtifact {
            id: Uuid::new_v4(),
            output,
            completed_at: Utc::now(),
        })
    }

    fn resolved_api_key(&self) -> Option<String> {
        self.settings
            .cerebras_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| k.to_string())
    }

    /// Instantiate the enabled tools. A tool whose own credential is
    /// missing is dropped with a warning; the run continues without it.
    fn build_tools(&self, selected: &[ToolKind]) -> Vec<Arc<dyn Tool>> {
        let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
        for kind in selected {
            match kind {
                ToolKind::Serper => {
                    match self
                        .settings
                        .serper_api_key
                        .as_deref()
                        .filter(|k| !k.trim().is_empty())
                    {
                        Some(key) => tools.push(Arc::new(SerperSearchTool::new(key))),
                        None => {
                            tracing::warn!("SerperDev API key missing; dropping web search tool")
                        }
                    }
                }
            }
        }
        tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::LlmClient;
    use crate::llm::mock::{MockClient, MockStep};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockFactory {
        client: Arc<MockClient>,
        created: AtomicUsize,
    }

    impl MockFactory {
        fn new(client: MockClient) -> Arc<Self> {
            Arc::new(Self {
                client: Arc::new(client),
                created: AtomicUsize::new(0),
            })
        }

        fn clients_created(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }

        fn completions(&self) -> usize {
            self.client.call_count()
        }
    }

    impl LlmClientFactory for MockFactory {
        fn create_client(&self, _model: Model, _api_key: &str) -> Arc<dyn LlmClient> {
            self.created.fetch_add(1, Ordering::SeqCst);
            self.client.clone()
        }
    }

    fn settings_with_keys() -> EngineSettings {
        EngineSettings {
            cerebras_api_key: Some("csk-test".to_string()),
            serper_api_key: Some("serper-test".to_string()),
            ..EngineSettings::default()
        }
    }

    fn research_request(input: &str) -> RunRequest {
        RunRequest {
            model: Model::Llama4Scout,
            task_type: TaskType::Research,
            input: input.to_string(),
            output_format: OutputFormat::DetailedReport,
            tools: vec![ToolKind::Serper],
        }
    }

    fn code_request(input: &str) -> RunRequest {
        RunRequest {
            model: Model::Llama31_8b,
            task_type: TaskType::Code,
            input: input.to_string(),
            output_format: OutputFormat::default(),
            tools: vec![],
        }
    }

    #[tokio::test]
    async fn empty_input_halts_before_any_external_call() {
        let factory = MockFactory::new(MockClient::text("never"));
        let coordinator = RunCoordinator::with_factory(settings_with_keys(), factory.clone());

        let err = coordinator
            .execute(&research_request("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::MissingInput("research goal")));
        assert_eq!(err.to_string(), "Please provide the research goal.");
        assert_eq!(err.phase(), RunPhase::Validating);
        assert_eq!(factory.clients_created(), 0);
        assert_eq!(factory.completions(), 0);
    }

    #[tokio::test]
    async fn empty_code_input_names_the_code_field() {
        let factory = MockFactory::new(MockClient::text("never"));
        let coordinator = RunCoordinator::with_factory(settings_with_keys(), factory);

        let err = coordinator.execute(&code_request("")).await.unwrap_err();
        assert_eq!(err.to_string(), "Please provide the code.");
    }

    #[tokio::test]
    async fn missing_credential_halts_before_any_external_call() {
        let factory = MockFactory::new(MockClient::text("never"));
        let settings = EngineSettings {
            serper_api_key: Some("serper-test".to_string()),
            ..EngineSettings::default()
        };
        let coordinator = RunCoordinator::with_factory(settings, factory.clone());

        let err = coordinator
            .execute(&research_request("AI trends"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::MissingCredential));
        assert!(err.to_string().starts_with("Cerebras API key not found"));
        assert_eq!(err.kind(), "missing_credential");
        assert_eq!(factory.clients_created(), 0);
        assert_eq!(factory.completions(), 0);
    }

    #[tokio::test]
    async fn code_task_embeds_the_submitted_code_verbatim() {
        let coordinator = RunCoordinator::new(settings_with_keys());
        let crew = coordinator
            .assemble(&code_request("def f(x): return x"))
            .unwrap();

        assert_eq!(
            crew.task.description,
            "Analyze this Python code:\ndef f(x): return x"
        );
        assert_eq!(crew.task.expected_output, CODE_ANALYSIS_EXPECTED_OUTPUT);
        assert_eq!(crew.agent.role, "Python Code Analyst");
        assert!(crew.agent.tools.is_empty());
    }

    #[tokio::test]
    async fn research_expected_output_is_the_format_display_name() {
        let coordinator = RunCoordinator::new(settings_with_keys());
        let crew = coordinator.assemble(&research_request("AI trends")).unwrap();

        assert_eq!(crew.task.description, "AI trends");
        assert_eq!(crew.task.expected_output, "Detailed Report");
        assert_eq!(crew.agent.role, "Research Specialist");
        assert_eq!(crew.agent.tools.len(), 1);
        assert_eq!(crew.agent.tools[0].name(), "serper_search");
    }

    #[tokio::test]
    async fn missing_serper_key_drops_the_tool_but_run_proceeds() {
        let factory = MockFactory::new(MockClient::text("summary text"));
        let settings = EngineSettings {
            cerebras_api_key: Some("csk-test".to_string()),
            ..EngineSettings::default()
        };
        let coordinator = RunCoordinator::with_factory(settings, factory.clone());

        let crew = coordinator.assemble(&research_request("AI trends")).unwrap();
        assert!(crew.agent.tools.is_empty());

        let artifact = coordinator
            .execute(&research_request("AI trends"))
            .await
            .unwrap();
        assert_eq!(artifact.output, "summary text");
        assert_eq!(factory.clients_created(), 1);
    }

    #[tokio::test]
    async fn credential_related_engine_error_gets_the_key_hint() {
        let factory = MockFactory::new(MockClient::new(vec![MockStep::Error(
            "Invalid API key supplied".to_string(),
        )]));
        let coordinator = RunCoordinator::with_factory(settings_with_keys(), factory);

        let err = coordinator.execute(&code_request("print(1)")).await.unwrap_err();
        assert_eq!(err.kind(), "external");
        assert_eq!(err.phase(), RunPhase::Running);
        assert_eq!(err.hint(), Some("Please check your API key configuration."));
    }

    #[tokio::test]
    async fn generic_engine_error_gets_the_scope_hint() {
        let factory = MockFactory::new(MockClient::new(vec![MockStep::Error(
            "upstream timeout".to_string(),
        )]));
        let coordinator = RunCoordinator::with_factory(settings_with_keys(), factory);

        let err = coordinator.execute(&code_request("print(1)")).await.unwrap_err();
        assert_eq!(
            err.hint(),
            Some("Try narrowing the scope or selecting a briefer output format.")
        );
    }

    #[tokio::test]
    async fn typed_auth_error_gets_the_key_hint() {
        let factory = MockFactory::new(MockClient::new(vec![MockStep::AuthError(
            "401 Unauthorized".to_string(),
        )]));
        let coordinator = RunCoordinator::with_factory(settings_with_keys(), factory);

        let err = coordinator.execute(&code_request("print(1)")).await.unwrap_err();
        assert_eq!(err.hint(), Some("Please check your API key configuration."));
    }

    #[tokio::test]
    async fn successful_run_yields_an_artifact() {
        let factory = MockFactory::new(MockClient::text("the report"));
        let coordinator = RunCoordinator::with_factory(settings_with_keys(), factory.clone());

        let artifact = coordinator
            .execute(&research_request("AI trends"))
            .await
            .unwrap();

        assert_eq!(artifact.output, "the report");
        assert_eq!(factory.clients_created(), 1);
        assert_eq!(factory.completions(), 1);
    }

    #[test]
    fn run_request_deserializes_with_defaults() {
        let request: RunRequest = serde_json::from_str(
            r#"{
                "model": "cerebras/llama-3.3-70b",
                "task_type": "research",
                "input": "quantum computing"
            }"#,
        )
        .unwrap();

        assert_eq!(request.model, Model::Llama33_70b);
        assert_eq!(request.output_format, OutputFormat::ExecutiveSummary);
        assert!(request.tools.is_empty());
    }
}
