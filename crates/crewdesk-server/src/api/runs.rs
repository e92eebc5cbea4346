use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crewdesk_agent::catalog::TaskType;
use crewdesk_agent::{RunError, RunPhase, RunRequest};

use crate::api::{state::AppState, ApiResponse};

/// Outcome of one submission. Failures here are domain results (the run
/// itself failed), not transport errors, so they still travel in a
/// successful envelope with `status: "failed"`.
#[derive(Debug, Serialize)]
pub struct RunView {
    pub status: RunStatus,
    /// Heading for the result panel: the task type for code runs, the
    /// selected output format for research runs.
    pub title: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RunErrorView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct RunErrorView {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    pub phase: RunPhase,
}

impl RunErrorView {
    fn from_error(error: &RunError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            hint: error.hint(),
            phase: error.phase(),
        }
    }
}

fn result_heading(request: &RunRequest) -> (String, String) {
    match request.task_type {
        TaskType::Code => (
            request.task_type.display_name().to_string(),
            request.task_type.icon().to_string(),
        ),
        TaskType::Research => (
            request.output_format.display_name().to_string(),
            request.output_format.icon().to_string(),
        ),
    }
}

/// POST /api/runs - execute one submission to completion
pub async fn submit_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Json<ApiResponse<RunView>> {
    let (title, icon) = result_heading(&request);

    let view = match state.coordinator.execute(&request).await {
        Ok(artifact) => RunView {
            status: RunStatus::Completed,
            title,
            icon,
            id: Some(artifact.id),
            output: Some(artifact.output),
            completed_at: Some(artifact.completed_at),
            error: None,
        },
        Err(error) => {
            tracing::warn!(kind = error.kind(), "Run failed: {error}");
            RunView {
                status: RunStatus::Failed,
                title,
                icon,
                id: None,
                output: None,
                completed_at: None,
                error: Some(RunErrorView::from_error(&error)),
            }
        }
    };

    Json(ApiResponse::ok(view))
}
