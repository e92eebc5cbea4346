use axum::{extract::State, Json};
use serde::Serialize;

use crewdesk_agent::catalog::{CatalogEntry, Model, OutputFormat, TaskType, ToolKind};

use crate::api::{state::AppState, ApiResponse};

#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub models: Vec<CatalogEntry>,
    pub tools: Vec<CatalogEntry>,
    pub task_types: Vec<CatalogEntry>,
    pub output_formats: Vec<CatalogEntry>,
    pub serper_configured: bool,
}

/// GET /api/catalog - the four selection tables with display metadata
pub async fn get_catalog(State(state): State<AppState>) -> Json<ApiResponse<CatalogView>> {
    Json(ApiResponse::ok(CatalogView {
        models: Model::catalog(),
        tools: ToolKind::catalog(),
        task_types: TaskType::catalog(),
        output_formats: OutputFormat::catalog(),
        serper_configured: state.serper_configured,
    }))
}
