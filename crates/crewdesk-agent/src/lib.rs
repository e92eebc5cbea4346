pub mod agent;
pub mod catalog;
pub mod crew;
pub mod error;
pub mod llm;
pub mod run;
pub mod tools;

pub use agent::AgentSpec;
pub use catalog::{Model, OutputFormat, TaskType, ToolKind};
pub use crew::{Crew, Process, TaskSpec};
pub use error::{AgentError, Result};
pub use run::{EngineSettings, RunArtifact, RunCoordinator, RunError, RunPhase, RunRequest};
