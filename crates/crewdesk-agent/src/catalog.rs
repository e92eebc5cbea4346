//! Static catalog of selectable models, tools, task types and output formats.
//!
//! Each table is an enumerated type with associated presentation metadata,
//! resolved by its stable string identifier through serde. Nothing here is
//! mutable at runtime; the tables exist to populate the selection widgets
//! and to map a selected identifier back to its display metadata.

use serde::{Deserialize, Serialize};

/// Selectable Cerebras-hosted models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "cerebras/llama-4-scout-17b-16e-instruct")]
    Llama4Scout,
    #[serde(rename = "cerebras/llama3.1-8b")]
    Llama31_8b,
    #[serde(rename = "cerebras/llama-3.3-70b")]
    Llama33_70b,
}

impl Model {
    pub fn all() -> &'static [Model] {
        &[Model::Llama4Scout, Model::Llama31_8b, Model::Llama33_70b]
    }

    /// Stable catalog identifier (keeps the provider routing prefix).
    pub fn id(&self) -> &'static str {
        match self {
            Model::Llama4Scout => "cerebras/llama-4-scout-17b-16e-instruct",
            Model::Llama31_8b => "cerebras/llama3.1-8b",
            Model::Llama33_70b => "cerebras/llama-3.3-70b",
        }
    }

    /// Model name as the inference endpoint expects it, without the
    /// routing prefix.
    pub fn api_name(&self) -> &'static str {
        self.id()
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or_else(|| self.id())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Model::Llama4Scout => "Llama 4 Scout",
            Model::Llama31_8b => "Llama 3.1 (8B)",
            Model::Llama33_70b => "Llama 3.3 (70B)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Model::Llama4Scout => "Latest Llama model optimized for instruction following",
            Model::Llama31_8b => "Efficient model for faster inference",
            Model::Llama33_70b => "Largest model for most complex tasks",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Model::Llama4Scout => "🦙",
            Model::Llama31_8b => "⚡",
            Model::Llama33_70b => "🧠",
        }
    }
}

/// Optional tools an agent may carry on a research run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Serper,
}

impl ToolKind {
    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::Serper]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::Serper => "serper",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Serper => "SerperDev Search",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Serper => "Search the web for recent information and developments",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolKind::Serper => "🔍",
        }
    }

    /// Whether the tool checkbox starts enabled in the UI.
    pub fn default_enabled(&self) -> bool {
        match self {
            ToolKind::Serper => true,
        }
    }
}

/// The two kinds of run a submission can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Research,
    Code,
}

impl TaskType {
    pub fn all() -> &'static [TaskType] {
        &[TaskType::Research, TaskType::Code]
    }

    pub fn id(&self) -> &'static str {
        match self {
            TaskType::Research => "research",
            TaskType::Code => "code",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TaskType::Research => "Research Analysis",
            TaskType::Code => "Code Analysis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TaskType::Research => "Analyze trends and developments in a specific field",
            TaskType::Code => "Analyze and improve Python code",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskType::Research => "📚",
            TaskType::Code => "💻",
        }
    }

    /// Label used in the missing-input message for this task type.
    pub fn input_label(&self) -> &'static str {
        match self {
            TaskType::Research => "research goal",
            TaskType::Code => "code",
        }
    }
}

/// Presentation formats for research output. Ignored for code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    ExecutiveSummary,
    DetailedReport,
    BulletPoints,
}

impl OutputFormat {
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::ExecutiveSummary,
            OutputFormat::DetailedReport,
            OutputFormat::BulletPoints,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::ExecutiveSummary => "executive_summary",
            OutputFormat::DetailedReport => "detailed_report",
            OutputFormat::BulletPoints => "bullet_points",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OutputFormat::ExecutiveSummary => "Executive Summary",
            OutputFormat::DetailedReport => "Detailed Report",
            OutputFormat::BulletPoints => "Bullet Points",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::ExecutiveSummary => {
                "Concise overview of key findings and recommendations"
            }
            OutputFormat::DetailedReport => "Comprehensive analysis with in-depth explanations",
            OutputFormat::BulletPoints => "Key points in an easy-to-read format",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            OutputFormat::ExecutiveSummary => "📊",
            OutputFormat::DetailedReport => "📑",
            OutputFormat::BulletPoints => "🔍",
        }
    }
}

/// Catalog entry metadata sent to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_enabled: Option<bool>,
}

impl Model {
    pub fn catalog() -> Vec<CatalogEntry> {
        Model::all()
            .iter()
            .map(|m| CatalogEntry {
                id: m.id(),
                name: m.display_name(),
                description: m.description(),
                icon: m.icon(),
                default_enabled: None,
            })
            .collect()
    }
}

impl ToolKind {
    pub fn catalog() -> Vec<CatalogEntry> {
        ToolKind::all()
            .iter()
            .map(|t| CatalogEntry {
                id: t.id(),
                name: t.display_name(),
                description: t.description(),
                icon: t.icon(),
                default_enabled: Some(t.default_enabled()),
            })
            .collect()
    }
}

impl TaskType {
    pub fn catalog() -> Vec<CatalogEntry> {
        TaskType::all()
            .iter()
            .map(|t| CatalogEntry {
                id: t.id(),
                name: t.display_name(),
                description: t.description(),
                icon: t.icon(),
                default_enabled: None,
            })
            .collect()
    }
}

impl OutputFormat {
    pub fn catalog() -> Vec<CatalogEntry> {
        OutputFormat::all()
            .iter()
            .map(|f| CatalogEntry {
                id: f.id(),
                name: f.display_name(),
                description: f.description(),
                icon: f.icon(),
                default_enabled: None,
            })
            .collect()
    }
}
