//! Preconfigured agent descriptors.

use std::sync::Arc;

use crate::tools::Tool;

/// Sampling temperature used for every run.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Role, goal and backstory bundle handed to the crew runner for one task.
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<Arc<dyn Tool>>,
    pub temperature: f32,
    /// Maximum number of tool rounds before the agent is forced to answer.
    pub max_iter: usize,
    pub verbose: bool,
}

impl AgentSpec {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: vec![],
            temperature: DEFAULT_TEMPERATURE,
            max_iter: 1,
            verbose: true,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// System preamble composed from the agent's identity.
    pub fn preamble(&self) -> String {
        format!(
            "You are {}.\n\nYour goal: {}\n\nBackstory: {}",
            self.role, self.goal, self.backstory
        )
    }
}

/// Research specialist with the supplied tool set.
pub fn researcher(tools: Vec<Arc<dyn Tool>>) -> AgentSpec {
    AgentSpec::new(
        "Research Specialist",
        "Analyze trends and provide concise insights",
        "Expert researcher specializing in trend analysis and clear reporting",
    )
    .with_tools(tools)
    .with_max_iter(2)
}

/// One-shot Python code analyst. Static analysis only, no tools.
pub fn code_analyst() -> AgentSpec {
    AgentSpec::new(
        "Python Code Analyst",
        "Analyze Python code for quality, structure, and best practices",
        "Expert Python developer specializing in code analysis, optimization, and best practices",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn researcher_has_fixed_identity_and_iteration_cap() {
        let agent = researcher(vec![]);
        assert_eq!(agent.role, "Research Specialist");
        assert_eq!(agent.max_iter, 2);
        assert!(agent.verbose);
        assert_eq!(agent.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn code_analyst_carries_no_tools() {
        let agent = code_analyst();
        assert_eq!(agent.role, "Python Code Analyst");
        assert!(agent.tools.is_empty());
    }

    #[test]
    fn preamble_embeds_role_goal_and_backstory() {
        let agent = AgentSpec::new("Tester", "Test things", "Knows tests");
        let preamble = agent.preamble();
        assert!(preamble.contains("You are Tester."));
        assert!(preamble.contains("Your goal: Test things"));
        assert!(preamble.contains("Backstory: Knows tests"));
    }
}
