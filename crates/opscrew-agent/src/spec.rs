use serde::{Deserialize, Serialize};

/// Immutable configuration of one agent: a named role bound to zero or
/// more tools. Loaded from the agent table before a run and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Stable identity, referenced by task configuration.
    pub name: String,
    /// The role the agent plays (e.g. "Site Reliability Engineer").
    pub role: String,
    /// What the agent is trying to achieve.
    pub goal: String,
    /// Persona text that shapes the agent's voice and judgment.
    pub backstory: String,
    /// Names of tools this agent may invoke. May be empty.
    #[serde(default)]
    pub tools: Vec<String>,
}

impl AgentSpec {
    /// The system prompt assembled from the agent's persona.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}.\n\nYour goal: {goal}\n\nBackground: {backstory}",
            role = self.role,
            goal = self.goal,
            backstory = self.backstory,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_carries_persona() {
        let agent = AgentSpec {
            name: "sre_agent".to_string(),
            role: "Site Reliability Engineer".to_string(),
            goal: "Detect anomalies in fleet logs".to_string(),
            backstory: "Ten years of on-call experience.".to_string(),
            tools: vec!["tail_log".to_string()],
        };
        let prompt = agent.system_prompt();
        assert!(prompt.contains("Site Reliability Engineer"));
        assert!(prompt.contains("Detect anomalies"));
        assert!(prompt.contains("on-call experience"));
    }

    #[test]
    fn tools_default_to_empty() {
        let toml_str = r#"
            name = "fleet_health_analyst"
            role = "Fleet Health Analyst"
            goal = "Summarize incident reports"
            backstory = "Writes crisp status updates."
        "#;
        let agent: AgentSpec = toml::from_str(toml_str).unwrap();
        assert!(agent.tools.is_empty());
    }
}
