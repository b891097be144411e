use crate::engine::Pipeline;
use crate::types::TaskSpec;
use opscrew_agent::{AgentExecutor, AgentSpec};
use opscrew_core::{OpscrewError, OpscrewResult};
use opscrew_tools::ToolRegistry;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Assembles a [`Pipeline`] from declared agents and tasks, validating the
/// whole configuration before anything executes.
///
/// Every check here is an assembly-time guarantee: a misconfigured pipeline
/// must fail before the first task runs, so a bad config can never leave
/// partial output files behind.
#[derive(Default)]
pub struct PipelineBuilder {
    agents: Vec<AgentSpec>,
    tasks: Vec<TaskSpec>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an agent.
    pub fn agent(mut self, agent: AgentSpec) -> Self {
        self.agents.push(agent);
        self
    }

    /// Declares several agents at once.
    pub fn agents(mut self, agents: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Appends a task. Declaration order is execution order.
    pub fn task(mut self, task: TaskSpec) -> Self {
        self.tasks.push(task);
        self
    }

    /// Appends several tasks in order.
    pub fn tasks(mut self, tasks: impl IntoIterator<Item = TaskSpec>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Validates the configuration and assembles the pipeline.
    ///
    /// `tools` must be the same registry the executor invokes against;
    /// agent tool bindings are resolved against it here so an unknown tool
    /// name can never surface mid-run.
    pub fn build(
        self,
        executor: AgentExecutor,
        tools: &ToolRegistry,
    ) -> OpscrewResult<Pipeline> {
        if self.tasks.is_empty() {
            return Err(OpscrewError::Config(
                "pipeline declares no tasks".to_string(),
            ));
        }

        let mut agents: HashMap<String, AgentSpec> = HashMap::new();
        for agent in self.agents {
            for tool in &agent.tools {
                if !tools.contains(tool) {
                    return Err(OpscrewError::Config(format!(
                        "agent '{}' references unknown tool '{tool}'",
                        agent.name
                    )));
                }
            }
            let name = agent.name.clone();
            if agents.insert(name.clone(), agent).is_some() {
                return Err(OpscrewError::Config(format!(
                    "duplicate agent name '{name}'"
                )));
            }
        }

        let mut task_names = HashSet::new();
        let mut output_files = HashSet::new();
        for task in &self.tasks {
            if !task_names.insert(task.name.as_str()) {
                return Err(OpscrewError::Config(format!(
                    "duplicate task name '{}'",
                    task.name
                )));
            }
            if !agents.contains_key(&task.agent) {
                return Err(OpscrewError::Config(format!(
                    "task '{}' references undeclared agent '{}'",
                    task.name, task.agent
                )));
            }
            if let Some(path) = &task.output_file {
                if !output_files.insert(path.clone()) {
                    return Err(OpscrewError::Config(format!(
                        "task '{}' declares output file '{}' already used by another task",
                        task.name,
                        path.display()
                    )));
                }
            }
        }

        info!(
            agents = agents.len(),
            tasks = self.tasks.len(),
            "Pipeline assembled"
        );

        Ok(Pipeline::new(agents, self.tasks, executor))
    }
}
