use crate::types::{RunResult, TaskSpec};
use chrono::Utc;
use opscrew_agent::{AgentExecutor, AgentSpec, TaskPrompt};
use opscrew_core::{ExecutionContext, OpscrewError, OpscrewResult};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// The sequential orchestration engine.
///
/// Owns the validated agent registry and the ordered task list. Tasks run
/// strictly in declaration order on one logical control path: task *k+1*
/// never begins before task *k*'s output has been recorded in the
/// execution context and persisted to its configured file.
pub struct Pipeline {
    agents: HashMap<String, AgentSpec>,
    tasks: Vec<TaskSpec>,
    executor: AgentExecutor,
}

impl Pipeline {
    pub(crate) fn new(
        agents: HashMap<String, AgentSpec>,
        tasks: Vec<TaskSpec>,
        executor: AgentExecutor,
    ) -> Self {
        Self {
            agents,
            tasks,
            executor,
        }
    }

    /// The declared tasks, in execution order.
    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    /// Runs every task in order and returns the aggregate result.
    ///
    /// The first failure aborts the run immediately: tasks already
    /// completed keep their persisted output, remaining tasks never start,
    /// and no [`RunResult`] is produced.
    pub async fn run(&self, inputs: HashMap<String, String>) -> OpscrewResult<RunResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(run_id = %run_id, tasks = self.tasks.len(), "Pipeline: starting run");

        let mut context = ExecutionContext::new(inputs);

        for task in &self.tasks {
            // Resolution was validated at assembly; re-checked here so a
            // failure is a typed error rather than a panic.
            let agent = self.agents.get(&task.agent).ok_or_else(|| {
                OpscrewError::Config(format!(
                    "task '{}' references undeclared agent '{}'",
                    task.name, task.agent
                ))
            })?;

            let prompt = TaskPrompt {
                task_name: &task.name,
                description: &task.description,
                expected_output: &task.expected_output,
            };

            let output = match self.executor.execute(agent, &prompt, &context).await {
                Ok(output) => output,
                Err(e) => {
                    error!(
                        run_id = %run_id,
                        task = %task.name,
                        error = %e,
                        "Task failed, aborting run"
                    );
                    return Err(OpscrewError::Agent(format!(
                        "task '{}' failed: {e}",
                        task.name
                    )));
                }
            };

            context.record(&task.name, &output);

            if let Some(path) = &task.output_file {
                self.persist(path, &output).await?;
                info!(task = %task.name, path = %path.display(), "Task output persisted");
            }
        }

        let final_output = context
            .outputs()
            .last()
            .map(|o| o.content.clone())
            .ok_or_else(|| OpscrewError::Config("pipeline declares no tasks".to_string()))?;

        info!(
            run_id = %run_id,
            duration_ms = start.elapsed().as_millis(),
            tasks = context.completed_count(),
            "Pipeline: run complete"
        );

        Ok(RunResult {
            run_id,
            started_at,
            finished_at: Utc::now(),
            final_output,
            context,
        })
    }

    /// Truncate-then-write persistence; parent directories are created.
    async fn persist(&self, path: &Path, output: &str) -> OpscrewResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, output).await?;
        Ok(())
    }
}
