use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The recorded output of one completed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// The task's declared name.
    pub task: String,
    /// The final text the task's agent produced.
    pub content: String,
}

/// The accumulating record of one pipeline run.
///
/// Holds the caller-supplied input mapping and, in completion order, every
/// finished task's output. Only the pipeline writes to it, on a single
/// logical control path; it is discarded (or handed to the caller inside a
/// run result) when the run ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    inputs: HashMap<String, String>,
    outputs: Vec<TaskOutput>,
}

impl ExecutionContext {
    /// Creates a context seeded with the caller's input mapping.
    pub fn new(inputs: HashMap<String, String>) -> Self {
        Self {
            inputs,
            outputs: Vec::new(),
        }
    }

    /// The caller-supplied input mapping.
    pub fn inputs(&self) -> &HashMap<String, String> {
        &self.inputs
    }

    /// Records a completed task's output. Appended in completion order,
    /// which for a sequential pipeline equals declaration order.
    pub fn record(&mut self, task: impl Into<String>, content: impl Into<String>) {
        self.outputs.push(TaskOutput {
            task: task.into(),
            content: content.into(),
        });
    }

    /// All recorded outputs, oldest first.
    pub fn outputs(&self) -> &[TaskOutput] {
        &self.outputs
    }

    /// The recorded output of a specific task, if it has completed.
    pub fn output_of(&self, task: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.task == task)
            .map(|o| o.content.as_str())
    }

    /// Number of completed tasks recorded so far.
    pub fn completed_count(&self) -> usize {
        self.outputs.len()
    }
}
