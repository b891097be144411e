use chrono::{DateTime, Utc};
use opscrew_core::ExecutionContext;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One ordered unit of work: a description template, an expected-output
/// contract, the agent that executes it, and an optional output file.
/// Declaration order equals execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Stable identity; keys the task's output in the execution context.
    pub name: String,
    /// Description template, may contain `{placeholder}`s resolved from
    /// the caller's input mapping.
    pub description: String,
    /// Free-text contract guiding the backend's output. Not machine-validated.
    pub expected_output: String,
    /// Name of the agent that executes this task. Must resolve to a
    /// declared agent — checked at pipeline assembly.
    pub agent: String,
    /// When set, the task's output is persisted here (truncate-then-write).
    #[serde(default)]
    pub output_file: Option<PathBuf>,
}

/// The aggregate outcome of a completed run: the last task's output plus
/// the full execution context for introspection. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// The final task's output.
    pub final_output: String,
    /// Every task's recorded output, in execution order, plus the inputs.
    pub context: ExecutionContext,
}
