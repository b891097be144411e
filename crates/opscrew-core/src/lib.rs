//! Core types and error definitions for the opscrew pipeline.
//!
//! This crate provides the foundational types shared across all opscrew
//! crates: the error taxonomy, tool call/result value types, template
//! interpolation, and the per-run execution context.
//!
//! # Main types
//!
//! - [`OpscrewError`] — Unified error enum for all opscrew subsystems.
//! - [`OpscrewResult`] — Convenience alias for `Result<T, OpscrewError>`.
//! - [`ToolCall`] — A backend-initiated tool invocation request.
//! - [`ToolResult`] — The result returned after executing a tool call.
//! - [`ExecutionContext`] — Inputs plus the accumulated task outputs of one run.

/// Pipeline-scoped execution context.
pub mod context;
/// `{placeholder}` template interpolation.
pub mod interpolate;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use context::{ExecutionContext, TaskOutput};
pub use interpolate::interpolate;

// --- Error types ---

/// Top-level error type for the opscrew pipeline.
#[derive(Debug, thiserror::Error)]
pub enum OpscrewError {
    /// A configuration problem detected at pipeline assembly, before any
    /// task executes: unassigned agent, unknown tool reference, duplicate
    /// task name, colliding output path.
    #[error("Config error: {0}")]
    Config(String),

    /// A task description template referenced a placeholder with no
    /// corresponding input value.
    #[error("Missing interpolation key: {0}")]
    MissingInterpolationKey(String),

    /// A tool invocation named a tool that is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool addressed a resource that does not exist.
    #[error("Resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// A tool failed while executing.
    #[error("Tool error: {0}")]
    Tool(String),

    /// The agent's reasoning backend failed or exceeded its turn budget.
    #[error("Agent error: {0}")]
    Agent(String),

    /// An error from an outbound HTTP request (e.g. LLM API call).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`OpscrewError`].
pub type OpscrewResult<T> = Result<T, OpscrewError>;

// --- Tool types ---

/// A request from the reasoning backend to invoke a specific tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier assigned by the backend for this call.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments to pass to the tool.
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Creates a tool call with the given id, name, and arguments.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// The result returned after executing a [`ToolCall`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The id of the [`ToolCall`] this result corresponds to.
    pub call_id: String,
    /// The textual output produced by the tool.
    pub content: String,
    /// Whether the tool execution ended in an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a successful tool result.
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Creates an error tool result.
    pub fn error(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_constructors() {
        let ok = ToolResult::success("call_1", "output");
        assert!(!ok.is_error);
        assert_eq!(ok.content, "output");

        let err = ToolResult::error("call_1", "failed");
        assert!(err.is_error);
    }

    #[test]
    fn resource_not_found_display_includes_path() {
        let e = OpscrewError::ResourceNotFound(PathBuf::from("/var/log/missing.log"));
        assert_eq!(e.to_string(), "Resource not found: /var/log/missing.log");
    }

    #[test]
    fn io_error_converts() {
        fn read() -> OpscrewResult<String> {
            Ok(std::fs::read_to_string("/nonexistent/opscrew")?)
        }
        assert!(matches!(read(), Err(OpscrewError::Io(_))));
    }
}
