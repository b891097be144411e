use async_trait::async_trait;
use opscrew_core::{OpscrewResult, ToolCall, ToolResult};
use serde::{Deserialize, Serialize};

/// Metadata describing a tool's interface, advertised to the reasoning
/// backend so it can decide when to call the tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Stable tool name, referenced by agent configuration.
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema of the tool's arguments.
    pub parameters_schema: serde_json::Value,
}

/// Trait that all tools must implement.
///
/// Tools are stateless and shared read-only across every agent that binds
/// them. They may read external resources but must not mutate pipeline
/// state.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's advertised interface.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Executes one call, returning the tool's textual output.
    async fn execute(&self, call: ToolCall) -> OpscrewResult<ToolResult>;
}
