use crate::tool::{Tool, ToolDescriptor};
use opscrew_core::{OpscrewError, OpscrewResult, ToolCall, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Central registry for all declared tools.
///
/// Owns the tool instances; agents reference them by name. Agent tool
/// bindings are validated against this registry at pipeline assembly, so
/// an [`OpscrewError::UnknownTool`] from [`invoke`](Self::invoke) at run
/// time means the backend named a tool it was never offered.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its descriptor name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.descriptor().name.clone();
        info!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Descriptors for the named subset of tools, in the order given.
    /// Names that do not resolve are skipped; assembly-time validation
    /// guarantees they resolve for configured agents.
    pub fn descriptors_for(&self, names: &[String]) -> Vec<ToolDescriptor> {
        names
            .iter()
            .filter_map(|n| self.tools.get(n))
            .map(|t| t.descriptor().clone())
            .collect()
    }

    /// Executes one tool call.
    pub async fn invoke(&self, call: ToolCall) -> OpscrewResult<ToolResult> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| OpscrewError::UnknownTool(call.name.clone()))?;
        tool.execute(call).await
    }
}
