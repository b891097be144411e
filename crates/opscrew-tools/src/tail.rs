use crate::tool::{Tool, ToolDescriptor};
use async_trait::async_trait;
use opscrew_core::{OpscrewError, OpscrewResult, ToolCall, ToolResult};
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_LINE_COUNT: u64 = 20;

/// Built-in log-tail tool.
///
/// Returns the last `n` lines of a UTF-8 text file as a single
/// newline-delimited string, in original order. A file shorter than `n`
/// lines is returned whole; `n = 0` yields the empty string. A missing
/// path is a typed [`OpscrewError::ResourceNotFound`].
pub struct TailLogTool {
    descriptor: ToolDescriptor,
}

impl TailLogTool {
    /// Creates the tool with its advertised descriptor.
    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "tail_log".to_string(),
                description: "Return the last n lines of a text log file as a single string."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Path to the log file to read"
                        },
                        "n": {
                            "type": "integer",
                            "description": "Number of trailing lines to return (default: 20)"
                        }
                    },
                    "required": ["path"]
                }),
            },
        }
    }

    async fn tail(&self, path: &Path, n: u64) -> OpscrewResult<String> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OpscrewError::ResourceNotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(OpscrewError::Tool(format!(
                    "failed to read '{}': {e}",
                    path.display()
                )));
            }
        };

        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(n as usize);
        Ok(lines[start..].join("\n"))
    }
}

impl Default for TailLogTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TailLogTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> OpscrewResult<ToolResult> {
        let path_str = call.arguments["path"].as_str().unwrap_or_default();
        if path_str.is_empty() {
            return Err(OpscrewError::Tool(
                "tail_log requires a non-empty 'path' argument".to_string(),
            ));
        }

        // A malformed count goes back to the backend as a tool error so
        // it can correct its arguments.
        let n = match &call.arguments["n"] {
            serde_json::Value::Null => DEFAULT_LINE_COUNT,
            value => value.as_u64().ok_or_else(|| {
                OpscrewError::Tool(format!(
                    "tail_log 'n' must be a non-negative integer, got {value}"
                ))
            })?,
        };
        let path = PathBuf::from(path_str);

        info!(path = %path.display(), n, "Tailing log");

        let tail = self.tail(&path, n).await?;
        Ok(ToolResult::success(&call.id, tail))
    }
}
