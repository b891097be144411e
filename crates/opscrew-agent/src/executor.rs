use crate::backends::LlmBackend;
use crate::config::ModelConfig;
use crate::llm::{ChatMessage, LlmClient, LlmResponse};
use crate::spec::AgentSpec;
use opscrew_core::{interpolate, ExecutionContext, OpscrewError, OpscrewResult, ToolResult};
use opscrew_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{info, warn};

/// The task-side half of a reasoning request: the raw description template
/// and the expected-output contract. The executor renders the template
/// against the run's input mapping before anything reaches the backend.
#[derive(Debug, Clone, Copy)]
pub struct TaskPrompt<'a> {
    pub task_name: &'a str,
    pub description: &'a str,
    pub expected_output: &'a str,
}

/// Executes one task for one agent: assembles the reasoning request, loops
/// with the backend while it asks for tool invocations, and returns the
/// backend's final text.
pub struct AgentExecutor {
    llm: LlmClient,
    tools: Arc<ToolRegistry>,
    max_turns: u32,
}

impl AgentExecutor {
    /// Builds the executor for the configured provider.
    pub fn new(config: ModelConfig, tools: Arc<ToolRegistry>) -> Self {
        let max_turns = config.max_turns;
        Self {
            llm: LlmClient::new(config),
            tools,
            max_turns,
        }
    }

    /// Builds the executor from a pre-built backend (tests, custom providers).
    pub fn from_backend(
        backend: Box<dyn LlmBackend>,
        tools: Arc<ToolRegistry>,
        max_turns: u32,
    ) -> Self {
        Self {
            llm: LlmClient::from_backend(backend),
            tools,
            max_turns,
        }
    }

    /// Runs one task to completion and returns the agent's final text.
    pub async fn execute(
        &self,
        agent: &AgentSpec,
        task: &TaskPrompt<'_>,
        context: &ExecutionContext,
    ) -> OpscrewResult<String> {
        let rendered = interpolate(task.description, context.inputs())?;
        let system_prompt = agent.system_prompt();
        let descriptors = self.tools.descriptors_for(&agent.tools);

        let mut messages = vec![ChatMessage::user(assemble_user_prompt(
            &rendered,
            task.expected_output,
            context,
        ))];

        info!(
            agent = %agent.name,
            task = %task.task_name,
            tools = descriptors.len(),
            prior_outputs = context.completed_count(),
            "Executing task"
        );

        for turn in 0..self.max_turns {
            let response = self
                .llm
                .chat(&system_prompt, &messages, &descriptors)
                .await
                .map_err(|e| OpscrewError::Agent(format!("backend call failed: {e}")))?;

            match response {
                LlmResponse::Done(text) => {
                    info!(
                        agent = %agent.name,
                        task = %task.task_name,
                        turns = turn + 1,
                        "Task produced final output"
                    );
                    return Ok(text);
                }

                LlmResponse::ToolUse {
                    content,
                    tool_calls,
                } => {
                    if let Some(text) = content {
                        messages.push(ChatMessage::assistant(text));
                    }

                    for call in tool_calls {
                        info!(
                            agent = %agent.name,
                            tool = %call.name,
                            call_id = %call.id,
                            "Invoking tool"
                        );

                        let result = if agent.tools.iter().any(|t| t == &call.name) {
                            self.tools.invoke(call.clone()).await
                        } else {
                            Err(OpscrewError::UnknownTool(call.name.clone()))
                        };

                        let tool_result = match result {
                            Ok(r) => r,
                            // An unresolvable tool name is a contract breach,
                            // not something the backend can reformulate around.
                            Err(e @ OpscrewError::UnknownTool(_)) => return Err(e),
                            Err(e) => {
                                warn!(
                                    agent = %agent.name,
                                    tool = %call.name,
                                    error = %e,
                                    "Tool invocation failed, reporting to backend"
                                );
                                ToolResult::error(&call.id, e.to_string())
                            }
                        };

                        let payload = serde_json::json!({
                            "type": "tool_result",
                            "tool_call_id": tool_result.call_id,
                            "content": tool_result.content,
                            "is_error": tool_result.is_error,
                        });
                        messages.push(ChatMessage::user(payload.to_string()));
                    }
                }
            }
        }

        warn!(
            agent = %agent.name,
            task = %task.task_name,
            max_turns = self.max_turns,
            "Task exceeded backend turn budget"
        );
        Err(OpscrewError::Agent(format!(
            "task '{}' exceeded the maximum of {} backend turns",
            task.task_name, self.max_turns
        )))
    }
}

/// Builds the user-side prompt: rendered description, expected-output
/// contract, and every prior task's output so later agents can reference
/// earlier results by content.
fn assemble_user_prompt(
    rendered_description: &str,
    expected_output: &str,
    context: &ExecutionContext,
) -> String {
    let mut prompt = format!(
        "Your task:\n{rendered_description}\n\nExpected output:\n{expected_output}\n"
    );
    if context.completed_count() > 0 {
        prompt.push_str("\nOutputs of previously completed tasks:\n");
        for output in context.outputs() {
            prompt.push_str(&format!(
                "\n## Output of task `{}`\n\n{}\n",
                output.task, output.content
            ));
        }
    }
    prompt
}
