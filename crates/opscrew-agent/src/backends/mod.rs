pub mod openai;

use crate::llm::{ChatMessage, LlmResponse};
use async_trait::async_trait;
use opscrew_core::OpscrewResult;
use opscrew_tools::ToolDescriptor;

/// Trait a reasoning backend implements.
///
/// The contract is deliberately narrow: given a structured prompt and the
/// set of tools the agent may use, return either final text or a request
/// to invoke tools. The tool-decision loop lives behind this boundary —
/// the pipeline only supplies the capability and awaits the final string.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// One non-streaming chat completion.
    async fn chat(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> OpscrewResult<LlmResponse>;
}
