use crate::backends::openai::OpenAiBackend;
use crate::backends::LlmBackend;
use crate::config::ModelConfig;
use opscrew_core::{OpscrewResult, ToolCall};
use opscrew_tools::ToolDescriptor;
use serde::{Deserialize, Serialize};

/// The author of a [`ChatMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the request sent to the reasoning backend.
///
/// Tool results are folded back as user messages carrying a structured
/// payload, so the conversation stays a plain user/assistant alternation
/// regardless of provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// A user-authored message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An assistant-authored message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// The backend's answer to one chat request.
#[derive(Debug)]
pub enum LlmResponse {
    /// Final text; the task is done from the backend's point of view.
    Done(String),
    /// The backend wants one or more tools invoked before it answers.
    ToolUse {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
}

/// Client that dispatches chat requests to the configured provider backend.
pub struct LlmClient {
    backend: Box<dyn LlmBackend>,
}

impl LlmClient {
    /// Builds the client for the configured provider.
    pub fn new(config: ModelConfig) -> Self {
        // Every current provider speaks the OpenAI dialect; the backend
        // handles per-provider base URLs and headers.
        Self {
            backend: Box::new(OpenAiBackend::new(config)),
        }
    }

    /// Creates the client from a pre-built backend (tests, custom providers).
    pub fn from_backend(backend: Box<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// One chat completion round-trip.
    pub async fn chat(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> OpscrewResult<LlmResponse> {
        self.backend.chat(system_prompt, messages, tools).await
    }
}
