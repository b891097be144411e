use super::LlmBackend;
use crate::config::{LlmProvider, ModelConfig};
use crate::llm::{ChatMessage, ChatRole, LlmResponse};
use async_trait::async_trait;
use opscrew_core::{OpscrewError, OpscrewResult, ToolCall};
use opscrew_tools::ToolDescriptor;

/// OpenAI-compatible chat-completions backend.
///
/// Covers OpenAI, OpenRouter, Groq, and any local inference server that
/// implements the same API.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn build_messages(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Vec<serde_json::Value> {
        let mut api_messages = vec![serde_json::json!({
            "role": "system",
            "content": system_prompt,
        })];
        for m in messages {
            api_messages.push(serde_json::json!({
                "role": match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                "content": m.content,
            }));
        }
        api_messages
    }

    fn build_tools(&self, tools: &[ToolDescriptor]) -> Vec<serde_json::Value> {
        tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters_schema,
                    }
                })
            })
            .collect()
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn chat(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> OpscrewResult<LlmResponse> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let mut body = serde_json::json!({
            "model": self.config.model_id,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": self.build_messages(system_prompt, messages),
        });
        if !tools.is_empty() {
            body["tools"] = serde_json::json!(self.build_tools(tools));
        }

        let mut request = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter requires attribution headers.
        if matches!(self.config.provider, LlmProvider::OpenRouter) {
            request = request
                .header("HTTP-Referer", "https://github.com/opscrew/opscrew")
                .header("X-Title", "opscrew");
        }

        let resp = request
            .json(&body)
            .send()
            .await
            .map_err(|e| OpscrewError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| OpscrewError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(OpscrewError::Http(format!(
                "chat completions error {status}: {resp_body}"
            )));
        }

        parse_chat_response(&resp_body)
    }
}

/// Parses a chat-completions response into text or tool calls.
pub fn parse_chat_response(body: &serde_json::Value) -> OpscrewResult<LlmResponse> {
    let message = &body["choices"][0]["message"];
    let content = message["content"].as_str().unwrap_or_default().to_string();

    let Some(tool_calls_json) = message["tool_calls"].as_array() else {
        return Ok(LlmResponse::Done(content));
    };

    let tool_calls: Vec<ToolCall> = tool_calls_json
        .iter()
        .filter_map(|tc| {
            let id = tc["id"].as_str()?;
            let name = tc["function"]["name"].as_str()?;
            let arguments: serde_json::Value =
                serde_json::from_str(tc["function"]["arguments"].as_str()?).unwrap_or_default();
            Some(ToolCall::new(id, name, arguments))
        })
        .collect();

    if tool_calls.is_empty() {
        return Ok(LlmResponse::Done(content));
    }

    Ok(LlmResponse::ToolUse {
        content: if content.is_empty() {
            None
        } else {
            Some(content)
        },
        tool_calls,
    })
}
