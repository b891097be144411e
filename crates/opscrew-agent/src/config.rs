use serde::{Deserialize, Serialize};

/// Which reasoning backend API to talk to.
///
/// All current providers speak the OpenAI chat-completions dialect; the
/// variant selects the default base URL and any provider-specific headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    OpenRouter,
    /// Groq cloud inference — OpenAI-compatible API, free tier with rate limits.
    Groq,
}

/// Configuration for the reasoning backend shared by every agent in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: LlmProvider,
    pub model_id: String,
    /// May be left empty in config and supplied via the environment.
    #[serde(default)]
    pub api_key: String,
    pub api_base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Upper bound on backend round-trips per task (tool-use turns).
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_turns() -> u32 {
    10
}

impl ModelConfig {
    /// The API base URL: the configured override, or the provider default.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
                LlmProvider::Groq => "https://api.groq.com/openai",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_serializes_lowercase() {
        let json = serde_json::to_string(&LlmProvider::OpenRouter).unwrap();
        assert_eq!(json, "\"openrouter\"");
        let back: LlmProvider = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, LlmProvider::OpenRouter));
    }

    #[test]
    fn base_url_defaults_per_provider() {
        let mut config = ModelConfig {
            provider: LlmProvider::OpenAi,
            model_id: "gpt-4o-mini".to_string(),
            api_key: "key".to_string(),
            api_base_url: None,
            temperature: 0.7,
            max_tokens: 4096,
            max_turns: 10,
        };
        assert_eq!(config.base_url(), "https://api.openai.com");

        config.provider = LlmProvider::Groq;
        assert_eq!(config.base_url(), "https://api.groq.com/openai");

        config.api_base_url = Some("http://localhost:8080".to_string());
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn numeric_fields_have_defaults() {
        let toml_str = r#"
            provider = "openai"
            model_id = "gpt-4o-mini"
            api_key = "test-key"
        "#;
        let config: ModelConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.max_turns, 10);
        assert!(config.api_base_url.is_none());
    }
}
