//! OpenAI chat-completions translation provider.
//!
//! Sends one chat request per translation with a fixed system prompt and
//! converts the reported token usage into a cost in cents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::locale::{self, AUTO};
use crate::provider::{Translation, TranslationProvider};

/// Upper bound on completion tokens requested from the provider.
const MAX_COMPLETION_TOKENS: usize = 4000;

// == Provider ==
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// Builds a provider from configuration.
    ///
    /// The HTTP client carries the configured timeout, so every
    /// translation call is bounded.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.provider_timeout_secs))
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.provider_base_url.clone(),
            api_key: config.provider_api_key.clone(),
            model: config.provider_model.clone(),
        })
    }

    fn system_prompt(source_language: &str, target_language: &str) -> String {
        let source_name = if source_language == AUTO {
            "auto-detect"
        } else {
            locale::language_name(source_language)
        };
        let target_name = locale::language_name(target_language);

        format!(
            "You are a professional translator. Translate the following text \
             from {source_name} to {target_name}.\n\n\
             Rules:\n\
             - Maintain the original tone and style\n\
             - Preserve any formatting (markdown, HTML, etc.)\n\
             - If the text contains code or technical terms, keep them in their original language\n\
             - Return only the translated text, no explanations\n\
             - If the text is already in the target language, return it unchanged"
        )
    }
}

#[async_trait]
impl TranslationProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Translation> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(source_language, target_language),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: MAX_COMPLETION_TOKENS.min(text.len() * 2) as u32,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Provider("provider call timed out".to_string())
                } else {
                    ApiError::Provider(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ApiError::Provider(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Provider(format!("invalid provider response: {e}")))?;

        let translated_text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        let usage = completion.usage.unwrap_or_default();
        let cost = cost_cents(&self.model, usage.prompt_tokens, usage.completion_tokens);

        Ok(Translation {
            translated_text,
            tokens_used: usage.total_tokens,
            cost,
        })
    }
}

// == Cost Model ==
/// Provider rate in dollars per 1K tokens.
fn rate_per_1k_tokens(model: &str) -> f64 {
    match model {
        "gpt-4" => 0.03,
        "gpt-4-turbo" => 0.01,
        _ => 0.002,
    }
}

/// Converts token usage into cents.
///
/// Input tokens are billed at roughly a third of the output rate.
pub(crate) fn cost_cents(model: &str, prompt_tokens: i64, completion_tokens: i64) -> i64 {
    let rate = rate_per_1k_tokens(model);
    let dollars = (prompt_tokens as f64 * rate * 0.33 + completion_tokens as f64 * rate) / 1000.0;
    (dollars * 100.0).round() as i64
}

// == Wire Types ==
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    prompt_tokens: i64,
    completion_tokens: i64,
    total_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_scales_with_model() {
        let cheap = cost_cents("gpt-3.5-turbo", 1000, 1000);
        let expensive = cost_cents("gpt-4", 1000, 1000);
        assert!(expensive > cheap);
    }

    #[test]
    fn test_cost_zero_tokens() {
        assert_eq!(cost_cents("gpt-3.5-turbo", 0, 0), 0);
    }

    #[test]
    fn test_cost_known_value() {
        // 1000 output tokens of gpt-4 at $0.03/1K is $0.03, plus a third
        // of that for 1000 input tokens: about 4 cents rounded.
        assert_eq!(cost_cents("gpt-4", 1000, 1000), 4);
    }

    #[test]
    fn test_unknown_model_uses_cheapest_rate() {
        assert_eq!(
            cost_cents("some-future-model", 500, 500),
            cost_cents("gpt-3.5-turbo", 500, 500)
        );
    }

    #[test]
    fn test_system_prompt_names_languages() {
        let prompt = OpenAiProvider::system_prompt("en", "fr");
        assert!(prompt.contains("English"));
        assert!(prompt.contains("French"));

        let auto = OpenAiProvider::system_prompt("auto", "de");
        assert!(auto.contains("auto-detect"));
        assert!(auto.contains("German"));
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Hello".to_string(),
            }],
            temperature: 0.3,
            max_tokens: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Bonjour"}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Bonjour");
        assert_eq!(response.usage.unwrap().total_tokens, 25);
    }
}
