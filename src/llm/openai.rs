//! OpenAI completion client
//!
//! SECURITY: API keys are ONLY sent to official OpenAI endpoints.
//! The key is never sent to any third-party services.

use super::{Completion, CompletionClient, CompletionError, Persona, TokenUsage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Official OpenAI API endpoint - API key is ONLY sent here
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: usize,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o".to_string(),
            max_tokens: 4096,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_request(&self, persona: &Persona, instructions: &str, context: &str) -> OpenAiRequest {
        let mut user_content = instructions.to_string();
        if !context.is_empty() {
            user_content.push_str("\n\nWork produced so far:\n\n");
            user_content.push_str(context);
        }

        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: persona.system_prompt(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: user_content,
                },
            ],
            max_tokens: Some(self.max_tokens),
        }
    }

    async fn send_request(&self, request: OpenAiRequest) -> Result<OpenAiResponse, CompletionError> {
        let response = self
            .client
            .post(OPENAI_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::from_network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::from_http_status(status, error_text));
        }

        response
            .json::<OpenAiResponse>()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        persona: &Persona,
        instructions: &str,
        context: &str,
    ) -> Result<Completion, CompletionError> {
        let request = self.build_request(persona, instructions, context);
        tracing::debug!(model = %self.model, "sending chat completion request");

        let response = self.send_request(request).await?;

        let usage = response.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            CompletionError::MalformedResponse("response contained no choices".to_string())
        })?;

        let text = choice.message.content.unwrap_or_default();
        if text.is_empty() {
            return Err(CompletionError::MalformedResponse(
                "choice contained no message content".to_string(),
            ));
        }

        Ok(Completion { text, usage })
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
