//! Completion client implementations

use crate::config::Config;

mod error;
mod gemini;
mod openai;
mod types;

pub use error::CompletionError;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use types::{Completion, Persona, TokenUsage};

use anyhow::Result;
use async_trait::async_trait;

/// Trait for text-completion providers
///
/// One call per pipeline stage, single-shot: implementations send exactly
/// one request and surface any failure to the caller. Persona fields,
/// instructions, and context arrive fully rendered; no placeholder
/// substitution happens past this seam.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Request generated text for a persona-framed instruction.
    ///
    /// `context` carries the accumulated output of earlier stages and is
    /// empty for the first stage.
    async fn complete(
        &self,
        persona: &Persona,
        instructions: &str,
        context: &str,
    ) -> Result<Completion, CompletionError>;
}

/// Map a provider name to the credential it needs
pub fn credential_name(provider: &str) -> Result<&'static str> {
    match provider.to_lowercase().as_str() {
        "gemini" | "google" => Ok("GEMINI_API_KEY"),
        "openai" | "gpt" => Ok("OPENAI_API_KEY"),
        _ => anyhow::bail!(
            "Unknown completion provider: {}. Supported: gemini, openai",
            provider
        ),
    }
}

/// Create a completion client from an explicit API key
///
/// The key is passed in rather than read from the environment here, so two
/// concurrent runs can use different credentials. `model` overrides the
/// configured default when given.
pub fn create_client(
    provider: &str,
    api_key: String,
    model: Option<&str>,
    config: &Config,
) -> Result<Box<dyn CompletionClient>> {
    match provider.to_lowercase().as_str() {
        "gemini" | "google" => {
            let mut c = GeminiClient::new(api_key)
                .with_model(&config.llm.gemini.model)
                .with_max_tokens(config.llm.gemini.max_tokens);
            if let Some(m) = model {
                c = c.with_model(m);
            }
            Ok(Box::new(c))
        }
        "openai" | "gpt" => {
            let mut c = OpenAiClient::new(api_key)
                .with_model(&config.llm.openai.model)
                .with_max_tokens(config.llm.openai.max_tokens);
            if let Some(m) = model {
                c = c.with_model(m);
            }
            Ok(Box::new(c))
        }
        _ => anyhow::bail!(
            "Unknown completion provider: {}. Supported: gemini, openai",
            provider
        ),
    }
}
