//! byline: blog articles from a topic string, three completion calls deep
//!
//! This library provides:
//! - A sequential role-playing pipeline (planner → writer → editor) where
//!   each stage's output feeds the next stage's prompt context
//! - Completion clients for Gemini and OpenAI behind a common trait
//! - Credential resolution from the environment with a key=value settings
//!   file fallback
//! - TOML configuration for provider, model, and per-stage deadline

pub mod config;
pub mod credentials;
pub mod llm;
pub mod pipeline;

pub use config::Config;
pub use credentials::{resolve_api_key, CredentialError};
pub use llm::{create_client, credential_name, CompletionClient, CompletionError, Persona};
pub use pipeline::{article_pipeline, Pipeline, PipelineError, PipelineInput, StageSpec};
