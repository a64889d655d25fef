//! Sequential completion pipeline
//!
//! An ordered list of persona-framed stages run one after another against a
//! completion client. Each stage sees the topic plus everything the stages
//! before it produced; the last stage's text is the pipeline's output.

mod article;
mod template;

pub use article::{article_pipeline, DEFAULT_TOPIC};
pub use template::{render, TemplateError, TemplateVars};

use crate::llm::{Completion, CompletionClient, CompletionError, Persona};
use std::time::Duration;
use thiserror::Error;

/// One stop in the pipeline: a persona plus what to do and what to hand back
///
/// Created once at startup and never mutated. `expected_output` is guidance
/// text appended to the prompt; the reply is not validated against it.
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub name: String,
    pub persona: Persona,
    pub instructions: String,
    pub expected_output: String,
}

impl StageSpec {
    pub fn new(
        name: impl Into<String>,
        persona: Persona,
        instructions: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            persona,
            instructions: instructions.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// Per-run input
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub topic: String,
}

impl PipelineInput {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

/// Output of one completed stage, owned by the runner for the run
#[derive(Debug)]
struct StageResult {
    text: String,
}

/// Pipeline failures
///
/// The first failing stage aborts the run: no partial result is returned,
/// no stage is retried, and no stage past the failure point is attempted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline has no stages")]
    Empty,

    #[error("invalid prompt template in stage '{stage}': {source}")]
    Template {
        stage: String,
        #[source]
        source: TemplateError,
    },

    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: CompletionError,
    },
}

#[derive(Default)]
pub struct Pipeline {
    stages: Vec<StageSpec>,
    stage_timeout: Option<Duration>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stage(&mut self, stage: StageSpec) {
        self.stages.push(stage);
    }

    /// Bound each stage's completion call; expiry fails the run
    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = Some(timeout);
        self
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Run every stage in order and return the last stage's text.
    ///
    /// Stage i+1 never starts before stage i's completion call returns.
    /// Holds no state between runs: identical inputs against a
    /// deterministic client produce identical output.
    pub async fn run(
        &self,
        client: &dyn CompletionClient,
        input: &PipelineInput,
    ) -> Result<String, PipelineError> {
        if self.stages.is_empty() {
            return Err(PipelineError::Empty);
        }

        let vars = TemplateVars::new().set("topic", input.topic.as_str());
        let mut results: Vec<StageResult> = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let persona = Persona::new(
                render_for(&stage.persona.role, &vars, &stage.name)?,
                render_for(&stage.persona.goal, &vars, &stage.name)?,
                render_for(&stage.persona.backstory, &vars, &stage.name)?,
            );

            let mut prompt = render_for(&stage.instructions, &vars, &stage.name)?;
            if !stage.expected_output.is_empty() {
                prompt.push_str("\n\nExpected output: ");
                prompt.push_str(&render_for(&stage.expected_output, &vars, &stage.name)?);
            }

            let context = results
                .iter()
                .map(|r| r.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");

            let completion = self
                .complete_stage(client, &persona, &prompt, &context)
                .await
                .map_err(|source| PipelineError::Stage {
                    stage: stage.name.clone(),
                    source,
                })?;

            tracing::info!("stage '{}' completed", stage.name);
            if let Some(usage) = &completion.usage {
                tracing::debug!(
                    stage = %stage.name,
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "token usage"
                );
            }

            results.push(StageResult {
                text: completion.text,
            });
        }

        results
            .pop()
            .map(|r| r.text)
            .ok_or(PipelineError::Empty)
    }

    async fn complete_stage(
        &self,
        client: &dyn CompletionClient,
        persona: &Persona,
        prompt: &str,
        context: &str,
    ) -> Result<Completion, CompletionError> {
        match self.stage_timeout {
            Some(deadline) => tokio::time::timeout(
                deadline,
                client.complete(persona, prompt, context),
            )
            .await
            .map_err(|_| CompletionError::Timeout(deadline.as_secs()))?,
            None => client.complete(persona, prompt, context).await,
        }
    }
}

fn render_for(
    template: &str,
    vars: &TemplateVars,
    stage: &str,
) -> Result<String, PipelineError> {
    render(template, vars).map_err(|source| PipelineError::Template {
        stage: stage.to_string(),
        source,
    })
}
