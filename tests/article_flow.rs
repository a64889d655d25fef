//! End-to-end pipeline flow against the built-in article stages
//!
//! Drives the real plan/write/edit pipeline with a scripted client, so the
//! whole path from stage definitions through template rendering to context
//! threading is exercised without any network.

use async_trait::async_trait;
use byline::pipeline::{article_pipeline, PipelineInput};
use byline::{CompletionClient, CompletionError, Persona};
use std::sync::Mutex;

struct ScriptedClient {
    outputs: Vec<String>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl ScriptedClient {
    fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        persona: &Persona,
        instructions: &str,
        context: &str,
    ) -> Result<byline::llm::Completion, CompletionError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((
            persona.system_prompt(),
            instructions.to_string(),
            context.to_string(),
        ));
        Ok(byline::llm::Completion {
            text: self.outputs[index].clone(),
            usage: None,
        })
    }
}

#[tokio::test]
async fn test_article_pipeline_runs_three_stages_in_order() {
    let client = ScriptedClient::new(&["the plan", "the draft", "the article"]);
    let pipeline = article_pipeline();

    let output = pipeline
        .run(&client, &PipelineInput::new("Artificial Intelligence"))
        .await
        .unwrap();

    assert_eq!(output, "the article");

    let calls = client.calls.lock().unwrap();
    assert_eq!(calls.len(), 3);

    // Stage order is fixed: planner first, then writer, then editor
    assert!(calls[0].0.contains("You are Content Planner"));
    assert!(calls[1].0.contains("You are Content Writer"));
    assert!(calls[2].0.contains("You are Editor"));

    // The writer sees the plan; the editor sees plan and draft
    assert_eq!(calls[0].2, "");
    assert_eq!(calls[1].2, "the plan");
    assert_eq!(calls[2].2, "the plan\n\nthe draft");
}

#[tokio::test]
async fn test_topic_reaches_every_stage_prompt() {
    let client = ScriptedClient::new(&["a", "b", "c"]);
    let pipeline = article_pipeline();

    pipeline
        .run(&client, &PipelineInput::new("Rust Programming"))
        .await
        .unwrap();

    let calls = client.calls.lock().unwrap();

    // Planner and writer templates name the topic directly; no call may
    // carry an unsubstituted placeholder
    assert!(calls[0].0.contains("Rust Programming"));
    assert!(calls[0].1.contains("Rust Programming"));
    assert!(calls[1].0.contains("Rust Programming"));
    assert!(calls[1].1.contains("Rust Programming"));
    for (system, prompt, _) in calls.iter() {
        assert!(!system.contains("{topic}"));
        assert!(!prompt.contains("{topic}"));
    }
}

#[tokio::test]
async fn test_second_stage_failure_stops_the_run() {
    struct FailOnSecond {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CompletionClient for FailOnSecond {
        fn name(&self) -> &str {
            "fail-on-second"
        }

        async fn complete(
            &self,
            _persona: &Persona,
            _instructions: &str,
            _context: &str,
        ) -> Result<byline::llm::Completion, CompletionError> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls == 2 {
                return Err(CompletionError::RateLimited("quota exhausted".to_string()));
            }
            Ok(byline::llm::Completion {
                text: "ok".to_string(),
                usage: None,
            })
        }
    }

    let client = FailOnSecond {
        calls: Mutex::new(0),
    };
    let pipeline = article_pipeline();

    let result = pipeline
        .run(&client, &PipelineInput::new("Artificial Intelligence"))
        .await;

    assert!(result.is_err());
    assert_eq!(*client.calls.lock().unwrap(), 2);
}
