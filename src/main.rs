use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use byline::credentials::DEFAULT_SETTINGS_FILE;
use byline::pipeline::{article_pipeline, PipelineInput, DEFAULT_TOPIC};
use byline::{create_client, credential_name, resolve_api_key, Config};

#[derive(Parser)]
#[command(name = "byline")]
#[command(author, version, about = "Byline - draft a blog article from a topic via a planner/writer/editor pipeline", long_about = None)]
struct Cli {
    /// Topic to write about
    #[arg(default_value = DEFAULT_TOPIC)]
    topic: String,

    /// Completion provider to use (gemini, openai)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model to use (e.g. gemini-2.0-flash, gpt-4o)
    #[arg(short, long)]
    model: Option<String>,

    /// Settings file consulted when the environment lacks the API key
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "byline=debug"
    } else {
        "byline=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let provider = cli
        .provider
        .unwrap_or_else(|| config.llm.default_provider.clone());

    // Credential resolution happens before anything else network-shaped;
    // a missing key is a startup error, not a mid-pipeline one.
    let api_key = resolve_api_key(credential_name(&provider)?, &cli.settings)?;
    let client = create_client(&provider, api_key, cli.model.as_deref(), &config)?;

    let mut pipeline = article_pipeline();
    if config.pipeline.stage_timeout_secs > 0 {
        pipeline = pipeline.with_stage_timeout(Duration::from_secs(config.pipeline.stage_timeout_secs));
    }

    tracing::info!("generating article on '{}' via {}", cli.topic, client.name());
    let article = pipeline
        .run(client.as_ref(), &PipelineInput::new(cli.topic.as_str()))
        .await?;

    println!();
    println!("{}", "=".repeat(80));
    println!("{}", "GENERATED ARTICLE".bold());
    println!("{}", "=".repeat(80));
    println!("{article}");

    Ok(())
}
