mod chat_loop;
mod config;
mod error;
mod handlers;
mod models;
mod services;
mod utils;

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_loop::ChatLoop;
use config::{Config, GOOGLE_API_KEY, TAVILY_API_KEY};
use services::{ChatModel, GeminiService, SearchProvider, TavilyService};

pub struct AppState {
    pub chat_model: Arc<dyn ChatModel>,
    pub search: Arc<dyn SearchProvider>,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build()?;

        Ok(Self {
            chat_model: Arc::new(GeminiService::new(client.clone(), config.gemini.clone())),
            search: Arc::new(TavilyService::new(client, config.tavily.clone())),
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let state = AppState::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = run_session(&config, &state, stdin.lock(), stdout.lock()).await;
    if let Err(e) = &result {
        error!("Chat session failed: {}", e);
    }
    Ok(result?)
}

/// Runs the chat loop, or reports missing API keys without touching either service.
async fn run_session<R: BufRead, W: Write>(
    config: &Config,
    state: &AppState,
    input: R,
    mut output: W,
) -> error::Result<()> {
    let missing = config.missing_credentials();
    if !missing.is_empty() {
        error!(?missing, "required API keys are not set");
        writeln!(
            output,
            "Error: Missing API keys. Set {} and {}.",
            GOOGLE_API_KEY, TAVILY_API_KEY
        )?;
        output.flush()?;
        return Ok(());
    }

    info!(
        model = %config.gemini.model,
        max_results = config.tavily.max_results,
        "Configuration loaded successfully"
    );

    ChatLoop::new(state, input, output).run().await
}
