use anyhow::{Context, Result};
use clap::Parser;
use convomux_inference::{TextBackend, TextInferenceClient};
use convomux_kb::KnowledgeRetriever;
use convomux_router::{InboundInput, InputRouter, RouteOutcome};
use convomux_stream::SessionRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "convomux", about = "Dual-path router for text and voice model backends")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Route a single text query and exit
    #[arg(long)]
    text: Option<String>,

    /// Route the contents of an audio file and exit
    #[arg(long)]
    audio: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = convomux_core::AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("convomux starting");

    // Knowledge retriever (best-effort collaborator; absence is not fatal)
    let retriever: Arc<dyn KnowledgeRetriever> = match &config.knowledge_base {
        Some(kb_config) => {
            let registry = convomux_kb::RetrieverRegistry::new();
            let mut retriever = registry.create(&kb_config.provider).with_context(|| {
                format!("failed to create retriever '{}'", kb_config.provider)
            })?;
            let section = toml::Value::try_from(kb_config)
                .context("failed to serialize knowledge base config")?;
            retriever
                .initialize(section)
                .await
                .with_context(|| format!("failed to initialize retriever '{}'", kb_config.provider))?;
            tracing::info!(
                provider = %kb_config.provider,
                knowledge_base_id = %kb_config.id,
                "knowledge retrieval active"
            );
            Arc::from(retriever)
        }
        None => {
            tracing::warn!("no knowledge base configured, text answers will not be grounded");
            Arc::new(convomux_kb::StaticRetriever::new())
        }
    };

    // Text generation backend
    let backend_registry = convomux_inference::BackendRegistry::new();
    let mut backend = backend_registry
        .create(&config.text_model.backend)
        .with_context(|| format!("failed to create text backend '{}'", config.text_model.backend))?;
    let section = toml::Value::try_from(&config.text_model)
        .context("failed to serialize text model config")?;
    backend.initialize(section).await.with_context(|| {
        format!("failed to initialize text backend '{}'", config.text_model.backend)
    })?;
    let backend: Arc<dyn TextBackend> = Arc::from(backend);
    let text_client = TextInferenceClient::new(retriever, backend);
    tracing::info!(
        backend = %config.text_model.backend,
        model_id = %config.text_model.model_id,
        "text inference active"
    );

    // Streaming session registry
    let client_registry = convomux_stream::StreamClientRegistry::new();
    let mut stream_client = client_registry
        .create(&config.stream_model.client)
        .with_context(|| format!("failed to create stream client '{}'", config.stream_model.client))?;
    let section = toml::Value::try_from(&config.stream_model)
        .context("failed to serialize stream model config")?;
    stream_client.initialize(section).await.with_context(|| {
        format!("failed to initialize stream client '{}'", config.stream_model.client)
    })?;
    let sessions = Arc::new(SessionRegistry::new(stream_client));
    sessions.start();
    tracing::info!(client = %config.stream_model.client, "stream sessions active");

    let router = InputRouter::new(text_client, Arc::clone(&sessions));

    if let Some(query) = cli.text {
        route_and_print(&router, InboundInput::Text(query)).await?;
    } else if let Some(path) = cli.audio {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("failed to read audio file {:?}", path))?;
        route_and_print(&router, InboundInput::Binary(bytes)).await?;
    } else {
        println!("convomux interactive mode, ctrl-d to quit");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            // Per-request failures are reported, not fatal to the loop
            if let Err(e) = route_and_print(&router, InboundInput::Text(line.to_string())).await {
                tracing::error!("route failed: {e}");
            }
        }
    }

    tracing::info!("shutting down");
    sessions.shutdown().await;

    Ok(())
}

async fn route_and_print(router: &InputRouter, input: InboundInput) -> Result<()> {
    match router.route(input).await? {
        RouteOutcome::Text(result) => {
            println!("{}", result.content);
            if let Some(usage) = result.usage {
                tracing::info!(
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "token usage"
                );
            }
        }
        RouteOutcome::Audio {
            session_id,
            session,
        } => {
            println!("audio session created: {session_id}");

            // The channel comes up asynchronously; give it a short grace period
            for _ in 0..40 {
                if session.is_active() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            if session.is_active() {
                tracing::info!(session_id = %session_id, "stream channel active");
            } else {
                tracing::warn!(session_id = %session_id, "stream channel not yet active");
            }
            println!("active sessions: {:?}", router.active_sessions());
        }
    }
    Ok(())
}
