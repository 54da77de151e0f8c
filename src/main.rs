//! Verdict HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use verdict::config::Config;
use verdict::embedding::{EmbedderConfig, QueryEmbedder};
use verdict::engine::FaqEngine;
use verdict::fallback::FallbackResponder;
use verdict::gateway::{HandlerState, create_router_with_state};
use verdict::lexical::Normalizer;
use verdict::policy::DecisionPolicy;
use verdict::reranker::{CrossEncoder, CrossEncoderConfig};
use verdict::retrieval::{QdrantFaqIndex, SemanticRetriever};
use verdict::smalltalk::SmallTalkFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        qdrant_url = %config.qdrant_url,
        "Verdict starting"
    );

    let embedder_config = if let Some(path) = &config.embedder_path {
        EmbedderConfig::new(path.clone())
    } else {
        tracing::warn!("No VERDICT_EMBEDDER_PATH configured, running embedder in stub mode");
        EmbedderConfig::stub()
    };
    let embedder = QueryEmbedder::load(embedder_config)?;

    let encoder_config = if let Some(path) = &config.reranker_path {
        CrossEncoderConfig::new(path.clone())
    } else {
        tracing::warn!("No VERDICT_RERANKER_PATH configured, running reranker in stub mode");
        CrossEncoderConfig::stub()
    };
    let encoder = CrossEncoder::load(encoder_config)?;

    let index = QdrantFaqIndex::new(&config.qdrant_url)?;
    index.health_check().await?;
    let retriever = SemanticRetriever::new(embedder, index);
    retriever.ensure_ready().await?;

    let normalizer = Normalizer::default();
    let policy = DecisionPolicy::new(config.thresholds.clone(), normalizer.clone())?;
    let small_talk = SmallTalkFilter::standard()?;

    let engine = Arc::new(
        FaqEngine::new(normalizer, small_talk, retriever, encoder, policy)
            .with_top_k(config.top_k),
    );

    if let Some(path) = &config.corpus_path {
        let indexed = engine.reload_corpus(path).await?;
        tracing::info!(indexed, corpus = %path.display(), "Initial corpus indexed");
    } else {
        tracing::warn!("No VERDICT_CORPUS_PATH configured, starting with the existing index");
    }

    let fallback = config
        .fallback_enabled
        .then(|| Arc::new(FallbackResponder::new(config.fallback_model.clone())));
    if fallback.is_some() {
        tracing::info!(model = %config.fallback_model, "Generative fallback enabled");
    }

    let state = HandlerState::new(engine, fallback, config.corpus_path.clone());
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Verdict shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("VERDICT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
