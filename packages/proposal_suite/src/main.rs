use anyhow::{Context, Result};
use assistant_registry::Registry;
use axum::{Router, routing::get};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::info;
use tracing_subscriber::prelude::*;
use uuid::Uuid;

mod config;
mod handlers;
mod metrics;
mod session;
#[cfg(test)]
mod test_helpers;
mod views;

use crate::config::{FileConfig, PageConfig, Profile, SessionConfig, SuiteConfig};
use crate::metrics::ServerMetrics;
use crate::session::SessionStore;

/// Custom span maker that adds a unique request ID to each incoming request
#[derive(Clone)]
struct RequestIdMakeSpan;

impl<B> MakeSpan<B> for RequestIdMakeSpan {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> tracing::Span {
        let request_id = Uuid::new_v4().to_string();
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

#[derive(Parser)]
#[command(name = "proposal-suite")]
#[command(about = "Switch between hosted chat assistants without reloading them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = "proposal_suite.toml")]
    config: PathBuf,

    /// Configuration preset
    #[arg(long, global = true, value_enum)]
    profile: Option<Profile>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve(ServeArgs),

    /// Validate the configuration and print the assistant registry
    Check,
}

#[derive(Parser, Default)]
struct ServeArgs {
    /// Port for the web server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(short = 'b', long)]
    host: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub registry: Arc<Registry>,
    /// Selection state, one entry per browser session
    pub sessions: Arc<SessionStore>,
    pub session_config: Arc<SessionConfig>,
    /// Sidebar text
    pub page: Arc<PageConfig>,
    /// Server metrics for observability
    pub metrics: Arc<ServerMetrics>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check) => check_command(&cli.config, cli.profile.as_ref()),
        Some(Commands::Serve(args)) => run_server(args, &cli.config, cli.profile.as_ref()).await,
        None => run_server(ServeArgs::default(), &cli.config, cli.profile.as_ref()).await,
    }
}

fn load_suite_config(
    path: &std::path::Path,
    profile: Option<&Profile>,
    args: Option<&ServeArgs>,
) -> Result<SuiteConfig> {
    let mut fc: FileConfig = config::load_config(path, profile)
        .extract()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(args) = args {
        if let Some(host) = &args.host {
            fc.server.host = Some(host.clone());
        }
        if let Some(port) = args.port {
            fc.server.port = Some(port);
        }
    }

    SuiteConfig::from_file(fc)
}

fn check_command(path: &std::path::Path, profile: Option<&Profile>) -> Result<()> {
    let config = load_suite_config(path, profile, None)?;

    println!("Configuration OK ({})", config.addr);
    for (index, assistant) in config.registry.iter().enumerate() {
        println!("  {}. {} -> {}", index + 1, assistant.label(), assistant.url);
    }
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(views::index_page))
        .route("/api/assistants", get(handlers::list_assistants))
        .route(
            "/api/selection",
            get(handlers::get_selection).post(handlers::post_selection),
        )
        .route("/health", get(handlers::health_handler))
        .route("/health/live", get(handlers::health_live_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}

async fn run_server(
    args: ServeArgs,
    path: &std::path::Path,
    profile: Option<&Profile>,
) -> Result<()> {
    // Setup logging
    let default_directive = if args.debug {
        "proposal_suite=debug,tower_http=debug,info"
    } else {
        "proposal_suite=info,tower_http=info,warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    info!("Starting proposal suite");

    // Registry problems are fatal: refuse to serve a broken navigation
    let config = load_suite_config(path, profile, Some(&args))?;

    info!("Loaded {} assistants:", config.registry.assistants().len());
    for assistant in config.registry.iter() {
        info!("  {} -> {}", assistant.label(), assistant.url);
    }

    let session_config = Arc::new(config.session.clone());
    match session_config.ttl {
        Some(ttl) => info!(
            "Sessions expire after {}s idle (sweep every {}s)",
            ttl.as_secs(),
            session_config.sweep_interval.as_secs()
        ),
        None => info!("Session expiry disabled"),
    }
    match session_config.max_sessions {
        Some(max) => info!("Keeping at most {} sessions", max),
        None => info!("Session count unbounded"),
    }

    let sessions = Arc::new(SessionStore::new(
        session_config.ttl,
        session_config.max_sessions,
    ));
    let metrics = Arc::new(ServerMetrics::new());

    // Spawn periodic idle-session sweep
    if session_config.ttl.is_some() {
        let sweep_sessions = sessions.clone();
        let sweep_metrics = metrics.clone();
        let period = session_config.sweep_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let n = sweep_sessions.purge_expired_at(Instant::now()).await;
                if n > 0 {
                    sweep_metrics.sessions_swept(n);
                    info!("Expired {} idle sessions", n);
                }
            }
        });
    }

    let app_state = AppState {
        registry: Arc::new(config.registry),
        sessions,
        session_config,
        page: Arc::new(config.page),
        metrics,
    };

    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http().make_span_with(RequestIdMakeSpan));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    let actual_addr = listener.local_addr()?;

    info!("Proposal suite listening on http://{}", actual_addr);
    info!("");
    info!("Web UI: http://{}/", actual_addr);
    info!("API endpoints:");
    info!("  GET  /api/assistants - List assistants");
    info!("  GET  /api/selection  - Current selection and region visibility");
    info!("  POST /api/selection  - Select an assistant");

    // Create shutdown signal handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, stopping...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}
