//! SoilSense Service - synthetic soil data HTTP API.
//!
//! Run with: `cargo run -p soilsense-service`

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use clap::Parser;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use soilsense_service::config::parse_cors_origins;
use soilsense_service::{AppState, Config, api};
use soilsense_store::SoilStore;

/// SoilSense Service - synthetic soil monitoring REST API.
#[derive(Parser, Debug)]
#[command(name = "soilsense-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// Dataset generation seed (overrides config).
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_server(Args::parse()).await
}

async fn run_server(args: Args) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("soilsense_service=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    // Override config with CLI args and environment
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(seed) = args.seed {
        config.data.seed = Some(seed);
    }
    if let Ok(origins) = std::env::var("SOILSENSE_CORS_ORIGINS") {
        config.server.cors_origins = parse_cors_origins(&origins);
    }

    config.validate()?;

    // Generate the dataset
    let store = match config.data.seed {
        Some(seed) => {
            info!("Generating dataset from seed {}", seed);
            SoilStore::with_seed(seed)
        }
        None => SoilStore::new(),
    };

    // Create application state
    let state = AppState::new(store);

    // A wildcard origin cannot be combined with credentials, so the two
    // CORS modes diverge
    let cors = if config.server.cors_allows_any() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .server
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse()?;

    info!("Starting server on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
