use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

mod api;
mod cli;
mod config;
mod error;
mod state;

use crate::api::create_router;
use crate::cli::CliArgs;
use crate::config::{ServerConfig, load_bookner_config};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args.clone())?;
    let bookner_config = load_bookner_config(server_config.config_file.as_deref())?;

    // --log-level and RUST_LOG take precedence over the logging section of
    // the bookner configuration
    let _log_guard = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(level))
            .init();
        None
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
        None
    } else {
        bookner::logging::init(&bookner_config.logging)?
    };

    info!("Starting bookner server v{}", bookner::VERSION);
    if let Some(path) = &server_config.config_file {
        info!("Loaded configuration from {}", path.display());
    }

    // Models are loaded and warmed before the listener opens
    let pipeline = bookner::init(&bookner_config).await?;

    let app_state = Arc::new(AppState::new(pipeline, server_config.clone()));

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(server_config.max_request_size));

    let mut app = create_router(app_state).layer(middleware);
    if server_config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    // Start the server
    let addr = SocketAddr::new(server_config.host, server_config.port);
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
