//! Inventory server binary entry point.
//!
//! Responsible for:
//! - Loading `.env` configuration
//! - Initializing the logging system
//! - Starting the HTTP gateway

use std::sync::Arc;

use engine::{Config, Engine};

fn setup_environment() -> Config {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    engine::logging::init_logger(&config.log_level, config.log_json);
    tracing::info!(environment = %config.environment, "environment initialized");
    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = setup_environment();

    tracing::info!("inventory-server starting...");

    let engine = Arc::new(Engine::with_config(&config));
    let app = engine::http::build_app(engine);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "inventory-server HTTP listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = &result {
        tracing::error!("server error: {e}");
    }

    tracing::info!("inventory-server shut down gracefully");
    result.map_err(Into::into)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("received SIGTERM, shutting down..."),
    }
}
