//! # skillhubd: skillhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`skillhub.toml`, env vars)
//! - Initialise `tracing` with the configured filter
//! - Construct the device gateway selected by `gateway.kind`
//! - Build the directive router and the axum app around it
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use skillhub_adapter_gateway_http::HttpDeviceGateway;
use skillhub_adapter_http_axum::state::AppState;
use skillhub_adapter_virtual::VirtualGateway;
use skillhub_app::ports::DeviceGateway;
use skillhub_app::router::DirectiveRouter;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, GatewayKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match config.gateway.kind {
        GatewayKind::Http => {
            tracing::info!(base_url = %config.gateway.base_url, "using http device gateway");
            let gateway =
                HttpDeviceGateway::new(config.gateway.base_url.as_str(), config.gateway_timeout())?;
            serve(gateway, &config).await
        }
        GatewayKind::Virtual => {
            tracing::info!("using virtual device gateway");
            serve(VirtualGateway::default(), &config).await
        }
    }
}

async fn serve<G>(gateway: G, config: &Config) -> Result<(), Box<dyn std::error::Error>>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    let state = AppState::new(DirectiveRouter::new(gateway));
    let app = skillhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("skillhubd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("skillhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
