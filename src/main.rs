//! Server binary: binds the HTTP surface around a single shared provider.

use std::net::SocketAddr;
use std::sync::Arc;

use lubimyczytac_provider::{server, Provider, ProviderConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000);

    let provider = Provider::new(ProviderConfig::default())?;
    let app = server::build_router(Arc::new(provider));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("lubimyczytac provider listening on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
