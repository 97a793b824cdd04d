use std::net::SocketAddr;

use anyhow::Context;
use contact_intake::{app, services::Ports, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up CONTACT_EMAIL, STORE_TABLE, etc.
    let _ = dotenvy::dotenv();

    contact_intake::logging::init_tracing();

    // Read once; everything downstream gets it by reference
    let config = AppConfig::from_env().context("invalid configuration")?;
    let ports = Ports::from_config(&config).await?;
    let state = AppState::new(&config, ports)?;

    let app = app(state, config.api.max_body_bytes);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        address = %bind_addr,
        cors_origin = %config.api.cors_origin,
        "Contact intake listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
