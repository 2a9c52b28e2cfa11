use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod app;
mod http;
mod tts;
mod ws;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bingo_gateway=info,bingo_core=info,tower_http=debug".into()),
        )
        .init();

    // config: BINGO_CONFIG path > ./bingo.toml, then HOST/PORT and BINGO_* env
    let config_path = std::env::var("BINGO_CONFIG").ok();
    let config = bingo_core::config::BingoConfig::load(config_path.as_deref())?;

    let tts = tts::GoogleTts::new(&config.tts)?;
    info!(endpoint = %config.tts.endpoint(), "text-to-speech ready");

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, config.gateway.port).parse()?;
    info!(dist = %config.frontend.dist_dir, "serving frontend bundle");

    let state = Arc::new(app::AppState::new(config, Arc::new(tts)));
    let router = app::build_router(state);

    info!("Bingo gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Bingo gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
