use std::net::SocketAddr;
use std::path::Path;

mod app;
mod auth;
mod config;
mod migrate;
mod state;
mod users;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "userbase={},axum=info,tower_http=info",
            config.logging.level
        )
    });
    if config.server.mode == "release" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
    if let Some(path) = &config.logging.file_path {
        tracing::warn!(%path, "file log output is not wired up; logging to stderr");
    }
    tracing::debug!(
        redis_host = %config.redis.host,
        redis_port = config.redis.port,
        smtp_host = %config.email.smtp_host,
        smtp_port = config.email.smtp_port,
        smtp_from = %config.email.from,
        "collaborator endpoints configured"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let mode = config.server.mode.clone();

    let state = AppState::init(config).await?;
    migrate::run(&state.db, Path::new("migrations")).await?;

    tracing::info!(%addr, %mode, "starting userbase");
    let app = app::build_app(state);
    app::serve(app, addr).await
}
