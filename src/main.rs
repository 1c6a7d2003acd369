mod app;
mod auth;
mod config;
mod docs;
mod error;
mod extract;
mod state;
mod users;

use crate::config::AppConfig;
use crate::state::AppState;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` filter, JSON lines when `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("userbase=debug,axum=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.with_target(false).json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env()?;
    let bind = config.bind_addr();
    let app_state = AppState::init(config).await?;
    let app = app::build_app(app_state)?;

    app::serve(app, &bind).await
}
