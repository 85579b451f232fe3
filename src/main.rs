mod admin;
mod app;
mod auth;
mod catalog;
mod config;
mod error;
mod mail;
mod profile;
mod recommendations;
mod state;
mod validation;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "pathway=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    sqlx::migrate!("./migrations").run(&app_state.db).await?;

    if let Some(creds) = app_state.config.admin_bootstrap.clone() {
        admin::bootstrap(&app_state, &creds).await?;
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
