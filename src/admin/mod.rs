pub mod handlers;
pub mod repo;

use anyhow::Context;
use axum::Router;
use tracing::info;

use crate::{auth::password::hash_password, config::AdminBootstrap, state::AppState};

pub fn router() -> Router<AppState> {
    handlers::admin_routes()
}

/// Creates the configured admin account on first start.
pub async fn bootstrap(state: &AppState, creds: &AdminBootstrap) -> anyhow::Result<()> {
    let email = creds.email.trim().to_lowercase();
    if repo::Admin::find_by_email(&state.db, &email).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password(&creds.password)?;
    let created = repo::Admin::ensure(&state.db, &email, &hash)
        .await
        .context("create bootstrap admin")?;
    if created {
        info!(%email, "bootstrap admin created");
    }
    Ok(())
}
