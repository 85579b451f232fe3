use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::repo::{dashboard_stats, Admin, DashboardStats};
use crate::{
    auth::{
        claims::Role,
        jwt::{AdminUser, JwtKeys},
        password::verify_password,
    },
    error::{AppError, AppResult},
    state::AppState,
    validation::is_valid_email,
};

#[derive(Debug, serde::Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct AdminRefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AdminAuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub admin: PublicAdmin,
}

#[derive(Debug, Serialize)]
pub struct PublicAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/refresh", post(refresh))
        .route("/admin/dashboard", get(dashboard))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".into())
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminAuthResponse>> {
    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(invalid_credentials());
    }

    let Some(admin) = Admin::find_by_email(&state.db, &email).await? else {
        warn!(%email, "admin login unknown email");
        return Err(invalid_credentials());
    };
    if !verify_password(&payload.password, &admin.password_hash)? {
        warn!(%email, admin_id = %admin.id, "admin login invalid password");
        return Err(invalid_credentials());
    }

    info!(admin_id = %admin.id, "admin logged in");
    issue(&state, admin)
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<AdminRefreshRequest>,
) -> AppResult<Json<AdminAuthResponse>> {
    let claims = JwtKeys::from_ref(&state)
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;
    if claims.role != Role::Admin {
        return Err(AppError::Forbidden);
    }
    let admin = Admin::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Admin not found".into()))?;
    issue(&state, admin)
}

fn issue(state: &AppState, admin: Admin) -> AppResult<Json<AdminAuthResponse>> {
    let pair = JwtKeys::from_ref(state).issue_pair(admin.id, Role::Admin)?;
    Ok(Json(AdminAuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        admin: PublicAdmin {
            id: admin.id,
            email: admin.email,
            role: admin.role,
        },
    }))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = dashboard_stats(&state.db).await?;
    debug!(%admin_id, total_users = stats.total_users, "dashboard stats loaded");
    Ok(Json(stats))
}
