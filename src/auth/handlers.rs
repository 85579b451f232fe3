use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{Duration, OffsetDateTime};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        claims::Role,
        dto::{
            AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, PublicUser,
            RefreshRequest, RegisterRequest, ResetPasswordRequest,
        },
        jwt::{AuthUser, JwtKeys},
        password::{generate_otp, hash_password, verify_password},
        repo_types::{PasswordReset, User},
        services::{check_reset_code, send_reset_code},
    },
    error::{map_write_error, AppError, AppResult},
    state::AppState,
    validation::{char_len_between, check_new_password, normalize_email},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/password/forgot", post(forgot_password))
        .route("/auth/password/reset", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn public(user: User) -> PublicUser {
    PublicUser {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    }
}

fn issue(state: &AppState, user: User) -> AppResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(state);
    let pair = keys.issue_pair(user.id, Role::User).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AppError::Internal(e)
    })?;
    Ok(Json(AuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user: public(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let full_name = payload.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(AppError::Validation("Please enter your full name.".into()));
    }
    char_len_between(
        &full_name,
        2,
        20,
        "Name must be between 2 and 20 characters.",
    )?;
    let email = normalize_email(&payload.email).map_err(|e| {
        warn!(email = %payload.email, "invalid email");
        e
    })?;
    check_new_password(&payload.password, &payload.confirm_password)?;

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict("Email is taken.".into()));
    }

    let hash = hash_password(&payload.password)?;

    // The unique index still guards the window between the lookup and the insert.
    let user = User::create(&state.db, &full_name, &email, &hash)
        .await
        .map_err(|e| map_write_error(e, "Email is taken.", "Email is taken."))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    let body = issue(&state, user)?;
    Ok((StatusCode::CREATED, body))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&payload.email)?;

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(%email, "login unknown email");
        return Err(AppError::Unauthorized(
            "No account found with that email.".into(),
        ));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized(
            "Incorrect password. Please try again.".into(),
        ));
    }

    User::touch_last_login(&state.db, user.id).await?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    issue(&state, user)
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;
    if claims.role != Role::User {
        return Err(AppError::Unauthorized("User refresh token required".into()));
    }

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
    issue(&state, user)
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, user_id).await?.ok_or_else(|| {
        error!(user_id = %user_id, "user not found");
        AppError::Unauthorized("User not found".into())
    })?;
    Ok(Json(public(user)))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = normalize_email(&payload.email)?;

    if User::find_by_email(&state.db, &email).await?.is_none() {
        return Err(AppError::NotFound(
            "No account found with that email address.".into(),
        ));
    }

    let otp = generate_otp();
    let otp_hash = hash_password(&otp)?;
    let ttl_minutes = state.config.otp_ttl_minutes;
    let expires_at = OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes);
    PasswordReset::upsert(&state.db, &email, &otp_hash, expires_at).await?;

    send_reset_code(state.mailer.as_ref(), &email, &otp, ttl_minutes).await?;

    info!(%email, "password reset code issued");
    Ok(Json(MessageResponse {
        message: "An OTP has been sent to your email.".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = normalize_email(&payload.email)?;
    check_new_password(&payload.password, &payload.confirm_password)?;

    let reset = PasswordReset::find(&state.db, &email).await?;
    check_reset_code(reset.as_ref(), &payload.otp, OffsetDateTime::now_utc()).map_err(|e| {
        warn!(%email, reason = %e, "reset code rejected");
        e
    })?;

    let hash = hash_password(&payload.password)?;
    PasswordReset::complete(&state.db, &email, &hash).await?;

    info!(%email, "password reset completed");
    Ok(Json(MessageResponse {
        message: "Your password has been reset. Please sign in.".into(),
    }))
}
