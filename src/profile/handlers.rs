use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CareerGoalRequest, EducationLevelRequest, ProfileResponse, StrengthsRequest, UpdateProfileRequest},
    repo,
    services::{build_profile_update, check_career_goal, check_free_text, parse_education_level},
};
use crate::{
    auth::{jwt::AuthUser, repo_types::User},
    error::{AppError, AppResult},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/onboarding/education-level", put(set_education_level))
        .route("/onboarding/career-goal", put(set_career_goal))
        .route("/onboarding/strengths", put(set_strengths))
}

fn found(user: Option<User>) -> AppResult<Json<ProfileResponse>> {
    user.map(|u| Json(ProfileResponse::from(u)))
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    found(User::find_by_id(&state.db, user_id).await?)
}

#[instrument(skip(state, payload))]
pub async fn set_education_level(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EducationLevelRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let level = parse_education_level(&payload.education_level)?;
    let user = repo::set_education_level(&state.db, user_id, &level).await?;
    info!(%user_id, %level, "education level saved");
    found(user)
}

#[instrument(skip(state, payload))]
pub async fn set_career_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CareerGoalRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let goal = payload.career_goal.trim();
    check_career_goal(goal)?;
    let user = repo::set_career_goal(&state.db, user_id, goal).await?;
    info!(%user_id, "career goal saved");
    found(user)
}

#[instrument(skip(state, payload))]
pub async fn set_strengths(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<StrengthsRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let strengths = payload.strengths.trim();
    check_free_text(strengths, "Strengths")?;
    let user = repo::set_strength(&state.db, user_id, strengths).await?;
    info!(%user_id, "strengths saved");
    found(user)
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let update = build_profile_update(&payload)?;
    let user = repo::apply_update(&state.db, user_id, &update).await?;
    info!(%user_id, "profile updated");
    found(user)
}
